use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

use fittrack_app::{Command, FitTrackHandler, Response, bootstrap, log_filter};
use fittrack_core::config::Config;
use fittrack_core::{JsonFileStore, StateStore};

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

fn encode<T: Serialize>(value: &T) -> Option<String> {
    match serde_json::to_string(value) {
        Ok(line) => Some(line),
        Err(e) => {
            tracing::error!(error = %e, "failed to encode output line");
            None
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (log_env, env_filter) = log_filter(|name| std::env::var(name).ok());
    // stdout carries the protocol, logs go to stderr
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
    tracing::info!("fittrack: log filter: {}", log_env);

    let config = Config::from_env()?;
    let store: Arc<dyn StateStore> = Arc::new(JsonFileStore::new(&config.data_dir));
    let (state, outcome, warnings) = bootstrap(store.as_ref(), &config, today()).await?;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        ?outcome,
        workouts = state.model.workouts.len(),
        "fittrack: state ready"
    );

    let handler = FitTrackHandler::new(store, state, config.data_dir.clone());

    let (tx, mut rx) = mpsc::channel::<String>(64);
    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(line) = rx.recv().await {
            if let Err(e) = async {
                stdout.write_all(line.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await
            }
            .await
            {
                tracing::error!(error = %e, "stdout closed");
                break;
            }
        }
    });

    let ticker = {
        let handler = handler.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let Some(notice) = handler.tick_timer(1).await else {
                    continue;
                };
                if let Some(line) = encode(&notice) {
                    if tx.send(line).await.is_err() {
                        break;
                    }
                }
            }
        })
    };

    let initial = handler.dispatch(Command::Snapshot, today()).await.warnings(warnings);
    if let Some(line) = encode(&initial) {
        tx.send(line).await?;
    }

    tracing::info!("fittrack: reading commands from stdin");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let response = match serde_json::from_str::<Command>(line) {
            Ok(command) => handler.dispatch(command, today()).await,
            Err(e) => {
                tracing::debug!(error = %e, "unparseable command");
                Response::rejected(format!("invalid command: {e}"))
            }
        };
        if let Some(out) = encode(&response) {
            tx.send(out).await?;
        }
    }

    tracing::info!("fittrack: stdin closed, shutting down");
    ticker.abort();
    let _ = ticker.await;
    drop(tx);
    let _ = writer.await;
    Ok(())
}
