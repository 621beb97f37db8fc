//! Command handling for the workout tracker.
//!
//! [`FitTrackHandler`] owns the session state behind a single async mutex.
//! Every command runs to completion, persistence included, while holding it,
//! so a derived read never observes a half-applied mutation.

use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use fittrack_core::export::{ExportBundle, export_file_name};
use fittrack_core::stats::update_personal_records;
use fittrack_core::store::{clear_state, save_state};
use fittrack_core::timer::{RestTimer, TimerEvent};
use fittrack_core::{
    BodyMetric, CompletedWorkout, FitTrackError, FitnessState, StateStore, StorageKey, Workout,
};

pub mod commands;
pub mod error;
pub mod state;
pub mod views;

pub use commands::{AddMetricParams, AddWorkoutParams, Command, LogWorkoutParams};
pub use error::{AppError, AppResult};
pub use state::{AppState, BootstrapOutcome, bootstrap};
pub use views::{DashboardView, TimerView};

/// Log filter from `FITTRACK_LOG_LEVEL`, falling back to `RUST_LOG`, then `info`.
/// A directive that does not parse also falls back to `info`. Returns the
/// directive text in effect alongside the filter.
pub fn log_filter(get: impl Fn(&str) -> Option<String>) -> (String, EnvFilter) {
    let requested = ["FITTRACK_LOG_LEVEL", "RUST_LOG"]
        .into_iter()
        .find_map(|name| get(name).filter(|v| !v.trim().is_empty()));
    if let Some(directives) = requested {
        if let Ok(filter) = EnvFilter::try_new(&directives) {
            return (directives, filter);
        }
    }
    ("info".to_string(), EnvFilter::new("info"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Ok,
    /// A required field was missing; nothing changed.
    Rejected,
    /// The command referred to something that does not exist; nothing changed.
    Ignored,
    Error,
}

/// Reply to one command.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<Box<DashboardView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Response {
    fn with_status(status: Status, message: Option<String>) -> Self {
        Self {
            status,
            message,
            warnings: Vec::new(),
            view: None,
            data: None,
        }
    }

    pub fn ok(view: DashboardView) -> Self {
        let mut r = Self::with_status(Status::Ok, None);
        r.view = Some(Box::new(view));
        r
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::with_status(Status::Rejected, Some(message.into()))
    }

    pub fn ignored(message: impl Into<String>) -> Self {
        Self::with_status(Status::Ignored, Some(message.into()))
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::with_status(Status::Error, Some(message.into()))
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }
}

/// Out-of-band timer update pushed to the rendering layer.
#[derive(Debug, Clone, Serialize)]
pub struct TimerNotice {
    pub event: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub timer: TimerView,
}

#[derive(Clone)]
pub struct FitTrackHandler {
    store: Arc<dyn StateStore>,
    state: Arc<Mutex<AppState>>,
    export_dir: PathBuf,
}

impl FitTrackHandler {
    pub fn new(store: Arc<dyn StateStore>, state: AppState, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            state: Arc::new(Mutex::new(state)),
            export_dir: export_dir.into(),
        }
    }

    /// Run one command against the state as of `today`.
    pub async fn dispatch(&self, command: Command, today: NaiveDate) -> Response {
        let name = command.name();
        metrics::counter!("fittrack_commands_total", "command" => name).increment(1);

        let result = match command {
            Command::Snapshot => self.snapshot(today).await,
            Command::AddWorkout(p) => self.add_workout(p, today).await,
            Command::LogWorkout(p) => self.log_workout(p, today).await,
            Command::AddMetric(p) => self.add_metric(p, today).await,
            Command::NavigateMonth { delta } => self.navigate_month(delta, today).await,
            Command::SelectExerciseFilter { name } => self.select_exercise_filter(name, today).await,
            Command::SetTimer { seconds } => self.set_timer(seconds, today).await,
            Command::StartTimer => self.start_timer(today).await,
            Command::PauseTimer => self.pause_timer(today).await,
            Command::ResetTimer => self.reset_timer(today).await,
            Command::ExportData => self.export_data(today, chrono::Utc::now()).await,
            Command::ResetData => self.reset_data(today).await,
            Command::Schema => self.schema(),
        };

        match result {
            Ok(response) => response,
            Err(AppError::Validation(msg)) => {
                tracing::info!(command = name, %msg, "command rejected");
                Response::rejected(msg)
            }
            Err(AppError::NotFound(msg)) => {
                tracing::debug!(command = name, %msg, "command ignored");
                Response::ignored(msg)
            }
            Err(e) => {
                tracing::error!(command = name, error = %e, "command failed");
                Response::error(e.to_string())
            }
        }
    }

    async fn persist(&self, model: &FitnessState) -> Vec<String> {
        let failures = save_state(self.store.as_ref(), model).await;
        Self::failure_warnings(failures, "save")
    }

    fn failure_warnings(failures: Vec<(StorageKey, FitTrackError)>, action: &str) -> Vec<String> {
        failures
            .into_iter()
            .map(|(key, err)| {
                metrics::counter!("fittrack_persist_failures_total").increment(1);
                tracing::warn!(%key, error = %err, "failed to {action}; change kept in memory only");
                format!("could not {action} {key}: {err}")
            })
            .collect()
    }

    pub async fn snapshot(&self, today: NaiveDate) -> AppResult<Response> {
        let state = self.state.lock().await;
        Ok(Response::ok(DashboardView::build(&state, today)))
    }

    pub async fn add_workout(&self, params: AddWorkoutParams, today: NaiveDate) -> AppResult<Response> {
        let date = params.validate()?;
        let mut state = self.state.lock().await;
        let workout = Workout::planned(
            params.name.trim(),
            date,
            params.workout_type,
            params.exercises,
            params.notes,
        );
        tracing::info!(id = %workout.id, name = %workout.name, %date, "workout planned");
        let message = format!("{} added for {}", workout.name, date.format("%b %-d"));
        state.model.workouts.push(workout);

        let warnings = self.persist(&state.model).await;
        Ok(Response::ok(DashboardView::build(&state, today))
            .message(message)
            .warnings(warnings))
    }

    pub async fn log_workout(&self, params: LogWorkoutParams, today: NaiveDate) -> AppResult<Response> {
        let (duration, rating) = params.validate()?;
        let mut state = self.state.lock().await;
        let model = &mut state.model;

        let Some(workout) = model.workouts.iter_mut().find(|w| w.id == params.workout_id) else {
            return Err(AppError::NotFound(format!("workout {}", params.workout_id)));
        };
        if workout.completed {
            return Err(AppError::NotFound(format!(
                "workout {} is already logged",
                params.workout_id
            )));
        }

        let done = CompletedWorkout::from_workout(workout, today, duration, rating);
        workout.completed = true;
        let workout_name = workout.name.clone();
        let improved = update_personal_records(&mut model.personal_records, &done.exercises);
        model.completed_workouts.push(done);
        tracing::info!(workout = %workout_name, duration, rating, new_records = improved.len(), "workout logged");

        let mut message = format!("{workout_name} logged");
        if !improved.is_empty() {
            message.push_str(&format!(". New personal record: {}", improved.join(", ")));
        }

        let warnings = self.persist(&state.model).await;
        Ok(Response::ok(DashboardView::build(&state, today))
            .message(message)
            .warnings(warnings))
    }

    pub async fn add_metric(&self, params: AddMetricParams, today: NaiveDate) -> AppResult<Response> {
        let weight = params
            .weight
            .ok_or_else(|| AppError::Validation("weight is required".into()))?;
        let metric = BodyMetric {
            date: params.date.unwrap_or(today),
            weight,
            body_fat: params.body_fat,
            arm: params.arm,
            chest: params.chest,
        };
        let mut state = self.state.lock().await;
        tracing::info!(date = %metric.date, weight, "body metric recorded");
        state.model.body_metrics.push(metric);

        let warnings = self.persist(&state.model).await;
        Ok(Response::ok(DashboardView::build(&state, today)).warnings(warnings))
    }

    pub async fn navigate_month(&self, delta: i32, today: NaiveDate) -> AppResult<Response> {
        let mut state = self.state.lock().await;
        state.cursor = state.cursor.navigate(delta);
        tracing::debug!(year = state.cursor.year, month_index = state.cursor.month_index, "calendar moved");
        Ok(Response::ok(DashboardView::build(&state, today)))
    }

    pub async fn select_exercise_filter(&self, name: String, today: NaiveDate) -> AppResult<Response> {
        let mut state = self.state.lock().await;
        state.exercise_filter = name.trim().to_string();
        Ok(Response::ok(DashboardView::build(&state, today)))
    }

    pub async fn set_timer(&self, seconds: u32, today: NaiveDate) -> AppResult<Response> {
        let seconds =
            RestTimer::check_custom(seconds).map_err(|e| AppError::Validation(e.to_string()))?;
        let mut state = self.state.lock().await;
        state.timer.set(seconds);
        Ok(Response::ok(DashboardView::build(&state, today))
            .message(format!("Timer set to {seconds} seconds")))
    }

    pub async fn start_timer(&self, today: NaiveDate) -> AppResult<Response> {
        let mut state = self.state.lock().await;
        state.timer.start();
        Ok(Response::ok(DashboardView::build(&state, today)))
    }

    pub async fn pause_timer(&self, today: NaiveDate) -> AppResult<Response> {
        let mut state = self.state.lock().await;
        state.timer.pause();
        Ok(Response::ok(DashboardView::build(&state, today)))
    }

    pub async fn reset_timer(&self, today: NaiveDate) -> AppResult<Response> {
        let mut state = self.state.lock().await;
        state.timer.reset();
        Ok(Response::ok(DashboardView::build(&state, today)))
    }

    /// Advance the rest timer. `None` while it is not running.
    pub async fn tick_timer(&self, elapsed_secs: u32) -> Option<TimerNotice> {
        let mut state = self.state.lock().await;
        match state.timer.tick(elapsed_secs) {
            TimerEvent::Idle => None,
            TimerEvent::Running { .. } => Some(TimerNotice {
                event: "timer_tick",
                message: None,
                timer: TimerView::from(&state.timer),
            }),
            TimerEvent::Finished => {
                tracing::info!("rest period over");
                Some(TimerNotice {
                    event: "timer_finished",
                    message: Some("Rest time is over! Get back to work!".into()),
                    timer: TimerView::from(&state.timer),
                })
            }
        }
    }

    pub async fn export_data(
        &self,
        today: NaiveDate,
        now: chrono::DateTime<chrono::Utc>,
    ) -> AppResult<Response> {
        let state = self.state.lock().await;
        let body = ExportBundle::new(&state.model, today, now).to_pretty_json()?;
        tokio::fs::create_dir_all(&self.export_dir)
            .await
            .map_err(fittrack_core::FitTrackError::from)?;
        let path = self.export_dir.join(export_file_name(now.date_naive()));
        tokio::fs::write(&path, body)
            .await
            .map_err(fittrack_core::FitTrackError::from)?;
        tracing::info!(path = %path.display(), "data exported");
        let mut r = Response::with_status(Status::Ok, Some("Workout data exported successfully".into()));
        r.data = Some(serde_json::json!({ "path": path.display().to_string() }));
        Ok(r)
    }

    pub async fn reset_data(&self, today: NaiveDate) -> AppResult<Response> {
        let mut state = self.state.lock().await;
        let failures = clear_state(self.store.as_ref()).await;
        let warnings = Self::failure_warnings(failures, "clear");
        state.model = FitnessState::default();
        state.exercise_filter.clear();
        tracing::info!("all data reset");
        Ok(Response::ok(DashboardView::build(&state, today))
            .message("All data has been reset")
            .warnings(warnings))
    }

    pub fn schema(&self) -> AppResult<Response> {
        let schema = schemars::schema_for!(Command);
        let mut r = Response::with_status(Status::Ok, None);
        r.data = Some(serde_json::to_value(&schema)?);
        Ok(r)
    }

    /// Copy of the current model, for inspection.
    pub async fn model(&self) -> FitnessState {
        self.state.lock().await.model.clone()
    }
}
