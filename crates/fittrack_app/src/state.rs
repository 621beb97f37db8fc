use chrono::NaiveDate;
use serde::Serialize;

use fittrack_core::calendar::MonthCursor;
use fittrack_core::config::Config;
use fittrack_core::seed::sample_state;
use fittrack_core::store::{load_state, save_state};
use fittrack_core::timer::RestTimer;
use fittrack_core::{FitnessState, StateStore};

use crate::error::AppResult;

/// Everything a session holds: the persisted model plus view state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub model: FitnessState,
    pub cursor: MonthCursor,
    pub exercise_filter: String,
    pub timer: RestTimer,
}

impl AppState {
    pub fn new(model: FitnessState, today: NaiveDate, rest_secs: u32) -> Self {
        Self {
            model,
            cursor: MonthCursor::containing(today),
            exercise_filter: String::new(),
            timer: RestTimer::new(rest_secs),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BootstrapOutcome {
    Loaded,
    Seeded,
    Empty,
}

/// Load the stored model, installing the sample data when the store is empty
/// and seeding is enabled. Returns the persistence failures of the seed write
/// as warnings; the seeded model is used either way.
pub async fn bootstrap(
    store: &dyn StateStore,
    config: &Config,
    today: NaiveDate,
) -> AppResult<(AppState, BootstrapOutcome, Vec<String>)> {
    let mut warnings = Vec::new();
    let (model, outcome) = match load_state(store).await? {
        Some(model) => (model, BootstrapOutcome::Loaded),
        None if config.seed_sample_data => {
            let model = sample_state(today);
            for (key, err) in save_state(store, &model).await {
                tracing::warn!(%key, error = %err, "failed to persist sample data");
                warnings.push(format!("could not save {key}: {err}"));
            }
            (model, BootstrapOutcome::Seeded)
        }
        None => (FitnessState::default(), BootstrapOutcome::Empty),
    };
    Ok((AppState::new(model, today, config.rest_secs), outcome, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fittrack_core::MemoryStore;
    use std::path::PathBuf;

    fn config(seed: bool) -> Config {
        Config {
            data_dir: PathBuf::from("unused"),
            seed_sample_data: seed,
            rest_secs: 60,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    #[tokio::test]
    async fn empty_store_is_seeded_and_persisted() {
        let store = MemoryStore::new();
        let (state, outcome, warnings) = bootstrap(&store, &config(true), today()).await.unwrap();
        assert_eq!(outcome, BootstrapOutcome::Seeded);
        assert!(warnings.is_empty());
        assert!(!state.model.workouts.is_empty());
        assert_eq!(state.timer.length(), 60);

        let (again, outcome, _) = bootstrap(&store, &config(true), today()).await.unwrap();
        assert_eq!(outcome, BootstrapOutcome::Loaded);
        assert_eq!(again.model, state.model);
    }

    #[tokio::test]
    async fn seeding_can_be_disabled() {
        let store = MemoryStore::new();
        let (state, outcome, _) = bootstrap(&store, &config(false), today()).await.unwrap();
        assert_eq!(outcome, BootstrapOutcome::Empty);
        assert!(state.model.workouts.is_empty());
        assert_eq!(state.cursor, MonthCursor { year: 2026, month_index: 9 });
    }
}
