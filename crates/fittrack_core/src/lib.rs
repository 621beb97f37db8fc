//! Domain model, statistics engine, calendar and chart projections for a
//! single-user workout tracker, plus the `StateStore` persistence seam.

use thiserror::Error;

pub mod calendar;
pub mod chart;
pub mod config;
pub mod export;
pub mod model;
pub mod seed;
pub mod stats;
pub mod store;
pub mod timer;
pub mod utils;

pub use model::{
    BodyMetric, CompletedWorkout, ExerciseEntry, FitnessState, PersonalRecord, PersonalRecords,
    Workout, WorkoutType,
};
pub use store::{JsonFileStore, MemoryStore, StateStore, StorageKey};

#[derive(Debug, Error)]
pub enum FitTrackError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("invalid timer length: {0}")]
    InvalidTimer(String),
}
