//! Full data export as a single JSON document.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::FitTrackError;
use crate::model::{BodyMetric, CompletedWorkout, FitnessState, PersonalRecords, Workout};
use crate::stats::{DashboardStats, dashboard_stats};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle<'a> {
    pub workouts: &'a [Workout],
    pub completed_workouts: &'a [CompletedWorkout],
    pub body_metrics: &'a [BodyMetric],
    pub personal_records: &'a PersonalRecords,
    pub stats: DashboardStats,
    pub export_date: DateTime<Utc>,
}

impl<'a> ExportBundle<'a> {
    /// Stats are computed for the caller's `today`; `now` only stamps the document.
    pub fn new(state: &'a FitnessState, today: NaiveDate, now: DateTime<Utc>) -> Self {
        Self {
            workouts: &state.workouts,
            completed_workouts: &state.completed_workouts,
            body_metrics: &state.body_metrics,
            personal_records: &state.personal_records,
            stats: dashboard_stats(state, today),
            export_date: now,
        }
    }

    pub fn to_pretty_json(&self) -> Result<String, FitTrackError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// `fittrack-data-2026-10-17.json`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("fittrack-data-{}.json", date.format("%Y-%m-%d"))
}
