//! Derived statistics: streaks, volumes, personal records and dashboard totals.
//!
//! Everything here is a pure function of the model. Inputs are not validated;
//! negative weights or counts flow straight into the sums.

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{CompletedWorkout, ExerciseEntry, FitnessState, PersonalRecord, PersonalRecords};

/// Number of top records shown on the dashboard.
pub const DEFAULT_TOP_RECORDS: usize = 3;

/// Length of the run of consecutive completion days ending at the most recent
/// completion, or 0 when that completion is more than one day before `today`.
///
/// Only a date exactly one day earlier than the last counted date extends the
/// run. A second completion on an already counted date ends the walk, so
/// `[D, D, D-1]` yields 1.
pub fn compute_streak(completed: &[CompletedWorkout], today: NaiveDate) -> u32 {
    let mut dates: Vec<NaiveDate> = completed.iter().map(|c| c.date).collect();
    if dates.is_empty() {
        return 0;
    }
    dates.sort_unstable_by(|a, b| b.cmp(a));

    let most_recent = dates[0];
    let mut streak = 1u32;
    let mut current = most_recent;
    for &date in &dates[1..] {
        if current.pred_opt() == Some(date) {
            streak += 1;
            current = date;
        } else {
            break;
        }
    }

    if (today - most_recent).num_days() > 1 {
        return 0;
    }
    streak
}

/// Sum of `sets * reps * weight` over `exercises`.
pub fn total_volume(exercises: &[ExerciseEntry]) -> f64 {
    exercises.iter().map(ExerciseEntry::volume).sum()
}

/// Total volume across every completed workout.
pub fn total_weight_lifted(completed: &[CompletedWorkout]) -> f64 {
    completed.iter().map(|c| total_volume(&c.exercises)).sum()
}

/// Fold the weights of `exercises` into `records`. Returns the exercise names
/// whose record strictly improved, in exercise order.
pub fn update_personal_records(
    records: &mut PersonalRecords,
    exercises: &[ExerciseEntry],
) -> Vec<String> {
    let mut improved: Vec<String> = Vec::new();
    for e in exercises {
        if records.offer(&e.name, e.weight) && !improved.contains(&e.name) {
            improved.push(e.name.clone());
        }
    }
    improved
}

/// The `n` heaviest records, descending. Equal weights keep insertion order.
pub fn top_personal_records(records: &PersonalRecords, n: usize) -> Vec<PersonalRecord> {
    let mut all: Vec<PersonalRecord> = records
        .iter()
        .map(|(exercise, weight)| PersonalRecord {
            exercise: exercise.to_string(),
            weight,
        })
        .collect();
    all.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    all.truncate(n);
    all
}

/// Running tally for a list of exercises.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct SessionTotals {
    pub total_exercises: usize,
    pub total_sets: u64,
    pub total_volume: f64,
}

pub fn session_totals(exercises: &[ExerciseEntry]) -> SessionTotals {
    SessionTotals {
        total_exercises: exercises.len(),
        total_sets: exercises.iter().map(|e| u64::from(e.sets)).sum(),
        total_volume: total_volume(exercises),
    }
}

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct DashboardStats {
    pub total_workouts: usize,
    pub planned_workouts: usize,
    pub total_weight_lifted: f64,
    pub streak: u32,
    pub top_records: Vec<PersonalRecord>,
    pub latest_body_weight: Option<f64>,
    /// Last recorded weight minus the first one.
    pub body_weight_change: Option<f64>,
}

pub fn dashboard_stats(state: &FitnessState, today: NaiveDate) -> DashboardStats {
    let body_weight_change = match (state.body_metrics.first(), state.body_metrics.last()) {
        (Some(first), Some(last)) if state.body_metrics.len() > 1 => Some(last.weight - first.weight),
        _ => None,
    };
    DashboardStats {
        total_workouts: state.completed_workouts.len(),
        planned_workouts: state.workouts.iter().filter(|w| !w.completed).count(),
        total_weight_lifted: total_weight_lifted(&state.completed_workouts),
        streak: compute_streak(&state.completed_workouts, today),
        top_records: top_personal_records(&state.personal_records, DEFAULT_TOP_RECORDS),
        latest_body_weight: state.latest_metric().map(|m| m.weight),
        body_weight_change,
    }
}
