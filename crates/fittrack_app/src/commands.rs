//! Commands sent by the rendering layer, one JSON object per user intent.
//!
//! Required fields are optional at the serde level so that a missing field is
//! reported as a validation rejection instead of a parse failure.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use fittrack_core::{ExerciseEntry, WorkoutType};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Return the current dashboard without changing anything.
    Snapshot,
    /// Plan a new workout.
    AddWorkout(AddWorkoutParams),
    /// Mark a planned workout as done.
    LogWorkout(LogWorkoutParams),
    /// Record body measurements.
    AddMetric(AddMetricParams),
    /// Move the calendar by a number of months (negative goes back).
    NavigateMonth { delta: i32 },
    /// Choose which exercise the progress chart follows.
    SelectExerciseFilter { name: String },
    /// Set the rest timer length in seconds (10 to 600).
    SetTimer { seconds: u32 },
    StartTimer,
    PauseTimer,
    ResetTimer,
    /// Write a full JSON export next to the data files.
    ExportData,
    /// Delete every stored record.
    ResetData,
    /// Return the JSON Schema of this command set.
    Schema,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Snapshot => "snapshot",
            Command::AddWorkout(_) => "add_workout",
            Command::LogWorkout(_) => "log_workout",
            Command::AddMetric(_) => "add_metric",
            Command::NavigateMonth { .. } => "navigate_month",
            Command::SelectExerciseFilter { .. } => "select_exercise_filter",
            Command::SetTimer { .. } => "set_timer",
            Command::StartTimer => "start_timer",
            Command::PauseTimer => "pause_timer",
            Command::ResetTimer => "reset_timer",
            Command::ExportData => "export_data",
            Command::ResetData => "reset_data",
            Command::Schema => "schema",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct AddWorkoutParams {
    #[serde(default)]
    pub name: String,
    pub date: Option<NaiveDate>,
    #[serde(default, rename = "type")]
    pub workout_type: WorkoutType,
    #[serde(default)]
    pub exercises: Vec<ExerciseEntry>,
    #[serde(default)]
    pub notes: String,
}

impl AddWorkoutParams {
    pub(crate) fn validate(&self) -> AppResult<NaiveDate> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("workout name is required".into()));
        }
        let date = self
            .date
            .ok_or_else(|| AppError::Validation("workout date is required".into()))?;
        if let Some(pos) = self.exercises.iter().position(|e| e.name.trim().is_empty()) {
            return Err(AppError::Validation(format!(
                "exercise #{} has no name",
                pos + 1
            )));
        }
        Ok(date)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct LogWorkoutParams {
    #[serde(default)]
    pub workout_id: String,
    /// Minutes.
    pub duration: Option<u32>,
    /// 1 to 10.
    pub rating: Option<u8>,
}

impl LogWorkoutParams {
    pub(crate) fn validate(&self) -> AppResult<(u32, u8)> {
        if self.workout_id.trim().is_empty() {
            return Err(AppError::Validation("workout_id is required".into()));
        }
        let duration = self
            .duration
            .ok_or_else(|| AppError::Validation("duration is required".into()))?;
        let rating = self
            .rating
            .ok_or_else(|| AppError::Validation("rating is required".into()))?;
        Ok((duration, rating))
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct AddMetricParams {
    /// Defaults to today.
    pub date: Option<NaiveDate>,
    pub weight: Option<f64>,
    pub body_fat: Option<f64>,
    pub arm: Option<f64>,
    pub chest: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_tagged_commands() {
        let c: Command = serde_json::from_value(json!({
            "command": "log_workout",
            "workout_id": "w1",
            "duration": 45,
            "rating": 8
        }))
        .expect("log_workout");
        assert_eq!(c.name(), "log_workout");

        let c: Command =
            serde_json::from_value(json!({"command": "navigate_month", "delta": -1})).unwrap();
        assert!(matches!(c, Command::NavigateMonth { delta: -1 }));

        let c: Command = serde_json::from_value(json!({"command": "start_timer"})).unwrap();
        assert!(matches!(c, Command::StartTimer));
    }

    #[test]
    fn unknown_command_fails_to_parse() {
        let res: Result<Command, _> = serde_json::from_value(json!({"command": "fly"}));
        assert!(res.is_err());
    }

    #[test]
    fn add_workout_requires_name_and_date() {
        let mut p = AddWorkoutParams {
            date: NaiveDate::from_ymd_opt(2026, 10, 20),
            ..Default::default()
        };
        assert!(matches!(p.validate(), Err(AppError::Validation(_))));
        p.name = "Pull Day".into();
        assert!(p.validate().is_ok());
        p.date = None;
        assert!(p.validate().is_err());
    }

    #[test]
    fn add_workout_rejects_unnamed_exercise() {
        let p = AddWorkoutParams {
            name: "Push".into(),
            date: NaiveDate::from_ymd_opt(2026, 10, 20),
            exercises: vec![
                ExerciseEntry::new("Dip", 3, 10, 0.0),
                ExerciseEntry::new(" ", 3, 10, 0.0),
            ],
            ..Default::default()
        };
        let err = p.validate().unwrap_err();
        assert_eq!(err.to_string(), "Validation error: exercise #2 has no name");
    }

    #[test]
    fn log_workout_requires_all_fields() {
        let p: LogWorkoutParams = serde_json::from_value(json!({"workout_id": "w", "rating": 7})).unwrap();
        assert!(p.validate().is_err());
    }
}
