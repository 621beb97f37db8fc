//! Domain records: planned workouts, completed sessions, body metrics and
//! personal records, plus the [`FitnessState`] container that owns them.

use chrono::NaiveDate;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::utils::deserialize_date;

/// Generate a new record id. UUIDv7 ids sort by creation time.
pub fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    #[default]
    Strength,
    Endurance,
    Flexibility,
    Hiit,
    Cardio,
    #[serde(other)]
    Other,
}

impl WorkoutType {
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutType::Strength => "Strength",
            WorkoutType::Endurance => "Endurance",
            WorkoutType::Flexibility => "Flexibility",
            WorkoutType::Hiit => "HIIT",
            WorkoutType::Cardio => "Cardio",
            WorkoutType::Other => "Other",
        }
    }
}

/// One exercise line of a workout: `sets` x `reps` at `weight`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseEntry {
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    /// Load in kilograms; 0 means bodyweight.
    #[serde(default)]
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muscle_group: Option<String>,
}

impl ExerciseEntry {
    pub fn new(name: impl Into<String>, sets: u32, reps: u32, weight: f64) -> Self {
        Self {
            name: name.into(),
            sets,
            reps,
            weight,
            muscle_group: None,
        }
    }

    pub fn volume(&self) -> f64 {
        f64::from(self.sets) * f64::from(self.reps) * self.weight
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    #[serde(rename = "type", default)]
    pub workout_type: WorkoutType,
    #[serde(default)]
    pub exercises: Vec<ExerciseEntry>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub completed: bool,
}

impl Workout {
    /// A newly planned, not yet completed workout with a fresh id.
    pub fn planned(
        name: impl Into<String>,
        date: NaiveDate,
        workout_type: WorkoutType,
        exercises: Vec<ExerciseEntry>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            date,
            workout_type,
            exercises,
            notes: notes.into(),
            completed: false,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompletedWorkout {
    pub id: String,
    pub workout_id: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    /// Minutes.
    pub duration: u32,
    /// 1 to 10.
    pub rating: u8,
    #[serde(default)]
    pub exercises: Vec<ExerciseEntry>,
}

impl CompletedWorkout {
    /// Snapshot `workout` as completed on `date`.
    pub fn from_workout(workout: &Workout, date: NaiveDate, duration: u32, rating: u8) -> Self {
        Self {
            id: new_id(),
            workout_id: workout.id.clone(),
            date,
            duration,
            rating,
            exercises: workout.exercises.clone(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BodyMetric {
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chest: Option<f64>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct PersonalRecord {
    pub exercise: String,
    pub weight: f64,
}

/// Best weight per exercise name, kept in first-seen order.
///
/// Serialized as a JSON object (`{"Bench Press": 80.0, ...}`) whose key order is
/// the insertion order.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PersonalRecords {
    entries: IndexMap<String, f64>,
}

impl PersonalRecords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, exercise: &str) -> Option<f64> {
        self.entries.get(exercise).copied()
    }

    /// Record `weight` for `exercise` if it beats the stored value (a missing
    /// record counts as 0). Returns true when the record changed.
    pub fn offer(&mut self, exercise: &str, weight: f64) -> bool {
        match self.entries.get_mut(exercise) {
            Some(existing) => {
                if weight > *existing {
                    *existing = weight;
                    true
                } else {
                    false
                }
            }
            None => {
                let best = weight.max(0.0);
                self.entries.insert(exercise.to_string(), best);
                best > 0.0
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, weight)| (name.as_str(), *weight))
    }
}

impl FromIterator<(String, f64)> for PersonalRecords {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// The whole persisted model.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FitnessState {
    pub workouts: Vec<Workout>,
    pub completed_workouts: Vec<CompletedWorkout>,
    pub body_metrics: Vec<BodyMetric>,
    pub personal_records: PersonalRecords,
}

impl FitnessState {
    pub fn find_workout(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id == id)
    }

    pub fn workouts_on(&self, date: NaiveDate) -> impl Iterator<Item = &Workout> {
        self.workouts.iter().filter(move |w| w.date == date)
    }

    pub fn latest_metric(&self) -> Option<&BodyMetric> {
        self.body_metrics.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn workout_type_unknown_maps_to_other() {
        let t: WorkoutType = serde_json::from_value(json!("yoga")).expect("deserialize type");
        assert_eq!(t, WorkoutType::Other);
    }

    #[test]
    fn workout_accepts_iso_timestamp_date() {
        let payload = json!({
            "id": "1700000000000",
            "name": "Push Day",
            "date": "2025-03-14T18:22:05.120Z",
            "type": "strength",
            "exercises": [{"name": "Bench Press", "sets": 3, "reps": 10, "weight": 60}]
        });
        let w: Workout = serde_json::from_value(payload).expect("deserialize workout");
        assert_eq!(w.date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
        assert!(!w.completed);
        assert_eq!(w.notes, "");
    }

    #[test]
    fn exercise_volume_multiplies_fields() {
        let e = ExerciseEntry::new("Squat", 5, 5, 100.0);
        assert_eq!(e.volume(), 2500.0);
    }

    #[test]
    fn personal_records_keep_insertion_order_in_json() {
        let records: PersonalRecords = vec![
            ("Squat".to_string(), 140.0),
            ("Bench Press".to_string(), 90.0),
            ("Deadlift".to_string(), 180.0),
        ]
        .into_iter()
        .collect();
        let text = serde_json::to_string(&records).unwrap();
        assert_eq!(text, r#"{"Squat":140.0,"Bench Press":90.0,"Deadlift":180.0}"#);

        let back: PersonalRecords = serde_json::from_str(&text).unwrap();
        let names: Vec<&str> = back.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["Squat", "Bench Press", "Deadlift"]);
    }

    #[test]
    fn offer_only_overwrites_when_strictly_greater() {
        let mut records = PersonalRecords::new();
        assert!(records.offer("Row", 60.0));
        assert!(!records.offer("Row", 60.0));
        assert!(!records.offer("Row", 55.0));
        assert!(records.offer("Row", 62.5));
        assert_eq!(records.get("Row"), Some(62.5));
    }

    #[test]
    fn completed_workout_snapshots_exercises() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let w = Workout::planned(
            "Legs",
            date,
            WorkoutType::Strength,
            vec![ExerciseEntry::new("Squat", 3, 8, 100.0)],
            "",
        );
        let c = CompletedWorkout::from_workout(&w, date, 45, 8);
        assert_eq!(c.workout_id, w.id);
        assert_eq!(c.exercises, w.exercises);
        assert_ne!(c.id, w.id);
    }
}
