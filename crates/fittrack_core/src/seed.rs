//! Sample data installed on first run.
//!
//! Dates are laid out relative to `today` so a fresh install shows a live
//! streak, a populated calendar and a short progress chart.

use chrono::{Days, NaiveDate};

use crate::model::{
    BodyMetric, CompletedWorkout, ExerciseEntry, FitnessState, Workout, WorkoutType,
};
use crate::stats::update_personal_records;

fn days_ago(today: NaiveDate, n: u64) -> NaiveDate {
    today.checked_sub_days(Days::new(n)).unwrap_or(today)
}

fn days_ahead(today: NaiveDate, n: u64) -> NaiveDate {
    today.checked_add_days(Days::new(n)).unwrap_or(today)
}

fn upper_body(bench: f64) -> Vec<ExerciseEntry> {
    vec![
        ExerciseEntry::new("Bench Press", 4, 8, bench),
        ExerciseEntry::new("Overhead Press", 3, 10, 40.0),
        ExerciseEntry::new("Barbell Row", 4, 10, 60.0),
    ]
}

fn lower_body(squat: f64) -> Vec<ExerciseEntry> {
    vec![
        ExerciseEntry::new("Squat", 5, 5, squat),
        ExerciseEntry::new("Romanian Deadlift", 3, 8, 90.0),
        ExerciseEntry::new("Walking Lunge", 3, 12, 20.0),
    ]
}

pub fn sample_state(today: NaiveDate) -> FitnessState {
    let mut state = FitnessState::default();

    let history = [
        (6, "Upper Body A", upper_body(75.0), 50, 7),
        (2, "Lower Body A", lower_body(110.0), 55, 8),
        (1, "Upper Body B", upper_body(80.0), 48, 8),
    ];
    for (ago, name, exercises, duration, rating) in history {
        let date = days_ago(today, ago);
        let mut w = Workout::planned(name, date, WorkoutType::Strength, exercises, "");
        w.completed = true;
        let done = CompletedWorkout::from_workout(&w, date, duration, rating);
        update_personal_records(&mut state.personal_records, &done.exercises);
        state.completed_workouts.push(done);
        state.workouts.push(w);
    }

    state.workouts.push(Workout::planned(
        "Easy Run",
        days_ahead(today, 1),
        WorkoutType::Endurance,
        vec![],
        "30 minutes zone 2",
    ));
    state.workouts.push(Workout::planned(
        "Lower Body B",
        days_ahead(today, 2),
        WorkoutType::Strength,
        lower_body(115.0),
        "",
    ));

    for (ago, weight, body_fat) in [(28, 82.4, Some(19.5)), (14, 81.7, None), (0, 81.1, Some(18.7))] {
        state.body_metrics.push(BodyMetric {
            date: days_ago(today, ago),
            weight,
            body_fat,
            arm: None,
            chest: None,
        });
    }

    state
}
