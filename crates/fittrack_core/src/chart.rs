//! Projections from the model into series for the charting component.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::model::{BodyMetric, CompletedWorkout};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub weight: f64,
    pub volume: f64,
}

/// One point per exercise occurrence whose name contains `name_filter`
/// (case-insensitive), ascending by date.
///
/// Points on the same date are all kept, in their original order, so a chart
/// may show repeated x labels for those days.
pub fn project_exercise_series(completed: &[CompletedWorkout], name_filter: &str) -> Vec<SeriesPoint> {
    let needle = name_filter.to_lowercase();
    let mut points: Vec<SeriesPoint> = completed
        .iter()
        .flat_map(|c| {
            c.exercises
                .iter()
                .filter(|e| e.name.to_lowercase().contains(&needle))
                .map(move |e| SeriesPoint {
                    date: c.date,
                    weight: e.weight,
                    volume: e.volume(),
                })
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}

/// Labelled series as a line chart consumes them.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub weights: Vec<f64>,
    pub volumes: Vec<f64>,
}

impl ChartSeries {
    pub fn from_points(points: &[SeriesPoint]) -> Self {
        Self {
            labels: points.iter().map(|p| p.date.format("%b %-d").to_string()).collect(),
            weights: points.iter().map(|p| p.weight).collect(),
            volumes: points.iter().map(|p| p.volume).collect(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct WeeklyActivity {
    /// Weekday abbreviations, oldest first.
    pub labels: Vec<String>,
    pub exercises: Vec<usize>,
    pub volumes: Vec<f64>,
}

/// Exercise count and volume per day for the seven days ending at `today`.
pub fn weekly_activity(completed: &[CompletedWorkout], today: NaiveDate) -> WeeklyActivity {
    let mut out = WeeklyActivity::default();
    for back in (0..7u64).rev() {
        let Some(date) = today.checked_sub_days(Days::new(back)) else {
            continue;
        };
        let (count, volume) = completed
            .iter()
            .filter(|c| c.date == date)
            .flat_map(|c| c.exercises.iter())
            .fold((0usize, 0.0f64), |(n, v), e| (n + 1, v + e.volume()));
        out.labels.push(date.format("%a").to_string());
        out.exercises.push(count);
        out.volumes.push(volume);
    }
    out
}

/// Body weight over time, in recorded order.
pub fn body_weight_series(metrics: &[BodyMetric]) -> (Vec<String>, Vec<f64>) {
    metrics
        .iter()
        .map(|m| (m.date.format("%b %-d").to_string(), m.weight))
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExerciseEntry;

    fn ymd(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    fn session(date: NaiveDate, exercises: Vec<ExerciseEntry>) -> CompletedWorkout {
        CompletedWorkout {
            id: format!("c-{date}"),
            workout_id: "w".into(),
            date,
            duration: 40,
            rating: 8,
            exercises,
        }
    }

    #[test]
    fn press_filter_matches_bench_press_in_date_order() {
        let completed = vec![
            session(ymd(3, 12), vec![ExerciseEntry::new("Bench Press", 3, 8, 82.5)]),
            session(ymd(3, 5), vec![ExerciseEntry::new("Bench Press", 3, 8, 80.0)]),
        ];
        let points = project_exercise_series(&completed, "press");
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, ymd(3, 5));
        assert_eq!(points[0].weight, 80.0);
        assert_eq!(points[0].volume, 1920.0);
        assert_eq!(points[1].date, ymd(3, 12));
    }

    #[test]
    fn filter_is_case_insensitive_and_keeps_same_day_points() {
        let completed = vec![session(
            ymd(3, 5),
            vec![
                ExerciseEntry::new("Overhead PRESS", 3, 5, 40.0),
                ExerciseEntry::new("Squat", 3, 5, 100.0),
                ExerciseEntry::new("Leg Press", 3, 12, 150.0),
            ],
        )];
        let points = project_exercise_series(&completed, "Press");
        let weights: Vec<f64> = points.iter().map(|p| p.weight).collect();
        assert_eq!(weights, vec![40.0, 150.0]);
    }

    #[test]
    fn chart_series_labels_each_point() {
        let points = vec![SeriesPoint {
            date: ymd(3, 5),
            weight: 80.0,
            volume: 1920.0,
        }];
        let s = ChartSeries::from_points(&points);
        assert_eq!(s.labels, vec!["Mar 5"]);
        assert_eq!(s.weights, vec![80.0]);
        assert_eq!(s.volumes, vec![1920.0]);
    }

    #[test]
    fn weekly_activity_covers_seven_days_ending_today() {
        let completed = vec![
            session(ymd(10, 17), vec![ExerciseEntry::new("Row", 3, 10, 50.0)]),
            session(ymd(10, 11), vec![ExerciseEntry::new("Row", 3, 10, 40.0)]),
            session(ymd(10, 10), vec![ExerciseEntry::new("Row", 3, 10, 40.0)]),
        ];
        let week = weekly_activity(&completed, ymd(10, 17));
        assert_eq!(week.labels.len(), 7);
        assert_eq!(week.labels[0], "Sun");
        assert_eq!(week.labels[6], "Sat");
        assert_eq!(week.exercises, vec![1, 0, 0, 0, 0, 0, 1]);
        assert_eq!(week.volumes[6], 1500.0);
    }
}
