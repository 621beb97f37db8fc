//! View-models handed to the rendering layer.

use chrono::NaiveDate;
use serde::Serialize;

use fittrack_core::calendar::{DayCell, build_month_grid, format_long_date};
use fittrack_core::chart::{
    ChartSeries, WeeklyActivity, body_weight_series, project_exercise_series, weekly_activity,
};
use fittrack_core::stats::{DashboardStats, SessionTotals, dashboard_stats, session_totals, total_volume};
use fittrack_core::timer::{PRESETS, RestTimer};
use fittrack_core::{ExerciseEntry, Workout};

use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct WorkoutSummary {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub workout_type: &'static str,
    pub exercise_count: usize,
    pub total_sets: u64,
    pub volume: f64,
    pub completed: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

impl From<&Workout> for WorkoutSummary {
    fn from(w: &Workout) -> Self {
        Self {
            id: w.id.clone(),
            name: w.name.clone(),
            date: w.date,
            workout_type: w.workout_type.label(),
            exercise_count: w.exercises.len(),
            total_sets: w.exercises.iter().map(|e| u64::from(e.sets)).sum(),
            volume: total_volume(&w.exercises),
            completed: w.completed,
            notes: w.notes.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarView {
    pub title: String,
    pub year: i32,
    pub month_index: u32,
    pub cells: Vec<DayCell>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BodyWeightView {
    pub labels: Vec<String>,
    pub weights: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartView {
    pub filter: String,
    pub exercise: ChartSeries,
    pub weekly: WeeklyActivity,
    pub body_weight: BodyWeightView,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimerView {
    pub display: String,
    pub remaining: u32,
    pub length: u32,
    pub running: bool,
    pub presets: [u32; 4],
}

impl From<&RestTimer> for TimerView {
    fn from(t: &RestTimer) -> Self {
        Self {
            display: t.display(),
            remaining: t.remaining(),
            length: t.length(),
            running: t.is_running(),
            presets: PRESETS,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub today: String,
    pub stats: DashboardStats,
    /// Tally of the exercises planned for today.
    pub today_plan: SessionTotals,
    /// Newest first.
    pub workouts: Vec<WorkoutSummary>,
    pub calendar: CalendarView,
    pub chart: ChartView,
    pub timer: TimerView,
}

impl DashboardView {
    pub fn build(state: &AppState, today: NaiveDate) -> Self {
        let model = &state.model;

        let mut workouts: Vec<WorkoutSummary> = model.workouts.iter().map(WorkoutSummary::from).collect();
        workouts.sort_by(|a, b| b.date.cmp(&a.date));

        let planned_today: Vec<ExerciseEntry> = model
            .workouts_on(today)
            .filter(|w| !w.completed)
            .flat_map(|w| w.exercises.iter().cloned())
            .collect();

        let cursor = state.cursor;
        let calendar = CalendarView {
            title: cursor.title(),
            year: cursor.year,
            month_index: cursor.month_index,
            cells: build_month_grid(cursor.year, cursor.month_index, &model.workouts, today).collect(),
        };

        let points = project_exercise_series(&model.completed_workouts, &state.exercise_filter);
        let (labels, weights) = body_weight_series(&model.body_metrics);
        let chart = ChartView {
            filter: state.exercise_filter.clone(),
            exercise: ChartSeries::from_points(&points),
            weekly: weekly_activity(&model.completed_workouts, today),
            body_weight: BodyWeightView { labels, weights },
        };

        Self {
            today: format_long_date(today),
            stats: dashboard_stats(model, today),
            today_plan: session_totals(&planned_today),
            workouts,
            calendar,
            chart,
            timer: TimerView::from(&state.timer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fittrack_core::seed::sample_state;

    #[test]
    fn dashboard_from_sample_data() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let state = AppState::new(sample_state(today), today, 90);
        let view = DashboardView::build(&state, today);

        assert_eq!(view.today, "Saturday, October 17, 2026");
        assert_eq!(view.stats.streak, 2);
        assert_eq!(view.calendar.title, "October 2026");
        // 1 October 2026 is a Thursday: four blanks then 31 days.
        assert_eq!(view.calendar.cells.len(), 4 + 31);
        assert_eq!(view.workouts.len(), 5);
        assert!(view.workouts[0].date >= view.workouts[4].date);
        assert_eq!(view.timer.display, "01:30");
        // the empty filter matches every exercise
        assert_eq!(view.chart.exercise.labels.len(), 9);
    }
}
