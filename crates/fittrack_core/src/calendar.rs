//! Month arithmetic and the calendar grid.
//!
//! Month indexes are zero-based (January = 0) and weekdays are Sunday-indexed
//! (Sunday = 0), the layout of a Sunday-first calendar.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::Workout;

fn first_of_month(year: i32, month_index: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month_index.checked_add(1)?, 1)
}

/// Number of days in the month, or `None` for an invalid month index.
pub fn days_in_month(year: i32, month_index: u32) -> Option<u32> {
    let first = first_of_month(year, month_index)?;
    let next = first.checked_add_months(Months::new(1))?;
    next.pred_opt().map(|last| last.day())
}

/// Weekday of the 1st, 0 (Sunday) to 6 (Saturday).
pub fn first_weekday_of_month(year: i32, month_index: u32) -> Option<u32> {
    first_of_month(year, month_index).map(|d| d.weekday().num_days_from_sunday())
}

/// The month currently shown by the calendar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCursor {
    pub year: i32,
    /// 0 to 11.
    pub month_index: u32,
}

impl MonthCursor {
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month_index: date.month0(),
        }
    }

    /// Move by `delta` months, wrapping the month index across years.
    pub fn navigate(self, delta: i32) -> Self {
        let absolute = i64::from(self.year) * 12 + i64::from(self.month_index) + i64::from(delta);
        Self {
            year: absolute.div_euclid(12) as i32,
            month_index: absolute.rem_euclid(12) as u32,
        }
    }

    pub fn title(&self) -> String {
        month_title(self.year, self.month_index).unwrap_or_default()
    }
}

/// "October 2026".
pub fn month_title(year: i32, month_index: u32) -> Option<String> {
    first_of_month(year, month_index).map(|d| d.format("%B %Y").to_string())
}

/// "Saturday, October 17, 2026".
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DayCell {
    /// Padding before the 1st.
    Blank,
    Day {
        day: u32,
        date: NaiveDate,
        is_today: bool,
        has_workout: bool,
        /// True when the day has workouts and every one of them is completed.
        completed: bool,
    },
}

impl DayCell {
    pub fn is_blank(&self) -> bool {
        matches!(self, DayCell::Blank)
    }
}

/// Lazily yields the cells of one month: leading blanks up to the weekday of
/// the 1st, then one annotated cell per day. An invalid month index yields an
/// empty grid.
pub fn build_month_grid<'a>(
    year: i32,
    month_index: u32,
    workouts: &'a [Workout],
    today: NaiveDate,
) -> impl Iterator<Item = DayCell> + 'a {
    let first = first_of_month(year, month_index);
    let leading = first_weekday_of_month(year, month_index).unwrap_or(0) as usize;
    let days = days_in_month(year, month_index).unwrap_or(0);

    let blanks = std::iter::repeat_n(DayCell::Blank, if first.is_some() { leading } else { 0 });
    let cells = first.into_iter().flat_map(move |first| {
        (0..days).filter_map(move |offset| {
            let date = first.checked_add_days(chrono::Days::new(u64::from(offset)))?;
            let mut has_workout = false;
            let mut all_completed = true;
            for w in workouts.iter().filter(|w| w.date == date) {
                has_workout = true;
                all_completed &= w.completed;
            }
            Some(DayCell::Day {
                day: offset + 1,
                date,
                is_today: date == today,
                has_workout,
                completed: has_workout && all_completed,
            })
        })
    });
    blanks.chain(cells)
}
