// SPDX-License-Identifier: MIT

//! Dot-calendar aggregation.
//!
//! Months are laid out in rows of seven starting on Monday, with blank cells
//! before the 1st and after the last day so every row is complete.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::DateSet;

/// Number of months shown in the rolling progress calendar.
pub const ROLLING_MONTHS: usize = 3;

const DAYS_PER_WEEK: usize = 7;

/// A calendar month, with a zero-based month index (January = 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarMonth {
    first_day: NaiveDate,
}

impl CalendarMonth {
    /// Returns `None` for `month0 > 11` or an unrepresentable year.
    pub fn new(year: i32, month0: u32) -> Option<Self> {
        if month0 > 11 {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month0 + 1, 1).map(|first_day| Self { first_day })
    }

    /// The month that contains `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(self) -> i32 {
        self.first_day.year()
    }

    pub fn month0(self) -> u32 {
        self.first_day.month0()
    }

    pub fn first_day(self) -> NaiveDate {
        self.first_day
    }

    pub fn days_in_month(self) -> u32 {
        self.first_day
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .map(|last| last.day())
            .unwrap_or(31)
    }

    pub fn previous(self) -> Option<Self> {
        self.first_day
            .checked_sub_months(Months::new(1))
            .map(|first_day| Self { first_day })
    }

    /// Short month name, e.g. `"Mar"`.
    pub fn label(self) -> String {
        self.first_day.format("%b").to_string()
    }

    /// Blank cells before the 1st when weeks start on Monday.
    pub fn leading_blanks(self) -> usize {
        self.first_day.weekday().num_days_from_monday() as usize
    }

    fn days(self) -> impl Iterator<Item = NaiveDate> {
        self.first_day.iter_days().take(self.days_in_month() as usize)
    }
}

/// Derived per-day view; rebuilt on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub has_workout: bool,
    pub is_today: bool,
}

/// One cell of the dot-calendar grid.
///
/// `Today` keeps its workout flag so the presenter can mark both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum DotCell {
    Blank,
    Regular { date: NaiveDate },
    Workout { date: NaiveDate },
    Today { date: NaiveDate, has_workout: bool },
}

impl From<CalendarDay> for DotCell {
    fn from(day: CalendarDay) -> Self {
        match (day.is_today, day.has_workout) {
            (true, has_workout) => DotCell::Today {
                date: day.date,
                has_workout,
            },
            (false, true) => DotCell::Workout { date: day.date },
            (false, false) => DotCell::Regular { date: day.date },
        }
    }
}

impl DotCell {
    pub fn is_blank(&self) -> bool {
        matches!(self, DotCell::Blank)
    }
}

/// Per-day views for every day of `month`.
pub fn month_days(month: CalendarMonth, marked: &DateSet, today: NaiveDate) -> Vec<CalendarDay> {
    month
        .days()
        .map(|date| CalendarDay {
            date,
            has_workout: marked.contains(date),
            is_today: date == today,
        })
        .collect()
}

/// Render one month as dot cells, padded to whole weeks.
pub fn build_month(month: CalendarMonth, marked: &DateSet, today: NaiveDate) -> Vec<DotCell> {
    let lead = month.leading_blanks();
    let days = month_days(month, marked, today);
    let used = lead + days.len();
    let trail = (DAYS_PER_WEEK - used % DAYS_PER_WEEK) % DAYS_PER_WEEK;

    let mut cells = Vec::with_capacity(used + trail);
    cells.extend(std::iter::repeat_n(DotCell::Blank, lead));
    cells.extend(days.into_iter().map(DotCell::from));
    cells.extend(std::iter::repeat_n(DotCell::Blank, trail));
    cells
}

/// The current month and the months before it, oldest first.
pub fn rolling_months(today: NaiveDate) -> Vec<CalendarMonth> {
    let mut months = Vec::with_capacity(ROLLING_MONTHS);
    let mut month = Some(CalendarMonth::containing(today));
    while months.len() < ROLLING_MONTHS {
        let Some(current) = month else { break };
        months.push(current);
        month = current.previous();
    }
    months.reverse();
    months
}

/// Rendered month for the presenter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MonthCalendar {
    pub year: i32,
    /// Zero-based month (January = 0)
    pub month0: u32,
    pub label: String,
    pub cells: Vec<DotCell>,
}

/// Three consecutive months ending at the current month.
pub fn build_rolling_calendar(today: NaiveDate, marked: &DateSet) -> Vec<MonthCalendar> {
    rolling_months(today)
        .into_iter()
        .map(|month| MonthCalendar {
            year: month.year(),
            month0: month.month0(),
            label: month.label(),
            cells: build_month(month, marked, today),
        })
        .collect()
}
