// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod calendar;
pub mod goal;
pub mod measurements;
pub mod nutrition;
pub mod progress;
pub mod streak;
pub mod volume;
pub mod workouts;

pub use calendar::{build_month, build_rolling_calendar, CalendarMonth, DotCell, MonthCalendar};
pub use goal::{progress_ratio, GoalEditor};
pub use progress::{ProgressService, ProgressSources};
pub use streak::compute_streak;
pub use volume::{sum_volume, trailing_week, DateWindow};
