// SPDX-License-Identifier: MIT

//! Consecutive-day workout streak.

use chrono::NaiveDate;

use crate::models::DateSet;

/// Current streak ending today or yesterday.
///
/// The run is anchored at `today` when it has a workout, otherwise at
/// `today - 1` (the streak is still alive until today ends). From the anchor
/// the walk goes backward one day at a time and stops at the first gap.
pub fn compute_streak(dates: &DateSet, today: NaiveDate) -> u32 {
    let anchor = if dates.contains(today) {
        Some(today)
    } else {
        today.pred_opt().filter(|yesterday| dates.contains(*yesterday))
    };

    let Some(mut day) = anchor else {
        return 0;
    };

    let mut streak = 0;
    while dates.contains(day) {
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}
