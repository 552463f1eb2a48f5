// SPDX-License-Identifier: MIT

//! Deduplicated set of local calendar dates.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use std::collections::BTreeSet;

use crate::time_utils::local_date;

/// Distinct workout days, keyed by pure calendar date.
///
/// Two events on the same local day always collapse into one entry because
/// only `NaiveDate` keys are ever inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateSet(BTreeSet<NaiveDate>);

impl DateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from UTC timestamps, normalizing each to its local date first.
    pub fn from_timestamps<I>(timestamps: I, offset: FixedOffset) -> Self
    where
        I: IntoIterator<Item = DateTime<Utc>>,
    {
        timestamps
            .into_iter()
            .map(|ts| local_date(ts, offset))
            .collect()
    }

    /// Returns `true` if the date was not already present.
    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.0.insert(date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Dates in ascending order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = NaiveDate> + '_ {
        self.0.iter().copied()
    }

    /// Number of dates in `[start, end)`.
    pub fn count_in_range(&self, start: NaiveDate, end: NaiveDate) -> usize {
        if start >= end {
            return 0;
        }
        self.0.range(start..end).count()
    }
}

impl FromIterator<NaiveDate> for DateSet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<NaiveDate> for DateSet {
    fn extend<I: IntoIterator<Item = NaiveDate>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_same_day_timestamps_collapse() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let set = DateSet::from_timestamps(
            [
                Utc.with_ymd_and_hms(2025, 3, 21, 6, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2025, 3, 21, 18, 45, 12).unwrap(),
                Utc.with_ymd_and_hms(2025, 3, 22, 0, 0, 1).unwrap(),
            ],
            utc,
        );
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_count_in_range_is_half_open() {
        let set: DateSet = (1..=10)
            .map(|d| NaiveDate::from_ymd_opt(2025, 1, d).unwrap())
            .collect();
        let start = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        assert_eq!(set.count_in_range(start, end), 3);
        assert_eq!(set.count_in_range(end, start), 0);
    }
}
