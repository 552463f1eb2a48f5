// SPDX-License-Identifier: MIT

//! Shared helpers for date/time formatting and calendar-date normalization.
//!
//! Timestamps cross into calendar dates exactly once, here. Everything past
//! this boundary works on `NaiveDate` values in the user's local calendar.

use chrono::{DateTime, Days, FixedOffset, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};

/// Largest accepted UTC offset in minutes (UTC-14:00 to UTC+14:00).
pub const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

const CALENDAR_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
///
/// The fixed width keeps stored timestamps lexicographically ordered, which
/// Firestore range filters on string fields rely on.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Build a fixed UTC offset from minutes east of UTC.
pub fn utc_offset(minutes: i32) -> Option<FixedOffset> {
    if minutes.unsigned_abs() > MAX_UTC_OFFSET_MINUTES.unsigned_abs() {
        return None;
    }
    FixedOffset::east_opt(minutes.checked_mul(60)?)
}

/// Local calendar date of a timestamp.
pub fn local_date(timestamp: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    timestamp.with_timezone(&offset).date_naive()
}

/// Today's date in the given offset.
pub fn local_today(now: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    local_date(now, offset)
}

/// UTC instants bounding one local calendar day: `[midnight, next midnight)`.
pub fn local_day_bounds_utc(
    date: NaiveDate,
    offset: FixedOffset,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = offset
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .single()?
        .with_timezone(&Utc);
    let next = date.checked_add_days(Days::new(1))?;
    let end = offset
        .from_local_datetime(&next.and_time(NaiveTime::MIN))
        .single()?
        .with_timezone(&Utc);
    Some((start, end))
}

/// Parse an ISO `YYYY-MM-DD` calendar date.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(raw, CALENDAR_DATE_FORMAT).ok()
}

/// Format a calendar date as ISO `YYYY-MM-DD`.
pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format(CALENDAR_DATE_FORMAT).to_string()
}

/// Parse an RFC3339 timestamp into UTC.
pub fn parse_utc_rfc3339(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_utc_rfc3339_uses_z_suffix() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 21, 8, 5, 9).unwrap();
        assert_eq!(format_utc_rfc3339(ts), "2025-03-21T08:05:09Z");
    }

    #[test]
    fn test_local_date_crosses_midnight_with_offset() {
        // 22:30 UTC is already the next day in UTC+2.
        let ts = Utc.with_ymd_and_hms(2025, 3, 20, 22, 30, 0).unwrap();
        let helsinki = utc_offset(120).unwrap();
        assert_eq!(local_date(ts, helsinki), date(2025, 3, 21));
        assert_eq!(local_date(ts, utc_offset(0).unwrap()), date(2025, 3, 20));
    }

    #[test]
    fn test_utc_offset_rejects_out_of_range() {
        assert!(utc_offset(MAX_UTC_OFFSET_MINUTES).is_some());
        assert!(utc_offset(-MAX_UTC_OFFSET_MINUTES).is_some());
        assert!(utc_offset(MAX_UTC_OFFSET_MINUTES + 1).is_none());
        assert!(utc_offset(i32::MIN).is_none());
        assert!(utc_offset(i32::MAX).is_none());
    }

    #[test]
    fn test_local_day_bounds_utc() {
        let offset = utc_offset(-300).unwrap(); // UTC-5
        let (start, end) = local_day_bounds_utc(date(2025, 1, 10), offset).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 1, 10, 5, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 1, 11, 5, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_calendar_date() {
        assert_eq!(parse_calendar_date("2025-03-21"), Some(date(2025, 3, 21)));
        assert_eq!(parse_calendar_date(" 2025-03-21 "), Some(date(2025, 3, 21)));
        assert_eq!(parse_calendar_date("2025-3-21"), None);
        assert_eq!(parse_calendar_date("2025-02-30"), None);
        assert_eq!(parse_calendar_date("Fri Mar 21 2025"), None);
        assert_eq!(parse_calendar_date(""), None);
    }

    #[test]
    fn test_format_calendar_date_pads() {
        assert_eq!(format_calendar_date(date(2025, 1, 5)), "2025-01-05");
    }
}
