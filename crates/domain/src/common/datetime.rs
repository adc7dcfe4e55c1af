//! Citation timestamps.
//!
//! Citations are always stamped in US Eastern time, whatever zone the host
//! runs in. The zone is derived from the current US daylight saving rules
//! (second Sunday of March 02:00 EST to first Sunday of November 02:00 EDT).

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc, Weekday};

/// Eastern time zone variant in effect at an instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EasternZone {
    Standard,
    Daylight,
}

impl EasternZone {
    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::Standard => "EST",
            Self::Daylight => "EDT",
        }
    }

    /// Offset from UTC in hours
    pub fn utc_offset_hours(self) -> i64 {
        match self {
            Self::Standard => -5,
            Self::Daylight => -4,
        }
    }
}

/// Returns the Eastern zone variant in effect at `instant`.
pub fn eastern_zone(instant: DateTime<Utc>) -> EasternZone {
    let year = instant.year();
    // 02:00 EST is 07:00 UTC, 02:00 EDT is 06:00 UTC
    let starts = nth_sunday_at_utc(year, 3, 2, 7);
    let ends = nth_sunday_at_utc(year, 11, 1, 6);

    match (starts, ends) {
        (Some(starts), Some(ends)) if instant >= starts && instant < ends => EasternZone::Daylight,
        _ => EasternZone::Standard,
    }
}

fn nth_sunday_at_utc(year: i32, month: u32, n: u8, hour: u32) -> Option<DateTime<Utc>> {
    let date = NaiveDate::from_weekday_of_month_opt(year, month, Weekday::Sun, n)?;
    let naive = date.and_hms_opt(hour, 0, 0)?;
    Some(Utc.from_utc_datetime(&naive))
}

/// Formats `instant` as `Monday, October 19, 2026 at 3:04:05 PM EDT`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use citegen_domain::common::format_eastern_timestamp;
///
/// let instant = Utc.with_ymd_and_hms(2026, 10, 19, 19, 4, 5).unwrap();
/// assert_eq!(
///     format_eastern_timestamp(instant),
///     "Monday, October 19, 2026 at 3:04:05 PM EDT"
/// );
/// ```
pub fn format_eastern_timestamp(instant: DateTime<Utc>) -> String {
    let zone = eastern_zone(instant);
    let local = instant.naive_utc() + Duration::hours(zone.utc_offset_hours());
    format!(
        "{} {}",
        local.format("%A, %B %-d, %Y at %-I:%M:%S %p"),
        zone.abbreviation()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_winter_uses_standard_time() {
        assert_eq!(
            format_eastern_timestamp(utc(2026, 1, 15, 17, 0, 0)),
            "Thursday, January 15, 2026 at 12:00:00 PM EST"
        );
    }

    #[test]
    fn test_summer_uses_daylight_time() {
        assert_eq!(
            format_eastern_timestamp(utc(2026, 7, 4, 2, 30, 9)),
            "Friday, July 3, 2026 at 10:30:09 PM EDT"
        );
    }

    #[test]
    fn test_spring_forward_boundary() {
        assert_eq!(eastern_zone(utc(2026, 3, 8, 6, 59, 59)), EasternZone::Standard);
        assert_eq!(eastern_zone(utc(2026, 3, 8, 7, 0, 0)), EasternZone::Daylight);
        assert_eq!(
            format_eastern_timestamp(utc(2026, 3, 8, 7, 0, 0)),
            "Sunday, March 8, 2026 at 3:00:00 AM EDT"
        );
    }

    #[test]
    fn test_fall_back_boundary() {
        assert_eq!(eastern_zone(utc(2026, 11, 1, 5, 59, 59)), EasternZone::Daylight);
        assert_eq!(eastern_zone(utc(2026, 11, 1, 6, 0, 0)), EasternZone::Standard);
        assert_eq!(
            format_eastern_timestamp(utc(2026, 11, 1, 6, 0, 0)),
            "Sunday, November 1, 2026 at 1:00:00 AM EST"
        );
    }
}
