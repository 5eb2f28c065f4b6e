//! Date helpers in the business timezone
//!
//! Scheduling works on calendar dates (`NaiveDate`); "today" is always
//! resolved in the configured timezone, never in UTC.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Parse a time of day (HH:MM)
pub fn parse_hm(value: &str, field: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| AppError::validation(format!("{field} must be HH:MM, got '{value}'")))
}

/// Current date in the business timezone
pub fn today(tz: Tz) -> NaiveDate {
    chrono::Utc::now().with_timezone(&tz).date_naive()
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Monday of the week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// The 7 consecutive dates starting at `start`
pub fn week_days(start: NaiveDate) -> Vec<NaiveDate> {
    (0..7).map(|offset| start + Duration::days(offset)).collect()
}

/// Sort and deduplicate a list of dates
pub fn normalize_dates(mut dates: Vec<NaiveDate>) -> Vec<NaiveDate> {
    dates.sort_unstable();
    dates.dedup();
    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("2026-13-01").is_err());
        assert!(parse_date("18/10/2026").is_err());
        assert_eq!(d("2026-10-19").weekday(), Weekday::Mon);
    }

    #[test]
    fn test_parse_hm() {
        assert_eq!(parse_hm("09:30", "start_time").unwrap(), NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert!(parse_hm("9h30", "start_time").is_err());
    }

    #[test]
    fn test_weekend() {
        assert!(is_weekend(d("2026-10-17")));
        assert!(is_weekend(d("2026-10-18")));
        assert!(!is_weekend(d("2026-10-19")));
    }

    #[test]
    fn test_week_start_and_days() {
        assert_eq!(week_start(d("2026-10-18")), d("2026-10-12"));
        assert_eq!(week_start(d("2026-10-19")), d("2026-10-19"));
        let days = week_days(d("2026-10-19"));
        assert_eq!(days.len(), 7);
        assert_eq!(days[6], d("2026-10-25"));
    }

    #[test]
    fn test_normalize_dates() {
        let dates = vec![d("2026-11-03"), d("2026-11-01"), d("2026-11-03")];
        assert_eq!(normalize_dates(dates), vec![d("2026-11-01"), d("2026-11-03")]);
    }
}
