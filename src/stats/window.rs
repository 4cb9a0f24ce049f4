//! Reporting windows

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::{StatsError, StatsResult};

/// Named period lengths a report can cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    Today,
    Week,
    Month,
    Custom,
}

impl PeriodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodKind::Today => "today",
            PeriodKind::Week => "week",
            PeriodKind::Month => "month",
            PeriodKind::Custom => "custom",
        }
    }

    /// Nominal length in days. Custom windows without bounds act as a week.
    pub fn days(&self) -> i64 {
        match self {
            PeriodKind::Today => 1,
            PeriodKind::Week | PeriodKind::Custom => 7,
            PeriodKind::Month => 30,
        }
    }
}

impl FromStr for PeriodKind {
    type Err = StatsError;

    fn from_str(s: &str) -> StatsResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "today" => Ok(PeriodKind::Today),
            "week" => Ok(PeriodKind::Week),
            "month" => Ok(PeriodKind::Month),
            "custom" => Ok(PeriodKind::Custom),
            other => Err(StatsError::MalformedWindow(format!(
                "unknown period '{}', expected today, week, month or custom",
                other
            ))),
        }
    }
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Half-open time interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub kind: PeriodKind,
}

impl PeriodWindow {
    /// Window with explicit bounds
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, kind: PeriodKind) -> StatsResult<Self> {
        if start > end {
            return Err(StatsError::MalformedWindow(format!(
                "start {} is after end {}",
                start.to_rfc3339(),
                end.to_rfc3339()
            )));
        }
        Ok(Self { start, end, kind })
    }

    /// The `kind.days()` calendar days ending with `now`'s UTC date
    pub fn ending_at(kind: PeriodKind, now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let first_day = today - Duration::days(kind.days() - 1);
        Self {
            start: midnight(first_day),
            end: midnight(today) + Duration::days(1),
            kind,
        }
    }

    /// Window of equal length ending where this one begins
    pub fn previous(&self) -> Self {
        Self {
            start: self.start - self.length(),
            end: self.start,
            kind: self.kind,
        }
    }

    pub fn length(&self) -> Duration {
        self.end - self.start
    }

    pub fn contains(&self, ts: &DateTime<Utc>) -> bool {
        *ts >= self.start && *ts < self.end
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Last calendar day touched by the window
    pub fn end_date(&self) -> NaiveDate {
        if self.end > self.start {
            (self.end - Duration::nanoseconds(1)).date_naive()
        } else {
            self.start.date_naive()
        }
    }
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("week".parse::<PeriodKind>(), Ok(PeriodKind::Week));
        assert_eq!(" Month ".parse::<PeriodKind>(), Ok(PeriodKind::Month));
        assert!(matches!(
            "fortnight".parse::<PeriodKind>(),
            Err(StatsError::MalformedWindow(_))
        ));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let result = PeriodWindow::new(at(2025, 3, 8, 0), at(2025, 3, 1, 0), PeriodKind::Custom);
        assert!(matches!(result, Err(StatsError::MalformedWindow(_))));
    }

    #[test]
    fn test_week_window_covers_seven_days() {
        let window = PeriodWindow::ending_at(PeriodKind::Week, at(2025, 3, 10, 15));
        assert_eq!(window.start, at(2025, 3, 4, 0));
        assert_eq!(window.end, at(2025, 3, 11, 0));
        assert_eq!(window.length(), Duration::days(7));
        assert_eq!(window.start_date(), NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());
        assert_eq!(window.end_date(), NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        assert!(window.contains(&at(2025, 3, 10, 23)));
        assert!(!window.contains(&at(2025, 3, 11, 0)));
    }

    #[test]
    fn test_today_and_custom_lengths() {
        let now = at(2025, 3, 10, 15);
        assert_eq!(PeriodWindow::ending_at(PeriodKind::Today, now).length(), Duration::days(1));
        assert_eq!(PeriodWindow::ending_at(PeriodKind::Custom, now).length(), Duration::days(7));
        assert_eq!(PeriodWindow::ending_at(PeriodKind::Month, now).length(), Duration::days(30));
    }

    #[test]
    fn test_previous_window_is_adjacent() {
        let window = PeriodWindow::ending_at(PeriodKind::Week, at(2025, 3, 10, 15));
        let previous = window.previous();
        assert_eq!(previous.end, window.start);
        assert_eq!(previous.length(), window.length());
        assert_eq!(previous.start, at(2025, 2, 25, 0));
    }
}
