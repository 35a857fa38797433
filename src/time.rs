//! Local wall-clock time as delivered by the host on every tick.
//!
//! The host resolves timezones; everything here works on already-localized
//! fields. Day arithmetic uses the proleptic Gregorian calendar.

use core::fmt;

use serde::{Deserialize, Serialize};

const HOURS_PER_DAY: u8 = 24;

/// Days between 0000-03-01 and 1970-01-01.
const EPOCH_SHIFT_DAYS: i64 = 719_468;

/// A calendar date without a time of day.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDay {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl CalendarDay {
    pub const fn new(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Days since 1970-01-01 (negative before the epoch).
    pub fn to_epoch_days(self) -> i64 {
        let month = self.month as i64;
        let year = self.year as i64 - if month <= 2 { 1 } else { 0 };
        let era = (if year >= 0 { year } else { year - 399 }) / 400;
        let year_of_era = year - era * 400;
        let shifted_month = if month > 2 { month - 3 } else { month + 9 };
        let day_of_year = (153 * shifted_month + 2) / 5 + self.day as i64 - 1;
        let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
        era * 146_097 + day_of_era - EPOCH_SHIFT_DAYS
    }

    /// Inverse of [`CalendarDay::to_epoch_days`].
    pub fn from_epoch_days(days: i64) -> Self {
        let z = days + EPOCH_SHIFT_DAYS;
        let era = (if z >= 0 { z } else { z - 146_096 }) / 146_097;
        let day_of_era = z - era * 146_097;
        let year_of_era =
            (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
        let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
        let shifted_month = (5 * day_of_year + 2) / 153;
        let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
        let month = if shifted_month < 10 {
            shifted_month + 3
        } else {
            shifted_month - 9
        };
        let year = year_of_era + era * 400 + if month <= 2 { 1 } else { 0 };

        Self {
            year: year.clamp(0, u16::MAX as i64) as u16,
            month: month as u8,
            day: day as u8,
        }
    }

    /// The date `days` days before this one.
    pub fn days_back(self, days: u32) -> Self {
        Self::from_epoch_days(self.to_epoch_days() - days as i64)
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Local date and time of a host tick.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalDateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl LocalDateTime {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Calendar part of this timestamp.
    pub const fn date(&self) -> CalendarDay {
        CalendarDay::new(self.year, self.month, self.day)
    }

    /// True for 00:00, the minute that closes the previous day.
    pub const fn is_midnight(&self) -> bool {
        self.hour == 0 && self.minute == 0
    }

    /// True for the first minute of any hour.
    pub const fn is_top_of_hour(&self) -> bool {
        self.minute == 0
    }

    /// Hour of day clamped into `0..24`, safe to use as a ring index.
    pub const fn hour_index(&self) -> usize {
        (self.hour % HOURS_PER_DAY) as usize
    }

    /// Identifies the wall-clock minute, ignoring seconds.
    pub const fn minute_stamp(&self) -> MinuteStamp {
        MinuteStamp {
            day: self.date(),
            hour: self.hour,
            minute: self.minute,
        }
    }

    /// The same wall-clock time `days` days earlier.
    pub fn days_back(&self, days: u32) -> Self {
        let date = self.date().days_back(days);
        Self {
            year: date.year,
            month: date.month,
            day: date.day,
            ..*self
        }
    }

    /// Day of month `days` days before this one.
    pub fn day_of_month_days_back(&self, days: u32) -> u8 {
        self.date().days_back(days).day
    }
}

impl fmt::Display for LocalDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:02}:{:02}:{:02}",
            self.date(),
            self.hour,
            self.minute,
            self.second
        )
    }
}

/// A wall-clock minute, used to recognise repeated polls within one minute.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MinuteStamp {
    pub day: CalendarDay,
    pub hour: u8,
    pub minute: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_days_reference_points() {
        assert_eq!(CalendarDay::new(1970, 1, 1).to_epoch_days(), 0);
        assert_eq!(CalendarDay::new(2000, 3, 1).to_epoch_days(), 11_017);
        assert_eq!(CalendarDay::from_epoch_days(0), CalendarDay::new(1970, 1, 1));
        assert_eq!(
            CalendarDay::from_epoch_days(11_017),
            CalendarDay::new(2000, 3, 1)
        );
    }

    #[test]
    fn test_days_back_crosses_month_and_year() {
        assert_eq!(
            CalendarDay::new(2026, 3, 1).days_back(1),
            CalendarDay::new(2026, 2, 28)
        );
        assert_eq!(
            CalendarDay::new(2024, 3, 1).days_back(1),
            CalendarDay::new(2024, 2, 29)
        );
        assert_eq!(
            CalendarDay::new(2026, 1, 5).days_back(12),
            CalendarDay::new(2025, 12, 24)
        );
    }

    #[test]
    fn test_day_of_month_days_back_keeps_time() {
        let now = LocalDateTime::new(2026, 10, 3, 14, 30, 0);
        assert_eq!(now.day_of_month_days_back(0), 3);
        assert_eq!(now.day_of_month_days_back(3), 30);

        let earlier = now.days_back(3);
        assert_eq!(earlier.hour, 14);
        assert_eq!(earlier.minute, 30);
        assert_eq!(earlier.month, 9);
    }

    #[test]
    fn test_midnight_and_top_of_hour() {
        assert!(LocalDateTime::new(2026, 1, 1, 0, 0, 0).is_midnight());
        assert!(!LocalDateTime::new(2026, 1, 1, 0, 1, 0).is_midnight());
        assert!(LocalDateTime::new(2026, 1, 1, 7, 0, 30).is_top_of_hour());
        assert!(!LocalDateTime::new(2026, 1, 1, 12, 0, 0).is_midnight());
    }

    #[test]
    fn test_minute_stamp_ignores_seconds() {
        let a = LocalDateTime::new(2026, 5, 2, 9, 15, 0);
        let b = LocalDateTime::new(2026, 5, 2, 9, 15, 42);
        let c = LocalDateTime::new(2026, 5, 2, 9, 16, 0);
        assert_eq!(a.minute_stamp(), b.minute_stamp());
        assert_ne!(a.minute_stamp(), c.minute_stamp());
    }
}
