//! Midnight rollover of the day accumulator into the daily log.
//!
//! Detection and execution are split. [`RolloverScheduler::evaluate`] runs
//! every minute and raises the "background work wanted" advisory at 00:00.
//! The host later delivers a background-task event, which calls
//! [`RolloverScheduler::commit`]. The commit reads whatever the accumulator
//! holds at that moment, so minutes sampled between request and execution
//! still land in the closing day.
//!
//! A "last commit day" marker turns a second commit on the same calendar
//! day into a no-op.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{ActivityError, ActivityResult};
use crate::storage::DailyRing;
use crate::time::{CalendarDay, LocalDateTime};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RolloverScheduler {
    /// A commit was requested and not yet executed
    pending: bool,
    /// Calendar day on which the last commit ran
    last_commit: Option<CalendarDay>,
}

impl RolloverScheduler {
    pub const fn new() -> Self {
        Self {
            pending: false,
            last_commit: None,
        }
    }

    /// Check the clock; returns true when the host should schedule a commit.
    ///
    /// Only 00:00 raises the advisory. Polling again in the same minute keeps
    /// reporting it until the commit has run. A request that was never
    /// fulfilled is simply replaced by the next one.
    pub fn evaluate(&mut self, now: &LocalDateTime) -> bool {
        if !now.is_midnight() {
            return false;
        }
        if self.last_commit == Some(now.date()) {
            return false;
        }
        if self.pending {
            debug!(" Rollover already requested for {}", now.date());
        }
        self.pending = true;
        true
    }

    /// Move today's total into the daily log and clear the accumulator.
    ///
    /// Returns the new commit count, or [`ActivityError::AlreadyCommitted`]
    /// without touching anything if a commit already ran today.
    pub fn commit(
        &mut self,
        now: &LocalDateTime,
        active_minutes_today: &mut u16,
        daily: &mut DailyRing,
    ) -> ActivityResult<u32> {
        let today = now.date();
        if let Some(day) = self.last_commit
            && day == today
        {
            warn!(" Ignoring second daily commit on {}", day);
            return Err(ActivityError::AlreadyCommitted { day });
        }
        if !self.pending {
            debug!(" Committing without a pending rollover request");
        }

        let minutes = *active_minutes_today;
        let data_points = daily.push(minutes);
        *active_minutes_today = 0;
        self.pending = false;
        self.last_commit = Some(today);

        info!(
            " Day closed at {}: {} active minutes (day #{})",
            now, minutes, data_points
        );
        Ok(data_points)
    }

    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    pub const fn last_commit(&self) -> Option<CalendarDay> {
        self.last_commit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u8, hour: u8, minute: u8) -> LocalDateTime {
        LocalDateTime::new(2026, 4, day, hour, minute, 0)
    }

    #[test]
    fn test_only_midnight_requests_work() {
        let mut scheduler = RolloverScheduler::new();
        assert!(!scheduler.evaluate(&at(1, 23, 59)));
        assert!(!scheduler.evaluate(&at(2, 0, 1)));
        assert!(!scheduler.evaluate(&at(2, 12, 0)));
        assert!(!scheduler.is_pending());

        assert!(scheduler.evaluate(&at(2, 0, 0)));
        assert!(scheduler.is_pending());
    }

    #[test]
    fn test_commit_moves_total_and_resets() {
        let mut scheduler = RolloverScheduler::new();
        let mut daily = DailyRing::new();
        let mut today = 87;

        scheduler.evaluate(&at(2, 0, 0));
        assert_eq!(scheduler.commit(&at(2, 0, 0), &mut today, &mut daily), Ok(1));
        assert_eq!(today, 0);
        assert_eq!(daily.days_back(1), Ok(87));
        assert!(!scheduler.is_pending());
        assert_eq!(scheduler.last_commit(), Some(CalendarDay::new(2026, 4, 2)));
    }

    #[test]
    fn test_second_commit_same_day_is_noop() {
        let mut scheduler = RolloverScheduler::new();
        let mut daily = DailyRing::new();
        let mut today = 120;

        scheduler.commit(&at(3, 0, 0), &mut today, &mut daily).unwrap();
        today = 15;
        let before = daily;

        assert_eq!(
            scheduler.commit(&at(3, 0, 2), &mut today, &mut daily),
            Err(ActivityError::AlreadyCommitted {
                day: CalendarDay::new(2026, 4, 3)
            })
        );
        assert_eq!(daily, before);
        assert_eq!(daily.data_points(), 1);
        assert_eq!(today, 15);
    }

    #[test]
    fn test_repeated_polls_after_commit_do_not_rearm() {
        let mut scheduler = RolloverScheduler::new();
        let mut daily = DailyRing::new();
        let mut today = 5;

        assert!(scheduler.evaluate(&at(4, 0, 0)));
        scheduler.commit(&at(4, 0, 0), &mut today, &mut daily).unwrap();
        // The advisory may be polled again within the same minute
        assert!(!scheduler.evaluate(&at(4, 0, 0)));
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn test_next_day_commit_is_allowed() {
        let mut scheduler = RolloverScheduler::new();
        let mut daily = DailyRing::new();
        let mut today = 30;

        scheduler.commit(&at(5, 0, 0), &mut today, &mut daily).unwrap();
        today = 45;
        assert_eq!(scheduler.commit(&at(6, 0, 0), &mut today, &mut daily), Ok(2));
        assert_eq!(daily.days_back(1), Ok(45));
        assert_eq!(daily.days_back(2), Ok(30));
    }
}
