use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::{DAILY_LOG_DAYS, WINDOW_LEN};
use crate::error::{ActivityError, ActivityResult};
use crate::stats::{Window, WindowKind};

/// Ring of committed daily totals.
///
/// Logical day `k` (counted from the first commit ever made) lives at slot
/// `k % DAILY_LOG_DAYS`. `data_points` counts every commit and never goes
/// down, so it gives both the next write position and how many days are
/// still readable. A slot is readable only while it lies inside the last
/// `min(data_points, DAILY_LOG_DAYS)` commits; anything older or never
/// written reads as [`ActivityError::NoData`], never as zero.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DailyRing {
    slots: [u16; DAILY_LOG_DAYS],
    data_points: u32,
}

impl DailyRing {
    pub const fn new() -> Self {
        Self {
            slots: [0; DAILY_LOG_DAYS],
            data_points: 0,
        }
    }

    /// Append a day total, overwriting the oldest slot once the ring is full.
    ///
    /// Returns the new commit count.
    pub fn push(&mut self, minutes: u16) -> u32 {
        let pos = self.write_position();
        self.slots[pos] = minutes;
        self.data_points = self.data_points.saturating_add(1);
        debug!(
            " Daily log slot {} <- {} min (data points: {})",
            pos, minutes, self.data_points
        );
        self.data_points
    }

    /// Number of commits ever made.
    pub const fn data_points(&self) -> u32 {
        self.data_points
    }

    /// Number of days that can still be read back.
    pub const fn len(&self) -> usize {
        if (self.data_points as usize) < DAILY_LOG_DAYS {
            self.data_points as usize
        } else {
            DAILY_LOG_DAYS
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.data_points == 0
    }

    /// Slot the next commit will write.
    pub const fn write_position(&self) -> usize {
        self.data_points as usize % DAILY_LOG_DAYS
    }

    /// Total recorded `days_back` days ago (1 = yesterday's commit).
    pub fn days_back(&self, days_back: u8) -> ActivityResult<u16> {
        self.slot_for(days_back)
            .map(|pos| self.slots[pos])
            .ok_or(ActivityError::NoData { days_back })
    }

    fn slot_for(&self, days_back: u8) -> Option<usize> {
        let back = days_back as usize;
        if back == 0 || back > self.len() {
            return None;
        }
        let logical = self.data_points - back as u32;
        Some(logical as usize % DAILY_LOG_DAYS)
    }

    /// The 12 most recent committed days, oldest first.
    ///
    /// Position `i` holds the day `WINDOW_LEN - i` days back. Days without a
    /// commit read as zero and are flagged as unrecorded.
    pub fn window(&self) -> Window {
        let mut values = [0u16; WINDOW_LEN];
        let mut recorded = [false; WINDOW_LEN];

        for (i, (value, seen)) in values.iter_mut().zip(recorded.iter_mut()).enumerate() {
            if let Ok(minutes) = self.days_back((WINDOW_LEN - i) as u8) {
                *value = minutes;
                *seen = true;
            }
        }

        Window::new(WindowKind::Days, values, recorded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ring_has_no_data() {
        let ring = DailyRing::new();
        assert!(ring.is_empty());
        assert_eq!(
            ring.days_back(1),
            Err(ActivityError::NoData { days_back: 1 })
        );
        assert_eq!(
            ring.days_back(0),
            Err(ActivityError::NoData { days_back: 0 })
        );
    }

    #[test]
    fn test_recorded_zero_is_not_no_data() {
        let mut ring = DailyRing::new();
        ring.push(0);
        assert_eq!(ring.days_back(1), Ok(0));
        assert!(ring.days_back(2).is_err());
    }

    #[test]
    fn test_days_back_newest_first() {
        let mut ring = DailyRing::new();
        ring.push(10);
        ring.push(20);
        ring.push(30);
        assert_eq!(ring.days_back(1), Ok(30));
        assert_eq!(ring.days_back(2), Ok(20));
        assert_eq!(ring.days_back(3), Ok(10));
        assert!(ring.days_back(4).is_err());
    }

    #[test]
    fn test_wraparound_keeps_last_capacity_days() {
        let mut ring = DailyRing::new();
        let total = DAILY_LOG_DAYS as u16 + 3;
        for day in 1..=total {
            ring.push(day * 10);
        }

        assert_eq!(ring.data_points(), total as u32);
        assert_eq!(ring.len(), DAILY_LOG_DAYS);
        for back in 1..=DAILY_LOG_DAYS as u8 {
            assert_eq!(ring.days_back(back), Ok((total - back as u16 + 1) * 10));
        }
        // The three oldest totals are gone
        assert!(ring.days_back(DAILY_LOG_DAYS as u8 + 1).is_err());

        // Most recent three sit at (data_points - 1) % N downward
        let newest = (ring.data_points() as usize - 1) % DAILY_LOG_DAYS;
        assert_eq!(newest, 2);
        assert_eq!(ring.slots[2], total * 10);
        assert_eq!(ring.slots[1], (total - 1) * 10);
        assert_eq!(ring.slots[0], (total - 2) * 10);
    }

    #[test]
    fn test_commit_count_never_goes_down() {
        let mut ring = DailyRing::new();
        ring.data_points = u32::MAX - 1;
        assert_eq!(ring.push(5), u32::MAX);
        assert_eq!(ring.push(6), u32::MAX);
        assert_eq!(ring.data_points(), u32::MAX);
        assert_eq!(ring.len(), DAILY_LOG_DAYS);
        assert!(!ring.is_empty());
    }

    #[test]
    fn test_window_marks_pre_history() {
        let mut ring = DailyRing::new();
        ring.push(40);
        ring.push(50);

        let window = ring.window();
        assert_eq!(window.values()[10], 40);
        assert_eq!(window.values()[11], 50);
        assert!(window.recorded()[10] && window.recorded()[11]);
        assert!(window.recorded()[..10].iter().all(|r| !*r));
        assert!(window.values()[..10].iter().all(|v| *v == 0));
    }
}
