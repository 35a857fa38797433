use serde::{Deserialize, Serialize};

use crate::config::{HOURS_PER_DAY, MAX_MINUTES_PER_HOUR, WINDOW_LEN};
use crate::stats::{Window, WindowKind};

/// Active minutes per hour of day.
///
/// Slot `h` holds the minutes credited during hour `h` of the current
/// rolling day. A slot stays authoritative until the next pass through the
/// same hour resets it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HourlyRing {
    slots: [u16; HOURS_PER_DAY],
    /// Bit `h` is set once hour `h` has been sampled, reset or credited
    touched: u32,
}

impl HourlyRing {
    pub const fn new() -> Self {
        Self {
            slots: [0; HOURS_PER_DAY],
            touched: 0,
        }
    }

    /// Zero the slot for `hour` at the start of that hour.
    pub fn reset_hour(&mut self, hour: usize) {
        let hour = hour % HOURS_PER_DAY;
        self.slots[hour] = 0;
        self.touched |= 1 << hour;
    }

    /// Credit one active minute to `hour`, saturating at 60.
    pub fn credit(&mut self, hour: usize) {
        let hour = hour % HOURS_PER_DAY;
        self.slots[hour] = self.slots[hour]
            .saturating_add(1)
            .min(MAX_MINUTES_PER_HOUR);
        self.touched |= 1 << hour;
    }

    /// Flag `hour` as tracked without crediting anything.
    ///
    /// An idle minute still makes the hour's count a real reading.
    pub fn mark_sampled(&mut self, hour: usize) {
        self.touched |= 1 << (hour % HOURS_PER_DAY);
    }

    /// Minutes recorded for `hour`.
    pub fn get(&self, hour: usize) -> u16 {
        self.slots[hour % HOURS_PER_DAY]
    }

    /// Whether the tracker has sampled `hour` since it was created.
    pub fn is_recorded(&self, hour: usize) -> bool {
        self.touched & (1 << (hour % HOURS_PER_DAY)) != 0
    }

    /// The 12 most recent hours, oldest first, ending with `current_hour`.
    pub fn window(&self, current_hour: u8) -> Window {
        let current_hour = current_hour % HOURS_PER_DAY as u8;
        let mut values = [0u16; WINDOW_LEN];
        let mut recorded = [false; WINDOW_LEN];

        for (i, (value, seen)) in values.iter_mut().zip(recorded.iter_mut()).enumerate() {
            let hour = window_hour(current_hour, i);
            *value = self.get(hour);
            *seen = self.is_recorded(hour);
        }

        Window::new(WindowKind::Hours { current_hour }, values, recorded)
    }

    #[cfg(test)]
    pub(crate) fn set(&mut self, hour: usize, minutes: u16) {
        self.slots[hour % HOURS_PER_DAY] = minutes;
        self.touched |= 1 << (hour % HOURS_PER_DAY);
    }
}

/// Hour of day shown at position `index` of a window ending at `current_hour`.
pub const fn window_hour(current_hour: u8, index: usize) -> usize {
    (current_hour as usize + HOURS_PER_DAY + index + 1 - WINDOW_LEN) % HOURS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_hour_wraps_through_midnight() {
        assert_eq!(window_hour(3, 0), 16);
        assert_eq!(window_hour(3, 8), 0);
        assert_eq!(window_hour(3, 11), 3);
        assert_eq!(window_hour(23, 0), 12);
        assert_eq!(window_hour(11, 0), 0);
    }

    #[test]
    fn test_credit_saturates_at_sixty() {
        let mut ring = HourlyRing::new();
        for _ in 0..75 {
            ring.credit(9);
        }
        assert_eq!(ring.get(9), 60);
    }

    #[test]
    fn test_reset_marks_slot_recorded() {
        let mut ring = HourlyRing::new();
        assert!(!ring.is_recorded(4));
        ring.reset_hour(4);
        assert!(ring.is_recorded(4));
        assert_eq!(ring.get(4), 0);
        assert!(!ring.is_recorded(5));
    }

    #[test]
    fn test_mark_sampled_keeps_count() {
        let mut ring = HourlyRing::new();
        ring.mark_sampled(10);
        assert!(ring.is_recorded(10));
        assert_eq!(ring.get(10), 0);

        ring.credit(10);
        ring.mark_sampled(10);
        assert_eq!(ring.get(10), 1);
    }

    #[test]
    fn test_window_orders_oldest_first() {
        let mut ring = HourlyRing::new();
        for hour in 0..HOURS_PER_DAY {
            ring.set(hour, hour as u16);
        }

        let window = ring.window(2);
        assert_eq!(
            window.values(),
            &[15, 16, 17, 18, 19, 20, 21, 22, 23, 0, 1, 2]
        );
        assert!(window.recorded().iter().all(|r| *r));
    }

    #[test]
    fn test_window_flags_untouched_hours() {
        let mut ring = HourlyRing::new();
        ring.set(10, 7);

        let window = ring.window(10);
        assert_eq!(window.values()[11], 7);
        assert!(window.recorded()[11]);
        assert!(!window.recorded()[10]);
    }
}
