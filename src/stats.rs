//! Window statistics: median, minimum and maximum with source index.
//!
//! All functions work on a private copy or a read-only view of the data and
//! never touch the ring buffers they were drawn from.
//!
//! Tie-breaking is part of the contract: both [`min_with_index`] and
//! [`max_with_index`] report the *last* position holding the extreme value.

use crate::config::WINDOW_LEN;
use crate::storage::hourly::window_hour;

/// A value picked out of a window together with its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extreme {
    /// Position inside the window (0 = oldest)
    pub index: usize,
    /// Active minutes at that position
    pub value: u16,
}

/// Median of `values`, averaging the two central values for even counts.
///
/// The average is truncated towards zero. Returns `None` for an empty input.
pub fn median<const N: usize>(values: &[u16; N]) -> Option<u16> {
    if N == 0 {
        return None;
    }

    let mut sorted = *values;
    sorted.sort_unstable();

    let mid = N / 2;
    if N % 2 == 0 {
        let low = sorted[mid.saturating_sub(1)] as u32;
        let high = sorted[mid] as u32;
        Some(((low + high) / 2) as u16)
    } else {
        Some(sorted[mid])
    }
}

/// Smallest value and the last index where it occurs.
pub fn min_with_index(values: &[u16]) -> Option<Extreme> {
    scan(values.iter().copied().enumerate(), |candidate, best| {
        candidate <= best
    })
}

/// Largest value and the last index where it occurs.
pub fn max_with_index(values: &[u16]) -> Option<Extreme> {
    scan(values.iter().copied().enumerate(), |candidate, best| {
        candidate >= best
    })
}

fn scan<I, F>(mut items: I, replaces: F) -> Option<Extreme>
where
    I: Iterator<Item = (usize, u16)>,
    F: Fn(u16, u16) -> bool,
{
    let (index, value) = items.next()?;
    let mut best = Extreme { index, value };

    for (index, value) in items {
        if replaces(value, best.value) {
            best = Extreme { index, value };
        }
    }

    Some(best)
}

/// Which ring a window was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    /// Last 12 hours, newest slot is `current_hour`
    Hours { current_hour: u8 },
    /// Last 12 committed days, newest slot is yesterday
    Days,
}

/// What a window position refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotLabel {
    /// Hour of day (0-23)
    Hour(u8),
    /// Days before today
    DaysBack(u8),
}

/// A materialized 12-sample window copied out of one of the rings.
///
/// Positions without recorded data carry a value of zero and a cleared
/// `recorded` flag. The chart and the median use the zero-filled values;
/// min and max only consider recorded positions so a phantom zero is never
/// reported as the quietest hour or day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    kind: WindowKind,
    values: [u16; WINDOW_LEN],
    recorded: [bool; WINDOW_LEN],
}

impl Window {
    pub const fn new(
        kind: WindowKind,
        values: [u16; WINDOW_LEN],
        recorded: [bool; WINDOW_LEN],
    ) -> Self {
        Self {
            kind,
            values,
            recorded,
        }
    }

    pub const fn values(&self) -> &[u16; WINDOW_LEN] {
        &self.values
    }

    pub const fn recorded(&self) -> &[bool; WINDOW_LEN] {
        &self.recorded
    }

    pub fn has_data(&self) -> bool {
        self.recorded.iter().any(|r| *r)
    }

    pub fn median(&self) -> u16 {
        median(&self.values).unwrap_or(0)
    }

    /// Minimum over recorded positions; `None` when nothing was recorded.
    pub fn min(&self) -> Option<Extreme> {
        scan(self.recorded_values(), |candidate, best| candidate <= best)
    }

    /// Maximum over recorded positions; `None` when nothing was recorded.
    pub fn max(&self) -> Option<Extreme> {
        scan(self.recorded_values(), |candidate, best| candidate >= best)
    }

    fn recorded_values(&self) -> impl Iterator<Item = (usize, u16)> + '_ {
        self.values
            .iter()
            .copied()
            .enumerate()
            .filter(|(i, _)| self.recorded[*i])
    }

    /// Map a window position back to the hour or day it came from.
    pub fn label(&self, index: usize) -> SlotLabel {
        let index = index.min(WINDOW_LEN - 1);
        match self.kind {
            WindowKind::Hours { current_hour } => {
                SlotLabel::Hour(window_hour(current_hour, index) as u8)
            }
            WindowKind::Days => SlotLabel::DaysBack((WINDOW_LEN - index) as u8),
        }
    }
}
