//! Display selection state machine.
//!
//! Tracks which page the face shows: the day log (today or a past day) or
//! one of four histogram views over the last 12 hours or 12 days. Nothing in
//! here touches recorded history; it only decides what gets rendered.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::DAILY_LOG_DAYS;

/// Top-level page.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Today's count or a past day's total
    #[default]
    Day,
    /// Chart and statistics over a 12-sample window
    Histogram,
}

/// Histogram sub-view, cycled in order.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistogramView {
    #[default]
    Chart,
    Median,
    Min,
    Max,
}

impl HistogramView {
    pub const fn next(self) -> Self {
        match self {
            Self::Chart => Self::Median,
            Self::Median => Self::Min,
            Self::Min => Self::Max,
            Self::Max => Self::Chart,
        }
    }
}

/// Window used by the histogram views.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timeframe {
    #[default]
    TwelveHours,
    TwelveDays,
}

impl Timeframe {
    pub const fn toggle(self) -> Self {
        match self {
            Self::TwelveHours => Self::TwelveDays,
            Self::TwelveDays => Self::TwelveHours,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::TwelveHours => "12h",
            Self::TwelveDays => "12d",
        }
    }
}

/// User input routed to the face by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Short press of the primary (light) button
    PrimaryShort,
    /// Short press of the secondary (alarm) button
    SecondaryShort,
    /// Long press of the primary button
    LongPress,
    /// Host inactivity timeout
    Timeout,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    mode: Mode,
    histogram_view: HistogramView,
    timeframe: Timeframe,
    /// Days back shown on the day page, 0 = today
    display_index: u8,
}

impl ViewState {
    pub const fn new() -> Self {
        Self {
            mode: Mode::Day,
            histogram_view: HistogramView::Chart,
            timeframe: Timeframe::TwelveHours,
            display_index: 0,
        }
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    pub const fn histogram_view(&self) -> HistogramView {
        self.histogram_view
    }

    pub const fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    pub const fn display_index(&self) -> u8 {
        self.display_index
    }

    /// True while the day page shows today.
    pub const fn is_showing_today(&self) -> bool {
        self.display_index == 0
    }

    /// Go back to today's data without leaving the current mode.
    pub fn reset_to_today(&mut self) {
        self.display_index = 0;
    }

    /// Apply an input. Returns true if the selection changed.
    pub fn apply(&mut self, input: Input) -> bool {
        let before = *self;

        match (self.mode, input) {
            (_, Input::LongPress) => {
                self.mode = match self.mode {
                    Mode::Day => Mode::Histogram,
                    Mode::Histogram => Mode::Day,
                };
                self.display_index = 0;
                debug!(" Activity face mode -> {:?}", self.mode);
            }
            (_, Input::Timeout) => self.reset_to_today(),
            (Mode::Day, Input::PrimaryShort) => {
                self.display_index = self.display_index.saturating_sub(1);
            }
            (Mode::Day, Input::SecondaryShort) => {
                self.display_index = ((self.display_index as usize + 1) % DAILY_LOG_DAYS) as u8;
            }
            (Mode::Histogram, Input::PrimaryShort) => {
                self.histogram_view = self.histogram_view.next();
            }
            (Mode::Histogram, Input::SecondaryShort) => {
                self.timeframe = self.timeframe.toggle();
                debug!(" Histogram timeframe -> {}", self.timeframe.label());
            }
        }

        *self != before
    }

    #[cfg(test)]
    pub(crate) fn set_display_index(&mut self, index: u8) {
        self.display_index = index % DAILY_LOG_DAYS as u8;
    }
}
