//! Debounced per-minute activity sampling.
//!
//! The host polls the motion line once per minute. A minute only counts as
//! active once motion has been seen for two minutes in a row; after that,
//! every further consecutive active minute is credited immediately. A single
//! quiet minute drops the latch. The policy is fixed.

use serde::{Deserialize, Serialize};

/// What the sampler did with one minute's reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleOutcome {
    /// No motion this minute
    Idle,
    /// First active minute of a run, held back until confirmed
    Latched,
    /// Confirmed active minute, credit it
    Credited,
}

/// Two-minute debounce latch.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DebouncedSampler {
    previous_minute_was_active: bool,
}

impl DebouncedSampler {
    pub const fn new() -> Self {
        Self {
            previous_minute_was_active: false,
        }
    }

    /// Feed one minute's reading. `motion_absent` is the raw inactivity line.
    pub fn sample(&mut self, motion_absent: bool) -> SampleOutcome {
        if motion_absent {
            self.previous_minute_was_active = false;
            SampleOutcome::Idle
        } else if self.previous_minute_was_active {
            SampleOutcome::Credited
        } else {
            self.previous_minute_was_active = true;
            SampleOutcome::Latched
        }
    }

    /// True while an active minute is waiting for confirmation or a run is ongoing.
    pub const fn is_latched(&self) -> bool {
        self.previous_minute_was_active
    }
}
