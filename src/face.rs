//! Host-facing activity face.
//!
//! The host dispatcher owns one [`ActivityFace`] and drives it through a
//! handful of entry points:
//!
//! 1. **`setup`** / **`activate`**: lifecycle, when the face is created and
//!    each time it comes to the foreground.
//! 2. **`advise`**: once per minute, whether or not the face is visible.
//!    Samples motion and reports whether background work is wanted.
//! 3. **`handle_event`**: ticks, button input, timeouts and the deferred
//!    background task requested by `advise`.
//! 4. **`render`**: whenever `handle_event` asks for a redraw.
//!
//! Events arrive one at a time, so no locking is involved anywhere.

use log::{debug, info};

use crate::config::{ActivityConfig, SNAPSHOT_MAX_BYTES};
use crate::error::ActivityResult;
use crate::render::{self, Frame};
use crate::state::{ActivityState, Advisory};
use crate::time::LocalDateTime;
use crate::view::{Input, Mode};

/// Events the host delivers to the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceEvent {
    /// The face came to the foreground
    Activate,
    /// Once-per-second tick while the face is visible
    Tick,
    /// Once-per-minute tick in low-energy mode
    LowEnergyTick,
    /// A button press or timeout
    Input(Input),
    /// The host is running the work requested through the advisory
    BackgroundTask,
    /// Anything this face does not handle
    Other,
}

/// What the host should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// The display is stale, call [`ActivityFace::render`]
    Redraw,
    /// Handled, nothing to redraw
    Handled,
    /// Not ours; apply the host's default handling
    Unhandled,
}

impl EventResult {
    const fn redraw_if(changed: bool) -> Self {
        if changed { Self::Redraw } else { Self::Handled }
    }
}

pub struct ActivityFace {
    state: ActivityState,
    config: ActivityConfig,
}

impl ActivityFace {
    /// First-time setup with zeroed history.
    pub fn setup(config: ActivityConfig) -> Self {
        info!(" Activity face set up: {:?}", config);
        Self {
            state: ActivityState::new(),
            config,
        }
    }

    /// Resume from a state the host retained across a reset.
    pub fn from_state(state: ActivityState, config: ActivityConfig) -> Self {
        info!(
            " Activity face restored with {} committed day(s)",
            state.daily().data_points()
        );
        Self { state, config }
    }

    /// The face is brought to the foreground: show today and the mood glyph.
    pub fn activate(&mut self) {
        self.state.view_mut().reset_to_today();
        self.state.emoticon_mut().start();
    }

    /// Per-minute background poll; see [`ActivityState::advise`].
    pub fn advise(&mut self, now: &LocalDateTime, motion_absent: bool) -> Advisory {
        let advisory = self.state.advise(now, motion_absent);
        if advisory.wants_background_task {
            debug!(" Requesting background task at {}", now);
        }
        advisory
    }

    /// Dispatch one host event.
    pub fn handle_event(&mut self, event: FaceEvent, now: &LocalDateTime) -> EventResult {
        match event {
            FaceEvent::Activate => {
                self.activate();
                EventResult::Redraw
            }
            FaceEvent::Tick => self.on_tick(now),
            FaceEvent::LowEnergyTick => EventResult::Redraw,
            FaceEvent::Input(input) => {
                EventResult::redraw_if(self.state.view_mut().apply(input))
            }
            FaceEvent::BackgroundTask => {
                match self.run_background_task(now) {
                    Ok(days) => debug!(" Background task done, {} day(s) logged", days),
                    Err(e) => debug!(" Background task skipped: {}", e),
                }
                EventResult::Handled
            }
            FaceEvent::Other => EventResult::Unhandled,
        }
    }

    fn on_tick(&mut self, now: &LocalDateTime) -> EventResult {
        let view = *self.state.view();
        let mut redraw = now.second == 0 && view.is_showing_today();

        if view.mode() == Mode::Day && self.state.emoticon_mut().tick(self.config.emoticon_ticks) {
            redraw = true;
        }

        EventResult::redraw_if(redraw)
    }

    /// The deferred midnight commit.
    pub fn run_background_task(&mut self, now: &LocalDateTime) -> ActivityResult<u32> {
        self.state.commit_day(now)
    }

    /// Frame for the page currently selected.
    pub fn render(&self, now: &LocalDateTime) -> Frame {
        render::render(&self.state, &self.config, now)
    }

    pub const fn state(&self) -> &ActivityState {
        &self.state
    }

    pub const fn config(&self) -> &ActivityConfig {
        &self.config
    }

    /// Encode the tracked state for the host's retention facility.
    pub fn snapshot(&self) -> ActivityResult<heapless::Vec<u8, SNAPSHOT_MAX_BYTES>> {
        self.state.to_snapshot()
    }
}
