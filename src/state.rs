//! The long-lived activity state owned by the host.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::MAX_MINUTES_PER_DAY;
use crate::error::ActivityResult;
use crate::rollover::RolloverScheduler;
use crate::sampling::{DebouncedSampler, SampleOutcome};
use crate::stats::Window;
use crate::storage::{DailyRing, HourlyRing};
use crate::time::{LocalDateTime, MinuteStamp};
use crate::view::{Timeframe, ViewState};

/// Result of the per-minute advisory poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Advisory {
    /// The host should deliver a background-task event soon
    pub wants_background_task: bool,
}

/// Mood glyph timing after the face is brought up.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmoticonTimer {
    show_emoticon: bool,
    emoticon_tick_count: u8,
}

impl EmoticonTimer {
    /// Start showing the glyph.
    pub fn start(&mut self) {
        self.show_emoticon = true;
        self.emoticon_tick_count = 0;
    }

    /// Count a tick; returns true on the tick the glyph is hidden.
    pub fn tick(&mut self, visible_ticks: u8) -> bool {
        if !self.show_emoticon {
            return false;
        }
        self.emoticon_tick_count = self.emoticon_tick_count.saturating_add(1);
        if self.emoticon_tick_count > visible_ticks {
            self.show_emoticon = false;
            return true;
        }
        false
    }

    pub const fn is_visible(&self) -> bool {
        self.show_emoticon
    }
}

/// Everything the activity face tracks.
///
/// One instance lives for as long as the device is powered. The per-minute
/// path ([`ActivityState::advise`]) and the commit path
/// ([`ActivityState::commit_day`]) mutate history; user input only changes
/// [`ViewState`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActivityState {
    pub(crate) active_minutes_today: u16,
    pub(crate) sampler: DebouncedSampler,
    pub(crate) hourly: HourlyRing,
    pub(crate) daily: DailyRing,
    pub(crate) rollover: RolloverScheduler,
    pub(crate) view: ViewState,
    pub(crate) emoticon: EmoticonTimer,
    /// Last minute whose motion reading was applied
    last_sampled: Option<MinuteStamp>,
}

impl ActivityState {
    pub const fn new() -> Self {
        Self {
            active_minutes_today: 0,
            sampler: DebouncedSampler::new(),
            hourly: HourlyRing::new(),
            daily: DailyRing::new(),
            rollover: RolloverScheduler::new(),
            view: ViewState::new(),
            emoticon: EmoticonTimer {
                show_emoticon: false,
                emoticon_tick_count: 0,
            },
            last_sampled: None,
        }
    }

    /// Per-minute entry point.
    ///
    /// Evaluates the rollover clock, then applies this minute's motion
    /// reading. Polling again within the same wall-clock minute only
    /// re-reports the advisory.
    pub fn advise(&mut self, now: &LocalDateTime, motion_absent: bool) -> Advisory {
        let wants_background_task = self.rollover.evaluate(now);

        let stamp = now.minute_stamp();
        if self.last_sampled != Some(stamp) {
            self.last_sampled = Some(stamp);
            self.record_minute(now, motion_absent);
        }

        Advisory {
            wants_background_task,
        }
    }

    /// Apply one minute of motion data.
    ///
    /// At the top of the hour the hour's slot is cleared before the reading
    /// is applied. Both counters saturate at their natural bounds.
    pub fn record_minute(&mut self, now: &LocalDateTime, motion_absent: bool) -> SampleOutcome {
        let hour = now.hour_index();
        if now.is_top_of_hour() {
            self.hourly.reset_hour(hour);
        }
        self.hourly.mark_sampled(hour);

        let outcome = self.sampler.sample(motion_absent);
        if outcome == SampleOutcome::Credited {
            self.active_minutes_today = self
                .active_minutes_today
                .saturating_add(1)
                .min(MAX_MINUTES_PER_DAY);
            self.hourly.credit(hour);
        }
        outcome
    }

    /// Deferred midnight work: close the day into the daily log.
    pub fn commit_day(&mut self, now: &LocalDateTime) -> ActivityResult<u32> {
        self.rollover
            .commit(now, &mut self.active_minutes_today, &mut self.daily)
    }

    pub const fn active_minutes_today(&self) -> u16 {
        self.active_minutes_today
    }

    pub const fn hourly(&self) -> &HourlyRing {
        &self.hourly
    }

    pub const fn daily(&self) -> &DailyRing {
        &self.daily
    }

    pub const fn view(&self) -> &ViewState {
        &self.view
    }

    pub const fn rollover(&self) -> &RolloverScheduler {
        &self.rollover
    }

    pub const fn emoticon(&self) -> &EmoticonTimer {
        &self.emoticon
    }

    pub(crate) fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    pub(crate) fn emoticon_mut(&mut self) -> &mut EmoticonTimer {
        &mut self.emoticon
    }

    /// Total recorded `days_back` days ago; 0 means today's running count.
    pub fn day_total(&self, days_back: u8) -> ActivityResult<u16> {
        if days_back == 0 {
            Ok(self.active_minutes_today)
        } else {
            self.daily.days_back(days_back)
        }
    }

    /// Copy out the 12-sample window for a timeframe.
    pub fn window(&self, timeframe: Timeframe, now: &LocalDateTime) -> Window {
        let window = match timeframe {
            Timeframe::TwelveHours => self.hourly.window(now.hour),
            Timeframe::TwelveDays => self.daily.window(),
        };
        debug!(" Window {}: {:?}", timeframe.label(), window.values());
        window
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_MINUTES_PER_HOUR;
    use crate::error::ActivityError;

    fn at(hour: u8, minute: u8) -> LocalDateTime {
        LocalDateTime::new(2026, 6, 10, hour, minute, 0)
    }

    #[test]
    fn test_top_of_hour_clears_before_sampling() {
        let mut state = ActivityState::new();
        state.hourly.set(5, 42);
        state.sampler = DebouncedSampler::new();
        state.sampler.sample(false);

        state.advise(&at(5, 0), false);
        assert_eq!(state.hourly().get(5), 1);

        let mut quiet = ActivityState::new();
        quiet.hourly.set(5, 42);
        quiet.advise(&at(5, 0), true);
        assert_eq!(quiet.hourly().get(5), 0);
    }

    #[test]
    fn test_hour_reset_happens_once_per_hour() {
        let mut state = ActivityState::new();
        state.advise(&at(7, 0), false);
        state.advise(&at(7, 1), false);
        assert_eq!(state.hourly().get(7), 1);

        // Repeated poll in the same minute must not wipe the slot
        state.advise(&at(7, 1), false);
        assert_eq!(state.hourly().get(7), 1);
        assert_eq!(state.active_minutes_today(), 1);
    }

    #[test]
    fn test_quiet_boot_hour_counts_as_recorded() {
        let mut state = ActivityState::new();
        for minute in 5..60 {
            state.advise(&at(10, minute), true);
        }
        for minute in 0..31 {
            state.advise(&at(11, minute), false);
        }
        state.advise(&at(11, 31), true);

        let window = state.window(Timeframe::TwelveHours, &at(11, 31));
        assert!(window.recorded()[10]);
        assert_eq!(window.min().map(|e| (e.index, e.value)), Some((10, 0)));
        assert_eq!(window.max().map(|e| (e.index, e.value)), Some((11, 30)));
        assert!(!window.recorded()[9]);
    }

    #[test]
    fn test_counters_saturate() {
        let mut state = ActivityState::new();
        state.active_minutes_today = MAX_MINUTES_PER_DAY;
        state.hourly.set(3, MAX_MINUTES_PER_HOUR);
        state.sampler.sample(false);

        state.record_minute(&at(3, 30), false);
        state.record_minute(&at(3, 31), false);
        assert_eq!(state.active_minutes_today(), MAX_MINUTES_PER_DAY);
        assert_eq!(state.hourly().get(3), MAX_MINUTES_PER_HOUR);
    }

    #[test]
    fn test_midnight_advisory_and_late_commit() {
        let mut state = ActivityState::new();
        state.advise(&LocalDateTime::new(2026, 6, 10, 23, 58, 0), false);
        state.advise(&LocalDateTime::new(2026, 6, 10, 23, 59, 0), false);

        let midnight = LocalDateTime::new(2026, 6, 11, 0, 0, 0);
        let advisory = state.advise(&midnight, false);
        assert!(advisory.wants_background_task);
        // 23:59 and 00:00 are both credited before the host gets to the commit
        assert_eq!(state.active_minutes_today(), 2);

        let late = LocalDateTime::new(2026, 6, 11, 0, 0, 40);
        assert_eq!(state.commit_day(&late), Ok(1));
        assert_eq!(state.day_total(1), Ok(2));
        assert_eq!(state.day_total(0), Ok(0));
        assert_eq!(
            state.day_total(2),
            Err(ActivityError::NoData { days_back: 2 })
        );
    }

    #[test]
    fn test_emoticon_timer() {
        let mut timer = EmoticonTimer::default();
        assert!(!timer.tick(1));

        timer.start();
        assert!(timer.is_visible());
        assert!(!timer.tick(1));
        assert!(timer.tick(1));
        assert!(!timer.is_visible());
        assert!(!timer.tick(1));
    }
}
