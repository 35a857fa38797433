//! Pure mapping from activity state to what the segment display shows.
//!
//! [`render`] never mutates anything. The host's display driver turns a
//! [`Frame`] into segments; [`Frame::lcd_text`] gives the classic
//! three-region text layout (title, top-right, six-character bottom line).

use core::fmt::{self, Write};

use crate::config::{ActivityConfig, MoodThresholds, WINDOW_LEN};
use crate::state::ActivityState;
use crate::stats::{Extreme, SlotLabel, Window};
use crate::time::LocalDateTime;
use crate::view::{HistogramView, Mode, Timeframe};

/// Characters in the LCD text returned by [`Frame::lcd_text`].
pub const LCD_TEXT_CAPACITY: usize = 16;

/// Title with a two-character fallback for displays lacking the third digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Title {
    pub full: &'static str,
    pub short: &'static str,
}

impl Title {
    pub const ACTIVITY: Self = Self::new("ACT", "AC");
    pub const HOURS: Self = Self::new("HR", "HR");
    pub const DAYS: Self = Self::new("DA", "DA");
    pub const MEDIAN: Self = Self::new("MED", "ME");
    pub const MIN: Self = Self::new("MIN", "MI");
    pub const MAX: Self = Self::new("MAX", "MA");

    pub const fn new(full: &'static str, short: &'static str) -> Self {
        Self { full, short }
    }
}

/// How today's count makes the wearer feel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Happy,
    Neutral,
    Sad,
}

impl Mood {
    pub const fn from_minutes(minutes: u16, thresholds: &MoodThresholds) -> Self {
        if minutes >= thresholds.happy {
            Self::Happy
        } else if minutes >= thresholds.neutral {
            Self::Neutral
        } else {
            Self::Sad
        }
    }

    /// Segment glyph; read with the colon lit it forms a face.
    pub const fn glyph(self) -> char {
        match self {
            Self::Happy => ')',
            Self::Neutral => '1',
            Self::Sad => '(',
        }
    }
}

/// Content of one display region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Blank,
    /// A minute count, hour of day or day of month
    Number(u16),
    Text(&'static str),
    /// The requested day has no recorded data
    NoData,
    Mood(Mood),
}

/// Everything needed to draw one screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub title: Title,
    pub top_right: Field,
    pub bottom: Field,
    /// "Still recording" indicator, lit while the page shows live data
    pub recording: bool,
    pub colon: bool,
    /// Bar heights (0-2 segments), oldest first; chart view only
    pub bars: Option<[u8; WINDOW_LEN]>,
}

impl Frame {
    const fn new(title: Title, top_right: Field, bottom: Field, recording: bool) -> Self {
        Self {
            title,
            top_right,
            bottom,
            recording,
            colon: false,
            bars: None,
        }
    }

    /// Text for the title, top-right and bottom regions, in that order.
    ///
    /// `short_titles` selects the two-character title fallback.
    pub fn lcd_text(&self, short_titles: bool) -> heapless::String<LCD_TEXT_CAPACITY> {
        let mut text = heapless::String::new();
        // Every region has a bounded width, so this always fits
        let _ = self.write_lcd(&mut text, short_titles);
        text
    }

    fn write_lcd<W: Write>(&self, out: &mut W, short_titles: bool) -> fmt::Result {
        let title = if short_titles {
            self.title.short
        } else {
            self.title.full
        };
        write!(out, "{:<3}", title)?;

        match self.top_right {
            Field::Number(n) => write!(out, "{:>2}", n % 100)?,
            Field::Text(t) => write!(out, "{:>2}", t)?,
            Field::Blank | Field::NoData | Field::Mood(_) => out.write_str("  ")?,
        }

        match self.bottom {
            Field::Number(n) => write!(out, "{:>4}  ", n)?,
            Field::Text(t) => write!(out, "{:<6}", t)?,
            Field::NoData => out.write_str("no dat")?,
            Field::Mood(mood) => write!(out, "  {}   ", mood.glyph())?,
            Field::Blank => out.write_str("      ")?,
        }
        Ok(())
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_lcd(f, false)?;
        if let Some(bars) = self.bars {
            f.write_str(" [")?;
            for height in bars {
                f.write_char(match height {
                    0 => '_',
                    1 => '-',
                    _ => '#',
                })?;
            }
            f.write_char(']')?;
        }
        if self.recording {
            f.write_str(" (rec)")?;
        }
        Ok(())
    }
}

/// Build the frame for whatever page the view state selects.
pub fn render(state: &ActivityState, config: &ActivityConfig, now: &LocalDateTime) -> Frame {
    match state.view().mode() {
        Mode::Day => day_page(state, config, now),
        Mode::Histogram => histogram_page(state, config, now),
    }
}

/// Day page: today's running count, or a past day's committed total.
pub fn day_page(state: &ActivityState, config: &ActivityConfig, now: &LocalDateTime) -> Frame {
    let days_back = state.view().display_index();

    if days_back == 0 {
        let minutes = state.active_minutes_today();
        let top_right = Field::Number(now.day as u16);
        if state.emoticon().is_visible() {
            let mood = Mood::from_minutes(minutes, &config.mood);
            let mut frame = Frame::new(Title::ACTIVITY, top_right, Field::Mood(mood), true);
            frame.colon = true;
            frame
        } else {
            Frame::new(Title::ACTIVITY, top_right, Field::Number(minutes), true)
        }
    } else {
        let day = now.day_of_month_days_back(days_back as u32);
        let bottom = match state.day_total(days_back) {
            Ok(minutes) => Field::Number(minutes),
            Err(_) => Field::NoData,
        };
        Frame::new(Title::ACTIVITY, Field::Number(day as u16), bottom, false)
    }
}

/// Histogram page: chart or one statistic over the selected window.
pub fn histogram_page(
    state: &ActivityState,
    config: &ActivityConfig,
    now: &LocalDateTime,
) -> Frame {
    let timeframe = state.view().timeframe();
    let window = state.window(timeframe, now);
    let recording = timeframe == Timeframe::TwelveHours;

    match state.view().histogram_view() {
        HistogramView::Chart => {
            let title = match timeframe {
                Timeframe::TwelveHours => Title::HOURS,
                Timeframe::TwelveDays => Title::DAYS,
            };
            let mut frame = Frame::new(title, Field::Text("12"), Field::Blank, recording);
            frame.bars = Some(bar_heights(&window, timeframe, config));
            frame
        }
        HistogramView::Median => Frame::new(
            Title::MEDIAN,
            Field::Blank,
            Field::Number(window.median()),
            recording,
        ),
        HistogramView::Min => extreme_frame(Title::MIN, window.min(), &window, now, recording),
        HistogramView::Max => extreme_frame(Title::MAX, window.max(), &window, now, recording),
    }
}

fn extreme_frame(
    title: Title,
    extreme: Option<Extreme>,
    window: &Window,
    now: &LocalDateTime,
    recording: bool,
) -> Frame {
    match extreme {
        Some(Extreme { index, value }) => {
            let label = match window.label(index) {
                SlotLabel::Hour(hour) => hour as u16,
                SlotLabel::DaysBack(back) => now.day_of_month_days_back(back as u32) as u16,
            };
            Frame::new(title, Field::Number(label), Field::Number(value), recording)
        }
        None => Frame::new(title, Field::Blank, Field::NoData, recording),
    }
}

fn bar_heights(window: &Window, timeframe: Timeframe, config: &ActivityConfig) -> [u8; WINDOW_LEN] {
    let thresholds = match timeframe {
        Timeframe::TwelveHours => config.hourly_bars,
        Timeframe::TwelveDays => config.daily_bars,
    };

    let mut heights = [0u8; WINDOW_LEN];
    for (height, (value, recorded)) in heights
        .iter_mut()
        .zip(window.values().iter().zip(window.recorded()))
    {
        if *recorded {
            *height = thresholds.height(*value);
        }
    }
    heights
}
