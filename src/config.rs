//! Capacities, bounds and display thresholds for the activity log.
//!
//! Structural sizes are compile-time constants so every buffer in the crate
//! stays fixed-capacity. Display thresholds are carried by [`ActivityConfig`]
//! so the host can tune them without rebuilding the history model.

use serde::{Deserialize, Serialize};

/// Number of days retained in the daily log ring.
pub const DAILY_LOG_DAYS: usize = 14;

/// Hour slots in the hourly ring, one per hour of day.
pub const HOURS_PER_DAY: usize = 24;

/// Number of samples in every statistics window (12 hours or 12 days).
pub const WINDOW_LEN: usize = 12;

/// Upper bound of `active_minutes_today`.
pub const MAX_MINUTES_PER_DAY: u16 = 1440;

/// Upper bound of a single hourly slot.
pub const MAX_MINUTES_PER_HOUR: u16 = 60;

/// Encoded size budget for a state snapshot.
pub const SNAPSHOT_MAX_BYTES: usize = 128;

const _: () = assert!(DAILY_LOG_DAYS >= WINDOW_LEN);
const _: () = assert!(DAILY_LOG_DAYS <= u8::MAX as usize);

/// Minute thresholds for the mood glyph shown on activation.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodThresholds {
    /// Minutes at or above which the wearer gets a happy face
    pub happy: u16,
    /// Minutes at or above which the wearer gets a neutral face
    pub neutral: u16,
}

impl Default for MoodThresholds {
    fn default() -> Self {
        Self {
            happy: 150,
            neutral: 30,
        }
    }
}

/// Minute thresholds for a two-segment histogram bar.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarThresholds {
    /// Minutes needed to light both segments
    pub full: u16,
    /// Minutes needed to light the bottom segment
    pub half: u16,
}

impl BarThresholds {
    /// Bar height in segments (0, 1 or 2) for a minute count.
    pub const fn height(&self, minutes: u16) -> u8 {
        if minutes >= self.full {
            2
        } else if minutes >= self.half {
            1
        } else {
            0
        }
    }
}

/// Display tuning for the activity face.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityConfig {
    pub mood: MoodThresholds,
    /// Bar thresholds for a single hour
    pub hourly_bars: BarThresholds,
    /// Bar thresholds for a whole day
    pub daily_bars: BarThresholds,
    /// Ticks the mood glyph stays visible after activation
    pub emoticon_ticks: u8,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            mood: MoodThresholds::default(),
            hourly_bars: BarThresholds { full: 10, half: 5 },
            daily_bars: BarThresholds {
                full: 150,
                half: 30,
            },
            emoticon_ticks: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hourly_bar_heights() {
        let bars = ActivityConfig::default().hourly_bars;
        assert_eq!(bars.height(0), 0);
        assert_eq!(bars.height(4), 0);
        assert_eq!(bars.height(5), 1);
        assert_eq!(bars.height(9), 1);
        assert_eq!(bars.height(10), 2);
        assert_eq!(bars.height(60), 2);
    }

    #[test]
    fn test_daily_bar_heights() {
        let bars = ActivityConfig::default().daily_bars;
        assert_eq!(bars.height(29), 0);
        assert_eq!(bars.height(30), 1);
        assert_eq!(bars.height(149), 1);
        assert_eq!(bars.height(150), 2);
    }

    #[test]
    fn test_config_postcard_roundtrip() {
        let config = ActivityConfig {
            emoticon_ticks: 3,
            ..ActivityConfig::default()
        };
        let mut buf = [0u8; 32];
        let used = postcard::to_slice(&config, &mut buf).unwrap();
        let decoded: ActivityConfig = postcard::from_bytes(used).unwrap();
        assert_eq!(decoded, config);
    }
}
