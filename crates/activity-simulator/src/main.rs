//! Desktop simulator for the activity-log watch face.
//!
//! Runs the face minute by minute over a number of simulated days with a
//! synthetic motion signal, delivers the midnight background task when the
//! face asks for it, and prints the LCD text of every page once per evening.
//!
//! ```text
//! RUST_LOG=info activity-simulator [days]
//! ```

use log::{info, warn};

use activity_log::time::CalendarDay;
use activity_log::{
    ActivityConfig, ActivityFace, ActivityState, EventResult, FaceEvent, Input, LocalDateTime,
};

/// Days simulated when no argument is given.
const DEFAULT_DAYS: u32 = 5;

/// First simulated day.
const START_DAY: CalendarDay = CalendarDay::new(2026, 1, 26);

/// Hour at which the wearer checks every page.
const REVIEW_HOUR: u8 = 20;

/// Generates a motion signal that follows a rough daily routine.
struct MockMotionGenerator {
    /// LCG state for minute-to-minute jitter
    seed: u32,
}

impl MockMotionGenerator {
    fn new() -> Self {
        Self { seed: 0x2545_f491 }
    }

    /// True when the sensor reports no motion for this minute.
    fn motion_absent(&mut self, day_index: u32, minute_of_day: u16) -> bool {
        self.seed = self.seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let jitter = (self.seed >> 16) as f64 / 65_536.0;

        let hour = minute_of_day as f64 / 60.0;
        if !(7.0..23.0).contains(&hour) {
            return true;
        }

        // Morning and evening peaks; some days are lazier than others
        let routine = (hour * core::f64::consts::PI / 8.0).sin().abs();
        let effort = 0.35 + 0.25 * ((day_index as f64) * 1.3).sin();
        routine * effort < jitter * 0.6
    }
}

fn at(day: CalendarDay, minute_of_day: u16, second: u8) -> LocalDateTime {
    LocalDateTime::new(
        day.year,
        day.month,
        day.day,
        (minute_of_day / 60) as u8,
        (minute_of_day % 60) as u8,
        second,
    )
}

fn show(face: &ActivityFace, now: &LocalDateTime, what: &str) {
    let frame = face.render(now);
    info!("{:<14} |{}|  {}", what, frame.lcd_text(false), frame);
}

/// Walk through every page the way a curious wearer would.
fn review(face: &mut ActivityFace, now: &LocalDateTime) {
    face.handle_event(FaceEvent::Activate, now);
    show(face, now, "mood");

    let tick = LocalDateTime { second: 1, ..*now };
    face.handle_event(FaceEvent::Tick, &tick);
    let tick = LocalDateTime { second: 2, ..*now };
    if face.handle_event(FaceEvent::Tick, &tick) == EventResult::Redraw {
        show(face, now, "today");
    }

    for back in 1..=3 {
        face.handle_event(FaceEvent::Input(Input::SecondaryShort), now);
        show(face, now, &format!("{} day(s) back", back));
    }

    face.handle_event(FaceEvent::Input(Input::LongPress), now);
    for timeframe in ["12h", "12d"] {
        for page in ["chart", "median", "min", "max"] {
            show(face, now, &format!("{} {}", timeframe, page));
            face.handle_event(FaceEvent::Input(Input::PrimaryShort), now);
        }
        face.handle_event(FaceEvent::Input(Input::SecondaryShort), now);
    }

    face.handle_event(FaceEvent::Input(Input::LongPress), now);
    face.handle_event(FaceEvent::Input(Input::Timeout), now);
}

fn main() {
    env_logger::init();

    let days = match std::env::args().nth(1) {
        Some(arg) => arg.parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid day count {:?}", arg);
            DEFAULT_DAYS
        }),
        None => DEFAULT_DAYS,
    };

    let config = ActivityConfig::default();
    let mut face = ActivityFace::setup(config);
    let mut motion = MockMotionGenerator::new();
    info!("Simulating {} day(s) from {}", days, START_DAY);

    let start = START_DAY.to_epoch_days();
    for day_index in 0..days {
        let day = CalendarDay::from_epoch_days(start + day_index as i64);

        for minute_of_day in 0..24 * 60 {
            let now = at(day, minute_of_day, 0);
            let absent = motion.motion_absent(day_index, minute_of_day);

            let advisory = face.advise(&now, absent);
            if advisory.wants_background_task {
                // The host gets around to it a few seconds later
                face.handle_event(FaceEvent::BackgroundTask, &at(day, minute_of_day, 12));
            }

            if minute_of_day == REVIEW_HOUR as u16 * 60 {
                info!("--- {} ---", now);
                review(&mut face, &now);
            }
        }
    }

    match face.snapshot() {
        Ok(bytes) => {
            info!("State snapshot: {} bytes", bytes.len());
            match ActivityState::from_snapshot(&bytes) {
                Ok(state) if &state == face.state() => info!("Snapshot restores cleanly"),
                Ok(_) => warn!("Restored state differs from the live state"),
                Err(e) => warn!("Snapshot restore failed: {}", e),
            }
        }
        Err(e) => warn!("Snapshot failed: {}", e),
    }

    info!("Simulator exiting");
}
