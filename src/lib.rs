//! Daily activity logger for a segment-LCD wristwatch.
//!
//! Counts active minutes from a once-per-minute motion signal, keeps a
//! 24-slot hourly log and a fixed-length daily log, and renders a day page
//! plus histogram statistics over the last 12 hours or 12 days. Everything
//! lives in fixed-size arrays; there is no heap.

#![no_std]

pub mod config;
pub mod error;
pub mod face;
pub mod render;
pub mod rollover;
pub mod sampling;
pub mod state;
pub mod stats;
pub mod storage;
pub mod time;
pub mod view;


pub use config::ActivityConfig;
pub use error::{ActivityError, ActivityResult};
pub use face::{ActivityFace, EventResult, FaceEvent};
pub use render::Frame;
pub use state::{ActivityState, Advisory};
pub use time::LocalDateTime;
pub use view::Input;
