//! Fixed-capacity activity history.
//!
//! Two rings are kept side by side:
//!
//! - [`HourlyRing`]: 24 counters indexed by hour of day, each reset at the
//!   start of its hour. Feeds the "last 12 hours" window.
//! - [`DailyRing`]: one total per committed day, oldest overwritten once the
//!   ring is full. Feeds the day pages and the "last 12 days" window.
//!
//! Neither ring allocates; both serialize into the state snapshot.

pub mod daily;
pub mod hourly;
pub mod snapshot;

pub use daily::DailyRing;
pub use hourly::HourlyRing;
