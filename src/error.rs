//! Error types for the activity log

use thiserror_no_std::Error;

use crate::time::CalendarDay;

/// Errors reported by the activity log.
///
/// None of these are fatal: the tracker keeps running and the host decides
/// whether to surface them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActivityError {
    /// The requested day has not been committed yet or was overwritten
    #[error("No data recorded {days_back} day(s) back")]
    NoData {
        /// Days back from today that were requested
        days_back: u8,
    },

    /// A second daily commit was attempted before the next midnight
    #[error("Daily log already committed on {day}")]
    AlreadyCommitted {
        /// Calendar day of the earlier commit
        day: CalendarDay,
    },

    /// The state did not fit into the snapshot buffer
    #[error("Snapshot encoding failed")]
    SnapshotEncode,

    /// The snapshot bytes could not be decoded
    #[error("Snapshot decoding failed")]
    SnapshotDecode,
}

/// Result type for activity log operations
pub type ActivityResult<T> = Result<T, ActivityError>;
