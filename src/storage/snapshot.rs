//! Compact binary snapshot of the activity state.
//!
//! The core does not persist anything on its own. Hosts with a state
//! retention facility (backup RAM, a flash page) can store the snapshot and
//! hand it back after a reset. The encoding is postcard over the serde
//! derives of [`ActivityState`].

use log::{debug, warn};

use crate::config::SNAPSHOT_MAX_BYTES;
use crate::error::{ActivityError, ActivityResult};
use crate::state::ActivityState;

impl ActivityState {
    /// Encode into a fixed-capacity buffer.
    pub fn to_snapshot(&self) -> ActivityResult<heapless::Vec<u8, SNAPSHOT_MAX_BYTES>> {
        let mut buf = [0u8; SNAPSHOT_MAX_BYTES];
        let used = postcard::to_slice(self, &mut buf).map_err(|e| {
            warn!(" Snapshot encoding failed: {}", e);
            ActivityError::SnapshotEncode
        })?;
        debug!(" Snapshot encoded ({} bytes)", used.len());
        heapless::Vec::from_slice(used).map_err(|_| ActivityError::SnapshotEncode)
    }

    /// Decode a snapshot produced by [`ActivityState::to_snapshot`].
    pub fn from_snapshot(bytes: &[u8]) -> ActivityResult<Self> {
        postcard::from_bytes(bytes).map_err(|e| {
            warn!(" Snapshot decoding failed: {}", e);
            ActivityError::SnapshotDecode
        })
    }
}
