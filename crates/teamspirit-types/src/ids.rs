//! Type-safe identifier wrapper around [`Uuid`].
//!
//! Every participant carries a strongly-typed ID assigned once at creation
//! time by the host. Identity comparisons (eligibility filtering, removal,
//! "has this participant already won") always go through the ID, never the
//! display name. IDs use UUID v7 (time-ordered) so a roster sorted by ID is
//! also sorted by creation time.
//!
//! Group numbers are deliberately NOT UUIDs: a partition result labels its
//! groups with small sequence numbers starting at 1, so those live as plain
//! `u32` fields on [`Group`](crate::Group).

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Unique identifier for a participant on the roster.
///
/// Assigned at creation time and immutable thereafter. Uniqueness within a
/// roster is a hard invariant enforced on insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ParticipantId(pub Uuid);

impl ParticipantId {
    /// Create a new identifier using UUID v7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for ParticipantId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ParticipantId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<ParticipantId> for Uuid {
    fn from(id: ParticipantId) -> Self {
        id.0
    }
}
