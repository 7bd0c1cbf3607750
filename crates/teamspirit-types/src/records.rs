//! Core entity structs shared across the TeamSpirit workspace.
//!
//! Covers the participant record, the draw-history record, and the group
//! produced by a partition run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::ParticipantId;

// ---------------------------------------------------------------------------
// Participant
// ---------------------------------------------------------------------------

/// A single participant on the roster.
///
/// The `id` is assigned once at creation and is the sole basis for identity
/// comparisons. The `name` is display-only and may be duplicated across
/// participants; duplication is detectable but not prohibited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Participant {
    /// Immutable unique identifier.
    pub id: ParticipantId,
    /// Display name as entered by the host. Not validated or normalized.
    pub name: String,
}

impl Participant {
    /// Create a participant with a fresh identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ParticipantId::new(),
            name: name.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// DrawRecord
// ---------------------------------------------------------------------------

/// One past winner in the draw history.
///
/// Immutable once created. Records are kept most-recent-first and are only
/// ever removed by an explicit atomic history reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DrawRecord {
    /// Wall-clock instant at which the winner was committed.
    pub timestamp: DateTime<Utc>,
    /// The winning participant, captured as drawn.
    pub winner: Participant,
}

// ---------------------------------------------------------------------------
// Group
// ---------------------------------------------------------------------------

/// One group produced by a partition run.
///
/// The groups of a single run are complete, disjoint, and cover the roster.
/// A run's result set is replaced wholesale by the next run; groups are
/// never merged across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Group {
    /// Sequence number starting at 1, in the order windows were produced.
    pub id: u32,
    /// Members in shuffled order. Every window except possibly the last
    /// holds exactly the requested group size.
    pub members: Vec<Participant>,
}
