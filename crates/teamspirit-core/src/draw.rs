//! Draw engine: eligible-pool construction, uniform winner selection, and
//! cumulative winner history.
//!
//! The engine is stateless between calls apart from the [`DrawHistory`] it
//! owns. The eligible pool is derived fresh from the roster and the history
//! on every request -- never cached -- because the history grows between
//! draws. Selection is uniform over the pool: no weighting by history,
//! name, or insertion order, and identity is always the participant id,
//! never the display name.

use chrono::Utc;
use rand::Rng;
use teamspirit_types::{DrawRecord, Participant, ParticipantId};
use tracing::info;

/// Errors that can occur during a draw.
#[derive(Debug, thiserror::Error)]
pub enum DrawError {
    /// A draw was attempted with zero eligible candidates. Hosts check the
    /// pool size first and disable the draw action instead of hitting this
    /// mid-interaction.
    #[error("cannot draw from an empty candidate pool")]
    EmptyPool,
}

/// Append-only record of past winners, most recent first.
///
/// The history lives for the duration of the session. The only mutations
/// are [`record_winner`](Self::record_winner) (prepend one record) and
/// [`reset`](Self::reset) (atomically clear everything). Display order is
/// strictly reverse-chronological by insertion; there is no re-sorting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawHistory {
    records: Vec<DrawRecord>,
}

impl DrawHistory {
    /// Create an empty history.
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Prepend a record for the given winner, stamped with the current
    /// wall-clock time.
    pub fn record_winner(&mut self, winner: Participant) {
        info!(winner_id = %winner.id, winner = %winner.name, "Recorded draw winner");
        self.records.insert(
            0,
            DrawRecord {
                timestamp: Utc::now(),
                winner,
            },
        );
    }

    /// Atomically clear all records.
    ///
    /// Confirmation is the caller's concern; once invoked, the reset is
    /// unconditional.
    pub fn reset(&mut self) {
        info!(cleared = self.records.len(), "Draw history reset");
        self.records.clear();
    }

    /// Records in display order (most recent first).
    pub fn records(&self) -> &[DrawRecord] {
        &self.records
    }

    /// Number of recorded wins.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no wins have been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the given participant appears as a winner in any record.
    pub fn has_won(&self, id: ParticipantId) -> bool {
        self.records.iter().any(|record| record.winner.id == id)
    }
}

/// Derive the eligible candidate pool from the roster and the history.
///
/// With `allow_repeats` the pool is the full roster; otherwise it is the
/// roster minus every participant whose id already appears as a winner.
/// Relative roster order is preserved either way.
pub fn compute_eligible(
    roster: &[Participant],
    history: &DrawHistory,
    allow_repeats: bool,
) -> Vec<Participant> {
    if allow_repeats {
        return roster.to_vec();
    }
    roster
        .iter()
        .filter(|participant| !history.has_won(participant.id))
        .cloned()
        .collect()
}

/// Select one winner uniformly at random from the eligible pool.
///
/// Every pool member has equal selection probability.
///
/// # Errors
///
/// Returns [`DrawError::EmptyPool`] if the pool is empty.
pub fn draw(rng: &mut impl Rng, eligible: &[Participant]) -> Result<Participant, DrawError> {
    if eligible.is_empty() {
        return Err(DrawError::EmptyPool);
    }
    let index = rng.random_range(0..eligible.len());
    eligible.get(index).cloned().ok_or(DrawError::EmptyPool)
}
