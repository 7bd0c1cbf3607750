//! Roster state: the ordered participant list under management.
//!
//! The roster is an explicitly owned value held by the host. All mutation
//! goes through the methods here; the engines only ever receive an
//! immutable [`participants`](Roster::participants) view, so "engines never
//! mutate the roster" is a compile-time fact rather than a convention.
//!
//! Insertion order is preserved for display. Participant IDs are unique
//! within a roster (enforced on insertion); display names may repeat, and
//! duplicate names are flagged rather than rejected.

use std::collections::{BTreeMap, BTreeSet};

use teamspirit_types::{Participant, ParticipantId};
use tracing::debug;

/// Errors that can occur during roster mutation.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    /// A participant was inserted with an id already present on the roster.
    #[error("duplicate participant id: {0}")]
    DuplicateId(ParticipantId),
}

/// Normalize a display name for duplicate comparison: trim surrounding
/// whitespace and lowercase.
///
/// This is the single normalization rule shared by duplicate flagging
/// ([`Roster::name_counts`]) and duplicate removal
/// ([`Roster::dedupe_by_name`]), so the two can never disagree on what
/// counts as a duplicate.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// The ordered participant list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    /// Create an empty roster.
    pub const fn new() -> Self {
        Self {
            participants: Vec::new(),
        }
    }

    /// Build a roster from pre-existing participant records.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::DuplicateId`] if two records share an id.
    pub fn from_participants(participants: Vec<Participant>) -> Result<Self, RosterError> {
        let mut seen = BTreeSet::new();
        for participant in &participants {
            if !seen.insert(participant.id) {
                return Err(RosterError::DuplicateId(participant.id));
            }
        }
        Ok(Self { participants })
    }

    /// Append a new participant with a freshly assigned id. Returns the id.
    pub fn add(&mut self, name: impl Into<String>) -> ParticipantId {
        let participant = Participant::new(name);
        let id = participant.id;
        self.participants.push(participant);
        id
    }

    /// Append one participant for each name in the iterator. Returns the
    /// number of participants added.
    pub fn extend_names<I>(&mut self, names: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut added: usize = 0;
        for name in names {
            let _ = self.add(name);
            added = added.saturating_add(1);
        }
        added
    }

    /// Insert an existing participant record, preserving its id.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::DuplicateId`] if the id is already present.
    pub fn insert(&mut self, participant: Participant) -> Result<(), RosterError> {
        if self.contains(participant.id) {
            return Err(RosterError::DuplicateId(participant.id));
        }
        self.participants.push(participant);
        Ok(())
    }

    /// Remove the participant with the given id, if present.
    pub fn remove(&mut self, id: ParticipantId) -> Option<Participant> {
        let index = self.participants.iter().position(|p| p.id == id)?;
        Some(self.participants.remove(index))
    }

    /// Remove all participants.
    pub fn clear(&mut self) {
        self.participants.clear();
    }

    /// Number of participants on the roster.
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Whether a participant with the given id is on the roster.
    pub fn contains(&self, id: ParticipantId) -> bool {
        self.participants.iter().any(|p| p.id == id)
    }

    /// Immutable view of the participants in insertion order. This is the
    /// form the draw and grouping engines consume.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Count participants per normalized name.
    ///
    /// A count greater than 1 marks every participant bearing that name as
    /// a duplicate.
    pub fn name_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for participant in &self.participants {
            counts
                .entry(normalize_name(&participant.name))
                .and_modify(|count: &mut usize| *count = count.saturating_add(1))
                .or_insert(1_usize);
        }
        counts
    }

    /// Whether any normalized name appears more than once.
    pub fn has_duplicate_names(&self) -> bool {
        self.name_counts().values().any(|&count| count > 1)
    }

    /// Whether the given display name is shared (after normalization) by
    /// more than one participant.
    pub fn is_duplicate_name(&self, name: &str) -> bool {
        self.name_counts()
            .get(&normalize_name(name))
            .is_some_and(|&count| count > 1)
    }

    /// Remove participants whose normalized name repeats an earlier entry,
    /// keeping the first occurrence of each name. Returns the number of
    /// participants removed.
    pub fn dedupe_by_name(&mut self) -> usize {
        let before = self.participants.len();
        let mut seen = BTreeSet::new();
        self.participants
            .retain(|p| seen.insert(normalize_name(&p.name)));
        let removed = before.saturating_sub(self.participants.len());
        if removed > 0 {
            debug!(removed, remaining = self.participants.len(), "Removed duplicate names");
        }
        removed
    }
}
