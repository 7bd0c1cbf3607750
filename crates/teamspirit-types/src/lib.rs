//! Shared type definitions for the TeamSpirit roster tools.
//!
//! This crate is the single source of truth for the types that cross the
//! boundary between the engines and their hosts. Types defined here flow
//! downstream to `TypeScript` via `ts-rs` for the browser frontend.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for participant identifiers
//! - [`records`] -- Entity structs (participant, draw record, group)

pub mod ids;
pub mod records;

// Re-export all public types at crate root for convenience.
pub use ids::ParticipantId;
pub use records::{DrawRecord, Group, Participant};
