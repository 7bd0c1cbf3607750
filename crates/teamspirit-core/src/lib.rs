//! Roster state and the randomization engines for TeamSpirit.
//!
//! This crate owns the two algorithms with real invariants: the prize draw
//! (eligible-pool construction, uniform selection, winner history) and the
//! group partition (unbiased shuffle, fixed-size windows). It also owns
//! the roster the engines read and the reveal state machine that paces the
//! draw animation.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `teamspirit.yaml` into
//!   strongly-typed structs.
//! - [`draw`] -- Eligible-pool derivation, uniform winner selection, and
//!   the append-only [`DrawHistory`].
//! - [`grouping`] -- Fisher--Yates shuffle and window partition.
//! - [`roster`] -- The owned, explicitly-passed participant list with
//!   duplicate detection and dedupe.
//! - [`spin`] -- The `Idle -> Spinning -> Committed` reveal machine and
//!   its async driver.
//!
//! [`DrawHistory`]: draw::DrawHistory

pub mod config;
pub mod draw;
pub mod grouping;
pub mod roster;
pub mod spin;

// Re-export primary types at crate root.
pub use config::{AppConfig, ConfigError, SpinSchedule};
pub use draw::{DrawError, DrawHistory};
pub use grouping::GroupingError;
pub use roster::{Roster, RosterError};
pub use spin::{SpinError, SpinMachine, SpinObserver, SpinPhase};
