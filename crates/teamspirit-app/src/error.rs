//! Error types for the TeamSpirit binary.
//!
//! [`AppError`] is the top-level error type that wraps all possible
//! failure modes during startup and command execution.

/// Top-level error for the TeamSpirit binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: teamspirit_core::config::ConfigError,
    },

    /// Roster construction failed.
    #[error("roster error: {source}")]
    Roster {
        /// The underlying roster error.
        #[from]
        source: teamspirit_core::roster::RosterError,
    },

    /// A draw failed.
    #[error("draw error: {source}")]
    Draw {
        /// The underlying draw error.
        #[from]
        source: teamspirit_core::draw::DrawError,
    },

    /// Group generation failed.
    #[error("grouping error: {source}")]
    Grouping {
        /// The underlying grouping error.
        #[from]
        source: teamspirit_core::grouping::GroupingError,
    },

    /// The reveal animation failed.
    #[error("spin error: {source}")]
    Spin {
        /// The underlying spin error.
        #[from]
        source: teamspirit_core::spin::SpinError,
    },

    /// Reading a roster file or writing an export failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
