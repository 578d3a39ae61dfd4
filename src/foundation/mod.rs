//! Shared error taxonomy and run options.

/// Error type and result alias.
pub mod error;
/// Run-wide option flags.
pub mod options;
