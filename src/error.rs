//! Crate-wide error taxonomy.
//!
//! Every fatal validation condition raised by [`crate::fragment`],
//! [`crate::breaker`], [`crate::position`], or [`crate::layout`] is
//! reported through this single enum. All variants are fatal for the
//! current call and carry enough context to build a diagnostic message;
//! none are recoverable internally (recoverable conditions, such as
//! division-by-zero during justification, are handled locally and never
//! surface as an `Error`).

use thiserror::Error;

/// Errors raised while fragmenting, breaking, positioning, or laying out
/// text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The input text had zero length.
    #[error("input text is empty")]
    EmptyText,

    /// The text started with non-tab whitespace, or ended with any
    /// whitespace.
    #[error("input text cannot start with non-tab whitespace or end with whitespace")]
    BadWhitespace,

    /// The measurement oracle returned a width vector whose length does
    /// not match the character count of the input text.
    #[error("measured width vector has length {measured}, expected {expected}")]
    LengthMismatch {
        /// Length returned by the oracle.
        measured: usize,
        /// Number of characters in the input text.
        expected: usize,
    },

    /// The splitter produced overlapping or out-of-order spans, or did
    /// not cover position 0 or position `n`.
    #[error("splitter produced invalid spans: {reason}")]
    BadSpans {
        /// Human-readable description of the violated invariant.
        reason: String,
    },

    /// The target-width schedule contained a non-positive or non-finite
    /// value, or `max_lines_per_column`/`columns_per_page` was empty or
    /// zero where no degenerate case applies. Note that a `0` entry in
    /// `max_lines_per_column` itself is *not* an error: per the layout's
    /// failure semantics, it degenerates to an unbounded single column
    /// rather than being rejected (see `layout::PageConfig`).
    #[error("invalid width/column schedule: {reason}")]
    InvalidSchedule {
        /// Human-readable description of the offending value.
        reason: String,
    },

    /// Positioning was invoked with a measurer that cannot supply font
    /// vertical metrics (e.g. a constant-width stub).
    #[error("positioning requires a font-backed measurement oracle")]
    OracleRequired,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
