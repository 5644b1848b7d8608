//! Fragment-based line breaking and multi-column/page layout for
//! em-unit text.
//!
//! This crate lays out a paragraph of running text into a sequence of
//! typographically well-shaped lines, computing for every input
//! character its horizontal and vertical placement, its width/height,
//! and the column/page it belongs to after pagination. It does not
//! shape glyphs, measure fonts, hyphenate dictionaries, or render
//! anything: those are external collaborators (see [`measure`] and
//! [`syllabifier`]), represented here only by their interfaces plus a
//! couple of ready-to-use stub implementations suitable for tests.
//!
//! # Pipeline
//!
//! Four components, in dependency order:
//!
//! 1. [`fragment`] (C3) turns raw text plus a per-character width
//!    vector into [`fragment::Fragments`], an atomic-unbreakable-run
//!    representation with inter-fragment spacing and end-of-line
//!    penalty widths.
//! 2. [`breaker`] (C4) runs a total-fit dynamic program — an online
//!    concave-minima (Galil-Park/SMAWK) search — over the fragments and
//!    a target-width schedule, minimizing a Knuth/Plass-style penalty
//!    to produce a [`breaker::BreakPlan`].
//! 3. [`position`] (C5) converts the chosen breaks into per-character
//!    `(x, dx, y, dy)` vectors, inserting hyphen and newline glyphs and
//!    optionally justifying each line.
//! 4. [`layout`] (C6) assigns the positioned lines of one or more
//!    paragraphs to columns and the columns to pages.
//!
//! # Example
//!
//! ```
//! use foliate::{breaker, fragment, measure::MonospaceFontOracle, position};
//!
//! let oracle = MonospaceFontOracle::default();
//! let fragments = fragment::make_fragments_default("Hello world, this is foliate.", &oracle)?;
//! let plan = breaker::break_lines(&fragments, &[12.0])?;
//! let positioned = position::position(&fragments, &plan, &oracle, &[12.0], false, 1.0, 10.0)?;
//! assert!(positioned.linebreaks.len() >= 1);
//! # Ok::<(), foliate::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod breaker;
pub mod error;
pub mod fragment;
pub mod layout;
pub mod measure;
pub mod position;
pub mod splitter;
pub mod syllabifier;

pub use error::{Error, Result};
pub use fragment::{make_fragments, make_fragments_default, Fragments};
pub use breaker::{break_lines, break_lines_with, indent_schedule, BreakPlan, Penalties};
pub use position::{position, position_with_indent, Positioned};
pub use layout::{PageConfig, Paginated};
