//! The Measurement Oracle (C1): an external collaborator that returns
//! per-character advance widths in em units and font vertical metrics.
//!
//! Glyph shaping and font metrics are explicitly out of scope for this
//! crate (see the crate-level docs); what lives here is the *interface*
//! a real shaper must satisfy, plus two ready-to-use stub oracles
//! (monospace and, behind `unicode-width`, Unicode-aware) suitable for
//! tests and for callers that don't have a real font handy.

/// Font vertical metrics, in font units, as returned by a real shaper.
///
/// `line_gap = ascender - descender` is the quantity the positioner
/// actually needs; it is derived rather than stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontExtents {
    /// Ascender, in em units (already divided by the font's `em`).
    pub ascender: f32,
    /// Descender, in em units. Typically negative.
    pub descender: f32,
}

impl FontExtents {
    /// The vertical distance between two successive baselines at
    /// `line_spacing = 1.0`.
    #[must_use]
    pub fn line_gap(&self) -> f32 {
        self.ascender - self.descender
    }
}

/// Returns per-character advance widths (in em units) and font vertical
/// metrics for a piece of text.
///
/// # Cluster redistribution
///
/// A real implementation backed by a shaping engine must honor this
/// rule: if glyph shaping merges several code units into fewer glyphs,
/// the merged glyphs' total advance is split *equally* among the merged
/// code units. If a single code unit decomposes into multiple glyphs,
/// their advances are summed back onto that code unit. Implementers
/// must reproduce this byte-for-byte; it is a policy choice, not a
/// derivable truth (see the crate's design notes).
///
/// Implementations must be safe to call from multiple threads
/// concurrently: independent paragraphs may be fragmented/positioned by
/// independent workers sharing a single oracle.
pub trait MeasurementOracle: Send + Sync {
    /// Advance width, in em units, of every character of `text`. The
    /// returned vector must have exactly `text.chars().count()` entries.
    fn character_widths(&self, text: &str) -> Vec<f32>;

    /// Font vertical metrics for this oracle. Returns `None` for
    /// oracles that cannot supply real font metrics (e.g. a pure
    /// constant-width stub); [`crate::position::position`] reports
    /// [`crate::Error::OracleRequired`] in that case.
    fn font_extents(&self) -> Option<FontExtents>;
}

/// A trivial oracle assigning every character a width of exactly one
/// em, and no real font metrics. Useful for tests and for
/// character-count-based scenarios (e.g. "Hello world." at width 1
/// em/char).
#[derive(Debug, Clone, Copy, Default)]
pub struct MonospaceOracle;

impl MeasurementOracle for MonospaceOracle {
    fn character_widths(&self, text: &str) -> Vec<f32> {
        vec![1.0; text.chars().count()]
    }

    fn font_extents(&self) -> Option<FontExtents> {
        None
    }
}

/// A monospace oracle that additionally reports font vertical metrics,
/// for exercising the positioner without a real font.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceFontOracle {
    /// Metrics to report from [`MeasurementOracle::font_extents`].
    pub extents: FontExtents,
}

impl Default for MonospaceFontOracle {
    fn default() -> Self {
        MonospaceFontOracle {
            extents: FontExtents {
                ascender: 0.8,
                descender: -0.2,
            },
        }
    }
}

impl MeasurementOracle for MonospaceFontOracle {
    fn character_widths(&self, text: &str) -> Vec<f32> {
        vec![1.0; text.chars().count()]
    }

    fn font_extents(&self) -> Option<FontExtents> {
        Some(self.extents)
    }
}

/// A Unicode-aware stub oracle using the `unicode-width` crate to
/// approximate per-character display widths (1 column = 1 em), with
/// double-width (CJK, emoji) characters counted as 2 ems.
#[cfg(feature = "unicode-width")]
#[derive(Debug, Clone, Copy)]
pub struct UnicodeOracle {
    /// Metrics to report from [`MeasurementOracle::font_extents`].
    pub extents: FontExtents,
}

#[cfg(feature = "unicode-width")]
impl Default for UnicodeOracle {
    fn default() -> Self {
        UnicodeOracle {
            extents: FontExtents {
                ascender: 0.8,
                descender: -0.2,
            },
        }
    }
}

#[cfg(feature = "unicode-width")]
impl MeasurementOracle for UnicodeOracle {
    fn character_widths(&self, text: &str) -> Vec<f32> {
        text.chars()
            .map(|c| unicode_width::UnicodeWidthChar::width(c).unwrap_or(0) as f32)
            .collect()
    }

    fn font_extents(&self) -> Option<FontExtents> {
        Some(self.extents)
    }
}
