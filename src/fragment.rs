//! The Fragmenter (C3): turns raw text plus a per-character width
//! vector into [`Fragments`], the columnar representation the breaker
//! and positioner operate on.
//!
//! Fragments are dense parallel arrays (`Vec<f32>`/`Vec<i32>`) rather
//! than a per-item `Fragment` trait object, since the breaker and
//! positioner both want contiguous numeric columns, not virtual dispatch
//! per fragment.

use crate::error::{Error, Result};
use crate::measure::MeasurementOracle;
use crate::splitter::{Span, Splitter, WhitespaceSplitter};

/// Default tab width, in ems, used by [`make_fragments_default`].
pub const DEFAULT_TAB_WIDTH: f32 = 4.0;

/// Sentinel `whitespace_width` forced onto the fragment preceding an
/// explicit newline, so that breaking there is always cheaper than
/// overflowing a line. Large enough to dominate any realistic
/// `OVERFLOW_PEN * target` product; the exact value is not otherwise
/// significant (see the crate's design notes).
pub const FORCED_BREAK_SENTINEL: f32 = 100_000.0;

/// Sentinel `penalty_width` marking a forced break (paragraph end or
/// explicit newline).
pub const FORCED_BREAK_PENALTY: f32 = -1.0;

/// Columnar, atomic-unbreakable-run representation of a piece of text,
/// ready for the breaker.
///
/// All per-fragment vectors (`widths`, `whitespace_widths`,
/// `penalty_widths`, `starts`, `ends`) have the same length `m`. The
/// per-character vectors (`ch_widths`, `ws_mask`) have length
/// `text.chars().count()`.
#[derive(Debug, Clone)]
pub struct Fragments {
    /// Source text. Never mutated once fragmented; the positioner
    /// reads it by character index to reconstruct augmented output.
    pub text: String,
    /// Width of fragment `k`, used when it is not at end of line.
    pub widths: Vec<f32>,
    /// Spacing following fragment `k` when it is not at end of line.
    pub whitespace_widths: Vec<f32>,
    /// Width contribution of fragment `k` when it *is* at end of
    /// line. Positive: flagged/hyphenation break. Zero: neutral.
    /// Negative (always `-1`): forced break.
    pub penalty_widths: Vec<f32>,
    /// Character index at which fragment `k` starts.
    pub starts: Vec<i32>,
    /// Character index at which fragment `k` ends (exclusive).
    pub ends: Vec<i32>,
    /// Per-character advance widths, in ems, after tab/newline
    /// overrides (tab cells get `tab_width`, newlines get `0`).
    pub ch_widths: Vec<f32>,
    /// Per-character indicator, 1 iff the character is inter-fragment
    /// whitespace, built by cumulative sums of +1 at fragment ends and
    /// -1 at the next fragment's start.
    pub ws_mask: Vec<i32>,
    /// Width of a single hyphen glyph, in ems, as measured by the
    /// oracle that produced this value.
    pub hyphen_width: f32,
    /// Tab width, in ems, used for every tab character in `text`.
    pub tab_width: f32,
}

impl Fragments {
    /// Number of fragments, `m`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    /// True iff there are no fragments (never true for a successfully
    /// constructed value, since empty text is rejected up front).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Number of characters, `n`, in the source text.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.ch_widths.len()
    }

    /// Width of a candidate line covering fragments `[i, j)`, per the
    /// breaker's `W(i,j)` definition: full width and whitespace for
    /// every fragment but the last, plus the last fragment's width and
    /// its penalty width if that penalty is positive (a drawn hyphen).
    #[must_use]
    pub fn line_width(&self, i: usize, j: usize) -> f32 {
        debug_assert!(i < j && j <= self.len());
        let mut total = 0.0;
        for k in i..j - 1 {
            total += self.widths[k] + self.whitespace_widths[k];
        }
        total += self.widths[j - 1];
        let penalty = self.penalty_widths[j - 1];
        if penalty > 0.0 {
            total += penalty;
        }
        total
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum SpanKind {
    Word,
    Tab,
    Newline,
}

/// Builds [`Fragments`] from `text` using the default splitter
/// ([`WhitespaceSplitter`]) and [`DEFAULT_TAB_WIDTH`].
pub fn make_fragments_default(text: &str, measure: &dyn MeasurementOracle) -> Result<Fragments> {
    make_fragments(text, measure, &WhitespaceSplitter, DEFAULT_TAB_WIDTH)
}

/// Builds [`Fragments`] from `text`, a [`MeasurementOracle`], a
/// [`Splitter`] producing the visible (non-whitespace) spans, and a
/// tab width in ems.
///
/// `text` must be non-empty, must not start with non-tab whitespace,
/// and must not end with any whitespace.
pub fn make_fragments(
    text: &str,
    measure: &dyn MeasurementOracle,
    splitter: &dyn Splitter,
    tab_width: f32,
) -> Result<Fragments> {
    if text.is_empty() {
        return Err(Error::EmptyText);
    }

    let chars: Vec<char> = text.chars().collect();
    let n = chars.len();

    let starts_non_tab_whitespace = chars[0].is_whitespace() && chars[0] != '\t';
    let ends_whitespace = chars[n - 1].is_whitespace();
    if starts_non_tab_whitespace || ends_whitespace {
        return Err(Error::BadWhitespace);
    }

    let mut w = measure.character_widths(text);
    if w.len() != n {
        return Err(Error::LengthMismatch {
            measured: w.len(),
            expected: n,
        });
    }

    let visible_spans = splitter.split(text);
    validate_spans(&visible_spans, n, false)?;

    let mut all: Vec<(usize, usize, SpanKind)> = visible_spans
        .into_iter()
        .map(|(s, e)| (s, e, SpanKind::Word))
        .collect();

    for (pos, ch) in chars.iter().enumerate() {
        match ch {
            '\t' => {
                w[pos] = tab_width;
                all.push((pos, pos + 1, SpanKind::Tab));
            }
            '\n' => {
                w[pos] = 0.0;
                all.push((pos, pos + 1, SpanKind::Newline));
            }
            _ => {}
        }
    }
    all.sort_by_key(|&(s, _, _)| s);

    let merged_spans: Vec<Span> = all.iter().map(|&(s, e, _)| (s, e)).collect();
    validate_spans(&merged_spans, n, true)?;

    let m = all.len();
    let starts: Vec<i32> = all.iter().map(|&(s, _, _)| s as i32).collect();
    let ends: Vec<i32> = all.iter().map(|&(_, e, _)| e as i32).collect();

    // Prefix sum of per-character widths, for O(1) range sums.
    let mut cw = vec![0.0f32; n + 1];
    for i in 0..n {
        cw[i + 1] = cw[i] + w[i];
    }

    let mut widths = vec![0.0f32; m];
    let mut whitespace_widths = vec![0.0f32; m];
    for k in 0..m {
        let (s, e, _) = all[k];
        widths[k] = cw[e] - cw[s];
        whitespace_widths[k] = if k + 1 < m {
            let (next_s, _, _) = all[k + 1];
            cw[next_s] - cw[e]
        } else {
            0.0
        };
    }

    // ws_mask: +1 at each fragment's end, -1 at the next fragment's
    // start, cumulated. 1 inside an inter-fragment gap, 0 inside a
    // fragment's own characters.
    let mut delta = vec![0i32; n + 1];
    for k in 0..m {
        delta[ends[k] as usize] += 1;
    }
    for k in 0..m.saturating_sub(1) {
        delta[starts[k + 1] as usize] -= 1;
    }
    let mut ws_mask = vec![0i32; n];
    let mut acc = 0i32;
    for i in 0..n {
        acc += delta[i];
        ws_mask[i] = acc;
    }

    let hyphen_width = measure
        .character_widths("-")
        .first()
        .copied()
        .unwrap_or(0.0);

    let mut penalty_widths = vec![0.0f32; m];
    for k in 0..m {
        if k + 1 < m {
            let end_k = ends[k] as usize;
            if ws_mask[end_k] == 0 {
                penalty_widths[k] = hyphen_width;
            }
        }
    }
    // The paragraph always ends in a forced break.
    penalty_widths[m - 1] = FORCED_BREAK_PENALTY;

    for k in 0..m {
        match all[k].2 {
            SpanKind::Newline => {
                // k > 0 always holds: the first character of `text`
                // can never be a newline (BadWhitespace rejects it).
                whitespace_widths[k - 1] = FORCED_BREAK_SENTINEL;
                penalty_widths[k - 1] = FORCED_BREAK_PENALTY;
            }
            SpanKind::Tab => {
                whitespace_widths[k] = 0.0;
                penalty_widths[k] = 0.0;
            }
            SpanKind::Word => {}
        }
    }

    Ok(Fragments {
        text: text.to_string(),
        widths,
        whitespace_widths,
        penalty_widths,
        starts,
        ends,
        ch_widths: w,
        ws_mask,
        hyphen_width,
        tab_width,
    })
}

/// Checks the ordering/overlap invariants every span set must satisfy.
///
/// When `require_coverage` is set, also checks the invariant from §3 that
/// the fragment set must start at position `0` and end at position `n`
/// (the merged, tab/newline-augmented span set, not the splitter's raw
/// visible spans, which legitimately may not touch either boundary, e.g.
/// a leading tab or a word followed by trailing whitespace).
fn validate_spans(spans: &[Span], n: usize, require_coverage: bool) -> Result<()> {
    if require_coverage {
        match spans.first() {
            Some(&(0, _)) => {}
            Some(&(s, _)) => {
                return Err(Error::BadSpans {
                    reason: format!("span set starts at {s}, not position 0"),
                });
            }
            None => {
                return Err(Error::BadSpans {
                    reason: "span set is empty and does not cover position 0".to_string(),
                });
            }
        }
        match spans.last() {
            Some(&(_, e)) if e == n => {}
            Some(&(_, e)) => {
                return Err(Error::BadSpans {
                    reason: format!("span set ends at {e}, not text length {n}"),
                });
            }
            None => {
                return Err(Error::BadSpans {
                    reason: format!("span set is empty and does not cover position {n}"),
                });
            }
        }
    }

    let mut prev_end = 0usize;
    for &(s, e) in spans {
        if s >= e {
            return Err(Error::BadSpans {
                reason: format!("span start {s} is not strictly before its end {e}"),
            });
        }
        if s < prev_end {
            return Err(Error::BadSpans {
                reason: format!("span starting at {s} overlaps the previous span ending at {prev_end}"),
            });
        }
        if e > n {
            return Err(Error::BadSpans {
                reason: format!("span end {e} exceeds text length {n}"),
            });
        }
        prev_end = e;
    }
    Ok(())
}
