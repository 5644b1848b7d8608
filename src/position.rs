//! The Positioner (C5): turns a [`Fragments`] value and a [`BreakPlan`]
//! into per-character `(x, dx, y, dy)` vectors, inserting hyphen and
//! newline glyphs and optionally justifying each line.
//!
//! The augmented output (original characters plus injected hyphens and
//! newlines) is built with a single forward pass per line over an index
//! map into the source text, rather than string concatenation.

use crate::breaker::BreakPlan;
use crate::error::{Error, Result};
use crate::fragment::Fragments;
use crate::measure::MeasurementOracle;

/// Index into the two-entry sentinel table prepended ahead of the
/// source text: position `0` is the injected newline, position `1` is
/// the injected hyphen.
const NEWLINE_SENTINEL: usize = 0;
const HYPHEN_SENTINEL: usize = 1;

/// Output of the positioner: per-character placement vectors, all the
/// same length as `text`, already scaled by `fontsize`.
#[derive(Debug, Clone)]
pub struct Positioned {
    /// The (possibly hyphen/newline-augmented) text.
    pub text: String,
    /// Horizontal position of each character's left edge.
    pub x: Vec<f32>,
    /// Horizontal advance of each character.
    pub dx: Vec<f32>,
    /// Vertical baseline position of each character.
    pub y: Vec<f32>,
    /// Line height contribution of each character (constant, equal to
    /// the font's line gap, for every character of the paragraph).
    pub dy: Vec<f32>,
    /// Positions, in `text`, of every inserted line-break character
    /// except the final line's (there is nothing after it). Consumed
    /// by [`crate::layout`] to find column-splitting candidates.
    pub linebreaks: Vec<usize>,
}

impl Positioned {
    /// Number of characters in the positioned output.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// True iff there are no characters (never true in practice, since
    /// fragmenting rejects empty input).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Materializes `fragments`/`plan` into a [`Positioned`] value, using
/// the default (no) paragraph indent.
pub fn position(
    fragments: &Fragments,
    plan: &BreakPlan,
    measure: &dyn MeasurementOracle,
    width_schedule: &[f32],
    justify: bool,
    line_spacing: f32,
    fontsize: f32,
) -> Result<Positioned> {
    position_with_indent(fragments, plan, measure, width_schedule, justify, line_spacing, fontsize, 0.0)
}

/// Like [`position`], but shifts the first line's drawn x-origin by
/// `paragraph_indent` ems, for a hanging or first-line indent.
///
/// `width_schedule` is read as-is for the justification target of each
/// line; it is *not* adjusted here. If the indent should also influence
/// where the breaker places line breaks (matching the reference
/// implementation's behavior, not just a cosmetic shift), build
/// `width_schedule` with [`crate::breaker::indent_schedule`] and pass
/// the same adjusted schedule to both `break_lines`/`break_lines_with`
/// and this function.
#[allow(clippy::too_many_arguments)]
pub fn position_with_indent(
    fragments: &Fragments,
    plan: &BreakPlan,
    measure: &dyn MeasurementOracle,
    width_schedule: &[f32],
    justify: bool,
    line_spacing: f32,
    fontsize: f32,
    paragraph_indent: f32,
) -> Result<Positioned> {
    let extents = measure.font_extents().ok_or(Error::OracleRequired)?;

    let default_target = *width_schedule.last().ok_or_else(|| Error::InvalidSchedule {
        reason: "width schedule must contain at least one entry".to_string(),
    })?;
    for &target in width_schedule {
        if !target.is_finite() || target <= 0.0 {
            return Err(Error::InvalidSchedule {
                reason: format!("target width {target} is not a positive, finite value"),
            });
        }
    }

    let l = plan.num_lines();
    let targets: Vec<f32> = (0..l)
        .map(|k| width_schedule.get(k).copied().unwrap_or(default_target))
        .collect();

    // Character-index line bounds, with the leading-newline correction:
    // a line immediately following a forced break always starts with
    // the real newline character that forced it; skip it.
    let mut line_starts = vec![0usize; l];
    let mut line_ends = vec![0usize; l];
    for k in 0..l {
        let (fi, fj) = plan.line(k);
        line_starts[k] = fragments.starts[fi] as usize;
        line_ends[k] = fragments.ends[fj - 1] as usize;
    }
    for k in 1..l {
        if plan.forced_mask[k - 1] {
            line_starts[k] += 1;
        }
    }

    let chars: Vec<char> = fragments.text.chars().collect();
    let src_char = |idx: usize| -> char {
        match idx {
            NEWLINE_SENTINEL => '\n',
            HYPHEN_SENTINEL => '-',
            i => chars[i - 2],
        }
    };
    let src_width = |idx: usize| -> f32 {
        match idx {
            NEWLINE_SENTINEL => 0.0,
            HYPHEN_SENTINEL => fragments.hyphen_width,
            i => fragments.ch_widths[i - 2],
        }
    };
    let src_is_whitespace = |idx: usize| -> bool {
        match idx {
            NEWLINE_SENTINEL | HYPHEN_SENTINEL => false,
            i => fragments.ws_mask[i - 2] != 0,
        }
    };

    let mut out_src: Vec<usize> = Vec::with_capacity(fragments.char_len() + 2 * l);
    let mut linebreaks: Vec<usize> = Vec::with_capacity(l.saturating_sub(1));
    let mut line_out_start: Vec<usize> = Vec::with_capacity(l);

    for k in 0..l {
        line_out_start.push(out_src.len());
        for pos in line_starts[k]..line_ends[k] {
            out_src.push(pos + 2);
        }
        if plan.hyphen_mask[k] {
            out_src.push(HYPHEN_SENTINEL);
        }
        if k + 1 < l {
            out_src.push(NEWLINE_SENTINEL);
            linebreaks.push(out_src.len() - 1);
        }
    }

    let total = out_src.len();
    let mut dx: Vec<f32> = out_src.iter().map(|&idx| src_width(idx)).collect();

    // Y coordinates: one step of -line_gap * line_spacing at each
    // line boundary, plus a uniform descender offset.
    let line_gap = extents.line_gap();
    let mut y = vec![0.0f32; total];
    {
        let step = -line_gap * line_spacing;
        let mut acc = 0.0f32;
        let mut next = linebreaks.iter().copied().peekable();
        for (i, y_i) in y.iter_mut().enumerate() {
            if next.peek() == Some(&i) {
                acc += step;
                next.next();
            }
            *y_i = acc;
        }
        for y_i in y.iter_mut() {
            *y_i += extents.descender;
        }
    }
    let dy = vec![line_gap; total];

    let line_full_end = |k: usize| -> usize {
        if k + 1 < l {
            line_out_start[k + 1]
        } else {
            total
        }
    };

    if justify {
        for k in 0..l {
            if plan.forced_mask[k] {
                continue;
            }
            let start = line_out_start[k];
            let end = line_full_end(k);

            let mut line_width = 0.0f32;
            let mut ws_width = 0.0f32;
            for &idx in &out_src[start..end] {
                let w = src_width(idx);
                line_width += w;
                if src_is_whitespace(idx) {
                    ws_width += w;
                }
            }

            let factor = if ws_width != 0.0 {
                (targets[k] - line_width) / ws_width
            } else {
                0.0
            };
            let factor = if factor.is_finite() { factor } else { 0.0 };

            if factor != 0.0 {
                for i in start..end {
                    if src_is_whitespace(out_src[i]) {
                        dx[i] += factor * dx[i];
                    }
                }
            }
        }
    }

    let mut x = vec![0.0f32; total];
    {
        let mut acc = 0.0f32;
        for i in 0..total {
            x[i] = acc;
            acc += dx[i];
        }
    }

    // Reset each line to start at x = 0.
    for k in 0..l {
        let start = line_out_start[k];
        let end = line_full_end(k);
        let base = x[start];
        if base != 0.0 {
            for x_i in &mut x[start..end] {
                *x_i -= base;
            }
        }
    }

    if paragraph_indent != 0.0 {
        let end = line_full_end(0);
        for x_i in &mut x[0..end] {
            *x_i += paragraph_indent;
        }
    }

    for x_i in &mut x {
        *x_i *= fontsize;
    }
    for dx_i in &mut dx {
        *dx_i *= fontsize;
    }
    let y: Vec<f32> = y.into_iter().map(|v| v * fontsize).collect();
    let dy: Vec<f32> = dy.into_iter().map(|v| v * fontsize).collect();

    let text: String = out_src.iter().map(|&idx| src_char(idx)).collect();

    Ok(Positioned {
        text,
        x,
        dx,
        y,
        dy,
        linebreaks,
    })
}
