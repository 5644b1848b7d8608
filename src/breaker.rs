//! The Breaker (C4): runs the total-fit dynamic program over
//! [`Fragments`] and a target-width schedule, producing a [`BreakPlan`].
//!
//! The concave-minima search is delegated to `smawk::online_column_minima`
//! — the online Galil-Park/SMAWK state machine — with a `LineNumbers`
//! memoization cache so a candidate line's number (needed to index the
//! width schedule) never costs more than O(1) amortized to look up.

use std::cell::RefCell;

use crate::error::{Error, Result};
use crate::fragment::Fragments;

/// Per-line-overflow penalty, applied per em of overflow.
pub const OVERFLOW_PEN: f32 = 1000.0;
/// Flat penalty charged for every line, discouraging unnecessary lines.
pub const N_LINE_PENALTY: f32 = 1000.0;
/// A last line shorter than `target / SHORT_LAST_FRACTION` is penalized.
pub const SHORT_LAST_FRACTION: f32 = 10.0;
/// Penalty added when the last line is short (see [`SHORT_LAST_FRACTION`]).
pub const SHORT_LAST_PENALTY: f32 = 25.0;
/// Penalty added when a line ends in a flagged (hyphenation) break.
pub const HYPHEN_PENALTY: f32 = 25.0;

/// Tunable penalty constants for [`break_lines`].
///
/// Public fields, so that callers can retune the breaker for proportional
/// fonts or different aesthetic preferences without forking the
/// algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penalties {
    /// Per-em cost charged for every em a line overflows its target.
    pub overflow_pen: f32,
    /// Flat per-line cost.
    pub n_line_penalty: f32,
    /// Fraction of the target width below which a single-fragment last
    /// line is considered "too short".
    pub short_last_fraction: f32,
    /// Penalty added for a too-short last line.
    pub short_last_penalty: f32,
    /// Penalty added for a line ending in a flagged break.
    pub hyphen_penalty: f32,
}

impl Penalties {
    /// The default penalty constants.
    #[must_use]
    pub const fn new() -> Self {
        Penalties {
            overflow_pen: OVERFLOW_PEN,
            n_line_penalty: N_LINE_PENALTY,
            short_last_fraction: SHORT_LAST_FRACTION,
            short_last_penalty: SHORT_LAST_PENALTY,
            hyphen_penalty: HYPHEN_PENALTY,
        }
    }
}

impl Default for Penalties {
    fn default() -> Self {
        Self::new()
    }
}

/// Output of the breaker: a strictly increasing sequence of fragment
/// indices `f_0 < f_1 < ... < f_L` with `f_0 = 0` and `f_L =
/// fragments.len()`, plus the derived per-line hyphen/forced masks.
#[derive(Debug, Clone)]
pub struct BreakPlan {
    /// Fragment-index boundaries, length `L + 1`.
    pub breaks: Vec<i32>,
    /// `hyphen_mask[k]` is true iff line `k` ends in a flagged
    /// (hyphenation) break.
    pub hyphen_mask: Vec<bool>,
    /// `forced_mask[k]` is true iff line `k` ends in a forced break.
    pub forced_mask: Vec<bool>,
}

impl BreakPlan {
    /// Number of lines, `L`.
    #[must_use]
    pub fn num_lines(&self) -> usize {
        self.breaks.len() - 1
    }

    /// The half-open fragment range `[f_k, f_{k+1})` covered by line `k`.
    #[must_use]
    pub fn line(&self, k: usize) -> (usize, usize) {
        (self.breaks[k] as usize, self.breaks[k + 1] as usize)
    }
}

/// Cache for line numbers, memoized to avoid O(n^2) behavior when
/// computing a fragment's line number repeatedly during the search.
struct LineNumbers {
    line_numbers: RefCell<Vec<usize>>,
}

impl LineNumbers {
    fn new(size: usize) -> Self {
        let mut line_numbers = Vec::with_capacity(size);
        line_numbers.push(0);
        LineNumbers {
            line_numbers: RefCell::new(line_numbers),
        }
    }

    fn get(&self, i: usize, minima: &[(usize, f32)]) -> usize {
        while self.line_numbers.borrow_mut().len() < i + 1 {
            let pos = self.line_numbers.borrow().len();
            let line_number = 1 + self.get(minima[pos].0, minima);
            self.line_numbers.borrow_mut().push(line_number);
        }
        self.line_numbers.borrow()[i]
    }
}

/// Cost of the line covering fragments `[i, j)`, given its
/// already-computed width and target width.
fn line_penalty(i: usize, j: usize, fragments: &Fragments, line_width: f32, target_width: f32, penalties: &Penalties) -> f32 {
    let penalty_j = fragments.penalty_widths[j - 1];
    if penalty_j < 0.0 {
        // A forced break is free: the line's own shape never costs
        // anything beyond the flat per-line charge.
        return penalties.n_line_penalty;
    }

    let mut cost = penalties.n_line_penalty;
    if line_width > target_width {
        cost += (line_width - target_width) * penalties.overflow_pen;
    } else if j < fragments.len() {
        let gap = target_width - line_width;
        cost += gap * gap;
    } else if i + 1 == j && line_width < target_width / penalties.short_last_fraction {
        cost += penalties.short_last_penalty;
    }

    if penalty_j > 0.0 {
        cost += penalties.hyphen_penalty;
    }

    cost
}

/// Runs the total-fit dynamic program over `fragments`, against a
/// target-width schedule `width_schedule` (in ems), using the default
/// [`Penalties`].
pub fn break_lines(fragments: &Fragments, width_schedule: &[f32]) -> Result<BreakPlan> {
    break_lines_with(fragments, width_schedule, &Penalties::default())
}

/// Shifts the first entry of `width_schedule` left by `paragraph_indent`
/// ems (floored at `1.0`), for a hanging or first-line indent that must
/// influence where the breaker places line breaks, not just where the
/// first line is later drawn.
///
/// Callers wanting a paragraph indent must pass the *same* returned
/// schedule to both [`break_lines`]/[`break_lines_with`] and
/// [`crate::position::position_with_indent`] (with the same
/// `paragraph_indent`), so that the breaker and the positioner agree on
/// the indented target. Feeding the indent only to the positioner (as a
/// cosmetic x-origin shift) would let the breaker place a word onto the
/// first line that the indent would no longer leave room for.
pub fn indent_schedule(width_schedule: &[f32], paragraph_indent: f32) -> Result<Vec<f32>> {
    if width_schedule.is_empty() {
        return Err(Error::InvalidSchedule {
            reason: "width schedule must contain at least one entry".to_string(),
        });
    }
    let mut schedule = width_schedule.to_vec();
    schedule[0] = (schedule[0] - paragraph_indent).max(1.0);
    Ok(schedule)
}

/// Like [`break_lines`], but with caller-supplied [`Penalties`].
///
/// `width_schedule` gives the target width of line `k` for `k <
/// width_schedule.len()`; the last entry is repeated ("edge padding")
/// for every subsequent line.
pub fn break_lines_with(fragments: &Fragments, width_schedule: &[f32], penalties: &Penalties) -> Result<BreakPlan> {
    if width_schedule.is_empty() {
        return Err(Error::InvalidSchedule {
            reason: "width schedule must contain at least one entry".to_string(),
        });
    }
    for &target in width_schedule {
        if !target.is_finite() || target <= 0.0 {
            return Err(Error::InvalidSchedule {
                reason: format!("target width {target} is not a positive, finite value"),
            });
        }
    }

    let m = fragments.len();
    let default_width = *width_schedule.last().expect("checked non-empty above");

    let mut widths = Vec::with_capacity(m + 1);
    let mut acc = 0.0f32;
    widths.push(acc);
    for k in 0..m {
        acc += fragments.widths[k] + fragments.whitespace_widths[k];
        widths.push(acc);
    }

    let line_numbers = LineNumbers::new(m);

    let minima = smawk::online_column_minima(0.0f32, widths.len(), |minima, i, j| {
        let line_number = line_numbers.get(i, minima);
        let target = width_schedule.get(line_number).copied().unwrap_or(default_width);
        let target_width = target.max(1.0);

        let penalty_j = fragments.penalty_widths[j - 1];
        let end_bonus = if penalty_j > 0.0 { penalty_j } else { 0.0 };
        let line_width = widths[j] - widths[i] - fragments.whitespace_widths[j - 1] + end_bonus;

        let minimum_cost = minima[i].1;
        minimum_cost + line_penalty(i, j, fragments, line_width, target_width, penalties)
    });

    let mut breaks_rev = vec![m];
    let mut pos = m;
    loop {
        let prev = minima[pos].0;
        breaks_rev.push(prev);
        pos = prev;
        if pos == 0 {
            break;
        }
    }
    breaks_rev.reverse();
    let breaks: Vec<i32> = breaks_rev.into_iter().map(|x| x as i32).collect();

    let l = breaks.len() - 1;
    let mut hyphen_mask = vec![false; l];
    let mut forced_mask = vec![false; l];
    for k in 0..l {
        let last_fragment = breaks[k + 1] as usize - 1;
        let p = fragments.penalty_widths[last_fragment];
        hyphen_mask[k] = p > 0.0;
        forced_mask[k] = p < 0.0;
    }

    Ok(BreakPlan {
        breaks,
        hyphen_mask,
        forced_mask,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::make_fragments_default;
    use crate::measure::MonospaceOracle;

    #[test]
    fn single_short_line_needs_no_break() {
        let fragments = make_fragments_default("Hello world.", &MonospaceOracle).unwrap();
        let plan = break_lines(&fragments, &[30.0]).unwrap();
        assert_eq!(plan.num_lines(), 1);
        assert_eq!(plan.breaks, vec![0, 2]);
        assert!(!plan.hyphen_mask[0]);
        assert!(plan.forced_mask[0]);
    }

    #[test]
    fn forced_breaks_produce_one_line_per_paragraph_segment() {
        let fragments = make_fragments_default("A\n\nB", &MonospaceOracle).unwrap();
        let plan = break_lines(&fragments, &[10.0]).unwrap();
        assert_eq!(plan.num_lines(), 3);
        assert_eq!(plan.forced_mask, vec![true, true, true]);
        assert_eq!(plan.hyphen_mask, vec![false, false, false]);
    }

    #[test]
    fn empty_schedule_is_rejected() {
        let fragments = make_fragments_default("hi", &MonospaceOracle).unwrap();
        assert!(matches!(
            break_lines(&fragments, &[]),
            Err(Error::InvalidSchedule { .. })
        ));
    }

    #[test]
    fn non_positive_target_is_rejected() {
        let fragments = make_fragments_default("hi", &MonospaceOracle).unwrap();
        assert!(matches!(
            break_lines(&fragments, &[0.0]),
            Err(Error::InvalidSchedule { .. })
        ));
    }

    #[test]
    fn overflowing_word_wraps_across_several_lines() {
        let text = "one two three four five six seven eight nine ten";
        let fragments = make_fragments_default(text, &MonospaceOracle).unwrap();
        let plan = break_lines(&fragments, &[12.0]).unwrap();
        assert!(plan.num_lines() > 1);
        // Every non-final line must not wildly overflow its target:
        // a single fragment is allowed to exceed it, but nothing else
        // does for this input (every word is <= 5 chars).
        for k in 0..plan.num_lines() {
            let (i, j) = plan.line(k);
            assert!(fragments.line_width(i, j) <= 12.0 + 1e-3);
        }
    }

    #[test]
    fn indent_schedule_can_pull_a_word_off_the_first_line() {
        // "aa bb cc" is exactly 8 ems wide and fits on one line at
        // target 8. Indenting the first line by 3 ems must feed the
        // breaker a narrower first-line target (5 ems), not just shift
        // where that line is drawn, so the plan itself changes.
        let text = "aa bb cc";
        let fragments = make_fragments_default(text, &MonospaceOracle).unwrap();

        let flush = break_lines(&fragments, &[8.0]).unwrap();
        assert_eq!(flush.num_lines(), 1);

        let indented_schedule = indent_schedule(&[8.0], 3.0).unwrap();
        assert_eq!(indented_schedule[0], 5.0);
        let indented = break_lines(&fragments, &indented_schedule).unwrap();
        assert!(indented.num_lines() > 1);
    }

    #[test]
    fn indent_schedule_floors_at_one_em() {
        let schedule = indent_schedule(&[2.0], 10.0).unwrap();
        assert_eq!(schedule[0], 1.0);
    }

    #[test]
    fn indent_schedule_rejects_empty_input() {
        assert!(matches!(
            indent_schedule(&[], 1.0),
            Err(Error::InvalidSchedule { .. })
        ));
    }
}
