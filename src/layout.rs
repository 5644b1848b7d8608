//! Column/Page Layout (C6): assigns lines of a positioned paragraph
//! stream to columns and columns to pages, honouring paragraph breaks
//! and column-boundary rules.
//!
//! Column splitting is a two-pass algorithm: gap lines (empty,
//! forced-break lines marking a paragraph boundary) are dropped only
//! where they straddle two different columns, and kept as ordinary
//! blank spacer lines everywhere else.

use crate::breaker::break_lines;
use crate::error::{Error, Result};
use crate::fragment::make_fragments;
use crate::measure::MeasurementOracle;
use crate::position::position_with_indent;
use crate::splitter::Splitter;

/// Page and column geometry for [`layout`].
///
/// All tunables are public struct fields, matching the crate's general
/// convention (see [`crate::breaker::Penalties`]) of exposing tunables
/// directly rather than through a builder.
#[derive(Debug, Clone)]
pub struct PageConfig {
    /// Maximum number of lines per column. A schedule: entry `k` gives
    /// the cap for column `k`; the last entry is repeated ("edge
    /// padding") for every later column. Must be non-empty. An entry of
    /// `0` means "no cap for that column": per the degenerate case in
    /// the layout's failure semantics, the document collapses into a
    /// single column with no splits from that column onward, rather
    /// than being rejected.
    pub max_lines_per_column: Vec<usize>,
    /// Number of columns grouped onto a single page.
    pub columns_per_page: usize,
    /// Width of a single column, in the same output units as `x`/`y`
    /// (already fontsize-scaled).
    pub column_width: f32,
    /// Horizontal gap between adjacent columns on the same page.
    pub column_spacing: f32,
    /// Page width (unused by the layout math itself, carried for the
    /// renderer's benefit).
    pub page_width: f32,
    /// Page height; added `page_height * page_index` to every
    /// character's `y`.
    pub page_height: f32,
    /// Left margin; the x origin of the first column on a page.
    pub margin_left: f32,
    /// Top margin; the y origin of the first line of the first column
    /// on a page.
    pub margin_top: f32,
}

impl PageConfig {
    /// A single column spanning an entire page, with no column/page
    /// splitting (`max_lines_per_column` effectively infinite).
    #[must_use]
    pub fn single_column(page_width: f32, page_height: f32) -> Self {
        PageConfig {
            max_lines_per_column: vec![usize::MAX],
            columns_per_page: 1,
            column_width: page_width,
            column_spacing: 0.0,
            page_width,
            page_height,
            margin_left: 0.0,
            margin_top: 0.0,
        }
    }

    /// The line cap for `column`, with `0` (either explicit or from edge
    /// padding) read as "unlimited" per the degenerate single-column
    /// case in the layout's failure semantics.
    fn cap(&self, column: usize) -> usize {
        let raw = self
            .max_lines_per_column
            .get(column)
            .or_else(|| self.max_lines_per_column.last())
            .copied()
            .unwrap_or(usize::MAX);
        if raw == 0 {
            usize::MAX
        } else {
            raw
        }
    }

    fn validate(&self) -> Result<()> {
        if self.max_lines_per_column.is_empty() {
            return Err(Error::InvalidSchedule {
                reason: "max_lines_per_column schedule must contain at least one entry".to_string(),
            });
        }
        if self.columns_per_page == 0 {
            return Err(Error::InvalidSchedule {
                reason: "columns_per_page must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Output of [`layout`]: per-character placement, plus column and page
/// ids, for an entire multi-paragraph, multi-column, multi-page
/// document.
#[derive(Debug, Clone)]
pub struct Paginated {
    /// The (possibly hyphen/newline-augmented) text of the whole
    /// document (all paragraphs, joined by a blank line each).
    pub text: String,
    /// Horizontal position of each character's left edge, relative to
    /// its page.
    pub x: Vec<f32>,
    /// Horizontal advance of each character.
    pub dx: Vec<f32>,
    /// Vertical baseline position of each character, relative to its
    /// page.
    pub y: Vec<f32>,
    /// Line height contribution of each character; `0.0` for dropped
    /// characters (see [`Paginated::drop`]), matching the crate's open
    /// question decision to suppress `dy` (not just exclude from
    /// column content) for dropped paragraph-gap lines.
    pub dy: Vec<f32>,
    /// Column id of each character, 0-based, monotonically
    /// non-decreasing over `text`.
    pub column_id: Vec<i32>,
    /// Page id of each character, 0-based, monotonically non-decreasing
    /// over `text`. Equal to `column_id / columns_per_page`.
    pub page_id: Vec<i32>,
    /// `true` for characters belonging to a paragraph-gap line that
    /// coincided with a column boundary and was therefore dropped from
    /// the visible layout (see [`layout`]'s column-splitting rules).
    pub drop: Vec<bool>,
}

/// Lays out a sequence of paragraphs into columns and pages.
///
/// `paragraphs` are joined with a blank line (`"\n\n"`) before being
/// fragmented, broken, and positioned as a single run, so that the
/// breaker's forced-break handling of `"\n\n"` produces the empty
/// paragraph-gap line this function's column splitting reasons about.
#[allow(clippy::too_many_arguments)]
pub fn layout(
    paragraphs: &[&str],
    measure: &dyn MeasurementOracle,
    splitter: &dyn Splitter,
    tab_width: f32,
    width_schedule: &[f32],
    justify: bool,
    line_spacing: f32,
    fontsize: f32,
    config: &PageConfig,
) -> Result<Paginated> {
    config.validate()?;
    if paragraphs.is_empty() {
        return Err(Error::EmptyText);
    }

    let text = paragraphs.join("\n\n");
    let fragments = make_fragments(&text, measure, splitter, tab_width)?;
    let plan = break_lines(&fragments, width_schedule)?;
    let positioned = position_with_indent(
        &fragments,
        &plan,
        measure,
        width_schedule,
        justify,
        line_spacing,
        fontsize,
        0.0,
    )?;

    let l = plan.num_lines();
    let total = positioned.len();

    // Character-range [start, full_end) of each line, where full_end
    // includes that line's own trailing synthetic newline (if any).
    let mut line_start = vec![0usize; l];
    let mut content_end = vec![0usize; l];
    let mut full_end = vec![0usize; l];
    for k in 0..l {
        line_start[k] = if k == 0 { 0 } else { positioned.linebreaks[k - 1] + 1 };
        content_end[k] = if k + 1 < l { positioned.linebreaks[k] } else { total };
        full_end[k] = if k + 1 < l { positioned.linebreaks[k] + 1 } else { total };
    }

    // A gap line is an empty forced-break line: the blank line left
    // behind by a "\n\n" paragraph separator (or a run of several
    // consecutive newlines).
    let is_gap: Vec<bool> = (0..l)
        .map(|k| plan.forced_mask[k] && content_end[k] == line_start[k])
        .collect();

    // Assign a column number to every *content* (non-gap) line by
    // greedily consuming the (edge-padded) per-column line-count
    // schedule. Gap lines do not themselves consume column capacity;
    // a gap line is kept (and inherits its surrounding column) when
    // both of its neighbouring content lines fall in the same column,
    // and dropped when they don't (it is, by definition, sitting on a
    // column boundary in that case).
    let mut column_of_content = vec![0usize; l];
    {
        let mut col = 0usize;
        let mut remaining = config.cap(0);
        for k in 0..l {
            if is_gap[k] {
                continue;
            }
            if remaining == 0 {
                col += 1;
                remaining = config.cap(col);
            }
            column_of_content[k] = col;
            remaining -= 1;
        }
    }

    let mut line_column = vec![0i32; l];
    let mut line_drop = vec![false; l];
    for k in 0..l {
        if !is_gap[k] {
            line_column[k] = column_of_content[k] as i32;
            continue;
        }
        let prev_content = (0..k).rev().find(|&p| !is_gap[p]);
        let next_content = (k + 1..l).find(|&p| !is_gap[p]);
        match (prev_content, next_content) {
            (Some(p), Some(n)) if column_of_content[p] == column_of_content[n] => {
                line_column[k] = column_of_content[p] as i32;
            }
            (Some(p), Some(_)) => {
                line_drop[k] = true;
                line_column[k] = column_of_content[p] as i32;
            }
            // A gap line cannot open or close the document: the
            // fragmenter's BadWhitespace check rejects leading/trailing
            // whitespace, so a paragraph gap always has real content on
            // both sides at the text level. This arm only guards
            // degenerate single-line documents.
            (Some(p), None) => line_column[k] = column_of_content[p] as i32,
            (None, Some(n)) => line_column[k] = column_of_content[n] as i32,
            (None, None) => line_column[k] = 0,
        }
    }

    let num_columns = line_column.iter().copied().max().unwrap_or(0) as usize + 1;

    // Column-local vertical origin: the global `y` of the first
    // non-dropped line assigned to that column.
    let mut column_y_base = vec![None; num_columns];
    for k in 0..l {
        if line_drop[k] {
            continue;
        }
        let c = line_column[k] as usize;
        if column_y_base[c].is_none() && line_start[k] < full_end[k] {
            column_y_base[c] = Some(positioned.y[line_start[k]]);
        }
    }
    // A column containing only a dropped gap line (shouldn't happen,
    // see above) or no characters at all falls back to 0.
    let column_y_base: Vec<f32> = column_y_base.into_iter().map(|v| v.unwrap_or(0.0)).collect();

    let mut column_id = vec![0i32; total];
    let mut page_id = vec![0i32; total];
    let mut drop = vec![false; total];
    let mut x = positioned.x.clone();
    let mut y = positioned.y.clone();
    let mut dy = positioned.dy.clone();

    for k in 0..l {
        let c = line_column[k] as usize;
        let page = c / config.columns_per_page;
        let col_in_page = (c % config.columns_per_page) as f32;
        let x_origin = config.margin_left + col_in_page * (config.column_width + config.column_spacing);
        let y_origin = config.margin_top + config.page_height * page as f32;

        for i in line_start[k]..full_end[k] {
            column_id[i] = c as i32;
            page_id[i] = page as i32;
            if line_drop[k] {
                drop[i] = true;
                dy[i] = 0.0;
            }
            x[i] += x_origin;
            y[i] = (y[i] - column_y_base[c]) + y_origin;
        }
    }

    Ok(Paginated {
        text: positioned.text,
        x,
        dx: positioned.dx,
        y,
        dy,
        column_id,
        page_id,
        drop,
    })
}
