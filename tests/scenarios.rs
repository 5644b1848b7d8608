//! End-to-end scenarios run against the full fragment -> break ->
//! position -> layout pipeline.

use foliate::breaker::break_lines;
use foliate::fragment::{make_fragments, make_fragments_default};
use foliate::layout::{layout, PageConfig};
use foliate::measure::{MonospaceFontOracle, MonospaceOracle};
use foliate::position::position;
use foliate::splitter::{SyllableSplitter, WhitespaceSplitter};
use foliate::syllabifier::Syllabifier;

/// Splits a word at every 4th character, used to exercise the
/// hyphenation scenario without depending on a real dictionary.
struct EveryFour;

impl Syllabifier for EveryFour {
    fn syllabify(&self, word: &str) -> Vec<usize> {
        (4..word.chars().count()).step_by(4).collect()
    }
}

#[test]
fn scenario_1_single_short_line() {
    let fragments = make_fragments_default("Hello world.", &MonospaceOracle).unwrap();
    let plan = break_lines(&fragments, &[30.0]).unwrap();
    assert_eq!(plan.num_lines(), 1);
    assert!(!plan.hyphen_mask[0]);
    let positioned = position(&fragments, &plan, &MonospaceFontOracle::default(), &[30.0], false, 1.0, 1.0).unwrap();
    assert_eq!(positioned.text.chars().count(), 12);
}

#[test]
fn scenario_2_forced_break_produces_empty_middle_line() {
    let fragments = make_fragments_default("A\n\nB", &MonospaceOracle).unwrap();
    let plan = break_lines(&fragments, &[10.0]).unwrap();
    assert_eq!(plan.num_lines(), 3);
    assert_eq!(plan.forced_mask, vec![true, true, true]);
    assert_eq!(plan.hyphen_mask, vec![false, false, false]);
}

#[test]
fn scenario_3_tab_expansion() {
    let fragments = make_fragments("\tA", &MonospaceOracle, &WhitespaceSplitter, 2.0).unwrap();
    let plan = break_lines(&fragments, &[10.0]).unwrap();
    assert_eq!(plan.num_lines(), 1);
    let positioned = position(&fragments, &plan, &MonospaceFontOracle::default(), &[10.0], false, 1.0, 1.0).unwrap();
    assert_eq!(positioned.dx[0], 2.0);
    assert_eq!(&positioned.text[positioned.text.char_indices().nth(1).unwrap().0..], "A");
}

#[test]
fn scenario_4_hyphenation_forced_by_width() {
    let base = WhitespaceSplitter;
    let syllabifier = EveryFour;
    let splitter = SyllableSplitter::new(&base, &syllabifier);

    let text = "supercalifragilistic";
    let fragments = make_fragments(text, &MonospaceOracle, &splitter, 4.0).unwrap();
    let plan = break_lines(&fragments, &[5.0]).unwrap();
    let positioned = position(&fragments, &plan, &MonospaceFontOracle::default(), &[5.0], false, 1.0, 1.0).unwrap();

    assert_eq!(plan.num_lines(), 5);
    let hyphenated_lines = plan.hyphen_mask.iter().filter(|&&h| h).count();
    assert_eq!(hyphenated_lines, 4);

    let mut start = 0usize;
    let mut line_chars: Vec<usize> = Vec::new();
    for &pos in positioned.linebreaks.iter().chain(std::iter::once(&positioned.len())) {
        line_chars.push(pos - start);
        start = pos + 1;
    }
    for &len in &line_chars {
        assert!(len <= 5, "line of {len} characters exceeds the target");
    }
}

#[test]
fn scenario_5_justified_paragraph_ends_flush() {
    let text = lipsum::lipsum(300);
    // `lipsum` output never starts/ends in whitespace and has no tabs or
    // explicit newlines, so it fragments cleanly with the default
    // splitter.
    let fragments = make_fragments_default(&text, &MonospaceOracle).unwrap();
    let plan = break_lines(&fragments, &[30.0]).unwrap();
    let positioned = position(&fragments, &plan, &MonospaceFontOracle::default(), &[30.0], true, 1.0, 1.0).unwrap();

    assert!(plan.num_lines() > 1);

    let mut start = 0usize;
    for k in 0..plan.num_lines() {
        let end = positioned.linebreaks.get(k).copied().unwrap_or(positioned.len());
        if !plan.forced_mask[k] && k + 1 < plan.num_lines() {
            let last = end - 1;
            let trailing_x = positioned.x[last] + positioned.dx[last];
            assert!(
                (trailing_x - 30.0).abs() < 1e-3,
                "line {k} ended at {trailing_x}, not 30.0"
            );
        }
        start = end + 1;
    }
    let _ = start;
}

#[test]
fn scenario_6_two_column_pagination() {
    let oracle = MonospaceFontOracle::default();
    let paragraphs = [
        "one two three",
        "four five six",
        "seven eight nine",
        "ten eleven twelve",
    ];
    let config = PageConfig {
        max_lines_per_column: vec![3],
        columns_per_page: 2,
        column_width: 20.0,
        column_spacing: 2.0,
        page_width: 42.0,
        page_height: 60.0,
        margin_left: 0.0,
        margin_top: 0.0,
    };
    let out = layout(
        &paragraphs,
        &oracle,
        &WhitespaceSplitter,
        4.0,
        &[10.0],
        false,
        1.0,
        1.0,
        &config,
    )
    .unwrap();

    for w in out.column_id.windows(2) {
        assert!(w[0] <= w[1], "column_id must be non-decreasing");
    }
    for w in out.page_id.windows(2) {
        assert!(w[0] <= w[1], "page_id must be non-decreasing");
    }
    for i in 0..out.column_id.len() {
        assert_eq!(out.page_id[i], out.column_id[i] / 2);
    }
    for i in 0..out.dy.len() {
        if out.drop[i] {
            assert_eq!(out.dy[i], 0.0);
        } else {
            assert!(out.dy[i] > 0.0);
        }
    }
}

#[test]
fn idempotence_of_the_full_pipeline() {
    let oracle = MonospaceFontOracle::default();
    let run = || {
        let fragments = make_fragments_default("The quick brown fox jumps.", &oracle).unwrap();
        let plan = break_lines(&fragments, &[10.0]).unwrap();
        position(&fragments, &plan, &oracle, &[10.0], true, 1.0, 12.0).unwrap()
    };
    let a = run();
    let b = run();
    assert_eq!(a.text, b.text);
    assert_eq!(a.x, b.x);
    assert_eq!(a.dx, b.dx);
    assert_eq!(a.y, b.y);
    assert_eq!(a.dy, b.dy);
}

#[test]
fn every_line_either_fits_or_contains_a_single_overlong_fragment() {
    let text = "a bb ccc dddddddddddd ee ff";
    let fragments = make_fragments_default(text, &MonospaceOracle).unwrap();
    let plan = break_lines(&fragments, &[6.0]).unwrap();
    for k in 0..plan.num_lines() {
        let (i, j) = plan.line(k);
        let w = fragments.line_width(i, j);
        let single_overlong = i + 1 == j && fragments.widths[i] > 6.0;
        assert!(w <= 6.0 + 1e-3 || single_overlong, "line {k} width {w} neither fits nor is a lone overlong fragment");
    }
}
