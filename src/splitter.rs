//! Splitters: functions producing the ordered, non-overlapping cover of
//! visible (non-whitespace) runs that the fragmenter turns into
//! fragments.

/// A span `(start, end)` given in **character indices** (not byte
/// offsets), half-open, `start <= end`.
///
/// The fragmenter works in character-index space throughout, since the
/// per-character width vector `w` returned by a [`crate::measure::MeasurementOracle`]
/// has one entry per `char`, not per byte.
pub type Span = (usize, usize);

/// Produces an ordered, non-overlapping cover of the visible runs of a
/// text.
///
/// The default implementation, [`whitespace_spans`], matches every
/// maximal run of non-whitespace characters (equivalent to the regular
/// expression `\S+`). Callers may supply any other splitter implementing
/// this trait, for example one that also treats certain punctuation as a
/// break point.
pub trait Splitter {
    /// Find the visible spans of `text`, in increasing, non-overlapping
    /// order, as character-index spans.
    fn split(&self, text: &str) -> Vec<Span>;
}

impl<F: Fn(&str) -> Vec<Span>> Splitter for F {
    fn split(&self, text: &str) -> Vec<Span> {
        self(text)
    }
}

/// The default splitter: matches maximal runs of non-whitespace
/// characters, equivalent to the regular expression `\S+`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceSplitter;

impl Splitter for WhitespaceSplitter {
    fn split(&self, text: &str) -> Vec<Span> {
        whitespace_spans(text)
    }
}

/// Free-function form of [`WhitespaceSplitter`], for callers who just
/// want the default behavior without naming the type.
#[must_use]
pub fn whitespace_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut start = None;
    let mut n = 0;

    for (idx, ch) in text.chars().enumerate() {
        match (ch.is_whitespace(), start) {
            (false, None) => start = Some(idx),
            (true, Some(s)) => {
                spans.push((s, idx));
                start = None;
            }
            _ => {}
        }
        n = idx + 1;
    }

    if let Some(s) = start {
        spans.push((s, n));
    }

    spans
}

/// Wraps a base splitter with a [`crate::syllabifier::Syllabifier`],
/// subdividing each visible span at every syllable boundary the
/// syllabifier reports.
///
/// The resulting sub-spans touch one another (`end_k == start_{k+1}`)
/// rather than being separated by a whitespace gap, which is exactly
/// the condition [`crate::fragment::make_fragments`] tests to mark a
/// span boundary as a flagged hyphenation point rather than a neutral
/// word break.
#[derive(Debug, Clone, Copy)]
pub struct SyllableSplitter<'a, S, H> {
    base: &'a S,
    syllabifier: &'a H,
}

impl<'a, S, H> SyllableSplitter<'a, S, H> {
    /// Builds a syllable-aware splitter from a base word splitter and
    /// a syllabifier.
    pub fn new(base: &'a S, syllabifier: &'a H) -> Self {
        SyllableSplitter { base, syllabifier }
    }
}

impl<'a, S, H> Splitter for SyllableSplitter<'a, S, H>
where
    S: Splitter,
    H: crate::syllabifier::Syllabifier,
{
    fn split(&self, text: &str) -> Vec<Span> {
        let chars: Vec<char> = text.chars().collect();
        let mut out = Vec::new();
        for (start, end) in self.base.split(text) {
            let word: String = chars[start..end].iter().collect();
            let mut breaks = self.syllabifier.syllabify(&word);
            breaks.retain(|&b| b > 0 && b < end - start);
            breaks.sort_unstable();
            breaks.dedup();

            let mut from = start;
            for b in breaks {
                let at = start + b;
                out.push((from, at));
                from = at;
            }
            out.push((from, end));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_word() {
        assert_eq!(whitespace_spans("hello"), vec![(0, 5)]);
    }

    #[test]
    fn two_words() {
        assert_eq!(whitespace_spans("hello world"), vec![(0, 5), (6, 11)]);
    }

    #[test]
    fn leading_tab_is_its_own_matchable_run() {
        // Tabs are non-whitespace-adjacent for splitting purposes here;
        // the fragmenter special-cases '\t' itself afterwards (see
        // fragment::Fragmenter), so the splitter simply sees it as part
        // of a run boundary.
        assert_eq!(whitespace_spans("\tA"), vec![(1, 2)]);
    }

    #[test]
    fn multiple_internal_spaces_collapse_into_one_gap() {
        assert_eq!(whitespace_spans("a   b"), vec![(0, 1), (4, 5)]);
    }

    #[test]
    fn closure_can_act_as_splitter() {
        let splitter: fn(&str) -> Vec<Span> = whitespace_spans;
        assert_eq!(Splitter::split(&splitter, "a b"), vec![(0, 1), (2, 3)]);
    }

    #[test]
    fn syllable_splitter_subdivides_long_words() {
        struct EveryFour;
        impl crate::syllabifier::Syllabifier for EveryFour {
            fn syllabify(&self, word: &str) -> Vec<usize> {
                (4..word.chars().count()).step_by(4).collect()
            }
        }

        let base = WhitespaceSplitter;
        let syllabifier = EveryFour;
        let splitter = SyllableSplitter::new(&base, &syllabifier);
        let spans = splitter.split("supercalifragilistic");
        assert_eq!(
            spans,
            vec![(0, 4), (4, 8), (8, 12), (12, 16), (16, 20), (20, 21)]
        );
    }
}
