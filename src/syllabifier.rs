//! The Syllabifier (C2): an optional external collaborator mapping a
//! word to its syllable-boundary offsets, used only when
//! penalty-fragmentation at the sub-word level is active.

/// Maps a word to a list of byte offsets, relative to the start of the
/// word, at which it may be hyphenated.
///
/// Offsets must be strictly increasing and strictly between `0` and
/// `word.len()`.
pub trait Syllabifier {
    /// Find the hyphenation points of `word`.
    fn syllabify(&self, word: &str) -> Vec<usize>;
}

/// A syllabifier that never splits a word. This is the default when no
/// hyphenation dictionary is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSyllabifier;

impl Syllabifier for NoSyllabifier {
    fn syllabify(&self, _word: &str) -> Vec<usize> {
        Vec::new()
    }
}

/// Adapter over the `hyphenation` crate's dictionary-backed hyphenator.
///
/// Words shorter than four characters are never split.
#[cfg(feature = "hyphenation")]
#[derive(Debug, Clone)]
pub struct DictionarySyllabifier {
    standard: hyphenation::Standard,
}

#[cfg(feature = "hyphenation")]
impl DictionarySyllabifier {
    /// Build a syllabifier from a loaded hyphenation dictionary.
    #[must_use]
    pub fn new(standard: hyphenation::Standard) -> Self {
        DictionarySyllabifier { standard }
    }
}

#[cfg(feature = "hyphenation")]
impl Syllabifier for DictionarySyllabifier {
    fn syllabify(&self, word: &str) -> Vec<usize> {
        use hyphenation::Hyphenator as _;

        if word.chars().count() < 4 {
            return Vec::new();
        }
        self.standard.hyphenate(word).breaks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_syllabifier_never_splits() {
        assert_eq!(NoSyllabifier.syllabify("supercalifragilistic"), Vec::<usize>::new());
    }
}
