use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

const BUILTIN: &str = include_str!("../../data/words.txt");

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum DictionaryError {
    #[error("failed to read word list {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("word list {} has no usable words", path.display())]
    Empty { path: PathBuf },
}

/// Read-only word list. Words are stored upper-case; lookups ignore case.
///
/// ```
/// use tabletop::words::Dictionary;
///
/// let dict = Dictionary::from_words(["cat", "Dog"]);
/// assert!(dict.contains("CAT"));
/// assert!(dict.contains("dog"));
/// assert!(!dict.contains(""));
/// assert_eq!(dict.max_len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: BTreeSet<String>,
    max_len: usize,
}

impl Dictionary {
    /// Words that are empty or not purely alphabetic are skipped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: BTreeSet<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_ascii_uppercase())
            .filter(|w| !w.is_empty() && w.chars().all(|c| c.is_ascii_alphabetic()))
            .collect();
        let max_len = words.iter().map(String::len).max().unwrap_or(0);
        Self { words, max_len }
    }

    /// One word per line; blank lines and `#` comments are ignored.
    pub fn parse(text: &str) -> Self {
        Self::from_words(text.lines().filter(|l| !l.trim_start().starts_with('#')))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|source| DictionaryError::Io { path: path.to_path_buf(), source })?;
        let dict = Self::parse(&text);
        if dict.is_empty() {
            return Err(DictionaryError::Empty { path: path.to_path_buf() });
        }
        log::info!("loaded {} words from {}", dict.len(), path.display());
        Ok(dict)
    }

    /// The word list bundled with the crate.
    pub fn builtin() -> Self {
        Self::parse(BUILTIN)
    }

    pub fn contains(&self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        if word.bytes().any(|b| b.is_ascii_lowercase()) {
            self.words.contains(&word.to_ascii_uppercase())
        } else {
            self.words.contains(word)
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Length of the longest word.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Words in sorted order.
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for Dictionary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_words(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_ignore_case() {
        let d: Dictionary = ["Garden", "gardens"].into_iter().collect();
        assert!(d.contains("garden"));
        assert!(d.contains("GARDENS"));
        assert!(d.contains("GaRdEn"));
        assert!(!d.contains("gard"));
        assert_eq!(d.max_len(), 7);
    }

    #[test]
    fn parse_skips_junk() {
        let d = Dictionary::parse("# list\ncat\n\n  dog \nno-way\n");
        assert_eq!(d.words().collect::<Vec<_>>(), vec!["CAT", "DOG"]);
    }

    #[test]
    fn builtin_covers_common_words() {
        let d = Dictionary::builtin();
        for w in ["cat", "cats", "dog", "garden", "gardens", "quiz"] {
            assert!(d.contains(w), "{w} missing from builtin list");
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Dictionary::load("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, DictionaryError::Io { .. }));
    }
}
