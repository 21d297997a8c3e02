use include_dir::{include_dir, Dir};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::OnceLock;

use crate::error::{Error, Result};
use crate::util::round1;

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

pub const DEFAULT_DICTIONARY: &str = "english_common";

#[derive(Deserialize, Clone, Debug)]
struct WordList {
    name: String,
    words: Vec<String>,
}

/// Coarse "is this English?" check over a fixed vocabulary. Not a spellchecker.
#[derive(Clone, Debug, Default)]
pub struct Dictionary {
    pub name: String,
    words: HashSet<String>,
}

/// Lower-cases and keeps only `a..=z`.
pub fn clean_word(word: &str) -> String {
    word.chars()
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_lowercase)
        .collect()
}

impl Dictionary {
    pub fn from_words<I, S>(name: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        // entries go through the same cleaning as lookups, so "don't" is stored as "dont"
        let words = words
            .into_iter()
            .map(|w| clean_word(w.as_ref()))
            .filter(|w| !w.is_empty())
            .collect();

        Self {
            name: name.into(),
            words,
        }
    }

    /// Loads one of the word lists embedded under `src/lang`.
    pub fn load(name: &str) -> Result<Self> {
        let file = LANG_DIR
            .get_file(format!("{name}.json"))
            .ok_or_else(|| Error::DictionaryNotFound(name.to_string()))?;

        let contents = file
            .contents_utf8()
            .ok_or_else(|| Error::DictionaryNotFound(name.to_string()))?;

        let list: WordList = serde_json::from_str(contents)?;
        Ok(Self::from_words(list.name, list.words))
    }

    /// The shared built-in vocabulary.
    pub fn english() -> &'static Dictionary {
        static ENGLISH: OnceLock<Dictionary> = OnceLock::new();
        ENGLISH.get_or_init(|| {
            Self::load(DEFAULT_DICTIONARY).unwrap_or_else(|e| {
                tracing::error!(error = %e, "embedded dictionary failed to load");
                Dictionary::default()
            })
        })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn is_valid_word(&self, word: &str) -> bool {
        let cleaned = clean_word(word);
        !cleaned.is_empty() && self.words.contains(&cleaned)
    }

    pub fn word_validity(&self, text: &str) -> WordValidity {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            return WordValidity::default();
        }

        let valid_words = words.iter().filter(|w| self.is_valid_word(w)).count();
        let total_words = words.len();

        WordValidity {
            total_words,
            valid_words,
            invalid_words: total_words - valid_words,
            validity_rate: round1(valid_words as f64 / total_words as f64 * 100.0),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WordValidity {
    pub total_words: usize,
    pub valid_words: usize,
    pub invalid_words: usize,
    pub validity_rate: f64,
}

pub fn is_valid_word(word: &str) -> bool {
    Dictionary::english().is_valid_word(word)
}

pub fn calculate_word_validity(text: &str) -> WordValidity {
    Dictionary::english().word_validity(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_loads() {
        let dict = Dictionary::load(DEFAULT_DICTIONARY).unwrap();

        assert_eq!(dict.name, "english_common");
        assert!(dict.len() > 300);
        assert!(!Dictionary::english().is_empty());
    }

    #[test]
    fn test_missing_dictionary() {
        let err = Dictionary::load("klingon").unwrap_err();
        assert!(matches!(err, Error::DictionaryNotFound(name) if name == "klingon"));
    }

    #[test]
    fn test_clean_word() {
        assert_eq!(clean_word("Hello!"), "hello");
        assert_eq!(clean_word("don't"), "dont");
        assert_eq!(clean_word("42"), "");
        assert_eq!(clean_word("  "), "");
    }

    #[test]
    fn test_is_valid_word() {
        assert!(is_valid_word("the"));
        assert!(is_valid_word("THE"));
        assert!(is_valid_word("world,"));
        assert!(is_valid_word("\"music\""));
        assert!(!is_valid_word("asdfgh"));
        assert!(!is_valid_word(""));
        assert!(!is_valid_word("   "));
        assert!(!is_valid_word("123"));
    }

    #[test]
    fn test_entries_are_normalized() {
        // listed as "America" and "don't"
        assert!(is_valid_word("america"));
        assert!(is_valid_word("don't"));
    }

    #[test]
    fn test_from_words() {
        let dict = Dictionary::from_words("tiny", ["Cat", "dog!", "", "7"]);

        assert_eq!(dict.len(), 2);
        assert!(dict.is_valid_word("cat"));
        assert!(dict.is_valid_word("Dog"));
        assert!(!dict.is_valid_word("bird"));
    }

    #[test]
    fn test_word_validity() {
        let v = calculate_word_validity("the cat zzzq sat");
        assert_eq!(v.total_words, 4);
        assert_eq!(v.valid_words, 3);
        assert_eq!(v.invalid_words, 1);
        assert_eq!(v.validity_rate, 75.0);
    }

    #[test]
    fn test_word_validity_blank() {
        assert_eq!(calculate_word_validity("  \n "), WordValidity::default());
    }
}
