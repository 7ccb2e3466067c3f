//! Pronunciation dictionary.
//!
//! The pipeline only needs [`PronunciationDictionary::lookup`]; [`CmuDict`]
//! is the implementation backed by the CMU Pronouncing Dictionary text
//! format:
//!
//! ```text
//! ;;; comment
//! a AH0
//! a(2) EY1
//! hello HH AH0 L OW1
//! world W ER1 L D   # trailing comments are ignored
//! ```
//!
//! Alternate pronunciations carry a `(N)` suffix on the headword and are kept
//! in file order, so variant 0 is the primary pronunciation.

use std::{collections::HashMap, path::Path};

use log::info;

use crate::error::{Error, Result};

/// One pronunciation: ARPAbet symbols with stress digits, e.g. `["HH", "AH0"]`.
pub type Pronunciation = Vec<String>;

/// Read-only word → pronunciations lookup.
pub trait PronunciationDictionary {
    /// All pronunciation variants for a lowercase `word`, primary first.
    fn lookup(&self, word: &str) -> Option<&[Pronunciation]>;
}

impl PronunciationDictionary for HashMap<String, Vec<Pronunciation>> {
    fn lookup(&self, word: &str) -> Option<&[Pronunciation]> {
        self.get(word).map(Vec::as_slice)
    }
}

/// CMU Pronouncing Dictionary loaded into memory.
#[derive(Debug, Clone, Default)]
pub struct CmuDict {
    entries: HashMap<String, Vec<Pronunciation>>,
}

impl CmuDict {
    /// Load a dictionary file (e.g. `cmudict.dict`).
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let dict = Self::parse(&text)?;
        info!("Loaded {} dictionary entries from {}", dict.len(), path.display());
        Ok(dict)
    }

    /// Parse dictionary text.
    pub fn parse(text: &str) -> Result<Self> {
        let mut entries: HashMap<String, Vec<Pronunciation>> = HashMap::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = match raw.find('#') {
                Some(pos) => &raw[..pos],
                None => raw,
            }
            .trim();
            if line.is_empty() || line.starts_with(";;;") {
                continue;
            }

            let mut fields = line.split_whitespace();
            let head = fields.next().unwrap_or_default();
            let phones: Pronunciation = fields.map(str::to_string).collect();
            if phones.is_empty() {
                return Err(Error::Dictionary {
                    line: idx + 1,
                    reason: format!("'{}' has no phones", head),
                });
            }

            entries.entry(headword(head).to_lowercase()).or_default().push(phones);
        }

        Ok(Self { entries })
    }

    /// Build a dictionary from `(word, phones)` pairs; repeated words add variants.
    pub fn from_entries<I, W, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (W, P)>,
        W: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        let mut map: HashMap<String, Vec<Pronunciation>> = HashMap::new();
        for (word, phones) in entries {
            let word: String = word.into();
            map.entry(word.to_lowercase())
                .or_default()
                .push(phones.into_iter().map(Into::into).collect());
        }
        Self { entries: map }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PronunciationDictionary for CmuDict {
    fn lookup(&self, word: &str) -> Option<&[Pronunciation]> {
        self.entries.get(word).map(Vec::as_slice)
    }
}

/// Strip a `(N)` variant marker: `"read(2)"` → `"read"`.
fn headword(raw: &str) -> &str {
    match raw.find('(') {
        Some(pos) if pos > 0 && raw.ends_with(')') => &raw[..pos],
        _ => raw,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = ";;; sample\n\
        a AH0\n\
        a(2) EY1\n\
        Hello HH AH0 L OW1\n\
        world W ER1 L D # noun\n\
        \n";

    #[test]
    fn test_parse_variants_in_order() {
        let dict = CmuDict::parse(SAMPLE).unwrap();
        assert_eq!(dict.len(), 3);
        let a = dict.lookup("a").unwrap();
        assert_eq!(a.len(), 2);
        assert_eq!(a[0], vec!["AH0"]);
        assert_eq!(a[1], vec!["EY1"]);
    }

    #[test]
    fn test_headwords_lowercased_and_comments_skipped() {
        let dict = CmuDict::parse(SAMPLE).unwrap();
        assert_eq!(dict.lookup("hello").unwrap()[0], vec!["HH", "AH0", "L", "OW1"]);
        assert_eq!(dict.lookup("world").unwrap()[0], vec!["W", "ER1", "L", "D"]);
        assert!(dict.lookup("Hello").is_none());
        assert!(dict.lookup(";;;").is_none());
    }

    #[test]
    fn test_entry_without_phones_is_rejected() {
        let err = CmuDict::parse("ok OW1 K EY1\nbroken\n").unwrap_err();
        assert!(matches!(err, Error::Dictionary { line: 2, .. }), "got {err:?}");
    }

    #[test]
    fn test_from_entries() {
        let dict = CmuDict::from_entries([("read", ["R", "IY1", "D"]), ("read", ["R", "EH1", "D"])]);
        assert_eq!(dict.lookup("read").unwrap().len(), 2);
    }

    #[test]
    fn test_headword() {
        assert_eq!(headword("read(2)"), "read");
        assert_eq!(headword("read"), "read");
        assert_eq!(headword("(paren"), "(paren");
    }
}
