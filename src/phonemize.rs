//! Normalised tokens → phone sequence.
//!
//! In [`Mode::Word`] each token is looked up whole and its primary
//! pronunciation is used.  In [`Mode::Spell`] every token is exploded into
//! letters and each letter is pronounced by name, so `"123"` is spelled as
//! the letters of `"one hundred and twenty three"`.
//!
//! Punctuation becomes silence in both modes: `,` is a short pause and
//! `. ? !` are long pauses.  Stress digits are stripped from every symbol,
//! leaving the lowercase names the monophone recordings are stored under.

use log::debug;
use serde::Deserialize;

use crate::dictionary::{Pronunciation, PronunciationDictionary};
use crate::error::{Error, Result};

/// Clip-bank key of the short pause.
pub const SHORT_PAUSE_KEY: &str = "sp";
/// Clip-bank key of the long pause.
pub const LONG_PAUSE_KEY: &str = "lp";

/// Spoken word-by-word or letter-by-letter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Word,
    Spell,
}

/// Synthetic silence inserted for punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pause {
    Short,
    Long,
}

impl Pause {
    /// Pause for a punctuation token, `None` for anything else.
    pub fn for_punctuation(token: &str) -> Option<Pause> {
        match token {
            "," => Some(Pause::Short),
            "." | "?" | "!" => Some(Pause::Long),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Pause::Short => SHORT_PAUSE_KEY,
            Pause::Long => LONG_PAUSE_KEY,
        }
    }
}

/// One unit of the sequence fed to the synthesiser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Phone {
    /// Lowercase phoneme without stress, e.g. `"ah"`.
    Phoneme(String),
    Pause(Pause),
}

impl Phone {
    /// Name of the clip this phone is rendered with.
    pub fn key(&self) -> &str {
        match self {
            Phone::Phoneme(p) => p.as_str(),
            Phone::Pause(p) => p.key(),
        }
    }
}

/// Ordered, immutable list of phones for one phrase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneSequence(Vec<Phone>);

impl PhoneSequence {
    pub fn as_slice(&self) -> &[Phone] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Phone> {
        self.0.iter()
    }

    /// Clip-bank keys in order (`"hh"`, `"ah"`, …, `"lp"`).
    pub fn keys(&self) -> Vec<&str> {
        self.0.iter().map(Phone::key).collect()
    }
}

impl<'a> IntoIterator for &'a PhoneSequence {
    type Item = &'a Phone;
    type IntoIter = std::slice::Iter<'a, Phone>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Stress stripping
// ─────────────────────────────────────────────────────────────────────────────

/// Lowercase a phone symbol and drop its stress digits (`"AH1"` → `"ah"`).
///
/// Idempotent: stripping an already stripped symbol returns it unchanged.
pub fn strip_stress(symbol: &str) -> String {
    symbol
        .chars()
        .filter(|c| !c.is_ascii_digit())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Per-token lookup result before flattening.
enum Unit<'d> {
    Spoken(&'d [String]),
    Silence(Pause),
}

fn flatten(units: Vec<Unit<'_>>) -> PhoneSequence {
    let mut phones = Vec::new();
    for unit in units {
        match unit {
            Unit::Spoken(symbols) => {
                phones.extend(symbols.iter().map(|s| Phone::Phoneme(strip_stress(s))))
            }
            Unit::Silence(p) => phones.push(Phone::Pause(p)),
        }
    }
    PhoneSequence(phones)
}

fn variant<'d, D>(dict: &'d D, unit: &str, index: usize) -> Result<&'d Pronunciation>
where
    D: PronunciationDictionary + ?Sized,
{
    dict.lookup(unit)
        .and_then(|variants| variants.get(index))
        .ok_or_else(|| Error::UnknownWord(unit.to_string()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Builders
// ─────────────────────────────────────────────────────────────────────────────

/// Primary pronunciation of every word, pauses for punctuation.
pub fn word_phones<D>(tokens: &[String], dict: &D) -> Result<PhoneSequence>
where
    D: PronunciationDictionary + ?Sized,
{
    let mut units = Vec::with_capacity(tokens.len());
    for token in tokens {
        match Pause::for_punctuation(token) {
            Some(p) => units.push(Unit::Silence(p)),
            None => units.push(Unit::Spoken(variant(dict, token, 0)?)),
        }
    }
    Ok(flatten(units))
}

/// Letter names of every character, pauses for punctuation.
///
/// The letter `a` uses the dictionary's second variant: the primary entry
/// is the reduced article vowel, not the letter name.
pub fn letter_phones<D>(tokens: &[String], dict: &D) -> Result<PhoneSequence>
where
    D: PronunciationDictionary + ?Sized,
{
    let mut units = Vec::new();
    let mut buf = [0u8; 4];
    for token in tokens {
        if let Some(p) = Pause::for_punctuation(token) {
            units.push(Unit::Silence(p));
            continue;
        }
        for ch in token.chars() {
            let letter: &str = ch.encode_utf8(&mut buf);
            let index = if letter == "a" { 1 } else { 0 };
            units.push(Unit::Spoken(variant(dict, letter, index)?));
        }
    }
    Ok(flatten(units))
}

/// Build the phone sequence for already-normalised tokens.
pub fn build<D>(tokens: &[String], dict: &D, mode: Mode) -> Result<PhoneSequence>
where
    D: PronunciationDictionary + ?Sized,
{
    let seq = match mode {
        Mode::Word => word_phones(tokens, dict)?,
        Mode::Spell => letter_phones(tokens, dict)?,
    };
    debug!("phonemize: {} tokens -> {} phones ({:?} mode)", tokens.len(), seq.len(), mode);
    Ok(seq)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
