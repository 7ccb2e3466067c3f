//! Phrase tokeniser.
//!
//! Splits raw input into dates, numbers, words and sentence punctuation with
//! a single combined grammar.  At every position the alternatives are tried
//! in a fixed order, so `12/05` is a date rather than the number `12`
//! followed by junk, and `3.14` is one number rather than `3`, `.`, `14`.
//!
//! Characters matched by no alternative (quotes, symbols, whitespace,
//! non-ASCII letters) are skipped.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

// ─────────────────────────────────────────────────────────────────────────────
// Grammar — alternative order is significant
// ─────────────────────────────────────────────────────────────────────────────

static RE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x-u)
          (?P<date>\d?\d/\d?\d(?:/(?:\d\d)?\d\d)?)    # (D)D/(M)M(/(YY)YY)
        | (?P<number>\d+(?:\.\d+)?)
        | (?P<word>\w+)
        | (?P<punct>[!?.,])
        ",
    )
    .unwrap()
});

/// Which grammar alternative produced a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Date,
    Number,
    Word,
    Punctuation,
}

/// One lexical unit of the input phrase, lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(text: impl Into<String>, kind: TokenKind) -> Self {
        Self { text: text.into(), kind }
    }
}

/// Split `phrase` into tokens in surface order.
pub fn tokenize(phrase: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut last_end = 0;

    for caps in RE_TOKEN.captures_iter(phrase) {
        let kind = if caps.name("date").is_some() {
            TokenKind::Date
        } else if caps.name("number").is_some() {
            TokenKind::Number
        } else if caps.name("word").is_some() {
            TokenKind::Word
        } else {
            TokenKind::Punctuation
        };
        let m = caps.get(0).unwrap();

        let skipped = phrase[last_end..m.start()].trim();
        if !skipped.is_empty() {
            debug!("tokenize: dropping unrecognised text {:?}", skipped);
        }
        last_end = m.end();

        tokens.push(Token::new(m.as_str().to_ascii_lowercase(), kind));
    }

    let trailing = phrase[last_end..].trim();
    if !trailing.is_empty() {
        debug!("tokenize: dropping unrecognised text {:?}", trailing);
    }

    tokens
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(phrase: &str) -> Vec<(String, TokenKind)> {
        tokenize(phrase).into_iter().map(|t| (t.text, t.kind)).collect()
    }

    #[test]
    fn test_words_and_punctuation() {
        let toks = kinds("Hello world.");
        assert_eq!(
            toks,
            vec![
                ("hello".to_string(), TokenKind::Word),
                ("world".to_string(), TokenKind::Word),
                (".".to_string(), TokenKind::Punctuation),
            ]
        );
    }

    #[test]
    fn test_decimal_is_one_number() {
        let toks = kinds("pi is 3.14.");
        assert_eq!(toks[2], ("3.14".to_string(), TokenKind::Number));
        assert_eq!(toks[3], (".".to_string(), TokenKind::Punctuation));
        assert_eq!(toks.len(), 4);
    }

    #[test]
    fn test_date_beats_number() {
        let toks = kinds("on 25/12/2020, 1/2 and 01/02/99");
        assert_eq!(toks[1], ("25/12/2020".to_string(), TokenKind::Date));
        assert_eq!(toks[2], (",".to_string(), TokenKind::Punctuation));
        assert_eq!(toks[3], ("1/2".to_string(), TokenKind::Date));
        assert_eq!(toks[5], ("01/02/99".to_string(), TokenKind::Date));
    }

    #[test]
    fn test_three_digit_year_is_split() {
        // The year part is two or four digits; a lone third digit is a number.
        let toks = kinds("1/2/345");
        assert_eq!(toks[0], ("1/2/34".to_string(), TokenKind::Date));
        assert_eq!(toks[1], ("5".to_string(), TokenKind::Number));
    }

    #[test]
    fn test_unrecognised_characters_dropped() {
        let toks = kinds("\"Wow\" -- £5; café!");
        let texts: Vec<&str> = toks.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(texts, vec!["wow", "5", "caf", "!"]);
    }

    #[test]
    fn test_lowercased() {
        assert_eq!(tokenize("ABC")[0].text, "abc");
    }

    #[test]
    fn test_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  ;; ").is_empty());
    }
}
