//! Text normalisation — numbers and dates to spoken words.
//!
//! Number and date tokens are replaced by their word expansions; word and
//! punctuation tokens pass through untouched.  The output is the flat list
//! of lowercase words and punctuation marks that the phone sequence builder
//! consumes.
//!
//! Only the integers 0–999 can be spoken.  Anything larger, and any date
//! that does not exist on the calendar, is an error rather than a guess.

use chrono::NaiveDate;
use log::debug;

use crate::error::{Error, Result};
use crate::tokenize::{tokenize, Token, TokenKind};

// ─────────────────────────────────────────────────────────────────────────────
// Lookup tables
// ─────────────────────────────────────────────────────────────────────────────

const SMALL: [&str; 21] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
    "ten", "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen",
    "seventeen", "eighteen", "nineteen", "twenty",
];
const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];
const ORDINALS: [&str; 21] = [
    "", "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth",
    "ninth", "tenth", "eleventh", "twelfth", "thirteenth", "fourteenth", "fifteenth",
    "sixteenth", "seventeenth", "eighteenth", "nineteenth", "twentieth",
];
const MONTHS: [&str; 12] = [
    "january", "february", "march", "april", "may", "june", "july", "august",
    "september", "october", "november", "december",
];

/// Largest integer part that [`int_to_words`] can read.
pub const MAX_SPOKEN_INTEGER: u64 = 999;

// ─────────────────────────────────────────────────────────────────────────────
// Number → words
// ─────────────────────────────────────────────────────────────────────────────

/// Convert an integer in 0–999 to words, British style
/// (`115` → `"one hundred and fifteen"`).
pub fn int_to_words(n: u64) -> Result<String> {
    match n {
        0..=20 => Ok(SMALL[n as usize].to_string()),
        21..=99 => {
            let tens = TENS[(n / 10) as usize];
            if n % 10 == 0 {
                Ok(tens.to_string())
            } else {
                Ok(format!("{} {}", tens, SMALL[(n % 10) as usize]))
            }
        }
        100..=MAX_SPOKEN_INTEGER => {
            let hundreds = SMALL[(n / 100) as usize];
            if n % 100 == 0 {
                Ok(format!("{} hundred", hundreds))
            } else {
                Ok(format!("{} hundred and {}", hundreds, int_to_words(n % 100)?))
            }
        }
        _ => Err(Error::NumberRange(n.to_string())),
    }
}

fn digit_word(c: char) -> Option<&'static str> {
    c.to_digit(10).map(|d| SMALL[d as usize])
}

/// Read the digits after a decimal point one at a time
/// (`"05"` → `"zero five"`).
pub fn decimal_to_words(digits: &str) -> String {
    digits.chars().filter_map(digit_word).collect::<Vec<_>>().join(" ")
}

/// Convert a number token (`digits` or `digits.digits`) to words.
pub fn number_to_words(text: &str) -> Result<String> {
    let (int_part, dec_part) = match text.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (text, None),
    };

    let int_value = if int_part.is_empty() {
        0
    } else {
        int_part
            .parse::<u64>()
            .map_err(|_| Error::NumberRange(int_part.to_string()))?
    };
    let int_words = int_to_words(int_value).map_err(|_| Error::NumberRange(text.to_string()))?;

    match dec_part {
        Some(d) if !d.is_empty() => Ok(format!("{} point {}", int_words, decimal_to_words(d))),
        _ => Ok(int_words),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dates
// ─────────────────────────────────────────────────────────────────────────────

/// A calendar date parsed from `(D)D/(M)M(/(YY)YY)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date {
    pub day: u32,
    pub month: u32,
    pub year: Option<u32>,
}

/// Year used to check a day/month pair when the token has no year.
///
/// A leap year, so `29/2` is accepted on its own.  Parsers in the
/// `strptime` family default to 1900 and reject it; accepting it is intended.
const REFERENCE_LEAP_YEAR: i32 = 2000;

/// Two-digit years follow the POSIX `%y` pivot: 69–99 → 1900s, 00–68 → 2000s.
fn expand_short_year(yy: u32) -> u32 {
    if yy >= 69 {
        1900 + yy
    } else {
        2000 + yy
    }
}

/// Parse and validate a date token.
pub fn parse_date(text: &str) -> Result<Date> {
    let parts: Vec<&str> = text.split('/').collect();
    if !(2..=3).contains(&parts.len()) || parts.iter().any(|p| p.is_empty()) {
        return Err(Error::date_range(text, "expected (D)D/(M)M(/(YY)YY)"));
    }
    let field = |s: &str| {
        s.parse::<u32>()
            .map_err(|_| Error::date_range(text, format!("'{}' is not a number", s)))
    };

    let day = field(parts[0])?;
    let month = field(parts[1])?;
    let year = match parts.get(2).copied() {
        None => None,
        Some(y) if y.len() == 2 => Some(expand_short_year(field(y)?)),
        Some(y) if y.len() == 4 => Some(field(y)?),
        Some(y) => {
            return Err(Error::date_range(text, format!("year '{}' must have 2 or 4 digits", y)))
        }
    };

    if !(1..=12).contains(&month) {
        return Err(Error::date_range(text, format!("month {} is not in 1 to 12", month)));
    }
    let check_year = year.map_or(REFERENCE_LEAP_YEAR, |y| y as i32);
    if NaiveDate::from_ymd_opt(check_year, month, day).is_none() {
        return Err(Error::date_range(
            text,
            format!("day {} does not exist in month {}", day, month),
        ));
    }
    if let Some(y) = year {
        if y < 1000 {
            return Err(Error::date_range(text, format!("year {} is before 1000", y)));
        }
    }

    Ok(Date { day, month, year })
}

/// Day of the month as an ordinal (`25` → `"twenty fifth"`).
pub fn day_to_words(day: u32) -> Result<String> {
    match day {
        1..=20 => Ok(ORDINALS[day as usize].to_string()),
        30 => Ok("thirtieth".to_string()),
        21..=31 => Ok(format!("{} {}", TENS[(day / 10) as usize], ORDINALS[(day % 10) as usize])),
        _ => Err(Error::date_range(&day.to_string(), "day is not in 1 to 31")),
    }
}

pub fn month_to_words(month: u32) -> Result<&'static str> {
    match month {
        1..=12 => Ok(MONTHS[(month - 1) as usize]),
        _ => Err(Error::MonthRange(month)),
    }
}

/// Read a four-digit year the way it is usually spoken.
///
/// | shape  | example | words                          |
/// |--------|---------|--------------------------------|
/// | `x0yz` | 2020    | two thousand and twenty        |
/// | `xxyz` | 1984    | nineteen eighty four           |
/// | `xx0z` | 1905    | nineteen hundred and five      |
/// | `x00z` | 2001    | two thousand and one           |
/// | `xx00` | 1900    | nineteen hundred               |
/// | `x000` | 2000    | two thousand                   |
pub fn year_to_words(year: u32) -> Result<String> {
    if !(1000..=9999).contains(&year) {
        return Err(Error::date_range(&year.to_string(), "year is not in 1000 to 9999"));
    }
    let thousands = year / 1000;
    let hundreds = year / 100 % 10;
    let tens = year / 10 % 10;
    let units = year % 10;
    let (head, tail) = (year / 100, year % 100);

    let words = if tens != 0 {
        if hundreds == 0 {
            format!("{} thousand and {}", int_to_words(thousands as u64)?, int_to_words(tail as u64)?)
        } else {
            format!("{} {}", int_to_words(head as u64)?, int_to_words(tail as u64)?)
        }
    } else if units != 0 {
        if hundreds != 0 {
            format!("{} hundred and {}", int_to_words(head as u64)?, int_to_words(units as u64)?)
        } else {
            format!("{} thousand and {}", int_to_words(thousands as u64)?, int_to_words(units as u64)?)
        }
    } else if hundreds != 0 {
        format!("{} hundred", int_to_words(head as u64)?)
    } else {
        format!("{} thousand", int_to_words(thousands as u64)?)
    };
    Ok(words)
}

/// Convert a date token to words (`"25/12"` → `"the twenty fifth of december"`).
pub fn date_to_words(text: &str) -> Result<String> {
    let date = parse_date(text)?;
    let day = day_to_words(date.day)?;
    let month = month_to_words(date.month)?;
    match date.year {
        Some(y) => Ok(format!("the {} of {} {}", day, month, year_to_words(y)?)),
        None => Ok(format!("the {} of {}", day, month)),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Token stream
// ─────────────────────────────────────────────────────────────────────────────

/// Expand number and date tokens in place, preserving order.
pub fn normalize_tokens(tokens: &[Token]) -> Result<Vec<String>> {
    let mut out = Vec::with_capacity(tokens.len());
    for token in tokens {
        let expanded = match token.kind {
            TokenKind::Date => date_to_words(&token.text)?,
            TokenKind::Number => number_to_words(&token.text)?,
            TokenKind::Word | TokenKind::Punctuation => {
                out.push(token.text.clone());
                continue;
            }
        };
        debug!("normalize: {:?} -> {:?}", token.text, expanded);
        out.extend(expanded.split_whitespace().map(str::to_string));
    }
    Ok(out)
}

/// Tokenise and normalise a phrase in one step.
pub fn normalize(phrase: &str) -> Result<Vec<String>> {
    normalize_tokens(&tokenize(phrase))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
