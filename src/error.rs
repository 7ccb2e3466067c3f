//! Error taxonomy for the synthesis pipeline.
//!
//! Every failure inside normalisation, lookup or synthesis is fatal for the
//! phrase being processed: there is no partial output and no retry.  The
//! binary decides how to report them.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A word (or a letter in spelling mode) has no dictionary entry.
    #[error("'{0}' cannot be found in the pronunciation dictionary")]
    UnknownWord(String),

    /// Integer part of a number is outside 0–999.
    #[error("number '{0}' is too large (only 0 to 999 can be spoken)")]
    NumberRange(String),

    /// Day (or year) not valid for the calendar.
    #[error("invalid date '{date}': {reason}")]
    DateRange { date: String, reason: String },

    /// Month outside 1–12.
    #[error("month {0} is not in the range 1 to 12")]
    MonthRange(u32),

    /// Phone symbol with no recording in the clip bank.
    #[error("no monophone recording for phone '{0}'")]
    MissingClip(String),

    /// Volume factor outside the accepted span.
    #[error("volume {value} is outside the accepted range {min}..={max}")]
    VolumeRange { value: f32, min: f32, max: f32 },

    /// Malformed line in a pronunciation dictionary file.
    #[error("dictionary line {line}: {reason}")]
    Dictionary { line: usize, reason: String },

    /// A monophone file that cannot join the clip bank.
    #[error("{}: {reason}", path.display())]
    ClipFormat { path: PathBuf, reason: String },

    #[error("audio playback failed: {0}")]
    Playback(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Wav(#[from] hound::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn date_range(date: &str, reason: impl Into<String>) -> Self {
        Error::DateRange { date: date.to_string(), reason: reason.into() }
    }
}
