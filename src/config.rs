//! Synthesiser configuration.
//!
//! Every field has a default, so a JSON config file only needs the keys it
//! overrides:
//!
//! ```json
//! { "sample_rate": 22050, "short_pause_ms": 200, "mode": "spell" }
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::phonemize::Mode;

/// Sample rate of the bundled monophone recordings.
pub const DEFAULT_SAMPLE_RATE: u32 = 16_000;
/// Silence inserted for `,`.
pub const DEFAULT_SHORT_PAUSE_MS: u32 = 250;
/// Silence inserted for `.`, `?` and `!`.
pub const DEFAULT_LONG_PAUSE_MS: u32 = 500;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    /// Word or spelling mode.
    pub mode: Mode,

    /// Rate every monophone must be recorded at; also the output rate.
    pub sample_rate: u32,

    pub short_pause_ms: u32,
    pub long_pause_ms: u32,

    /// Optional output volume in `0.0..=1.0`.
    pub volume: Option<f32>,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Word,
            sample_rate: DEFAULT_SAMPLE_RATE,
            short_pause_ms: DEFAULT_SHORT_PAUSE_MS,
            long_pause_ms: DEFAULT_LONG_PAUSE_MS,
            volume: None,
        }
    }
}

impl SynthConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
