//! # monophone-tts
//!
//! Concatenative text-to-speech: a phrase is normalised to words, the words
//! are looked up in the CMU Pronouncing Dictionary, and one pre-recorded WAV
//! per phoneme is joined end to end.
//!
//! ## Quick start
//!
//! ```no_run
//! use monophone_tts::{SynthConfig, Synthesizer};
//! use std::path::Path;
//!
//! let tts = Synthesizer::load(
//!     Path::new("monophones"),
//!     Path::new("cmudict.dict"),
//!     SynthConfig::default(),
//! ).unwrap();
//!
//! // Samples are f32 at 16 kHz by default.
//! let audio = tts.generate("On 25/12/2020 it cost 3.5 pounds.").unwrap();
//! audio.write_wav(Path::new("output.wav")).unwrap();
//! ```
//!
//! ## Pipeline
//! 1. **Tokenisation** — dates, numbers, words and `! ? . ,`; everything else
//!    is dropped.
//! 2. **Normalisation** — numbers (0–999, decimals digit by digit) and dates
//!    become words.
//! 3. **Phonemisation** — dictionary lookup per word, or per letter in
//!    spelling mode; stress digits stripped; punctuation becomes pauses.
//! 4. **Concatenation** — one monophone clip per phone, 250 ms / 500 ms
//!    silence per short / long pause.

pub mod audio;
pub mod clips;
pub mod config;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod phonemize;
pub mod tokenize;

// ─── Re-exports for convenience ─────────────────────────────────────────────

pub use audio::Audio;
pub use clips::{synthesize, ClipBank};
pub use config::SynthConfig;
pub use dictionary::{CmuDict, PronunciationDictionary};
pub use engine::Synthesizer;
pub use error::{Error, Result};
pub use phonemize::{Mode, Pause, Phone, PhoneSequence};
pub use tokenize::{Token, TokenKind};
