//! Phrase → audio, end to end.
//!
//! [`Synthesizer`] owns the pronunciation dictionary, the clip bank and the
//! configuration, all loaded once and read-only afterwards.

use std::path::Path;

use log::debug;

use crate::{
    audio::Audio,
    clips::{synthesize, ClipBank},
    config::SynthConfig,
    dictionary::{CmuDict, PronunciationDictionary},
    error::Result,
    normalize::normalize_tokens,
    phonemize::{build, PhoneSequence},
    tokenize::tokenize,
};

/// Loaded synthesiser handle.
pub struct Synthesizer<D = CmuDict> {
    dictionary: D,
    clips: ClipBank,
    config: SynthConfig,
}

impl Synthesizer<CmuDict> {
    /// Load the monophone directory and a CMU dictionary file.
    pub fn load(monophones: &Path, dictionary: &Path, config: SynthConfig) -> Result<Self> {
        let clips = ClipBank::load(
            monophones,
            config.sample_rate,
            config.short_pause_ms,
            config.long_pause_ms,
        )?;
        let dictionary = CmuDict::load(dictionary)?;
        Ok(Self::new(dictionary, clips, config))
    }
}

impl<D: PronunciationDictionary> Synthesizer<D> {
    pub fn new(dictionary: D, clips: ClipBank, config: SynthConfig) -> Self {
        Self { dictionary, clips, config }
    }

    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    pub fn clips(&self) -> &ClipBank {
        &self.clips
    }

    /// Tokenise, normalise and phonemise `phrase` in the configured mode.
    pub fn phones(&self, phrase: &str) -> Result<PhoneSequence> {
        let tokens = tokenize(phrase);
        let words = normalize_tokens(&tokens)?;
        debug!("normalized {:?} -> {:?}", phrase, words);
        build(&words, &self.dictionary, self.config.mode)
    }

    /// Synthesise `phrase` at the bank's sample rate, without volume scaling.
    ///
    /// Any failure aborts the whole phrase; no partial audio is returned.
    pub fn generate(&self, phrase: &str) -> Result<Audio> {
        let phones = self.phones(phrase)?;
        synthesize(&phones, &self.clips)
    }

    /// Apply the configured volume, if any.
    ///
    /// On a range error `audio` is left unscaled.
    pub fn apply_volume(&self, audio: &mut Audio) -> Result<()> {
        match self.config.volume {
            Some(v) => audio.rescale(v),
            None => Ok(()),
        }
    }

    /// Synthesise `phrase`, apply the volume and write a 16-bit WAV.
    pub fn generate_to_file(&self, phrase: &str, output_path: &Path) -> Result<()> {
        let mut audio = self.generate(phrase)?;
        self.apply_volume(&mut audio)?;
        audio.write_wav(output_path)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::phonemize::Mode;

    const DICT: &str = "\
a AH0
a(2) EY1
c S IY1
e IY1
n EH1 N
o OW1
t T IY1
hello HH AH0 L OW1
world W ER1 L D
three TH R IY1
point P OY1 N T
one W AH1 N
four F AO1 R
";

    fn synth(mode: Mode, volume: Option<f32>) -> Synthesizer {
        let dictionary = CmuDict::parse(DICT).unwrap();
        let mut clips = ClipBank::new(16_000);
        for key in ["hh", "ah", "l", "ow", "w", "er", "d", "th", "r", "iy", "p", "oy", "n", "t", "f", "ao", "s", "ey", "eh"] {
            clips.insert(key, Audio::new(vec![0.5; 10], 16_000)).unwrap();
        }
        clips.insert_pauses(250, 500);
        Synthesizer::new(dictionary, clips, SynthConfig { mode, volume, ..SynthConfig::default() })
    }

    #[test]
    fn test_hello_world() {
        let s = synth(Mode::Word, None);
        let phones = s.phones("Hello world.").unwrap();
        assert_eq!(phones.keys(), vec!["hh", "ah", "l", "ow", "w", "er", "l", "d", "lp"]);
        let audio = s.generate("Hello world.").unwrap();
        assert_eq!(audio.len(), 8 * 10 + 8_000);
    }

    #[test]
    fn test_decimal_number() {
        let s = synth(Mode::Word, None);
        assert_eq!(
            s.phones("3.14").unwrap().keys(),
            vec!["th", "r", "iy", "p", "oy", "n", "t", "w", "ah", "n", "f", "ao", "r"]
        );
    }

    #[test]
    fn test_spell_cat() {
        let s = synth(Mode::Spell, None);
        assert_eq!(s.phones("Cat").unwrap().keys(), vec!["s", "iy", "ey", "t", "iy"]);
    }

    #[test]
    fn test_spell_number_uses_normalized_words() {
        // No digit has an entry, so "1" must be spelled as o-n-e.
        let s = synth(Mode::Spell, None);
        assert_eq!(s.phones("1").unwrap().keys(), vec!["ow", "eh", "n", "iy"]);
        let word = synth(Mode::Word, None);
        assert_eq!(word.phones("1").unwrap().keys(), vec!["w", "ah", "n"]);
    }

    #[test]
    fn test_missing_clip_produces_no_audio() {
        let mut clips = ClipBank::new(16_000);
        for key in ["hh", "ah", "l", "ow"] {
            clips.insert(key, Audio::new(vec![0.5; 10], 16_000)).unwrap();
        }
        clips.insert_pauses(250, 500);
        let s = Synthesizer::new(CmuDict::parse(DICT).unwrap(), clips, SynthConfig::default());
        assert_eq!(s.generate("hello").unwrap().len(), 4 * 10);
        let err = s.generate("hello world").unwrap_err();
        assert!(matches!(err, Error::MissingClip(ref k) if k == "w"));
    }

    #[test]
    fn test_unknown_word_produces_no_audio() {
        let s = synth(Mode::Word, None);
        let err = s.generate("hello zxqvbn").unwrap_err();
        assert!(matches!(err, Error::UnknownWord(ref w) if w == "zxqvbn"));
    }

    #[test]
    fn test_volume() {
        let s = synth(Mode::Word, Some(0.5));
        let mut audio = s.generate("hello").unwrap();
        s.apply_volume(&mut audio).unwrap();
        assert!(audio.samples.iter().all(|&x| x == 0.25));

        let loud = synth(Mode::Word, Some(3.0));
        let mut audio = loud.generate("hello").unwrap();
        assert!(matches!(loud.apply_volume(&mut audio), Err(Error::VolumeRange { .. })));
        assert!(audio.samples.iter().all(|&x| x == 0.5));
    }
}
