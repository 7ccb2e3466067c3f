//! Monophone clip bank and concatenative synthesis.
//!
//! Every `*.wav` file in the monophone directory becomes one clip, keyed by
//! its file name up to the first `.` (`aa.wav` → `aa`).  The two pause keys
//! are always synthesised in memory as silence.  All clips share one sample
//! rate; a file recorded at any other rate is rejected at load time.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use log::{info, warn};
use rayon::prelude::*;

use crate::{
    audio::Audio,
    error::{Error, Result},
    phonemize::{PhoneSequence, LONG_PAUSE_KEY, SHORT_PAUSE_KEY},
};

/// Phone name → recording, read-only once built.
#[derive(Debug, Clone)]
pub struct ClipBank {
    clips: HashMap<String, Audio>,
    sample_rate: u32,
}

impl ClipBank {
    /// Empty bank accepting clips at `sample_rate`.
    pub fn new(sample_rate: u32) -> Self {
        Self { clips: HashMap::new(), sample_rate }
    }

    /// Load every WAV in `dir` (in parallel) and add the pause clips.
    pub fn load(dir: &Path, sample_rate: u32, short_pause_ms: u32, long_pause_ms: u32) -> Result<Self> {
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && is_wav(p))
            .collect();
        paths.sort();

        let loaded = paths
            .par_iter()
            .map(|path| Audio::load_wav(path).map(|clip| (path, clip)))
            .collect::<Result<Vec<_>>>()?;

        let mut bank = Self::new(sample_rate);
        for (path, clip) in loaded {
            let key = clip_key(path);
            if clip.sample_rate != sample_rate {
                return Err(Error::ClipFormat {
                    path: path.clone(),
                    reason: format!("sample rate {} Hz, expected {} Hz", clip.sample_rate, sample_rate),
                });
            }
            if bank.clips.insert(key.clone(), clip).is_some() {
                warn!("Monophone '{}' defined twice; keeping {}", key, path.display());
            }
        }
        bank.insert_pauses(short_pause_ms, long_pause_ms);

        info!(
            "Loaded {} monophones at {} Hz from {}",
            bank.clips.len() - 2,
            sample_rate,
            dir.display()
        );
        Ok(bank)
    }

    /// Add (or replace) the short and long pause silences.
    pub fn insert_pauses(&mut self, short_pause_ms: u32, long_pause_ms: u32) {
        self.clips
            .insert(SHORT_PAUSE_KEY.to_string(), Audio::silence(short_pause_ms, self.sample_rate));
        self.clips
            .insert(LONG_PAUSE_KEY.to_string(), Audio::silence(long_pause_ms, self.sample_rate));
    }

    /// Add one clip; its rate must match the bank's.
    pub fn insert(&mut self, key: impl Into<String>, clip: Audio) -> Result<()> {
        let key = key.into();
        if clip.sample_rate != self.sample_rate {
            return Err(Error::ClipFormat {
                path: PathBuf::from(&key),
                reason: format!(
                    "sample rate {} Hz, expected {} Hz",
                    clip.sample_rate, self.sample_rate
                ),
            });
        }
        self.clips.insert(key, clip);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Audio> {
        self.clips.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.clips.contains_key(key)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Fail on the first phone with no clip, before any audio is assembled.
    pub fn check(&self, phones: &PhoneSequence) -> Result<()> {
        match phones.iter().find(|p| !self.contains(p.key())) {
            Some(missing) => Err(Error::MissingClip(missing.key().to_string())),
            None => Ok(()),
        }
    }
}

/// Concatenate the clip of every phone in order.
///
/// The result is exactly as long as the sum of its clips: no trimming and no
/// cross-fade at the joins.
pub fn synthesize(phones: &PhoneSequence, bank: &ClipBank) -> Result<Audio> {
    bank.check(phones)?;

    let clips: Vec<&Audio> = phones.iter().filter_map(|p| bank.get(p.key())).collect();
    let total: usize = clips.iter().map(|c| c.len()).sum();

    let mut samples = Vec::with_capacity(total);
    for clip in clips {
        samples.extend_from_slice(&clip.samples);
    }
    Ok(Audio::new(samples, bank.sample_rate))
}

fn is_wav(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("wav"))
}

fn clip_key(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.split('.').next())
        .unwrap_or_default()
        .to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::CmuDict;
    use crate::phonemize::word_phones;

    fn bank() -> ClipBank {
        let mut bank = ClipBank::new(16_000);
        bank.insert("hh", Audio::new(vec![0.1; 3], 16_000)).unwrap();
        bank.insert("ay", Audio::new(vec![0.2; 5], 16_000)).unwrap();
        bank.insert_pauses(250, 500);
        bank
    }

    fn hi(extra: &[&str]) -> PhoneSequence {
        let dict = CmuDict::from_entries([("hi", vec!["HH", "AY1"]), ("oy", vec!["OY1"])]);
        let mut tokens = vec!["hi".to_string()];
        tokens.extend(extra.iter().map(|s| s.to_string()));
        word_phones(&tokens, &dict).unwrap()
    }

    #[test]
    fn test_length_is_sum_of_clips() {
        let b = bank();
        let audio = synthesize(&hi(&[",", "hi", "."]), &b).unwrap();
        assert_eq!(audio.len(), 3 + 5 + 4_000 + 3 + 5 + 8_000);
        assert_eq!(audio.sample_rate, 16_000);
        assert_eq!(&audio.samples[..3], &[0.1; 3]);
        assert_eq!(&audio.samples[3..8], &[0.2; 5]);
    }

    #[test]
    fn test_missing_clip() {
        let err = synthesize(&hi(&["oy"]), &bank()).unwrap_err();
        assert!(matches!(err, Error::MissingClip(ref k) if k == "oy"));
    }

    #[test]
    fn test_insert_rejects_other_rate() {
        let mut b = bank();
        assert!(matches!(
            b.insert("aa", Audio::new(vec![0.0], 44_100)),
            Err(Error::ClipFormat { .. })
        ));
        assert!(!b.contains("aa"));
    }

    #[test]
    fn test_clip_key() {
        assert_eq!(clip_key(Path::new("/m/aa.wav")), "aa");
        assert_eq!(clip_key(Path::new("/m/ch.take2.wav")), "ch");
        assert!(is_wav(Path::new("x.WAV")));
        assert!(!is_wav(Path::new("x.txt")));
    }
}
