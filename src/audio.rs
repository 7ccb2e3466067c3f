//! Mono audio buffers and WAV I/O.
//!
//! Samples are held as `f32` in `[-1.0, 1.0]` regardless of the bit depth of
//! the source file; output is written as 16-bit PCM.

use std::path::Path;

use log::info;

use crate::error::{Error, Result};

/// Lowest accepted [`Audio::rescale`] volume.
pub const MIN_VOLUME: f32 = 0.0;
/// Highest accepted [`Audio::rescale`] volume.
pub const MAX_VOLUME: f32 = 1.0;

/// A mono sample buffer with its sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Audio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl Audio {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self { samples, sample_rate }
    }

    /// Zero-filled buffer of `floor(duration_ms / 1000 × sample_rate)` samples.
    pub fn silence(duration_ms: u32, sample_rate: u32) -> Self {
        let len = (duration_ms as u64 * sample_rate as u64 / 1000) as usize;
        Self::new(vec![0.0; len], sample_rate)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }

    /// Multiply every sample by `factor`.
    pub fn scale(&mut self, factor: f32) {
        for s in &mut self.samples {
            *s *= factor;
        }
    }

    /// Scale by a user-supplied volume in [`MIN_VOLUME`]`..=`[`MAX_VOLUME`].
    ///
    /// Out-of-range (or NaN) volumes are rejected and the buffer is left as is.
    pub fn rescale(&mut self, volume: f32) -> Result<()> {
        if !(MIN_VOLUME..=MAX_VOLUME).contains(&volume) {
            return Err(Error::VolumeRange { value: volume, min: MIN_VOLUME, max: MAX_VOLUME });
        }
        self.scale(volume);
        Ok(())
    }

    // ── WAV I/O ──────────────────────────────────────────────────────────────

    /// Read a mono WAV file (integer PCM of any depth, or 32-bit float).
    pub fn load_wav(path: &Path) -> Result<Self> {
        let reader = hound::WavReader::open(path)?;
        let spec = reader.spec();
        if spec.channels != 1 {
            return Err(Error::ClipFormat {
                path: path.to_path_buf(),
                reason: format!("expected mono audio, found {} channels", spec.channels),
            });
        }

        let samples = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .into_samples::<f32>()
                .collect::<std::result::Result<Vec<_>, _>>()?,
            hound::SampleFormat::Int => {
                let full_scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / full_scale))
                    .collect::<std::result::Result<Vec<_>, _>>()?
            }
        };

        Ok(Self::new(samples, spec.sample_rate))
    }

    /// Write the buffer as a 16-bit PCM WAV file.
    pub fn write_wav(&self, output_path: &Path) -> Result<()> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(output_path, spec)?;
        for &s in &self.samples {
            // f32 [-1.0, 1.0] → i16 [-32768, 32767]
            let s16 = (s * i16::MAX as f32).clamp(i16::MIN as f32, i16::MAX as f32) as i16;
            writer.write_sample(s16)?;
        }
        writer.finalize()?;
        info!(
            "Saved {} samples ({:.2} s) to {}",
            self.samples.len(),
            self.duration_secs(),
            output_path.display()
        );
        Ok(())
    }

    // ── Playback ─────────────────────────────────────────────────────────────

    /// Play through the default output device, blocking until done.
    #[cfg(feature = "playback")]
    pub fn play(&self) -> Result<()> {
        let stream = rodio::OutputStreamBuilder::open_default_stream()
            .map_err(|e| Error::Playback(e.to_string()))?;
        let sink = rodio::Sink::connect_new(stream.mixer());
        sink.append(rodio::buffer::SamplesBuffer::new(
            1,
            self.sample_rate,
            self.samples.clone(),
        ));
        sink.sleep_until_end();
        Ok(())
    }

    /// Playback is unavailable without the `playback` feature.
    #[cfg(not(feature = "playback"))]
    pub fn play(&self) -> Result<()> {
        Err(Error::Playback(
            "built without the `playback` feature; rebuild with --features playback".to_string(),
        ))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silence_length() {
        assert_eq!(Audio::silence(250, 16_000).len(), 4_000);
        assert_eq!(Audio::silence(500, 16_000).len(), 8_000);
        // floor(250 / 1000 × 22050) = 5512
        assert_eq!(Audio::silence(250, 22_050).len(), 5_512);
        assert!(Audio::silence(250, 16_000).samples.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_scale_inverse_restores() {
        let original = Audio::new(vec![0.5, -0.25, 0.125, 0.0, -1.0], 16_000);
        for f in [0.3f32, 0.5, 2.0, 7.0] {
            let mut a = original.clone();
            a.scale(f);
            a.scale(1.0 / f);
            for (x, y) in a.samples.iter().zip(&original.samples) {
                assert!((x - y).abs() < 1e-6, "factor {}: {} vs {}", f, x, y);
            }
        }
    }

    #[test]
    fn test_rescale_range() {
        let mut a = Audio::new(vec![0.5, -0.5], 16_000);
        a.rescale(0.5).unwrap();
        assert_eq!(a.samples, vec![0.25, -0.25]);

        for bad in [-0.1f32, 1.5, f32::NAN] {
            let err = a.rescale(bad).unwrap_err();
            assert!(matches!(err, Error::VolumeRange { .. }));
        }
        assert_eq!(a.samples, vec![0.25, -0.25], "rejected volume must not touch audio");
    }

    #[test]
    fn test_wav_roundtrip_and_channel_check() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        let audio = Audio::new(vec![0.0, 0.5, -0.5, 0.25], 16_000);
        audio.write_wav(&path).unwrap();

        let back = Audio::load_wav(&path).unwrap();
        assert_eq!(back.sample_rate, 16_000);
        assert_eq!(back.len(), 4);
        for (x, y) in back.samples.iter().zip(&audio.samples) {
            assert!((x - y).abs() < 1e-3);
        }

        let stereo = dir.path().join("stereo.wav");
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 16_000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut w = hound::WavWriter::create(&stereo, spec).unwrap();
        w.write_sample(0i16).unwrap();
        w.write_sample(0i16).unwrap();
        w.finalize().unwrap();
        assert!(matches!(Audio::load_wav(&stereo), Err(Error::ClipFormat { .. })));
    }
}
