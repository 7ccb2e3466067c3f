//! `monophone-tts` — synthesise a phrase from monophone recordings.
//!
//! ```text
//! monophone-tts --monophones monophones -o out.wav "Hello, it is 25/12/2020."
//! monophone-tts -s -p "abc"
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{info, warn};

use monophone_tts::{Error, Mode, SynthConfig, Synthesizer};

#[derive(Debug, Parser)]
#[command(name = "monophone-tts")]
#[command(about = "A basic text-to-speech app that synthesises an input phrase using monophone unit selection")]
struct Cli {
    /// The phrase to be synthesised
    phrase: String,

    /// Folder containing monophone wavs
    #[arg(long, default_value = "monophones")]
    monophones: PathBuf,

    /// CMU Pronouncing Dictionary file
    #[arg(long, default_value = "cmudict.dict")]
    dictionary: PathBuf,

    /// JSON file overriding sample rate, pause lengths, mode and volume
    #[arg(long)]
    config: Option<PathBuf>,

    /// Play the output audio
    #[arg(short, long)]
    play: bool,

    /// Save the output audio to a file
    #[arg(short, long)]
    outfile: Option<PathBuf>,

    /// Spell the phrase instead of pronouncing it
    #[arg(short, long)]
    spell: bool,

    /// A float between 0.0 and 1.0 representing the desired volume
    #[arg(short, long, allow_negative_numbers = true)]
    volume: Option<f32>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SynthConfig::from_json_file(path)
            .with_context(|| format!("Cannot read config: {}", path.display()))?,
        None => SynthConfig::default(),
    };
    if cli.spell {
        config.mode = Mode::Spell;
    }
    if cli.volume.is_some() {
        config.volume = cli.volume;
    }

    let tts = Synthesizer::load(&cli.monophones, &cli.dictionary, config).with_context(|| {
        format!(
            "Cannot load monophones from {} with dictionary {}",
            cli.monophones.display(),
            cli.dictionary.display()
        )
    })?;

    let mut audio = tts
        .generate(&cli.phrase)
        .with_context(|| format!("Cannot synthesise {:?}", cli.phrase))?;

    match tts.apply_volume(&mut audio) {
        Ok(()) => {
            if let Some(v) = tts.config().volume {
                info!("Synthesised audio is rescaled by a factor of {:.4}", v);
            }
        }
        Err(e @ Error::VolumeRange { .. }) => warn!("{}; output left unscaled", e),
        Err(e) => return Err(e.into()),
    }

    if cli.play {
        audio.play().context("Playback failed")?;
    }
    if let Some(path) = &cli.outfile {
        audio
            .write_wav(path)
            .with_context(|| format!("Cannot save WAV: {}", path.display()))?;
    }
    if !cli.play && cli.outfile.is_none() {
        info!(
            "Synthesised {:.2} s of audio; pass --play or --outfile to hear it",
            audio.duration_secs()
        );
    }

    Ok(())
}
