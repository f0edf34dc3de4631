//! One-shot synthesis to a WAV file.
//!
//! Unlike the server, a missing or broken model is a hard error here; there
//! is no client to shield with silence.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use voicebridge::{audio, OnnxSpeechModel, SpeechModel, DEFAULT_SAMPLE_RATE};

use crate::commands::serve::{DEFAULT_MODEL, DEFAULT_VOICE};

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Text to synthesize
    #[arg(short, long)]
    pub text: String,

    /// Voice to synthesize with
    #[arg(short, long, default_value = DEFAULT_VOICE)]
    pub voice: String,

    /// Output audio file path
    #[arg(short, long, default_value = "output.wav")]
    pub output: PathBuf,

    /// Model: a HuggingFace repo id, an hf:// address, or a local .onnx path
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let model = OnnxSpeechModel::load(&args.model)
        .with_context(|| format!("failed to load model '{}'", args.model))?;
    println!("  ✓ Model loaded");

    let buffer = model
        .generate(&args.text, &args.voice)?
        .into_buffer(DEFAULT_SAMPLE_RATE)?;
    println!(
        "  ✓ Generated {:.2}s of audio at {} Hz",
        buffer.duration_secs(),
        buffer.sample_rate
    );

    let file = std::fs::File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    audio::write_wav_to_writer(std::io::BufWriter::new(file), &buffer)?;
    println!("  ✓ Saved to {}", args.output.display());

    Ok(())
}
