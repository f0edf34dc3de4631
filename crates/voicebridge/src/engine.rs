//! ONNX Runtime binding for the speech model boundary.
//!
//! The session is the opaque capability: text goes in as a codepoint id
//! tensor, audio comes out in whatever shape the graph produces. Graphs that
//! declare a `sample_rate` output or accept a `speaker_id` input get those
//! wired up; everything else still works through the bare path.

use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use ndarray::{Array1, Array2};
use ort::session::builder::{GraphOptimizationLevel, SessionBuilder};
use ort::session::Session;
use ort::value::{DynValue, Tensor};
use tracing::{info, warn};

use crate::model::{RawAudio, RawGeneration, SpeechModel};
use crate::weights::resolve_model;

/// Graph input carrying the text's Unicode scalar values, shape `[1, len]`.
const TEXT_INPUT: &str = "input_ids";
/// Optional graph input selecting a speaker from the bundled table.
const SPEAKER_INPUT: &str = "speaker_id";
/// Preferred name of the audio output; unnamed graphs use the first output.
const AUDIO_OUTPUT: &str = "audio";
/// Optional scalar output reporting the graph's native sample rate.
const RATE_OUTPUT: &str = "sample_rate";

pub struct OnnxSpeechModel {
    // ort sessions need &mut to run; concurrent generation calls against the
    // single session are serialized here.
    session: Mutex<Session>,
    speakers: Vec<String>,
}

impl OnnxSpeechModel {
    /// Resolve, download and load the named model.
    ///
    /// Prefers the GPU when built with the `cuda` feature and the runtime
    /// reports a device; falls back to CPU with a diagnostic otherwise.
    pub fn load(model_spec: &str) -> Result<Self> {
        let artifacts = resolve_model(model_spec)
            .with_context(|| format!("failed to resolve model '{model_spec}'"))?;

        let builder = Session::builder()?.with_optimization_level(GraphOptimizationLevel::Level3)?;
        let session = commit_session(builder, &artifacts.model_path).with_context(|| {
            format!(
                "failed to load onnx graph from {}",
                artifacts.model_path.display()
            )
        })?;

        let speakers = match &artifacts.speakers_path {
            Some(path) => load_speaker_table(path)?,
            None => Vec::new(),
        };
        if speakers.is_empty() {
            info!("no speaker table bundled with the model; voice selection disabled");
        } else {
            info!(count = speakers.len(), "loaded speaker table");
        }

        Ok(Self {
            session: Mutex::new(session),
            speakers,
        })
    }

    fn speaker_index(&self, voice: &str) -> i64 {
        match self
            .speakers
            .iter()
            .position(|s| s.eq_ignore_ascii_case(voice))
        {
            Some(idx) => idx as i64,
            None => {
                warn!(voice = %voice, "unknown voice; using the first bundled speaker");
                0
            }
        }
    }
}

impl SpeechModel for OnnxSpeechModel {
    fn generate(&self, text: &str, voice: &str) -> Result<RawGeneration> {
        let ids: Vec<i64> = text.chars().map(|c| c as i64).collect();
        let len = ids.len();
        let input_ids =
            Array2::from_shape_vec((1, len), ids).context("failed building input_ids tensor")?;
        let text_tensor = Tensor::from_array(input_ids)?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow!("model session lock poisoned"))?;

        let outputs = if self.speakers.is_empty() {
            session.run(ort::inputs![TEXT_INPUT => text_tensor])?
        } else {
            let speaker = Array1::from_vec(vec![self.speaker_index(voice)]);
            session.run(ort::inputs![
                TEXT_INPUT => text_tensor,
                SPEAKER_INPUT => Tensor::from_array(speaker)?
            ])?
        };

        let sample_rate = outputs.get(RATE_OUTPUT).and_then(extract_rate);

        let fallback;
        let audio_value: &DynValue = match outputs.get(AUDIO_OUTPUT) {
            Some(value) => value,
            None => {
                fallback = outputs
                    .values()
                    .next()
                    .ok_or_else(|| anyhow!("model returned no output tensors"))?;
                &fallback
            }
        };
        let (shape, data) = audio_value
            .try_extract_tensor::<f32>()
            .context("failed extracting f32 audio tensor")?;
        let audio = RawAudio {
            data: data.to_vec(),
            shape: shape.iter().map(|&d| d as usize).collect(),
        };

        Ok(match sample_rate {
            Some(sample_rate) => RawGeneration::WithRate { audio, sample_rate },
            None => RawGeneration::Bare { audio },
        })
    }
}

/// Scalar rate outputs show up as i64 in some exports and f32 in others.
fn extract_rate(value: &DynValue) -> Option<u32> {
    if let Ok((_, data)) = value.try_extract_tensor::<i64>() {
        return data.first().map(|&rate| rate as u32);
    }
    if let Ok((_, data)) = value.try_extract_tensor::<f32>() {
        return data.first().map(|&rate| rate as u32);
    }
    None
}

#[cfg(feature = "cuda")]
fn commit_session(builder: SessionBuilder, model_path: &Path) -> Result<Session> {
    use ort::ep::{self, ExecutionProvider};

    let cuda = ep::CUDA::default();
    if matches!(cuda.is_available(), Ok(true)) {
        info!("CUDA device available; placing the model on the GPU");
        return Ok(builder
            .with_execution_providers([cuda.build()])?
            .commit_from_file(model_path)?);
    }

    warn!("the accelerated runtime reports no CUDA device; falling back to CPU");
    Ok(builder.commit_from_file(model_path)?)
}

#[cfg(not(feature = "cuda"))]
fn commit_session(builder: SessionBuilder, model_path: &Path) -> Result<Session> {
    info!("built without the cuda feature; running the model on CPU");
    Ok(builder.commit_from_file(model_path)?)
}

fn load_speaker_table(path: &Path) -> Result<Vec<String>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed reading speaker table {}", path.display()))?;
    let speakers: Vec<String> = serde_json::from_str(&raw)
        .with_context(|| format!("malformed speaker table {}", path.display()))?;
    Ok(speakers)
}
