//! The speech model boundary.
//!
//! Models are opaque: they take text plus a voice identifier and hand back
//! audio in whatever shape and rate they natively produce. The tagged
//! [`RawGeneration`] decoding isolates that variability in one place, so the
//! request handler only ever sees a flat mono [`AudioBuffer`] or an error.

use anyhow::Result;

use crate::audio::AudioBuffer;

/// A loaded text-to-speech capability.
///
/// Implementations must be callable from concurrent requests; if the
/// underlying runtime is not, they serialize internally.
pub trait SpeechModel: Send + Sync {
    fn generate(&self, text: &str, voice: &str) -> Result<RawGeneration>;
}

/// Audio exactly as the model produced it: a row-major buffer plus its shape.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAudio {
    pub data: Vec<f32>,
    pub shape: Vec<usize>,
}

impl RawAudio {
    pub fn from_mono(data: Vec<f32>) -> Self {
        let len = data.len();
        Self {
            data,
            shape: vec![len],
        }
    }

    /// Collapse any multi-dimensional shape into a single mono sequence.
    ///
    /// A pure reshape: channels and batch dimensions are concatenated in
    /// row-major order, never downmixed.
    pub fn flatten(self) -> Result<Vec<f32>> {
        let expected: usize = self.shape.iter().product();
        if expected != self.data.len() {
            anyhow::bail!(
                "audio shape {:?} does not cover {} samples",
                self.shape,
                self.data.len()
            );
        }
        Ok(self.data)
    }
}

/// What a generation call actually returned: some models report their native
/// sample rate alongside the audio, some hand back the audio alone.
#[derive(Debug, Clone, PartialEq)]
pub enum RawGeneration {
    WithRate { audio: RawAudio, sample_rate: u32 },
    Bare { audio: RawAudio },
}

impl RawGeneration {
    /// Normalize into a mono buffer, falling back to `default_rate` when the
    /// model did not report a rate of its own.
    pub fn into_buffer(self, default_rate: u32) -> Result<AudioBuffer> {
        let (audio, sample_rate) = match self {
            RawGeneration::WithRate { audio, sample_rate } => (audio, sample_rate),
            RawGeneration::Bare { audio } => (audio, default_rate),
        };
        Ok(AudioBuffer {
            samples: audio.flatten()?,
            sample_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::DEFAULT_SAMPLE_RATE;

    #[test]
    fn bare_output_uses_default_rate() {
        let raw = RawGeneration::Bare {
            audio: RawAudio::from_mono(vec![0.1, 0.2, 0.3]),
        };
        let buffer = raw.into_buffer(DEFAULT_SAMPLE_RATE).unwrap();
        assert_eq!(buffer.sample_rate, 24_000);
        assert_eq!(buffer.samples, vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn reported_rate_overrides_default() {
        let raw = RawGeneration::WithRate {
            audio: RawAudio::from_mono(vec![0.1]),
            sample_rate: 48_000,
        };
        let buffer = raw.into_buffer(DEFAULT_SAMPLE_RATE).unwrap();
        assert_eq!(buffer.sample_rate, 48_000);
    }

    #[test]
    fn multidimensional_audio_flattens_row_major() {
        let raw = RawGeneration::Bare {
            audio: RawAudio {
                data: vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
                shape: vec![2, 3],
            },
        };
        let buffer = raw.into_buffer(DEFAULT_SAMPLE_RATE).unwrap();
        assert_eq!(buffer.samples, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn batched_mono_keeps_sample_count() {
        let raw = RawGeneration::Bare {
            audio: RawAudio {
                data: vec![0.5; 10],
                shape: vec![1, 10],
            },
        };
        let buffer = raw.into_buffer(DEFAULT_SAMPLE_RATE).unwrap();
        assert_eq!(buffer.samples.len(), 10);
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let raw = RawGeneration::Bare {
            audio: RawAudio {
                data: vec![0.0; 6],
                shape: vec![2, 4],
            },
        };
        assert!(raw.into_buffer(DEFAULT_SAMPLE_RATE).is_err());
    }
}
