//! Mono audio buffers and in-memory WAV encoding.

use std::io::{Cursor, Seek, Write};

use anyhow::Result;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

/// Sample rate used whenever the model is absent or reports none.
pub const DEFAULT_SAMPLE_RATE: u32 = 24_000;

/// A mono float sample buffer. Samples are nominally in [-1, 1] but are not
/// clamped until encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl AudioBuffer {
    /// Exactly one second of silence at the given rate.
    pub fn silence(sample_rate: u32) -> Self {
        Self {
            samples: vec![0.0; sample_rate as usize],
            sample_rate,
        }
    }

    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Write the buffer as uncompressed 16-bit PCM mono WAV.
pub fn write_wav_to_writer<W: Write + Seek>(writer: W, buffer: &AudioBuffer) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: buffer.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut wav_writer = WavWriter::new(writer, spec)?;
    for &sample in &buffer.samples {
        // Hard clamp to [-1, 1] at encode time only
        let val = (sample.clamp(-1.0, 1.0) * 32767.0) as i16;
        wav_writer.write_sample(val)?;
    }
    wav_writer.finalize()?;
    Ok(())
}

/// Encode the buffer into a WAV container held fully in memory.
pub fn wav_bytes(buffer: &AudioBuffer) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    write_wav_to_writer(&mut cursor, buffer)?;
    Ok(cursor.into_inner())
}

/// Decode a mono WAV held in memory back into an [`AudioBuffer`].
pub fn read_wav_from_bytes(bytes: &[u8]) -> Result<AudioBuffer> {
    let mut reader = WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();
    if spec.channels != 1 {
        anyhow::bail!("expected mono WAV, got {} channels", spec.channels);
    }

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
    };

    Ok(AudioBuffer {
        samples,
        sample_rate: spec.sample_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silence_is_one_second() {
        let buffer = AudioBuffer::silence(DEFAULT_SAMPLE_RATE);
        assert_eq!(buffer.samples.len(), 24_000);
        assert_eq!(buffer.sample_rate, 24_000);
        assert!(buffer.samples.iter().all(|&s| s == 0.0));
        assert!((buffer.duration_secs() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn wav_round_trip_preserves_samples() {
        let buffer = AudioBuffer {
            samples: vec![0.0, 0.5, -0.5, 0.25, -0.25, 1.0, -1.0],
            sample_rate: 22_050,
        };
        let bytes = wav_bytes(&buffer).unwrap();
        let decoded = read_wav_from_bytes(&bytes).unwrap();

        assert_eq!(decoded.sample_rate, 22_050);
        assert_eq!(decoded.samples.len(), buffer.samples.len());
        for (got, want) in decoded.samples.iter().zip(&buffer.samples) {
            assert!((got - want).abs() < 1e-3, "got {got}, want {want}");
        }
    }

    #[test]
    fn out_of_range_samples_are_clamped_at_encode_time() {
        let buffer = AudioBuffer {
            samples: vec![2.0, -3.0],
            sample_rate: 8_000,
        };
        let decoded = read_wav_from_bytes(&wav_bytes(&buffer).unwrap()).unwrap();
        assert!((decoded.samples[0] - 1.0).abs() < 1e-3);
        assert!((decoded.samples[1] + 1.0).abs() < 1e-3);
    }

    #[test]
    fn silence_encoding_is_deterministic() {
        let a = wav_bytes(&AudioBuffer::silence(DEFAULT_SAMPLE_RATE)).unwrap();
        let b = wav_bytes(&AudioBuffer::silence(DEFAULT_SAMPLE_RATE)).unwrap();
        assert_eq!(a, b);
    }
}
