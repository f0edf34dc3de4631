pub mod audio;
pub mod engine;
pub mod model;
pub mod weights;

pub use audio::{AudioBuffer, DEFAULT_SAMPLE_RATE};
pub use engine::OnnxSpeechModel;
pub use model::{RawAudio, RawGeneration, SpeechModel};
