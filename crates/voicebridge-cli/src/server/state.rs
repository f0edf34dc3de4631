use std::sync::Arc;

use voicebridge::SpeechModel;

/// Shared handler state, constructed once at startup.
///
/// The model reference is written exactly once, before the first request can
/// be served, and only read afterwards; there is no reload operation.
/// Handlers must treat an absent model as an always-possible state.
#[derive(Clone)]
pub struct AppState {
    pub model: Option<Arc<dyn SpeechModel>>,
    pub default_voice: String,
}

impl AppState {
    pub fn new(model: Option<Arc<dyn SpeechModel>>, default_voice: impl Into<String>) -> Self {
        Self {
            model,
            default_voice: default_voice.into(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.model.is_some()
    }
}
