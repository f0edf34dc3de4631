use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use voicebridge::{audio, AudioBuffer, DEFAULT_SAMPLE_RATE};

use crate::server::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    model_ready: bool,
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        model_ready: state.is_ready(),
    })
}

#[derive(Deserialize)]
pub struct TtsRequest {
    text: String,
    voice: Option<String>,
}

/// Turn one request into one WAV payload. Always 200: a missing model and a
/// failed generation both degrade to one second of silence.
pub async fn tts(State(state): State<AppState>, Json(req): Json<TtsRequest>) -> Response {
    let voice = req
        .voice
        .clone()
        .unwrap_or_else(|| state.default_voice.clone());

    let buffer = match state.model.clone() {
        None => {
            info!(text = %req.text, "model not loaded; answering with silence");
            AudioBuffer::silence(DEFAULT_SAMPLE_RATE)
        }
        Some(model) => {
            let text = req.text.clone();
            let speak_voice = voice.clone();

            // Generation is CPU/GPU-bound; keep it off the async workers
            let generated = tokio::task::spawn_blocking(move || {
                model
                    .generate(&text, &speak_voice)
                    .and_then(|raw| raw.into_buffer(DEFAULT_SAMPLE_RATE))
            })
            .await;

            match generated {
                Ok(Ok(buffer)) => {
                    info!(voice = %voice, text = %req.text, "generated speech");
                    buffer
                }
                Ok(Err(err)) => {
                    let detail = format!("{err:#}");
                    error!(
                        voice = %voice,
                        text = %req.text,
                        error = %detail,
                        "generation failed; answering with silence"
                    );
                    AudioBuffer::silence(DEFAULT_SAMPLE_RATE)
                }
                Err(err) => {
                    error!(error = %err, "generation task died; answering with silence");
                    AudioBuffer::silence(DEFAULT_SAMPLE_RATE)
                }
            }
        }
    };

    let wav = audio::wav_bytes(&buffer).unwrap_or_else(|err| {
        // Writing to an in-memory cursor; failing here means the buffer
        // itself is unencodable, so fall back to silence one more time.
        error!(error = %err, "WAV encoding failed; answering with silence");
        audio::wav_bytes(&AudioBuffer::silence(DEFAULT_SAMPLE_RATE)).unwrap_or_default()
    });

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/wav"));
    (StatusCode::OK, headers, Body::from(wav)).into_response()
}
