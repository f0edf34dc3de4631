//! HTTP API server
//!
//! Axum-based bridge exposing the speech model behind `POST /tts`. The model
//! is loaded exactly once, before the listener binds; a failed load leaves
//! the server running in degraded mode, answering every request with silence.

use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info, warn};

use voicebridge::{OnnxSpeechModel, SpeechModel};

use crate::commands::serve::ServeArgs;

pub mod handlers;
pub mod routes;
pub mod state;

pub async fn start_server(args: ServeArgs) -> Result<()> {
    // Initialize tracing
    let _ = tracing_subscriber::fmt::try_init();

    info!(model = %args.model, "loading speech model");
    let model: Option<Arc<dyn SpeechModel>> = match OnnxSpeechModel::load(&args.model) {
        Ok(model) => {
            info!(model = %args.model, "speech model loaded");
            Some(Arc::new(model))
        }
        Err(err) => {
            let detail = format!("{err:#}");
            error!(model = %args.model, error = %detail, "failed to load speech model");
            warn!(
                "likely causes: no network access to download the weights (set HF_TOKEN for \
                 gated repos), the ONNX Runtime library is missing, or the graph is \
                 incompatible; serving silence until restart"
            );
            None
        }
    };

    let state = state::AppState::new(model, args.voice.clone());
    let app = routes::create_router(state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
