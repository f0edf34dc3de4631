use anyhow::Result;
use clap::Parser;

/// Model served when none is named on the command line.
pub const DEFAULT_MODEL: &str = "microsoft/VibeVoice-Realtime-0.5B";
/// Voice used when neither the request nor the command line names one.
pub const DEFAULT_VOICE: &str = "Carter";

#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 5000)]
    pub port: u16,

    /// Model to serve: a HuggingFace repo id, an hf://owner/repo/file.onnx
    /// address, or a local path to an .onnx file
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Voice used when a request does not name one
    #[arg(long, default_value = DEFAULT_VOICE)]
    pub voice: String,
}

pub async fn run(args: ServeArgs) -> Result<()> {
    crate::server::start_server(args).await
}
