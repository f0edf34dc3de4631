//! VoiceBridge CLI
//!
//! Serves a pretrained text-to-speech model over HTTP, or synthesizes
//! one-shot from the command line.

use anyhow::Result;
use clap::Parser;

use voicebridge_cli::commands;

#[derive(Parser)]
#[command(
    name = "voicebridge",
    author,
    version,
    about = "HTTP bridge for a pretrained text-to-speech model"
)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Generate audio from text and write it to a WAV file
    Generate(commands::generate::GenerateArgs),

    /// Start the HTTP TTS server
    ///
    /// Loads the model once at startup; if loading fails the server still
    /// starts and answers every request with silence.
    Serve(commands::serve::ServeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        // Generation is CPU-bound, run synchronously
        Commands::Generate(cmd_args) => commands::generate::run(cmd_args),
        Commands::Serve(cmd_args) => commands::serve::run(cmd_args).await,
    }
}
