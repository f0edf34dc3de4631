//! Model artifact resolution.
//!
//! A model can be named three ways:
//! - `hf://owner/repo/file.onnx[@revision]`: a single file on the Hub
//! - `owner/repo`: a Hub repo carrying `model.onnx` (plus an optional
//!   `speakers.json` table)
//! - a local filesystem path to an `.onnx` file
//!
//! Hub access honors `HF_TOKEN` from the environment for gated repos.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hf_hub::api::sync::ApiBuilder;
use hf_hub::{Repo, RepoType};

/// Filename fetched when the model is named by bare repo id.
const MODEL_FILE: &str = "model.onnx";
/// Optional voice table shipped alongside the graph.
const SPEAKERS_FILE: &str = "speakers.json";

#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    pub model_path: PathBuf,
    pub speakers_path: Option<PathBuf>,
}

/// Resolve a model spec to local files, downloading from the Hub if needed.
pub fn resolve_model(spec: &str) -> Result<ModelArtifacts> {
    if let Some(rest) = spec.strip_prefix("hf://") {
        let (repo_id, revision, filename) = parse_hf_spec(rest)
            .with_context(|| format!("invalid hf:// address: {spec}"))?;
        let model_path = hub_file(&repo_id, revision.as_deref(), &filename)?;
        // Not every repo ships a speaker table
        let speakers_path = hub_file(&repo_id, revision.as_deref(), SPEAKERS_FILE).ok();
        return Ok(ModelArtifacts {
            model_path,
            speakers_path,
        });
    }

    let local = Path::new(spec);
    if local.exists() {
        let speakers_path = local
            .parent()
            .map(|dir| dir.join(SPEAKERS_FILE))
            .filter(|p| p.exists());
        return Ok(ModelArtifacts {
            model_path: local.to_path_buf(),
            speakers_path,
        });
    }

    // A bare `owner/repo` id
    if spec.split('/').count() == 2 && !spec.starts_with('/') {
        let model_path = hub_file(spec, None, MODEL_FILE)?;
        let speakers_path = hub_file(spec, None, SPEAKERS_FILE).ok();
        return Ok(ModelArtifacts {
            model_path,
            speakers_path,
        });
    }

    anyhow::bail!(
        "model '{}' is neither an hf:// address, a Hub repo id, nor an existing file",
        spec
    )
}

/// Split `owner/repo/path/to/file[@revision]` into its parts.
fn parse_hf_spec(rest: &str) -> Result<(String, Option<String>, String)> {
    let parts: Vec<&str> = rest.split('/').collect();
    if parts.len() < 3 {
        anyhow::bail!("expected owner/repo/filename[@revision]");
    }
    let repo_id = format!("{}/{}", parts[0], parts[1]);
    let filename_with_revision = parts[2..].join("/");

    let (filename, revision) = match filename_with_revision.rfind('@') {
        Some(at_pos) => {
            let (f, r) = filename_with_revision.split_at(at_pos);
            (f.to_string(), Some(r[1..].to_string()))
        }
        None => (filename_with_revision, None),
    };

    Ok((repo_id, revision, filename))
}

fn hub_file(repo_id: &str, revision: Option<&str>, filename: &str) -> Result<PathBuf> {
    let token = std::env::var("HF_TOKEN").ok();
    let api = ApiBuilder::new().with_token(token).build()?;

    let repo = match revision {
        Some(rev) => Repo::with_revision(repo_id.to_string(), RepoType::Model, rev.to_string()),
        None => Repo::model(repo_id.to_string()),
    };

    let path = api
        .repo(repo)
        .get(filename)
        .with_context(|| format!("failed to fetch {filename} from {repo_id}"))?;
    Ok(path)
}
