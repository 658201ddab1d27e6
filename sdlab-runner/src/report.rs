//! Analysis manifest export (JSON).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::compete::CompetitionOutcome;

/// Provenance and outcomes of one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisManifest {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// BLAKE3 fingerprint of the loaded result corpus.
    pub corpus_fingerprint: String,
    pub observation_count: usize,
    pub outcomes: Vec<CompetitionOutcome>,
}

impl AnalysisManifest {
    pub fn new(
        corpus_fingerprint: String,
        observation_count: usize,
        outcomes: Vec<CompetitionOutcome>,
    ) -> Self {
        AnalysisManifest {
            timestamp: chrono::Utc::now(),
            corpus_fingerprint,
            observation_count,
            outcomes,
        }
    }
}

/// Write the manifest as pretty-printed JSON.
pub fn write_manifest(path: &Path, manifest: &AnalysisManifest) -> Result<()> {
    let json =
        serde_json::to_string_pretty(manifest).context("Failed to serialize analysis manifest")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write manifest to {}", path.display()))?;
    Ok(())
}
