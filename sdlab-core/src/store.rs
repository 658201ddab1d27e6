//! Result loading and the two-view observation store.
//!
//! One traversal of the results tree builds both indexes the downstream
//! components need: by-algorithm (significance testing, sampling) and
//! by-trial (dataset-centric summaries). The views hold the same
//! observations; lists concatenate across files in insertion order and
//! duplicates are allowed — multiple files for the same (trial, algorithm)
//! pair contribute independently.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::{Observation, DATASETS};
use crate::filename::parse_result_filename;

/// Observations grouped by the outer key, then the inner key.
pub type IndexView = BTreeMap<String, BTreeMap<String, Vec<Observation>>>;

/// Errors from the result-loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("results root has no '{dataset}' subfolder (looked at {path})")]
    MissingDataset { dataset: &'static str, path: PathBuf },

    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// All loaded observations, indexed both ways.
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    by_algorithm: IndexView,
    by_trial: IndexView,
    observation_count: usize,
}

impl ResultStore {
    /// Load every result file under `root`.
    ///
    /// `root` must contain one subfolder per known dataset. Within each
    /// subfolder, regular files whose names fit the result grammar are
    /// parsed as header-driven CSV; everything else is skipped silently
    /// (a parse-miss, not an error).
    pub fn load(root: &Path) -> Result<Self, LoadError> {
        let mut store = ResultStore::default();

        for dataset in DATASETS {
            let folder = root.join(dataset);
            if !folder.is_dir() {
                return Err(LoadError::MissingDataset {
                    dataset,
                    path: folder,
                });
            }

            let entries = std::fs::read_dir(&folder).map_err(|source| LoadError::Io {
                path: folder.clone(),
                source,
            })?;
            for entry in entries {
                let entry = entry.map_err(|source| LoadError::Io {
                    path: folder.clone(),
                    source,
                })?;
                let path = entry.path();
                if !path.is_file() {
                    continue;
                }
                let name = entry.file_name();
                let Some(parsed) = name.to_str().and_then(parse_result_filename) else {
                    log::debug!("skipping non-result file {}", path.display());
                    continue;
                };
                store.load_file(&path, &parsed.trial, &parsed.algorithm)?;
            }
        }

        log::info!(
            "loaded {} observations across {} algorithms",
            store.observation_count,
            store.by_algorithm.len()
        );
        Ok(store)
    }

    fn load_file(&mut self, path: &Path, trial: &str, algorithm: &str) -> Result<(), LoadError> {
        let mut reader = csv::Reader::from_path(path).map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        for row in reader.deserialize::<BTreeMap<String, String>>() {
            let fields = row.map_err(|source| LoadError::Csv {
                path: path.to_path_buf(),
                source,
            })?;
            self.push(trial, algorithm, Observation::from(fields));
        }
        Ok(())
    }

    /// Append one observation to both views.
    pub fn push(&mut self, trial: &str, algorithm: &str, observation: Observation) {
        self.by_algorithm
            .entry(algorithm.to_string())
            .or_default()
            .entry(trial.to_string())
            .or_default()
            .push(observation.clone());
        self.by_trial
            .entry(trial.to_string())
            .or_default()
            .entry(algorithm.to_string())
            .or_default()
            .push(observation);
        self.observation_count += 1;
    }

    /// `algorithm → trial → observations`.
    pub fn by_algorithm(&self) -> &IndexView {
        &self.by_algorithm
    }

    /// `trial → algorithm → observations`.
    pub fn by_trial(&self) -> &IndexView {
        &self.by_trial
    }

    /// Algorithm identifiers present in the store, sorted.
    pub fn algorithms(&self) -> impl Iterator<Item = &str> {
        self.by_algorithm.keys().map(String::as_str)
    }

    /// Total number of observations loaded.
    pub fn observation_count(&self) -> usize {
        self.observation_count
    }

    /// Deterministic BLAKE3 hash over the full corpus.
    ///
    /// Both views hold the same data, so hashing the by-algorithm view in
    /// its (sorted) iteration order identifies the corpus regardless of the
    /// order files were read in.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for (algorithm, trials) in &self.by_algorithm {
            hasher.update(algorithm.as_bytes());
            hasher.update(&[0]);
            for (trial, observations) in trials {
                hasher.update(trial.as_bytes());
                hasher.update(&[0]);
                for observation in observations {
                    for (field, value) in observation.fields() {
                        hasher.update(field.as_bytes());
                        hasher.update(&[0]);
                        hasher.update(value.as_bytes());
                        hasher.update(&[0]);
                    }
                    hasher.update(&[1]);
                }
            }
        }
        hasher.finalize().to_hex().to_string()
    }
}
