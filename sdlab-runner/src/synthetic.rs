//! Synthetic result trees for demos and tests.
//!
//! Generates a full results layout — every dataset, proportion, and built-in
//! competitor — with plausible observation values, including the occasional
//! `"NaN"` and near-zero row the exclusion rules exist for. Output is
//! deterministic: each file's RNG is seeded from a BLAKE3 hash of the run
//! seed and the file name, so the same seed always writes the same tree.

use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use sdlab_core::domain::{DATASETS, PROPORTIONS};

use crate::compete::builtin_competitions;

/// Rows written per result file. Enough that a slice practically never
/// loses every row to the random NaN/near-zero draws.
const ROWS_PER_FILE: usize = 8;

#[derive(Debug, Error)]
pub enum SynthError {
    #[error("writing {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("writing {path}: {source}")]
    Csv {
        path: std::path::PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Write a synthetic results tree under `root`.
///
/// Creates the ten dataset subfolders and one file per (dataset, proportion,
/// competitor) triple. Returns the number of files written.
pub fn write_synthetic_tree(root: &Path, seed: u64) -> Result<usize, SynthError> {
    let competitors = all_builtin_competitors();
    let mut files = 0;

    for dataset in DATASETS {
        let folder = root.join(dataset);
        std::fs::create_dir_all(&folder).map_err(|source| SynthError::Io {
            path: folder.clone(),
            source,
        })?;
        for proportion in PROPORTIONS {
            for competitor in &competitors {
                let name = format!("{dataset}_{proportion}p_{competitor}.csv");
                let path = folder.join(&name);
                write_result_file(&path, &name, seed)?;
                files += 1;
            }
        }
    }
    Ok(files)
}

/// Every competitor appearing in any built-in competition, deduplicated.
fn all_builtin_competitors() -> Vec<String> {
    let mut competitors: Vec<String> = builtin_competitions()
        .into_iter()
        .flat_map(|c| c.competitors)
        .collect();
    competitors.sort();
    competitors.dedup();
    competitors
}

fn write_result_file(path: &Path, name: &str, seed: u64) -> Result<(), SynthError> {
    let mut rng = file_rng(name, seed);
    let mut writer = csv::Writer::from_path(path).map_err(|source| SynthError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    let io_err = |source: csv::Error| SynthError::Csv {
        path: path.to_path_buf(),
        source,
    };

    writer
        .write_record(["WRACC", "Support", "Confidence"])
        .map_err(io_err)?;
    for _ in 0..ROWS_PER_FILE {
        let wracc = synth_value(&mut rng, 0.25);
        let support = synth_value(&mut rng, 1.0);
        let confidence = format!("{:.6}", rng.gen_range(0.0..1.0));
        writer
            .write_record([wracc, support, confidence])
            .map_err(io_err)?;
    }
    writer.flush().map_err(|source| SynthError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// One metric value: usually a plausible float below `bound`, sometimes the
/// literal `"NaN"` or a near-zero string exercising the exclusion rules.
fn synth_value(rng: &mut StdRng, bound: f64) -> String {
    if rng.gen_bool(0.05) {
        "NaN".to_string()
    } else if rng.gen_bool(0.05) {
        "0.0000000".to_string()
    } else {
        format!("{:.6}", rng.gen_range(0.01..bound))
    }
}

/// Deterministic per-file RNG from the run seed and file name.
fn file_rng(name: &str, seed: u64) -> StdRng {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&seed.to_le_bytes());
    hasher.update(name.as_bytes());
    let bytes: [u8; 32] = *hasher.finalize().as_bytes();
    StdRng::from_seed(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdlab_core::store::ResultStore;

    #[test]
    fn tree_is_complete_and_loadable() {
        let dir = tempfile::tempdir().unwrap();
        let files = write_synthetic_tree(dir.path(), 7).unwrap();

        let competitors = all_builtin_competitors();
        assert_eq!(files, DATASETS.len() * PROPORTIONS.len() * competitors.len());

        let store = ResultStore::load(dir.path()).unwrap();
        assert_eq!(store.observation_count(), files * ROWS_PER_FILE);
        for competitor in &competitors {
            assert!(store.by_algorithm().contains_key(competitor));
        }
    }

    #[test]
    fn same_seed_same_tree() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        write_synthetic_tree(a.path(), 42).unwrap();
        write_synthetic_tree(b.path(), 42).unwrap();

        let fp_a = ResultStore::load(a.path()).unwrap().fingerprint();
        let fp_b = ResultStore::load(b.path()).unwrap().fingerprint();
        assert_eq!(fp_a, fp_b);
    }

    #[test]
    fn different_seeds_differ() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        write_synthetic_tree(a.path(), 1).unwrap();
        write_synthetic_tree(b.path(), 2).unwrap();

        let fp_a = ResultStore::load(a.path()).unwrap().fingerprint();
        let fp_b = ResultStore::load(b.path()).unwrap().fingerprint();
        assert_ne!(fp_a, fp_b);
    }
}
