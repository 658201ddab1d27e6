//! SDLab Runner — the statistical comparison pipeline.
//!
//! This crate builds on `sdlab-core` to provide:
//! - The Friedman omnibus and Nemenyi post-hoc rank tests
//! - The critical-value lookup table and critical-difference computation
//! - Competition definitions (built-in groups plus TOML overrides)
//! - The per-competition significance pipeline and its outcomes
//! - JSON analysis manifests
//! - Deterministic synthetic result trees for demos and tests

pub mod compete;
pub mod config;
pub mod critical_values;
pub mod report;
pub mod synthetic;

pub use compete::{
    builtin_competitions, display_name, format_p_value, run_competition, Competition,
    CompeteError, CompetitionOutcome, PostHocOutcome, BETA_VALUES, FAMILIES, SIGNIFICANCE_LEVEL,
};
pub use config::{load_competitions, ConfigError};
pub use critical_values::{CriticalValueTable, TableError, MAX_MODELS, SUPPORTED_LEVELS};
pub use rank_tests::{friedman_test, nemenyi_mean_ranks, FriedmanResult, StatError};
pub use report::{write_manifest, AnalysisManifest};
pub use synthetic::{write_synthetic_tree, SynthError};
