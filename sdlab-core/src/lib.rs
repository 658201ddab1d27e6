//! SDLab Core — domain types, result-file grammar, observation store, sampling.
//!
//! This crate contains the data layer of the benchmark-analysis pipeline:
//! - Domain constants and types (datasets, proportions, metrics, observations)
//! - The result-filename grammar (`<trial>_<algorithm>.csv`)
//! - The one-pass result store with its two index views
//! - Metric sampling with per-metric exclusion rules
//! - Convergence counting for the descriptive plots
//! - Shared numeric primitives (ln-gamma family, chi-squared tail)

pub mod convergence;
pub mod domain;
pub mod filename;
pub mod numeric;
pub mod sampler;
pub mod store;

pub use convergence::{convergences_by_beta, count_convergences};
pub use domain::{Metric, MetricParseError, Observation, DATASETS, PROPORTIONS};
pub use filename::{parse_result_filename, trial_matches_proportion, ResultFileName};
pub use sampler::{sample_all_proportions, sample_slice, SampleVectors};
pub use store::{LoadError, ResultStore};
