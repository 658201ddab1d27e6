//! Metric sampling — per-slice means with metric-specific exclusion rules.
//!
//! Every function here is pure: store in, per-algorithm sample vectors out.
//! A slice is one (algorithm, trial, metric) combination; its sample is the
//! arithmetic mean of the surviving observation values, or NaN when nothing
//! survives — never a fabricated zero.

use std::collections::BTreeMap;

use crate::domain::{Metric, PROPORTIONS};
use crate::filename::trial_matches_proportion;
use crate::store::ResultStore;

/// One sample vector per algorithm. Entries are ordered by trial key within
/// a proportion (and by proportion across slices), so positions align across
/// algorithms — the matched-sample property the rank tests depend on.
pub type SampleVectors = BTreeMap<String, Vec<f64>>;

/// Mean metric value per (algorithm, trial) for one proportion.
///
/// Exclusions, in order: rows without the metric field; rows recording the
/// literal `"NaN"`; for WRACC only, rows whose raw text opens with `0.`
/// followed by six or more zero digits (the near-zero exhaustion pattern);
/// rows whose value fails to parse as a float. Exclusion is per-value and
/// silent.
pub fn sample_slice(proportion: u32, metric: Metric, store: &ResultStore) -> SampleVectors {
    let mut samples = SampleVectors::new();

    for (algorithm, trials) in store.by_algorithm() {
        let mut vector = Vec::new();
        for (trial, observations) in trials {
            if !trial_matches_proportion(trial, proportion) {
                continue;
            }
            let mut sum = 0.0;
            let mut count = 0u32;
            for observation in observations {
                let Some(raw) = observation.get(metric.field()) else {
                    continue;
                };
                if raw == "NaN" {
                    continue;
                }
                if metric == Metric::Wracc && near_zero_wracc(raw) {
                    continue;
                }
                let Ok(value) = raw.parse::<f64>() else {
                    continue;
                };
                sum += value;
                count += 1;
            }
            if count > 0 {
                vector.push(sum / f64::from(count));
            } else {
                vector.push(f64::NAN);
            }
        }
        samples.insert(algorithm.clone(), vector);
    }
    samples
}

/// Concatenated sample vectors across every proportion, in the fixed
/// proportion order. This is the vector handed to the significance tester.
pub fn sample_all_proportions(metric: Metric, store: &ResultStore) -> SampleVectors {
    let mut samples = SampleVectors::new();
    for proportion in PROPORTIONS {
        for (algorithm, slice) in sample_slice(proportion, metric, store) {
            samples.entry(algorithm).or_default().extend(slice);
        }
    }
    samples
}

/// The WRACC near-zero exhaustion pattern: `0.` followed by at least six
/// zero digits. A prefix match — trailing non-zero digits do not rescue the
/// value.
fn near_zero_wracc(raw: &str) -> bool {
    let Some(fraction) = raw.strip_prefix("0.") else {
        return false;
    };
    fraction.bytes().take_while(|b| *b == b'0').count() >= 6
}
