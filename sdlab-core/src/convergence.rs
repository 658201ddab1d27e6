//! Convergence counting for the descriptive plots.
//!
//! An observation "converged" when its Support value is present, not the
//! literal `"NaN"`, and not a pure-zero decimal. Counting is per observation,
//! not per trial — an algorithm with many observations at one dataset
//! accumulates multiple increments. No inference happens here.

use std::collections::BTreeMap;

use crate::domain::Metric;
use crate::filename::trial_matches_proportion;
use crate::store::ResultStore;

/// The metric convergence is judged on.
pub const CONVERGENCE_METRIC: Metric = Metric::Support;

/// Number of converged observations per algorithm at one proportion.
pub fn count_convergences(proportion: u32, store: &ResultStore) -> BTreeMap<String, u64> {
    let mut convergences = BTreeMap::new();

    for (algorithm, trials) in store.by_algorithm() {
        let mut converged = 0u64;
        for (trial, observations) in trials {
            if !trial_matches_proportion(trial, proportion) {
                continue;
            }
            for observation in observations {
                let Some(raw) = observation.get(CONVERGENCE_METRIC.field()) else {
                    continue;
                };
                if raw == "NaN" || all_zero_decimal(raw) {
                    continue;
                }
                converged += 1;
            }
        }
        convergences.insert(algorithm.clone(), converged);
    }
    convergences
}

/// Group one family's convergence counts by beta suffix.
///
/// Keys are the beta values appearing as `_b<digits>.<digit>` in the
/// algorithm identifiers, with `""` for the family's base variant. Only
/// algorithms whose identifier contains `family` contribute.
pub fn convergences_by_beta(
    family: &str,
    convergences: &BTreeMap<String, u64>,
) -> BTreeMap<String, u64> {
    let mut betas = BTreeMap::new();
    for (algorithm, &count) in convergences {
        if !algorithm.contains(family) {
            continue;
        }
        let key = extract_beta(algorithm).unwrap_or_default();
        betas.insert(key, count);
    }
    betas
}

/// The convergence exclusion pattern: `0.` followed by only zero digits.
/// A full match — stricter than the sampler's WRACC prefix rule, so `0.00`
/// is non-convergent but `0.00001` is not.
fn all_zero_decimal(raw: &str) -> bool {
    match raw.strip_prefix("0.") {
        Some(fraction) => !fraction.is_empty() && fraction.bytes().all(|b| b == b'0'),
        None => false,
    }
}

/// First `_b<1..=2 digits>.<digit>` occurrence in an algorithm identifier,
/// returning the `<digits>.<digit>` beta token.
fn extract_beta(algorithm: &str) -> Option<String> {
    let bytes = algorithm.as_bytes();
    for (i, window) in bytes.windows(2).enumerate() {
        if window != b"_b" {
            continue;
        }
        let rest = &algorithm[i + 2..];
        let digits = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
        if !(1..=2).contains(&digits) {
            continue;
        }
        let tail = &rest[digits..];
        if tail.len() >= 2 && tail.starts_with('.') && tail.as_bytes()[1].is_ascii_digit() {
            return Some(format!("{}.{}", &rest[..digits], &tail[1..2]));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Observation;

    fn support(value: &str) -> Observation {
        [("Support".to_string(), value.to_string())]
            .into_iter()
            .collect()
    }

    #[test]
    fn counts_observations_not_trials() {
        let mut store = ResultStore::default();
        store.push("alon_1p", "mesdif", support("0.5"));
        store.push("alon_1p", "mesdif", support("0.7"));
        store.push("chin_1p", "mesdif", support("0.9"));
        store.push("alon_2p", "mesdif", support("0.9")); // other proportion

        let counts = count_convergences(1, &store);
        assert_eq!(counts["mesdif"], 3);
    }

    #[test]
    fn zero_and_nan_are_not_convergences() {
        let mut store = ResultStore::default();
        store.push("alon_1p", "mesdif", support("NaN"));
        store.push("alon_1p", "mesdif", support("0.00"));
        store.push("alon_1p", "mesdif", support("0.000000"));

        let counts = count_convergences(1, &store);
        assert_eq!(counts["mesdif"], 0);
    }

    #[test]
    fn nearly_zero_with_a_nonzero_digit_converges() {
        let mut store = ResultStore::default();
        store.push("alon_1p", "mesdif", support("0.00001"));

        let counts = count_convergences(1, &store);
        assert_eq!(counts["mesdif"], 1);
    }

    #[test]
    fn missing_support_field_is_skipped() {
        let mut store = ResultStore::default();
        let wracc_only: Observation = [("WRACC".to_string(), "0.2".to_string())]
            .into_iter()
            .collect();
        store.push("alon_1p", "mesdif", wracc_only);

        let counts = count_convergences(1, &store);
        assert_eq!(counts["mesdif"], 0);
    }

    #[test]
    fn zero_pattern_is_a_full_match() {
        assert!(all_zero_decimal("0.0"));
        assert!(all_zero_decimal("0.00000"));
        assert!(!all_zero_decimal("0.00001"));
        assert!(!all_zero_decimal("0."));
        assert!(!all_zero_decimal("1.00"));
        assert!(!all_zero_decimal("0.0001x"));
    }

    #[test]
    fn beta_grouping_keys_by_suffix() {
        let counts: BTreeMap<String, u64> = [
            ("mesdif".to_string(), 10),
            ("mesdif_a1.0_b1.0".to_string(), 20),
            ("mesdif_a1.0_b81.0".to_string(), 30),
            ("ssdp".to_string(), 99),
        ]
        .into_iter()
        .collect();

        let betas = convergences_by_beta("mesdif", &counts);
        assert_eq!(betas[""], 10);
        assert_eq!(betas["1.0"], 20);
        assert_eq!(betas["81.0"], 30);
        assert!(!betas.contains_key("99"));
        assert_eq!(betas.len(), 3);
    }

    #[test]
    fn beta_extraction() {
        assert_eq!(extract_beta("mesdif_a1.0_b81.0"), Some("81.0".to_string()));
        assert_eq!(extract_beta("nmefsd_a1.0_b3.0"), Some("3.0".to_string()));
        assert_eq!(extract_beta("ssdp"), None);
        assert_eq!(extract_beta("mesdif_a1.0"), None);
    }
}
