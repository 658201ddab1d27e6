//! Domain constants and types shared across the pipeline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The ten gene-expression datasets every results tree is organized by.
/// Each name is both a subfolder of the results root and the leading token
/// of the result filenames inside it.
pub const DATASETS: [&str; 10] = [
    "alon",
    "burczynski",
    "chiaretti",
    "chin",
    "christensen",
    "gravier",
    "nakayama",
    "sun",
    "tian",
    "yeoh",
];

/// Feature proportions (percent of features retained) every experiment was
/// run at. Sample vectors concatenate slices in exactly this order.
pub const PROPORTIONS: [u32; 8] = [1, 2, 5, 10, 15, 25, 50, 100];

/// A quality metric recorded in the result files.
///
/// Only these two participate in significance testing; asking for anything
/// else fails at the string boundary (`Metric::from_str`), which keeps the
/// rest of the pipeline total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    /// Weighted relative accuracy, bounded above by 0.25.
    Wracc,
    /// Subgroup support, in [0, 1].
    Support,
}

impl Metric {
    /// The column name this metric appears under in result files.
    pub fn field(self) -> &'static str {
        match self {
            Metric::Wracc => "WRACC",
            Metric::Support => "Support",
        }
    }

    /// Flip a maximize-is-better value into minimize-is-better, using the
    /// metric's upper bound. The post-hoc rank test orders ascending, so
    /// better raw values must map to smaller transformed ones.
    pub fn invert(self, value: f64) -> f64 {
        match self {
            Metric::Wracc => 0.25 - value,
            Metric::Support => 1.0 - value,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

/// Unsupported metric name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown metric '{name}' (supported: WRACC, Support)")]
pub struct MetricParseError {
    pub name: String,
}

impl FromStr for Metric {
    type Err = MetricParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("wracc") {
            Ok(Metric::Wracc)
        } else if s.eq_ignore_ascii_case("support") {
            Ok(Metric::Support)
        } else {
            Err(MetricParseError { name: s.to_string() })
        }
    }
}

/// One parsed result-file row: metric name → string-encoded value.
///
/// Values stay strings because the files mix numerics with the literal
/// `"NaN"` and the exclusion rules inspect the raw text, not the parsed
/// number. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    fields: BTreeMap<String, String>,
}

impl Observation {
    /// The raw value recorded for `field`, if the row has that column.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Field names present in this row, in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, String)> for Observation {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Observation {
            fields: iter.into_iter().collect(),
        }
    }
}

impl From<BTreeMap<String, String>> for Observation {
    fn from(fields: BTreeMap<String, String>) -> Self {
        Observation { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_parses_case_insensitively() {
        assert_eq!("WRACC".parse::<Metric>().unwrap(), Metric::Wracc);
        assert_eq!("wracc".parse::<Metric>().unwrap(), Metric::Wracc);
        assert_eq!("Support".parse::<Metric>().unwrap(), Metric::Support);
        assert_eq!("SUPPORT".parse::<Metric>().unwrap(), Metric::Support);
    }

    #[test]
    fn unknown_metric_is_an_error() {
        let err = "Confidence".parse::<Metric>().unwrap_err();
        assert!(err.to_string().contains("Confidence"));
    }

    #[test]
    fn inversion_flips_direction() {
        // Higher raw value → lower inverted value, for both metrics.
        assert!(Metric::Wracc.invert(0.20) < Metric::Wracc.invert(0.10));
        assert!(Metric::Support.invert(0.9) < Metric::Support.invert(0.5));
    }

    #[test]
    fn observation_lookup() {
        let obs: Observation = [
            ("WRACC".to_string(), "0.1234".to_string()),
            ("Support".to_string(), "NaN".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(obs.get("WRACC"), Some("0.1234"));
        assert_eq!(obs.get("Support"), Some("NaN"));
        assert_eq!(obs.get("Confidence"), None);
        assert_eq!(obs.len(), 2);
    }
}
