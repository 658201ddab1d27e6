//! The result-filename grammar.
//!
//! Result files are named `<trial>_<algorithm>.csv` (extension matched
//! case-insensitively), where `<trial>` is a dataset at a proportion —
//! `alon_15p`, `yeoh_100p` — and `<algorithm>` is the configuration
//! identifier, hyperparameter suffixes included — `mesdif_a1.0_b81.0`.
//!
//! The grammar is: the name must contain a `_<1..=3 digits>p_` boundary;
//! everything up to the *rightmost* such boundary is the trial, everything
//! after it (up to the extension) is the algorithm. Names that don't fit are
//! parse-misses, never errors — directory listings routinely contain readme
//! files and editor droppings.

/// The two identifiers recovered from a well-formed result filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultFileName {
    /// Dataset-at-proportion prefix, e.g. `alon_15p`.
    pub trial: String,
    /// Algorithm configuration, e.g. `mesdif_a1.0_b81.0`.
    pub algorithm: String,
}

/// Parse a result filename into its (trial, algorithm) pair.
///
/// Returns `None` for anything that does not fit the grammar: wrong
/// extension, no proportion boundary, empty trial or algorithm part.
pub fn parse_result_filename(name: &str) -> Option<ResultFileName> {
    let stem = strip_csv_extension(name)?;
    let bytes = stem.as_bytes();

    // Rightmost '_' whose prefix ends with the `_<digits>p` proportion tag.
    for split in (0..bytes.len()).rev() {
        if bytes[split] != b'_' {
            continue;
        }
        let trial = &stem[..split];
        let algorithm = &stem[split + 1..];
        if algorithm.is_empty() || !ends_with_proportion_tag(trial) {
            continue;
        }
        return Some(ResultFileName {
            trial: trial.to_string(),
            algorithm: algorithm.to_string(),
        });
    }
    None
}

/// Whether a trial key belongs to the given proportion.
///
/// The filter is an anchored substring — `_<p>p` — so `_1p` matches
/// `alon_1p` but never `alon_15p` or `alon_100p`: the trailing `p` of the
/// needle pins the full digit run.
pub fn trial_matches_proportion(trial: &str, proportion: u32) -> bool {
    trial.contains(&proportion_tag(proportion))
}

/// The anchored filter token for a proportion: `_1p`, `_15p`, ...
pub fn proportion_tag(proportion: u32) -> String {
    format!("_{proportion}p")
}

/// Strip a trailing case-insensitive `csv` extension plus the single
/// separator character before it. Returns `None` when the name is too short
/// to hold `<stem>.csv`.
fn strip_csv_extension(name: &str) -> Option<&str> {
    if name.len() < 5 || !name.is_char_boundary(name.len() - 3) {
        return None;
    }
    let (rest, ext) = name.split_at(name.len() - 3);
    if !ext.eq_ignore_ascii_case("csv") {
        return None;
    }
    // One separator character (normally '.') precedes the extension.
    let mut chars = rest.chars();
    chars.next_back()?;
    let stem = chars.as_str();
    if stem.is_empty() {
        None
    } else {
        Some(stem)
    }
}

/// Whether `s` ends with `_<1..=3 digits>p` preceded by at least one
/// character (the dataset token).
fn ends_with_proportion_tag(s: &str) -> bool {
    let Some(prefix) = s.strip_suffix('p') else {
        return false;
    };
    let digits = prefix
        .bytes()
        .rev()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if !(1..=3).contains(&digits) {
        return false;
    }
    let before = &prefix[..prefix.len() - digits];
    before.len() > 1 && before.ends_with('_')
}
