//! Serializable competition configuration.
//!
//! The built-in groups cover the standard analysis; a TOML file lets a run
//! compare a custom set of configurations instead:
//!
//! ```toml
//! [[competition]]
//! name = "mesdif_small"
//! competitors = ["mesdif", "mesdif_a1.0_b1.0", "mesdif_a1.0_b3.0"]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::compete::Competition;

/// Errors from loading a competitions file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading competitions file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing competitions file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("competitions file defines no competitions")]
    Empty,

    #[error("competition '{name}' needs at least 3 competitors, has {found}")]
    TooSmall { name: String, found: usize },
}

#[derive(Debug, Deserialize)]
struct CompetitionsFile {
    #[serde(default)]
    competition: Vec<Competition>,
}

/// Load and validate competition groups from a TOML file.
pub fn load_competitions(path: &Path) -> Result<Vec<Competition>, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file: CompetitionsFile = toml::from_str(&text)?;
    if file.competition.is_empty() {
        return Err(ConfigError::Empty);
    }
    for competition in &file.competition {
        if competition.competitors.len() < 3 {
            return Err(ConfigError::TooSmall {
                name: competition.name.clone(),
                found: competition.competitors.len(),
            });
        }
    }
    Ok(file.competition)
}
