//! Competitions: which configurations race each other, and the significance
//! pipeline that judges them.
//!
//! A competition is an ordered list of algorithm identifiers. The pipeline
//! runs the Friedman omnibus over the competitors' all-proportions sample
//! vectors; only when the omnibus is significant does it invert the metric
//! (the post-hoc test ranks ascending), compute Nemenyi mean ranks, and
//! derive the critical difference from the lookup table. The caller decides
//! what to do with the outcome — print, export, render.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use sdlab_core::domain::Metric;
use sdlab_core::sampler::SampleVectors;

use crate::critical_values::{CriticalValueTable, TableError};
use crate::rank_tests::{friedman_test, nemenyi_mean_ranks, StatError};

/// Significance threshold for the omnibus gate and the critical difference.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// The three algorithm families with hyperparameterized variants.
pub const FAMILIES: [&str; 3] = ["mesdif", "nmefsd", "ssdp"];

/// Beta values the hyperparameterized variants were run with.
pub const BETA_VALUES: [&str; 5] = ["1.0", "3.0", "9.0", "27.0", "81.0"];

/// An ordered group of competing configurations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competition {
    pub name: String,
    pub competitors: Vec<String>,
}

impl Competition {
    pub fn new(name: &str, competitors: &[&str]) -> Self {
        Competition {
            name: name.to_string(),
            competitors: competitors.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// The built-in competitions: each family's base variant against its five
/// beta-parameterized variants, plus one cross-family comparison.
pub fn builtin_competitions() -> Vec<Competition> {
    let mut competitions: Vec<Competition> = FAMILIES
        .iter()
        .map(|family| {
            let mut competitors = vec![family.to_string()];
            competitors.extend(
                BETA_VALUES
                    .iter()
                    .map(|beta| format!("{family}_a1.0_b{beta}")),
            );
            Competition {
                name: family.to_string(),
                competitors,
            }
        })
        .collect();

    competitions.push(Competition::new(
        "all",
        &[
            "ssdp",
            "mesdif_a1.0_b81.0",
            "nmefsd_a1.0_b81.0",
            "ssdp_a1.0_b81.0",
            "mesdif",
            "nmefsd",
        ],
    ));
    competitions
}

/// Errors from the significance pipeline.
#[derive(Debug, Error)]
pub enum CompeteError {
    #[error("competition '{competition}' references '{competitor}', which has no samples")]
    MissingCompetitor {
        competition: String,
        competitor: String,
    },

    #[error("competition '{competition}': {source}")]
    Stat {
        competition: String,
        #[source]
        source: StatError,
    },

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Post-hoc results, present only when the omnibus was significant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostHocOutcome {
    /// Competitor names prettified for display, pipeline order.
    pub display_names: Vec<String>,
    /// Nemenyi mean ranks, pipeline order; lower is better.
    pub mean_ranks: Vec<f64>,
    /// Mean-rank gap above which two competitors differ significantly.
    pub critical_difference: f64,
}

/// Outcome of one (competition, metric) pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitionOutcome {
    pub competition: String,
    pub metric: String,
    pub p_value: f64,
    pub post_hoc: Option<PostHocOutcome>,
}

/// Run the pipeline for one competition.
///
/// `samples` is the all-proportions sample map for `metric`; competitors
/// are pulled from it in the competition's order, so the emitted ranks line
/// up with the group definition.
pub fn run_competition(
    competition: &Competition,
    metric: Metric,
    samples: &SampleVectors,
    table: &CriticalValueTable,
) -> Result<CompetitionOutcome, CompeteError> {
    let mut vectors = Vec::with_capacity(competition.competitors.len());
    for competitor in &competition.competitors {
        let vector = samples
            .get(competitor)
            .ok_or_else(|| CompeteError::MissingCompetitor {
                competition: competition.name.clone(),
                competitor: competitor.clone(),
            })?;
        vectors.push(vector.clone());
    }

    let omnibus = friedman_test(&vectors).map_err(|source| CompeteError::Stat {
        competition: competition.name.clone(),
        source,
    })?;
    log::debug!(
        "{} ({metric}): Friedman statistic {:.4}, p = {:.6}",
        competition.name,
        omnibus.statistic,
        omnibus.p_value
    );

    if omnibus.p_value >= SIGNIFICANCE_LEVEL {
        return Ok(CompetitionOutcome {
            competition: competition.name.clone(),
            metric: metric.to_string(),
            p_value: omnibus.p_value,
            post_hoc: None,
        });
    }

    // The post-hoc test ranks ascending; flip maximize-is-better metrics.
    for vector in &mut vectors {
        for value in vector.iter_mut() {
            *value = metric.invert(*value);
        }
    }

    let mean_ranks = nemenyi_mean_ranks(&vectors).map_err(|source| CompeteError::Stat {
        competition: competition.name.clone(),
        source,
    })?;
    let critical_difference = table.critical_difference(
        competition.competitors.len(),
        vectors[0].len(),
        SIGNIFICANCE_LEVEL,
    )?;

    Ok(CompetitionOutcome {
        competition: competition.name.clone(),
        metric: metric.to_string(),
        p_value: omnibus.p_value,
        post_hoc: Some(PostHocOutcome {
            display_names: competition.competitors.iter().map(|c| display_name(c)).collect(),
            mean_ranks,
            critical_difference,
        }),
    })
}

/// Prettify a competitor identifier for diagrams: hyperparameter markers
/// become Greek letters, so `mesdif_a1.0_b81.0` reads `mesdif α 1.0 β 81.0`.
pub fn display_name(competitor: &str) -> String {
    competitor.replace("_a", " α ").replace("_b", " β ")
}

/// Format a p-value for the text report: scientific notation below 1e-4,
/// four decimals otherwise.
pub fn format_p_value(p_value: f64) -> String {
    if p_value < 0.0001 {
        format!("{p_value:.2e}")
    } else {
        format!("{p_value:.4}")
    }
}
