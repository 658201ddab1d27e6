//! SDLab CLI — aggregate benchmark results and compare algorithms.
//!
//! Commands:
//! - `compete` — run the Friedman/Nemenyi pipeline and render CD diagrams
//! - `convergence` — count convergences and render per-family line charts
//! - `density` — render the beta-prior reference curves
//! - `synth` — write a deterministic synthetic results tree

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use sdlab_core::convergence::{convergences_by_beta, count_convergences};
use sdlab_core::domain::{Metric, PROPORTIONS};
use sdlab_core::sampler::sample_all_proportions;
use sdlab_core::store::ResultStore;
use sdlab_plot::{
    render_beta_density, render_cd_diagram, render_convergence_chart, ConvergenceSeries,
    FamilyPanel,
};
use sdlab_runner::{
    builtin_competitions, format_p_value, load_competitions, run_competition, write_manifest,
    write_synthetic_tree, AnalysisManifest, CriticalValueTable, BETA_VALUES, FAMILIES,
};

#[derive(Parser)]
#[command(
    name = "sdlab",
    about = "SDLab CLI — subgroup-discovery benchmark comparison"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MetricArg {
    Wracc,
    Support,
    Both,
}

impl MetricArg {
    fn metrics(self) -> Vec<Metric> {
        match self {
            MetricArg::Wracc => vec![Metric::Wracc],
            MetricArg::Support => vec![Metric::Support],
            MetricArg::Both => vec![Metric::Wracc, Metric::Support],
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the significance pipeline and render critical-difference diagrams.
    Compete {
        /// Results root (one subfolder per dataset).
        #[arg(long, default_value = "data")]
        data: PathBuf,

        /// Output directory for diagrams.
        #[arg(long, default_value = "images")]
        images: PathBuf,

        /// Metric(s) to compare.
        #[arg(long, value_enum, default_value = "both")]
        metric: MetricArg,

        /// TOML file with custom competition groups.
        #[arg(long)]
        groups: Option<PathBuf>,

        /// Critical-value table CSV (defaults to the built-in copy).
        #[arg(long)]
        table: Option<PathBuf>,

        /// Also write a JSON manifest of all outcomes.
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Count convergences and render the per-family line charts.
    Convergence {
        /// Results root (one subfolder per dataset).
        #[arg(long, default_value = "data")]
        data: PathBuf,

        /// Output directory for the chart.
        #[arg(long, default_value = "images")]
        images: PathBuf,
    },
    /// Render the beta-prior reference density curves.
    Density {
        /// Output directory for the figure.
        #[arg(long, default_value = "images")]
        images: PathBuf,
    },
    /// Write a deterministic synthetic results tree.
    Synth {
        /// Directory to create the tree under.
        #[arg(long, default_value = "data")]
        data: PathBuf,

        /// Seed controlling the generated values.
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Compete {
            data,
            images,
            metric,
            groups,
            table,
            report,
        } => run_compete(&data, &images, metric, groups.as_deref(), table.as_deref(), report.as_deref()),
        Commands::Convergence { data, images } => run_convergence(&data, &images),
        Commands::Density { images } => run_density(&images),
        Commands::Synth { data, seed } => run_synth(&data, seed),
    }
}

fn run_compete(
    data: &Path,
    images: &Path,
    metric: MetricArg,
    groups: Option<&Path>,
    table_path: Option<&Path>,
    report: Option<&Path>,
) -> Result<()> {
    let store = ResultStore::load(data)?;
    let table = match table_path {
        Some(path) => CriticalValueTable::load(path)?,
        None => CriticalValueTable::builtin(),
    };
    let competitions = match groups {
        Some(path) => load_competitions(path)?,
        None => builtin_competitions(),
    };
    std::fs::create_dir_all(images)
        .with_context(|| format!("creating {}", images.display()))?;

    let mut outcomes = Vec::new();
    for metric in metric.metrics() {
        let samples = sample_all_proportions(metric, &store);
        for competition in &competitions {
            let outcome = run_competition(competition, metric, &samples, &table)?;
            println!(
                "{metric}, {}: pvalue = {}",
                competition.name,
                format_p_value(outcome.p_value)
            );
            if let Some(post_hoc) = &outcome.post_hoc {
                let path = images.join(format!("{}_{metric}.png", competition.name));
                render_cd_diagram(
                    &path,
                    &post_hoc.display_names,
                    &post_hoc.mean_ranks,
                    post_hoc.critical_difference,
                    &metric.to_string(),
                )
                .map_err(|e| anyhow!("rendering {}: {e}", path.display()))?;
                log::info!("wrote {}", path.display());
            }
            outcomes.push(outcome);
        }
    }

    if let Some(report) = report {
        let manifest =
            AnalysisManifest::new(store.fingerprint(), store.observation_count(), outcomes);
        write_manifest(report, &manifest)?;
        log::info!("wrote {}", report.display());
    }
    Ok(())
}

fn run_convergence(data: &Path, images: &Path) -> Result<()> {
    let store = ResultStore::load(data)?;
    std::fs::create_dir_all(images)
        .with_context(|| format!("creating {}", images.display()))?;

    // Counts per proportion first; the panels regroup them per family.
    let per_proportion: Vec<_> = PROPORTIONS
        .iter()
        .map(|&p| count_convergences(p, &store))
        .collect();

    let panels: Vec<FamilyPanel> = FAMILIES
        .iter()
        .map(|family| {
            let series = std::iter::once("")
                .chain(BETA_VALUES)
                .map(|beta| {
                    let counts = per_proportion
                        .iter()
                        .map(|counts| {
                            convergences_by_beta(family, counts)
                                .get(beta)
                                .copied()
                                .unwrap_or(0)
                        })
                        .collect();
                    ConvergenceSeries {
                        label: if beta.is_empty() {
                            "base".to_string()
                        } else {
                            format!("β: {beta}")
                        },
                        counts,
                    }
                })
                .collect();
            FamilyPanel {
                family: family.to_string(),
                series,
            }
        })
        .collect();

    let path = images.join("convergence.png");
    render_convergence_chart(&path, &panels, &PROPORTIONS)
        .map_err(|e| anyhow!("rendering {}: {e}", path.display()))?;
    log::info!("wrote {}", path.display());
    Ok(())
}

fn run_density(images: &Path) -> Result<()> {
    std::fs::create_dir_all(images)
        .with_context(|| format!("creating {}", images.display()))?;

    let shapes: Vec<(f64, f64)> = BETA_VALUES
        .iter()
        .map(|beta| {
            beta.parse::<f64>()
                .map(|b| (1.0, b))
                .map_err(|e| anyhow!("bad beta value '{beta}': {e}"))
        })
        .collect::<Result<_>>()?;

    let path = images.join("beta.png");
    render_beta_density(&path, &shapes).map_err(|e| anyhow!("rendering {}: {e}", path.display()))?;
    log::info!("wrote {}", path.display());
    Ok(())
}

fn run_synth(data: &Path, seed: u64) -> Result<()> {
    let files = write_synthetic_tree(data, seed)?;
    println!("wrote {files} synthetic result files under {}", data.display());
    Ok(())
}
