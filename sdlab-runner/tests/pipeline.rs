//! End-to-end pipeline tests: result tree on disk → store → sample vectors
//! → omnibus gate → post-hoc ranks.

use std::fs;
use std::path::Path;

use sdlab_core::domain::{Metric, DATASETS, PROPORTIONS};
use sdlab_core::sampler::sample_all_proportions;
use sdlab_core::store::ResultStore;
use sdlab_runner::{
    run_competition, write_synthetic_tree, Competition, CompeteError, CriticalValueTable,
    StatError, SIGNIFICANCE_LEVEL,
};

fn scaffold_datasets(root: &Path) {
    for dataset in DATASETS {
        fs::create_dir_all(root.join(dataset)).unwrap();
    }
}

/// Write one result file per (dataset, proportion) for `algorithm`, every
/// row holding `value` for both metrics.
fn write_uniform_results(root: &Path, algorithm: &str, value: f64) {
    for dataset in DATASETS {
        for proportion in PROPORTIONS {
            let path = root
                .join(dataset)
                .join(format!("{dataset}_{proportion}p_{algorithm}.csv"));
            fs::write(
                &path,
                format!("WRACC,Support\n{value:.6},{value:.6}\n{value:.6},{value:.6}\n"),
            )
            .unwrap();
        }
    }
}

#[test]
fn identical_competitors_never_reach_post_hoc() {
    let dir = tempfile::tempdir().unwrap();
    scaffold_datasets(dir.path());
    for algorithm in ["alpha", "bravo", "carol"] {
        write_uniform_results(dir.path(), algorithm, 0.125);
    }

    let store = ResultStore::load(dir.path()).unwrap();
    let samples = sample_all_proportions(Metric::Wracc, &store);
    // 10 datasets × 8 proportions = 80 matched slots per competitor.
    assert_eq!(samples["alpha"].len(), 80);

    let competition = Competition::new("tie", &["alpha", "bravo", "carol"]);
    let outcome = run_competition(
        &competition,
        Metric::Wracc,
        &samples,
        &CriticalValueTable::builtin(),
    )
    .unwrap();

    assert_eq!(outcome.p_value, 1.0);
    assert!(outcome.post_hoc.is_none());
}

#[test]
fn a_dominant_competitor_wins_the_ranking() {
    let dir = tempfile::tempdir().unwrap();
    scaffold_datasets(dir.path());
    write_uniform_results(dir.path(), "strong", 0.24);
    write_uniform_results(dir.path(), "weak", 0.04);
    write_uniform_results(dir.path(), "weaker", 0.02);

    let store = ResultStore::load(dir.path()).unwrap();
    let samples = sample_all_proportions(Metric::Wracc, &store);

    let competition = Competition::new("dominance", &["weak", "weaker", "strong"]);
    let outcome = run_competition(
        &competition,
        Metric::Wracc,
        &samples,
        &CriticalValueTable::builtin(),
    )
    .unwrap();

    assert!(outcome.p_value < SIGNIFICANCE_LEVEL);
    let post_hoc = outcome.post_hoc.expect("post-hoc must run");

    // After inversion the uniformly-higher competitor takes the lowest
    // (best) mean rank, and the gap to the others exceeds the critical
    // difference.
    assert_eq!(post_hoc.mean_ranks[2], 1.0);
    assert!(post_hoc.mean_ranks[0] - post_hoc.mean_ranks[2] > post_hoc.critical_difference);
    assert_eq!(post_hoc.display_names[2], "strong");
}

#[test]
fn support_metric_uses_its_own_inversion() {
    let dir = tempfile::tempdir().unwrap();
    scaffold_datasets(dir.path());
    write_uniform_results(dir.path(), "high_support", 0.95);
    write_uniform_results(dir.path(), "mid_support", 0.50);
    write_uniform_results(dir.path(), "low_support", 0.10);

    let store = ResultStore::load(dir.path()).unwrap();
    let samples = sample_all_proportions(Metric::Support, &store);

    let competition = Competition::new(
        "support",
        &["low_support", "high_support", "mid_support"],
    );
    let outcome = run_competition(
        &competition,
        Metric::Support,
        &samples,
        &CriticalValueTable::builtin(),
    )
    .unwrap();

    let post_hoc = outcome.post_hoc.expect("post-hoc must run");
    assert_eq!(post_hoc.mean_ranks[1], 1.0); // high_support is best
    assert_eq!(post_hoc.mean_ranks[0], 3.0); // low_support is worst
}

#[test]
fn a_gap_in_the_data_rejects_the_competition() {
    let dir = tempfile::tempdir().unwrap();
    scaffold_datasets(dir.path());
    for algorithm in ["alpha", "bravo", "carol"] {
        write_uniform_results(dir.path(), algorithm, 0.1);
    }
    // Poison one slice: all of alpha's rows at (alon, 5p) become NaN.
    fs::write(
        dir.path().join("alon").join("alon_5p_alpha.csv"),
        "WRACC,Support\nNaN,NaN\nNaN,NaN\n",
    )
    .unwrap();

    let store = ResultStore::load(dir.path()).unwrap();
    let samples = sample_all_proportions(Metric::Wracc, &store);

    let competition = Competition::new("gappy", &["alpha", "bravo", "carol"]);
    let err = run_competition(
        &competition,
        Metric::Wracc,
        &samples,
        &CriticalValueTable::builtin(),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        CompeteError::Stat {
            source: StatError::IncompleteSamples { sample: 0, .. },
            ..
        }
    ));
}

#[test]
fn synthetic_tree_supports_the_builtin_competitions() {
    let dir = tempfile::tempdir().unwrap();
    write_synthetic_tree(dir.path(), 123).unwrap();

    let store = ResultStore::load(dir.path()).unwrap();
    let samples = sample_all_proportions(Metric::Wracc, &store);
    let table = CriticalValueTable::builtin();

    for competition in sdlab_runner::builtin_competitions() {
        // Synthetic values are random draws, so significance varies; the
        // pipeline itself must run cleanly either way. A synthetic slice is
        // only NaN if every row of a file drew an exclusion, which the row
        // count makes effectively impossible.
        let outcome = run_competition(&competition, Metric::Wracc, &samples, &table).unwrap();
        assert!((0.0..=1.0).contains(&outcome.p_value));
        if let Some(post_hoc) = outcome.post_hoc {
            assert_eq!(post_hoc.mean_ranks.len(), competition.competitors.len());
        }
    }
}
