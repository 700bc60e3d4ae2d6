use std::fs;

use probsim_bench::frequency::{FrequencyRun, Selection};
use probsim_core::model::experiment::Experiment;
use tempfile::tempdir;

fn seeded_run(selection: Selection) -> FrequencyRun {
    FrequencyRun {
        trials: 52_000,
        seed: Some(20240501),
        alpha: 1e-6,
        selection,
    }
}

#[test]
fn seeded_run_covers_every_experiment() {
    let report = seeded_run(Selection::All).run().expect("run completes");
    assert_eq!(report.experiments.len(), 3);
    for (report, experiment) in report.experiments.iter().zip(Experiment::ALL) {
        assert_eq!(report.experiment, experiment);
        assert_eq!(report.counts.len(), experiment.sample_space_size());
        assert_eq!(report.counts.iter().sum::<u64>(), 52_000);
        assert!(report.passed, "{experiment}: p = {}", report.p_value);
    }
    assert!(report.all_passed());
}

#[test]
fn card_draws_repeat_at_replacement_rate() {
    let report = seeded_run(Selection::One(Experiment::Card))
        .run()
        .expect("run completes");
    let card = &report.experiments[0];
    assert!((card.expected_repeat_rate - 1.0 / 52.0).abs() < 1e-12);
    // σ ≈ 0.00059 at this sample size.
    assert!(
        (card.repeat_rate - 1.0 / 52.0).abs() < 0.004,
        "repeat rate {}",
        card.repeat_rate
    );
}

#[test]
fn same_seed_reproduces_counts() {
    let first = seeded_run(Selection::One(Experiment::Die)).run().expect("run");
    let second = seeded_run(Selection::One(Experiment::Die)).run().expect("run");
    assert_eq!(first.experiments[0].counts, second.experiments[0].counts);
}

#[test]
fn report_writes_json() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("reports").join("frequency.json");
    let report = seeded_run(Selection::One(Experiment::Coin)).run().expect("run");
    report.write_json(&path).expect("report written");

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("readable")).expect("json");
    assert_eq!(value["trials"], 52_000);
    assert_eq!(value["experiments"][0]["experiment"], "coin");
    assert_eq!(value["experiments"][0]["degrees_of_freedom"], 1);
    assert!(value["experiments"][0]["p_value"].is_number());
}

#[test]
fn table_lists_each_experiment() {
    let report = seeded_run(Selection::All).run().expect("run");
    let table = report.render_table();
    assert_eq!(table.lines().count(), 5);
    for key in ["coin", "die", "card"] {
        assert!(table.contains(&format!("| {key} |")), "{table}");
    }
}
