//! Large-N frequency checks for the outcome generator.
//!
//! Each experiment is sampled `trials` times. Counts are compared with the
//! uniform expectation using Pearson's χ² test, and consecutive repeats are
//! tracked to confirm draws are made with replacement.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use probsim_core::model::experiment::Experiment;
use probsim_core::sampler::{OutcomeSource, RandomOutcomes};
use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const DEFAULT_TRIALS: u64 = 100_000;
pub const DEFAULT_ALPHA: f64 = 0.001;

#[derive(Debug, Error)]
pub enum FrequencyError {
    #[error("trial count must be greater than zero")]
    NoTrials,
    #[error("alpha must lie strictly between 0 and 1 (got {0})")]
    InvalidAlpha(f64),
    #[error("chi-square distribution unavailable: {0}")]
    Distribution(String),
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Which experiments a run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    One(Experiment),
    All,
}

impl Selection {
    pub fn experiments(self) -> Vec<Experiment> {
        match self {
            Selection::One(experiment) => vec![experiment],
            Selection::All => Experiment::ALL.to_vec(),
        }
    }
}

impl FromStr for Selection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(Selection::All)
        } else {
            s.parse().map(Selection::One)
        }
    }
}

/// Raw counts for one experiment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    pub experiment: Experiment,
    pub trials: u64,
    /// Indexed by outcome ordinal.
    pub counts: Vec<u64>,
    /// Draws equal to the draw immediately before them.
    pub repeats: u64,
}

impl Tally {
    pub fn expected_per_outcome(&self) -> f64 {
        self.trials as f64 / self.counts.len() as f64
    }

    pub fn chi_square(&self) -> f64 {
        let expected = self.expected_per_outcome();
        if expected == 0.0 {
            return 0.0;
        }
        self.counts
            .iter()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum()
    }

    pub fn degrees_of_freedom(&self) -> u64 {
        self.counts.len().saturating_sub(1) as u64
    }

    pub fn repeat_rate(&self) -> f64 {
        if self.trials < 2 {
            return 0.0;
        }
        self.repeats as f64 / (self.trials - 1) as f64
    }
}

pub fn tally<S: OutcomeSource + ?Sized>(
    source: &mut S,
    experiment: Experiment,
    trials: u64,
) -> Tally {
    let mut counts = vec![0u64; experiment.sample_space_size()];
    let mut repeats = 0;
    let mut previous = None;
    for _ in 0..trials {
        let outcome = source.sample(experiment);
        counts[outcome.ordinal()] += 1;
        if previous == Some(outcome) {
            repeats += 1;
        }
        previous = Some(outcome);
    }
    Tally {
        experiment,
        trials,
        counts,
        repeats,
    }
}

/// Upper-tail probability of `statistic` under χ² with `degrees_of_freedom`.
pub fn p_value(statistic: f64, degrees_of_freedom: u64) -> Result<f64, FrequencyError> {
    let distribution = ChiSquared::new(degrees_of_freedom as f64)
        .map_err(|e| FrequencyError::Distribution(e.to_string()))?;
    Ok((1.0 - distribution.cdf(statistic)).clamp(0.0, 1.0))
}

#[derive(Debug, Clone, Serialize)]
pub struct ExperimentReport {
    pub experiment: Experiment,
    pub trials: u64,
    pub counts: Vec<u64>,
    pub min_count: u64,
    pub max_count: u64,
    pub expected_per_outcome: f64,
    pub chi_square: f64,
    pub degrees_of_freedom: u64,
    pub p_value: f64,
    pub repeat_rate: f64,
    pub expected_repeat_rate: f64,
    pub passed: bool,
}

impl ExperimentReport {
    pub fn from_tally(tally: &Tally, alpha: f64) -> Result<Self, FrequencyError> {
        let chi_square = tally.chi_square();
        let degrees_of_freedom = tally.degrees_of_freedom();
        let p_value = p_value(chi_square, degrees_of_freedom)?;
        Ok(Self {
            experiment: tally.experiment,
            trials: tally.trials,
            counts: tally.counts.clone(),
            min_count: tally.counts.iter().copied().min().unwrap_or(0),
            max_count: tally.counts.iter().copied().max().unwrap_or(0),
            expected_per_outcome: tally.expected_per_outcome(),
            chi_square,
            degrees_of_freedom,
            p_value,
            repeat_rate: tally.repeat_rate(),
            expected_repeat_rate: 1.0 / tally.counts.len() as f64,
            passed: p_value >= alpha,
        })
    }
}

#[derive(Debug, Clone)]
pub struct FrequencyRun {
    pub trials: u64,
    pub seed: Option<u64>,
    pub alpha: f64,
    pub selection: Selection,
}

impl Default for FrequencyRun {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: None,
            alpha: DEFAULT_ALPHA,
            selection: Selection::All,
        }
    }
}

impl FrequencyRun {
    pub fn validate(&self) -> Result<(), FrequencyError> {
        if self.trials == 0 {
            return Err(FrequencyError::NoTrials);
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(FrequencyError::InvalidAlpha(self.alpha));
        }
        Ok(())
    }

    pub fn run(&self) -> Result<FrequencyReport, FrequencyError> {
        self.validate()?;
        let mut source = RandomOutcomes::from_optional_seed(self.seed);
        let mut experiments = Vec::new();
        for experiment in self.selection.experiments() {
            debug!(%experiment, trials = self.trials, "sampling");
            let tally = tally(&mut source, experiment, self.trials);
            let report = ExperimentReport::from_tally(&tally, self.alpha)?;
            if report.passed {
                info!(%experiment, chi_square = report.chi_square, p_value = report.p_value, "uniformity holds");
            } else {
                warn!(%experiment, chi_square = report.chi_square, p_value = report.p_value, "uniformity rejected");
            }
            experiments.push(report);
        }
        Ok(FrequencyReport {
            seed: self.seed,
            trials: self.trials,
            alpha: self.alpha,
            experiments,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FrequencyReport {
    pub seed: Option<u64>,
    pub trials: u64,
    pub alpha: f64,
    pub experiments: Vec<ExperimentReport>,
}

impl FrequencyReport {
    pub fn all_passed(&self) -> bool {
        self.experiments.iter().all(|report| report.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ExperimentReport> {
        self.experiments.iter().filter(|report| !report.passed)
    }

    pub fn render_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "| Experiment | Trials | Min | Max | Expected | χ² | df | p-value | Repeat rate | Result |"
        );
        let _ = writeln!(
            out,
            "|------------|--------|-----|-----|----------|----|----|---------|-------------|--------|"
        );
        for report in &self.experiments {
            let _ = writeln!(
                out,
                "| {name} | {trials} | {min} | {max} | {expected:.1} | {chi:.3} | {df} | {p:.4} | {repeat:.4} (≈{expected_repeat:.4}) | {result} |",
                name = report.experiment,
                trials = report.trials,
                min = report.min_count,
                max = report.max_count,
                expected = report.expected_per_outcome,
                chi = report.chi_square,
                df = report.degrees_of_freedom,
                p = report.p_value,
                repeat = report.repeat_rate,
                expected_repeat = report.expected_repeat_rate,
                result = if report.passed { "pass" } else { "FAIL" },
            );
        }
        out
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), FrequencyError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| FrequencyError::Io {
                context: "creating report directory",
                source: e,
            })?;
        }
        let body = serde_json::to_string_pretty(self)?;
        fs::write(path, body).map_err(|e| FrequencyError::Io {
            context: "writing frequency report",
            source: e,
        })
    }
}
