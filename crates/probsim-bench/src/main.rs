use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use probsim_bench::frequency::{DEFAULT_ALPHA, DEFAULT_TRIALS, FrequencyRun, Selection};

/// Frequency harness for the probability simulator's outcome generator.
#[derive(Debug, Parser)]
#[command(
    name = "probsim-bench",
    author,
    version,
    about = "Chi-square uniformity check for coin, die and card sampling"
)]
struct Cli {
    /// Samples drawn per experiment.
    #[arg(short = 'n', long, value_name = "N", default_value_t = DEFAULT_TRIALS)]
    trials: u64,

    /// Seed for a reproducible run (entropy when omitted).
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Experiment to check: coin, die, card or all.
    #[arg(short, long, value_name = "EXPERIMENT", default_value = "all")]
    experiment: Selection,

    /// Significance level for the goodness-of-fit test.
    #[arg(long, value_name = "ALPHA", default_value_t = DEFAULT_ALPHA)]
    alpha: f64,

    /// Write the full report as JSON.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let run = FrequencyRun {
        trials: cli.trials,
        seed: cli.seed,
        alpha: cli.alpha,
        selection: cli.experiment,
    };
    let report = run.run()?;

    match run.seed {
        Some(seed) => println!("Frequency check: {} trials per experiment, seed {seed}, alpha {}", run.trials, run.alpha),
        None => println!("Frequency check: {} trials per experiment, alpha {}", run.trials, run.alpha),
    }
    println!();
    print!("{}", report.render_table());

    if let Some(path) = cli.output.as_ref() {
        report.write_json(path)?;
        println!("\nReport written to {}", path.display());
    }

    if !report.all_passed() {
        let failed: Vec<String> = report
            .failures()
            .map(|r| r.experiment.to_string())
            .collect();
        bail!(
            "uniformity rejected at alpha {} for: {}",
            run.alpha,
            failed.join(", ")
        );
    }
    Ok(())
}
