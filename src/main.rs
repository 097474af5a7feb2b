use anyhow::Context;
use clap::Parser;
use isolation_agent::tournament::{run_tournament, TournamentConfig};
use std::path::PathBuf;
use std::time::Duration;

/// Calibration tournament: every test agent plays the fixed opponent field
#[derive(Debug, Parser)]
#[command(name = "isolation_tournament", version)]
struct Cli {
    /// Matches per opponent and first-mover order (each match is two games)
    #[arg(short = 'm', long = "matches", default_value_t = 5)]
    matches: usize,

    /// Worker threads; defaults to the number of logical CPUs
    #[arg(short = 'p', long = "pool-size")]
    pool_size: Option<usize>,

    /// File the results are appended to
    #[arg(short = 'o', long = "output", default_value = "results.txt")]
    output: PathBuf,

    /// Per-move time limit in milliseconds
    #[arg(long = "time-limit", default_value_t = 150)]
    time_limit: u64,

    /// Seed for openings and random players
    #[arg(long)]
    seed: Option<u64>,

    /// Also enter the 64 parameterized evaluation agents
    #[arg(long)]
    sweep: bool,
}

impl Cli {
    fn into_config(self) -> TournamentConfig {
        let defaults = TournamentConfig::default();
        TournamentConfig {
            num_matches: self.matches,
            pool_size: self.pool_size.unwrap_or(defaults.pool_size),
            time_limit: Duration::from_millis(self.time_limit),
            output: self.output,
            seed: self.seed,
            parameter_sweep: self.sweep,
            ..defaults
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Cli::parse().into_config();
    log::info!("writing results to {}", config.output.display());

    let results = run_tournament(&config)
        .with_context(|| format!("tournament failed (results file {})", config.output.display()))?;

    println!("{:<36} {:>8} {:>9}", "Agent", "Win %", "Timeouts");
    for round in &results {
        println!("{:<36} {:>8.2} {:>9}", round.agent, round.win_rate(), round.timeouts);
    }
    Ok(())
}
