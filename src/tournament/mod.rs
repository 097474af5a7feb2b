//! Parallel round-robin tournament.
//!
//! Each test agent plays a round against every calibration opponent. Rounds
//! run on a rayon pool; finished rounds travel back to the coordinating thread
//! over a channel and are appended to the results file as they arrive.

pub mod match_runner;
pub mod roster;

pub use match_runner::{
    play_game, play_match, random_opening, GameOutcome, MatchResult, MatchSettings, Termination,
    OPENING_MOVES,
};
pub use roster::{calibration_opponents, sweep_weights, test_agents, AgentSpec};

use crate::agent::ai::ConfigError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

const RULE: &str =
    "*******************************************************************************************";

const TIMEOUT_WARNING: &str = "one or more agents lost a game on time this round; \
    get_move must return before its time probe reaches 0 ms, so the timeout \
    threshold may need a wider margin under tournament load";

#[derive(Debug, thiserror::Error)]
pub enum TournamentError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("results file error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid tournament settings: {0}")]
    InvalidSettings(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TournamentConfig {
    /// Matches per opponent and first-mover order; each match is two games
    pub num_matches: usize,
    /// Worker threads running rounds
    pub pool_size: usize,
    /// Per-move time budget
    pub time_limit: Duration,
    /// Results are appended to this file
    pub output: PathBuf,
    /// Base seed for openings and random players; entropy when `None`
    pub seed: Option<u64>,
    /// Add the 64 parameterized agents to the test field
    pub parameter_sweep: bool,
    pub width: usize,
    pub height: usize,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            num_matches: 5,
            pool_size: num_cpus::get(),
            time_limit: Duration::from_millis(150),
            output: PathBuf::from("results.txt"),
            seed: None,
            parameter_sweep: false,
            width: crate::game_repr::DEFAULT_WIDTH,
            height: crate::game_repr::DEFAULT_HEIGHT,
        }
    }
}

impl TournamentConfig {
    pub fn validate(&self) -> Result<(), TournamentError> {
        if self.num_matches == 0 {
            return Err(TournamentError::InvalidSettings("at least one match per round is required".into()));
        }
        if self.pool_size == 0 {
            return Err(TournamentError::InvalidSettings("pool size must be positive".into()));
        }
        if self.time_limit.is_zero() {
            return Err(TournamentError::InvalidSettings("time limit must be positive".into()));
        }
        if self.width * self.height < 2 {
            return Err(TournamentError::InvalidSettings(format!(
                "a {}x{} board cannot hold both players",
                self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn match_settings(&self) -> MatchSettings {
        MatchSettings {
            width: self.width,
            height: self.height,
            time_limit: self.time_limit,
        }
    }

    /// Games each test agent plays against a single opponent.
    pub fn games_per_opponent(&self) -> usize {
        // two first-mover orders, two games per match
        self.num_matches * 4
    }
}

/// Outcome of one test agent's round against the whole field.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundResult {
    pub agent: String,
    pub wins: u32,
    pub games: u32,
    pub timeouts: u32,
    pub forfeits: u32,
}

impl RoundResult {
    /// Percentage of games won.
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            100.0 * self.wins as f64 / self.games as f64
        }
    }
}

/// Play `agent` against every opponent, `num_matches` matches per first-mover
/// order.
pub fn play_round(
    agent: &AgentSpec,
    opponents: &[AgentSpec],
    config: &TournamentConfig,
    rng: &mut StdRng,
) -> Result<RoundResult, TournamentError> {
    let settings = config.match_settings();
    let mut round = RoundResult {
        agent: agent.name().to_string(),
        wins: 0,
        games: 0,
        timeouts: 0,
        forfeits: 0,
    };

    for opponent in opponents {
        log::info!("{} playing matches against {}", agent.name(), opponent.name());
        let mut player = agent.build(rng.gen())?;
        let mut other = opponent.build(rng.gen())?;
        let mut wins = 0;

        for agent_first in [true, false] {
            for _ in 0..config.num_matches {
                let result = if agent_first {
                    let result = play_match(player.as_mut(), other.as_mut(), &settings, rng);
                    wins += result.wins[0];
                    result
                } else {
                    let result = play_match(other.as_mut(), player.as_mut(), &settings, rng);
                    wins += result.wins[1];
                    result
                };
                round.games += result.games();
                round.timeouts += result.timeouts;
                round.forfeits += result.forfeits;
            }
        }

        log::info!(
            "{} won {}/{} against {}",
            agent.name(),
            wins,
            config.games_per_opponent(),
            opponent.name()
        );
        round.wins += wins;
    }

    if round.timeouts > 0 {
        log::warn!("{}: {}", agent.name(), TIMEOUT_WARNING);
    }
    Ok(round)
}

/// Run every test agent's round on a worker pool and append the results to
/// `config.output`. Results come back in test-agent order.
pub fn run_tournament(config: &TournamentConfig) -> Result<Vec<RoundResult>, TournamentError> {
    config.validate()?;
    let opponents = calibration_opponents()?;
    let agents = test_agents(config.parameter_sweep)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.pool_size)
        .thread_name(|i| format!("tournament-{i}"))
        .build()?;

    let mut file = open_results(&config.output)?;
    write_header(&mut file, config, agents.len(), opponents.len())?;

    let base_seed = config.seed.unwrap_or_else(rand::random);
    log::info!(
        "starting tournament: {} test agents, {} opponents, {} workers, seed {}",
        agents.len(),
        opponents.len(),
        config.pool_size,
        base_seed
    );

    let (tx, rx) = crossbeam_channel::unbounded();
    let collected = pool.in_place_scope(|scope| -> Result<Vec<Option<RoundResult>>, TournamentError> {
        for (index, agent) in agents.iter().enumerate() {
            let tx = tx.clone();
            let opponents = &opponents;
            scope.spawn(move |_| {
                let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(index as u64));
                let result = play_round(agent, opponents, config, &mut rng);
                // Ignored: the coordinator stops reading after its first error
                let _ = tx.send((index, result));
            });
        }
        drop(tx);

        let mut rounds: Vec<Option<RoundResult>> = vec![None; agents.len()];
        for (index, result) in rx.iter() {
            let round = result?;
            writeln!(file, "{} got {:.2}", round.agent, round.win_rate())?;
            file.flush()?;
            rounds[index] = Some(round);
        }
        Ok(rounds)
    })?;

    write_footer(&mut file)?;
    Ok(collected.into_iter().flatten().collect())
}

fn open_results(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn write_header(
    out: &mut impl Write,
    config: &TournamentConfig,
    num_agents: usize,
    num_opponents: usize,
) -> io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(
        out,
        "Starting Isolation tournament with {} test agents, {} games per round, and {} worker threads",
        num_agents,
        config.games_per_opponent() * num_opponents,
        config.pool_size
    )?;
    writeln!(out, "Tournament started at {}", timestamp())?;
    out.flush()
}

fn write_footer(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Tournament complete at: {}", timestamp())?;
    writeln!(out, "{RULE}")?;
    writeln!(out)?;
    out.flush()
}
