//! Tournament participants.
//!
//! Agents are described by name plus a factory so that every worker thread can
//! build its own private instances. Nothing mutable is shared between rounds.

use crate::agent::ai::{
    AgentConfig, ConfigError, Heuristic, Mobility, NullScore, OpenMoves, Parameterized, SearchAgent,
    SearchMethod,
};
use crate::agent::player::Player;
use crate::agent::random_player::RandomPlayer;
use crate::game_repr::Board;
use std::fmt;
use std::sync::Arc;

/// Fixed depth of the minimax calibration opponents.
pub const MINIMAX_OPPONENT_DEPTH: u32 = 3;
/// Fixed depth of the alpha-beta calibration opponents.
pub const ALPHABETA_OPPONENT_DEPTH: u32 = 5;

type AgentFactory = Arc<dyn Fn(u64) -> Result<Box<dyn Player<Board>>, ConfigError> + Send + Sync>;

#[derive(Clone)]
pub struct AgentSpec {
    name: String,
    factory: AgentFactory,
}

impl fmt::Debug for AgentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentSpec").field("name", &self.name).finish()
    }
}

impl AgentSpec {
    /// Uniform random mover; `seed` makes each instance reproducible.
    pub fn random(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            factory: Arc::new(|seed: u64| -> Result<Box<dyn Player<Board>>, ConfigError> {
                Ok(Box::new(RandomPlayer::seeded(seed)))
            }),
        }
    }

    /// Search agent with the given configuration and leaf policy.
    pub fn search<H>(name: impl Into<String>, config: AgentConfig, heuristic: H) -> Result<Self, ConfigError>
    where
        H: Heuristic<Board> + 'static,
    {
        config.validate()?;
        let name = name.into();
        let heuristic: Arc<dyn Heuristic<Board>> = Arc::new(heuristic);
        let agent_name = name.clone();
        let factory: AgentFactory = Arc::new(
            move |_seed: u64| -> Result<Box<dyn Player<Board>>, ConfigError> {
                let agent = SearchAgent::with_shared_heuristic(
                    config,
                    Arc::clone(&heuristic),
                    agent_name.clone(),
                )?;
                Ok(Box::new(agent))
            },
        );
        Ok(Self { name, factory })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fresh, private instance of this agent.
    pub fn build(&self, seed: u64) -> Result<Box<dyn Player<Board>>, ConfigError> {
        (self.factory)(seed)
    }
}

/// The fixed field every test agent is measured against.
pub fn calibration_opponents() -> Result<Vec<AgentSpec>, ConfigError> {
    let minimax = AgentConfig::fixed(SearchMethod::Minimax, MINIMAX_OPPONENT_DEPTH);
    let alphabeta = AgentConfig::fixed(SearchMethod::AlphaBeta, ALPHABETA_OPPONENT_DEPTH);

    Ok(vec![
        AgentSpec::random("Random"),
        AgentSpec::search("MM_Null", minimax, NullScore)?,
        AgentSpec::search("MM_Open", minimax, OpenMoves)?,
        AgentSpec::search("MM_Improved", minimax, Mobility)?,
        AgentSpec::search("AB_Null", alphabeta, NullScore)?,
        AgentSpec::search("AB_Open", alphabeta, OpenMoves)?,
        AgentSpec::search("AB_Improved", alphabeta, Mobility)?,
    ])
}

/// Every weight tuple of the tuning sweep: w0, w1, w3, w4 in {1, 2} and
/// w2, w5 in {-1, 0}.
pub fn sweep_weights() -> Vec<[f64; 6]> {
    let mut weights = Vec::with_capacity(64);
    for w0 in [1.0, 2.0] {
        for w1 in [1.0, 2.0] {
            for w2 in [-1.0, 0.0] {
                for w3 in [1.0, 2.0] {
                    for w4 in [1.0, 2.0] {
                        for w5 in [-1.0, 0.0] {
                            weights.push([w0, w1, w2, w3, w4, w5]);
                        }
                    }
                }
            }
        }
    }
    weights
}

fn sweep_name(weights: &[f64; 6]) -> String {
    let parts: Vec<String> = weights.iter().map(|w| format!("{w}")).collect();
    format!("Student ({})", parts.join(", "))
}

/// Agents under test: the `ID_Improved` reference agent, then one agent per
/// sweep tuple when `sweep` is set.
pub fn test_agents(sweep: bool) -> Result<Vec<AgentSpec>, ConfigError> {
    let config = AgentConfig::iterative(SearchMethod::AlphaBeta);
    let mut agents = vec![AgentSpec::search("ID_Improved", config, Mobility)?];

    if sweep {
        for weights in sweep_weights() {
            agents.push(AgentSpec::search(sweep_name(&weights), config, Parameterized::new(weights))?);
        }
    }
    Ok(agents)
}
