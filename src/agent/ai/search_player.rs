//! SearchAgent - game-tree search player
//!
//! Wraps the search core behind the [`Player`] trait. Each agent owns its
//! configuration (search method, depth control, abort threshold) and its leaf
//! evaluation policy, both fixed at construction.
//!
//! # Examples
//!
//! ```
//! use isolation_agent::agent::ai::{AgentConfig, Mobility, SearchAgent, SearchMethod};
//! use isolation_agent::agent::Player;
//! use isolation_agent::game_repr::{Board, GameState};
//!
//! let config = AgentConfig::fixed(SearchMethod::AlphaBeta, 3);
//! let mut agent = SearchAgent::<Board>::new(config, Mobility, "AB_Improved").unwrap();
//!
//! let board = Board::default();
//! let legal: Vec<_> = board.legal_moves().into_iter().collect();
//! let mv = agent.get_move(&board, &legal, &|| 1000.0);
//! assert!(legal.contains(&mv));
//! ```

use crate::agent::player::Player;
use crate::game_repr::{GameState, Move};
use super::clock::{TimeLeft, Timeout};
use super::config::{AgentConfig, ConfigError};
use super::evaluation::Heuristic;
use super::minimax::{alphabeta, minimax, SearchContext, SearchResult};
use super::search::{iterative_deepening_search, SearchReport};
use std::sync::Arc;

pub struct SearchAgent<G: GameState> {
    config: AgentConfig,
    heuristic: Arc<dyn Heuristic<G>>,
    name: String,
    /// Report from the most recent `get_move`
    last_report: Option<SearchReport>,
}

impl<G: GameState> SearchAgent<G> {
    /// Create an agent, rejecting an invalid configuration.
    pub fn new<H>(config: AgentConfig, heuristic: H, name: impl Into<String>) -> Result<Self, ConfigError>
    where
        H: Heuristic<G> + 'static,
    {
        Self::with_shared_heuristic(config, Arc::new(heuristic), name)
    }

    /// Same as [`SearchAgent::new`] for a heuristic shared between agents.
    pub fn with_shared_heuristic(
        config: AgentConfig,
        heuristic: Arc<dyn Heuristic<G>>,
        name: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            heuristic,
            name: name.into(),
            last_report: None,
        })
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn last_report(&self) -> Option<&SearchReport> {
        self.last_report.as_ref()
    }

    /// Full search for the player to move, with statistics.
    pub fn search(&self, game: &G, legal_moves: &[Move], time_left: &dyn TimeLeft) -> SearchReport {
        iterative_deepening_search(game, legal_moves, &self.config, &*self.heuristic, time_left)
    }

    /// Minimax from `game`, scored for the player to move in `game`.
    pub fn minimax(
        &self,
        game: &G,
        depth: u32,
        maximizing: bool,
        time_left: &dyn TimeLeft,
    ) -> Result<SearchResult, Timeout> {
        let mut ctx = self.context(game, time_left);
        minimax(&mut ctx, game, depth, maximizing)
    }

    /// Alpha-beta from `game` with a full window, scored for the player to move in `game`.
    pub fn alphabeta(
        &self,
        game: &G,
        depth: u32,
        maximizing: bool,
        time_left: &dyn TimeLeft,
    ) -> Result<SearchResult, Timeout> {
        let mut ctx = self.context(game, time_left);
        alphabeta(&mut ctx, game, depth, f64::NEG_INFINITY, f64::INFINITY, maximizing)
    }

    fn context<'a>(&'a self, game: &G, time_left: &'a dyn TimeLeft) -> SearchContext<'a, G> {
        SearchContext::new(
            &*self.heuristic,
            game.active_player(),
            time_left,
            self.config.timeout_threshold_ms,
        )
    }
}

impl<G: GameState> Player<G> for SearchAgent<G> {
    fn get_move(&mut self, game: &G, legal_moves: &[Move], time_left: &dyn TimeLeft) -> Move {
        log::trace!("[{}] legal moves: {:?}", self.name, legal_moves);
        let report = self.search(game, legal_moves, time_left);
        let best_move = report.best_move;
        log::trace!(
            "[{}] returning {} (depth {}, {} nodes)",
            self.name,
            best_move,
            report.depth_reached,
            report.nodes_searched
        );
        self.last_report = Some(report);
        best_move
    }

    fn name(&self) -> &str {
        &self.name
    }
}
