// Search core - Minimax / Alpha-Beta with iterative deepening
//
// This module implements a time-bounded adversarial search agent:
// - Minimax and alpha-beta tree walkers that poll a deadline on every call
// - A depth driver running fixed-depth or iterative-deepening searches
// - Pluggable leaf evaluation (mobility and its variants)
//
// The only recoverable failure is `Timeout`. It propagates as an `Err` through
// every recursive frame and is consumed by the depth driver, which then
// returns the move of the last completed iteration.

mod clock;
mod config;
mod evaluation;
mod minimax;
mod search;
mod search_player;

#[cfg(test)]
mod tests;

pub use clock::{Deadline, TimeLeft, Timeout};
pub use config::{
    AgentConfig, ConfigError, DepthMode, SearchMethod, DEFAULT_SEARCH_DEPTH,
    DEFAULT_TIMEOUT_THRESHOLD_MS,
};
pub use evaluation::{
    distance_from_center, evaluate, Aggressive, CenterSeeking, Heuristic, Mobility, NullScore,
    OpenMoves, Parameterized, PhasedAggression,
};
pub use minimax::{alphabeta, minimax, SearchContext, SearchResult};
pub use search::{iterative_deepening_search, search_depth, IterationInfo, SearchReport};
pub use search_player::SearchAgent;
