//! Time-bounded game-tree search for knight-move Isolation.
//!
//! - [`game_repr`]: board, moves and the [`game_repr::GameState`] contract
//! - [`agent`]: the [`agent::Player`] trait, minimax / alpha-beta search and
//!   iterative deepening
//! - [`tournament`]: match runner and the parallel calibration tournament

pub mod agent;
pub mod game_repr;
pub mod tournament;
