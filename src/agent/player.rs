//! Player trait for game agents.
//!
//! A player is anything that can be asked for a move: a search agent, a
//! random mover used for calibration, or a scripted player in tests. The
//! match runner only talks to players through this trait.
//!
//! # Synchronous Design
//!
//! `get_move()` blocks until the player has decided. The caller hands over a
//! time probe and judges the answer afterwards: a player that returns after
//! the probe went negative loses on time, and a player that returns a move
//! outside `legal_moves` forfeits.

use crate::agent::ai::TimeLeft;
use crate::game_repr::{GameState, Move};

pub trait Player<G: GameState> {
    /// Request the next move from this player.
    ///
    /// # Parameters
    ///
    /// - `game`: private copy of the current position; the player to move is
    ///   the one being asked
    /// - `legal_moves`: moves the player may choose from, in generation order
    /// - `time_left`: milliseconds left in this turn
    ///
    /// # Return Value
    ///
    /// One of `legal_moves`, or `Move::NONE` when `legal_moves` is empty.
    fn get_move(&mut self, game: &G, legal_moves: &[Move], time_left: &dyn TimeLeft) -> Move;

    /// Get the display name of this player.
    ///
    /// Returns `"Player"` unless overridden.
    fn name(&self) -> &str {
        "Player"
    }
}
