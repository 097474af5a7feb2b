//! The game-state contract consumed by the search core.
//!
//! The search never mutates a state. It only asks for legal moves, for
//! successor states, and for terminal status. Any two-player alternating
//! game on a grid can be searched by implementing [`GameState`].

use super::{Move, MoveList, PlayerId};

pub trait GameState: Clone {
    /// Player whose turn it is.
    fn active_player(&self) -> PlayerId;

    fn opponent(&self, player: PlayerId) -> PlayerId {
        player.opponent()
    }

    /// Legal moves for the player to move, in generation order.
    fn legal_moves(&self) -> MoveList {
        self.legal_moves_for(self.active_player())
    }

    /// Legal moves for `player`, empty if that player cannot move.
    fn legal_moves_for(&self, player: PlayerId) -> MoveList;

    /// Successor state after the active player plays `mv`. `self` is unaffected.
    fn forecast_move(&self, mv: Move) -> Self;

    fn is_winner(&self, player: PlayerId) -> bool;

    fn is_loser(&self, player: PlayerId) -> bool;

    /// Current cell of `player`, `None` before its first move.
    fn player_location(&self, player: PlayerId) -> Option<Move>;

    fn width(&self) -> usize;

    fn height(&self) -> usize;

    fn move_count(&self) -> usize;
}
