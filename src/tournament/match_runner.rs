//! Game and match loops.
//!
//! A game runs until the player to move has no legal move. Each turn the
//! active player gets the position, its legal moves and a fresh [`Deadline`].
//! The answer is judged after the player returns: a late answer loses on
//! time, an illegal answer forfeits the game.

use crate::agent::ai::{Deadline, TimeLeft};
use crate::agent::player::Player;
use crate::game_repr::{Board, GameState, Move, PlayerId};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::time::Duration;

/// Number of random opening moves shared by both games of a match.
pub const OPENING_MOVES: usize = 2;

/// How a game ended, from the loser's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The player to move had no legal move
    NoMoves,
    /// The player returned after its time probe went negative
    Timeout,
    /// The player returned a move that was not legal
    Forfeit,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Termination::NoMoves => "no legal moves",
            Termination::Timeout => "timeout",
            Termination::Forfeit => "forfeit",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameOutcome {
    pub winner: PlayerId,
    /// Every move applied during the game, opening included
    pub history: Vec<Move>,
    pub termination: Termination,
}

impl GameOutcome {
    pub fn loser(&self) -> PlayerId {
        self.winner.opponent()
    }
}

/// Board size and per-move time budget shared by every game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSettings {
    pub width: usize,
    pub height: usize,
    pub time_limit: Duration,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            width: crate::game_repr::DEFAULT_WIDTH,
            height: crate::game_repr::DEFAULT_HEIGHT,
            time_limit: Duration::from_millis(150),
        }
    }
}

/// Play `board` to the end. `first` moves for player One, `second` for Two.
///
/// `history` is appended to; pass the opening moves already on the board.
pub fn play_game(
    mut board: Board,
    first: &mut dyn Player<Board>,
    second: &mut dyn Player<Board>,
    time_limit: Duration,
    mut history: Vec<Move>,
) -> GameOutcome {
    loop {
        let active = board.active_player();
        let legal = board.legal_moves();

        if legal.is_empty() {
            return lost(active, history, Termination::NoMoves);
        }

        let player: &mut dyn Player<Board> = match active {
            PlayerId::One => &mut *first,
            PlayerId::Two => &mut *second,
        };

        let deadline = Deadline::after(time_limit);
        let mv = player.get_move(&board, &legal, &deadline);

        if deadline.millis_left() < 0.0 {
            log::debug!("player {} ({}) ran out of time", active, player.name());
            return lost(active, history, Termination::Timeout);
        }
        if !legal.contains(&mv) {
            log::debug!("player {} ({}) forfeits with {}", active, player.name(), mv);
            return lost(active, history, Termination::Forfeit);
        }

        board.apply_move(mv);
        history.push(mv);
    }
}

fn lost(player: PlayerId, history: Vec<Move>, termination: Termination) -> GameOutcome {
    GameOutcome {
        winner: player.opponent(),
        history,
        termination,
    }
}

/// Wins and losses of one match, indexed by the order the players were
/// passed to [`play_match`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchResult {
    pub wins: [u32; 2],
    pub timeouts: u32,
    pub forfeits: u32,
}

impl MatchResult {
    pub fn games(&self) -> u32 {
        self.wins[0] + self.wins[1]
    }

    fn record(&mut self, outcome: &GameOutcome, winner_index: usize) {
        self.wins[winner_index] += 1;
        match outcome.termination {
            Termination::Timeout => self.timeouts += 1,
            Termination::Forfeit => self.forfeits += 1,
            Termination::NoMoves => {}
        }
    }
}

/// Random opening shared by both games of a match.
pub fn random_opening<R: Rng + ?Sized>(settings: &MatchSettings, rng: &mut R) -> (Board, Vec<Move>) {
    let mut board = Board::new(settings.width, settings.height);
    let mut history = Vec::with_capacity(OPENING_MOVES);
    for _ in 0..OPENING_MOVES {
        let Some(&mv) = board.legal_moves().choose(rng) else {
            break;
        };
        board.apply_move(mv);
        history.push(mv);
    }
    (board, history)
}

/// Two games from the same random opening, each player moving first once.
pub fn play_match<R: Rng + ?Sized>(
    a: &mut dyn Player<Board>,
    b: &mut dyn Player<Board>,
    settings: &MatchSettings,
    rng: &mut R,
) -> MatchResult {
    let (opening, history) = random_opening(settings, rng);
    let mut result = MatchResult::default();

    let game = play_game(opening.clone(), a, b, settings.time_limit, history.clone());
    let winner = if game.winner == PlayerId::One { 0 } else { 1 };
    result.record(&game, winner);

    let game = play_game(opening, b, a, settings.time_limit, history);
    let winner = if game.winner == PlayerId::One { 1 } else { 0 };
    result.record(&game, winner);

    result
}
