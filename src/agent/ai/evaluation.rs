// Position evaluation
// Returns a score from the point of view of the given player (positive = good for that player).
// Terminal positions are scored as +/- infinity before any heuristic runs.

use crate::game_repr::{GameState, PlayerId};

/// A scoring policy for non-terminal positions.
///
/// Implementations must be pure: same (position, player) in, same score out.
/// They only see positions where neither side has already won.
pub trait Heuristic<G: GameState>: Send + Sync {
    fn score(&self, game: &G, player: PlayerId) -> f64;
}

impl<G, F> Heuristic<G> for F
where
    G: GameState,
    F: Fn(&G, PlayerId) -> f64 + Send + Sync,
{
    fn score(&self, game: &G, player: PlayerId) -> f64 {
        self(game, player)
    }
}

/// Evaluate `game` for `player`.
///
/// A player that has no legal continuation and has therefore lost gets
/// negative infinity, a player whose opponent is stuck gets positive infinity.
/// Everything else is delegated to `heuristic`.
pub fn evaluate<G, H>(heuristic: &H, game: &G, player: PlayerId) -> f64
where
    G: GameState,
    H: Heuristic<G> + ?Sized,
{
    if game.is_loser(player) {
        return f64::NEG_INFINITY;
    }
    if game.is_winner(player) {
        return f64::INFINITY;
    }
    heuristic.score(game, player)
}

fn mobility<G: GameState>(game: &G, player: PlayerId) -> (f64, f64) {
    let own = game.legal_moves_for(player).len() as f64;
    let opp = game.legal_moves_for(game.opponent(player)).len() as f64;
    (own, opp)
}

/// True while fewer than half of the board's cells have been played.
fn is_early_game<G: GameState>(game: &G) -> bool {
    (game.move_count() as f64) < (game.width() * game.height()) as f64 / 2.0
}

/// Euclidean distance of `player` from the middle of the board.
/// An unplaced player counts as centered.
pub fn distance_from_center<G: GameState>(game: &G, player: PlayerId) -> f64 {
    match game.player_location(player) {
        Some(cell) => {
            let dx = cell.row as f64 - game.width() as f64 / 2.0;
            let dy = cell.col as f64 - game.height() as f64 / 2.0;
            (dx * dx + dy * dy).sqrt()
        }
        None => 0.0,
    }
}

/// Scores every position as a draw.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullScore;

impl<G: GameState> Heuristic<G> for NullScore {
    fn score(&self, _game: &G, _player: PlayerId) -> f64 {
        0.0
    }
}

/// Number of moves open to the player.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenMoves;

impl<G: GameState> Heuristic<G> for OpenMoves {
    fn score(&self, game: &G, player: PlayerId) -> f64 {
        game.legal_moves_for(player).len() as f64
    }
}

/// Own moves minus opponent moves. The default policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mobility;

impl<G: GameState> Heuristic<G> for Mobility {
    fn score(&self, game: &G, player: PlayerId) -> f64 {
        let (own, opp) = mobility(game, player);
        own - opp
    }
}

/// Own moves minus `factor` times opponent moves.
#[derive(Debug, Clone, Copy)]
pub struct Aggressive {
    pub factor: f64,
}

impl<G: GameState> Heuristic<G> for Aggressive {
    fn score(&self, game: &G, player: PlayerId) -> f64 {
        let (own, opp) = mobility(game, player);
        own - self.factor * opp
    }
}

/// Aggressive during the first half of the game, plain mobility afterwards.
#[derive(Debug, Clone, Copy)]
pub struct PhasedAggression {
    pub early_factor: f64,
}

impl<G: GameState> Heuristic<G> for PhasedAggression {
    fn score(&self, game: &G, player: PlayerId) -> f64 {
        let (own, opp) = mobility(game, player);
        if is_early_game(game) {
            own - self.early_factor * opp
        } else {
            own - opp
        }
    }
}

/// Mobility, penalized by distance from the center during the first half.
#[derive(Debug, Clone, Copy, Default)]
pub struct CenterSeeking;

impl<G: GameState> Heuristic<G> for CenterSeeking {
    fn score(&self, game: &G, player: PlayerId) -> f64 {
        let (own, opp) = mobility(game, player);
        if is_early_game(game) {
            own - opp - distance_from_center(game, player)
        } else {
            own - opp
        }
    }
}

/// Six-weight policy used for tuning sweeps.
///
/// First half: `w0 * own - w1 * opp - w2 * dist`.
/// Second half: `w3 * own - w4 * opp - w5 * dist`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameterized {
    pub weights: [f64; 6],
}

impl Default for Parameterized {
    fn default() -> Self {
        Self {
            weights: [1.0, 1.0, 0.0, 1.0, 1.0, 0.0],
        }
    }
}

impl Parameterized {
    pub fn new(weights: [f64; 6]) -> Self {
        Self { weights }
    }
}

impl<G: GameState> Heuristic<G> for Parameterized {
    fn score(&self, game: &G, player: PlayerId) -> f64 {
        let (own, opp) = mobility(game, player);
        let dist = distance_from_center(game, player);
        let w = if is_early_game(game) {
            &self.weights[0..3]
        } else {
            &self.weights[3..6]
        };
        w[0] * own - w[1] * opp - w[2] * dist
    }
}
