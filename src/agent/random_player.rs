//! Uniform random mover, the weakest calibration opponent.

use crate::agent::ai::TimeLeft;
use crate::agent::player::Player;
use crate::game_repr::{GameState, Move};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub struct RandomPlayer {
    rng: StdRng,
    name: String,
}

impl RandomPlayer {
    /// Random player seeded from the operating system.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Reproducible random player.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            name: "Random".to_string(),
        }
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: GameState> Player<G> for RandomPlayer {
    fn get_move(&mut self, _game: &G, legal_moves: &[Move], _time_left: &dyn TimeLeft) -> Move {
        legal_moves.choose(&mut self.rng).copied().unwrap_or(Move::NONE)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
