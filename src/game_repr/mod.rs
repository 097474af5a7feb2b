mod moves;
mod player;
mod position;
mod state;

pub use moves::*;
pub use player::*;
pub use position::*;
pub use state::*;
