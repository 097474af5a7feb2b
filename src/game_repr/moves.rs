use smallvec::SmallVec;
use std::fmt;

/// Knight offsets, in the order legal moves are generated.
pub const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Legal move list. Mid-game positions never have more than eight moves,
/// only an unmoved player's list (every blank cell) spills to the heap.
pub type MoveList = SmallVec<[Move; 8]>;

/// A board cell a player moves to, addressed as (row, col).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub row: i32,
    pub col: i32,
}

impl Move {
    /// "No legal move available".
    pub const NONE: Move = Move { row: -1, col: -1 };

    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    /// Cell reached by shifting this one by `(dr, dc)`. Bounds are not checked.
    pub fn offset(&self, dr: i32, dc: i32) -> Move {
        Move::new(self.row + dr, self.col + dc)
    }
}

impl From<(i32, i32)> for Move {
    fn from((row, col): (i32, i32)) -> Self {
        Move::new(row, col)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
