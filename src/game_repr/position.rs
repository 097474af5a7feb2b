use super::*;
use std::fmt;

/*
 * KNIGHT-MOVE ISOLATION BOARD
 * every cell a player has stood on stays blocked for the rest of the game,
 * the player left without a legal move loses
 */

pub const DEFAULT_WIDTH: usize = 7;
pub const DEFAULT_HEIGHT: usize = 7;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// true = blocked; indexed by `row + col * height`
    blocked: Vec<bool>,
    locations: [Option<Move>; 2],
    active: PlayerId,
    move_count: usize,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            blocked: vec![false; width * height],
            locations: [None, None],
            active: PlayerId::One,
            move_count: 0,
        }
    }

    /// Board with both players already standing on `p1` and `p2`.
    /// Player One is to move and the move counter starts at zero.
    pub fn with_locations(width: usize, height: usize, p1: Move, p2: Move) -> Self {
        let mut board = Self::new(width, height);
        board.place(PlayerId::One, p1);
        board.place(PlayerId::Two, p2);
        board
    }

    fn place(&mut self, player: PlayerId, cell: Move) {
        self.block(cell);
        self.locations[player.index()] = Some(cell);
    }

    /// Mark `cell` as unavailable. Out-of-bounds cells are ignored.
    pub fn block(&mut self, cell: Move) {
        if let Some(idx) = self.index(cell) {
            self.blocked[idx] = true;
        }
    }

    fn index(&self, cell: Move) -> Option<usize> {
        if self.in_bounds(cell) {
            Some(cell.row as usize + cell.col as usize * self.height)
        } else {
            None
        }
    }

    pub fn in_bounds(&self, cell: Move) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.height
            && (cell.col as usize) < self.width
    }

    /// In bounds and not yet occupied.
    pub fn move_is_legal(&self, cell: Move) -> bool {
        self.index(cell).is_some_and(|idx| !self.blocked[idx])
    }

    /// Every open cell, by column then row.
    pub fn blank_cells(&self) -> MoveList {
        let mut cells = MoveList::new();
        for col in 0..self.width as i32 {
            for row in 0..self.height as i32 {
                let cell = Move::new(row, col);
                if self.move_is_legal(cell) {
                    cells.push(cell);
                }
            }
        }
        cells
    }

    pub fn inactive_player(&self) -> PlayerId {
        self.active.opponent()
    }

    pub fn has_legal_moves(&self, player: PlayerId) -> bool {
        !self.legal_moves_for(player).is_empty()
    }

    /// Moves the active player to `mv` and passes the turn.
    pub fn apply_move(&mut self, mv: Move) {
        debug_assert!(self.move_is_legal(mv), "illegal move {mv}");
        self.place(self.active, mv);
        self.active = self.active.opponent();
        self.move_count += 1;
    }

    /// Final payoff for `player`: infinite for the winner, negative infinite
    /// for the loser, zero while the game is still running.
    pub fn utility(&self, player: PlayerId) -> f64 {
        if self.is_winner(player) {
            f64::INFINITY
        } else if self.is_loser(player) {
            f64::NEG_INFINITY
        } else {
            0.0
        }
    }

    fn knight_moves(&self, from: Move) -> MoveList {
        KNIGHT_OFFSETS
            .iter()
            .map(|&(dr, dc)| from.offset(dr, dc))
            .filter(|&cell| self.move_is_legal(cell))
            .collect()
    }
}

impl GameState for Board {
    fn active_player(&self) -> PlayerId {
        self.active
    }

    fn legal_moves_for(&self, player: PlayerId) -> MoveList {
        match self.locations[player.index()] {
            None => self.blank_cells(),
            Some(from) => self.knight_moves(from),
        }
    }

    fn forecast_move(&self, mv: Move) -> Self {
        let mut next = self.clone();
        next.apply_move(mv);
        next
    }

    fn is_winner(&self, player: PlayerId) -> bool {
        player == self.inactive_player() && !self.has_legal_moves(self.active)
    }

    fn is_loser(&self, player: PlayerId) -> bool {
        player == self.active && !self.has_legal_moves(self.active)
    }

    fn player_location(&self, player: PlayerId) -> Option<Move> {
        self.locations[player.index()]
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn move_count(&self) -> usize {
        self.move_count
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height as i32 {
            write!(f, " |")?;
            for col in 0..self.width as i32 {
                let cell = Move::new(row, col);
                let mark = if self.locations[0] == Some(cell) {
                    "1"
                } else if self.locations[1] == Some(cell) {
                    "2"
                } else if self.move_is_legal(cell) {
                    " "
                } else {
                    "-"
                };
                write!(f, " {mark} |")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
