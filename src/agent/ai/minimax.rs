// Minimax and Alpha-Beta tree search
//
// Both walkers evaluate leaves from one fixed viewpoint: the player who started
// the search. `maximizing` only decides whether a node picks the highest or the
// lowest child score.
//
// Every call polls the time probe on entry. When the remaining time drops below
// the threshold the call returns `Err(Timeout)`, and `?` carries it up through
// every active frame without anything in here catching it.
//
// Children are visited in the order the game state generates them. Ties go to
// the first child that reached the winning score.

use crate::game_repr::{GameState, Move, PlayerId};
use super::clock::{TimeLeft, Timeout};
use super::evaluation::{evaluate, Heuristic};

/// Score of a subtree and the move leading into its best child.
///
/// `best_move` is `Move::NONE` at leaves (depth exhausted or no legal move).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub score: f64,
    pub best_move: Move,
}

impl SearchResult {
    pub fn new(score: f64, best_move: Move) -> Self {
        Self { score, best_move }
    }
}

/// Everything a search needs besides the position: the evaluator, the
/// viewpoint, the time probe and the abort threshold. Also counts visited nodes.
pub struct SearchContext<'a, G: GameState> {
    heuristic: &'a dyn Heuristic<G>,
    player: PlayerId,
    time_left: &'a dyn TimeLeft,
    threshold_ms: f64,
    nodes: u64,
}

impl<'a, G: GameState> SearchContext<'a, G> {
    pub fn new(
        heuristic: &'a dyn Heuristic<G>,
        player: PlayerId,
        time_left: &'a dyn TimeLeft,
        threshold_ms: f64,
    ) -> Self {
        Self {
            heuristic,
            player,
            time_left,
            threshold_ms,
            nodes: 0,
        }
    }

    /// Player whose viewpoint every leaf is scored from.
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// Nodes entered so far, including the one that timed out.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    fn enter_node(&mut self) -> Result<(), Timeout> {
        self.nodes += 1;
        if self.time_left.millis_left() < self.threshold_ms {
            return Err(Timeout);
        }
        Ok(())
    }

    fn leaf(&self, game: &G) -> SearchResult {
        SearchResult::new(evaluate(self.heuristic, game, self.player), Move::NONE)
    }
}

/// Plain minimax to `depth` plies.
pub fn minimax<G: GameState>(
    ctx: &mut SearchContext<'_, G>,
    game: &G,
    depth: u32,
    maximizing: bool,
) -> Result<SearchResult, Timeout> {
    ctx.enter_node()?;

    if depth == 0 {
        return Ok(ctx.leaf(game));
    }

    let moves = game.legal_moves();
    let Some(&first) = moves.first() else {
        return Ok(ctx.leaf(game));
    };

    let mut best = SearchResult::new(
        if maximizing { f64::NEG_INFINITY } else { f64::INFINITY },
        first,
    );

    for mv in moves {
        let child = minimax(ctx, &game.forecast_move(mv), depth - 1, !maximizing)?;
        let improves = if maximizing {
            child.score > best.score
        } else {
            child.score < best.score
        };
        if improves {
            best = SearchResult::new(child.score, mv);
        }
    }

    Ok(best)
}

/// Minimax with alpha-beta pruning to `depth` plies.
///
/// Call with `alpha = -inf, beta = +inf` at the root. On a cutoff the node
/// returns the move that triggered it. A node where every child scores the
/// initial bound (all losses on a max node, all wins on a min node) returns
/// `Move::NONE`.
pub fn alphabeta<G: GameState>(
    ctx: &mut SearchContext<'_, G>,
    game: &G,
    depth: u32,
    mut alpha: f64,
    mut beta: f64,
    maximizing: bool,
) -> Result<SearchResult, Timeout> {
    ctx.enter_node()?;

    if depth == 0 {
        return Ok(ctx.leaf(game));
    }

    let moves = game.legal_moves();
    if moves.is_empty() {
        return Ok(ctx.leaf(game));
    }

    if maximizing {
        let mut value = f64::NEG_INFINITY;
        let mut best = Move::NONE;
        for mv in moves {
            let child = alphabeta(ctx, &game.forecast_move(mv), depth - 1, alpha, beta, false)?;
            if child.score > value {
                value = child.score;
                best = mv;
            }
            if value >= beta {
                return Ok(SearchResult::new(value, mv));
            }
            alpha = alpha.max(value);
        }
        Ok(SearchResult::new(value, best))
    } else {
        let mut value = f64::INFINITY;
        let mut best = Move::NONE;
        for mv in moves {
            let child = alphabeta(ctx, &game.forecast_move(mv), depth - 1, alpha, beta, true)?;
            if child.score < value {
                value = child.score;
                best = mv;
            }
            if value <= alpha {
                return Ok(SearchResult::new(value, mv));
            }
            beta = beta.min(value);
        }
        Ok(SearchResult::new(value, best))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::ai::evaluation::Mobility;
    use crate::game_repr::Board;

    fn no_deadline() -> f64 {
        f64::INFINITY
    }

    #[test]
    fn test_depth_zero_is_static_evaluation() {
        let board = Board::with_locations(5, 5, Move::new(2, 2), Move::new(0, 0));
        let probe = no_deadline;
        let mut ctx = SearchContext::<Board>::new(&Mobility, PlayerId::One, &probe, 0.0);

        let expected = evaluate(&Mobility, &board, PlayerId::One);
        for maximizing in [true, false] {
            let mm = minimax(&mut ctx, &board, 0, maximizing).unwrap();
            let ab = alphabeta(&mut ctx, &board, 0, f64::NEG_INFINITY, f64::INFINITY, maximizing)
                .unwrap();
            assert_eq!(mm, SearchResult::new(expected, Move::NONE));
            assert_eq!(ab, mm);
        }
    }

    #[test]
    fn test_stuck_player_returns_sentinel() {
        let mut board = Board::with_locations(3, 3, Move::new(0, 0), Move::new(1, 1));
        board.block(Move::new(1, 2));
        board.block(Move::new(2, 1));
        let probe = no_deadline;
        let mut ctx = SearchContext::<Board>::new(&Mobility, PlayerId::One, &probe, 0.0);

        let result = minimax(&mut ctx, &board, 3, true).unwrap();
        assert_eq!(result.best_move, Move::NONE);
        assert_eq!(result.score, f64::NEG_INFINITY);
    }

    #[test]
    fn test_probe_below_threshold_times_out() {
        let board = Board::default();
        let probe = || 5.0;
        let mut ctx = SearchContext::<Board>::new(&Mobility, PlayerId::One, &probe, 10.0);

        assert_eq!(minimax(&mut ctx, &board, 2, true), Err(Timeout));
        assert_eq!(
            alphabeta(&mut ctx, &board, 2, f64::NEG_INFINITY, f64::INFINITY, true),
            Err(Timeout)
        );
    }

    #[test]
    fn test_node_counting() {
        // 3x3, One at (0,0) has two moves: root plus two leaves
        let board = Board::with_locations(3, 3, Move::new(0, 0), Move::new(2, 2));
        let probe = no_deadline;
        let mut ctx = SearchContext::<Board>::new(&Mobility, PlayerId::One, &probe, 0.0);

        minimax(&mut ctx, &board, 1, true).unwrap();
        assert_eq!(ctx.nodes(), 3);
    }
}
