// Depth driver
//
// Runs the configured tree walker either once at a fixed depth or at depth
// 1, 2, 3, ... until the time probe trips. A result only replaces the committed
// move once its iteration has returned normally; a timed-out iteration leaves
// nothing behind.

use crate::game_repr::{GameState, Move};
use super::clock::{TimeLeft, Timeout};
use super::config::{AgentConfig, DepthMode, SearchMethod};
use super::evaluation::Heuristic;
use super::minimax::{alphabeta, minimax, SearchContext, SearchResult};
use std::time::Instant;

/// Outcome of one completed depth iteration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationInfo {
    pub depth: u32,
    pub score: f64,
    pub best_move: Move,
    /// Nodes visited by this iteration alone
    pub nodes: u64,
}

/// Result of a top-level search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    /// Move to play. `Move::NONE` only when there was no legal move.
    pub best_move: Move,
    /// Root score of the last completed iteration
    pub score: Option<f64>,
    pub depth_reached: u32,
    pub nodes_searched: u64,
    pub time_ms: u64,
    /// The search stopped because the time probe tripped
    pub timed_out: bool,
    pub iterations: Vec<IterationInfo>,
}

impl SearchReport {
    fn new(best_move: Move) -> Self {
        Self {
            best_move,
            score: None,
            depth_reached: 0,
            nodes_searched: 0,
            time_ms: 0,
            timed_out: false,
            iterations: Vec::new(),
        }
    }
}

/// Run one search of `depth` plies from the root with the chosen walker.
pub fn search_depth<G: GameState>(
    ctx: &mut SearchContext<'_, G>,
    game: &G,
    method: SearchMethod,
    depth: u32,
) -> Result<SearchResult, Timeout> {
    match method {
        SearchMethod::Minimax => minimax(ctx, game, depth, true),
        SearchMethod::AlphaBeta => alphabeta(ctx, game, depth, f64::NEG_INFINITY, f64::INFINITY, true),
    }
}

/// Pick a move for the player to move in `game`.
///
/// # Arguments
/// * `game` - Position to search; never modified
/// * `legal_moves` - Moves available to the player to move
/// * `config` - Search method, depth control and abort threshold
/// * `heuristic` - Leaf scoring policy
/// * `time_left` - Probe of the milliseconds left in this turn
///
/// # Returns
/// A report whose `best_move` is always one of `legal_moves` unless that list
/// was empty. The first legal move is the fallback if no iteration completes.
pub fn iterative_deepening_search<G: GameState>(
    game: &G,
    legal_moves: &[Move],
    config: &AgentConfig,
    heuristic: &dyn Heuristic<G>,
    time_left: &dyn TimeLeft,
) -> SearchReport {
    let Some(&fallback) = legal_moves.first() else {
        return SearchReport::new(Move::NONE);
    };

    let start_time = Instant::now();
    let mut report = SearchReport::new(fallback);
    let mut ctx = SearchContext::new(
        heuristic,
        game.active_player(),
        time_left,
        config.timeout_threshold_ms,
    );

    let (first_depth, last_depth) = match config.depth_mode {
        DepthMode::Fixed(depth) => (depth, depth),
        DepthMode::Iterative => (1, u32::MAX),
    };

    for depth in first_depth..=last_depth {
        let nodes_before = ctx.nodes();
        match search_depth(&mut ctx, game, config.method, depth) {
            Ok(result) => {
                // Every reply loses: keep the previous committed move playable
                if !result.best_move.is_none() {
                    report.best_move = result.best_move;
                }
                report.score = Some(result.score);
                report.depth_reached = depth;
                report.iterations.push(IterationInfo {
                    depth,
                    score: result.score,
                    best_move: result.best_move,
                    nodes: ctx.nodes() - nodes_before,
                });
                print_search_info(depth, &result, ctx.nodes(), &start_time);
            }
            Err(Timeout) => {
                log::debug!(
                    "timeout during depth {} - returning {} from depth {}",
                    depth,
                    report.best_move,
                    report.depth_reached
                );
                report.timed_out = true;
                break;
            }
        }
    }

    report.nodes_searched = ctx.nodes();
    report.time_ms = start_time.elapsed().as_millis() as u64;
    report
}

/// Log a completed depth iteration
fn print_search_info(depth: u32, result: &SearchResult, nodes: u64, start_time: &Instant) {
    log::debug!(
        "depth {} score {} nodes {} time {}ms move {}",
        depth,
        result.score,
        nodes,
        start_time.elapsed().as_millis(),
        result.best_move
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::ai::evaluation::Mobility;
    use crate::game_repr::Board;

    #[test]
    fn test_empty_legal_moves() {
        let board = Board::default();
        let probe = || f64::INFINITY;
        let report = iterative_deepening_search(
            &board,
            &[],
            &AgentConfig::default(),
            &Mobility,
            &probe,
        );
        assert_eq!(report.best_move, Move::NONE);
        assert!(report.iterations.is_empty());
        assert_eq!(report.nodes_searched, 0);
    }

    #[test]
    fn test_fixed_depth_runs_exactly_once() {
        let board = Board::with_locations(5, 5, Move::new(2, 2), Move::new(0, 0));
        let legal: Vec<Move> = board.legal_moves().into_iter().collect();
        let probe = || f64::INFINITY;
        let config = AgentConfig::fixed(SearchMethod::AlphaBeta, 2);

        let report = iterative_deepening_search(&board, &legal, &config, &Mobility, &probe);
        assert_eq!(report.iterations.len(), 1);
        assert_eq!(report.depth_reached, 2);
        assert!(!report.timed_out);
        assert!(legal.contains(&report.best_move));
    }

    #[test]
    fn test_immediate_timeout_returns_first_move() {
        let board = Board::with_locations(5, 5, Move::new(2, 2), Move::new(0, 0));
        let legal: Vec<Move> = board.legal_moves().into_iter().collect();
        let probe = || -1.0;
        let config = AgentConfig::iterative(SearchMethod::Minimax);

        let report = iterative_deepening_search(&board, &legal, &config, &Mobility, &probe);
        assert!(report.timed_out);
        assert_eq!(report.best_move, legal[0]);
        assert_eq!(report.score, None);
    }
}
