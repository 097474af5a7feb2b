// Tests for the minimax and alpha-beta walkers

use super::tree_game::{tree_value, Spec, TreeGame};
use crate::agent::ai::evaluation::{evaluate, Mobility};
use crate::agent::ai::minimax::{alphabeta, minimax, SearchContext, SearchResult};
use crate::game_repr::{Board, GameState, Move, PlayerId};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const INF: f64 = f64::INFINITY;

fn unlimited() -> f64 {
    INF
}

fn run_minimax(game: &TreeGame, depth: u32, maximizing: bool) -> (SearchResult, u64) {
    let probe = unlimited;
    let mut ctx = SearchContext::<TreeGame>::new(&tree_value, PlayerId::One, &probe, 0.0);
    let result = minimax(&mut ctx, game, depth, maximizing).unwrap();
    (result, ctx.nodes())
}

fn run_alphabeta(game: &TreeGame, depth: u32, alpha: f64, beta: f64, maximizing: bool) -> (SearchResult, u64) {
    let probe = unlimited;
    let mut ctx = SearchContext::<TreeGame>::new(&tree_value, PlayerId::One, &probe, 0.0);
    let result = alphabeta(&mut ctx, game, depth, alpha, beta, maximizing).unwrap();
    (result, ctx.nodes())
}

fn textbook_tree() -> TreeGame {
    TreeGame::two_level(&[&[3.0, 12.0, 8.0], &[2.0, 4.0, 6.0], &[14.0, 5.0, 2.0]])
}

#[test]
fn test_minimax_textbook_tree() {
    let tree = textbook_tree();
    let (result, nodes) = run_minimax(&tree, 2, true);

    assert_eq!(result, SearchResult::new(3.0, tree.child_move(0)));
    assert_eq!(nodes, 13);
}

#[test]
fn test_alphabeta_prunes_textbook_tree() {
    let tree = textbook_tree();
    let (result, nodes) = run_alphabeta(&tree, 2, -INF, INF, true);

    assert_eq!(result, SearchResult::new(3.0, tree.child_move(0)));
    // Second subtree is cut after its first leaf
    assert_eq!(nodes, 11);
}

#[test]
fn test_minimax_minimizing_root() {
    let tree = TreeGame::two_level(&[&[3.0, 12.0], &[2.0, 20.0], &[14.0, 5.0]]);
    let (result, _) = run_minimax(&tree, 2, false);
    // min over children of max(grandchildren): 12, 20, 14
    assert_eq!(result, SearchResult::new(12.0, tree.child_move(0)));
}

#[test]
fn test_depth_limits_the_walk() {
    let tree = textbook_tree();
    // depth 1 only sees the (zero) static values of the root's children
    let (result, nodes) = run_minimax(&tree, 1, true);
    assert_eq!(result, SearchResult::new(0.0, tree.child_move(0)));
    assert_eq!(nodes, 4);
}

#[test]
fn test_minimax_tie_goes_to_first_move() {
    let tree = TreeGame::build(Spec::Inner(
        0.0,
        vec![Spec::Leaf(1.0), Spec::Leaf(5.0), Spec::Leaf(5.0), Spec::Leaf(3.0)],
    ));
    let (max, _) = run_minimax(&tree, 1, true);
    assert_eq!(max.best_move, tree.child_move(1));

    let tree = TreeGame::build(Spec::Inner(
        0.0,
        vec![Spec::Leaf(4.0), Spec::Leaf(-2.0), Spec::Leaf(-2.0)],
    ));
    let (min, _) = run_minimax(&tree, 1, false);
    assert_eq!(min.best_move, tree.child_move(1));
}

#[test]
fn test_alphabeta_tie_goes_to_first_move() {
    let tree = TreeGame::build(Spec::Inner(
        0.0,
        vec![Spec::Leaf(1.0), Spec::Leaf(5.0), Spec::Leaf(5.0), Spec::Leaf(3.0)],
    ));
    let (max, _) = run_alphabeta(&tree, 1, -INF, INF, true);
    assert_eq!(max, SearchResult::new(5.0, tree.child_move(1)));

    let tree = TreeGame::build(Spec::Inner(
        0.0,
        vec![Spec::Leaf(4.0), Spec::Leaf(-2.0), Spec::Leaf(-2.0)],
    ));
    let (min, _) = run_alphabeta(&tree, 1, -INF, INF, false);
    assert_eq!(min, SearchResult::new(-2.0, tree.child_move(1)));
}

#[test]
fn test_minimizing_node_returns_tracked_best() {
    // No cutoff happens, so the node reports its lowest child, not the last one
    let tree = TreeGame::build(Spec::Inner(
        0.0,
        vec![Spec::Leaf(4.0), Spec::Leaf(2.0), Spec::Leaf(9.0)],
    ));
    let (result, nodes) = run_alphabeta(&tree, 1, -INF, INF, false);
    assert_eq!(result, SearchResult::new(2.0, tree.child_move(1)));
    assert_eq!(nodes, 4);
}

#[test]
fn test_min_cutoff_returns_triggering_move() {
    let tree = TreeGame::two_level(&[&[3.0, 12.0, 8.0], &[14.0, 5.0, 2.0, 1.0]]);
    let subtree = tree.child(1);

    let (result, nodes) = run_alphabeta(&subtree, 1, 3.0, INF, false);
    assert_eq!(result, SearchResult::new(2.0, subtree.child_move(2)));
    // the last leaf is never visited
    assert_eq!(nodes, 4);
}

#[test]
fn test_max_cutoff_returns_triggering_move() {
    let tree = TreeGame::build(Spec::Inner(
        0.0,
        vec![Spec::Leaf(5.0), Spec::Leaf(7.0), Spec::Leaf(100.0)],
    ));
    let (result, nodes) = run_alphabeta(&tree, 1, -INF, 6.0, true);
    assert_eq!(result, SearchResult::new(7.0, tree.child_move(1)));
    assert_eq!(nodes, 3);
}

#[test]
fn test_degenerate_window_cuts_on_first_child() {
    // beta = -inf: the first child triggers the cutoff even though it never
    // became the incumbent best
    let tree = TreeGame::build(Spec::Inner(
        0.0,
        vec![Spec::Leaf(f64::NEG_INFINITY), Spec::Leaf(1.0)],
    ));
    let (result, nodes) = run_alphabeta(&tree, 1, -INF, -INF, true);
    assert_eq!(result, SearchResult::new(f64::NEG_INFINITY, tree.child_move(0)));
    assert_eq!(nodes, 2);
}

#[test]
fn test_all_losing_children_leave_no_best_move() {
    let tree = TreeGame::build(Spec::Inner(
        0.0,
        vec![Spec::Leaf(f64::NEG_INFINITY), Spec::Leaf(f64::NEG_INFINITY)],
    ));
    let (ab, _) = run_alphabeta(&tree, 1, -INF, INF, true);
    assert_eq!(ab, SearchResult::new(f64::NEG_INFINITY, Move::NONE));

    // minimax still names the first move
    let (mm, _) = run_minimax(&tree, 1, true);
    assert_eq!(mm, SearchResult::new(f64::NEG_INFINITY, tree.child_move(0)));
}

#[test]
fn test_alphabeta_matches_minimax_on_random_trees() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..300 {
        let tree = TreeGame::random(&mut rng, 4, 4);
        for depth in 0..=4 {
            for maximizing in [true, false] {
                let (mm, mm_nodes) = run_minimax(&tree, depth, maximizing);
                let (ab, ab_nodes) = run_alphabeta(&tree, depth, -INF, INF, maximizing);
                assert_eq!(mm, ab, "depth {depth} maximizing {maximizing}");
                assert!(ab_nodes <= mm_nodes);
            }
        }
    }
}

/// Plays `plies` random moves on a fresh board.
fn random_board(rng: &mut StdRng, size: usize, plies: usize) -> Board {
    let mut board = Board::new(size, size);
    for _ in 0..plies {
        let moves = board.legal_moves();
        match moves.choose(rng) {
            Some(&mv) => board.apply_move(mv),
            None => break,
        }
    }
    board
}

#[test]
fn test_alphabeta_matches_minimax_on_boards() {
    let mut rng = StdRng::seed_from_u64(17);
    let probe = unlimited;
    for _ in 0..40 {
        let plies = rand::Rng::gen_range(&mut rng, 2..8);
        let board = random_board(&mut rng, 5, plies);
        let player = board.active_player();
        for depth in 1..=3 {
            let mut ctx = SearchContext::<Board>::new(&Mobility, player, &probe, 0.0);
            let mm = minimax(&mut ctx, &board, depth, true).unwrap();
            let mut ctx = SearchContext::<Board>::new(&Mobility, player, &probe, 0.0);
            let ab = alphabeta(&mut ctx, &board, depth, -INF, INF, true).unwrap();
            assert_eq!(mm.score, ab.score, "depth {depth} on\n{board}");
        }
    }
}

#[test]
fn test_leaf_scores_use_root_player_viewpoint() {
    // After One moves it is Two's turn, yet leaves are still scored for One
    let board = Board::with_locations(3, 3, Move::new(0, 0), Move::new(2, 2));
    let probe = unlimited;
    let mut ctx = SearchContext::<Board>::new(&Mobility, PlayerId::One, &probe, 0.0);
    let result = minimax(&mut ctx, &board, 1, true).unwrap();

    let child = board.forecast_move(result.best_move);
    assert_eq!(child.active_player(), PlayerId::Two);
    assert_eq!(result.score, evaluate(&Mobility, &child, PlayerId::One));
}

#[test]
fn test_three_by_three_scenario() {
    // One at (0,0) can reach (1,2) or (2,1); both leave One with a single
    // follow-up and Two with two, so both score -1 and the first wins the tie
    let board = Board::with_locations(3, 3, Move::new(0, 0), Move::new(2, 2));
    assert_eq!(board.move_count(), 0);
    let probe = unlimited;

    let mut ctx = SearchContext::<Board>::new(&Mobility, PlayerId::One, &probe, 0.0);
    let mm = minimax(&mut ctx, &board, 1, true).unwrap();
    let mut ctx = SearchContext::<Board>::new(&Mobility, PlayerId::One, &probe, 0.0);
    let ab = alphabeta(&mut ctx, &board, 1, -INF, INF, true).unwrap();

    assert_eq!(mm, SearchResult::new(-1.0, Move::new(1, 2)));
    assert_eq!(ab, mm);
}
