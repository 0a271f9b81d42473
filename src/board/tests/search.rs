//! Search behavior tests.

use crate::board::{search, Board, SearchState, MATE_SCORE};

fn run(fen: &str, depth: u32) -> (Option<String>, i32, u64) {
    let mut board = Board::from_fen(fen);
    let mut state = SearchState::new(4);
    let result = search(&mut board, &mut state, depth, 0);
    (
        result.best_move.map(|m| m.to_string()),
        result.score,
        result.nodes,
    )
}

#[test]
fn test_finds_back_rank_mate_in_one() {
    let (best, score, _) = run("6k1/5ppp/8/8/8/8/5PPP/4R1K1 w - - 0 1", 2);
    assert_eq!(best.as_deref(), Some("e1e8"));
    assert!(score >= MATE_SCORE - 4, "mate score expected, got {score}");
}

#[test]
fn test_mated_position_reports_no_move() {
    // Black to move, already checkmated
    let (best, score, nodes) = run("7k/7Q/7K/8/8/8/8/8 b - - 0 1", 4);
    assert_eq!(best, None);
    assert_eq!(score, -MATE_SCORE);
    assert_eq!(nodes, 0);
}

#[test]
fn test_stalemate_position_reports_draw() {
    let (best, score, _) = run("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", 4);
    assert_eq!(best, None);
    assert_eq!(score, 0);
}

#[test]
fn test_best_move_is_always_legal() {
    let fens = [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    ];
    for fen in fens {
        let mut board = Board::from_fen(fen);
        let mut state = SearchState::new(4);
        let result = search(&mut board, &mut state, 3, 0);
        let best = result.best_move.expect("position has legal moves");
        let legal: Vec<String> = board.legal_moves().iter().map(|m| m.to_string()).collect();
        assert!(legal.contains(&best.to_string()), "{best} not legal in {fen}");
    }
}

#[test]
fn test_search_leaves_board_unchanged() {
    let fen = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";
    let mut board = Board::from_fen(fen);
    let mut state = SearchState::new(4);
    let hash = board.hash();
    search(&mut board, &mut state, 3, 0);
    assert_eq!(board.to_fen(), fen);
    assert_eq!(board.hash(), hash);
}

#[test]
fn test_grabs_hanging_queen() {
    // White queen en prise on d4, black knight on c6 takes it
    let (best, score, _) = run("4k3/8/2n5/8/3Q4/8/8/4K3 b - - 0 1", 3);
    assert_eq!(best.as_deref(), Some("c6d4"));
    assert!(score > 0);
}

#[test]
fn test_deeper_search_accumulates_nodes() {
    let (_, _, shallow) = run("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4", 2);
    let (_, _, deep) = run("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4", 4);
    assert!(deep > shallow);
}

#[test]
fn test_search_is_deterministic_from_fresh_state() {
    let (first_best, first_score, first_nodes) =
        run("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4", 3);
    let (second_best, second_score, second_nodes) =
        run("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4", 3);
    assert_eq!(first_best, second_best);
    assert_eq!(first_score, second_score);
    assert_eq!(first_nodes, second_nodes);
}

#[test]
fn test_transposition_table_reuse_stays_legal() {
    let fen = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";
    let mut board = Board::from_fen(fen);
    let mut state = SearchState::new(4);

    search(&mut board, &mut state, 3, 0);
    // Second search on a warm table must still return a legal move
    let second = search(&mut board, &mut state, 3, 0);
    let best = second.best_move.expect("legal moves exist");
    let legal: Vec<String> = board.legal_moves().iter().map(|m| m.to_string()).collect();
    assert!(legal.contains(&best.to_string()));
    assert_eq!(board.to_fen(), fen);
}

#[test]
fn test_avoids_stalemating_when_winning() {
    // KQ vs K: depth 4 must not throw away the queen or stalemate
    let (best, score, _) = run("8/8/8/8/8/2k5/8/K2Q4 w - - 0 1", 4);
    assert!(best.is_some());
    assert!(score > 500);
}
