//! Move validation and search entry points for embedding hosts.
//!
//! These functions are the thin composition layer an HTTP front end maps
//! its `/move` and `/search` requests onto. The report types serialize to
//! the wire format directly; transport, JSON framing and status codes stay
//! with the host.

use log::debug;
use serde::Serialize;

use crate::board::error::{FenError, SearchRequestError};
use crate::board::{search, Board, SearchState};

pub const MIN_SEARCH_DEPTH: u32 = 1;
pub const MAX_SEARCH_DEPTH: u32 = 20;

/// Terminal classification of a position, checked in this order.
#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameState {
    #[serde(rename = "CHECKMATE")]
    Checkmate,
    #[serde(rename = "STALEMATE")]
    Stalemate,
    #[serde(rename = "DRAW_50_MOVE")]
    FiftyMoveDraw,
    #[serde(rename = "DRAW_INSUFFICIENT")]
    InsufficientMaterialDraw,
    #[serde(rename = "ACTIVE")]
    Active,
}

/// Outcome of validating and applying one move.
#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
#[serde(tag = "status")]
pub enum MoveReport {
    /// The move was legal and has been applied.
    #[serde(rename = "VALID")]
    Valid {
        game_state: GameState,
        new_fen: String,
    },
    /// Well-formed input that is not a legal move; no state change.
    #[serde(rename = "INVALID")]
    Invalid,
}

/// Validate `uci` in the position `fen`, apply it, and classify the
/// resulting position.
///
/// A FEN that does not parse is the caller's error (`Err`); a move that is
/// not legal in the position is a regular outcome (`MoveReport::Invalid`).
pub fn process_move(fen: &str, uci: &str) -> Result<MoveReport, FenError> {
    let mut board = Board::try_from_fen(fen)?;

    let Ok(mv) = board.parse_uci_move(uci) else {
        debug!("rejected move {uci} in {fen}");
        return Ok(MoveReport::Invalid);
    };

    board.make_move(mv);
    let state = classify(&mut board);
    debug!("applied {uci}: {state:?}");
    Ok(MoveReport::Valid {
        game_state: state,
        new_fen: board.to_fen(),
    })
}

/// Classify the position for the side to move.
pub fn classify(board: &mut Board) -> GameState {
    let has_moves = !board.legal_moves().is_empty();
    let in_check = board.in_check(board.side_to_move());

    if !has_moves && in_check {
        GameState::Checkmate
    } else if !has_moves {
        GameState::Stalemate
    } else if board.halfmove_clock() >= 100 {
        GameState::FiftyMoveDraw
    } else if board.insufficient_material() {
        GameState::InsufficientMaterialDraw
    } else {
        GameState::Active
    }
}

/// Result of a position search, shaped for the `/search` response.
#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
pub struct SearchReport {
    /// UCI best move, or `null` when the position has no legal moves.
    pub best_move: Option<String>,
    pub score: i32,
    pub depth: u32,
    pub nodes: u64,
}

/// Search the position `fen` to `depth` plies (1..=20) and report the best
/// move. Each call runs on a fresh search state.
pub fn search_position(
    fen: &str,
    depth: u32,
    noise: i32,
) -> Result<SearchReport, SearchRequestError> {
    if !(MIN_SEARCH_DEPTH..=MAX_SEARCH_DEPTH).contains(&depth) {
        return Err(SearchRequestError::DepthOutOfRange { depth });
    }

    let mut board = Board::try_from_fen(fen)?;
    let mut state = SearchState::default();
    let result = search(&mut board, &mut state, depth, noise);
    debug!(
        "searched {fen} to depth {depth}: {:?} ({} nodes)",
        result.best_move, result.nodes
    );

    Ok(SearchReport {
        best_move: result.best_move.map(|m| m.to_string()),
        score: result.score,
        depth,
        nodes: result.nodes,
    })
}
