//! Bitboard chess engine core.
//!
//! Provides position representation, legal move generation, and a
//! depth-limited alpha-beta search:
//! - Bitboard board model with a mailbox and incremental Zobrist hashing
//! - Blocker-enumerated sliding-piece attack tables (no magic numbers)
//! - Make/undo with an irreversible-state history stack
//! - Negamax search with transposition table, null-move pruning, PVS,
//!   late-move reductions and quiescence
//! - FEN and UCI move I/O, plus a validator surface for HTTP hosts
//!
//! # Quick Start
//!
//! ```
//! use chess_core::board::Board;
//!
//! let mut board = Board::new();
//! let moves = board.legal_moves();
//! assert_eq!(moves.len(), 20);
//!
//! let mv = board.parse_uci_move("e2e4").unwrap();
//! board.make_move(mv);
//! assert!(board.to_fen().contains(" b "));
//! ```
//!
//! # Searching
//!
//! ```
//! use chess_core::board::{search, Board, SearchState};
//!
//! let mut board = Board::from_fen("6k1/5ppp/8/8/8/8/5PPP/4R1K1 w - - 0 1");
//! let mut state = SearchState::new(16);
//! let result = search(&mut board, &mut state, 2, 0);
//! assert_eq!(result.best_move.unwrap().to_string(), "e1e8");
//! ```
//!
//! # Validating moves
//!
//! ```
//! use chess_core::validator::{process_move, MoveReport};
//!
//! let report = process_move(
//!     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
//!     "e2e4",
//! )
//! .unwrap();
//! assert!(matches!(report, MoveReport::Valid { .. }));
//! ```

// Enable pedantic lints with sensible domain-specific exceptions
#![warn(clippy::pedantic)]
// Bitboard hex literals are clearer without separators (bit patterns visible)
#![allow(clippy::unreadable_literal)]
// Index casts are ubiquitous and safe in chess (board indices, square indices)
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
// Large arrays are needed for move lists and attack tables
#![allow(clippy::large_stack_arrays)]
// Module-level documentation is sufficient for this codebase
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod board;
pub mod tt;
pub mod validator;

pub(crate) mod zobrist;
