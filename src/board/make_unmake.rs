//! Applying and reversing moves.
//!
//! `make_move` pushes a new [`UndoInfo`] entry describing the resulting
//! position; `undo_move` pops it and restores the snapshot underneath.
//! The Zobrist hash is maintained incrementally: `put_piece`/`remove_piece`
//! fold the piece-square keys in as pieces move, and `make_move` handles
//! the side, en-passant and castling keys.

use crate::zobrist::ZOBRIST;

use super::{
    castle_bit, Board, Color, Move, MoveFlag, Piece, PieceType, Square, UndoInfo,
};

impl Board {
    pub(crate) fn put_piece(&mut self, sq: Square, piece: Piece) {
        debug_assert!(self.mailbox[sq.index()].is_none(), "square {sq} occupied");
        let bit = sq.bit();
        self.pieces[piece.color.index()][piece.kind.index()] |= bit;
        self.occupancy[piece.color.index()] |= bit;
        self.occupancy_all |= bit;
        self.mailbox[sq.index()] = Some(piece);
        self.hash ^= ZOBRIST.piece_keys[piece.color.index()][piece.kind.index()][sq.index()];
    }

    pub(crate) fn remove_piece(&mut self, sq: Square) -> Piece {
        let piece = self.mailbox[sq.index()]
            .take()
            .expect("remove_piece: square empty");
        let bit = sq.bit();
        self.pieces[piece.color.index()][piece.kind.index()] &= !bit;
        self.occupancy[piece.color.index()] &= !bit;
        self.occupancy_all &= !bit;
        self.hash ^= ZOBRIST.piece_keys[piece.color.index()][piece.kind.index()][sq.index()];
        piece
    }

    fn move_piece(&mut self, from: Square, to: Square) {
        let piece = self.remove_piece(from);
        self.put_piece(to, piece);
    }

    /// Apply a pseudo-legal move. The move must come from this position's
    /// move generator (or the matching UCI parse).
    pub fn make_move(&mut self, m: Move) {
        let from = m.from();
        let to = m.to();
        let us = self.side_to_move;
        let moving = self.mailbox[from.index()].expect("make_move: from square empty");

        self.hash ^= ZOBRIST.side_key;
        if let Some(ep) = self.en_passant_square() {
            self.hash ^= ZOBRIST.en_passant_keys[ep.file()];
        }

        let old_rights = self.castling_rights;
        if moving.kind == PieceType::King {
            self.castling_rights &= !(castle_bit(us, 'K') | castle_bit(us, 'Q'));
        } else if moving.kind == PieceType::Rook {
            self.castling_rights &= !rook_square_right(from);
        }
        if let Some(victim) = self.mailbox[to.index()] {
            if victim.kind == PieceType::Rook {
                self.castling_rights &= !rook_square_right(to);
            }
        }

        let mut captured = None;
        let mut new_ep = None;

        match m.flag() {
            MoveFlag::Quiet => self.move_piece(from, to),
            MoveFlag::DoublePush => {
                self.move_piece(from, to);
                new_ep = Some(from.offset(us.forward()));
            }
            MoveFlag::CastleKingSide => {
                self.move_piece(from, to);
                let rank = from.rank();
                self.move_piece(Square::new(rank, 7), Square::new(rank, 5));
            }
            MoveFlag::CastleQueenSide => {
                self.move_piece(from, to);
                let rank = from.rank();
                self.move_piece(Square::new(rank, 0), Square::new(rank, 3));
            }
            MoveFlag::EnPassant => {
                self.move_piece(from, to);
                captured = Some(self.remove_piece(to.offset(-us.forward())));
            }
            MoveFlag::Capture => {
                captured = Some(self.remove_piece(to));
                self.move_piece(from, to);
            }
            MoveFlag::PromoteKnight
            | MoveFlag::PromoteBishop
            | MoveFlag::PromoteRook
            | MoveFlag::PromoteQueen => {
                self.remove_piece(from);
                self.put_piece(to, Piece::new(us, m.promotion().expect("promotion flag")));
            }
            MoveFlag::CapturePromoteKnight
            | MoveFlag::CapturePromoteBishop
            | MoveFlag::CapturePromoteRook
            | MoveFlag::CapturePromoteQueen => {
                self.remove_piece(from);
                captured = Some(self.remove_piece(to));
                self.put_piece(to, Piece::new(us, m.promotion().expect("promotion flag")));
            }
        }

        self.hash ^= ZOBRIST.castling_keys[old_rights as usize]
            ^ ZOBRIST.castling_keys[self.castling_rights as usize];
        if let Some(ep) = new_ep {
            self.hash ^= ZOBRIST.en_passant_keys[ep.file()];
        }

        if moving.kind == PieceType::Pawn || m.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if us == Color::Black {
            self.fullmove_counter += 1;
        }
        self.side_to_move = us.opponent();
        self.game_ply += 1;
        self.history.push(UndoInfo {
            captured,
            en_passant: new_ep,
            castling_rights: self.castling_rights,
            halfmove_clock: self.halfmove_clock,
            fullmove_counter: self.fullmove_counter,
            hash: self.hash,
        });
    }

    /// Reverse the most recent `make_move`. `m` must be that move.
    pub fn undo_move(&mut self, m: Move) {
        let undone = self.history.pop().expect("undo_move: empty history");
        self.game_ply -= 1;
        self.side_to_move = self.side_to_move.opponent();
        let us = self.side_to_move;
        let from = m.from();
        let to = m.to();

        match m.flag() {
            MoveFlag::Quiet | MoveFlag::DoublePush => self.move_piece(to, from),
            MoveFlag::CastleKingSide => {
                self.move_piece(to, from);
                let rank = from.rank();
                self.move_piece(Square::new(rank, 5), Square::new(rank, 7));
            }
            MoveFlag::CastleQueenSide => {
                self.move_piece(to, from);
                let rank = from.rank();
                self.move_piece(Square::new(rank, 3), Square::new(rank, 0));
            }
            MoveFlag::EnPassant => {
                self.move_piece(to, from);
                let victim = undone.captured.expect("en passant without capture");
                self.put_piece(to.offset(-us.forward()), victim);
            }
            MoveFlag::Capture => {
                self.move_piece(to, from);
                let victim = undone.captured.expect("capture without victim");
                self.put_piece(to, victim);
            }
            MoveFlag::PromoteKnight
            | MoveFlag::PromoteBishop
            | MoveFlag::PromoteRook
            | MoveFlag::PromoteQueen => {
                self.remove_piece(to);
                self.put_piece(from, Piece::new(us, PieceType::Pawn));
            }
            MoveFlag::CapturePromoteKnight
            | MoveFlag::CapturePromoteBishop
            | MoveFlag::CapturePromoteRook
            | MoveFlag::CapturePromoteQueen => {
                self.remove_piece(to);
                let victim = undone.captured.expect("capture without victim");
                self.put_piece(to, victim);
                self.put_piece(from, Piece::new(us, PieceType::Pawn));
            }
        }

        let prev = self.history[self.game_ply];
        self.castling_rights = prev.castling_rights;
        self.halfmove_clock = prev.halfmove_clock;
        self.fullmove_counter = prev.fullmove_counter;
        self.hash = prev.hash;
    }

    /// Pass the turn without moving: flip the side, clear the en-passant
    /// square. Used by null-move pruning.
    pub fn make_null_move(&mut self) {
        self.hash ^= ZOBRIST.side_key;
        if let Some(ep) = self.en_passant_square() {
            self.hash ^= ZOBRIST.en_passant_keys[ep.file()];
        }
        self.side_to_move = self.side_to_move.opponent();
        self.game_ply += 1;
        self.history.push(UndoInfo {
            captured: None,
            en_passant: None,
            castling_rights: self.castling_rights,
            halfmove_clock: self.halfmove_clock,
            fullmove_counter: self.fullmove_counter,
            hash: self.hash,
        });
    }

    pub fn undo_null_move(&mut self) {
        self.history.pop().expect("undo_null_move: empty history");
        self.game_ply -= 1;
        self.side_to_move = self.side_to_move.opponent();
        self.hash = self.history[self.game_ply].hash;
    }

    /// Hash recomputed from scratch. The incrementally maintained hash must
    /// always agree with this.
    pub(crate) fn calculate_hash(&self) -> u64 {
        let mut hash = 0u64;
        for idx in 0..64 {
            if let Some(piece) = self.mailbox[idx] {
                hash ^= ZOBRIST.piece_keys[piece.color.index()][piece.kind.index()][idx];
            }
        }
        if self.side_to_move == Color::Black {
            hash ^= ZOBRIST.side_key;
        }
        hash ^= ZOBRIST.castling_keys[self.castling_rights as usize];
        if let Some(ep) = self.en_passant_square() {
            hash ^= ZOBRIST.en_passant_keys[ep.file()];
        }
        hash
    }
}

/// Castling right lost when a rook moves from, or is captured on, one of
/// the four original rook squares.
fn rook_square_right(sq: Square) -> u8 {
    match sq {
        Square::A1 => castle_bit(Color::White, 'Q'),
        Square::H1 => castle_bit(Color::White, 'K'),
        Square::A8 => castle_bit(Color::Black, 'Q'),
        Square::H8 => castle_bit(Color::Black, 'K'),
        _ => 0,
    }
}
