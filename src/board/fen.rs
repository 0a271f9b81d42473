//! FEN parsing and emission, plus UCI move parsing.

use std::str::FromStr;

use super::error::{FenError, MoveParseError};
use super::{
    file_to_index, rank_to_index, Board, Color, Move, Piece, PieceType, Square, UndoInfo,
    CASTLE_BLACK_K, CASTLE_BLACK_Q, CASTLE_WHITE_K, CASTLE_WHITE_Q,
};

impl Board {
    /// Parse a position from FEN notation.
    ///
    /// The first four fields are required; the halfmove clock and fullmove
    /// counter default to 0 and 1 when absent. Nothing is left behind on
    /// failure: parsing builds a fresh board and returns it only on success.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let mut board = Board::empty();
        let fields: Vec<&str> = fen.split_whitespace().collect();

        if fields.len() < 4 {
            return Err(FenError::TooFewFields {
                found: fields.len(),
            });
        }

        // Piece placement, rank 8 down to rank 1
        for (rank_idx, rank_str) in fields[0].split('/').enumerate() {
            if rank_idx >= 8 {
                return Err(FenError::InvalidRank { rank: rank_idx });
            }
            let mut file = 0;
            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    file += digit as usize;
                } else {
                    let color = if c.is_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let kind = PieceType::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                    if file >= 8 {
                        return Err(FenError::TooManyFiles {
                            rank: rank_idx,
                            files: file + 1,
                        });
                    }
                    board.put_piece(Square::new(7 - rank_idx, file), Piece::new(color, kind));
                    file += 1;
                }
            }
        }

        for (color, color_name) in [(Color::White, "White"), (Color::Black, "Black")] {
            let kings = board.pieces[color.index()][PieceType::King.index()].count_ones();
            if kings != 1 {
                return Err(FenError::BadKingCount {
                    color_name,
                    found: kings,
                });
            }
        }

        match fields[1] {
            "w" => board.side_to_move = Color::White,
            "b" => board.side_to_move = Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        }

        for c in fields[2].chars() {
            match c {
                'K' => board.castling_rights |= CASTLE_WHITE_K,
                'Q' => board.castling_rights |= CASTLE_WHITE_Q,
                'k' => board.castling_rights |= CASTLE_BLACK_K,
                'q' => board.castling_rights |= CASTLE_BLACK_Q,
                '-' => {}
                _ => return Err(FenError::InvalidCastling { char: c }),
            }
        }

        let en_passant = if fields[3] == "-" {
            None
        } else {
            let chars: Vec<char> = fields[3].chars().collect();
            if chars.len() == 2
                && ('a'..='h').contains(&chars[0])
                && ('1'..='8').contains(&chars[1])
            {
                Some(Square::new(rank_to_index(chars[1]), file_to_index(chars[0])))
            } else {
                return Err(FenError::InvalidEnPassant {
                    found: fields[3].to_string(),
                });
            }
        };

        if fields.len() >= 5 {
            board.halfmove_clock = fields[4].parse().unwrap_or(0);
        }
        if fields.len() >= 6 {
            board.fullmove_counter = fields[5].parse().unwrap_or(1);
        }

        // The ply-0 history entry carries the parsed en-passant square and
        // rights snapshot, so undoing the first applied move restores them.
        board.history.push(UndoInfo {
            captured: None,
            en_passant,
            castling_rights: board.castling_rights,
            halfmove_clock: board.halfmove_clock,
            fullmove_counter: board.fullmove_counter,
            hash: 0,
        });
        board.hash = board.calculate_hash();
        board.history[0].hash = board.hash;

        Ok(board)
    }

    /// Parse a position from FEN notation.
    ///
    /// # Panics
    /// Panics if the FEN string is invalid. Use `try_from_fen` for fallible
    /// parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        Self::try_from_fen(fen).expect("Invalid FEN string")
    }

    /// Emit the position in FEN notation (all six fields).
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::new();
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                if let Some(piece) = self.mailbox[Square::new(rank, file).index()] {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.kind.to_fen_char(piece.color));
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = if self.side_to_move == Color::White {
            "w"
        } else {
            "b"
        };
        let mut castling = String::new();
        if self.castling_rights & CASTLE_WHITE_K != 0 {
            castling.push('K');
        }
        if self.castling_rights & CASTLE_WHITE_Q != 0 {
            castling.push('Q');
        }
        if self.castling_rights & CASTLE_BLACK_K != 0 {
            castling.push('k');
        }
        if self.castling_rights & CASTLE_BLACK_Q != 0 {
            castling.push('q');
        }
        if castling.is_empty() {
            castling.push('-');
        }
        let ep = self
            .en_passant_square()
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            active,
            castling,
            ep,
            self.halfmove_clock,
            self.fullmove_counter
        )
    }

    /// Parse a move in UCI long algebraic notation (e.g. "e2e4", "e7e8q")
    /// against this position's legal moves.
    pub fn parse_uci_move(&mut self, uci: &str) -> Result<Move, MoveParseError> {
        if uci.len() < 4 || uci.len() > 5 {
            return Err(MoveParseError::InvalidLength { len: uci.len() });
        }

        let chars: Vec<char> = uci.chars().collect();
        if !('a'..='h').contains(&chars[0])
            || !('1'..='8').contains(&chars[1])
            || !('a'..='h').contains(&chars[2])
            || !('1'..='8').contains(&chars[3])
        {
            return Err(MoveParseError::InvalidSquare {
                notation: uci.to_string(),
            });
        }

        let from = Square::new(rank_to_index(chars[1]), file_to_index(chars[0]));
        let to = Square::new(rank_to_index(chars[3]), file_to_index(chars[2]));

        let promotion = if uci.len() == 5 {
            let kind = PieceType::from_char(chars[4])
                .ok_or(MoveParseError::InvalidPromotion { char: chars[4] })?;
            if matches!(kind, PieceType::Pawn | PieceType::King) {
                return Err(MoveParseError::InvalidPromotion { char: chars[4] });
            }
            Some(kind)
        } else {
            None
        };

        for &m in &self.legal_moves() {
            if m.from() == from && m.to() == to && m.promotion() == promotion {
                return Ok(m);
            }
        }

        Err(MoveParseError::IllegalMove {
            notation: uci.to_string(),
        })
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_from_fen(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::START_FEN;

    #[test]
    fn test_fen_round_trip_start_position() {
        let board = Board::try_from_fen(START_FEN).unwrap();
        assert_eq!(board.to_fen(), START_FEN);
    }

    #[test]
    fn test_fen_round_trip_with_en_passant() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let board = Board::try_from_fen(fen).unwrap();
        assert_eq!(board.side_to_move(), Color::Black);
        assert_eq!(board.en_passant_square(), Some(Square::new(2, 4)));
        assert_eq!(board.to_fen(), fen);
    }

    #[test]
    fn test_fen_clock_fields() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 42 30");
        assert_eq!(board.halfmove_clock(), 42);
        assert_eq!(board.fullmove_counter(), 30);
        assert_eq!(board.to_fen(), "4k3/8/8/8/8/8/8/4K2R w K - 42 30");
    }

    #[test]
    fn test_fen_defaults_when_clocks_missing() {
        let board = Board::try_from_fen("4k3/8/8/8/8/8/8/4K3 w - -").unwrap();
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.fullmove_counter(), 1);
    }

    #[test]
    fn test_fen_error_too_few_fields() {
        let result = Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w");
        assert!(matches!(result, Err(FenError::TooFewFields { .. })));
    }

    #[test]
    fn test_fen_error_invalid_piece() {
        let result =
            Board::try_from_fen("rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidPiece { .. })));
    }

    #[test]
    fn test_fen_error_invalid_side_to_move() {
        let result =
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidSideToMove { .. })));
    }

    #[test]
    fn test_fen_error_invalid_castling() {
        let result =
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w XQkq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidCastling { .. })));
    }

    #[test]
    fn test_fen_error_invalid_en_passant() {
        let result =
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1");
        assert!(matches!(result, Err(FenError::InvalidEnPassant { .. })));
    }

    #[test]
    fn test_fen_error_missing_king() {
        let result = Board::try_from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1");
        assert!(matches!(result, Err(FenError::BadKingCount { .. })));
    }

    #[test]
    fn test_fen_partial_castling() {
        let board =
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w Kq - 0 1").unwrap();
        assert!(board.castling_rights & CASTLE_WHITE_K != 0);
        assert!(board.castling_rights & CASTLE_WHITE_Q == 0);
        assert!(board.castling_rights & CASTLE_BLACK_K == 0);
        assert!(board.castling_rights & CASTLE_BLACK_Q != 0);
    }

    #[test]
    fn test_parse_uci_move_e2e4() {
        let mut board = Board::new();
        let mv = board.parse_uci_move("e2e4").unwrap();
        assert_eq!(mv.from(), Square::new(1, 4));
        assert_eq!(mv.to(), Square::new(3, 4));
        assert_eq!(mv.to_string(), "e2e4");
    }

    #[test]
    fn test_parse_uci_move_promotion() {
        let mut board = Board::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        let mv = board.parse_uci_move("a7a8q").unwrap();
        assert_eq!(mv.promotion(), Some(PieceType::Queen));
    }

    #[test]
    fn test_parse_uci_move_errors() {
        let mut board = Board::new();
        assert!(matches!(
            board.parse_uci_move("e2"),
            Err(MoveParseError::InvalidLength { .. })
        ));
        assert!(matches!(
            board.parse_uci_move("z9z9"),
            Err(MoveParseError::InvalidSquare { .. })
        ));
        assert!(matches!(
            board.parse_uci_move("e2e5"),
            Err(MoveParseError::IllegalMove { .. })
        ));

        let mut promo_board = Board::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        assert!(matches!(
            promo_board.parse_uci_move("a7a8p"),
            Err(MoveParseError::InvalidPromotion { .. })
        ));
    }

    #[test]
    fn test_uci_round_trip_all_legal_moves() {
        let mut board =
            Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        let moves = board.legal_moves();
        for &m in &moves {
            let parsed = board.parse_uci_move(&m.to_string()).unwrap();
            assert_eq!(parsed, m);
        }
    }

    #[test]
    fn test_from_str_trait() {
        let board: Board = START_FEN.parse().unwrap();
        assert_eq!(board.side_to_move(), Color::White);
    }

    #[test]
    fn test_display_renders_start_position() {
        let rendered = Board::new().to_string();
        assert!(rendered.starts_with("8 r n b q k b n r"));
        assert!(rendered.contains("1 R N B Q K B N R"));
        assert!(rendered.ends_with("a b c d e f g h"));
    }
}
