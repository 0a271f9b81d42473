//! Negamax core and the iterative-deepening driver.

use log::debug;

use crate::tt::TtFlag;

use super::super::Board;
use super::{
    SearchContext, SearchResult, SearchState, MATE_SCORE, MAX_PLY, NULL_MOVE_REDUCTION,
    SCORE_INFINITE,
};

/// Search `board` to the given depth and return the best move, its score
/// (centipawns, side-to-move perspective) and the node count.
///
/// The transposition table inside `state` is reused across calls; killers,
/// history and the path-hash stack are reset here. `noise` perturbs leaf
/// evaluations (see [`Board::evaluate`]).
pub fn search(board: &mut Board, state: &mut SearchState, depth: u32, noise: i32) -> SearchResult {
    let mut root_moves = board.legal_moves();
    if root_moves.is_empty() {
        let score = if board.in_check(board.side_to_move()) {
            -MATE_SCORE
        } else {
            0
        };
        return SearchResult {
            best_move: None,
            score,
            nodes: 0,
        };
    }

    state.new_search(board.hash());
    let mut ctx = SearchContext {
        board,
        state,
        noise,
    };

    let mut result = SearchResult {
        best_move: None,
        score: -SCORE_INFINITE,
        nodes: 0,
    };

    for d in 1..=depth as i32 {
        ctx.state.nodes = 0;

        let mut alpha = -SCORE_INFINITE;
        let beta = SCORE_INFINITE;
        let mut best_score = -SCORE_INFINITE;
        let mut best_move = root_moves.as_slice()[0];

        // Reorder the root moves around the previous iteration's choice.
        let root_hash = ctx.board.hash();
        let (hash_move, _) = ctx.state.tt.probe(root_hash, 0, alpha, beta, 0);
        ctx.order_moves(&mut root_moves, hash_move, 0);

        for i in 0..root_moves.len() {
            let m = root_moves.as_slice()[i];
            ctx.board.make_move(m);
            let score = if i == 0 {
                -ctx.negamax(d - 1, -beta, -alpha, 1, false)
            } else {
                let mut s = -ctx.negamax(d - 1, -alpha - 1, -alpha, 1, false);
                if s > alpha && s < beta {
                    s = -ctx.negamax(d - 1, -beta, -alpha, 1, false);
                }
                s
            };
            ctx.board.undo_move(m);

            if score > best_score {
                best_score = score;
                best_move = m;
            }
            if score > alpha {
                alpha = score;
            }
        }

        ctx.state
            .tt
            .store(root_hash, best_score, d, best_move, TtFlag::Exact, 0);

        result.best_move = Some(best_move);
        result.score = best_score;
        result.nodes += ctx.state.nodes;

        debug!(
            "depth {d}: best {best_move} score {best_score} nodes {}",
            ctx.state.nodes
        );
    }

    result
}

impl SearchContext<'_> {
    #[allow(clippy::too_many_lines)]
    pub(super) fn negamax(
        &mut self,
        depth: i32,
        mut alpha: i32,
        beta: i32,
        ply: usize,
        no_null: bool,
    ) -> i32 {
        let us = self.board.side_to_move();
        let in_check = self.board.in_check(us);

        let mut depth = depth;
        if depth <= 0 {
            if !in_check {
                return self.quiesce(alpha, beta);
            }
            // Check extension: never drop into quiescence while in check.
            depth = 1;
        }
        if ply >= MAX_PLY {
            return self.board.evaluate(self.noise);
        }

        self.state.nodes += 1;
        let is_pv = beta - alpha > 1;

        // Repetition along the current search path. Stride 2 keeps the side
        // to move equal; any earlier occurrence of this hash scores a draw.
        let hash = self.board.hash();
        let mut back = ply as isize - 2;
        while back >= 0 {
            if self.state.path_hashes[back as usize] == hash {
                return 0;
            }
            back -= 2;
        }
        self.state.path_hashes[ply] = hash;

        if self.board.halfmove_clock() >= 100 || self.board.insufficient_material() {
            return 0;
        }

        let (hash_move, tt_score) = self.state.tt.probe(hash, depth, alpha, beta, ply);
        if let Some(score) = tt_score {
            return score;
        }

        // Null-move pruning: hand the opponent a free move and see whether
        // the position still beats beta on a reduced search. Unsound in
        // check, in PV nodes, and without non-pawn material (zugzwang).
        if !in_check && depth >= 3 && !is_pv && !no_null && self.board.has_non_pawn_material(us) {
            self.board.make_null_move();
            let score = -self.negamax(
                depth - 1 - NULL_MOVE_REDUCTION,
                -beta,
                -beta + 1,
                ply + 1,
                true,
            );
            self.board.undo_null_move();
            if score >= beta {
                return beta;
            }
        }

        let mut moves = self.board.legal_moves();
        if moves.is_empty() {
            return if in_check { -MATE_SCORE + ply as i32 } else { 0 };
        }

        self.order_moves(&mut moves, hash_move, ply);

        let mut best_score = -SCORE_INFINITE;
        let mut best_move = moves.as_slice()[0];
        let mut flag = TtFlag::Alpha;

        for i in 0..moves.len() {
            let m = moves.as_slice()[i];
            let is_capture = m.is_capture();
            let is_killer = ply < MAX_PLY
                && (m == self.state.killers.primary(ply)
                    || m == self.state.killers.secondary(ply));

            self.board.make_move(m);
            // Checking moves get full depth; probe after make while the
            // opponent is the side to move.
            let gives_check = self.board.in_check(self.board.side_to_move());

            // Late-move reductions: late, quiet, non-tactical moves are
            // searched shallower first and re-searched only on promise.
            let reduction = if i >= 3
                && depth >= 3
                && !in_check
                && !is_capture
                && !is_killer
                && !gives_check
            {
                if i >= 6 {
                    2
                } else {
                    1
                }
            } else {
                0
            };

            let score = if i == 0 {
                -self.negamax(depth - 1, -beta, -alpha, ply + 1, false)
            } else {
                let mut s = -self.negamax(depth - 1 - reduction, -alpha - 1, -alpha, ply + 1, false);
                if reduction > 0 && s > alpha {
                    s = -self.negamax(depth - 1, -alpha - 1, -alpha, ply + 1, false);
                }
                if s > alpha && s < beta {
                    s = -self.negamax(depth - 1, -beta, -alpha, ply + 1, false);
                }
                s
            };
            self.board.undo_move(m);

            if score > best_score {
                best_score = score;
                best_move = m;
            }
            if score > alpha {
                alpha = score;
                flag = TtFlag::Exact;
            }
            if alpha >= beta {
                flag = TtFlag::Beta;
                if !is_capture && ply < MAX_PLY {
                    self.state.killers.update(ply, m);
                    self.state.history.bump(us, m, depth);
                }
                break;
            }
        }

        self.state
            .tt
            .store(hash, best_score, depth, best_move, flag, ply);

        best_score
    }
}
