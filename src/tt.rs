//! Transposition table.
//!
//! Fixed-size open-addressed table keyed by Zobrist hash with a single
//! 16-byte entry per slot. Replacement is depth-preferred: an entry only
//! survives a store when it holds the same position at greater depth.
//! Mate scores are stored relative to the probing node (offset by ply) so
//! an entry is valid from any distance to the root.

use std::mem;

use crate::board::Move;

/// Scores beyond this magnitude encode mate-in-N and need ply adjustment.
const MATE_BOUND: i32 = 90_000;

/// Default table size in megabytes (2^20 entries).
pub const DEFAULT_TT_MB: usize = 16;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TtFlag {
    /// Score is exact: the full window was searched.
    Exact,
    /// Upper bound: the node failed low (score <= alpha).
    Alpha,
    /// Lower bound: the node failed high (score >= beta).
    Beta,
}

#[derive(Clone, Copy)]
struct TtEntry {
    key: u64,
    score: i32,
    depth: i8,
    best_move: u16,
    flag: TtFlag,
}

const EMPTY_ENTRY: TtEntry = TtEntry {
    key: 0,
    score: 0,
    depth: -1,
    best_move: 0,
    flag: TtFlag::Exact,
};

pub struct TranspositionTable {
    entries: Vec<TtEntry>,
    mask: usize,
}

impl TranspositionTable {
    /// Create a table of roughly `size_mb` megabytes, rounded down to a
    /// power-of-two entry count.
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let entry_size = mem::size_of::<TtEntry>();
        let bytes = size_mb * 1024 * 1024;
        let mut num_entries = (bytes / entry_size).next_power_of_two();
        if num_entries * entry_size > bytes {
            num_entries /= 2;
        }
        if num_entries == 0 {
            num_entries = 1024;
        }

        TranspositionTable {
            entries: vec![EMPTY_ENTRY; num_entries],
            mask: num_entries - 1,
        }
    }

    fn index(&self, key: u64) -> usize {
        (key as usize) & self.mask
    }

    /// Probe for `key` at the given remaining depth and window.
    ///
    /// Returns the stored best move for ordering whenever the key matches,
    /// and a usable score only when the stored depth suffices and the bound
    /// applies: `Exact` always, `Beta` when `score >= beta`, `Alpha` when
    /// `score <= alpha`.
    pub(crate) fn probe(
        &self,
        key: u64,
        depth: i32,
        alpha: i32,
        beta: i32,
        ply: usize,
    ) -> (Move, Option<i32>) {
        let entry = &self.entries[self.index(key)];
        if entry.key != key {
            return (Move::NULL, None);
        }

        let hash_move = Move::from_raw(entry.best_move);
        if i32::from(entry.depth) < depth {
            return (hash_move, None);
        }

        let mut score = entry.score;
        if score > MATE_BOUND {
            score -= ply as i32;
        } else if score < -MATE_BOUND {
            score += ply as i32;
        }

        let usable = match entry.flag {
            TtFlag::Exact => true,
            TtFlag::Beta => score >= beta,
            TtFlag::Alpha => score <= alpha,
        };

        (hash_move, usable.then_some(score))
    }

    /// Store a search result, keeping deeper entries on same-key collisions.
    pub(crate) fn store(
        &mut self,
        key: u64,
        score: i32,
        depth: i32,
        best_move: Move,
        flag: TtFlag,
        ply: usize,
    ) {
        let mut stored = score;
        if stored > MATE_BOUND {
            stored += ply as i32;
        } else if stored < -MATE_BOUND {
            stored -= ply as i32;
        }

        let idx = self.index(key);
        let entry = &mut self.entries[idx];
        if entry.key != key || depth >= i32::from(entry.depth) {
            *entry = TtEntry {
                key,
                score: stored,
                depth: depth as i8,
                best_move: best_move.raw(),
                flag,
            };
        }
    }
}
