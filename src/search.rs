//! Iterative-deepening alpha-beta search with quiescence.
//!
//! The search is single-threaded; the only cross-thread traffic is the
//! global stop flag, which an I/O thread raises through `stop_searching`
//! and the search polls every 512 nodes and between root iterations. On a
//! stop the current depth's partial result is discarded in favour of the
//! last completed iteration.

use crate::board::Board;
use crate::evaluation::{evaluate, params, PawnTable, Value};
use crate::moves::{GenMode, Move, MoveKind, MoveList};
use std::sync::atomic::{AtomicBool, Ordering};

pub mod limits;
mod ordering;
mod see;
pub mod zobrist;

pub use limits::Limits;
pub use see::static_exchange_eval;

pub type Depth = i32;

pub const MAX_DEPTH: Depth = 99;
pub const INF: Value = 31_000;
pub const MATE: Value = 30_000;

/// Margin added to the captured value in quiescence delta pruning.
const DELTA_PRUNING_MARGIN: Value = 200;

/// Quiet checking moves are added to quiescence only this deep.
const QUIET_CHECK_PLIES: usize = 2;

/// Per-ply buffer count: full-width plies plus the quiescence tail.
const PLY_BUFFERS: usize = (2 * MAX_DEPTH + 2) as usize;

/// The one cross-thread flag. A release store from `stop_searching`, an
/// acquire load at every poll point; nothing stronger is needed.
static MUST_STOP: AtomicBool = AtomicBool::new(false);

/// Stops the running search at its next poll point. Safe to call from any
/// thread, any number of times.
pub fn stop_searching() {
    MUST_STOP.store(true, Ordering::Release);
}

#[inline(always)]
fn must_stop() -> bool {
    MUST_STOP.load(Ordering::Acquire)
}

/// Scores close enough to `MATE` to encode a forced mate distance.
#[inline(always)]
pub const fn is_mate_value(value: Value) -> bool {
    value > MATE - MAX_DEPTH * 2 || value < MAX_DEPTH * 2 - MATE
}

/// Full moves until the side to move delivers mate.
#[inline(always)]
pub const fn giving_mate_in(value: Value) -> Depth {
    (MATE + 2 - value) / 2
}

/// Full moves until the side to move is mated.
#[inline(always)]
pub const fn getting_mated_in(value: Value) -> Depth {
    (value + MATE + 1) / 2
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NodeType {
    Pv,
    NonPv,
}

/// Where completed-iteration info lines go, protocol-wise.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InfoMode {
    Uci,
    Xboard,
}

#[derive(Clone, Copy, Debug)]
pub struct SearchResult {
    pub best: Move,
    pub value: Value,
}

/// One search context: limits, node counter, per-ply move buffers, the
/// principal variation lines and the pawn cache. Not shared between
/// concurrent searches.
pub struct Searcher {
    pub limits: Limits,
    /// Emit an info line after each completed iteration.
    pub post: bool,
    pub info_mode: InfoMode,
    nodes: u64,
    move_lists: Vec<MoveList>,
    pvs: Vec<Vec<Move>>,
    pawn_table: PawnTable,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Searcher {
    pub fn new() -> Searcher {
        Searcher {
            limits: Limits::new(),
            post: false,
            info_mode: InfoMode::Uci,
            nodes: 0,
            move_lists: vec![MoveList::new(); PLY_BUFFERS],
            pvs: vec![Vec::new(); PLY_BUFFERS],
            pawn_table: PawnTable::new(),
        }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Static evaluation of a position through this searcher's pawn cache.
    pub fn eval(&mut self, board: &Board) -> Value {
        evaluate(board, &mut self.pawn_table)
    }

    /// Finds the best move under the current limits. Deepens one ply at a
    /// time; after each depth the root list is resorted by the returned
    /// values so the next pass tries the best line first.
    pub fn root_search(&mut self, board: &mut Board) -> SearchResult {
        MUST_STOP.store(false, Ordering::Release);
        self.nodes = 0;

        let mut moves = MoveList::new();
        board.generate_moves(GenMode::AllMoves, &mut moves);

        let mut last_best = Move::NULL;
        let mut last_result = -INF;
        let mut root_depth: Depth = 0;

        loop {
            root_depth += 1;
            if self.limits.is_depth_limit_broken(root_depth) {
                break;
            }

            let mut best = Move::NULL;
            let mut result = -INF;
            let mut root_pv: Vec<Move> = Vec::new();
            let mut legal = 0u32;

            for i in 0..moves.len() {
                let m = moves[i];
                if !board.is_legal(m) {
                    continue;
                }
                legal += 1;

                board.make_move(m);
                let value = -self.search(board, -INF, -result, root_depth - 1, 0, NodeType::Pv);
                board.unmake_move(m);

                if must_stop() {
                    // Fall back to the last completed iteration; if even the
                    // first never finished, the partial best has to do.
                    return if last_best.is_null() {
                        SearchResult { best, value: result }
                    } else {
                        SearchResult { best: last_best, value: last_result }
                    };
                }

                // Remember the child's returned value for the resort below.
                moves[i].set_ordering(-value as i16);

                if value > result {
                    result = value;
                    best = m;
                    root_pv.clear();
                    root_pv.push(m);
                    root_pv.extend_from_slice(&self.pvs[0]);
                }
            }

            if legal == 0 {
                let value = if board.in_check() { -MATE } else { 0 };
                return SearchResult { best: Move::NULL, value };
            }

            // The natural stopping point: a depth just completed.
            if self.limits.is_soft_limit_broken() {
                return SearchResult { best, value: result };
            }

            if self.post {
                self.print_info(root_depth, result, &root_pv);
            }

            // Ascending child values put our best line first next pass.
            ordering::sort_root_moves(&mut moves);

            last_best = best;
            last_result = result;
        }

        SearchResult { best: last_best, value: last_result }
    }

    fn search(
        &mut self,
        board: &mut Board,
        alpha: Value,
        beta: Value,
        depth: Depth,
        ply: usize,
        node_type: NodeType,
    ) -> Value {
        if must_stop() {
            return alpha;
        }
        if self.nodes & 0x1ff == 0 && self.check_hard_limits() {
            return alpha;
        }
        if node_type == NodeType::Pv {
            self.pvs[ply].clear();
        }
        if ply as Depth > MAX_DEPTH {
            return alpha;
        }

        if board.is_draw(ply as Depth) {
            return 0;
        }
        if depth <= 0 {
            return self.quiescence(board, alpha, beta, ply, 0);
        }

        let mut result = alpha;
        let mut legal = 0u32;

        let mut moves = std::mem::take(&mut self.move_lists[ply]);
        moves.clear();
        board.generate_moves(GenMode::AllMoves, &mut moves);

        for &m in moves.iter() {
            if !board.is_legal(m) {
                continue;
            }
            legal += 1;
            self.nodes += 1;

            board.make_move(m);
            let value = -self.search(board, -beta, -result, depth - 1, ply + 1, node_type);
            board.unmake_move(m);

            if must_stop() {
                self.move_lists[ply] = moves;
                return alpha;
            }

            if value > result {
                result = value;
                if node_type == NodeType::Pv {
                    let tail = self.pvs[ply + 1].clone();
                    let line = &mut self.pvs[ply];
                    line.clear();
                    line.push(m);
                    line.extend(tail);
                }
            }
            if result >= beta {
                break;
            }
        }

        self.move_lists[ply] = moves;

        if legal == 0 {
            return if board.in_check() { -MATE + ply as Value } else { 0 };
        }
        result
    }

    /// Resolves tactical noise at the frontier: stand pat, then captures
    /// (and shallow quiet checks), with delta and exchange pruning. In
    /// check the full evasion set is searched so mates stay exact.
    fn quiescence(
        &mut self,
        board: &mut Board,
        alpha: Value,
        beta: Value,
        ply: usize,
        qply: usize,
    ) -> Value {
        if must_stop() {
            return alpha;
        }
        if self.nodes & 0x1ff == 0 && self.check_hard_limits() {
            return alpha;
        }
        if ply >= PLY_BUFFERS - 1 {
            return alpha;
        }

        let in_check = board.in_check();
        let static_eval = evaluate(board, &mut self.pawn_table);

        let mut result = alpha;
        if !in_check {
            // Standing pat: the side to move may always refuse to capture.
            if static_eval >= beta {
                return static_eval;
            }
            if static_eval > result {
                result = static_eval;
            }
        }

        let mut moves = std::mem::take(&mut self.move_lists[ply]);
        moves.clear();
        if in_check {
            board.generate_moves(GenMode::AllMoves, &mut moves);
        } else {
            board.generate_moves(GenMode::Captures, &mut moves);
            if qply < QUIET_CHECK_PLIES {
                board.generate_moves(GenMode::QuietChecks, &mut moves);
            }
            ordering::sort_captures(board, &mut moves);
        }

        let prune = !in_check && board.by_piece_type(crate::board::PieceType::Pawn).any();
        let mut legal = 0u32;

        for &m in moves.iter() {
            if !board.is_legal(m) {
                continue;
            }

            if prune {
                if m.kind() != MoveKind::Promotion {
                    let captured = if m.kind() == MoveKind::EnPassant {
                        crate::board::PieceType::Pawn
                    } else {
                        board.piece_on(m.to()).piece_type()
                    };
                    // Delta: even winning this piece outright cannot lift
                    // alpha, unless the move checks.
                    if static_eval + params::simplified_value(captured) + DELTA_PRUNING_MARGIN
                        <= result
                        && !board.gives_direct_check(m)
                    {
                        continue;
                    }
                }
                if static_exchange_eval(board, m) < 0 {
                    continue;
                }
            }

            legal += 1;
            self.nodes += 1;

            board.make_move(m);
            let value = -self.quiescence(board, -beta, -result, ply + 1, qply + 1);
            board.unmake_move(m);

            if must_stop() {
                self.move_lists[ply] = moves;
                return result;
            }

            if value > result {
                result = value;
            }
            if result >= beta {
                break;
            }
        }

        self.move_lists[ply] = moves;

        if in_check && legal == 0 {
            return -MATE + ply as Value;
        }
        result
    }

    fn check_hard_limits(&mut self) -> bool {
        if self.limits.is_hard_limit_broken() || self.limits.is_nodes_limit_broken(self.nodes) {
            MUST_STOP.store(true, Ordering::Release);
            return true;
        }
        false
    }

    fn print_info(&self, depth: Depth, value: Value, pv: &[Move]) {
        let pv_line = pv
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(" ");

        match self.info_mode {
            InfoMode::Uci => {
                let score = if is_mate_value(value) {
                    let mate = if value < 0 {
                        -getting_mated_in(value)
                    } else {
                        giving_mate_in(value)
                    };
                    format!("mate {}", mate)
                } else {
                    format!("cp {}", value)
                };
                println!(
                    "info depth {} nodes {} time {} score {} pv {}",
                    depth,
                    self.nodes,
                    self.limits.elapsed_milliseconds(),
                    score,
                    pv_line
                );
            }
            InfoMode::Xboard => {
                println!(
                    "{} {} {} {} {}",
                    depth,
                    value,
                    self.limits.elapsed_centiseconds(),
                    self.nodes,
                    pv_line
                );
            }
        }
    }
}

/// Counts leaf nodes of the legal move tree to the given depth; the
/// classic move generator correctness and throughput test.
pub fn perft(board: &mut Board, depth: Depth) -> u64 {
    let mut moves = MoveList::new();
    board.generate_moves(GenMode::AllMoves, &mut moves);

    let mut nodes = 0;
    for &m in moves.iter() {
        if !board.is_legal(m) {
            continue;
        }
        if depth <= 1 {
            nodes += 1;
        } else {
            board.make_move(m);
            nodes += perft(board, depth - 1);
            board.unmake_move(m);
        }
    }
    nodes
}

/// Convenience wrapper matching the external contract.
pub fn root_search(board: &mut Board, searcher: &mut Searcher) -> SearchResult {
    searcher.root_search(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init;

    fn search_depth(fen: &str, depth: Depth) -> SearchResult {
        init();
        let mut board = Board::from_fen(fen).unwrap();
        let mut searcher = Searcher::new();
        searcher.limits.set_depth_limit(depth);
        searcher.root_search(&mut board)
    }

    #[test]
    fn test_mate_value_helpers() {
        assert!(is_mate_value(MATE));
        assert!(is_mate_value(-MATE + 5));
        assert!(!is_mate_value(0));
        assert!(!is_mate_value(params::SURE_WIN));
        assert_eq!(giving_mate_in(MATE), 1);
        assert_eq!(giving_mate_in(MATE - 2), 2);
        assert_eq!(getting_mated_in(-MATE + 1), 1);
    }

    #[test]
    fn test_mate_in_one_found_at_depth_one() {
        // Back-rank mate: Ra8#.
        let result = search_depth("6k1/5ppp/8/8/8/8/8/R3K3 w - - 0 1", 1);
        assert_eq!(result.best.to_string(), "a1a8");
        assert!(result.value >= MATE - 2);
    }

    #[test]
    fn test_mate_in_two_found_at_depth_three() {
        // 1.Kb6 boxes the king in, 2.Rh8# follows whatever black plays.
        let result = search_depth("k7/8/2K5/8/8/8/8/7R w - - 0 1", 3);
        assert!(is_mate_value(result.value), "got {}", result.value);
        assert!(result.value > 0);
        assert_eq!(giving_mate_in(result.value), 2);
    }

    #[test]
    fn test_single_legal_move_is_returned() {
        // The king in the corner has exactly one square.
        let fen = "k7/7R/2R5/8/8/8/8/4K3 b - - 0 1";
        init();
        let mut board = Board::from_fen(fen).unwrap();
        let mut moves = crate::moves::MoveList::new();
        board.generate_moves(GenMode::AllMoves, &mut moves);
        let legal: Vec<Move> = moves.iter().copied().filter(|&m| board.is_legal(m)).collect();
        assert_eq!(legal.len(), 1);

        let result = search_depth(fen, 2);
        assert_eq!(result.best, legal[0]);
    }

    #[test]
    fn test_mated_side_reports_mate_score() {
        // Checkmated already: no legal moves, in check.
        let result = search_depth("R5k1/5ppp/8/8/8/8/8/4K3 b - - 0 1", 3);
        assert!(result.best.is_null());
        assert_eq!(result.value, -MATE);
    }

    #[test]
    fn test_stalemate_scores_zero() {
        let result = search_depth("7k/5K2/6Q1/8/8/8/8/8 b - - 0 1", 3);
        assert!(result.best.is_null());
        assert_eq!(result.value, 0);
    }

    #[test]
    fn test_stop_flag_is_idempotent_and_reset_by_root() {
        init();
        stop_searching();
        stop_searching();
        // A fresh root search clears the flag and runs to its depth limit.
        let mut board = Board::start_position();
        let mut searcher = Searcher::new();
        searcher.limits.set_depth_limit(2);
        let result = searcher.root_search(&mut board);
        assert!(!result.best.is_null());
    }

    #[test]
    fn test_node_limit_stops_search() {
        init();
        let mut board = Board::start_position();
        let mut searcher = Searcher::new();
        searcher.limits.set_nodes_limit(2_000);
        searcher.limits.set_depth_limit(50);
        let result = searcher.root_search(&mut board);
        // Stopped long before depth 50, with some sensible move.
        assert!(searcher.nodes() < 1_000_000);
        assert!(!result.best.is_null());
    }

    #[test]
    fn test_perft_initial_shallow() {
        init();
        let mut board = Board::start_position();
        assert_eq!(perft(&mut board, 1), 20);
        assert_eq!(perft(&mut board, 2), 400);
        assert_eq!(perft(&mut board, 3), 8_902);
    }
}
