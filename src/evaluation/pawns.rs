//! Pawn-structure cache and the pawns-and-kings endgame evaluator.
//!
//! Pawn structure changes far less often than the rest of the position, so
//! its evaluation is cached in a direct-mapped table keyed on a pawn-only
//! zobrist sub-hash. Entries are overwritten on collision and never
//! invalidated. The cache belongs to whoever evaluates (one per searcher);
//! it is not shared between threads.

use crate::attacks;
use crate::bitboard::BitBoard;
use crate::board::{Board, Color, Direction, File, Rank, Square};
use crate::evaluation::params;
use crate::evaluation::score::{Score, Value};
use crate::search::zobrist;

const TABLE_SIZE: usize = 4096;
const TABLE_MASK: u64 = (TABLE_SIZE - 1) as u64;

/// Cached facts about one pawn structure.
#[derive(Clone, Copy)]
pub struct PawnHashEntry {
    pub key: u64,
    pub pawns: [BitBoard; 2],
    /// Passed pawns of both sides.
    pub passed: BitBoard,
    /// Structure terms only; pawn piece-square values stay in the board's
    /// incremental score.
    pub pawn_evaluation: [Score; 2],
    /// Absolute rank of the most advanced own pawn per file, with guard
    /// columns at index 0 and 9. Sentinel is the side's home rank.
    pub most_advanced: [[u8; 10]; 2],
}

impl PawnHashEntry {
    fn empty() -> PawnHashEntry {
        PawnHashEntry {
            // Never matches a real pawn hash, so first probes always scan.
            key: u64::MAX,
            pawns: [BitBoard::EMPTY; 2],
            passed: BitBoard::EMPTY,
            pawn_evaluation: [Score::ZERO; 2],
            most_advanced: [[0; 10]; 2],
        }
    }
}

/// Direct-mapped pawn cache with overwrite-on-collision.
pub struct PawnTable {
    entries: Box<[PawnHashEntry]>,
}

impl Default for PawnTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PawnTable {
    pub fn new() -> PawnTable {
        PawnTable {
            entries: vec![PawnHashEntry::empty(); TABLE_SIZE].into_boxed_slice(),
        }
    }

    /// Returns the entry for the board's pawn structure, scanning it fresh
    /// on a miss.
    pub fn probe(&mut self, board: &Board) -> &PawnHashEntry {
        let key = zobrist::pawn_hash(board);
        let index = (key & TABLE_MASK) as usize;
        if self.entries[index].key != key {
            self.entries[index] = scan(board, key);
        }
        &self.entries[index]
    }
}

/// The side's home rank, doubling as the "no pawn on this file" sentinel.
#[inline]
fn sentinel_rank(side: Color) -> u8 {
    match side {
        Color::White => 0,
        Color::Black => 7,
    }
}

/// Squares attacked by any pawn of the set.
#[inline]
pub fn pawn_attacked_squares(pawns: BitBoard, side: Color) -> BitBoard {
    match side {
        Color::White => pawns.shift(Direction::NorthWest) | pawns.shift(Direction::NorthEast),
        Color::Black => pawns.shift(Direction::SouthWest) | pawns.shift(Direction::SouthEast),
    }
}

/// Ranks level with or behind `rank` from `side`'s point of view.
#[inline]
fn behind_or_equal(side: Color, rank: Rank) -> BitBoard {
    let r = rank.index();
    match side {
        Color::White => BitBoard((1u64 << ((r + 1) * 8)) - 1),
        Color::Black => BitBoard(!((1u64 << (r * 8)) - 1)),
    }
}

fn scan(board: &Board, key: u64) -> PawnHashEntry {
    let mut entry = PawnHashEntry {
        key,
        pawns: [board.pawns(Color::White), board.pawns(Color::Black)],
        passed: BitBoard::EMPTY,
        pawn_evaluation: [Score::ZERO; 2],
        most_advanced: [[0; 10]; 2],
    };
    let t = attacks::tables();

    for side in [Color::White, Color::Black] {
        let them = side.opposite();
        let our_pawns = entry.pawns[side.index()];
        let enemy_pawns = entry.pawns[them.index()];
        let enemy_attacks = pawn_attacked_squares(enemy_pawns, them);
        let mut eval = Score::ZERO;

        // Most advanced own pawn per file, sentinel on empty files and the
        // guard columns.
        let sentinel = sentinel_rank(side);
        entry.most_advanced[side.index()] = [sentinel; 10];
        for file in 0..8u8 {
            let on_file = our_pawns & BitBoard::from_file(File::from_index(file));
            if on_file.any() {
                let front = match side {
                    Color::White => on_file.msb(),
                    Color::Black => on_file.lsb(),
                };
                entry.most_advanced[side.index()][file as usize + 1] = front.rank().index() as u8;
            }

            // Extra pawns stacked on one file.
            let stacked = on_file.popcount() as i32;
            if stacked > 1 {
                eval += params::DOUBLE_PAWN * (stacked - 1);
            }
        }

        // Pawn islands.
        let mut islands = 0usize;
        let mut in_island = false;
        for file in 0..8u8 {
            let occupied = (our_pawns & BitBoard::from_file(File::from_index(file))).any();
            if occupied && !in_island {
                islands += 1;
            }
            in_island = occupied;
        }
        eval += params::PAWN_ISLANDS[islands.min(4)];

        // Distortion between neighbouring files that both hold pawns.
        let ma = &entry.most_advanced[side.index()];
        for file in 1..8usize {
            if ma[file] != sentinel && ma[file + 1] != sentinel {
                let gap = (ma[file] as i32 - ma[file + 1] as i32).abs();
                eval += params::PAWN_DISTORTION * gap;
            }
        }

        for sq in our_pawns.squares() {
            let rel_rank = Rank::relative(side, sq.rank()).index();

            // Passed: nothing hostile ahead on this or the adjacent files.
            let front = t.direction_bits(sq, side.up());
            let span = front | front.shift(Direction::East) | front.shift(Direction::West);
            if (enemy_pawns & span).is_empty() {
                entry.passed.set(sq);
                eval += params::PASSED_PAWN[rel_rank];
            }

            // Defended by an own pawn.
            if (t.pawn_attacks(them, sq) & our_pawns).any() {
                eval += params::DEFENDED_PAWN[rel_rank];
            }

            let neighbours = t.adjacent_files(sq.file()) & our_pawns;
            if neighbours.is_empty() {
                eval += params::ISOLATED_PAWN;
            } else if (neighbours & behind_or_equal(side, sq.rank())).is_empty()
                && enemy_attacks.test(sq.shifted(side.up()))
            {
                // No support from behind and the stop square is covered.
                eval += params::BACKWARD_PAWN;
            }
        }

        entry.pawn_evaluation[side.index()] = eval;
    }

    entry
}

/// Evaluation for positions where both sides have only kings and pawns,
/// from the side to move's point of view.
pub fn eval_pawn_endgame(board: &Board, table: &mut PawnTable) -> Value {
    let entry = *table.probe(board);
    let diff = eval_side(board, &entry, Color::White) - eval_side(board, &entry, Color::Black);
    let signed = match board.side() {
        Color::White => diff,
        Color::Black => -diff,
    };
    signed + params::TEMPO_SCORE.endgame()
}

fn eval_side(board: &Board, entry: &PawnHashEntry, side: Color) -> Value {
    let them = side.opposite();
    let our_king = board.king_sq(side);
    let enemy_king = board.king_sq(them);

    let mut result = board.score(side).endgame() + entry.pawn_evaluation[side.index()].endgame();

    for sq in entry.pawns[side.index()].squares() {
        if entry.passed.test(sq) {
            // Rule of the square: an uncatchable passer is nearly a queen.
            let promotion = Square::make(sq.file(), Rank::relative(side, Rank::R8));
            let enemy_to_move = (board.side() != side) as i32;
            let pawn_dist = (Square::distance(sq, promotion) as i32).min(5);
            if pawn_dist < Square::distance(enemy_king, promotion) as i32 - enemy_to_move {
                result += params::SQUARE_RULE_PASSED;
            }

            result += params::KING_PASSED_TROPISM * Square::manhattan_closeness(our_king, sq);
            result -= params::KING_PASSED_TROPISM * Square::manhattan_closeness(enemy_king, sq);
        } else {
            result += params::KING_PAWN_TROPISM * Square::manhattan_closeness(our_king, sq);
            result -= params::KING_PAWN_TROPISM * Square::manhattan_closeness(enemy_king, sq);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init;

    fn entry_for(fen: &str) -> (Board, PawnHashEntry) {
        init();
        let board = Board::from_fen(fen).unwrap();
        let mut table = PawnTable::new();
        let entry = *table.probe(&board);
        (board, entry)
    }

    #[test]
    fn test_probe_caches_by_key() {
        init();
        let board = Board::start_position();
        let mut table = PawnTable::new();
        let key = table.probe(&board).key;
        assert_eq!(key, zobrist::pawn_hash(&board));
        // Second probe hits the same entry.
        assert_eq!(table.probe(&board).key, key);
    }

    #[test]
    fn test_passed_pawn_detection() {
        let (_, entry) = entry_for("4k3/8/8/3P4/8/8/6p1/4K3 w - - 0 1");
        assert!(entry.passed.test(Square::D5));
        assert!(entry.passed.test(crate::board::parse_square("g2").unwrap()));

        // A pawn facing an enemy pawn on an adjacent file ahead is not passed.
        let (_, entry) = entry_for("4k3/4p3/8/3P4/8/8/8/4K3 w - - 0 1");
        assert!(!entry.passed.test(Square::D5));
    }

    #[test]
    fn test_most_advanced_ranks() {
        let (_, entry) = entry_for("4k3/8/8/3P4/8/8/P7/4K3 w - - 0 1");
        let white = &entry.most_advanced[Color::White.index()];
        assert_eq!(white[1], 1); // a2
        assert_eq!(white[4], 4); // d5
        assert_eq!(white[2], 0); // empty b-file carries the sentinel
        let black = &entry.most_advanced[Color::Black.index()];
        assert_eq!(black[5], 7); // no black pawns at all
    }

    #[test]
    fn test_isolated_and_doubled_penalties() {
        // Tripled isolated a-pawns versus a clean structure.
        let (_, messy) = entry_for("4k3/8/8/8/P7/P7/P7/4K3 w - - 0 1");
        let (_, clean) = entry_for("4k3/8/8/8/8/8/PPP5/4K3 w - - 0 1");
        let messy_eval = messy.pawn_evaluation[Color::White.index()];
        let clean_eval = clean.pawn_evaluation[Color::White.index()];
        assert!(messy_eval.eg < clean_eval.eg);
        assert!(messy_eval.mg < clean_eval.mg);
    }

    #[test]
    fn test_pawn_endgame_prefers_advanced_passer() {
        init();
        let mut table = PawnTable::new();
        let far = Board::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        let near = Board::from_fen("4k3/8/4P3/8/8/8/8/4K3 w - - 0 1").unwrap();
        let far_eval = eval_pawn_endgame(&far, &mut table);
        let near_eval = eval_pawn_endgame(&near, &mut table);
        assert!(near_eval > far_eval);
    }

    #[test]
    fn test_square_rule_triggers() {
        init();
        let mut table = PawnTable::new();
        // The black king is hopelessly far from the a-pawn's corner.
        let winning = Board::from_fen("7k/8/8/P7/8/8/8/K7 w - - 0 1").unwrap();
        let v = eval_pawn_endgame(&winning, &mut table);
        assert!(v > params::SQUARE_RULE_PASSED / 2);
    }
}
