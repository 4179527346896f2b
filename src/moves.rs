//! Move encoding and pseudo-legal move generation.
//!
//! Moves are packed into 32 bits: from/to squares, a kind tag, the
//! promotion piece, and a transient 16-bit ordering value the search uses
//! to resort the root list between iterations. The ordering value is not
//! part of move identity.

use crate::attacks;
use crate::bitboard::BitBoard;
use crate::board::{Board, CastleRights, Color, Direction, Piece, PieceType, Rank, Square};
use smallvec::SmallVec;
use std::fmt;

/// Stack-bound move list; chess positions never exceed 218 moves, so the
/// inline capacity of 256 avoids heap traffic entirely.
pub type MoveList = SmallVec<[Move; 256]>;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveKind {
    Normal = 0,
    Castle = 1,
    EnPassant = 2,
    Promotion = 3,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GenMode {
    /// Every pseudo-legal move.
    AllMoves,
    /// Captures and promotions.
    Captures,
    /// Non-capturing moves that give direct check.
    QuietChecks,
}

/// Layout: bits 0-5 from, 6-11 to, 12-13 kind, 14-15 promotion piece,
/// 16-31 ordering value (as `i16`).
#[derive(Clone, Copy, Eq)]
pub struct Move(u32);

impl Move {
    pub const NULL: Move = Move(0);

    #[inline(always)]
    pub fn new(from: Square, to: Square, kind: MoveKind) -> Move {
        Move((from.index() as u32) | ((to.index() as u32) << 6) | ((kind as u32) << 12))
    }

    #[inline(always)]
    pub fn promotion_move(from: Square, to: Square, promo: PieceType) -> Move {
        debug_assert!(promo >= PieceType::Knight && promo <= PieceType::Queen);
        let promo_bits = promo.index() as u32 - PieceType::Knight.index() as u32;
        Move(
            (from.index() as u32)
                | ((to.index() as u32) << 6)
                | ((MoveKind::Promotion as u32) << 12)
                | (promo_bits << 14),
        )
    }

    #[inline(always)]
    pub fn from(self) -> Square {
        Square::from_index((self.0 & 0x3f) as u8)
    }

    #[inline(always)]
    pub fn to(self) -> Square {
        Square::from_index(((self.0 >> 6) & 0x3f) as u8)
    }

    #[inline(always)]
    pub fn kind(self) -> MoveKind {
        match (self.0 >> 12) & 3 {
            0 => MoveKind::Normal,
            1 => MoveKind::Castle,
            2 => MoveKind::EnPassant,
            _ => MoveKind::Promotion,
        }
    }

    /// The promotion piece; meaningful only for `MoveKind::Promotion`.
    #[inline(always)]
    pub fn promotion(self) -> PieceType {
        PieceType::from_index(((self.0 >> 14) & 3) as u8 + PieceType::Knight.index() as u8)
    }

    #[inline(always)]
    pub fn is_null(self) -> bool {
        self.0 & 0xfff == 0
    }

    /// Search-transient sort key, kept out of move identity.
    #[inline(always)]
    pub fn ordering(self) -> i16 {
        (self.0 >> 16) as u16 as i16
    }

    #[inline(always)]
    pub fn set_ordering(&mut self, value: i16) {
        self.0 = (self.0 & 0xffff) | ((value as u16 as u32) << 16);
    }
}

impl PartialEq for Move {
    #[inline(always)]
    fn eq(&self, other: &Move) -> bool {
        self.0 & 0xffff == other.0 & 0xffff
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "0000");
        }
        write!(f, "{}{}", self.from(), self.to())?;
        if self.kind() == MoveKind::Promotion {
            let ch = match self.promotion() {
                PieceType::Knight => 'n',
                PieceType::Bishop => 'b',
                PieceType::Rook => 'r',
                _ => 'q',
            };
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Appends pseudo-legal moves for the side to move. `is_legal` filters out
/// moves that would expose the own king; everything else generated here
/// respects piece geometry, the mode, and check evasion masking.
pub fn generate_moves(board: &Board, mode: GenMode, out: &mut MoveList) {
    let side = board.side();
    let them = side.opposite();
    let t = attacks::tables();
    let occ = board.all_pieces();
    let ours = board.by_color(side);
    let theirs = board.by_color(them);
    let king = board.king_sq(side);
    let checkers = board.check_givers();

    let king_targets = match mode {
        GenMode::AllMoves => !ours,
        GenMode::Captures => theirs,
        // A king step never gives direct check.
        GenMode::QuietChecks => BitBoard::EMPTY,
    };
    for to in (t.pseudo(PieceType::King, king) & king_targets).squares() {
        out.push(Move::new(king, to, MoveKind::Normal));
    }

    // Under double check only the king may move.
    if checkers.more_than_one() {
        return;
    }

    // With a single checker, non-king moves must capture it or interpose;
    // `between` includes the checker square itself.
    let check_mask = if checkers.any() {
        t.between(king, checkers.lsb())
    } else {
        BitBoard::FULL
    };

    let base_target = match mode {
        GenMode::AllMoves => !ours,
        GenMode::Captures => theirs,
        GenMode::QuietChecks => !occ,
    } & check_mask;

    let enemy_king = board.king_sq(them);
    for pt in [
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
    ] {
        let mut target = base_target;
        if mode == GenMode::QuietChecks {
            target &= t.attacks_of(pt, enemy_king, occ);
        }
        if target.is_empty() {
            continue;
        }
        for from in board.by_piece(Piece::new(side, pt)).squares() {
            let attacks = t.attacks_of(pt, from, occ) & target;
            for to in attacks.squares() {
                out.push(Move::new(from, to, MoveKind::Normal));
            }
        }
    }

    generate_pawn_moves(board, mode, check_mask, out);

    if mode == GenMode::AllMoves && checkers.is_empty() {
        generate_castling(board, out);
    }
}

fn generate_pawn_moves(board: &Board, mode: GenMode, check_mask: BitBoard, out: &mut MoveList) {
    let side = board.side();
    let them = side.opposite();
    let t = attacks::tables();
    let up = side.up();
    let down = side.down();
    let (up_east, up_west) = match side {
        Color::White => (Direction::NorthEast, Direction::NorthWest),
        Color::Black => (Direction::SouthEast, Direction::SouthWest),
    };

    let pawns = board.pawns(side);
    let rank7 = BitBoard::from_rank(Rank::relative(side, Rank::R7));
    let rank3 = BitBoard::from_rank(Rank::relative(side, Rank::R3));
    let empty = !board.all_pieces();
    let theirs = board.by_color(them);
    let movers = pawns & !rank7;
    let promoters = pawns & rank7;

    // Quiet pushes.
    if mode != GenMode::Captures {
        let mut single = movers.shift(up) & empty;
        let mut double = (single & rank3).shift(up) & empty & check_mask;
        single &= check_mask;
        if mode == GenMode::QuietChecks {
            // Only pushes landing on a square from which the pawn checks.
            let pawn_check_squares = t.pawn_attacks(them, board.king_sq(them));
            single &= pawn_check_squares;
            double &= pawn_check_squares;
        }
        for to in single.squares() {
            out.push(Move::new(to.shifted(down), to, MoveKind::Normal));
        }
        for to in double.squares() {
            out.push(Move::new(to.shifted(down).shifted(down), to, MoveKind::Normal));
        }
    }

    if mode == GenMode::QuietChecks {
        return;
    }

    // Plain captures.
    for (dir, back) in [(up_east, up_east.opposite()), (up_west, up_west.opposite())] {
        let targets = movers.shift(dir) & theirs & check_mask;
        for to in targets.squares() {
            out.push(Move::new(to.shifted(back), to, MoveKind::Normal));
        }
    }

    // Promotions, pushed and capturing; all four pieces each.
    if promoters.any() {
        let push = promoters.shift(up) & empty & check_mask;
        for to in push.squares() {
            push_promotions(out, to.shifted(down), to);
        }
        for (dir, back) in [(up_east, up_east.opposite()), (up_west, up_west.opposite())] {
            let targets = promoters.shift(dir) & theirs & check_mask;
            for to in targets.squares() {
                push_promotions(out, to.shifted(back), to);
            }
        }
    }

    // En passant skips the evasion mask: capturing the checking pawn does
    // not land on it, and `is_legal` retests the king exactly.
    let ep = board.ep();
    if !ep.is_none() {
        for from in (t.pawn_attacks(them, ep) & movers).squares() {
            out.push(Move::new(from, ep, MoveKind::EnPassant));
        }
    }
}

#[inline]
fn push_promotions(out: &mut MoveList, from: Square, to: Square) {
    for pt in [
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
    ] {
        out.push(Move::promotion_move(from, to, pt));
    }
}

fn generate_castling(board: &Board, out: &mut MoveList) {
    let side = board.side();
    let them = side.opposite();
    let t = attacks::tables();
    let occ = board.all_pieces();
    let king = board.king_sq(side);

    let back = Rank::relative(side, Rank::R1);
    let castles = [
        (true, CastleRights::king_side(side), 6u8, [5u8, 6u8]),
        (false, CastleRights::queen_side(side), 2u8, [3u8, 2u8]),
    ];

    for (king_side, right, dest_file, crossed) in castles {
        if !board.castle_rights().has(right) {
            continue;
        }
        if (t.castling_interior(side, king_side) & occ).any() {
            continue;
        }
        // Neither square the king crosses may be attacked.
        let attacked = crossed.iter().any(|&file| {
            let sq = Square::make(crate::board::File::from_index(file), back);
            board.attackers_of(them, sq, occ).any()
        });
        if attacked {
            continue;
        }
        let to = Square::make(crate::board::File::from_index(dest_file), back);
        out.push(Move::new(king, to, MoveKind::Castle));
    }
}
