//! Evaluation weights: piece values, piece-square tables and every bonus
//! and penalty the evaluator hands out.
//!
//! The square tables are stored as 8x4 halves (queenside files only) and
//! expanded at startup: mirrored onto the kingside, the piece value folded
//! in, and the white tables produced by flipping ranks.

use crate::bitboard::BitBoard;
use crate::board::{Color, File, Piece, PieceType, Rank, Square};
use crate::evaluation::score::{s, Score, Value};
use once_cell::sync::Lazy;

pub const TEMPO_SCORE: Score = s(15, 3);

///  PAWNS  ///

/// By number of pawn islands; a pawn island is a run of adjacent occupied
/// files.
pub const PAWN_ISLANDS: [Score; 5] = [s(0, 0), s(0, 0), s(-3, -3), s(-21, -16), s(-34, -32)];

/// A pawn defended by another pawn, by relative rank.
pub const DEFENDED_PAWN: [Score; 8] = [
    s(0, 0),
    s(0, 0),
    s(3, 5),
    s(7, 8),
    s(13, 15),
    s(19, 23),
    s(28, 36),
    s(0, 0),
];

pub const ISOLATED_PAWN: Score = s(-7, -5);

/// Pawn that cannot be protected by own pawns and cannot safely advance.
pub const BACKWARD_PAWN: Score = s(-9, -9);

/// Each extra pawn on an own-occupied file.
pub const DOUBLE_PAWN: Score = s(-10, -23);

/// Per rank of gap between most advanced pawns on adjacent files.
pub const PAWN_DISTORTION: Score = s(-1, -2);

/// Passed pawn bonus by relative rank.
pub const PASSED_PAWN: [Score; 8] = [
    s(0, 0),
    s(15, 25),
    s(22, 30),
    s(30, 35),
    s(42, 48),
    s(55, 65),
    s(75, 95),
    s(0, 0),
];

pub const ROOK_BEHIND_PASSED_PAWN: Score = s(12, 28);

/// A passed pawn blocked by an enemy minor piece on its stop square.
pub const MINOR_PASSED_BLOCKED: Score = s(-14, -27);

///  MINOR PIECES  ///

/// Outpost bonus; doubled for knights.
pub const OUTPOST: Score = s(18, 10);

pub const KNIGHT_MOBILITY: [Score; 9] = [
    s(-90, -120),
    s(-35, -60),
    s(-16, -25),
    s(-5, -10),
    s(5, 3),
    s(14, 11),
    s(21, 17),
    s(25, 21),
    s(28, 24),
];

pub const BISHOP_MOBILITY: [Score; 14] = [
    s(-60, -90),
    s(-35, -50),
    s(-20, -25),
    s(-10, -14),
    s(-5, -8),
    s(0, -3),
    s(6, 4),
    s(12, 11),
    s(18, 18),
    s(25, 25),
    s(30, 30),
    s(35, 35),
    s(40, 40),
    s(45, 45),
];

/// Pair of different-colored bishops.
pub const BISHOP_PAIR: Score = s(35, 20);

pub const ROOK_MOBILITY: [Score; 15] = [
    s(-45, -70),
    s(-30, -45),
    s(-18, -24),
    s(-10, -14),
    s(-5, -8),
    s(0, -2),
    s(6, 5),
    s(12, 12),
    s(18, 20),
    s(25, 27),
    s(30, 34),
    s(35, 41),
    s(40, 48),
    s(45, 55),
    s(50, 62),
];

pub const ROOK_ON_OPEN_FILE: Score = s(26, 10);
pub const ROOK_ON_SEMIOPEN_FILE: Score = s(14, 6);

pub const QUEEN_MOBILITY: [Score; 28] = [
    s(-35, -55),
    s(-28, -37),
    s(-22, -26),
    s(-17, -19),
    s(-12, -13),
    s(-8, -8),
    s(-4, -4),
    s(0, 1),
    s(4, 5),
    s(8, 10),
    s(12, 14),
    s(16, 19),
    s(20, 23),
    s(24, 28),
    s(28, 32),
    s(32, 37),
    s(36, 41),
    s(40, 46),
    s(44, 50),
    s(47, 54),
    s(50, 57),
    s(53, 61),
    s(56, 64),
    s(59, 67),
    s(62, 71),
    s(65, 74),
    s(67, 76),
    s(70, 80),
];

///  PAWN ENDGAMES  ///

/// A passed pawn the enemy king can no longer catch.
pub const SQUARE_RULE_PASSED: Value = 200;

/// King-to-passed-pawn closeness factor in pawn endgames.
pub const KING_PASSED_TROPISM: Value = 5;

/// King-to-pawn closeness factor in pawn endgames.
pub const KING_PAWN_TROPISM: Value = 2;

///  BARE-KING ENDGAMES  ///

/// Added to every won KXK evaluation so it dominates normal scores while
/// staying clear of the mate range.
pub const SURE_WIN: Value = 20_000;

/// Drives the defending king toward the board edge and corners.
#[rustfmt::skip]
pub const KING_PUSH_TO_CORNER: [Value; 64] = [
    100, 90, 80, 70, 70, 80, 90, 100,
     90, 60, 50, 40, 40, 50, 60,  90,
     80, 50, 30, 20, 20, 30, 50,  80,
     70, 40, 20, 10, 10, 20, 40,  70,
     70, 40, 20, 10, 10, 20, 40,  70,
     80, 50, 30, 20, 20, 30, 50,  80,
     90, 60, 50, 40, 40, 50, 60,  90,
    100, 90, 80, 70, 70, 80, 90, 100,
];

///  PIECE VALUES  ///

pub const PIECE_VALUE: [Score; PieceType::COUNT] = [
    s(0, 0),
    s(100, 130),
    s(320, 360),
    s(350, 390),
    s(550, 650),
    s(1050, 1150),
    s(0, 0),
];

/// Phase units per piece type: minors 3, rook 5, queen 9. These double as
/// the simplified material the draw rules count.
const PHASE_UNITS: [i32; PieceType::COUNT] = [0, 0, 3, 3, 5, 9, 0];

#[inline(always)]
pub fn phase_units(pt: PieceType) -> i32 {
    PHASE_UNITS[pt.index()]
}

/// One-phase piece value, `(mg + eg) / 2`; used by exchange evaluation and
/// pruning margins.
#[inline(always)]
pub fn simplified_value(pt: PieceType) -> Value {
    let score = PIECE_VALUE[pt.index()];
    (score.middlegame() + score.endgame()) / 2
}

///  PIECE-SQUARE TABLES  ///

// Halves are written from black's point of view: row index is the absolute
// rank, so row 1 is where a black pawn is one step from promoting. White
// reads the table with ranks flipped.
#[rustfmt::skip]
const PAWN_HALF: [[Score; 4]; 8] = [
    [s(0, 0),    s(0, 0),   s(0, 0),   s(0, 0)],
    [s(15, 32),  s(20, 45), s(16, 45), s(25, 45)],
    [s(7, 20),   s(10, 25), s(10, 25), s(18, 25)],
    [s(0, 10),   s(2, 15),  s(6, 15),  s(15, 15)],
    [s(-4, 5),   s(0, 10),  s(4, 10),  s(12, 10)],
    [s(-1, 0),   s(4, 5),   s(-4, 5),  s(0, 5)],
    [s(-6, -5),  s(-3, 0),  s(4, 0),   s(-12, 0)],
    [s(0, 0),    s(0, 0),   s(0, 0),   s(0, 0)],
];

#[rustfmt::skip]
const KNIGHT_HALF: [[Score; 4]; 8] = [
    [s(-65, -40), s(-40, -20), s(-22, -20), s(-15, -15)],
    [s(-45, -30), s(-15, -9),  s(7, 2),     s(10, 5)],
    [s(-20, -14), s(3, 2),     s(15, 10),   s(26, 17)],
    [s(-12, -8),  s(10, 5),    s(24, 15),   s(40, 23)],
    [s(-15, -10), s(5, 5),     s(20, 15),   s(36, 23)],
    [s(-30, -20), s(0, 2),     s(12, 10),   s(23, 17)],
    [s(-45, -30), s(-16, -9),  s(2, 2),     s(8, 5)],
    [s(-60, -40), s(-25, -20), s(-22, -20), s(-25, -15)],
];

#[rustfmt::skip]
const BISHOP_HALF: [[Score; 4]; 8] = [
    [s(-15, -20), s(-14, -15), s(-9, -10), s(-15, -10)],
    [s(-10, -15), s(5, 10),    s(2, 5),    s(-2, 0)],
    [s(-5, -10),  s(7, 5),     s(5, 10),   s(8, 5)],
    [s(0, -10),   s(-5, 0),    s(10, 5),   s(15, 10)],
    [s(0, -10),   s(-5, 0),    s(10, 5),   s(15, 10)],
    [s(10, -10),  s(5, 5),     s(5, 10),   s(9, 5)],
    [s(5, -15),   s(20, 10),   s(3, 5),    s(0, 0)],
    [s(-5, -20),  s(-12, -15), s(1, -10),  s(-10, -10)],
];

#[rustfmt::skip]
const ROOK_HALF: [[Score; 4]; 8] = [
    [s(-12, -1), s(-10, 0), s(-4, 0),   s(-1, 0)],
    [s(-8, 0),   s(4, 0),   s(5, 0),    s(5, 0)],
    [s(-15, 0),  s(-2, 0),  s(-5, 0),   s(-5, 0)],
    [s(-20, 0),  s(-5, 0),  s(-10, 0),  s(-20, 0)],
    [s(-20, 0),  s(-5, 0),  s(-10, 0),  s(-20, 0)],
    [s(-15, 0),  s(-2, 0),  s(-5, 0),   s(-5, 0)],
    [s(-8, 0),   s(0, 0),   s(1, 0),    s(12, 0)],
    [s(-10, -1), s(-8, 0),  s(2, 0),    s(20, 0)],
];

#[rustfmt::skip]
const QUEEN_HALF: [[Score; 4]; 8] = [
    [s(-8, -20), s(-10, -15), s(-10, -10), s(0, -5)],
    [s(0, -15),  s(0, -9),    s(0, 0),     s(10, 0)],
    [s(0, -10),  s(0, 0),     s(0, 5),     s(6, 6)],
    [s(0, -5),   s(0, 3),     s(4, 10),    s(3, 12)],
    [s(0, -5),   s(0, 3),     s(4, 10),    s(4, 12)],
    [s(0, -10),  s(0, 0),     s(0, 5),     s(0, 6)],
    [s(0, -15),  s(0, -9),    s(0, 0),     s(0, 0)],
    [s(-8, -20), s(-8, -15),  s(-5, -10),  s(0, -5)],
];

#[rustfmt::skip]
const KING_HALF: [[Score; 4]; 8] = [
    [s(-70, -60), s(-70, -45), s(-75, -40), s(-80, -35)],
    [s(-80, -45), s(-80, -25), s(-85, -20), s(-85, -15)],
    [s(-80, -40), s(-80, -20), s(-85, -5),  s(-85, 0)],
    [s(-70, -35), s(-70, -15), s(-70, 0),   s(-70, 10)],
    [s(-55, -35), s(-55, -15), s(-60, 0),   s(-65, 10)],
    [s(-40, -40), s(-45, -20), s(-45, -5),  s(-50, 0)],
    [s(-5, -45),  s(-5, -25),  s(-25, -20), s(-30, -15)],
    [s(25, -60),  s(35, -45),  s(7, -40),   s(-5, -35)],
];

fn half_table(pt: PieceType) -> &'static [[Score; 4]; 8] {
    match pt {
        PieceType::Pawn => &PAWN_HALF,
        PieceType::Knight => &KNIGHT_HALF,
        PieceType::Bishop => &BISHOP_HALF,
        PieceType::Rook => &ROOK_HALF,
        PieceType::Queen => &QUEEN_HALF,
        _ => &KING_HALF,
    }
}

/// Expanded tables per packed piece, piece value folded in.
static PST: Lazy<[[Score; 64]; Piece::COUNT]> = Lazy::new(|| {
    let mut pst = [[Score::ZERO; 64]; Piece::COUNT];
    for pt in [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ] {
        let half = half_table(pt);
        let white = Piece::new(Color::White, pt).index();
        let black = Piece::new(Color::Black, pt).index();
        for rank in 0..8u8 {
            for file in 0..4u8 {
                let score = half[rank as usize][file as usize] + PIECE_VALUE[pt.index()];
                let sq_b = Square::make(File::from_index(file), Rank::from_index(rank));
                pst[black][sq_b.index()] = score;
                pst[black][sq_b.mirror_file().index()] = score;
                let sq_w = sq_b.flip_rank();
                pst[white][sq_w.index()] = score;
                pst[white][sq_w.mirror_file().index()] = score;
            }
        }
    }
    pst
});

#[inline(always)]
pub fn pst(piece: Piece, sq: Square) -> Score {
    PST[piece.index()][sq.index()]
}

/// Candidate outpost squares: relative ranks 4-6, rim files excluded.
pub fn outposts(side: Color) -> BitBoard {
    (BitBoard::from_rank(Rank::relative(side, Rank::R4))
        | BitBoard::from_rank(Rank::relative(side, Rank::R5))
        | BitBoard::from_rank(Rank::relative(side, Rank::R6)))
        & !(BitBoard::from_file(File::A) | BitBoard::from_file(File::H))
}

pub fn init() {
    Lazy::force(&PST);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pst_is_color_symmetric() {
        for pt in [
            PieceType::Pawn,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Rook,
            PieceType::Queen,
            PieceType::King,
        ] {
            for sq in Square::iter() {
                assert_eq!(
                    pst(Piece::new(Color::White, pt), sq),
                    pst(Piece::new(Color::Black, pt), sq.flip_rank()),
                    "{:?} on {}",
                    pt,
                    sq
                );
            }
        }
    }

    #[test]
    fn test_pst_carries_piece_value() {
        // Any knight square is its base value plus a bounded PST term.
        let v = pst(Piece::new(Color::White, PieceType::Knight), Square::E4);
        assert!((v.mg - 320).abs() <= 90);
        assert!((v.eg - 360).abs() <= 120);
    }

    #[test]
    fn test_simplified_values() {
        assert_eq!(simplified_value(PieceType::Pawn), 115);
        assert_eq!(simplified_value(PieceType::Knight), 340);
        assert_eq!(simplified_value(PieceType::Bishop), 370);
        assert_eq!(simplified_value(PieceType::Rook), 600);
        assert_eq!(simplified_value(PieceType::Queen), 1100);
    }

    #[test]
    fn test_outposts_exclude_rim() {
        let white = outposts(Color::White);
        assert_eq!(white.popcount(), 18);
        assert!(white.test(Square::D5));
        assert!(!white.test(crate::board::parse_square("a5").unwrap()));
        let black = outposts(Color::Black);
        assert!(black.test(Square::D4));
        assert!(!black.test(crate::board::parse_square("d6").unwrap()));
    }
}
