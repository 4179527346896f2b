//! The general evaluation: piece-square scores, pawn-structure terms from
//! the cache, mobility, outposts, bishop pair and rook file control,
//! collapsed by the material phase and signed for the side to move.

use crate::attacks;
use crate::bitboard::BitBoard;
use crate::board::{Board, Color, Piece, PieceType, Rank};
use crate::evaluation::params;
use crate::evaluation::pawns::{pawn_attacked_squares, PawnHashEntry, PawnTable};
use crate::evaluation::score::{Score, Value};

pub fn evaluate(board: &Board, table: &mut PawnTable) -> Value {
    let entry = *table.probe(board);
    let score = eval_side(board, &entry, Color::White) - eval_side(board, &entry, Color::Black);

    let material = board.material(Color::White) + board.material(Color::Black);
    let mut result = score.collapse(material);
    if board.side() == Color::Black {
        result = -result;
    }
    result + params::TEMPO_SCORE.collapse(material)
}

fn eval_side(board: &Board, entry: &PawnHashEntry, side: Color) -> Score {
    let t = attacks::tables();
    let them = side.opposite();
    let up = side.up();
    let down = side.down();
    let rank1 = Rank::relative(side, Rank::R1);
    let rank8 = Rank::relative(side, Rank::R8);

    let mut result = board.score(side);
    let ours = board.by_color(side);
    let occ = ours | board.by_color(them);

    let our_pawn_attacks = pawn_attacked_squares(entry.pawns[side.index()], side);
    let enemy_pawn_attacks = pawn_attacked_squares(entry.pawns[them.index()], them);
    // Squares counted for mobility: not our own, not covered by enemy pawns.
    let attackable = !(ours | enemy_pawn_attacks);
    let outpost_squares = params::outposts(side) & our_pawn_attacks;

    //  PAWNS  //

    result += entry.pawn_evaluation[side.index()];

    let passed = entry.passed & entry.pawns[side.index()];
    for sq in passed.squares() {
        // A rook supporting the passer from behind on a clear file.
        let rooks_behind = board.rooks(side) & t.direction_bits(sq, down);
        if rooks_behind.any() {
            let rook_sq = match side {
                Color::White => rooks_behind.msb(),
                Color::Black => rooks_behind.lsb(),
            };
            // `between` carries the rook's own square; only it may be set.
            if (occ & t.between(sq, rook_sq)) == BitBoard::from_square(rook_sq) {
                result += params::ROOK_BEHIND_PASSED_PAWN;
            }
        }

        // An enemy minor parked on the stop square.
        let stop = board.piece_on(sq.shifted(up));
        if stop == Piece::new(them, PieceType::Knight) || stop == Piece::new(them, PieceType::Bishop)
        {
            result += params::MINOR_PASSED_BLOCKED;
        }
    }

    //  KNIGHTS  //

    for sq in board.knights(side).squares() {
        let moves = t.pseudo(PieceType::Knight, sq) & attackable;
        result += params::KNIGHT_MOBILITY[moves.popcount() as usize];

        if outpost_squares.test(sq)
            && (t.direction_bits(sq, up) & enemy_pawn_attacks).is_empty()
        {
            result += params::OUTPOST * 2;
        }
    }

    //  BISHOPS  //

    if board.has_different_colored_bishops(side) {
        result += params::BISHOP_PAIR;
    }

    for sq in board.bishops(side).squares() {
        let moves = t.bishop_attacks(sq, occ) & attackable;
        result += params::BISHOP_MOBILITY[moves.popcount() as usize];

        if outpost_squares.test(sq)
            && (t.direction_bits(sq, up) & enemy_pawn_attacks).is_empty()
        {
            result += params::OUTPOST;
        }
    }

    //  ROOKS  //

    for sq in board.rooks(side).squares() {
        let moves = t.rook_attacks(sq, occ) & attackable;
        result += params::ROOK_MOBILITY[moves.popcount() as usize];

        let file = sq.file().index() + 1;
        if entry.most_advanced[side.index()][file] == rank1.index() as u8 {
            // No own pawn on the file.
            if entry.most_advanced[them.index()][file] == rank8.index() as u8 {
                result += params::ROOK_ON_OPEN_FILE;
            } else {
                result += params::ROOK_ON_SEMIOPEN_FILE;
            }
        }
    }

    //  QUEENS  //

    for sq in board.queens(side).squares() {
        let moves = t.attacks_of(PieceType::Queen, sq, occ) & attackable;
        result += params::QUEEN_MOBILITY[moves.popcount() as usize];
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init;

    fn eval_fen(fen: &str) -> Value {
        init();
        let board = Board::from_fen(fen).unwrap();
        let mut table = PawnTable::new();
        evaluate(&board, &mut table)
    }

    #[test]
    fn test_startpos_is_roughly_balanced() {
        let v = eval_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        // Only the tempo bonus separates the sides.
        assert_eq!(v, params::TEMPO_SCORE.collapse(crate::evaluation::score::MAX_PHASE));
    }

    #[test]
    fn test_extra_piece_wins_the_eval() {
        let v = eval_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBN1 b KQkq - 0 1");
        // Black enjoys white's missing rook.
        assert!(v > 300);
    }

    #[test]
    fn test_rook_on_open_file_beats_closed() {
        let open = eval_fen("4k3/ppp2ppp/8/8/8/8/PPP2PPP/3RK3 w - - 0 1");
        let closed = eval_fen("4k3/ppp2ppp/8/8/8/3P4/PPP2PP1/3RK3 w - - 0 1");
        assert!(open > closed);
    }

    #[test]
    fn test_mobility_rewards_open_positions() {
        let active = eval_fen("4k3/8/8/8/3B4/8/8/4K3 w - - 0 1");
        let boxed = eval_fen("4k3/8/8/8/8/8/8/B3K3 w - - 0 1");
        assert!(active >= boxed);
    }
}
