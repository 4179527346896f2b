//! Static exchange evaluation.
//!
//! Plays out the capture sequence on one square, both sides always
//! recapturing with their least valuable attacker, and scores the material
//! swing for the side making the first capture. Sliders hidden behind the
//! capturing piece re-enter the attacker set as their blocker leaves.

use crate::board::{Board, Color, PieceType};
use crate::evaluation::params::simplified_value;
use crate::evaluation::score::Value;
use crate::moves::{Move, MoveKind};

/// Net gain in centipawns for the moving side if both sides capture
/// optimally on the destination square of `m`.
pub fn static_exchange_eval(board: &Board, m: Move) -> Value {
    let to = m.to();
    let from = m.from();

    let mut gain: [Value; 32] = [0; 32];
    let mut depth = 0usize;

    let mut occ = board.all_pieces();
    let first_victim = if m.kind() == MoveKind::EnPassant {
        occ.clear(to.shifted(board.side().down()));
        PieceType::Pawn
    } else {
        board.piece_on(to).piece_type()
    };
    gain[0] = simplified_value(first_victim);

    // The moving piece sits on the target from now on.
    let mut occupier = board.piece_on(from).piece_type();
    occ.clear(from);

    let bishops_queens =
        board.bishops_and_queens(Color::White) | board.bishops_and_queens(Color::Black);
    let rooks_queens = board.rooks_and_queens(Color::White) | board.rooks_and_queens(Color::Black);

    let t = crate::attacks::tables();
    let mut attackers = board.all_attackers_of(to, occ) & occ;
    let mut side = board.side().opposite();

    loop {
        let our_attackers = attackers & board.by_color(side);
        if our_attackers.is_empty() || depth + 1 >= gain.len() {
            break;
        }

        // Least valuable attacker first.
        let mut picked = None;
        for pt in [
            PieceType::Pawn,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Rook,
            PieceType::Queen,
            PieceType::King,
        ] {
            let subset = our_attackers & board.by_piece(crate::board::Piece::new(side, pt));
            if subset.any() {
                picked = Some((pt, subset.lsb()));
                break;
            }
        }
        let (pt, sq) = match picked {
            Some(p) => p,
            None => break,
        };

        // The king may only recapture if nothing answers back.
        if pt == PieceType::King && (attackers & board.by_color(side.opposite())).any() {
            break;
        }

        depth += 1;
        gain[depth] = simplified_value(occupier) - gain[depth - 1];

        occupier = pt;
        occ.clear(sq);
        attackers.clear(sq);

        // Removing a blocker may reveal an x-ray attacker behind it.
        attackers |= (t.bishop_attacks(to, occ) & bishops_queens & occ)
            | (t.rook_attacks(to, occ) & rooks_queens & occ);
        attackers &= occ;

        side = side.opposite();
    }

    // Each side may stand pat instead of recapturing at a loss.
    while depth > 0 {
        gain[depth - 1] = -Value::max(-gain[depth - 1], gain[depth]);
        depth -= 1;
    }
    gain[0]
}
