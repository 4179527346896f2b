//! Mop-up evaluation for bare-king endgames.
//!
//! When one side has nothing but king (and possibly pawns) left while the
//! other keeps pieces, the winner needs help herding the defending king:
//! a push-to-corner table in the general case, and a dedicated driver for
//! the bishop-and-knight mate that steers toward the bishop's corners.

use crate::bitboard::BitBoard;
use crate::board::{Board, Color, Square};
use crate::evaluation::params;
use crate::evaluation::score::Value;

/// Evaluation when exactly one side's piece material is gone, from the side
/// to move's point of view.
pub fn eval_bare_king(board: &Board) -> Value {
    let strong = if board.material(Color::White) > 0 {
        Color::White
    } else {
        Color::Black
    };
    let weak = strong.opposite();

    let driver = if board.material(strong) == 6
        && board.bishops(strong).any()
        && board.knights(strong).any()
    {
        kbnk_driver(board, strong)
    } else {
        params::KING_PUSH_TO_CORNER[board.king_sq(weak).index()]
    };

    let result = params::SURE_WIN + driver;
    if board.side() == strong {
        result
    } else {
        -result
    }
}

/// Bishop-and-knight mate guidance: bring the kings together and drive the
/// defender toward one of the two corners the bishop controls.
fn kbnk_driver(board: &Board, strong: Color) -> Value {
    let weak_king = board.king_sq(strong.opposite());
    let strong_king = board.king_sq(strong);
    let king_tropism = 7 - Square::distance(strong_king, weak_king) as Value;

    let corners = if (board.bishops(strong) & BitBoard::LIGHT_SQUARES).any() {
        (Square::A8, Square::H1)
    } else {
        (Square::H8, Square::A1)
    };
    let corner_dist = Square::distance(corners.0, weak_king)
        .min(Square::distance(corners.1, weak_king)) as Value;

    king_tropism - 5 * corner_dist
}
