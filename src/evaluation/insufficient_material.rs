//! Detection of pawnless endgames no one can win.
//!
//! Enumerated by the stronger side's simplified material (3/6/9 units);
//! anything heavier, or any position with pawns, is evaluated normally.

use crate::board::{Board, Color};

/// True when the position should be scored as a dead draw.
pub fn is_drawish_endgame(board: &Board) -> bool {
    let white = board.material(Color::White);
    let black = board.material(Color::Black);
    if white + black > 9 {
        // Too much wood to call it quiet.
        return false;
    }
    if board.by_piece_type(crate::board::PieceType::Pawn).any() {
        return false;
    }

    if white >= black {
        drawish_for(board, Color::White, white, black)
    } else {
        drawish_for(board, Color::Black, black, white)
    }
}

fn drawish_for(board: &Board, strong: Color, strong_mat: i32, weak_mat: i32) -> bool {
    let weak = strong.opposite();
    match strong_mat + weak_mat {
        0 => true, // Bare kings.
        // King and a minor piece against a bare king.
        3 => true,
        6 => {
            if strong_mat == 3 {
                // Minor piece against minor piece.
                true
            } else if board.bishops(strong).is_empty() {
                // Two knights cannot force mate.
                true
            } else {
                // Two bishops win only when they cover both square colors.
                board.has_only_same_colored_bishops(strong)
            }
        }
        9 => {
            strong_mat == 6
                && (board.knights(strong).any()
                    || board.bishops(weak).is_empty()
                    || board.has_only_same_colored_bishops(strong))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init;

    fn drawish(fen: &str) -> bool {
        init();
        is_drawish_endgame(&Board::from_fen(fen).unwrap())
    }

    #[test]
    fn test_bare_and_single_minor() {
        assert!(drawish("4k3/8/8/8/8/8/8/4K3 w - - 0 1"));
        assert!(drawish("4k3/8/8/8/8/8/8/3NK3 w - - 0 1"));
        assert!(drawish("4k3/8/8/8/8/8/8/3BK3 b - - 0 1"));
    }

    #[test]
    fn test_minor_versus_minor() {
        assert!(drawish("3nk3/8/8/8/8/8/8/3BK3 w - - 0 1"));
        assert!(drawish("3bk3/8/8/8/8/8/8/3NK3 w - - 0 1"));
    }

    #[test]
    fn test_two_knights_cannot_win() {
        assert!(drawish("4k3/8/8/8/8/8/8/2NNK3 w - - 0 1"));
    }

    #[test]
    fn test_same_colored_bishops_draw() {
        // Both white bishops on dark squares.
        assert!(drawish("4k3/8/8/8/8/8/8/B1B1K3 w - - 0 1"));
        // Opposite-colored bishop pair mates and is not drawish.
        assert!(!drawish("4k3/8/8/8/8/8/8/2BBK3 w - - 0 1"));
    }

    #[test]
    fn test_bishop_and_knight_is_a_win() {
        assert!(!drawish("4k3/8/8/8/8/8/8/2NBK3 w - - 0 1"));
    }

    #[test]
    fn test_heavy_pieces_are_not_drawish() {
        assert!(!drawish("4k3/8/8/8/8/8/8/3QK3 w - - 0 1"));
        assert!(!drawish("4k3/8/8/8/8/8/8/R3K3 w - - 0 1"));
    }

    #[test]
    fn test_pawns_disable_the_rule() {
        assert!(!drawish("4k3/8/8/8/8/8/4P3/3NK3 w - - 0 1"));
    }

    #[test]
    fn test_two_minors_versus_one() {
        // Knight among the two minors: drawish.
        assert!(drawish("3nk3/8/8/8/8/8/8/2NBK3 w - - 0 1"));
        // Opposite bishops versus a knight: still drawish by the rule.
        assert!(drawish("3nk3/8/8/8/8/8/8/2BBK3 w - - 0 1"));
    }
}
