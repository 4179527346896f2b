// Evaluation, split the way the positions split:
// `base` carries the general heuristics, the sibling modules handle the
// position classes that need special treatment (pawn endgames, dead draws,
// bare-king mop-ups).

pub mod base;
pub mod insufficient_material;
pub mod mop_up;
pub mod params;
pub mod pawns;
pub mod score;

use crate::board::{Board, Color};
pub use pawns::PawnTable;
pub use score::{Value, MAX_PHASE};

/// Main evaluation entry point, from the side to move's point of view.
/// The pawn table memoizes pawn-structure work between calls; one table per
/// search context.
pub fn evaluate(board: &Board, table: &mut PawnTable) -> Value {
    if !board.has_non_pawns(Color::White) && !board.has_non_pawns(Color::Black) {
        return pawns::eval_pawn_endgame(board, table);
    }
    if insufficient_material::is_drawish_endgame(board) {
        return 0;
    }
    if board.material(Color::White) == 0 || board.material(Color::Black) == 0 {
        return mop_up::eval_bare_king(board);
    }
    base::evaluate(board, table)
}
