//! Zobrist hashing keys.
//!
//! All keys come from a splitmix64 stream evaluated at compile time, so the
//! tables are deterministic and live in read-only data. The hash kept in
//! `StateInfo` accumulates only the piece-square keys; side, en passant and
//! castling terms are xor-ed in by `Board::compute_hash` at query time.

use crate::board::{Board, Color, Piece, Square};

const fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}

const SEED: u64 = 0x1234_5678_9abc_def0;

/// Keys for each (piece, square) pair. Slots for `Piece::NONE` and the two
/// unused packed indices stay in the table so lookups need no remapping.
pub static PIECE_KEYS: [[u64; 64]; Piece::COUNT] = {
    let mut keys = [[0u64; 64]; Piece::COUNT];
    let mut state = SEED;
    let mut piece = 1;
    while piece < Piece::COUNT {
        let mut sq = 0;
        while sq < 64 {
            state = splitmix64(state);
            keys[piece][sq] = state;
            sq += 1;
        }
        piece += 1;
    }
    keys
};

/// Xor-ed in when black is to move.
pub const SIDE_KEY: u64 = {
    let state = splitmix64(SEED ^ 0x5157_45b0_94f4_d2e3);
    state
};

/// One key per file, applied while that file's en passant square is set.
pub static EP_KEYS: [u64; 8] = {
    let mut keys = [0u64; 8];
    let mut state = SIDE_KEY;
    let mut file = 0;
    while file < 8 {
        state = splitmix64(state);
        keys[file] = state;
        file += 1;
    }
    keys
};

/// One key per castle-rights combination.
pub static CASTLE_KEYS: [u64; 16] = {
    let mut keys = [0u64; 16];
    let mut state = splitmix64(SIDE_KEY ^ 0xdead_beef_1234_5678);
    let mut i = 0;
    while i < 16 {
        state = splitmix64(state);
        keys[i] = state;
        i += 1;
    }
    keys
};

pub const NULL_MOVE_KEY: u64 = splitmix64(SEED ^ 0xcafe_babe_8765_4321);

#[inline(always)]
pub fn piece_key(piece: Piece, sq: Square) -> u64 {
    PIECE_KEYS[piece.index()][sq.index()]
}

/// Sub-hash over the pawn placement only; keys the pawn structure cache.
pub fn pawn_hash(board: &Board) -> u64 {
    let mut hash = 0u64;
    for color in [Color::White, Color::Black] {
        let piece = Piece::new(color, crate::board::PieceType::Pawn);
        for sq in board.pawns(color).squares() {
            hash ^= piece_key(piece, sq);
        }
    }
    hash
}
