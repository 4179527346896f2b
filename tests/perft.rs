//! Exact perft node counts over the standard verification positions.
//!
//! Any bug in move generation, legality filtering or make/unmake shows up
//! here as a wrong count long before it shows up in play.

use orthochess::{init, perft, Board};
use std::time::Instant;

fn run_perft(fen: &str, depth: i32, expected: u64) {
    init();
    let mut board = Board::from_fen(fen).unwrap();
    let start = Instant::now();
    let nodes = perft(&mut board, depth);
    let elapsed = start.elapsed();
    let micros = elapsed.as_micros().max(1);
    println!(
        "perft({}) = {:>12} in {:?} ({} nps) [{}]",
        depth,
        nodes,
        elapsed,
        nodes as u128 * 1_000_000 / micros,
        fen
    );
    assert_eq!(nodes, expected, "fen {}", fen);
}

#[test]
fn perft_initial_position() {
    let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    run_perft(fen, 1, 20);
    run_perft(fen, 2, 400);
    run_perft(fen, 3, 8_902);
    run_perft(fen, 4, 197_281);
    run_perft(fen, 5, 4_865_609);
}

#[test]
fn perft_kiwipete() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    run_perft(fen, 1, 48);
    run_perft(fen, 2, 2_039);
    run_perft(fen, 3, 97_862);
    run_perft(fen, 4, 4_085_603);
}

#[test]
fn perft_position_3() {
    let fen = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    run_perft(fen, 1, 14);
    run_perft(fen, 2, 191);
    run_perft(fen, 3, 2_812);
    run_perft(fen, 4, 43_238);
    run_perft(fen, 5, 674_624);
    run_perft(fen, 6, 11_030_083);
}

#[test]
fn perft_position_4() {
    let fen = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
    run_perft(fen, 1, 6);
    run_perft(fen, 2, 264);
    run_perft(fen, 3, 9_467);
    run_perft(fen, 4, 422_333);
    run_perft(fen, 5, 15_833_292);
}

/// Hash and score bookkeeping must survive a full perft walk.
#[test]
fn perft_preserves_board_state() {
    init();
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let mut board = Board::from_fen(fen).unwrap();
    let hash = board.compute_hash();
    let fen_before = board.to_fen();

    perft(&mut board, 3);

    assert_eq!(board.compute_hash(), hash);
    assert_eq!(board.compute_hash(), board.hash_from_scratch());
    assert_eq!(board.to_fen(), fen_before);
}
