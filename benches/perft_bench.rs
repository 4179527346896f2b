//! Criterion throughput benchmarks for move generation and search.

use criterion::{criterion_group, criterion_main, Criterion};
use orthochess::{init, perft, Board, Searcher};

fn perft_startpos(c: &mut Criterion) {
    init();
    c.bench_function("perft 4 startpos", |b| {
        let mut board = Board::start_position();
        b.iter(|| perft(&mut board, 4));
    });
}

fn perft_kiwipete(c: &mut Criterion) {
    init();
    c.bench_function("perft 3 kiwipete", |b| {
        let mut board =
            Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
                .unwrap();
        b.iter(|| perft(&mut board, 3));
    });
}

fn search_middlegame(c: &mut Criterion) {
    init();
    c.bench_function("search depth 5 middlegame", |b| {
        b.iter(|| {
            let mut board = Board::from_fen(
                "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 3",
            )
            .unwrap();
            let mut searcher = Searcher::new();
            searcher.limits.set_depth_limit(5);
            searcher.root_search(&mut board)
        });
    });
}

criterion_group!(benches, perft_startpos, perft_kiwipete, search_middlegame);
criterion_main!(benches);
