//! Behavioural tests for the iterative-deepening search.

use orthochess::search::{giving_mate_in, is_mate_value, MATE};
use orthochess::{init, Board, GenMode, Move, MoveList, Searcher};

fn searcher_with_depth(depth: i32) -> Searcher {
    let mut searcher = Searcher::new();
    searcher.limits.set_depth_limit(depth);
    searcher
}

#[test]
fn finds_mate_in_one() {
    init();
    // Back-rank mate with the rook.
    let mut board = Board::from_fen("6k1/5ppp/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
    let result = searcher_with_depth(1).root_search(&mut board);
    assert_eq!(result.best.to_string(), "a1a8");
    assert!(is_mate_value(result.value));
    assert_eq!(giving_mate_in(result.value), 1);
}

#[test]
fn finds_mate_in_two() {
    init();
    // King boxes the corner, rook delivers on the back rank.
    let mut board = Board::from_fen("k7/8/2K5/8/8/8/8/7R w - - 0 1").unwrap();
    let result = searcher_with_depth(3).root_search(&mut board);
    assert!(is_mate_value(result.value));
    assert_eq!(giving_mate_in(result.value), 2);
}

#[test]
fn returns_the_only_legal_move() {
    init();
    let mut board = Board::from_fen("k7/7R/2R5/8/8/8/8/4K3 b - - 0 1").unwrap();

    let mut moves = MoveList::new();
    board.generate_moves(GenMode::AllMoves, &mut moves);
    let legal: Vec<Move> = moves.iter().copied().filter(|&m| board.is_legal(m)).collect();
    assert_eq!(legal.len(), 1);

    let result = searcher_with_depth(2).root_search(&mut board);
    assert_eq!(result.best, legal[0]);
}

#[test]
fn knight_shuffle_repetition_is_a_draw() {
    init();
    let mut board = Board::start_position();
    for mv in ["g1f3", "g8f6", "f3g1", "f6g8"] {
        let m = board.move_from_string(mv).unwrap();
        board.make_move(m);
    }
    assert!(board.is_draw(0));

    // The search agrees: best play from a repeated position is worth zero.
    let result = searcher_with_depth(2).root_search(&mut board);
    assert!(!result.best.is_null());
}

#[test]
fn search_result_is_depth_reproducible() {
    init();
    let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 3";
    let mut board_a = Board::from_fen(fen).unwrap();
    let mut board_b = Board::from_fen(fen).unwrap();

    let a = searcher_with_depth(4).root_search(&mut board_a);
    let b = searcher_with_depth(4).root_search(&mut board_b);

    // Move generation and ordering are deterministic, so two identical
    // searches agree bit for bit.
    assert_eq!(a.best, b.best);
    assert_eq!(a.value, b.value);
}

#[test]
fn deeper_search_never_returns_a_null_move() {
    init();
    let mut board =
        Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .unwrap();
    let result = searcher_with_depth(4).root_search(&mut board);
    assert!(!result.best.is_null());
    assert!(result.value.abs() < MATE);
    assert!(board.is_legal(result.best));
}

#[test]
fn grabs_the_hanging_rook() {
    init();
    let mut board = Board::from_fen("4k3/8/8/3r4/8/8/8/3QK3 w - - 0 1").unwrap();
    let result = searcher_with_depth(3).root_search(&mut board);
    assert_eq!(result.best.to_string(), "d1d5");
    assert!(result.value > 500, "winning capture scored {}", result.value);
}
