use kibitz_core::{Position, parse_move};

/// Walk every legal move to `depth`, undoing each, and return the leaf count.
fn perft(pos: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut nodes = 0;
    for mv in pos.legal_moves() {
        pos.apply(mv);
        nodes += perft(pos, depth - 1);
        assert!(pos.undo());
    }
    nodes
}

#[test]
fn perft_from_start_matches_known_counts() {
    let mut pos = Position::new();
    assert_eq!(perft(&mut pos, 1), 20);
    assert_eq!(perft(&mut pos, 2), 400);
    assert_eq!(perft(&mut pos, 3), 8_902);
    assert_eq!(pos, Position::new(), "perft must leave the position untouched");
}

#[test]
fn kiwipete_perft_two() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let mut pos = Position::from_fen(fen).unwrap();
    assert_eq!(perft(&mut pos, 1), 48);
    assert_eq!(perft(&mut pos, 2), 2_039);
    assert_eq!(pos.fen(), Position::from_fen(fen).unwrap().fen());
}

#[test]
fn mixed_moves_and_null_moves_unwind_cleanly() {
    let mut pos = Position::new();
    let start_key = pos.canonical_key();

    for text in ["e4", "e7e5", "Nf3"] {
        let mv = parse_move(&pos, text).unwrap();
        pos.apply(mv);
    }
    assert!(pos.apply_null());
    let mv = parse_move(&pos, "d2d4").unwrap();
    pos.apply(mv);
    assert_eq!(pos.ply(), 5);
    assert_eq!(pos.history_keys().len(), 5);

    while pos.undo() {}
    assert_eq!(pos.ply(), 0);
    assert_eq!(pos.canonical_key(), start_key);
}
