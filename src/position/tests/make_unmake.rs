use crate::position::{Piece, Position, Square};

fn sq(notation: &str) -> Square {
    notation.parse().unwrap()
}

fn play(pos: &mut Position, from: &str, to: &str) {
    let mv = pos.find_move(sq(from), sq(to), None).unwrap();
    pos.make_move(&mv);
}

#[test]
fn undo_restores_the_exact_position() {
    let mut pos = Position::new();
    let fen = pos.to_fen();
    let hash = pos.hash();

    for (from, to) in [
        ("e2", "e4"),
        ("e7", "e5"),
        ("g1", "f3"),
        ("b8", "c6"),
        ("f1", "b5"),
        ("g8", "f6"),
        ("e1", "g1"),
    ] {
        play(&mut pos, from, to);
        assert_eq!(pos.hash(), pos.full_hash());
    }
    assert_eq!(pos.ply_count(), 7);

    while pos.undo_move().is_some() {}
    assert_eq!(pos.to_fen(), fen);
    assert_eq!(pos.hash(), hash);
    assert_eq!(pos.ply_count(), 0);
}

#[test]
fn undo_with_nothing_to_undo_returns_none() {
    let mut pos = Position::new();
    assert!(pos.undo_move().is_none());
}

#[test]
fn castle_round_trip() {
    let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let fen = pos.to_fen();

    play(&mut pos, "e1", "c1");
    assert_eq!(pos.piece_at(sq("c1")).map(|(_, p)| p), Some(Piece::King));
    assert_eq!(pos.piece_at(sq("d1")).map(|(_, p)| p), Some(Piece::Rook));
    assert!(pos.piece_at(sq("a1")).is_none());
    assert_eq!(pos.hash(), pos.full_hash());

    pos.undo_move();
    assert_eq!(pos.to_fen(), fen);
}

#[test]
fn en_passant_round_trip() {
    let mut pos = Position::from_fen("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1").unwrap();
    play(&mut pos, "d7", "d5");
    let fen = pos.to_fen();

    play(&mut pos, "e5", "d6");
    assert!(pos.piece_at(sq("d5")).is_none());
    assert_eq!(pos.hash(), pos.full_hash());

    pos.undo_move();
    assert_eq!(pos.to_fen(), fen);
    assert_eq!(pos.piece_at(sq("d5")).map(|(_, p)| p), Some(Piece::Pawn));
}

#[test]
fn promotion_round_trip() {
    let mut pos = Position::from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let fen = pos.to_fen();

    let mv = pos.find_move(sq("a7"), sq("b8"), Some(Piece::Queen)).unwrap();
    pos.make_move(&mv);
    assert_eq!(pos.piece_at(sq("b8")).map(|(_, p)| p), Some(Piece::Queen));
    assert_eq!(pos.hash(), pos.full_hash());

    pos.undo_move();
    assert_eq!(pos.to_fen(), fen);
    assert_eq!(pos.piece_at(sq("a7")).map(|(_, p)| p), Some(Piece::Pawn));
}

#[test]
fn king_moves_update_the_tracked_square() {
    let mut pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    play(&mut pos, "e1", "d2");
    assert_eq!(pos.king_square(crate::position::Color::White), sq("d2"));
    pos.undo_move();
    assert_eq!(pos.king_square(crate::position::Color::White), sq("e1"));
}

#[test]
fn null_move_round_trip() {
    let mut pos = Position::from_fen("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1").unwrap();
    play(&mut pos, "d7", "d5");
    let fen = pos.to_fen();
    let hash = pos.hash();

    let undo = pos.make_null_move();
    assert_ne!(pos.hash(), hash);
    assert!(pos.en_passant_target().is_none());
    assert_eq!(pos.hash(), pos.full_hash());

    pos.undo_null_move(undo);
    assert_eq!(pos.to_fen(), fen);
    assert_eq!(pos.hash(), hash);
}

#[test]
fn make_move_checked_rejects_garbage() {
    let mut pos = Position::new();
    // A legal-looking move for the wrong side.
    let mut black = Position::new();
    let black_reply = {
        let first = black.find_move(sq("e2"), sq("e4"), None).unwrap();
        black.make_move(&first);
        black.find_move(sq("e7"), sq("e5"), None).unwrap()
    };
    assert!(pos.make_move_checked(&black_reply).is_err());
    assert_eq!(pos.ply_count(), 0);

    let ok = pos.find_move(sq("d2"), sq("d4"), None).unwrap();
    assert!(pos.make_move_checked(&ok).is_ok());
    assert_eq!(pos.ply_count(), 1);
}
