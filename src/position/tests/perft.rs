//! Node-count validation against the standard perft suite.

use crate::position::Position;

fn perft_fen(fen: &str, expected: &[u64]) {
    let mut pos = Position::from_fen(fen).unwrap();
    for (i, &nodes) in expected.iter().enumerate() {
        let depth = i as u32 + 1;
        assert_eq!(
            pos.perft(depth),
            nodes,
            "perft({depth}) mismatch for {fen}"
        );
    }
}

#[test]
fn perft_startpos() {
    let mut pos = Position::new();
    assert_eq!(pos.perft(1), 20);
    assert_eq!(pos.perft(2), 400);
    assert_eq!(pos.perft(3), 8_902);
    assert_eq!(pos.perft(4), 197_281);
}

#[test]
fn perft_kiwipete() {
    perft_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        &[48, 2_039, 97_862],
    );
}

#[test]
fn perft_endgame_pins_and_en_passant() {
    perft_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", &[14, 191, 2_812, 43_238]);
}

#[test]
fn perft_promotion_heavy() {
    perft_fen(
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        &[6, 264, 9_467],
    );
}

#[test]
fn perft_talkchess_castling_trap() {
    perft_fen(
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        &[44, 1_486, 62_379],
    );
}

#[test]
fn perft_symmetric_middlegame() {
    perft_fen(
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
        &[46, 2_079, 89_890],
    );
}
