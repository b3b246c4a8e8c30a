use std::thread;
use std::time::{Duration, Instant};

use rayboard::eval::evaluate;
use rayboard::position::{Color, Position, Square};
use rayboard::search::{
    get_best_move, search, search_with_limits, PruneParams, SearchConfig, SearchLimits,
    SearchState, MATE_SCORE, MATE_THRESHOLD, STALEMATE_SCORE,
};

fn sq(notation: &str) -> Square {
    notation.parse().unwrap()
}

#[test]
fn finds_the_back_rank_mate() {
    let mut pos = Position::from_fen("6k1/5ppp/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
    let mut state = SearchState::new(16);
    let result = search(&mut pos, &mut state, &SearchConfig::depth(4));

    let expected = pos.find_move(sq("a1"), sq("a8"), None).unwrap();
    assert_eq!(result.best_move, Some(expected));
    assert!(result.score >= MATE_THRESHOLD);
}

#[test]
fn defends_against_mate_in_one() {
    // Black to move under a back-rank threat; whatever the engine picks
    // must at least be legal.
    let mut pos = Position::from_fen("6k1/5ppp/8/8/8/8/8/R3K3 b - - 0 1").unwrap();
    let mut state = SearchState::new(16);
    let best = get_best_move(&mut pos, &mut state, &SearchConfig::depth(4)).unwrap();
    let legal = pos.legal_moves();
    assert!(legal.contains(&best));
}

#[test]
fn no_move_in_checkmate() {
    let mut pos = Position::from_fen(
        "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
    )
    .unwrap();
    let mut state = SearchState::new(8);
    let result = search(&mut pos, &mut state, &SearchConfig::depth(3));
    assert!(result.best_move.is_none());
    assert_eq!(result.score, -MATE_SCORE);
}

#[test]
fn no_move_in_stalemate() {
    let mut pos = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    let mut state = SearchState::new(8);
    let result = search(&mut pos, &mut state, &SearchConfig::depth(3));
    assert!(result.best_move.is_none());
    assert_eq!(result.score, STALEMATE_SCORE);
}

#[test]
fn returned_move_is_always_legal() {
    let fens = [
        "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R b KQkq - 0 1",
    ];
    let mut state = SearchState::new(16);
    for fen in fens {
        let mut pos = Position::from_fen(fen).unwrap();
        let best = get_best_move(&mut pos, &mut state, &SearchConfig::depth(3)).unwrap();
        assert!(pos.legal_moves().contains(&best), "illegal best move for {fen}");
    }
}

/// Exhaustive negamax over the same evaluation, no pruning at all. The
/// reference the pruned search must agree with when its speculative
/// techniques are disabled.
fn exhaustive_negamax(pos: &mut Position, depth: u32, ply: i32) -> i32 {
    if depth == 0 {
        let sign = if pos.side_to_move() == Color::White { 1 } else { -1 };
        return sign * evaluate(pos);
    }
    let moves = pos.legal_moves();
    if moves.is_empty() {
        return if pos.is_in_check() {
            -(MATE_SCORE - ply)
        } else {
            STALEMATE_SCORE
        };
    }
    let mut best = -MATE_SCORE * 2;
    for mv in &moves {
        pos.make_move(mv);
        let score = -exhaustive_negamax(pos, depth - 1, ply + 1);
        pos.undo_move();
        best = best.max(score);
    }
    best
}

#[test]
fn plain_alpha_beta_equals_exhaustive_minimax() {
    let cases = [
        ("startpos", Position::new()),
        (
            "italian",
            Position::from_fen(
                "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 0 1",
            )
            .unwrap(),
        ),
        (
            "endgame",
            Position::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 b - - 0 1").unwrap(),
        ),
    ];

    for (name, mut pos) in cases {
        for depth in 1..=3 {
            let expected = exhaustive_negamax(&mut pos, depth, 0);

            let config = SearchConfig {
                max_depth: depth,
                use_iterative_deepening: false,
                params: PruneParams::minimal(),
                ..SearchConfig::depth(depth)
            };
            let mut state = SearchState::new(1);
            let result = search(&mut pos, &mut state, &config);
            assert_eq!(
                result.score, expected,
                "{name} at depth {depth}: pruned {} vs exhaustive {expected}",
                result.score
            );
        }
    }
}

#[test]
fn time_budget_is_respected() {
    let mut pos = Position::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .unwrap();
    let mut state = SearchState::new(16);
    let config = SearchConfig::timed(Duration::from_millis(200));

    let start = Instant::now();
    let result = search(&mut pos, &mut state, &config);
    let elapsed = start.elapsed();

    assert!(result.best_move.is_some());
    assert!(result.depth >= 1);
    assert!(elapsed < Duration::from_secs(2), "search ran {elapsed:?}");
}

#[test]
fn search_can_be_cancelled_from_another_thread() {
    let limits = SearchLimits::new();
    let handle_limits = limits.clone();

    let worker = thread::spawn(move || {
        let mut pos = Position::new();
        let mut state = SearchState::new(16);
        let config = SearchConfig {
            max_depth: 64,
            time_limit: Duration::from_secs(3_600),
            ..SearchConfig::default()
        };
        search_with_limits(&mut pos, &mut state, &config, &handle_limits)
    });

    thread::sleep(Duration::from_millis(100));
    limits.request_stop();

    let result = worker.join().unwrap();
    assert!(result.best_move.is_some());
}

#[test]
fn shared_clock_stops_a_running_search() {
    let limits = SearchLimits::new();
    limits.clock().set_deadline(Instant::now() + Duration::from_millis(150));
    let handle_limits = limits.clone();

    let worker = thread::spawn(move || {
        let mut pos = Position::new();
        let mut state = SearchState::new(16);
        let config = SearchConfig {
            max_depth: 64,
            time_limit: Duration::from_secs(3_600),
            ..SearchConfig::default()
        };
        search_with_limits(&mut pos, &mut state, &config, &handle_limits)
    });

    let result = worker.join().unwrap();
    assert!(result.best_move.is_some());
}

#[test]
fn quiescence_settles_capture_chains() {
    // A pile of mutual captures on d5: depth 1 with quiescence should not
    // think winning the first pawn is free.
    let mut pos = Position::from_fen(
        "rnbqkb1r/ppp1pppp/5n2/3p4/3P4/2N5/PPP1PPPP/R1BQKBNR w KQkq - 0 1",
    )
    .unwrap();
    let mut state = SearchState::new(8);
    let shallow = search(&mut pos, &mut state, &SearchConfig::depth(1));
    assert!(shallow.best_move.is_some());
    // Nxd5 loses a knight for a pawn once Nxd5 is answered; quiescence keeps
    // the score from crediting the pawn grab.
    assert!(shallow.score < 250, "depth-1 score {} trusts a refuted capture", shallow.score);
}

#[test]
fn single_reply_is_returned_immediately() {
    // Black king in the corner with one legal move.
    let mut pos = Position::from_fen("k7/7R/2R5/8/8/8/8/4K3 b - - 0 1").unwrap();
    let mut state = SearchState::new(8);
    let best = get_best_move(&mut pos, &mut state, &SearchConfig::depth(6)).unwrap();
    assert!(pos.legal_moves().contains(&best));
}

#[test]
fn lost_position_still_returns_a_move() {
    // A queen down with one escape square: the move comes back anyway.
    let mut pos = Position::from_fen("1k6/8/8/8/8/5q2/8/6K1 w - - 0 1").unwrap();
    let mut state = SearchState::new(8);
    let result = search(&mut pos, &mut state, &SearchConfig::depth(5));
    assert!(result.best_move.is_some());
    assert!(result.score < -500);
}
