//! Benchmarks for move generation and search throughput.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use rayboard::position::Position;
use rayboard::search::{search, SearchConfig, SearchState};

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");

    let mut startpos = Position::new();
    for depth in 1..=4 {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| startpos.perft(black_box(depth)))
        });
    }

    let mut kiwipete = Position::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .unwrap();
    for depth in 1..=3 {
        group.bench_with_input(BenchmarkId::new("kiwipete", depth), &depth, |b, &depth| {
            b.iter(|| kiwipete.perft(black_box(depth)))
        });
    }

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");

    let mut startpos = Position::new();
    group.bench_function("startpos", |b| {
        b.iter(|| black_box(startpos.legal_moves()))
    });

    let mut middlegame = Position::from_fen(
        "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
    )
    .unwrap();
    group.bench_function("middlegame", |b| {
        b.iter(|| black_box(middlegame.legal_moves()))
    });

    let mut kiwipete = Position::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .unwrap();
    group.bench_function("kiwipete", |b| {
        b.iter(|| black_box(kiwipete.legal_moves()))
    });

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10);

    for depth in [3, 4, 5] {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut pos = Position::new();
                let mut state = SearchState::new(16);
                search(&mut pos, &mut state, &SearchConfig::depth(depth))
            })
        });
    }

    for depth in [3, 4] {
        group.bench_with_input(BenchmarkId::new("tactical", depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut pos = Position::from_fen(
                    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
                )
                .unwrap();
                let mut state = SearchState::new(16);
                search(&mut pos, &mut state, &SearchConfig::depth(depth))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_perft, bench_movegen, bench_search);
criterion_main!(benches);
