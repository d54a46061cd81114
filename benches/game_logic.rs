use criterion::{black_box, criterion_group, criterion_main, Criterion};
use memory_match::core::{Board, DeckRng, Hooks, RoundConfig, RoundController, SymbolCatalog};
use memory_match::engine::{play_round, PerfectMemory};
use memory_match::types::{Difficulty, TICK_MS};

fn bench_generate_easy(c: &mut Criterion) {
    let catalog = SymbolCatalog::default();
    let mut rng = DeckRng::new(12345);

    c.bench_function("generate_easy", |b| {
        b.iter(|| Board::generate(black_box(Difficulty::Easy), &catalog, &mut rng))
    });
}

fn bench_generate_hard(c: &mut Criterion) {
    let catalog = SymbolCatalog::default();
    let mut rng = DeckRng::new(12345);

    c.bench_function("generate_hard", |b| {
        b.iter(|| Board::generate(black_box(Difficulty::Hard), &catalog, &mut rng))
    });
}

fn bench_tick_idle(c: &mut Criterion) {
    let mut ctl = RoundController::new(RoundConfig::default().with_seed(12345), Hooks::default());

    c.bench_function("round_tick_16ms", |b| {
        b.iter(|| ctl.tick(black_box(TICK_MS)))
    });
}

fn bench_autoplay_round(c: &mut Criterion) {
    let mut ctl = RoundController::new(
        RoundConfig::new(Difficulty::Hard).with_seed(12345),
        Hooks::default(),
    );

    c.bench_function("autoplay_hard_round", |b| {
        b.iter(|| {
            ctl.reset();
            play_round(&mut ctl, &mut PerfectMemory::new(), TICK_MS, 1_000_000)
        })
    });
}

criterion_group!(
    benches,
    bench_generate_easy,
    bench_generate_hard,
    bench_tick_idle,
    bench_autoplay_round
);
criterion_main!(benches);
