//! Scoring and snapshot benchmarks.
//!
//! Run with: cargo bench --bench scoring

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use skirmish_engine::cards::{CardType, Environment, PlayerCard, Power};
use skirmish_engine::core::{Action, CardId, EnvironmentId, EnvironmentState, GameConfig, PlayerId};
use skirmish_engine::engine::Engine;
use skirmish_engine::rules::score_environment;

/// An environment with `per_player` cards in play for each of four players,
/// cycling through every card type.
fn crowded_environment(per_player: usize) -> (EnvironmentState, Vec<PlayerId>) {
    let players: Vec<PlayerId> = (1..=4).map(|i| PlayerId::from(format!("p{i}"))).collect();
    let mut env = EnvironmentState::new(Environment {
        id: EnvironmentId::new(1),
        title: "Oasis".into(),
        description: String::new(),
        image: String::new(),
    });

    let mut next = 100;
    for player in &players {
        for i in 0..per_player {
            let card_type = CardType::ALL[(i + next as usize) % CardType::ALL.len()];
            env.put_in_play(
                player,
                PlayerCard {
                    id: CardId::new(next),
                    title: card_type.name().to_string(),
                    card_type,
                    power: Power::Fixed((i % 6) as i32),
                    effect: String::new(),
                    image: String::new(),
                },
            );
            next += 1;
        }
    }
    (env, players)
}

fn bench_score_environment(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_environment");

    for per_player in [2, 5, 10] {
        let (env, players) = crowded_environment(per_player);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_cards", per_player * 4)),
            &per_player,
            |b, _| b.iter(|| score_environment(black_box(&env), black_box(&players))),
        );
    }

    group.finish();
}

fn bench_process(c: &mut Criterion) {
    let mut engine = Engine::with_game_id("bench", GameConfig::new().with_seed(3));
    for id in ["p1", "p2", "p3", "p4"] {
        engine.add_player(id, id).unwrap();
    }
    for id in ["p1", "p2", "p3", "p4"] {
        engine.process(&Action::ready_up(id)).unwrap();
    }
    let card = engine.current_player().unwrap().hand[0].id;
    let environment = engine.state().environments[0].id();
    let prepare = Action::prepare_card("p1", card, environment);

    c.bench_function("snapshot", |b| b.iter(|| black_box(engine.snapshot())));

    c.bench_function("process_prepare", |b| {
        b.iter(|| {
            let mut game = engine.clone();
            black_box(game.process(black_box(&prepare)).unwrap())
        });
    });
}

criterion_group!(benches, bench_score_environment, bench_process);
criterion_main!(benches);
