use bombbuster::beliefs::call::Call;
use bombbuster::engine::config::Config;
use bombbuster::engine::engine::Engine;
use bombbuster::engine::event::Event;
use bombbuster::filters;
use bombbuster::game::player::Player;
use bombbuster::game::value::Value;
use bombbuster::solver;
use bombbuster::solver::cache::Cache;

criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        settling_local_fixpoint,
        enumerating_hand_variants,
        solving_global_reachability,
        applying_one_event,
}

/// a mid-game demo table with a reveal and a floating call on the books
fn mid_game() -> Engine {
    let mut engine = Engine::new(Config {
        global: false,
        ..Config::demo()
    })
    .unwrap();
    engine
        .apply(Event::Call(Call {
            caller: Player::from(0),
            target: Player::from(2),
            position: 0,
            value: Value::from(1u8),
            hit: true,
            shown: Some(1),
        }))
        .unwrap();
    engine
        .apply(Event::Call(Call {
            caller: Player::from(1),
            target: Player::from(0),
            position: 3,
            value: Value::from(2u8),
            hit: false,
            shown: None,
        }))
        .unwrap();
    engine
}

fn settling_local_fixpoint(c: &mut criterion::Criterion) {
    c.bench_function("settle the local filters on a mid-game table", |b| {
        let engine = mid_game();
        let config = engine.config().clone();
        b.iter(|| {
            let mut beliefs = engine.beliefs().clone();
            let mut tracker = engine.tracker().clone();
            beliefs.soil_all();
            filters::fixpoint(&mut beliefs, &mut tracker, &config).unwrap()
        })
    });
}

fn enumerating_hand_variants(c: &mut criterion::Criterion) {
    c.bench_function("enumerate one player's hands from scratch", |b| {
        let engine = mid_game();
        b.iter(|| {
            let mut cache = Cache::default();
            solver::solve(
                engine.beliefs(),
                engine.tracker(),
                engine.config(),
                &mut cache,
            )
            .unwrap()
        })
    });
}

fn solving_global_reachability(c: &mut criterion::Criterion) {
    c.bench_function("solve global reachability with a warm cache", |b| {
        let engine = mid_game();
        let mut cache = Cache::default();
        solver::solve(
            engine.beliefs(),
            engine.tracker(),
            engine.config(),
            &mut cache,
        )
        .unwrap();
        b.iter(|| {
            solver::solve(
                engine.beliefs(),
                engine.tracker(),
                engine.config(),
                &mut cache,
            )
            .unwrap()
        })
    });
}

fn applying_one_event(c: &mut criterion::Criterion) {
    c.bench_function("apply one event through the full pipeline", |b| {
        b.iter(|| {
            let mut engine = mid_game();
            engine
                .apply(Event::Certain {
                    player: Player::from(1),
                    position: 3,
                    value: Value::from(4u8),
                })
                .unwrap();
            engine
        })
    });
}
