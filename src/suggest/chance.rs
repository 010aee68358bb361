use crate::beliefs::spot::Status;
use crate::engine::engine::Engine;
use crate::game::domain::Domain;
use crate::game::player::Player;
use crate::game::value::Value;
use crate::Position;
use crate::Weight;

/// double-chance: the best pair of positions in one hand to chase a
/// single value through two consecutive guesses. the second guess
/// only happens if the first missed, so the combined odds are
/// q1 + (1 - q1) * q2 over the two best slots.
pub fn double(engine: &Engine, target: Player, value: Value) -> Option<(Position, Position, Weight)> {
    let mut odds = engine
        .beliefs()
        .row(target)
        .iter()
        .enumerate()
        .filter(|(_, s)| s.status() == Status::Hidden && s.domain().contains(value))
        .map(|(j, s)| (j, estimate(engine, target, s.domain(), value)))
        .collect::<Vec<_>>();
    odds.sort_by(|a, b| b.1.partial_cmp(&a.1).expect("odds are finite"));
    match odds.as_slice() {
        [(first, q1), (second, q2), ..] => Some((*first, *second, q1 + (1.0 - q1) * q2)),
        _ => None,
    }
}

/// share of the slot's weighted candidates belonging to one value
fn estimate(engine: &Engine, p: Player, domain: Domain, value: Value) -> Weight {
    let weigh = |v: Value| {
        (engine.tracker().uncertain(v) + engine.tracker().called(p, v)) as Weight
    };
    let total = domain.iter().map(weigh).sum::<Weight>();
    match total {
        t if t <= 0.0 => 0.0,
        t => weigh(value) / t,
    }
}
