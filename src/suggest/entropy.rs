use crate::beliefs::spot::Status;
use crate::beliefs::tracker::Tracker;
use crate::engine::engine::Engine;
use crate::game::domain::Domain;
use crate::game::player::Player;
use crate::Entropy;
use crate::Position;

/// copy-weighted Shannon entropy of one slot: how much there is left
/// to learn about it. values are weighted by the copies that could
/// still land there from the table's point of view.
pub fn entropy(domain: Domain, tracker: &Tracker, p: Player) -> Entropy {
    let weights = domain
        .iter()
        .map(|v| (tracker.uncertain(v) + tracker.called(p, v)) as Entropy)
        .collect::<Vec<_>>();
    let total = weights.iter().sum::<Entropy>();
    match total {
        t if t <= 0.0 => 0.0,
        t => weights
            .iter()
            .filter(|&&w| w > 0.0)
            .map(|&w| w / t)
            .map(|q| -q * q.log2())
            .sum(),
    }
}

/// hidden slots ranked most uncertain first
pub fn ranked(engine: &Engine) -> Vec<(Player, Position, Entropy)> {
    let mut slots = engine
        .beliefs()
        .players()
        .flat_map(|p| {
            engine
                .beliefs()
                .row(p)
                .iter()
                .enumerate()
                .filter(|(_, s)| s.status() == Status::Hidden)
                .map(|(j, s)| (p, j, entropy(s.domain(), engine.tracker(), p)))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    slots.sort_by(|a, b| b.2.partial_cmp(&a.2).expect("entropy is finite"));
    slots
}
