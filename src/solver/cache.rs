use super::variants::Variants;
use crate::beliefs::beliefs::Beliefs;
use crate::beliefs::signal::Multiplicity;
use crate::beliefs::signal::Relation;
use crate::beliefs::tracker::Tracker;
use crate::game::player::Player;
use crate::game::value::Value;
use crate::Count;
use crate::Position;
use std::collections::HashMap;
use std::sync::Arc;

/// the exact constraint state one enumeration ran under. two equal
/// keys enumerate identical hand sets, so a hit is always safe to
/// reuse; the caps row folds in the located copies of every other
/// hand, which is what goes stale when the rest of the table moves.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct Key {
    player: usize,
    domains: Vec<u64>,
    pins: Vec<(Position, Multiplicity)>,
    links: Vec<(Position, Relation)>,
    absent: u64,
    called: Vec<Count>,
    caps: Vec<Count>,
}

impl Key {
    pub fn of(p: Player, beliefs: &Beliefs, tracker: &Tracker) -> Self {
        let values = || (0..beliefs.k()).map(Value::from);
        Self {
            player: p.index(),
            domains: beliefs.row(p).iter().map(|s| s.domain().into()).collect(),
            pins: beliefs.pins(p).to_vec(),
            links: beliefs.links(p).to_vec(),
            absent: beliefs.absent(p).into(),
            called: values().map(|v| tracker.called(p, v)).collect(),
            caps: values()
                .map(|v| {
                    tracker.deck().copies(v) - (tracker.located(v) - beliefs.located(p, v))
                })
                .collect(),
        }
    }
    pub fn player(&self) -> Player {
        Player::from(self.player)
    }
    pub fn caps(&self) -> &[Count] {
        &self.caps
    }
    pub fn called(&self) -> &[Count] {
        &self.called
    }
}

/// memo of per-player enumerations. purging a player is hygiene, not
/// correctness: keys carry the whole constraint state, so a stale
/// entry can never be mistaken for a live one.
#[derive(Debug, Clone, Default)]
pub struct Cache(HashMap<Key, Arc<Variants>>);

impl Cache {
    pub fn get(&self, key: &Key) -> Option<Arc<Variants>> {
        self.0.get(key).cloned()
    }
    pub fn put(&mut self, key: Key, variants: Arc<Variants>) {
        self.0.insert(key, variants);
    }
    pub fn purge(&mut self, p: Player) {
        self.0.retain(|key, _| key.player != p.index());
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
