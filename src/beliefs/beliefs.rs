use super::call::Call;
use super::signal::Multiplicity;
use super::signal::Relation;
use super::spot::Spot;
use super::spot::Status;
use crate::game::domain::Domain;
use crate::game::player::Player;
use crate::game::value::Value;
use crate::Count;
use crate::Position;

/// per-(player, position) candidate sets plus the public annotations
/// hanging off each player: call history, announced-absent values,
/// copy-count pins, adjacency links. mutators only ever shrink
/// domains; reveals collapse them. per-player dirty masks let the
/// filter loop skip hands nothing touched.
#[derive(Debug, Clone, PartialEq)]
pub struct Beliefs {
    k: usize,
    spots: Vec<Vec<Spot>>,
    dirty: Vec<u64>,
    calls: Vec<Call>,
    absent: Vec<Domain>,
    pins: Vec<Vec<(Position, Multiplicity)>>,
    links: Vec<Vec<(Position, Relation)>>,
}

impl Beliefs {
    pub fn new(players: usize, length: usize, k: usize) -> Self {
        assert!(length <= 64, "dirty masks are u64");
        Self {
            k,
            spots: vec![vec![Spot::new(Domain::full(k)); length]; players],
            dirty: vec![u64::MAX; players],
            calls: Vec::new(),
            absent: vec![Domain::empty(); players],
            pins: vec![Vec::new(); players],
            links: vec![Vec::new(); players],
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }
    pub fn players(&self) -> impl Iterator<Item = Player> {
        (0..self.spots.len()).map(Player::from)
    }
    pub fn length(&self) -> usize {
        self.spots[0].len()
    }
    pub fn row(&self, p: Player) -> &[Spot] {
        &self.spots[p.index()]
    }
    pub fn domain(&self, p: Player, j: Position) -> Domain {
        self.spots[p.index()][j].domain()
    }
    pub fn status(&self, p: Player, j: Position) -> Status {
        self.spots[p.index()][j].status()
    }

    /// shrink one slot. the caller (patch application, event
    /// mutation) is responsible for catching emptiness.
    pub fn set(&mut self, p: Player, j: Position, domain: Domain) {
        debug_assert!(domain.is_subset(&self.domain(p, j)));
        self.spots[p.index()][j].shrink(domain);
        self.soil(p, j);
    }

    pub fn reveal(&mut self, p: Player, j: Position, v: Value) {
        self.spots[p.index()][j].expose(v);
        self.soil_all();
    }

    pub fn certify(&mut self, p: Player, j: Position) {
        self.spots[p.index()][j].certify();
        self.soil_all();
    }

    /// exchange two wires between hands: each slot leaves its row and
    /// the incoming spot lands where the re-sorted hand put it, per
    /// the observed final positions.
    pub fn swap(
        &mut self,
        left: (Player, Position, Position),
        right: (Player, Position, Position),
    ) {
        let (a, from_a, to_a) = left;
        let (b, from_b, to_b) = right;
        let out_a = self.spots[a.index()].remove(from_a);
        let out_b = self.spots[b.index()].remove(from_b);
        self.spots[a.index()].insert(to_a, out_b);
        self.spots[b.index()].insert(to_b, out_a);
        self.soil_player(a);
        self.soil_player(b);
    }

    pub fn record_call(&mut self, call: Call) {
        self.calls.push(call);
        match call.hit {
            true => {
                self.soil_player(call.caller);
                self.soil_player(call.target);
            }
            // a miss floats a copy against the caller, shifting the
            // global uncertain count every other hand's filters read
            false => self.soil_all(),
        }
    }
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn record_absent(&mut self, p: Player, v: Value) {
        self.absent[p.index()] = self.absent[p.index()].with(v);
        self.soil_player(p);
    }
    pub fn absent(&self, p: Player) -> Domain {
        self.absent[p.index()]
    }

    pub fn record_pin(&mut self, p: Player, j: Position, class: Multiplicity) {
        self.pins[p.index()].push((j, class));
        self.soil_player(p);
    }
    pub fn pins(&self, p: Player) -> &[(Position, Multiplicity)] {
        &self.pins[p.index()]
    }

    pub fn record_link(&mut self, p: Player, j: Position, relation: Relation) {
        if !self.links[p.index()].contains(&(j, relation)) {
            self.links[p.index()].push((j, relation));
        }
        self.soil_player(p);
    }
    pub fn links(&self, p: Player) -> &[(Position, Relation)] {
        &self.links[p.index()]
    }
    /// announced relation between j and j+1, if any
    pub fn link(&self, p: Player, j: Position) -> Option<Relation> {
        self.links[p.index()]
            .iter()
            .find(|(i, _)| *i == j)
            .map(|(_, r)| *r)
    }

    // dirty bookkeeping

    pub fn soil(&mut self, p: Player, j: Position) {
        self.dirty[p.index()] |= 1u64 << j;
    }
    pub fn soil_player(&mut self, p: Player) {
        self.dirty[p.index()] = u64::MAX;
    }
    pub fn soil_all(&mut self) {
        self.dirty.iter_mut().for_each(|d| *d = u64::MAX);
    }
    pub fn is_dirty(&self, p: Player) -> bool {
        self.dirty[p.index()] != 0
    }
    pub fn any_dirty(&self) -> bool {
        self.dirty.iter().any(|&d| d != 0)
    }
    pub fn rinse(&mut self) {
        self.dirty.iter_mut().for_each(|d| *d = 0);
    }

    // derived views

    /// located copies of v in p's hand: singleton {v} slots
    pub fn located(&self, p: Player, v: Value) -> Count {
        self.row(p).iter().filter(|s| s.pins(v)).count() as Count
    }
    /// positions of located copies of v in p's hand
    pub fn anchors(&self, p: Player, v: Value) -> Vec<Position> {
        self.row(p)
            .iter()
            .enumerate()
            .filter(|(_, s)| s.pins(v))
            .map(|(j, _)| j)
            .collect()
    }
    /// every collapsed slot in play
    pub fn certainties(&self) -> Vec<(Player, Position, Value)> {
        self.players()
            .flat_map(|p| {
                self.row(p)
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| s.domain().is_singleton())
                    .map(|(j, s)| (p, j, s.domain().only()))
                    .collect::<Vec<_>>()
            })
            .collect()
    }
    pub fn is_solved(&self) -> bool {
        self.players()
            .all(|p| self.row(p).iter().all(|s| s.domain().is_singleton()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_full_and_dirty() {
        let b = Beliefs::new(3, 4, 5);
        assert!(b.domain(Player::from(0), 0) == Domain::full(5));
        assert!(b.any_dirty());
    }

    #[test]
    fn rinse_then_soil() {
        let mut b = Beliefs::new(2, 4, 5);
        b.rinse();
        assert!(!b.any_dirty());
        b.set(Player::from(1), 2, Domain::full(5).without(Value::from(0u8)));
        assert!(b.is_dirty(Player::from(1)));
        assert!(!b.is_dirty(Player::from(0)));
    }

    #[test]
    fn a_miss_dirties_every_hand() {
        let mut b = Beliefs::new(3, 4, 5);
        b.rinse();
        b.record_call(Call {
            caller: Player::from(0),
            target: Player::from(1),
            position: 0,
            value: Value::from(4u8),
            hit: false,
            shown: None,
        });
        assert!(b.is_dirty(Player::from(2)));
    }

    #[test]
    fn swap_exchanges_spots() {
        let mut b = Beliefs::new(2, 3, 5);
        let narrow = Domain::from(vec![Value::from(1u8), Value::from(2u8)]);
        b.set(Player::from(0), 1, narrow);
        b.swap((Player::from(0), 1, 0), (Player::from(1), 2, 2));
        assert!(b.domain(Player::from(1), 2) == narrow);
        assert!(b.row(Player::from(0)).len() == 3);
        assert!(b.row(Player::from(1)).len() == 3);
    }

    #[test]
    fn anchors_track_singletons() {
        let mut b = Beliefs::new(1, 4, 5);
        let p = Player::from(0);
        b.reveal(p, 1, Value::from(2u8));
        b.reveal(p, 2, Value::from(2u8));
        assert!(b.anchors(p, Value::from(2u8)) == vec![1, 2]);
        assert!(b.located(p, Value::from(2u8)) == 2);
    }
}
