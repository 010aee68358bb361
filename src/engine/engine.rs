use super::config::Config;
use super::config::Mode;
use super::error::Error;
use super::event::Event;
use super::event::Swap;
use super::journal::Journal;
use crate::beliefs::beliefs::Beliefs;
use crate::beliefs::call::Call;
use crate::beliefs::spot::Status;
use crate::beliefs::tracker::Tracker;
use crate::filters;
use crate::filters::Patch;
use crate::game::domain::Domain;
use crate::game::hand::Hand;
use crate::game::player::Player;
use crate::game::value::Value;
use crate::solver;
use crate::solver::cache::Cache;
use crate::Count;
use crate::Position;

/// the orchestrator. events come in one at a time; each one mutates
/// the stores, local filters run to a fixed point, the global solver
/// (when enabled) prunes across hands, and local filters run once
/// more. contradictions freeze the engine where it broke; there is
/// no rollback, the caller replays the journal instead.
#[derive(Debug, Clone)]
pub struct Engine {
    config: Config,
    beliefs: Beliefs,
    tracker: Tracker,
    journal: Journal,
    cache: Cache,
    /// hands as they were privately dealt; replay re-seats these
    dealt: Vec<Option<Hand>>,
    /// hands as they currently stand, tracked through swaps
    known: Vec<Option<Hand>>,
    strikes: usize,
}

impl Engine {
    pub fn new(config: Config) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            beliefs: Beliefs::new(config.players, config.hand, config.k()),
            tracker: Tracker::new(config.deck(), config.players),
            journal: Journal::default(),
            cache: Cache::default(),
            dealt: vec![None; config.players],
            known: vec![None; config.players],
            strikes: 0,
            config,
        })
    }

    /// privately seat a concrete hand: its slots become certain from
    /// the start and sharpen inference about everyone else
    pub fn with_hand(mut self, p: Player, hand: Hand) -> Result<Self, Error> {
        self.seat(p, hand)?;
        Ok(self)
    }

    pub fn seat(&mut self, p: Player, hand: Hand) -> Result<(), Error> {
        if !self.journal.is_empty() {
            return Err(Error::InvalidConfig(
                "hands are seated before any event".into(),
            ));
        }
        if hand.len() != self.config.hand {
            return Err(Error::InvalidConfig("hand length mismatch".into()));
        }
        for (j, &v) in hand.iter().enumerate() {
            if v.index() >= self.config.k() {
                return Err(Error::InvalidConfig("wire value out of range".into()));
            }
            if !self.beliefs.domain(p, j).contains(v) {
                return Err(Error::Empty {
                    event: None,
                    player: p,
                    position: j,
                });
            }
            if self.beliefs.status(p, j) == Status::Hidden {
                self.beliefs.set(p, j, Domain::singleton(v));
                self.beliefs.certify(p, j);
                self.tracker.certify(p, v);
            }
        }
        self.dealt[p.index()] = Some(hand.clone());
        self.known[p.index()] = Some(hand);
        self.cache.purge(p);
        self.tracker.audit()?;
        self.settle()
    }

    /// apply one public event: vet, journal, mutate, propagate
    pub fn apply(&mut self, event: Event) -> Result<(), Error> {
        self.vet(&event)?;
        let id = self.journal.len();
        log::debug!("event {:>3}: {}", id, event);
        self.journal.push(event);
        self.mutate(&event).map_err(|e| e.tag(id))?;
        self.settle().map_err(|e| e.tag(id))
    }

    /// local fixed point, then global pruning, then local again.
    /// counters are audited between phases so an overdraw surfaces as
    /// a contradiction before anything computes on top of it.
    fn settle(&mut self) -> Result<(), Error> {
        self.tracker.audit()?;
        filters::fixpoint(&mut self.beliefs, &mut self.tracker, &self.config)?;
        self.tracker.audit()?;
        if self.config.global {
            let patches =
                solver::solve(&self.beliefs, &self.tracker, &self.config, &mut self.cache)?;
            if filters::apply(&mut self.beliefs, &mut self.tracker, patches)? {
                filters::fixpoint(&mut self.beliefs, &mut self.tracker, &self.config)?;
            }
        }
        self.tracker.audit()
    }

    /// re-run the full pipeline over the current state
    pub fn refresh(&mut self) -> Result<(), Error> {
        self.beliefs.soil_all();
        self.settle()
    }

    // event vetting: invalid events are rejected before anything mutates

    fn vet(&self, event: &Event) -> Result<(), Error> {
        match *event {
            Event::Call(call) => self.vet_call(&call),
            Event::DoubleReveal {
                player,
                value,
                first,
                second,
            } => {
                self.vet_slot(player, first)?;
                self.vet_slot(player, second)?;
                self.vet_value(value)?;
                if first == second {
                    return Err(Error::InvalidEvent("double reveal of one position".into()));
                }
                if self.beliefs.status(player, first) == Status::Revealed
                    || self.beliefs.status(player, second) == Status::Revealed
                {
                    return Err(Error::InvalidEvent("wire already revealed".into()));
                }
                self.vet_truth(player, &[first, second], value)
            }
            Event::Swap(swap) => self.vet_swap(&swap),
            Event::Certain {
                player,
                position,
                value,
            } => {
                self.vet_slot(player, position)?;
                self.vet_value(value)?;
                if self.beliefs.status(player, position) == Status::Revealed {
                    return Err(Error::InvalidEvent("wire already revealed".into()));
                }
                self.vet_truth(player, &[position], value)
            }
            Event::Absent { player, value } => {
                self.vet_player(player)?;
                self.vet_value(value)?;
                match (self.config.mode, self.hand(player)) {
                    (Mode::Simulation, Some(hand)) if hand.holds(value) => Err(
                        Error::InvalidEvent("announced a value the hand holds".into()),
                    ),
                    _ => Ok(()),
                }
            }
            Event::Pin {
                player,
                position,
                class,
            } => {
                self.vet_slot(player, position)?;
                match (self.config.mode, self.hand(player)) {
                    (Mode::Simulation, Some(hand))
                        if self.tracker.deck().copies(hand.wire(position)) != class.copies() =>
                    {
                        Err(Error::InvalidEvent("signaled the wrong copy count".into()))
                    }
                    _ => Ok(()),
                }
            }
            Event::Link {
                player,
                position,
                relation,
            } => {
                self.vet_slot(player, position)?;
                self.vet_slot(player, position + 1)?;
                if let Some(prior) = self.beliefs.link(player, position) {
                    if prior != relation {
                        return Err(Error::InvalidEvent("contradictory adjacency signals".into()));
                    }
                }
                match (self.config.mode, self.hand(player)) {
                    (Mode::Simulation, Some(hand)) => {
                        let same = hand.wire(position) == hand.wire(position + 1);
                        match (same, relation) {
                            (true, crate::beliefs::signal::Relation::Differ)
                            | (false, crate::beliefs::signal::Relation::Same) => Err(
                                Error::InvalidEvent("signaled the wrong adjacency".into()),
                            ),
                            _ => Ok(()),
                        }
                    }
                    _ => Ok(()),
                }
            }
        }
    }

    fn vet_call(&self, call: &Call) -> Result<(), Error> {
        self.vet_slot(call.target, call.position)?;
        self.vet_player(call.caller)?;
        self.vet_value(call.value)?;
        if call.caller == call.target {
            return Err(Error::InvalidEvent("called their own hand".into()));
        }
        match (call.hit, call.shown) {
            (true, None) => {
                return Err(Error::InvalidEvent("hit without a shown position".into()));
            }
            (false, Some(_)) => {
                return Err(Error::InvalidEvent("miss with a shown position".into()));
            }
            (true, Some(j)) => self.vet_slot(call.caller, j)?,
            (false, None) => {}
        }
        if self.beliefs.status(call.target, call.position) == Status::Revealed {
            return Err(Error::InvalidEvent("called a revealed wire".into()));
        }
        if let Some(j) = call.shown {
            if self.beliefs.status(call.caller, j) == Status::Revealed {
                return Err(Error::InvalidEvent("shown wire already revealed".into()));
            }
        }
        if self.config.mode == Mode::Simulation {
            if let Some(hand) = self.hand(call.caller) {
                if !hand.holds(call.value) {
                    return Err(Error::InvalidEvent(
                        "called a value the caller does not hold".into(),
                    ));
                }
            }
            if let Some(hand) = self.hand(call.target) {
                if (hand.wire(call.position) == call.value) != call.hit {
                    return Err(Error::InvalidEvent(
                        "call outcome contradicts the hand".into(),
                    ));
                }
            }
            if let (Some(j), Some(hand)) = (call.shown, self.hand(call.caller)) {
                if hand.wire(j) != call.value {
                    return Err(Error::InvalidEvent("shown position does not match".into()));
                }
            }
        }
        Ok(())
    }

    fn vet_swap(&self, swap: &Swap) -> Result<(), Error> {
        self.vet_slot(swap.left, swap.from_left)?;
        self.vet_slot(swap.left, swap.to_left)?;
        self.vet_slot(swap.right, swap.from_right)?;
        self.vet_slot(swap.right, swap.to_right)?;
        self.vet_value(swap.wire_left)?;
        self.vet_value(swap.wire_right)?;
        if swap.left == swap.right {
            return Err(Error::InvalidEvent("swapped with themselves".into()));
        }
        if self.config.mode == Mode::Simulation {
            if let Some(hand) = self.hand(swap.left) {
                if hand.wire(swap.from_left) != swap.wire_left {
                    return Err(Error::InvalidEvent("swap values contradict the hand".into()));
                }
            }
            if let Some(hand) = self.hand(swap.right) {
                if hand.wire(swap.from_right) != swap.wire_right {
                    return Err(Error::InvalidEvent("swap values contradict the hand".into()));
                }
            }
        }
        Ok(())
    }

    /// simulation-mode truth check against a privately known hand
    fn vet_truth(&self, p: Player, positions: &[Position], v: Value) -> Result<(), Error> {
        match (self.config.mode, self.hand(p)) {
            (Mode::Simulation, Some(hand)) => {
                match positions.iter().all(|&j| hand.wire(j) == v) {
                    true => Ok(()),
                    false => Err(Error::InvalidEvent("signal contradicts the hand".into())),
                }
            }
            _ => Ok(()),
        }
    }

    fn vet_player(&self, p: Player) -> Result<(), Error> {
        match p.index() < self.config.players {
            true => Ok(()),
            false => Err(Error::InvalidEvent("unknown player".into())),
        }
    }
    fn vet_slot(&self, p: Player, j: Position) -> Result<(), Error> {
        self.vet_player(p)?;
        match j < self.config.hand {
            true => Ok(()),
            false => Err(Error::InvalidEvent("position out of range".into())),
        }
    }
    fn vet_value(&self, v: Value) -> Result<(), Error> {
        match v.index() < self.config.k() {
            true => Ok(()),
            false => Err(Error::InvalidEvent("unknown value".into())),
        }
    }

    // event semantics

    fn mutate(&mut self, event: &Event) -> Result<(), Error> {
        match *event {
            Event::Call(call) if call.hit => {
                self.cache.purge(call.caller);
                self.cache.purge(call.target);
                self.beliefs.record_call(call);
                self.expose(call.target, call.position, call.value)?;
                self.expose(call.caller, call.shown.expect("vetted"), call.value)
            }
            Event::Call(call) => {
                self.cache.purge(call.caller);
                self.cache.purge(call.target);
                self.beliefs.record_call(call);
                self.tracker.call(
                    call.caller,
                    call.value,
                    self.beliefs.located(call.caller, call.value),
                );
                self.strikes += 1;
                let survivors = self
                    .beliefs
                    .domain(call.target, call.position)
                    .without(call.value);
                self.shrink(call.target, call.position, survivors)
            }
            Event::DoubleReveal {
                player,
                value,
                first,
                second,
            } => {
                self.cache.purge(player);
                self.expose(player, first, value)?;
                self.expose(player, second, value)
            }
            Event::Swap(swap) => {
                self.cache.purge(swap.left);
                self.cache.purge(swap.right);
                self.beliefs.swap(
                    (swap.left, swap.from_left, swap.to_left),
                    (swap.right, swap.from_right, swap.to_right),
                );
                self.learn(swap.left, swap.to_left, swap.wire_left, swap.wire_right)?;
                self.learn(swap.right, swap.to_right, swap.wire_right, swap.wire_left)
            }
            Event::Certain {
                player,
                position,
                value,
            } => {
                self.cache.purge(player);
                self.expose(player, position, value)
            }
            Event::Absent { player, value } => {
                self.cache.purge(player);
                self.beliefs.record_absent(player, value);
                let patches = self
                    .beliefs
                    .row(player)
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| s.domain().contains(value))
                    .map(|(j, s)| Patch {
                        player,
                        position: j,
                        domain: s.domain().without(value),
                    })
                    .collect::<Vec<_>>();
                filters::apply(&mut self.beliefs, &mut self.tracker, patches).map(|_| ())
            }
            Event::Pin {
                player,
                position,
                class,
            } => {
                self.cache.purge(player);
                self.beliefs.record_pin(player, position, class);
                let mask = self
                    .tracker
                    .deck()
                    .values()
                    .filter(|&v| self.tracker.deck().copies(v) == class.copies())
                    .collect::<Vec<_>>();
                let survivors = self.beliefs.domain(player, position) & Domain::from(mask);
                self.shrink(player, position, survivors)
            }
            Event::Link {
                player,
                position,
                relation,
            } => {
                self.cache.purge(player);
                self.beliefs.record_link(player, position, relation);
                Ok(())
            }
        }
    }

    /// a wire became public knowledge
    fn expose(&mut self, p: Player, j: Position, v: Value) -> Result<(), Error> {
        if !self.beliefs.domain(p, j).contains(v) {
            return Err(Error::Empty {
                event: None,
                player: p,
                position: j,
            });
        }
        let prior = self.beliefs.status(p, j);
        self.beliefs.reveal(p, j, v);
        self.tracker.reveal(p, v, prior);
        Ok(())
    }

    /// one slot loses values; certification rides on patch application
    fn shrink(&mut self, p: Player, j: Position, domain: Domain) -> Result<(), Error> {
        let patch = Patch {
            player: p,
            position: j,
            domain,
        };
        filters::apply(&mut self.beliefs, &mut self.tracker, vec![patch]).map(|_| ())
    }

    /// a swap recipient with a privately known hand sees the wire
    /// they were handed
    fn learn(
        &mut self,
        p: Player,
        j: Position,
        outgoing: Value,
        incoming: Value,
    ) -> Result<(), Error> {
        if self.known[p.index()].is_none() {
            return Ok(());
        }
        if let Some(hand) = self.known[p.index()].as_mut() {
            if hand.trade(outgoing, incoming).is_none() {
                return Err(Error::InvalidEvent(
                    "swap values contradict the tracked hand".into(),
                ));
            }
        }
        if !self.beliefs.domain(p, j).contains(incoming) {
            return Err(Error::Empty {
                event: None,
                player: p,
                position: j,
            });
        }
        if self.beliefs.status(p, j) == Status::Hidden {
            self.beliefs.set(p, j, Domain::singleton(incoming));
            self.beliefs.certify(p, j);
            self.tracker.certify(p, incoming);
        }
        Ok(())
    }

    // queries

    pub fn domain(&self, p: Player, j: Position) -> Domain {
        self.beliefs.domain(p, j)
    }
    pub fn certainties(&self) -> Vec<(Player, Position, Value)> {
        self.beliefs.certainties()
    }
    pub fn counts(&self, v: Value) -> (Count, Count, Count, Count) {
        self.tracker.counts(v)
    }
    pub fn is_won(&self) -> bool {
        self.beliefs.is_solved()
    }
    pub fn is_lost(&self) -> bool {
        self.strikes >= self.config.strikes
    }
    pub fn strikes(&self) -> usize {
        self.strikes
    }
    pub fn config(&self) -> &Config {
        &self.config
    }
    pub fn journal(&self) -> &Journal {
        &self.journal
    }
    pub fn beliefs(&self) -> &Beliefs {
        &self.beliefs
    }
    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }
    pub fn hand(&self, p: Player) -> Option<&Hand> {
        self.known[p.index()].as_ref()
    }
    pub fn hands(&self) -> &[Option<Hand>] {
        &self.known
    }
    pub fn dealt(&self) -> &[Option<Hand>] {
        &self.dealt
    }

    /// rebuild bit-exactly from config, private hands, and the journal
    pub fn replay(
        config: Config,
        hands: &[Option<Hand>],
        journal: &Journal,
    ) -> Result<Self, Error> {
        let mut engine = Self::new(config)?;
        for (i, hand) in hands.iter().enumerate() {
            if let Some(hand) = hand {
                engine.seat(Player::from(i), hand.clone())?;
            }
        }
        for event in journal.iter() {
            engine.apply(*event)?;
        }
        Ok(engine)
    }
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for p in self.beliefs.players() {
            write!(f, "{} ", p)?;
            for spot in self.beliefs.row(p) {
                write!(f, "{}{:<12} ", spot.status(), spot.domain().to_string())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
