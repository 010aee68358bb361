use super::error::Error;
use crate::game::deck::Deck;
use crate::Count;

/// whether events are trusted against known hands. around a real
/// table the operator can mishear a call, so consistency policies
/// loosen up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Mode {
    Simulation,
    Irl,
}

/// immutable game parameters, loaded once. players by hand size must
/// exactly exhaust the deck.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Config {
    pub players: usize,
    pub hand: usize,
    pub copies: Vec<Count>,
    /// failed calls before the game is lost
    pub strikes: usize,
    pub mode: Mode,
    /// run the global reachability pass after local filtering
    pub global: bool,
    /// wall-clock allowance for one global solve, 0 for unbounded
    pub budget_ms: u64,
    /// hidden-subset enumeration depth
    pub subset_depth: usize,
    /// chain-forcing pass switch
    pub chains: bool,
}

impl Config {
    pub fn k(&self) -> usize {
        self.copies.len()
    }
    pub fn m(&self) -> usize {
        self.copies.iter().map(|&c| c as usize).sum()
    }
    pub fn deck(&self) -> Deck {
        Deck::from(self.copies.clone())
    }

    /// the three-player table the examples and tests play on
    pub fn demo() -> Self {
        Self {
            players: 3,
            hand: 4,
            copies: vec![2, 3, 3, 3, 1],
            strikes: 3,
            mode: Mode::Simulation,
            global: true,
            budget_ms: crate::SOLVER_BUDGET_MS,
            subset_depth: crate::SUBSET_DEPTH,
            chains: true,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.players == 0 {
            return Err(Error::InvalidConfig("no players".into()));
        }
        if self.hand == 0 || self.hand > 64 {
            return Err(Error::InvalidConfig("hand size out of range".into()));
        }
        if self.k() == 0 || self.k() > crate::MAX_VALUES {
            return Err(Error::InvalidConfig("value set out of range".into()));
        }
        if self.players * self.hand != self.m() {
            return Err(Error::InvalidConfig(
                "deck does not deal out evenly".into(),
            ));
        }
        if self.strikes == 0 {
            return Err(Error::InvalidConfig("no strikes to give".into()));
        }
        if self.subset_depth == 0 {
            return Err(Error::InvalidConfig("subset depth must be positive".into()));
        }
        if self.global && !self.packable() {
            return Err(Error::InvalidConfig(
                "deck too large to pack resource vectors".into(),
            ));
        }
        Ok(())
    }

    /// base-(M+1) packing of length-K vectors must fit a u64
    fn packable(&self) -> bool {
        let base = self.m() as u64 + 1;
        (0..self.k()).try_fold(1u64, |acc, _| acc.checked_mul(base)).is_some()
    }
}
