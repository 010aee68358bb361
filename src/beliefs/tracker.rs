use super::spot::Status;
use crate::engine::error::Error;
use crate::game::deck::Deck;
use crate::game::player::Player;
use crate::game::value::Value;
use crate::Count;

/// global inventory per value. every copy in the deck is always in
/// exactly one bucket: revealed (public singleton), certain (deduced
/// singleton), called (floating, position unknown), or uncertain
/// (the remainder). audit() enforces the conservation law.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tracker {
    deck: Deck,
    revealed: Vec<Count>,
    certain: Vec<Count>,
    called: Vec<Vec<Count>>, // [player][value] floating copies
}

impl Tracker {
    pub fn new(deck: Deck, players: usize) -> Self {
        let k = deck.k();
        Self {
            deck,
            revealed: vec![0; k],
            certain: vec![0; k],
            called: vec![vec![0; k]; players],
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }
    pub fn revealed(&self, v: Value) -> Count {
        self.revealed[v.index()]
    }
    pub fn certain(&self, v: Value) -> Count {
        self.certain[v.index()]
    }
    /// floating copies claimed by one player
    pub fn called(&self, p: Player, v: Value) -> Count {
        self.called[p.index()][v.index()]
    }
    pub fn called_total(&self, v: Value) -> Count {
        self.called.iter().map(|row| row[v.index()]).sum()
    }
    /// located copies: position publicly or deductively known
    pub fn located(&self, v: Value) -> Count {
        self.revealed(v) + self.certain(v)
    }
    /// copies whose holder is still anyone's guess
    pub fn uncertain(&self, v: Value) -> Count {
        self.deck
            .copies(v)
            .saturating_sub(self.located(v) + self.called_total(v))
    }
    pub fn counts(&self, v: Value) -> (Count, Count, Count, Count) {
        (
            self.revealed(v),
            self.certain(v),
            self.called_total(v),
            self.uncertain(v),
        )
    }

    /// a wire at (p, _) became public. a copy previously deduced for
    /// that slot, or floating against the same player, is consumed.
    pub fn reveal(&mut self, p: Player, v: Value, prior: Status) {
        self.revealed[v.index()] += 1;
        match prior {
            Status::Certain => self.certain[v.index()] -= 1,
            Status::Revealed => panic!("double reveal of one slot"),
            Status::Hidden => {
                let floating = &mut self.called[p.index()][v.index()];
                *floating = floating.saturating_sub(1);
            }
        }
    }

    /// a domain collapsed to {v} in p's hand without a public reveal.
    /// a floating copy claimed by p is thereby located.
    pub fn certify(&mut self, p: Player, v: Value) {
        self.certain[v.index()] += 1;
        let floating = &mut self.called[p.index()][v.index()];
        *floating = floating.saturating_sub(1);
    }

    /// a failed call registers a floating copy against the caller,
    /// unless the caller already has a located copy of the value:
    /// the call is evidence of possession, and possession is already
    /// on the books.
    pub fn call(&mut self, p: Player, v: Value, located_in_hand: Count) {
        if located_in_hand == 0 {
            self.called[p.index()][v.index()] += 1;
        }
    }

    /// conservation: every bucket fits and the four sum to the deck
    pub fn audit(&self) -> Result<(), Error> {
        for v in self.deck.values() {
            let claimed = self.located(v) + self.called_total(v);
            if claimed > self.deck.copies(v) {
                return Err(Error::Counters { event: None, value: v });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> Tracker {
        Tracker::new(Deck::from(vec![2, 3, 3, 3, 1]), 3)
    }

    #[test]
    fn conservation_holds() {
        let mut t = tracker();
        let v = Value::from(1u8);
        t.reveal(Player::from(0), v, Status::Hidden);
        t.certify(Player::from(1), v);
        t.call(Player::from(2), v, 0);
        let (revealed, certain, called, uncertain) = t.counts(v);
        assert!(revealed == 1);
        assert!(certain == 1);
        assert!(called == 1);
        assert!(uncertain == 0);
        assert!(t.audit().is_ok());
    }

    #[test]
    fn floating_copy_consumed_by_reveal() {
        let mut t = tracker();
        let v = Value::from(2u8);
        t.call(Player::from(0), v, 0);
        assert!(t.called(Player::from(0), v) == 1);
        t.reveal(Player::from(0), v, Status::Hidden);
        assert!(t.called(Player::from(0), v) == 0);
    }

    #[test]
    fn located_caller_does_not_float() {
        let mut t = tracker();
        let v = Value::from(3u8);
        t.call(Player::from(0), v, 1);
        assert!(t.called(Player::from(0), v) == 0);
    }

    #[test]
    fn overdraw_fails_audit() {
        let mut t = tracker();
        let v = Value::from(4u8); // single copy
        t.reveal(Player::from(0), v, Status::Hidden);
        t.call(Player::from(1), v, 0);
        assert!(t.audit().is_err());
    }
}
