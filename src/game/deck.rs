use super::tally::Tally;
use super::value::Value;
use crate::Count;

/// Deck is the public multiset of wire copies per value,
/// fixed at game start. K values, M = sum of copies wires total.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Deck(Vec<Count>);

impl Deck {
    pub fn k(&self) -> usize {
        self.0.len()
    }
    pub fn m(&self) -> usize {
        self.0.iter().map(|&c| c as usize).sum()
    }
    pub fn copies(&self, v: Value) -> Count {
        self.0[v.index()]
    }
    pub fn values(&self) -> impl Iterator<Item = Value> {
        (0..self.k()).map(Value::from)
    }
    /// radix for packing resource vectors into u64 keys
    pub fn base(&self) -> u64 {
        self.m() as u64 + 1
    }
    /// the full resource vector R
    pub fn tally(&self) -> Tally {
        Tally::from(self.0.clone())
    }
}

impl From<Vec<Count>> for Deck {
    fn from(copies: Vec<Count>) -> Self {
        Self(copies)
    }
}

impl std::fmt::Display for Deck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for v in self.values() {
            write!(f, "{}x{} ", v, self.copies(v))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals() {
        let deck = Deck::from(vec![2, 3, 3, 3, 1]);
        assert!(deck.k() == 5);
        assert!(deck.m() == 12);
        assert!(deck.base() == 13);
        assert!(deck.copies(Value::from(4u8)) == 1);
    }
}
