use super::deck::Deck;
use super::signature::Signature;
use super::value::Value;
use crate::Count;

/// a running resource vector, bounded element-wise by the Deck.
/// these are the alpha/beta states of the global reachability pass,
/// deduplicated through their base-(M+1) packed keys.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct Tally(Vec<Count>);

impl Tally {
    pub fn zero(k: usize) -> Self {
        Self(vec![0; k])
    }
    pub fn count(&self, v: Value) -> Count {
        self.0[v.index()]
    }
    /// element-wise accumulation of one hand's signature
    pub fn plus(&self, signature: &Signature) -> Self {
        Self(
            self.0
                .iter()
                .zip(signature.counts())
                .map(|(&a, &b)| a + b)
                .collect(),
        )
    }
    /// element-wise difference, None when any coordinate would go negative
    pub fn minus(&self, other: &Self) -> Option<Self> {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(&a, &b)| a.checked_sub(b))
            .collect::<Option<Vec<Count>>>()
            .map(Self)
    }
    pub fn fits(&self, deck: &Deck) -> bool {
        deck.values().all(|v| self.count(v) <= deck.copies(v))
    }
    /// element-wise bounded by another vector
    pub fn within(&self, bound: &Self) -> bool {
        self.0.iter().zip(bound.0.iter()).all(|(&a, &b)| a <= b)
    }
    /// canonical base-(M+1) integer; injective while base^K fits a u64,
    /// which Config::validate guarantees before the solver ever runs
    pub fn pack(&self, base: u64) -> u64 {
        self.0
            .iter()
            .rev()
            .fold(0u64, |acc, &c| acc * base + c as u64)
    }
}

impl From<Vec<Count>> for Tally {
    fn from(counts: Vec<Count>) -> Self {
        Self(counts)
    }
}
impl From<&Signature> for Tally {
    fn from(signature: &Signature) -> Self {
        Self(signature.counts().copied().collect())
    }
}

impl std::fmt::Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}]",
            self.0
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        )
    }
}
