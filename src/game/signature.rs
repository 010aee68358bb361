use super::value::Value;
use crate::Count;

/// the Parikh vector of a hand: per-value copy counts summing to
/// the hand size. many hands share one signature, which is what
/// makes the global reachability pass tractable.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct Signature(Vec<Count>);

impl Signature {
    pub fn zero(k: usize) -> Self {
        Self(vec![0; k])
    }
    pub fn count(&self, v: Value) -> Count {
        self.0[v.index()]
    }
    pub fn bump(&mut self, v: Value) {
        self.0[v.index()] += 1;
    }
    pub fn drop(&mut self, v: Value) {
        self.0[v.index()] -= 1;
    }
    pub fn total(&self) -> usize {
        self.0.iter().map(|&c| c as usize).sum()
    }
    pub(crate) fn counts(&self) -> std::slice::Iter<'_, Count> {
        self.0.iter()
    }
}

impl From<Vec<Count>> for Signature {
    fn from(counts: Vec<Count>) -> Self {
        Self(counts)
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<{}>",
            self.0
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bump_and_drop() {
        let mut sig = Signature::zero(4);
        sig.bump(Value::from(2u8));
        sig.bump(Value::from(2u8));
        sig.bump(Value::from(0u8));
        assert!(sig.total() == 3);
        assert!(sig.count(Value::from(2u8)) == 2);
        sig.drop(Value::from(2u8));
        assert!(sig.count(Value::from(2u8)) == 1);
    }
}
