/// Value indexes the ordered finite set of wire denominations.
/// the index is 0-based internally; the table talks 1-based,
/// so Display and parsing shift by one. multiplicities live in
/// the Deck, ordering is total and shared by every hand.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Value(u8);

impl Value {
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

/// u8 isomorphism
impl From<u8> for Value {
    fn from(n: u8) -> Self {
        Self(n)
    }
}
impl From<Value> for u8 {
    fn from(value: Value) -> Self {
        value.0
    }
}

/// usize isomorphism
impl From<usize> for Value {
    fn from(n: usize) -> Self {
        assert!(n < crate::MAX_VALUES);
        Self(n as u8)
    }
}
impl From<Value> for usize {
    fn from(value: Value) -> Self {
        value.0 as usize
    }
}

impl TryFrom<&str> for Value {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .map(Self)
            .ok_or_else(|| anyhow::anyhow!("invalid wire value"))
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0 + 1)
    }
}

impl crate::Arbitrary for Value {
    fn random() -> Self {
        Self(rand::random_range(0..8u8))
    }
}
