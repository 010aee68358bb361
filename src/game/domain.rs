use super::value::Value;

/// Domain is a bitstring over the value set
/// stored as a u64
/// each bit marks a value still compatible with everything public
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Domain(u64);

impl Domain {
    pub const fn empty() -> Self {
        Self(0)
    }
    pub fn full(k: usize) -> Self {
        assert!(k > 0 && k <= crate::MAX_VALUES);
        Self(u64::MAX >> (crate::MAX_VALUES - k))
    }
    pub fn singleton(v: Value) -> Self {
        Self(1u64 << v.index())
    }
    /// values >= v
    pub fn floor(v: Value) -> Self {
        match v.index() {
            i if i >= crate::MAX_VALUES => Self::empty(),
            i => Self(u64::MAX << i),
        }
    }
    /// values <= v
    pub fn ceiling(v: Value) -> Self {
        Self(u64::MAX >> (crate::MAX_VALUES - 1 - v.index()))
    }
    pub fn contains(&self, v: Value) -> bool {
        self.0 & (1u64 << v.index()) != 0
    }
    pub fn with(&self, v: Value) -> Self {
        Self(self.0 | 1u64 << v.index())
    }
    pub fn without(&self, v: Value) -> Self {
        Self(self.0 & !(1u64 << v.index()))
    }
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
    pub fn is_singleton(&self) -> bool {
        self.0.count_ones() == 1
    }
    /// the lone survivor of a collapsed domain
    pub fn only(&self) -> Value {
        assert!(self.is_singleton());
        Value::from(self.0.trailing_zeros() as u8)
    }
    pub fn min(&self) -> Option<Value> {
        match self.0 {
            0 => None,
            n => Some(Value::from(n.trailing_zeros() as u8)),
        }
    }
    pub fn max(&self) -> Option<Value> {
        match self.0 {
            0 => None,
            n => Some(Value::from((63 - n.leading_zeros()) as u8)),
        }
    }
    pub fn is_subset(&self, other: &Self) -> bool {
        self.0 & !other.0 == 0
    }
    pub fn iter(self) -> impl Iterator<Item = Value> {
        let mut bits = self.0;
        std::iter::from_fn(move || match bits {
            0 => None,
            n => {
                let i = n.trailing_zeros() as u8;
                bits &= bits - 1;
                Some(Value::from(i))
            }
        })
    }
}

/// u64 isomorphism
impl From<u64> for Domain {
    fn from(n: u64) -> Self {
        Self(n)
    }
}
impl From<Domain> for u64 {
    fn from(domain: Domain) -> Self {
        domain.0
    }
}

/// we OR the values to get the bitstring
impl From<Vec<Value>> for Domain {
    fn from(values: Vec<Value>) -> Self {
        values.into_iter().fold(Self::empty(), |d, v| d.with(v))
    }
}

impl std::ops::BitAnd for Domain {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}
impl std::ops::BitOr for Domain {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, v) in self.iter().enumerate() {
            match i {
                0 => write!(f, "{}", v)?,
                _ => write!(f, " {}", v)?,
            }
        }
        write!(f, "}}")
    }
}

impl crate::Arbitrary for Domain {
    fn random() -> Self {
        Self(rand::random_range(1..=0xFFu64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_width() {
        assert!(Domain::full(5).len() == 5);
        assert!(Domain::full(64).len() == 64);
    }

    #[test]
    fn bounds() {
        let d = Domain::from(vec![Value::from(1u8), Value::from(4u8)]);
        assert!(d.min() == Some(Value::from(1u8)));
        assert!(d.max() == Some(Value::from(4u8)));
    }

    #[test]
    fn floor_and_ceiling() {
        let d = Domain::full(6);
        let lo = d & Domain::floor(Value::from(2u8));
        let hi = d & Domain::ceiling(Value::from(3u8));
        assert!(lo.min() == Some(Value::from(2u8)));
        assert!(lo.max() == Some(Value::from(5u8)));
        assert!(hi.min() == Some(Value::from(0u8)));
        assert!(hi.max() == Some(Value::from(3u8)));
    }

    #[test]
    fn collapse() {
        let d = Domain::singleton(Value::from(3u8));
        assert!(d.is_singleton());
        assert!(d.only() == Value::from(3u8));
    }

    #[test]
    fn subset_removal() {
        let d = Domain::full(4).without(Value::from(2u8));
        assert!(d.len() == 3);
        assert!(!d.contains(Value::from(2u8)));
        assert!(d.is_subset(&Domain::full(4)));
    }

    #[test]
    fn iteration_is_sorted() {
        let d = Domain::from(vec![Value::from(4u8), Value::from(0u8), Value::from(2u8)]);
        let vs = d.iter().collect::<Vec<_>>();
        assert!(vs == vec![Value::from(0u8), Value::from(2u8), Value::from(4u8)]);
    }
}
