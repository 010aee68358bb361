use super::signature::Signature;
use super::value::Value;
use crate::Position;

/// a concrete sorted hand. construction sorts, so the
/// non-decreasing invariant holds by the time anyone looks.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Hand(Vec<Value>);

impl Hand {
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn wire(&self, j: Position) -> Value {
        self.0[j]
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }
    pub fn holds(&self, v: Value) -> bool {
        self.0.contains(&v)
    }
    pub fn signature(&self, k: usize) -> Signature {
        let mut sig = Signature::zero(k);
        for &v in self.iter() {
            sig.bump(v);
        }
        sig
    }
    /// positions currently holding v
    pub fn seats(&self, v: Value) -> Vec<Position> {
        self.0
            .iter()
            .enumerate()
            .filter(|&(_, &w)| w == v)
            .map(|(j, _)| j)
            .collect()
    }
    /// trade one wire away for another, re-sorting; None when the
    /// outgoing wire is not actually held
    pub fn trade(&mut self, out: Value, incoming: Value) -> Option<Position> {
        let i = self.0.iter().position(|&w| w == out)?;
        self.0.remove(i);
        let j = self.0.partition_point(|&w| w <= incoming);
        self.0.insert(j, incoming);
        Some(j)
    }
}

/// we sort on the way in
impl From<Vec<Value>> for Hand {
    fn from(mut wires: Vec<Value>) -> Self {
        wires.sort();
        Self(wires)
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        )
    }
}
