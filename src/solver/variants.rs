use crate::game::hand::Hand;
use crate::game::signature::Signature;
use std::collections::HashMap;

/// every locally valid hand for one player, compressed by signature.
/// the signatures feed the global reachability pass; the concrete
/// hands come back out during domain projection.
#[derive(Debug, Clone, Default)]
pub struct Variants(HashMap<Signature, Vec<Hand>>);

impl Variants {
    pub fn insert(&mut self, hand: Hand, k: usize) {
        self.0.entry(hand.signature(k)).or_default().push(hand);
    }
    pub fn signatures(&self) -> impl Iterator<Item = &Signature> {
        self.0.keys()
    }
    pub fn hands(&self, signature: &Signature) -> &[Hand] {
        self.0
            .get(signature)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::value::Value;

    #[test]
    fn hands_collapse_onto_signatures() {
        let mut variants = Variants::default();
        variants.insert(Hand::from(vec![Value::from(0u8), Value::from(1u8)]), 3);
        variants.insert(Hand::from(vec![Value::from(1u8), Value::from(0u8)]), 3);
        variants.insert(Hand::from(vec![Value::from(1u8), Value::from(1u8)]), 3);
        assert!(variants.len() == 2);
        let sig = Signature::from(vec![1, 1, 0]);
        assert!(variants.hands(&sig).len() == 2);
    }
}
