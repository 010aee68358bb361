use crate::game::tally::Tally;
use std::collections::HashSet;

/// the reachable resource vectors at one seam of the forward or
/// backward pass, deduplicated through their packed u64 keys
#[derive(Debug, Clone)]
pub struct Reach {
    base: u64,
    keys: HashSet<u64>,
    vecs: Vec<Tally>,
}

impl Reach {
    pub fn new(base: u64) -> Self {
        Self {
            base,
            keys: HashSet::new(),
            vecs: Vec::new(),
        }
    }
    pub fn insert(&mut self, tally: Tally) -> bool {
        match self.keys.insert(tally.pack(self.base)) {
            true => {
                self.vecs.push(tally);
                true
            }
            false => false,
        }
    }
    pub fn contains(&self, tally: &Tally) -> bool {
        self.keys.contains(&tally.pack(self.base))
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Tally> {
        self.vecs.iter()
    }
    pub fn len(&self) -> usize {
        self.vecs.len()
    }
    pub fn is_empty(&self) -> bool {
        self.vecs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deduplicates_on_insert() {
        let mut reach = Reach::new(13);
        assert!(reach.insert(Tally::from(vec![1, 0, 2])));
        assert!(!reach.insert(Tally::from(vec![1, 0, 2])));
        assert!(reach.insert(Tally::from(vec![0, 1, 2])));
        assert!(reach.len() == 2);
        assert!(reach.contains(&Tally::from(vec![1, 0, 2])));
        assert!(!reach.contains(&Tally::from(vec![2, 0, 1])));
    }
}
