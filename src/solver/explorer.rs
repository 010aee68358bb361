use super::variants::Variants;
use crate::beliefs::signal::Relation;
use crate::engine::error::Error;
use crate::game::domain::Domain;
use crate::game::hand::Hand;
use crate::game::signature::Signature;
use crate::game::value::Value;
use crate::Count;
use crate::Position;
use std::time::Instant;

/// depth-first enumeration of one player's locally valid hands.
/// positions are filled left to right with a running value floor, so
/// every emitted hand is sorted by construction. per-value counts,
/// adjacency links, floating-call minima and global caps prune the
/// tree as it grows.
pub struct Explorer<'a> {
    domains: Vec<Domain>,
    links: &'a [(Position, Relation)],
    /// located copies plus floating calls: the fewest copies of each
    /// value this hand can get away with
    minima: Vec<Count>,
    /// deck copies not located in other hands: the most copies of
    /// each value this hand could hold
    caps: Vec<Count>,
    deadline: Option<Instant>,
}

impl<'a> Explorer<'a> {
    pub fn new(
        domains: Vec<Domain>,
        links: &'a [(Position, Relation)],
        minima: Vec<Count>,
        caps: Vec<Count>,
        deadline: Option<Instant>,
    ) -> Self {
        Self {
            domains,
            links,
            minima,
            caps,
            deadline,
        }
    }

    fn k(&self) -> usize {
        self.minima.len()
    }
    fn length(&self) -> usize {
        self.domains.len()
    }
    fn link(&self, j: Position) -> Option<Relation> {
        self.links.iter().find(|(i, _)| *i == j).map(|(_, r)| *r)
    }

    pub fn explore(&self) -> Result<Variants, Error> {
        let mut variants = Variants::default();
        let mut signature = Signature::zero(self.k());
        let mut wires = Vec::with_capacity(self.length());
        self.descend(0, Value::from(0usize), &mut signature, &mut wires, &mut variants)?;
        Ok(variants)
    }

    fn descend(
        &self,
        j: Position,
        floor: Value,
        signature: &mut Signature,
        wires: &mut Vec<Value>,
        out: &mut Variants,
    ) -> Result<(), Error> {
        if let Some(deadline) = self.deadline {
            if Instant::now() > deadline {
                return Err(Error::Budget);
            }
        }
        if self.starved(j, floor, signature) {
            return Ok(());
        }
        if j == self.length() {
            out.insert(Hand::from(wires.clone()), self.k());
            return Ok(());
        }
        for v in self.domains[j].iter() {
            if v < floor {
                continue;
            }
            if signature.count(v) == self.caps[v.index()] {
                continue;
            }
            match (j.checked_sub(1).and_then(|i| self.link(i)), wires.last()) {
                (Some(Relation::Same), Some(&prev)) if v != prev => continue,
                (Some(Relation::Differ), Some(&prev)) if v == prev => continue,
                _ => {}
            }
            wires.push(v);
            signature.bump(v);
            self.descend(j + 1, v, signature, wires, out)?;
            signature.drop(v);
            wires.pop();
        }
        Ok(())
    }

    /// dead branch: a value below the floor still owes copies, or the
    /// remaining positions cannot absorb every outstanding minimum
    fn starved(&self, j: Position, floor: Value, signature: &Signature) -> bool {
        let mut owed = 0usize;
        for v in (0..self.k()).map(Value::from) {
            let deficit = self.minima[v.index()].saturating_sub(signature.count(v)) as usize;
            if deficit > 0 && v < floor {
                return true;
            }
            owed += deficit;
        }
        owed > self.length() - j
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain(values: &[u8]) -> Domain {
        Domain::from(values.iter().map(|&v| Value::from(v)).collect::<Vec<_>>())
    }

    #[test]
    fn enumerates_sorted_hands_only() {
        let explorer = Explorer::new(
            vec![domain(&[0, 1, 2]); 3],
            &[],
            vec![0; 3],
            vec![3; 3],
            None,
        );
        let variants = explorer.explore().unwrap();
        // multisets of size 3 over 3 values
        let hands = variants
            .signatures()
            .map(|s| variants.hands(s).len())
            .sum::<usize>();
        assert!(hands == 10);
    }

    #[test]
    fn caps_bound_the_copies() {
        let explorer = Explorer::new(
            vec![domain(&[0, 1]); 3],
            &[],
            vec![0; 2],
            vec![1, 3],
            None,
        );
        let variants = explorer.explore().unwrap();
        assert!(variants
            .signatures()
            .all(|s| s.count(Value::from(0u8)) <= 1));
    }

    #[test]
    fn minima_force_called_copies_in() {
        let explorer = Explorer::new(
            vec![domain(&[0, 1, 2]); 3],
            &[],
            vec![0, 2, 0],
            vec![3; 3],
            None,
        );
        let variants = explorer.explore().unwrap();
        assert!(!variants.is_empty());
        assert!(variants
            .signatures()
            .all(|s| s.count(Value::from(1u8)) >= 2));
    }

    #[test]
    fn spent_deadline_reports_budget() {
        let deadline = Instant::now();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let explorer = Explorer::new(
            vec![domain(&[0, 1, 2]); 3],
            &[],
            vec![0; 3],
            vec![3; 3],
            Some(deadline),
        );
        assert!(matches!(explorer.explore(), Err(Error::Budget)));
    }

    #[test]
    fn links_constrain_neighbors() {
        let links = [(0usize, Relation::Same), (1usize, Relation::Differ)];
        let explorer = Explorer::new(
            vec![domain(&[0, 1, 2]); 3],
            &links,
            vec![0; 3],
            vec![3; 3],
            None,
        );
        let variants = explorer.explore().unwrap();
        for sig in variants.signatures() {
            for hand in variants.hands(sig) {
                assert!(hand.wire(0) == hand.wire(1));
                assert!(hand.wire(1) != hand.wire(2));
            }
        }
    }
}
