use super::Patch;
use super::View;
use crate::beliefs::spot::Status;
use crate::engine::error::Error;
use crate::game::domain::Domain;
use crate::game::value::Value;

/// hidden-subset rule: when the slots whose candidates fit entirely
/// inside a value set S number exactly the unrevealed copies of S,
/// those slots soak up every copy, and S disappears from the rest of
/// the table. more fitting slots than copies is a contradiction.
pub fn prune(view: &View) -> Result<Vec<Patch>, Error> {
    if !view.beliefs.any_dirty() {
        return Ok(Vec::new());
    }
    let k = view.beliefs.k();
    let remaining = (0..k)
        .map(Value::from)
        .map(|v| view.tracker.deck().copies(v) - view.tracker.revealed(v))
        .collect::<Vec<_>>();
    let active = (0..k)
        .map(Value::from)
        .filter(|v| remaining[v.index()] > 0)
        .collect::<Vec<_>>();
    let slots = view
        .beliefs
        .players()
        .flat_map(|p| {
            view.beliefs
                .row(p)
                .iter()
                .enumerate()
                .filter(|(_, s)| s.status() != Status::Revealed)
                .map(|(j, s)| (p, j, s.domain()))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    let depth = view.config.subset_depth.min(active.len());
    let mut patches = Vec::new();
    for subset in combinations(&active, depth) {
        let capacity = subset
            .iter()
            .map(|v| remaining[v.index()] as usize)
            .sum::<usize>();
        let inside = slots
            .iter()
            .filter(|(_, _, d)| d.is_subset(&subset))
            .count();
        if inside > capacity {
            return Err(Error::Crowded {
                event: None,
                slots: inside,
                copies: capacity,
            });
        }
        if inside == capacity {
            for (p, j, d) in slots.iter() {
                if !d.is_subset(&subset) && !(*d & subset).is_empty() {
                    patches.push(Patch {
                        player: *p,
                        position: *j,
                        domain: Domain::from(u64::from(*d) & !u64::from(subset)),
                    });
                }
            }
        }
    }
    Ok(patches)
}

/// every nonempty subset of the active values up to the given size,
/// as candidate bitsets
fn combinations(active: &[Value], depth: usize) -> Vec<Domain> {
    let mut out = Vec::new();
    let mut stack = Vec::new();
    descend(active, 0, depth, &mut stack, &mut out);
    out
}

fn descend(
    active: &[Value],
    from: usize,
    depth: usize,
    stack: &mut Vec<Value>,
    out: &mut Vec<Domain>,
) {
    if !stack.is_empty() {
        out.push(Domain::from(stack.clone()));
    }
    if stack.len() == depth {
        return;
    }
    for i in from..active.len() {
        stack.push(active[i]);
        descend(active, i + 1, depth, stack, out);
        stack.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beliefs::beliefs::Beliefs;
    use crate::beliefs::tracker::Tracker;
    use crate::engine::config::Config;
    use crate::filters;
    use crate::game::player::Player;

    #[test]
    fn enumerates_bounded_subsets() {
        let active = (0..5u8).map(Value::from).collect::<Vec<_>>();
        let subsets = combinations(&active, 2);
        // C(5,1) + C(5,2)
        assert!(subsets.len() == 5 + 10);
    }

    #[test]
    fn saturated_subset_clears_the_rest() {
        // two players of two wires over values {0, 1}, one copy of 0
        // and three of 1. the pair of slots restricted to {0} and {0, 1}
        // does not saturate; restrict three slots to {1} and the last
        // slot must shed 1.
        let config = Config {
            players: 2,
            hand: 2,
            copies: vec![1, 3],
            ..Config::demo()
        };
        let mut beliefs = Beliefs::new(2, 2, 2);
        let mut tracker = Tracker::new(config.deck(), 2);
        let one = Domain::singleton(Value::from(1u8));
        beliefs.set(Player::from(0), 1, one);
        beliefs.set(Player::from(1), 0, one);
        beliefs.set(Player::from(1), 1, one);
        for _ in 0..3 {
            tracker.certify(Player::from(0), Value::from(1u8));
        }
        let patches = prune(&View {
            beliefs: &beliefs,
            tracker: &tracker,
            config: &config,
        })
        .unwrap();
        filters::apply(&mut beliefs, &mut tracker, patches).unwrap();
        assert!(beliefs.domain(Player::from(0), 0) == Domain::singleton(Value::from(0u8)));
    }

    #[test]
    fn overcrowded_subset_is_a_contradiction() {
        let config = Config {
            players: 2,
            hand: 2,
            copies: vec![1, 3],
            ..Config::demo()
        };
        let mut beliefs = Beliefs::new(2, 2, 2);
        let tracker = Tracker::new(config.deck(), 2);
        let zero = Domain::singleton(Value::from(0u8));
        beliefs.set(Player::from(0), 0, zero);
        beliefs.set(Player::from(1), 0, zero);
        let verdict = prune(&View {
            beliefs: &beliefs,
            tracker: &tracker,
            config: &config,
        });
        assert!(matches!(verdict, Err(Error::Crowded { .. })));
    }
}
