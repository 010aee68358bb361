use super::Patch;
use super::View;
use crate::game::domain::Domain;
use crate::engine::error::Error;
use crate::game::value::Value;

/// chain-forcing rule: hypothesize v at a slot and walk outward.
/// neighbors whose min (left) or max (right) equals v would all be
/// forced to v; if the forced chain needs more copies than could
/// possibly sit in this hand, the hypothesis dies. singletons are
/// never touched and a slot always keeps at least one value.
pub fn prune(view: &View) -> Result<Vec<Patch>, Error> {
    let mut patches = Vec::new();
    for p in view.beliefs.players().filter(|p| view.beliefs.is_dirty(*p)) {
        let row = view
            .beliefs
            .row(p)
            .iter()
            .map(|s| s.domain())
            .collect::<Vec<_>>();
        let mut work = row.clone();
        for (j, domain) in row.iter().enumerate() {
            if domain.is_singleton() {
                continue;
            }
            for v in domain.iter() {
                let (required, located) = chain(&row, j, v);
                let available = located
                    + view.tracker.uncertain(v) as usize
                    + view.tracker.called(p, v) as usize;
                if required > available && work[j].len() > 1 {
                    work[j] = work[j].without(v);
                }
            }
        }
        for (j, (old, new)) in row.iter().zip(work.iter()).enumerate() {
            if old != new {
                patches.push(Patch {
                    player: p,
                    position: j,
                    domain: *new,
                });
            }
        }
    }
    Ok(patches)
}

/// forced chain through j under the hypothesis hand[j] = v: length of
/// the chain, and how many of its slots are already located copies
/// (those spend no supply)
fn chain(row: &[Domain], j: usize, v: Value) -> (usize, usize) {
    let mut required = 1;
    let mut located = 0;
    for i in (0..j).rev() {
        match row[i].min() {
            Some(m) if m == v => {
                required += 1;
                located += row[i].is_singleton() as usize;
            }
            // a left neighbor strictly above v already refutes the
            // hypothesis; fold it into the supply test
            Some(m) if m > v => return (usize::MAX, 0),
            _ => break,
        }
    }
    for i in j + 1..row.len() {
        match row[i].max() {
            Some(m) if m == v => {
                required += 1;
                located += row[i].is_singleton() as usize;
            }
            Some(m) if m < v => return (usize::MAX, 0),
            _ => break,
        }
    }
    (required, located)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beliefs::beliefs::Beliefs;
    use crate::beliefs::spot::Status;
    use crate::beliefs::tracker::Tracker;
    use crate::engine::config::Config;
    use crate::filters;
    use crate::game::player::Player;

    #[test]
    fn starved_chain_drops_the_hypothesis() {
        // deck: value 1 has four copies, two already revealed on
        // another player. positions 1..=3 of p would form a chain of
        // three, but only two copies could reach this hand.
        let config = Config {
            players: 2,
            hand: 4,
            copies: vec![2, 4, 1, 1],
            ..Config::demo()
        };
        let mut beliefs = Beliefs::new(2, 4, 4);
        let mut tracker = Tracker::new(config.deck(), 2);
        let p = Player::from(0);
        let v = Value::from(1u8);
        beliefs.reveal(Player::from(1), 1, v);
        tracker.reveal(Player::from(1), v, Status::Hidden);
        beliefs.reveal(Player::from(1), 2, v);
        tracker.reveal(Player::from(1), v, Status::Hidden);
        beliefs.set(p, 1, Domain::singleton(v));
        beliefs.certify(p, 1);
        tracker.certify(p, v);
        beliefs.set(p, 2, Domain::from(vec![v, Value::from(2u8)]));
        beliefs.set(
            p,
            3,
            Domain::from(vec![v, Value::from(2u8), Value::from(3u8)]),
        );
        let patches = prune(&View {
            beliefs: &beliefs,
            tracker: &tracker,
            config: &config,
        })
        .unwrap();
        filters::apply(&mut beliefs, &mut tracker, patches).unwrap();
        assert!(!beliefs.domain(p, 3).contains(v));
        assert!(beliefs.domain(p, 2).contains(v));
    }

    #[test]
    fn never_strips_a_singleton_bare() {
        let config = Config {
            players: 1,
            hand: 2,
            copies: vec![1, 1],
            ..Config::demo()
        };
        let beliefs = Beliefs::new(1, 2, 2);
        let tracker = Tracker::new(config.deck(), 1);
        let patches = prune(&View {
            beliefs: &beliefs,
            tracker: &tracker,
            config: &config,
        })
        .unwrap();
        // nothing is forced, nothing is removed
        assert!(patches.is_empty());
    }
}
