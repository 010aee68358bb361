use super::Patch;
use super::View;
use crate::beliefs::signal::Relation;
use crate::engine::error::Error;
use crate::game::domain::Domain;
use crate::game::value::Value;

/// hands are sorted, so lower bounds ripple right and upper bounds
/// ripple left. adjacency links sharpen the pair they name: Same
/// meets the two domains, Differ makes the bound strict. sweeps
/// repeat per player until the row stops moving.
pub fn prune(view: &View) -> Result<Vec<Patch>, Error> {
    let mut patches = Vec::new();
    for p in view.beliefs.players().filter(|p| view.beliefs.is_dirty(*p)) {
        let before = view
            .beliefs
            .row(p)
            .iter()
            .map(|s| s.domain())
            .collect::<Vec<_>>();
        let mut row = before.clone();
        loop {
            let held = row.clone();
            for j in 1..row.len() {
                row[j] = row[j] & forward(&row, j, view.beliefs.link(p, j - 1));
            }
            for j in (0..row.len() - 1).rev() {
                row[j] = row[j] & backward(&row, j, view.beliefs.link(p, j));
            }
            if row == held {
                break;
            }
            if row.iter().any(Domain::is_empty) {
                break;
            }
        }
        for (j, (old, new)) in before.iter().zip(row.iter()).enumerate() {
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

/// admissible values at j given the slot to its left
fn forward(row: &[Domain], j: usize, link: Option<Relation>) -> Domain {
    match (row[j - 1].min(), link) {
        (None, _) => Domain::empty(),
        (Some(_), Some(Relation::Same)) => row[j - 1],
        (Some(lo), Some(Relation::Differ)) => Domain::floor(lo.next()),
        (Some(lo), None) => Domain::floor(lo),
    }
}

/// admissible values at j given the slot to its right
fn backward(row: &[Domain], j: usize, link: Option<Relation>) -> Domain {
    match (row[j + 1].max(), link) {
        (None, _) => Domain::empty(),
        (Some(_), Some(Relation::Same)) => row[j + 1],
        (Some(hi), Some(Relation::Differ)) => match hi.index() {
            0 => Domain::empty(),
            i => Domain::ceiling(Value::from(i - 1)),
        },
        (Some(hi), None) => Domain::ceiling(hi),
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

    fn setup() -> (Beliefs, Tracker, Config) {
        let config = Config::demo();
        let beliefs = Beliefs::new(config.players, config.hand, config.k());
        let tracker = Tracker::new(config.deck(), config.players);
        (beliefs, tracker, config)
    }

    #[test]
    fn bounds_ripple_both_ways() {
        let (mut beliefs, mut tracker, config) = setup();
        let p = Player::from(0);
        beliefs.set(p, 1, Domain::singleton(Value::from(2u8)));
        let patches = prune(&View {
            beliefs: &beliefs,
            tracker: &tracker,
            config: &config,
        })
        .unwrap();
        filters::apply(&mut beliefs, &mut tracker, patches).unwrap();
        assert!(beliefs.domain(p, 0).max().unwrap() <= Value::from(2u8));
        assert!(beliefs.domain(p, 2).min().unwrap() >= Value::from(2u8));
        assert!(beliefs.domain(p, 3).min().unwrap() >= Value::from(2u8));
    }

    #[test]
    fn differ_link_is_strict() {
        let (mut beliefs, mut tracker, config) = setup();
        let p = Player::from(1);
        beliefs.set(p, 0, Domain::singleton(Value::from(3u8)));
        beliefs.record_link(p, 0, Relation::Differ);
        let patches = prune(&View {
            beliefs: &beliefs,
            tracker: &tracker,
            config: &config,
        })
        .unwrap();
        filters::apply(&mut beliefs, &mut tracker, patches).unwrap();
        assert!(beliefs.domain(p, 1).min().unwrap() >= Value::from(4u8));
    }

    #[test]
    fn same_link_meets_the_pair() {
        let (mut beliefs, mut tracker, config) = setup();
        let p = Player::from(2);
        beliefs.set(p, 2, Domain::from(vec![Value::from(1u8), Value::from(2u8)]));
        beliefs.set(p, 3, Domain::from(vec![Value::from(2u8), Value::from(3u8)]));
        beliefs.record_link(p, 2, Relation::Same);
        let patches = prune(&View {
            beliefs: &beliefs,
            tracker: &tracker,
            config: &config,
        })
        .unwrap();
        filters::apply(&mut beliefs, &mut tracker, patches).unwrap();
        assert!(beliefs.domain(p, 2) == Domain::singleton(Value::from(2u8)));
        assert!(beliefs.domain(p, 3) == Domain::singleton(Value::from(2u8)));
    }
}
