use super::Patch;
use super::View;
use crate::engine::error::Error;
use crate::game::value::Value;

/// sliding-window rule: in a sorted hand the copies of one value sit
/// in a single run, so every slot that could hold v must fall inside
/// some width-w window that also covers all of v's located copies,
/// where w caps how many copies this player could possibly hold.
pub fn prune(view: &View) -> Result<Vec<Patch>, Error> {
    let mut patches = Vec::new();
    for p in view.beliefs.players().filter(|p| view.beliefs.is_dirty(*p)) {
        let row = view
            .beliefs
            .row(p)
            .iter()
            .map(|s| s.domain())
            .collect::<Vec<_>>();
        let length = row.len();
        for v in (0..view.beliefs.k()).map(Value::from) {
            if !row.iter().any(|d| d.contains(v)) {
                continue;
            }
            let anchors = view.beliefs.anchors(p, v);
            let width = anchors.len()
                + view.tracker.uncertain(v) as usize
                + view.tracker.called(p, v) as usize;
            if width >= length {
                continue;
            }
            let mut union = 0u64;
            if width > 0 {
                for start in 0..=(length - width) {
                    let span = start..start + width;
                    if anchors.iter().all(|j| span.contains(j)) {
                        span.for_each(|j| union |= 1u64 << j);
                    }
                }
            }
            for (j, domain) in row.iter().enumerate() {
                if domain.contains(v) && union & (1u64 << j) == 0 {
                    patches.push(Patch {
                        player: p,
                        position: j,
                        domain: domain.without(v),
                    });
                }
            }
        }
    }
    Ok(patches)
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
    fn exhausted_value_vanishes() {
        // deck has three copies of value 1; all three located elsewhere
        let config = Config::demo();
        let mut beliefs = Beliefs::new(config.players, config.hand, config.k());
        let mut tracker = Tracker::new(config.deck(), config.players);
        let v = Value::from(1u8);
        for j in 0..3 {
            beliefs.reveal(Player::from(1), j, v);
            tracker.reveal(Player::from(1), v, Status::Hidden);
        }
        let patches = prune(&View {
            beliefs: &beliefs,
            tracker: &tracker,
            config: &config,
        })
        .unwrap();
        filters::apply(&mut beliefs, &mut tracker, patches).unwrap();
        for j in 0..config.hand {
            assert!(!beliefs.domain(Player::from(0), j).contains(v));
            assert!(!beliefs.domain(Player::from(2), j).contains(v));
        }
    }

    #[test]
    fn window_hugs_the_anchors() {
        // one copy of value 4 in the deck, revealed at position 3 of
        // p's own hand: width collapses to 1 and the value survives
        // nowhere else in that hand
        let config = Config::demo();
        let mut beliefs = Beliefs::new(config.players, config.hand, config.k());
        let mut tracker = Tracker::new(config.deck(), config.players);
        let p = Player::from(0);
        let v = Value::from(4u8);
        beliefs.reveal(p, 3, v);
        tracker.reveal(p, v, Status::Hidden);
        let patches = prune(&View {
            beliefs: &beliefs,
            tracker: &tracker,
            config: &config,
        })
        .unwrap();
        filters::apply(&mut beliefs, &mut tracker, patches).unwrap();
        for j in 0..3 {
            assert!(!beliefs.domain(p, j).contains(v));
        }
        assert!(beliefs.domain(p, 3).contains(v));
    }
}
