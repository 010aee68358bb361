use super::cache::Cache;
use super::cache::Key;
use super::explorer::Explorer;
use super::reach::Reach;
use super::variants::Variants;
use crate::beliefs::beliefs::Beliefs;
use crate::beliefs::tracker::Tracker;
use crate::engine::config::Config;
use crate::engine::error::Error;
use crate::filters::Patch;
use crate::game::domain::Domain;
use crate::game::player::Player;
use crate::game::signature::Signature;
use crate::game::tally::Tally;
use crate::game::value::Value;
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

/// multi-player resource feasibility. local filtering sees one hand
/// at a time; this pass asks whether hands can coexist: a forward
/// reachability sweep accumulates every way the first i hands could
/// split the deck, a backward sweep does the same from the other end,
/// and a signature survives only if some prefix and suffix meet it
/// exactly at the full deck. surviving hands are unioned back into
/// per-position domains.
pub fn solve(
    beliefs: &Beliefs,
    tracker: &Tracker,
    config: &Config,
    cache: &mut Cache,
) -> Result<Vec<Patch>, Error> {
    let deck = tracker.deck().clone();
    let n = config.players;
    let k = beliefs.k();
    let deadline = match config.budget_ms {
        0 => None,
        ms => Some(Instant::now() + Duration::from_millis(ms)),
    };
    let keys = beliefs
        .players()
        .map(|p| Key::of(p, beliefs, tracker))
        .collect::<Vec<_>>();
    let mut resolved = keys.iter().map(|key| cache.get(key)).collect::<Vec<_>>();
    let missing = resolved
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_none())
        .map(|(i, _)| i)
        .collect::<Vec<_>>();
    log::debug!("enumerating {} of {} hands", missing.len(), n);
    let explored = missing
        .into_par_iter()
        .map(|i| {
            let p = Player::from(i);
            let domains = beliefs.row(p).iter().map(|s| s.domain()).collect();
            let minima = (0..k)
                .map(Value::from)
                .map(|v| beliefs.located(p, v) + tracker.called(p, v))
                .collect();
            let explorer = Explorer::new(
                domains,
                beliefs.links(p),
                minima,
                keys[i].caps().to_vec(),
                deadline,
            );
            (i, explorer.explore())
        })
        .collect::<Vec<_>>();
    for (i, result) in explored {
        match result {
            Ok(variants) => {
                let variants = Arc::new(variants);
                cache.put(keys[i].clone(), variants.clone());
                resolved[i] = Some(variants);
            }
            // a stalled hand degrades to unconstrained instead of
            // taking the whole solve down with it
            Err(Error::Budget) => {
                log::warn!(
                    "{} enumeration ran out of budget; hand treated as unconstrained",
                    Player::from(i),
                );
            }
            Err(e) => return Err(e),
        }
    }
    let variants = resolved;
    for (i, v) in variants.iter().enumerate() {
        if v.as_ref().is_some_and(|v| v.is_empty()) {
            return Err(Error::Starved {
                event: None,
                player: Player::from(i),
            });
        }
    }
    let complete = variants.iter().all(Option::is_some);

    // forward reachability; a stalled hand passes states through
    // untouched, its consumption deferred to the deck bound
    let full = deck.tally();
    let base = deck.base();
    let mut alphas = Vec::with_capacity(n + 1);
    let mut seed = Reach::new(base);
    seed.insert(Tally::zero(k));
    alphas.push(seed);
    for i in 0..n {
        let Some(v) = &variants[i] else {
            let held = alphas[i].clone();
            alphas.push(held);
            continue;
        };
        let mut next = Reach::new(base);
        for a in alphas[i].iter() {
            for sig in v.signatures() {
                let t = a.plus(sig);
                if t.fits(&deck) {
                    next.insert(t);
                }
            }
        }
        if next.is_empty() {
            return Err(Error::Unreachable { event: None });
        }
        alphas.push(next);
    }
    if complete && !alphas[n].contains(&full) {
        return Err(Error::Unreachable { event: None });
    }

    // backward reachability
    let mut betas = (0..=n).map(|_| Reach::new(base)).collect::<Vec<_>>();
    betas[n].insert(Tally::zero(k));
    for i in (0..n).rev() {
        let Some(v) = &variants[i] else {
            betas[i] = betas[i + 1].clone();
            continue;
        };
        let mut prev = Reach::new(base);
        for b in betas[i + 1].iter() {
            for sig in v.signatures() {
                let t = b.plus(sig);
                if t.fits(&deck) {
                    prev.insert(t);
                }
            }
        }
        betas[i] = prev;
    }
    log::debug!(
        "reachability: {} forward, {} backward states at the widest seam",
        alphas.iter().map(Reach::len).max().unwrap_or(0),
        betas.iter().map(Reach::len).max().unwrap_or(0),
    );

    // project surviving hands back onto per-position domains,
    // skipping stalled players
    let patches = (0..n)
        .into_par_iter()
        .map(|i| match &variants[i] {
            None => Vec::new(),
            Some(v) => project(
                Player::from(i),
                v,
                &alphas[i],
                &betas[i + 1],
                &full,
                beliefs,
                complete,
            ),
        })
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect();
    Ok(patches)
}

fn project(
    p: Player,
    variants: &Variants,
    alpha: &Reach,
    beta: &Reach,
    full: &Tally,
    beliefs: &Beliefs,
    exact: bool,
) -> Vec<Patch> {
    let length = beliefs.length();
    let mut union = vec![Domain::empty(); length];
    for sig in variants.signatures() {
        if feasible(sig, alpha, beta, full, exact) {
            for hand in variants.hands(sig) {
                for (j, slot) in union.iter_mut().enumerate() {
                    *slot = *slot | Domain::singleton(hand.wire(j));
                }
            }
        }
    }
    (0..length)
        .filter_map(|j| {
            let old = beliefs.domain(p, j);
            let new = old & union[j];
            (new != old).then_some(Patch {
                player: p,
                position: j,
                domain: new,
            })
        })
        .collect()
}

/// a signature coexists with the rest of the table iff some reachable
/// prefix and suffix complete it to exactly the full deck. iterate
/// the smaller side, hash into the other. when stalled hands left the
/// table incomplete, the unaccounted remainder is theirs, so prefix
/// and suffix only need to fit under the deck instead of meeting it.
fn feasible(sig: &Signature, alpha: &Reach, beta: &Reach, full: &Tally, exact: bool) -> bool {
    let Some(rest) = full.minus(&Tally::from(sig)) else {
        return false;
    };
    match (exact, alpha.len() <= beta.len()) {
        (true, true) => alpha
            .iter()
            .any(|a| rest.minus(a).is_some_and(|rem| beta.contains(&rem))),
        (true, false) => beta
            .iter()
            .any(|b| rest.minus(b).is_some_and(|rem| alpha.contains(&rem))),
        (false, _) => alpha.iter().any(|a| {
            rest.minus(a)
                .is_some_and(|rem| beta.iter().any(|b| b.within(&rem)))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters;

    fn view(copies: Vec<crate::Count>, players: usize, hand: usize) -> (Beliefs, Tracker, Config) {
        let config = Config {
            players,
            hand,
            copies,
            ..Config::demo()
        };
        let beliefs = Beliefs::new(players, hand, config.k());
        let tracker = Tracker::new(config.deck(), players);
        (beliefs, tracker, config)
    }

    #[test]
    fn overdemand_is_unreachable() {
        // both hands locked to three copies of value 0, four in the deck
        let (mut beliefs, tracker, config) = view(vec![4, 2], 2, 3);
        for p in 0..2 {
            for j in 0..3 {
                beliefs.set(Player::from(p), j, Domain::singleton(Value::from(0u8)));
            }
        }
        let verdict = solve(&beliefs, &tracker, &config, &mut Cache::default());
        assert!(matches!(verdict, Err(Error::Unreachable { .. })));
    }

    #[test]
    fn projection_prunes_infeasible_hands() {
        // p0 holds a 0 for sure; p1 cannot also hold two 0s
        let (mut beliefs, mut tracker, config) = view(vec![2, 2], 2, 2);
        beliefs.set(Player::from(0), 0, Domain::singleton(Value::from(0u8)));
        let patches = solve(&beliefs, &tracker, &config, &mut Cache::default()).unwrap();
        filters::apply(&mut beliefs, &mut tracker, patches).unwrap();
        assert!(beliefs.domain(Player::from(1), 1) == Domain::singleton(Value::from(1u8)));
    }

    #[test]
    fn cache_hits_after_identical_state() {
        let (beliefs, tracker, config) = view(vec![2, 2], 2, 2);
        let mut cache = Cache::default();
        solve(&beliefs, &tracker, &config, &mut cache).unwrap();
        let filled = cache.len();
        solve(&beliefs, &tracker, &config, &mut cache).unwrap();
        assert!(filled == 2);
        assert!(cache.len() == filled);
    }

    #[test]
    fn zero_budget_is_unbounded() {
        let (beliefs, tracker, config) = view(vec![2, 2], 2, 2);
        let config = Config {
            budget_ms: 0,
            ..config
        };
        assert!(solve(&beliefs, &tracker, &config, &mut Cache::default()).is_ok());
    }

    #[test]
    fn exhausted_budget_degrades_per_player() {
        // a table far too wide to enumerate in a millisecond: stalled
        // hands are treated as unconstrained and the solve still
        // lands, instead of aborting on the first timeout
        let (beliefs, tracker, config) = view(vec![6; 8], 2, 24);
        let config = Config {
            budget_ms: 1,
            ..config
        };
        let mut cache = Cache::default();
        assert!(solve(&beliefs, &tracker, &config, &mut cache).is_ok());
    }
}
