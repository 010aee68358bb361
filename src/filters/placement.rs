use super::Patch;
use super::View;
use crate::engine::error::Error;
use crate::game::domain::Domain;
use crate::game::player::Player;
use crate::game::value::Value;

/// position-value rule: caps how many copies of v a player could
/// still hold, fills the run between located copies (sorted hands
/// keep equal wires adjacent), and strips v beyond the cap-limited,
/// contiguity-limited reach of that run.
pub fn prune(view: &View) -> Result<Vec<Patch>, Error> {
    let mut patches = Vec::new();
    for p in view.beliefs.players().filter(|p| view.beliefs.is_dirty(*p)) {
        let row = view
            .beliefs
            .row(p)
            .iter()
            .map(|s| s.domain())
            .collect::<Vec<_>>();
        for v in (0..view.beliefs.k()).map(Value::from) {
            if !row.iter().any(|d| d.contains(v)) {
                continue;
            }
            let anchors = view.beliefs.anchors(p, v);
            let cap = anchors.len()
                + view.tracker.called(p, v) as usize
                + view.tracker.uncertain(v) as usize;
            if cap == 0 {
                for (j, domain) in row.iter().enumerate() {
                    if domain.contains(v) {
                        patches.push(Patch {
                            player: p,
                            position: j,
                            domain: domain.without(v),
                        });
                    }
                }
                continue;
            }
            let (Some(&lo), Some(&hi)) = (anchors.first(), anchors.last()) else {
                continue;
            };
            // equal wires are adjacent: everything between two located
            // copies is another copy
            for j in lo + 1..hi {
                if row[j] != Domain::singleton(v) {
                    patches.push(Patch {
                        player: p,
                        position: j,
                        domain: Domain::singleton(v),
                    });
                }
            }
            let slack = cap.saturating_sub(hi - lo + 1);
            patches.extend(reach(&row, p, v, lo, hi, slack));
        }
    }
    Ok(patches)
}

/// strip v outside the run's reach: a copy at distance d from the
/// block needs d extra copies in between, all admitting v
fn reach(
    row: &[Domain],
    p: Player,
    v: Value,
    lo: usize,
    hi: usize,
    slack: usize,
) -> Vec<Patch> {
    let mut patches = Vec::new();
    let mut broken = false;
    for step in 1..=lo {
        let j = lo - step;
        if broken || step > slack {
            if row[j].contains(v) {
                patches.push(Patch {
                    player: p,
                    position: j,
                    domain: row[j].without(v),
                });
            }
        } else if !row[j].contains(v) {
            broken = true;
        }
    }
    let mut broken = false;
    for j in hi + 1..row.len() {
        if broken || j - hi > slack {
            if row[j].contains(v) {
                patches.push(Patch {
                    player: p,
                    position: j,
                    domain: row[j].without(v),
                });
            }
        } else if !row[j].contains(v) {
            broken = true;
        }
    }
    patches
}
