use super::Patch;
use super::View;
use crate::beliefs::spot::Status;
use crate::engine::error::Error;
use crate::game::domain::Domain;
use crate::game::value::Value;

/// floating copies must land: each value a player called and has not
/// yet located needs a hidden slot that still admits it. an exact fit
/// collapses those slots; a shortfall is a contradiction. announced
/// absences are re-stripped on the way through.
pub fn prune(view: &View) -> Result<Vec<Patch>, Error> {
    let mut patches = Vec::new();
    for p in view.beliefs.players().filter(|p| view.beliefs.is_dirty(*p)) {
        let absent = view.beliefs.absent(p);
        for (j, spot) in view.beliefs.row(p).iter().enumerate() {
            let stripped = Domain::from(u64::from(spot.domain()) & !u64::from(absent));
            if stripped != spot.domain() {
                patches.push(Patch {
                    player: p,
                    position: j,
                    domain: stripped,
                });
            }
        }
        for v in (0..view.beliefs.k()).map(Value::from) {
            let floating = view.tracker.called(p, v) as usize;
            if floating == 0 {
                continue;
            }
            let candidates = view
                .beliefs
                .row(p)
                .iter()
                .enumerate()
                .filter(|(_, s)| s.status() == Status::Hidden && s.domain().contains(v))
                .map(|(j, _)| j)
                .collect::<Vec<_>>();
            if candidates.len() < floating {
                return Err(Error::Starved {
                    event: None,
                    player: p,
                });
            }
            if candidates.len() == floating {
                for j in candidates {
                    patches.push(Patch {
                        player: p,
                        position: j,
                        domain: Domain::singleton(v),
                    });
                }
            }
        }
    }
    Ok(patches)
}
