pub mod called;
pub mod chains;
pub mod ordering;
pub mod placement;
pub mod subsets;
pub mod window;

use crate::beliefs::beliefs::Beliefs;
use crate::beliefs::spot::Status;
use crate::beliefs::tracker::Tracker;
use crate::engine::config::Config;
use crate::engine::error::Error;
use crate::game::domain::Domain;
use crate::game::player::Player;
use crate::Position;

/// read-only snapshot handed to a pass. passes are pure: they look,
/// they propose patches, they touch nothing.
pub struct View<'a> {
    pub beliefs: &'a Beliefs,
    pub tracker: &'a Tracker,
    pub config: &'a Config,
}

/// one slot shrink proposed by a pass. application intersects, so
/// several patches against one slot compose.
#[derive(Debug, Clone, Copy)]
pub struct Patch {
    pub player: Player,
    pub position: Position,
    pub domain: Domain,
}

/// the local propagators, in their round-robin order. each is
/// monotone (only ever removes values) and idempotent, so looping
/// them to a fixed point terminates on the finite domain lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Ordering,
    Window,
    Placement,
    Subsets,
    Chains,
    Called,
}

impl Pass {
    pub const fn all() -> &'static [Self] {
        &[
            Self::Ordering,
            Self::Window,
            Self::Placement,
            Self::Subsets,
            Self::Chains,
            Self::Called,
        ]
    }
    pub fn prune(&self, view: &View) -> Result<Vec<Patch>, Error> {
        match self {
            Self::Ordering => ordering::prune(view),
            Self::Window => window::prune(view),
            Self::Placement => placement::prune(view),
            Self::Subsets => subsets::prune(view),
            Self::Chains => chains::prune(view),
            Self::Called => called::prune(view),
        }
    }
}

impl std::fmt::Display for Pass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ordering => write!(f, "ordering"),
            Self::Window => write!(f, "window"),
            Self::Placement => write!(f, "placement"),
            Self::Subsets => write!(f, "subsets"),
            Self::Chains => write!(f, "chains"),
            Self::Called => write!(f, "called"),
        }
    }
}

/// apply patches by intersection. a fresh singleton in a hidden slot
/// is a deduction: the slot is certified and the tracker moves a copy
/// into the certain bucket, which dirties everyone (global counts
/// feed every hand's filters).
pub fn apply(
    beliefs: &mut Beliefs,
    tracker: &mut Tracker,
    patches: Vec<Patch>,
) -> Result<bool, Error> {
    let mut changed = false;
    for patch in patches {
        let (p, j) = (patch.player, patch.position);
        let old = beliefs.domain(p, j);
        let new = old & patch.domain;
        if new == old {
            continue;
        }
        if new.is_empty() {
            return Err(Error::Empty {
                event: None,
                player: p,
                position: j,
            });
        }
        beliefs.set(p, j, new);
        changed = true;
        if new.is_singleton() && beliefs.status(p, j) == Status::Hidden {
            beliefs.certify(p, j);
            tracker.certify(p, new.only());
        }
    }
    Ok(changed)
}

/// round-robin the passes until a full cycle proposes nothing,
/// then clear the dirty masks
pub fn fixpoint(
    beliefs: &mut Beliefs,
    tracker: &mut Tracker,
    config: &Config,
) -> Result<(), Error> {
    loop {
        let mut changed = false;
        for pass in Pass::all() {
            if *pass == Pass::Chains && !config.chains {
                continue;
            }
            let patches = pass.prune(&View {
                beliefs,
                tracker,
                config,
            })?;
            if apply(beliefs, tracker, patches)? {
                log::debug!("{} pass made progress", pass);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    beliefs.rinse();
    Ok(())
}
