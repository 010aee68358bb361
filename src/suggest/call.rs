use crate::beliefs::spot::Status;
use crate::engine::engine::Engine;
use crate::game::player::Player;
use crate::game::value::Value;
use crate::Position;

/// one candidate call, ranked. sure picks are deduced singletons the
/// table has not flipped yet; everything else orders by how thin the
/// slot's candidate set is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pick {
    pub target: Player,
    pub position: Position,
    pub value: Value,
    pub width: usize,
    pub sure: bool,
}

impl std::fmt::Display for Pick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.sure {
            true => write!(f, "{}[{}] is {}", self.target, self.position, self.value),
            false => write!(
                f,
                "{}[{}] maybe {} (1 in {})",
                self.target, self.position, self.value, self.width,
            ),
        }
    }
}

/// rank the calls open to a seat: certainties first, then thinnest
/// candidate sets. a seat with a privately known hand only calls
/// values it actually holds.
pub fn rank(engine: &Engine, seat: Player) -> Vec<Pick> {
    let mut picks = Vec::new();
    for target in engine.beliefs().players().filter(|&t| t != seat) {
        for (j, spot) in engine.beliefs().row(target).iter().enumerate() {
            if spot.status() == Status::Revealed {
                continue;
            }
            for value in spot.domain().iter() {
                if let Some(hand) = engine.hand(seat) {
                    if !hand.holds(value) {
                        continue;
                    }
                }
                picks.push(Pick {
                    target,
                    position: j,
                    value,
                    width: spot.domain().len(),
                    sure: spot.domain().is_singleton(),
                });
            }
        }
    }
    picks.sort_by_key(|pick| {
        (
            !pick.sure,
            pick.width,
            pick.target.index(),
            pick.position,
            pick.value.index(),
        )
    });
    picks
}
