use crate::game::player::Player;
use crate::game::value::Value;
use crate::Position;
use colored::*;

/// public record of one call. a hit exposes two wires: the target's
/// at `position` and the caller's matching copy at `shown`. a miss
/// strips `value` from the target slot and leaves the caller with a
/// floating copy (position unknown) of the value they claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Call {
    pub caller: Player,
    pub target: Player,
    pub position: Position,
    pub value: Value,
    pub hit: bool,
    /// caller's exposed position, present exactly on a hit
    pub shown: Option<Position>,
}

impl std::fmt::Display for Call {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.hit {
            true => write!(
                f,
                "{} {} {}[{}] {}",
                self.caller,
                "CALL".green(),
                self.target,
                self.position,
                self.value,
            ),
            false => write!(
                f,
                "{} {} {}[{}] {}",
                self.caller,
                "MISS".red(),
                self.target,
                self.position,
                self.value,
            ),
        }
    }
}
