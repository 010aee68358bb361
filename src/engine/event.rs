use crate::beliefs::call::Call;
use crate::beliefs::signal::Multiplicity;
use crate::beliefs::signal::Relation;
use crate::game::player::Player;
use crate::game::value::Value;
use crate::Position;
use colored::*;

/// two players trade the wires at two positions and re-sort. the
/// realized wire values ride along in the record: where the incoming
/// wire lands depends on what it was, so a log without the values
/// cannot be replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Swap {
    pub left: Player,
    pub right: Player,
    pub from_left: Position,
    pub from_right: Position,
    /// where the wire received from `right` settled in `left`'s hand
    pub to_left: Position,
    pub to_right: Position,
    /// value of the wire that left `left`'s hand
    pub wire_left: Value,
    pub wire_right: Value,
}

/// every public action the table can produce, in the order the
/// engine consumes them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Event {
    Call(Call),
    DoubleReveal {
        player: Player,
        value: Value,
        first: Position,
        second: Position,
    },
    Swap(Swap),
    Certain {
        player: Player,
        position: Position,
        value: Value,
    },
    Absent {
        player: Player,
        value: Value,
    },
    Pin {
        player: Player,
        position: Position,
        class: Multiplicity,
    },
    Link {
        player: Player,
        position: Position,
        relation: Relation,
    },
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call(call) => write!(f, "{}", call),
            Self::DoubleReveal {
                player,
                value,
                first,
                second,
            } => write!(
                f,
                "{} {} {} [{} {}]",
                player,
                "SHOW2".magenta(),
                value,
                first,
                second,
            ),
            Self::Swap(swap) => write!(
                f,
                "{} {} {}[{}] {}[{}]",
                swap.left,
                "SWAP".yellow(),
                swap.right,
                swap.from_right,
                swap.left,
                swap.from_left,
            ),
            Self::Certain {
                player,
                position,
                value,
            } => write!(f, "{} {} [{}] {}", player, "SHOW".cyan(), position, value),
            Self::Absent { player, value } => {
                write!(f, "{} {} {}", player, "NONE".blue(), value)
            }
            Self::Pin {
                player,
                position,
                class,
            } => write!(f, "{} {} [{}] {}", player, "PIN".white(), position, class),
            Self::Link {
                player,
                position,
                relation,
            } => write!(
                f,
                "{} {} [{}]{}[{}]",
                player,
                "LINK".white(),
                position,
                relation,
                position + 1,
            ),
        }
    }
}
