use crate::game::player::Player;
use crate::game::value::Value;
use crate::Position;

/// failures surfaced by the engine. contradiction variants leave the
/// state frozen where it broke for inspection; replaying the journal
/// from a snapshot is the road back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// a candidate set ran out of values
    Empty {
        event: Option<usize>,
        player: Player,
        position: Position,
    },
    /// a player has no enumerable hand left
    Starved {
        event: Option<usize>,
        player: Player,
    },
    /// more copies of a value claimed than the deck holds
    Counters {
        event: Option<usize>,
        value: Value,
    },
    /// more slots confined to a value set than it has copies
    Crowded {
        event: Option<usize>,
        slots: usize,
        copies: usize,
    },
    /// no combination of hands reassembles the full deck
    Unreachable { event: Option<usize> },
    /// the event referenced something that does not exist, or lied
    InvalidEvent(String),
    /// the game parameters do not describe a playable table
    InvalidConfig(String),
    /// hand enumeration ran out of time; the solver degrades that
    /// hand to unconstrained rather than surfacing this to callers
    Budget,
}

impl Error {
    pub fn is_contradiction(&self) -> bool {
        matches!(
            self,
            Self::Empty { .. }
                | Self::Starved { .. }
                | Self::Counters { .. }
                | Self::Crowded { .. }
                | Self::Unreachable { .. }
        )
    }

    /// annotate a contradiction with the journal index it surfaced under
    pub fn tag(self, id: usize) -> Self {
        match self {
            Self::Empty {
                event: None,
                player,
                position,
            } => Self::Empty {
                event: Some(id),
                player,
                position,
            },
            Self::Starved { event: None, player } => Self::Starved {
                event: Some(id),
                player,
            },
            Self::Counters { event: None, value } => Self::Counters {
                event: Some(id),
                value,
            },
            Self::Crowded {
                event: None,
                slots,
                copies,
            } => Self::Crowded {
                event: Some(id),
                slots,
                copies,
            },
            Self::Unreachable { event: None } => Self::Unreachable { event: Some(id) },
            other => other,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let id = |event: &Option<usize>| match event {
            Some(i) => format!(" at event {}", i),
            None => String::new(),
        };
        match self {
            Self::Empty {
                event,
                player,
                position,
            } => write!(f, "no candidate left for {}[{}]{}", player, position, id(event)),
            Self::Starved { event, player } => {
                write!(f, "no valid hand left for {}{}", player, id(event))
            }
            Self::Counters { event, value } => {
                write!(f, "too many copies of {} claimed{}", value, id(event))
            }
            Self::Crowded {
                event,
                slots,
                copies,
            } => write!(f, "{} slots chasing {} copies{}", slots, copies, id(event)),
            Self::Unreachable { event } => {
                write!(f, "hands cannot reassemble the deck{}", id(event))
            }
            Self::InvalidEvent(why) => write!(f, "invalid event: {}", why),
            Self::InvalidConfig(why) => write!(f, "invalid config: {}", why),
            Self::Budget => write!(f, "global solver budget exhausted"),
        }
    }
}

impl std::error::Error for Error {}
