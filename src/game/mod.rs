pub mod deck;
pub use deck::*;

pub mod domain;
pub use domain::*;

pub mod hand;
pub use hand::*;

pub mod player;
pub use player::*;

pub mod signature;
pub use signature::*;

pub mod tally;
pub use tally::*;

pub mod value;
pub use value::*;
