pub mod beliefs;
pub use beliefs::*;

pub mod call;
pub use call::*;

pub mod signal;
pub use signal::*;

pub mod spot;
pub use spot::*;

pub mod tracker;
pub use tracker::*;
