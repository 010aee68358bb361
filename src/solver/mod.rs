pub mod cache;
pub use cache::*;

pub mod explorer;
pub use explorer::*;

pub mod global;
pub use global::*;

pub mod reach;
pub use reach::*;

pub mod variants;
pub use variants::*;
