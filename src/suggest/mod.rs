pub mod call;
pub use call::*;

pub mod chance;
pub use chance::*;

pub mod entropy;
pub use entropy::*;
