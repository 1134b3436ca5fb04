mod export;
mod roster;

pub use export::*;
pub use roster::*;
