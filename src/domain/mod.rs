mod forms;
mod friend;
mod ledger;
mod money;
mod selection;
mod settlement;

pub use forms::*;
pub use friend::*;
pub use ledger::*;
pub use money::*;
pub use selection::*;
pub use settlement::*;
