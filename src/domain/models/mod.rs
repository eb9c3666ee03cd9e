mod analysis;
mod execution;
mod ledger;
mod outcome;
mod problem;
mod reasoner;
mod resume;
mod turn;

pub use analysis::*;
pub use execution::*;
pub use ledger::*;
pub use outcome::*;
pub use problem::*;
pub use reasoner::*;
pub use resume::*;
pub use turn::*;
