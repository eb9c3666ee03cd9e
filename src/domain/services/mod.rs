pub mod catalog;
mod evaluator;
mod improver;
mod selector;
mod sessions;
pub mod transcript;

pub use evaluator::*;
pub use improver::*;
pub use selector::*;
pub use sessions::*;
