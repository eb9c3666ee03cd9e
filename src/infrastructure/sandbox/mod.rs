mod piston;

pub use piston::*;
