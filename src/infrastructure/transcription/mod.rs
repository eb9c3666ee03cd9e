mod assemblyai;

pub use assemblyai::*;
