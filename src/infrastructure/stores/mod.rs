mod analyses;
mod ledgers;
mod problems;
mod resumes;
mod turns;

use std::path;

pub use analyses::*;
pub use ledgers::*;
pub use problems::*;
pub use resumes::*;
pub use turns::*;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

/// The configured data root, or the platform default when configuration has
/// not been loaded.
pub fn data_dir() -> path::PathBuf {
    let configured = Config::get(ConfigKey::DataDir);
    if configured.is_empty() {
        return dirs::data_dir().unwrap().join("crackit");
    }

    return path::PathBuf::from(configured);
}
