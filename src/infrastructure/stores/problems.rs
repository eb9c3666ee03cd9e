use std::path;

use anyhow::Result;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::models::Problem;

/// Persisted problem documents. Lookups return `None` on a miss so callers
/// can fall back to the embedded catalog.
pub struct ProblemStore {
    pub data_dir: path::PathBuf,
}

impl Default for ProblemStore {
    fn default() -> ProblemStore {
        return ProblemStore::new(super::data_dir().join("problems"));
    }
}

impl ProblemStore {
    pub fn new(data_dir: path::PathBuf) -> ProblemStore {
        return ProblemStore { data_dir };
    }

    fn file_path(&self, id: &str) -> path::PathBuf {
        return self.data_dir.join(format!("{id}.yaml"));
    }

    pub async fn load(&self, id: &str) -> Result<Option<Problem>> {
        let file_path = self.file_path(id);
        if !file_path.exists() {
            return Ok(None);
        }

        let payload = fs::read_to_string(file_path).await?;
        let problem: Problem = serde_yaml::from_str(&payload)?;

        return Ok(Some(problem));
    }

    pub async fn save(&self, problem: &Problem) -> Result<()> {
        let payload = serde_yaml::to_string(problem)?;

        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir).await?;
        }

        let mut file = fs::File::create(self.file_path(&problem.id)).await?;
        file.write_all(payload.as_bytes()).await?;

        return Ok(());
    }
}
