#[cfg(test)]
#[path = "analyses_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use chrono::DateTime;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::models::InterviewAnalysis;

/// Captured article analyses, one YAML document apiece, listable newest
/// first.
pub struct AnalysisStore {
    pub data_dir: path::PathBuf,
}

impl Default for AnalysisStore {
    fn default() -> AnalysisStore {
        return AnalysisStore::new(super::data_dir().join("analyses"));
    }
}

impl AnalysisStore {
    pub fn new(data_dir: path::PathBuf) -> AnalysisStore {
        return AnalysisStore { data_dir };
    }

    fn file_path(&self, id: &str) -> path::PathBuf {
        return self.data_dir.join(format!("{id}.yaml"));
    }

    pub async fn save(&self, analysis: &InterviewAnalysis) -> Result<()> {
        let payload = serde_yaml::to_string(analysis)?;

        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir).await?;
        }

        let mut file = fs::File::create(self.file_path(&analysis.id)).await?;
        file.write_all(payload.as_bytes()).await?;

        return Ok(());
    }

    pub async fn list(&self) -> Result<Vec<InterviewAnalysis>> {
        let mut analyses: Vec<InterviewAnalysis> = vec![];
        if !self.data_dir.exists() {
            return Ok(analyses);
        }

        let mut dir = fs::read_dir(&self.data_dir).await?;
        while let Some(file) = dir.next_entry().await? {
            let payload = fs::read_to_string(file.path()).await?;
            let analysis: InterviewAnalysis = serde_yaml::from_str(&payload)?;
            analyses.push(analysis);
        }

        analyses.sort_by_cached_key(|analysis| {
            return DateTime::parse_from_rfc3339(&analysis.created_at).unwrap();
        });
        analyses.reverse();

        return Ok(analyses);
    }
}
