use std::path;

use anyhow::bail;
use anyhow::Result;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::models::ResumeRecord;

/// One resume document per session, uploaded once and read on every
/// resume-flow evaluation.
pub struct ResumeStore {
    pub data_dir: path::PathBuf,
}

impl Default for ResumeStore {
    fn default() -> ResumeStore {
        return ResumeStore::new(super::data_dir().join("resumes"));
    }
}

impl ResumeStore {
    pub fn new(data_dir: path::PathBuf) -> ResumeStore {
        return ResumeStore { data_dir };
    }

    fn file_path(&self, session_id: &str) -> path::PathBuf {
        return self.data_dir.join(format!("{session_id}.yaml"));
    }

    pub async fn save(&self, record: &ResumeRecord) -> Result<()> {
        let payload = serde_yaml::to_string(record)?;

        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir).await?;
        }

        let mut file = fs::File::create(self.file_path(&record.session_id)).await?;
        file.write_all(payload.as_bytes()).await?;

        return Ok(());
    }

    pub async fn load(&self, session_id: &str) -> Result<ResumeRecord> {
        let file_path = self.file_path(session_id);
        if !file_path.exists() {
            bail!(format!("No resume found for session {session_id}"));
        }

        let payload = fs::read_to_string(file_path).await?;
        let record: ResumeRecord = serde_yaml::from_str(&payload)?;

        return Ok(record);
    }
}
