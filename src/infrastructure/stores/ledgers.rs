#[cfg(test)]
#[path = "ledgers_test.rs"]
mod tests;

use std::path;

use anyhow::bail;
use anyhow::Result;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::models::Ledger;

/// One YAML ledger document per session. `upsert` is the only creation path,
/// which keeps first-touch creation idempotent no matter how many callers
/// race on a never-seen session id.
pub struct LedgerStore {
    pub data_dir: path::PathBuf,
}

impl Default for LedgerStore {
    fn default() -> LedgerStore {
        return LedgerStore::new(super::data_dir().join("ledgers"));
    }
}

impl LedgerStore {
    pub fn new(data_dir: path::PathBuf) -> LedgerStore {
        return LedgerStore { data_dir };
    }

    fn file_path(&self, session_id: &str) -> path::PathBuf {
        return self.data_dir.join(format!("{session_id}.yaml"));
    }

    pub async fn upsert(&self, session_id: &str) -> Result<Ledger> {
        let file_path = self.file_path(session_id);
        if file_path.exists() {
            return self.load(session_id).await;
        }

        let ledger = Ledger::new(session_id);
        self.save(&ledger).await?;

        return Ok(ledger);
    }

    pub async fn load(&self, session_id: &str) -> Result<Ledger> {
        let file_path = self.file_path(session_id);
        if !file_path.exists() {
            bail!(format!("No ledger found for session {session_id}"));
        }

        let payload = fs::read_to_string(file_path).await?;
        let ledger: Ledger = serde_yaml::from_str(&payload)?;

        return Ok(ledger);
    }

    pub async fn save(&self, ledger: &Ledger) -> Result<()> {
        let payload = serde_yaml::to_string(ledger)?;

        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir).await?;
        }

        let mut file = fs::File::create(self.file_path(&ledger.session_id)).await?;
        file.write_all(payload.as_bytes()).await?;

        return Ok(());
    }
}
