#[cfg(test)]
#[path = "turns_test.rs"]
mod tests;

use std::path;

use anyhow::bail;
use anyhow::Result;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::models::AgentTurn;
use crate::domain::models::ChatMessageRef;
use crate::domain::models::TranscriptEntry;
use crate::domain::models::TurnKind;
use crate::domain::models::UserTurn;

/// Persisted user and agent turns, one YAML document per turn, split into a
/// collection per kind. A [ChatMessageRef] only ever resolves against the
/// collection its tag names.
pub struct TurnStore {
    pub data_dir: path::PathBuf,
}

impl Default for TurnStore {
    fn default() -> TurnStore {
        return TurnStore::new(super::data_dir().join("turns"));
    }
}

impl TurnStore {
    pub fn new(data_dir: path::PathBuf) -> TurnStore {
        return TurnStore { data_dir };
    }

    fn user_path(&self, id: &str) -> path::PathBuf {
        return self.data_dir.join("user").join(format!("{id}.yaml"));
    }

    fn agent_path(&self, id: &str) -> path::PathBuf {
        return self.data_dir.join("agent").join(format!("{id}.yaml"));
    }

    async fn write(&self, file_path: path::PathBuf, payload: String) -> Result<()> {
        let parent = file_path.parent().unwrap();
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::File::create(file_path).await?;
        file.write_all(payload.as_bytes()).await?;

        return Ok(());
    }

    pub async fn save_user(&self, turn: &UserTurn) -> Result<()> {
        let payload = serde_yaml::to_string(turn)?;
        return self.write(self.user_path(&turn.id), payload).await;
    }

    pub async fn save_agent(&self, turn: &AgentTurn) -> Result<()> {
        let payload = serde_yaml::to_string(turn)?;
        return self.write(self.agent_path(&turn.id), payload).await;
    }

    pub async fn load_user(&self, id: &str) -> Result<UserTurn> {
        let file_path = self.user_path(id);
        if !file_path.exists() {
            bail!(format!("No user turn found for id {id}"));
        }

        let payload = fs::read_to_string(file_path).await?;
        let turn: UserTurn = serde_yaml::from_str(&payload)?;

        return Ok(turn);
    }

    pub async fn load_agent(&self, id: &str) -> Result<AgentTurn> {
        let file_path = self.agent_path(id);
        if !file_path.exists() {
            bail!(format!("No agent turn found for id {id}"));
        }

        let payload = fs::read_to_string(file_path).await?;
        let turn: AgentTurn = serde_yaml::from_str(&payload)?;

        return Ok(turn);
    }

    /// Resolves a tagged reference through the fetcher for its kind.
    pub async fn resolve(&self, reference: &ChatMessageRef) -> Result<TranscriptEntry> {
        match reference.kind {
            TurnKind::User => {
                let turn = self.load_user(&reference.message_id).await?;
                return Ok(TranscriptEntry {
                    kind: TurnKind::User,
                    text: turn.text(),
                    improved: turn.improved,
                });
            }
            TurnKind::Agent => {
                let turn = self.load_agent(&reference.message_id).await?;
                return Ok(TranscriptEntry {
                    kind: TurnKind::Agent,
                    text: turn.content,
                    improved: false,
                });
            }
        }
    }
}
