#[cfg(test)]
#[path = "sessions_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::models::Ledger;
use crate::domain::models::ResumeRecord;
use crate::infrastructure::stores::LedgerStore;
use crate::infrastructure::stores::ResumeStore;

/// Process-wide session state: session id to its ledger, and session id to
/// its uploaded resume. Ledger creation goes through the store upsert and the
/// map entry API, so two racing first requests for one session id end up
/// sharing a single ledger. Per-session appends serialize on the ledger's
/// mutex; distinct sessions share nothing.
pub struct SessionRegistry {
    ledgers: DashMap<String, Arc<Mutex<Ledger>>>,
    store: Arc<LedgerStore>,
    resumes: Arc<ResumeStore>,
}

impl SessionRegistry {
    pub fn new(store: Arc<LedgerStore>, resumes: Arc<ResumeStore>) -> SessionRegistry {
        return SessionRegistry {
            ledgers: DashMap::new(),
            store,
            resumes,
        };
    }

    pub fn create_id() -> String {
        return Uuid::new_v4()
            .to_string()
            .split('-')
            .enumerate()
            .filter_map(|(idx, str)| {
                if idx > 1 {
                    return None;
                }
                return Some(str);
            })
            .collect::<Vec<&str>>()
            .join("-");
    }

    /// Resolves the session's ledger, creating it on first touch. On a cold
    /// registry an existing ledger document is reloaded from the store, so
    /// sessions survive a restart.
    pub async fn ledger(&self, session_id: &str) -> Result<Arc<Mutex<Ledger>>> {
        if let Some(existing) = self.ledgers.get(session_id) {
            return Ok(existing.clone());
        }

        let ledger = self.store.upsert(session_id).await?;
        let entry = self
            .ledgers
            .entry(session_id.to_string())
            .or_insert_with(|| {
                return Arc::new(Mutex::new(ledger));
            });

        return Ok(entry.clone());
    }

    pub async fn upload_resume(&self, session_id: &str, resume: &str) -> Result<()> {
        let record = ResumeRecord::new(session_id, resume);
        self.resumes.save(&record).await?;

        // The resume flow starts chatting right after upload; create the
        // ledger eagerly so the first evaluation never races creation.
        self.ledger(session_id).await?;

        return Ok(());
    }

    pub async fn resume(&self, session_id: &str) -> Result<ResumeRecord> {
        return self.resumes.load(session_id).await;
    }
}
