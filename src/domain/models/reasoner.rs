use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

/// A fully assembled prompt for one reasoning-service call: the interviewer
/// context, the candidate's latest contribution, and the rendered prior
/// transcript.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct ReasonerPrompt {
    pub context: String,
    pub input: String,
    pub history: String,
}

impl ReasonerPrompt {
    pub fn new(context: &str, input: &str, history: &str) -> ReasonerPrompt {
        return ReasonerPrompt {
            context: context.to_string(),
            input: input.to_string(),
            history: history.to_string(),
        };
    }

    /// The flattened single-message form used by completion-style services
    /// that take one text blob rather than role-tagged messages.
    pub fn flatten(&self) -> String {
        let mut sections = vec![self.context.to_string()];
        if !self.history.is_empty() {
            sections.push(format!("Chat History:\n{}", self.history));
        }
        sections.push(self.input.to_string());

        return sections.join("\n\n");
    }
}

#[async_trait]
pub trait Reasoner {
    /// Used at startup to verify all configuration is in place to reach the
    /// reasoning service.
    async fn health_check(&self) -> Result<()>;

    /// Sends one prompt to the reasoning service and resolves with its full
    /// text reply. Calls may take seconds; callers must await without
    /// blocking other sessions, and must treat an `Err` as a turn-level
    /// failure rather than a process-level one.
    async fn complete(&self, prompt: ReasonerPrompt) -> Result<String>;
}

pub type ReasonerBox = Arc<dyn Reasoner + Send + Sync>;
