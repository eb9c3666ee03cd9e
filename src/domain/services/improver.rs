#[cfg(test)]
#[path = "improver_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;

use crate::domain::models::ChatMessageRef;
use crate::domain::models::ReasonerBox;
use crate::domain::models::ReasonerPrompt;
use crate::domain::models::UserTurn;
use crate::infrastructure::stores::LedgerStore;
use crate::infrastructure::stores::TurnStore;

use super::transcript;
use super::SessionRegistry;

const IMPROVE_CONTEXT: &str = "You are an AI assistant that evaluates a candidate's speech transcriptions and suggests improved versions based on the context. Review the speech transcript and the chat history to understand the context. If the response is already good and no improvement is needed, simply return \"none\". Otherwise, provide a more clear, concise, and effective version of what the candidate was trying to communicate.";

const RESUME_IMPROVE_CONTEXT: &str = "Please analyze the following resume and interviewee answer transcript, considering the provided chat history. Based on this analysis, generate an improved and more effective message that the candidate could have spoken. The improved message should be concise, professional, and highlight relevant skills and experiences from the resume that align with the interview discussion. The improved message should be around the same length as the original message, if shorter then better.";

/// Background transcript enrichment: asks the reasoning service to rewrite
/// the candidate's last contribution and appends the rewrite as a synthetic
/// turn. Always runs detached from the request that triggered it; failures
/// are logged by the spawner and never surface to the candidate.
pub struct Improver {
    registry: Arc<SessionRegistry>,
    turns: Arc<TurnStore>,
    ledgers: Arc<LedgerStore>,
    reasoner: ReasonerBox,
}

impl Improver {
    pub fn new(
        registry: Arc<SessionRegistry>,
        turns: Arc<TurnStore>,
        ledgers: Arc<LedgerStore>,
        reasoner: ReasonerBox,
    ) -> Improver {
        return Improver {
            registry,
            turns,
            ledgers,
            reasoner,
        };
    }

    pub fn coding_prompt(question: &str, code: &str, transcript: &str) -> ReasonerPrompt {
        return ReasonerPrompt::new(
            IMPROVE_CONTEXT,
            &format!(
                "Interview Question:\n{question}\n\nLatest Transcript:\n{transcript}\n\nLatest Code:\n{code}"
            ),
            "",
        );
    }

    pub fn resume_prompt(resume: &str, transcript: &str) -> ReasonerPrompt {
        return ReasonerPrompt::new(
            RESUME_IMPROVE_CONTEXT,
            &format!(
                "Resume:\n{resume}\n\nInterview Transcript:\n{transcript}\n\nImproved Follow-up Message:"
            ),
            "",
        );
    }

    /// Runs one enrichment pass. The history is rendered fresh so the
    /// rewrite sees the turn that triggered it; a reply of `none` means the
    /// original wording stands and nothing is appended.
    pub async fn run(&self, session_id: &str, mut prompt: ReasonerPrompt) -> Result<()> {
        let ledger = self.registry.ledger(session_id).await?;
        {
            let guard = ledger.lock().await;
            let entries = transcript::resolve(&guard, &self.turns).await?;
            prompt.history = transcript::render(&entries);
        }

        let reply = self.reasoner.complete(prompt).await?;
        let improved = reply.trim();
        if improved.is_empty() || improved.eq_ignore_ascii_case("none") {
            return Ok(());
        }

        let turn = UserTurn::new_improved(improved);
        self.turns.save_user(&turn).await?;

        let mut guard = ledger.lock().await;
        guard.append(ChatMessageRef::user(&turn.id));
        self.ledgers.save(&guard).await?;

        tracing::debug!(
            session_id = session_id,
            turn_id = turn.id,
            "Appended improved turn"
        );

        return Ok(());
    }
}
