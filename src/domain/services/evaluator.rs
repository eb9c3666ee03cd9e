#[cfg(test)]
#[path = "evaluator_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::AgentTurn;
use crate::domain::models::ChatMessageRef;
use crate::domain::models::EvaluationOutcome;
use crate::domain::models::Ledger;
use crate::domain::models::ReasonerBox;
use crate::domain::models::ReasonerPrompt;
use crate::domain::models::UserTurn;
use crate::infrastructure::stores::LedgerStore;
use crate::infrastructure::stores::TurnStore;

use super::transcript;
use super::Improver;
use super::SessionRegistry;

const INTERVIEWER_CONTEXT: &str = "You are an AI mock interviewer for a coding round. You will receive the candidate's partial code, recent transcript of their thought process, and chat history. Your job is to give helpful, brief feedback like a real interviewer. You are professional, encouraging, and offer subtle hints if the candidate is off track. Do not reveal full solutions. Never sound robotic. Provide feedback only based on what the candidate has explained or written so far. Respond in 1-3 sentences maximum.";

const RESUME_INTERVIEWER_CONTEXT: &str = "You are a professional mock interviewer. Use the resume and chat history below to: 1. Briefly respond to the latest message from the interviewee. 2. Ask a relevant follow-up question, continuing the interview in a thoughtful way. Your response should sound natural and human. Keep it brief, engaging, and context-aware. First, write your reply to the candidate. Then, include your next interview question.";

/// An enrichment pass only kicks in once a conversation has this many refs;
/// the opening exchanges are left untouched.
const IMPROVEMENT_THRESHOLD: usize = 4;

/// The evaluation pipeline for one interview turn: resolve the session's
/// ledger, build a prompt from the latest contribution plus the rendered
/// prior transcript, call the reasoning service, persist both turns, and
/// hand the reply back. Enrichment runs detached afterwards.
pub struct Evaluator {
    registry: Arc<SessionRegistry>,
    turns: Arc<TurnStore>,
    ledgers: Arc<LedgerStore>,
    reasoner: ReasonerBox,
    improver: Arc<Improver>,
}

impl Evaluator {
    pub fn new(
        registry: Arc<SessionRegistry>,
        turns: Arc<TurnStore>,
        ledgers: Arc<LedgerStore>,
        reasoner: ReasonerBox,
        improver: Arc<Improver>,
    ) -> Evaluator {
        return Evaluator {
            registry,
            turns,
            ledgers,
            reasoner,
            improver,
        };
    }

    pub async fn evaluate(
        &self,
        session_id: &str,
        code: &str,
        transcript_text: &str,
        question: &str,
    ) -> Result<EvaluationOutcome> {
        if session_id.trim().is_empty() {
            bail!("A session id is required");
        }

        let user_turn = UserTurn::new(Some(code), Some(transcript_text));
        if user_turn.is_empty() {
            bail!("Either code or a transcript is required");
        }

        let prompt_input = format!(
            "Interview Question:\n{question}\n\nLatest Transcript:\n{transcript_text}\n\nLatest Code:\n{code}"
        );

        let outcome = self
            .run_turn(session_id, user_turn, INTERVIEWER_CONTEXT, &prompt_input)
            .await?;

        if outcome.status {
            self.spawn_improvement(
                session_id,
                Improver::coding_prompt(question, code, transcript_text),
            )
            .await;
        }

        return Ok(outcome);
    }

    pub async fn upload_resume(&self, session_id: &str, resume: &str) -> Result<EvaluationOutcome> {
        if session_id.trim().is_empty() {
            bail!("A session id is required");
        }
        if resume.trim().is_empty() {
            bail!("A resume is required");
        }

        self.registry.upload_resume(session_id, resume).await?;

        return Ok(EvaluationOutcome::ok(
            "Resume uploaded and processed successfully",
        ));
    }

    pub async fn evaluate_resume(
        &self,
        session_id: &str,
        transcript_text: &str,
    ) -> Result<EvaluationOutcome> {
        if session_id.trim().is_empty() {
            bail!("A session id is required");
        }
        if transcript_text.trim().is_empty() {
            bail!("A transcript is required");
        }

        // Hard precondition: no resume on file means the session never went
        // through upload, not a state to paper over.
        let resume = self.registry.resume(session_id).await?;

        let user_turn = UserTurn::new(None, Some(transcript_text));
        let prompt_input = format!(
            "Resume:\n{resume}\n\nLast Message from Interviewee:\n{transcript_text}",
            resume = resume.text
        );

        let outcome = self
            .run_turn(
                session_id,
                user_turn,
                RESUME_INTERVIEWER_CONTEXT,
                &prompt_input,
            )
            .await?;

        if outcome.status {
            self.spawn_improvement(
                session_id,
                Improver::resume_prompt(&resume.text, transcript_text),
            )
            .await;
        }

        return Ok(outcome);
    }

    async fn run_turn(
        &self,
        session_id: &str,
        user_turn: UserTurn,
        context: &str,
        prompt_input: &str,
    ) -> Result<EvaluationOutcome> {
        let ledger = self.registry.ledger(session_id).await?;
        let mut guard = ledger.lock().await;

        let entries = transcript::resolve(&guard, &self.turns).await?;
        let history = transcript::render(&entries);

        let prompt = ReasonerPrompt::new(context, prompt_input, &history);
        let reply = match self.reasoner.complete(prompt).await {
            Ok(reply) => reply,
            Err(err) => {
                tracing::error!(
                    error = ?err,
                    session_id = session_id,
                    "Reasoning service failed to evaluate turn"
                );
                return Ok(EvaluationOutcome::failed(&format!(
                    "Evaluation failed: {err}"
                )));
            }
        };

        let agent_turn = AgentTurn::new(&reply);
        if let Err(err) = self.persist_turn(&mut guard, &user_turn, &agent_turn).await {
            // The reply is already in hand; losing the bookkeeping write is
            // an accepted inconsistency, not a failed evaluation.
            tracing::error!(
                error = ?err,
                session_id = session_id,
                "Failed to persist evaluated turn"
            );
        }

        return Ok(EvaluationOutcome::ok(&agent_turn.content));
    }

    async fn persist_turn(
        &self,
        ledger: &mut Ledger,
        user_turn: &UserTurn,
        agent_turn: &AgentTurn,
    ) -> Result<()> {
        self.turns.save_user(user_turn).await?;
        self.turns.save_agent(agent_turn).await?;

        ledger.append(ChatMessageRef::user(&user_turn.id));
        ledger.append(ChatMessageRef::agent(&agent_turn.id));
        self.ledgers.save(ledger).await?;

        return Ok(());
    }

    /// Fires the enrichment task without awaiting it. The task re-acquires
    /// the session ledger on its own; whatever it hits is logged and
    /// dropped.
    async fn spawn_improvement(&self, session_id: &str, prompt: ReasonerPrompt) {
        let ledger = match self.registry.ledger(session_id).await {
            Ok(ledger) => ledger,
            Err(err) => {
                tracing::error!(error = ?err, session_id = session_id, "Improvement skipped");
                return;
            }
        };
        if ledger.lock().await.len() <= IMPROVEMENT_THRESHOLD {
            return;
        }

        let improver = self.improver.clone();
        let session_id = session_id.to_string();
        tokio::spawn(async move {
            if let Err(err) = improver.run(&session_id, prompt).await {
                tracing::error!(
                    error = ?err,
                    session_id = session_id,
                    "Improvement task failed"
                );
            }
        });
    }
}
