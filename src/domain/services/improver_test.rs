use std::sync::Arc;
use std::sync::Mutex;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;

use super::Improver;
use crate::domain::models::Reasoner;
use crate::domain::models::ReasonerBox;
use crate::domain::models::ReasonerPrompt;
use crate::domain::models::TurnKind;
use crate::domain::services::SessionRegistry;
use crate::infrastructure::stores::LedgerStore;
use crate::infrastructure::stores::ResumeStore;
use crate::infrastructure::stores::TurnStore;

struct ScriptedReasoner {
    replies: Mutex<Vec<String>>,
}

impl ScriptedReasoner {
    fn new(replies: Vec<&str>) -> Arc<ScriptedReasoner> {
        return Arc::new(ScriptedReasoner {
            replies: Mutex::new(replies.iter().map(|reply| return reply.to_string()).collect()),
        });
    }
}

#[async_trait]
impl Reasoner for ScriptedReasoner {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn complete(&self, _prompt: ReasonerPrompt) -> Result<String> {
        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            bail!("Reasoning service is unreachable");
        }
        return Ok(replies.remove(0));
    }
}

fn build(replies: Vec<&str>) -> (Improver, Arc<SessionRegistry>, Arc<TurnStore>, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let turns = Arc::new(TurnStore::new(dir.path().join("turns")));
    let ledgers = Arc::new(LedgerStore::new(dir.path().join("ledgers")));
    let resumes = Arc::new(ResumeStore::new(dir.path().join("resumes")));
    let registry = Arc::new(SessionRegistry::new(ledgers.clone(), resumes));
    let reasoner: ReasonerBox = ScriptedReasoner::new(replies);
    let improver = Improver::new(registry.clone(), turns.clone(), ledgers, reasoner);

    return (improver, registry, turns, dir);
}

#[tokio::test]
async fn it_appends_a_synthetic_turn() -> Result<()> {
    let (improver, registry, turns, _dir) = build(vec!["A sharper answer"]);

    improver
        .run("session-1", Improver::coding_prompt("Two Sum", "print(1)", "I think a loop works"))
        .await?;

    let ledger = registry.ledger("session-1").await?;
    let guard = ledger.lock().await;
    assert_eq!(guard.len(), 1);
    assert_eq!(guard.messages[0].kind, TurnKind::User);

    let entry = turns.resolve(&guard.messages[0]).await?;
    assert!(entry.improved);
    assert_eq!(entry.text, "A sharper answer");

    return Ok(());
}

#[tokio::test]
async fn it_appends_nothing_when_no_improvement_is_needed() -> Result<()> {
    let (improver, registry, _turns, _dir) = build(vec!["none"]);

    improver
        .run("session-1", Improver::coding_prompt("Two Sum", "", "A fine answer"))
        .await?;

    let ledger = registry.ledger("session-1").await?;
    assert!(ledger.lock().await.is_empty());

    return Ok(());
}

#[tokio::test]
async fn it_surfaces_reasoner_failures_to_the_spawner() {
    let (improver, _registry, _turns, _dir) = build(vec![]);

    let res = improver
        .run("session-1", Improver::coding_prompt("Two Sum", "", "An answer"))
        .await;
    assert!(res.is_err());
}

#[test]
fn it_builds_enrichment_prompts() {
    let prompt = Improver::coding_prompt("Two Sum", "print(1)", "I think a loop works");
    assert_eq!(prompt.context, super::IMPROVE_CONTEXT);
    assert!(prompt.input.contains("Interview Question:\nTwo Sum"));
    assert!(prompt.input.contains("Latest Code:\nprint(1)"));
    assert!(prompt.history.is_empty());

    let prompt = Improver::resume_prompt("Jordan Doe. Rust since 2019.", "I shipped a parser");
    assert_eq!(prompt.context, super::RESUME_IMPROVE_CONTEXT);
    assert!(prompt.input.contains("Resume:\nJordan Doe. Rust since 2019."));
    assert!(prompt.input.contains("Interview Transcript:\nI shipped a parser"));
}
