use std::sync::Arc;
use std::sync::Mutex;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use test_utils::article_fixture;
use test_utils::resume_fixture;

use super::Api;
use super::EvaluateRequest;
use super::EvaluateResumeRequest;
use super::ExecuteRequest;
use super::UploadResumeRequest;
use crate::domain::models::ExecutionStatus;
use crate::domain::models::Problem;
use crate::domain::models::Reasoner;
use crate::domain::models::ReasonerBox;
use crate::domain::models::ReasonerPrompt;
use crate::domain::services::Evaluator;
use crate::domain::services::Improver;
use crate::domain::services::Selector;
use crate::domain::services::SessionRegistry;
use crate::infrastructure::sandbox::Piston;
use crate::infrastructure::stores::AnalysisStore;
use crate::infrastructure::stores::LedgerStore;
use crate::infrastructure::stores::ProblemStore;
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

fn build(
    replies: Vec<&str>,
    sandbox_url: &str,
) -> (
    Api,
    Arc<SessionRegistry>,
    Arc<ProblemStore>,
    tempfile::TempDir,
) {
    let dir = tempfile::tempdir().unwrap();
    let turns = Arc::new(TurnStore::new(dir.path().join("turns")));
    let ledgers = Arc::new(LedgerStore::new(dir.path().join("ledgers")));
    let resumes = Arc::new(ResumeStore::new(dir.path().join("resumes")));
    let registry = Arc::new(SessionRegistry::new(ledgers.clone(), resumes));
    let analyses = Arc::new(AnalysisStore::new(dir.path().join("analyses")));
    let problems = Arc::new(ProblemStore::new(dir.path().join("problems")));

    let reasoner: ReasonerBox = ScriptedReasoner::new(replies);
    let improver = Arc::new(Improver::new(
        registry.clone(),
        turns.clone(),
        ledgers.clone(),
        reasoner.clone(),
    ));
    let evaluator = Arc::new(Evaluator::new(
        registry.clone(),
        turns,
        ledgers,
        reasoner.clone(),
        improver,
    ));
    let selector = Arc::new(Selector::new(reasoner, analyses.clone()));

    let api = Api::new(
        evaluator,
        selector,
        Arc::new(Piston::new(sandbox_url)),
        problems.clone(),
        analyses,
    );

    return (api, registry, problems, dir);
}

#[test]
fn it_creates_session_ids() {
    let (api, _registry, _problems, _dir) = build(vec![], "http://localhost:1");

    let first = api.create_session_id();
    let second = api.create_session_id();
    assert!(!first.session_id.is_empty());
    assert_ne!(first.session_id, second.session_id);
}

#[tokio::test]
async fn it_validates_execute_requests() {
    let (api, _registry, _problems, _dir) = build(vec![], "http://localhost:1");

    let res = api
        .execute(ExecuteRequest {
            language: "".to_string(),
            content: "print(1)".to_string(),
            ..ExecuteRequest::default()
        })
        .await;
    assert!(res.is_err());
}

#[tokio::test]
async fn it_executes_code() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/execute")
        .with_status(200)
        .with_body(
            "{\"language\": \"python\", \"version\": \"3.10.0\", \"run\": {\"stdout\": \"2\\n\", \"stderr\": \"\", \"output\": \"2\\n\", \"code\": 0, \"wall_time\": 40, \"memory\": 9000000}}",
        )
        .create();

    let (api, _registry, _problems, _dir) = build(vec![], &server.url());
    let res = api
        .execute(ExecuteRequest {
            language: "python".to_string(),
            content: "print(1+1)".to_string(),
            version: Some("3.10".to_string()),
            ..ExecuteRequest::default()
        })
        .await?;
    mock.assert();

    assert!(res.success);
    assert_eq!(res.status, ExecutionStatus::OK);
    assert_eq!(res.result.run.stdout, "2\n");

    return Ok(());
}

#[tokio::test]
async fn it_serves_catalog_problems_with_derived_examples() -> Result<()> {
    let (api, _registry, _problems, _dir) = build(vec![], "http://localhost:1");

    let res = api.problem("680294d88e98930b17e3c6d7").await?;
    assert!(res.success);
    assert_eq!(
        res.problem.problem.title,
        "Occurrence of a Character in a String"
    );

    let examples = res.problem.examples.unwrap();
    assert_eq!(examples.len(), 5);
    assert!(examples[0].input.contains("hello world"));

    let constraints = res.problem.constraints.unwrap();
    assert!(constraints.contains(&"This problem involves string".to_string()));

    return Ok(());
}

#[tokio::test]
async fn it_serves_stored_problems_as_is() -> Result<()> {
    let (api, _registry, problems, _dir) = build(vec![], "http://localhost:1");

    let stored = Problem {
        id: "abcdefabcdefabcdefabcdef".to_string(),
        title: "Stored Problem".to_string(),
        ..Problem::default()
    };
    problems.save(&stored).await?;

    let res = api.problem("abcdefabcdefabcdefabcdef").await?;
    assert!(res.success);
    assert_eq!(res.problem.problem.title, "Stored Problem");
    assert!(res.problem.examples.is_none());

    return Ok(());
}

#[tokio::test]
async fn it_rejects_malformed_and_unknown_problem_ids() {
    let (api, _registry, _problems, _dir) = build(vec![], "http://localhost:1");

    assert!(api.problem("not-an-id").await.is_err());
    assert!(api.problem("000000000000000000000000").await.is_err());
}

#[tokio::test]
async fn it_evaluates_turns_through_the_pipeline() -> Result<()> {
    let (api, registry, _problems, _dir) = build(
        vec!["Nice start.", "Watch the edge cases."],
        "http://localhost:1",
    );

    for _ in 0..2 {
        let outcome = api
            .evaluate(EvaluateRequest {
                session_id: "session-1".to_string(),
                transcript: "I will sort first".to_string(),
                question: "Two Sum".to_string(),
                ..EvaluateRequest::default()
            })
            .await?;
        assert!(outcome.status);
    }

    let ledger = registry.ledger("session-1").await?;
    assert_eq!(ledger.lock().await.len(), 4);

    return Ok(());
}

#[tokio::test]
async fn it_runs_the_resume_flow() -> Result<()> {
    let (api, _registry, _problems, _dir) =
        build(vec!["Tell me about your Rust work."], "http://localhost:1");

    // Evaluating before any upload is a precondition failure.
    let res = api
        .evaluate_resume(EvaluateResumeRequest {
            session_id: "session-1".to_string(),
            transcript: "Hello".to_string(),
        })
        .await;
    assert!(res.is_err());

    let uploaded = api
        .upload_resume(UploadResumeRequest {
            session_id: "session-1".to_string(),
            resume: resume_fixture().to_string(),
        })
        .await?;
    assert!(uploaded.status);

    let outcome = api
        .evaluate_resume(EvaluateResumeRequest {
            session_id: "session-1".to_string(),
            transcript: "Hello".to_string(),
        })
        .await?;
    assert!(outcome.status);
    assert_eq!(outcome.content, "Tell me about your Rust work.");

    return Ok(());
}

#[tokio::test]
async fn it_analyzes_articles_and_lists_them_back() -> Result<()> {
    let (api, _registry, _problems, _dir) = build(
        vec![
            "[\"Reverse a singly linked list\"]",
            "[\"Tell me about a time you disagreed with a teammate\"]",
            "{\"id\": \"6802d24482aab64098bd479d\"}",
        ],
        "http://localhost:1",
    );

    assert!(api.analyze("   ").await.is_err());

    let res = api.analyze(article_fixture()).await?;
    assert!(res.success);
    assert_eq!(res.data.problem.title, "Reverse Linked List");
    assert_eq!(res.data.behavioral_questions.len(), 1);

    let articles = api.articles().await?;
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].problem.title, "Reverse Linked List");

    return Ok(());
}
