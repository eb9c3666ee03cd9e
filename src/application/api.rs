#[cfg(test)]
#[path = "api_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::EvaluationOutcome;
use crate::domain::models::ExecutionResponse;
use crate::domain::models::ExecutionStatus;
use crate::domain::models::InterviewAnalysis;
use crate::domain::models::Problem;
use crate::domain::models::ProblemExample;
use crate::domain::services::catalog;
use crate::domain::services::Evaluator;
use crate::domain::services::Improver;
use crate::domain::services::Selector;
use crate::domain::services::SessionRegistry;
use crate::infrastructure::reasoners::ReasonerManager;
use crate::infrastructure::sandbox::Piston;
use crate::infrastructure::stores::AnalysisStore;
use crate::infrastructure::stores::LedgerStore;
use crate::infrastructure::stores::ProblemStore;
use crate::infrastructure::stores::ResumeStore;
use crate::infrastructure::stores::TurnStore;

const DEFAULT_TIME_LIMIT: u64 = 1000;
const DEFAULT_MEMORY_LIMIT: u64 = 524_288_000;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequest {
    pub language: String,
    pub content: String,
    #[serde(default)]
    pub stdin: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteResponse {
    pub success: bool,
    pub status: ExecutionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub result: ExecutionResponse,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    pub session_id: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub question: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResumeRequest {
    pub session_id: String,
    pub resume: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateResumeRequest {
    pub session_id: String,
    pub transcript: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionIdResponse {
    pub session_id: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemPayload {
    #[serde(flatten)]
    pub problem: Problem,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<ProblemExample>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Vec<String>>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemResponse {
    pub success: bool,
    pub problem: ProblemPayload,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeData {
    pub problem: Problem,
    pub behavioral_questions: Vec<String>,
    pub reasoning: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub success: bool,
    pub data: AnalyzeData,
}

fn is_object_id(id: &str) -> bool {
    return id.len() == 24
        && id.chars().all(|c| {
            return c.is_ascii_hexdigit();
        });
}

/// The transport-agnostic operation surface. An HTTP layer maps these
/// operations onto routes one-to-one; validation failures come back as
/// errors for the transport to turn into 4xx responses, pipeline failures
/// come back inside the payload.
pub struct Api {
    evaluator: Arc<Evaluator>,
    selector: Arc<Selector>,
    sandbox: Arc<Piston>,
    problems: Arc<ProblemStore>,
    analyses: Arc<AnalysisStore>,
}

impl Api {
    pub fn new(
        evaluator: Arc<Evaluator>,
        selector: Arc<Selector>,
        sandbox: Arc<Piston>,
        problems: Arc<ProblemStore>,
        analyses: Arc<AnalysisStore>,
    ) -> Api {
        return Api {
            evaluator,
            selector,
            sandbox,
            problems,
            analyses,
        };
    }

    /// Wires the whole pipeline from loaded configuration.
    pub fn from_config() -> Result<Api> {
        let reasoner = ReasonerManager::get(&Config::get(ConfigKey::Reasoner))?;

        let turns = Arc::new(TurnStore::default());
        let ledgers = Arc::new(LedgerStore::default());
        let resumes = Arc::new(ResumeStore::default());
        let registry = Arc::new(SessionRegistry::new(ledgers.clone(), resumes));
        let analyses = Arc::new(AnalysisStore::default());

        let improver = Arc::new(Improver::new(
            registry.clone(),
            turns.clone(),
            ledgers.clone(),
            reasoner.clone(),
        ));
        let evaluator = Arc::new(Evaluator::new(
            registry,
            turns,
            ledgers,
            reasoner.clone(),
            improver,
        ));
        let selector = Arc::new(Selector::new(reasoner, analyses.clone()));

        return Ok(Api::new(
            evaluator,
            selector,
            Arc::new(Piston::default()),
            Arc::new(ProblemStore::default()),
            analyses,
        ));
    }

    pub fn create_session_id(&self) -> SessionIdResponse {
        return SessionIdResponse {
            session_id: SessionRegistry::create_id(),
        };
    }

    pub async fn execute(&self, req: ExecuteRequest) -> Result<ExecuteResponse> {
        if req.language.trim().is_empty() || req.content.trim().is_empty() {
            bail!("Missing required fields: language and content are required");
        }

        let time_limit = Config::get(ConfigKey::TimeLimit)
            .parse::<u64>()
            .unwrap_or(DEFAULT_TIME_LIMIT);
        let memory_limit = Config::get(ConfigKey::MemoryLimit)
            .parse::<u64>()
            .unwrap_or(DEFAULT_MEMORY_LIMIT);

        let result = self
            .sandbox
            .execute(
                &req.language,
                &req.content,
                &req.stdin,
                &req.args,
                time_limit,
                memory_limit,
                req.version.as_deref(),
            )
            .await?;

        let status = Piston::classify(&result, time_limit, memory_limit);
        let message = match status {
            ExecutionStatus::OK => None,
            ExecutionStatus::TLE => Some("Time Limit Exceeded".to_string()),
            ExecutionStatus::MLE => Some("Memory Limit Exceeded".to_string()),
        };

        return Ok(ExecuteResponse {
            success: status == ExecutionStatus::OK,
            status,
            message,
            result,
        });
    }

    pub async fn problem(&self, id: &str) -> Result<ProblemResponse> {
        if !is_object_id(id) {
            bail!("Invalid problem ID format");
        }

        if let Some(problem) = self.problems.load(id).await? {
            return Ok(ProblemResponse {
                success: true,
                problem: ProblemPayload {
                    problem,
                    examples: None,
                    constraints: None,
                },
            });
        }

        // Catalog fallback: reshape test cases into client-facing examples
        // and derive constraints from the tags.
        if let Some(problem) = catalog::find(id) {
            let examples = problem
                .test_cases
                .values()
                .map(|case| {
                    return ProblemExample {
                        input: case.input.to_string(),
                        output: case.expected_output.to_string(),
                        explanation: None,
                    };
                })
                .collect::<Vec<ProblemExample>>();
            let constraints = problem
                .tags
                .iter()
                .map(|tag| {
                    return format!("This problem involves {tag}");
                })
                .collect::<Vec<String>>();

            return Ok(ProblemResponse {
                success: true,
                problem: ProblemPayload {
                    problem: problem.clone(),
                    examples: Some(examples),
                    constraints: Some(constraints),
                },
            });
        }

        bail!("Problem not found")
    }

    pub async fn evaluate(&self, req: EvaluateRequest) -> Result<EvaluationOutcome> {
        return self
            .evaluator
            .evaluate(&req.session_id, &req.code, &req.transcript, &req.question)
            .await;
    }

    pub async fn upload_resume(&self, req: UploadResumeRequest) -> Result<EvaluationOutcome> {
        return self
            .evaluator
            .upload_resume(&req.session_id, &req.resume)
            .await;
    }

    pub async fn evaluate_resume(&self, req: EvaluateResumeRequest) -> Result<EvaluationOutcome> {
        return self
            .evaluator
            .evaluate_resume(&req.session_id, &req.transcript)
            .await;
    }

    pub async fn analyze(&self, article: &str) -> Result<AnalyzeResponse> {
        if article.trim().is_empty() {
            bail!("Interview experience article is required");
        }

        let analysis = self.selector.analyze(article).await?;

        return Ok(AnalyzeResponse {
            success: analysis.success,
            data: AnalyzeData {
                problem: analysis.problem,
                behavioral_questions: analysis.behavioral_questions,
                reasoning: analysis.reasoning,
            },
        });
    }

    pub async fn articles(&self) -> Result<Vec<InterviewAnalysis>> {
        return self.analyses.list().await;
    }
}
