use chrono::Local;
use chrono::SecondsFormat;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use uuid::Uuid;

use super::Problem;

/// A captured article analysis: the catalog problem the reasoning service
/// judged closest to the article, plus any behavioral questions it pulled
/// out. Persisted so past analyses can be listed back.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewAnalysis {
    pub id: String,
    pub problem_id: String,
    pub problem: Problem,
    pub behavioral_questions: Vec<String>,
    pub reasoning: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: String,
}

impl InterviewAnalysis {
    pub fn new(problem: Problem) -> InterviewAnalysis {
        return InterviewAnalysis {
            id: Uuid::new_v4().to_string(),
            problem_id: problem.id.to_string(),
            problem,
            behavioral_questions: vec![],
            reasoning: "".to_string(),
            success: false,
            error: None,
            created_at: Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
        };
    }
}
