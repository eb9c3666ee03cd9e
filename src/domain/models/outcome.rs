use serde_derive::Deserialize;
use serde_derive::Serialize;

/// The `{status, content}` envelope every conversational operation resolves
/// to. Reasoning-service failures become `status: false` values here instead
/// of errors so they never propagate past the application boundary.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    pub status: bool,
    pub content: String,
}

impl EvaluationOutcome {
    pub fn ok(content: &str) -> EvaluationOutcome {
        return EvaluationOutcome {
            status: true,
            content: content.to_string(),
        };
    }

    pub fn failed(content: &str) -> EvaluationOutcome {
        return EvaluationOutcome {
            status: false,
            content: content.to_string(),
        };
    }
}
