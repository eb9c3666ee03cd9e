use chrono::Local;
use chrono::SecondsFormat;
use serde_derive::Deserialize;
use serde_derive::Serialize;

/// The raw extracted resume text uploaded for one session. No structured
/// parse is attempted; the reasoning service consumes it as-is.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub session_id: String,
    pub text: String,
    pub created_at: String,
}

impl ResumeRecord {
    pub fn new(session_id: &str, text: &str) -> ResumeRecord {
        return ResumeRecord {
            session_id: session_id.to_string(),
            text: text.trim().to_string(),
            created_at: Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
        };
    }
}
