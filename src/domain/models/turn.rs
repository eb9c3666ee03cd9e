use chrono::Local;
use chrono::SecondsFormat;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use uuid::Uuid;

use super::TurnKind;

fn timestamp() -> String {
    return Local::now().to_rfc3339_opts(SecondsFormat::Secs, false);
}

/// One candidate-side contribution: a code snapshot, a spoken transcript, or
/// both. Turns with `improved` set were rewritten by the reasoning service
/// after the fact and are not genuine candidate speech.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTurn {
    pub id: String,
    pub code: Option<String>,
    pub transcript: Option<String>,
    #[serde(default)]
    pub improved: bool,
    pub created_at: String,
}

impl UserTurn {
    pub fn new(code: Option<&str>, transcript: Option<&str>) -> UserTurn {
        let normalize = |text: Option<&str>| {
            return text
                .map(|text| {
                    return text.trim().to_string();
                })
                .filter(|text| {
                    return !text.is_empty();
                });
        };

        return UserTurn {
            id: Uuid::new_v4().to_string(),
            code: normalize(code),
            transcript: normalize(transcript),
            improved: false,
            created_at: timestamp(),
        };
    }

    pub fn new_improved(transcript: &str) -> UserTurn {
        return UserTurn {
            id: Uuid::new_v4().to_string(),
            code: None,
            transcript: Some(transcript.trim().to_string()),
            improved: true,
            created_at: timestamp(),
        };
    }

    /// The turn rendered as transcript text. Spoken words win over code so a
    /// silent code snapshot still contributes something readable.
    pub fn text(&self) -> String {
        if let Some(transcript) = &self.transcript {
            if !transcript.is_empty() {
                return transcript.to_string();
            }
        }

        return self.code.clone().unwrap_or_default();
    }

    pub fn is_empty(&self) -> bool {
        let no_code = self.code.as_deref().unwrap_or("").is_empty();
        let no_transcript = self.transcript.as_deref().unwrap_or("").is_empty();
        return no_code && no_transcript;
    }
}

/// One piece of interviewer feedback from the reasoning service.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentTurn {
    pub id: String,
    pub content: String,
    pub created_at: String,
}

impl AgentTurn {
    pub fn new(content: &str) -> AgentTurn {
        return AgentTurn {
            id: Uuid::new_v4().to_string(),
            content: content.trim().to_string(),
            created_at: timestamp(),
        };
    }
}

/// A ledger entry resolved against its turn collection, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub kind: TurnKind,
    pub text: String,
    pub improved: bool,
}
