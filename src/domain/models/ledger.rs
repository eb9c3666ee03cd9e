#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnKind {
    User,
    Agent,
}

/// A typed reference into one of the turn collections. The `kind` tag decides
/// which collection `message_id` may resolve against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageRef {
    #[serde(rename = "type")]
    pub kind: TurnKind,
    pub message_id: String,
}

impl ChatMessageRef {
    pub fn user(message_id: &str) -> ChatMessageRef {
        return ChatMessageRef {
            kind: TurnKind::User,
            message_id: message_id.to_string(),
        };
    }

    pub fn agent(message_id: &str) -> ChatMessageRef {
        return ChatMessageRef {
            kind: TurnKind::Agent,
            message_id: message_id.to_string(),
        };
    }
}

/// One session's transcript: an append-only, ordered list of turn references.
/// Append order is conversational order; entries are never edited or
/// reordered.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    pub session_id: String,
    pub messages: Vec<ChatMessageRef>,
}

impl Ledger {
    pub fn new(session_id: &str) -> Ledger {
        return Ledger {
            session_id: session_id.to_string(),
            messages: vec![],
        };
    }

    pub fn append(&mut self, reference: ChatMessageRef) {
        self.messages.push(reference);
    }

    pub fn len(&self) -> usize {
        return self.messages.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.messages.is_empty();
    }
}
