#[cfg(test)]
#[path = "transcript_test.rs"]
mod tests;

use anyhow::Result;

use crate::domain::models::Ledger;
use crate::domain::models::TranscriptEntry;
use crate::domain::models::TurnKind;
use crate::infrastructure::stores::TurnStore;

/// Resolves a ledger's references into transcript entries, oldest to newest.
pub async fn resolve(ledger: &Ledger, turns: &TurnStore) -> Result<Vec<TranscriptEntry>> {
    let mut entries: Vec<TranscriptEntry> = vec![];
    for reference in &ledger.messages {
        entries.push(turns.resolve(reference).await?);
    }

    return Ok(entries);
}

/// Renders resolved entries as the role-tagged history block reasoning
/// prompts embed. Synthetic rewrites stay visibly distinct from genuine
/// candidate speech.
pub fn render(entries: &[TranscriptEntry]) -> String {
    return entries
        .iter()
        .map(|entry| {
            let role = match entry.kind {
                TurnKind::User => {
                    if entry.improved {
                        "Interviewee (revised)"
                    } else {
                        "Interviewee"
                    }
                }
                TurnKind::Agent => "Interviewer",
            };

            return format!("{role}: {text}", text = entry.text);
        })
        .collect::<Vec<String>>()
        .join("\n");
}
