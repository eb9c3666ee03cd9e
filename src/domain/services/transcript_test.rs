use anyhow::Result;

use crate::domain::models::AgentTurn;
use crate::domain::models::ChatMessageRef;
use crate::domain::models::Ledger;
use crate::domain::models::TranscriptEntry;
use crate::domain::models::TurnKind;
use crate::domain::models::UserTurn;
use crate::domain::services::transcript;
use crate::infrastructure::stores::TurnStore;

#[test]
fn it_renders_role_tagged_history() {
    let entries = vec![
        TranscriptEntry {
            kind: TurnKind::User,
            text: "I will use a hashmap".to_string(),
            improved: false,
        },
        TranscriptEntry {
            kind: TurnKind::Agent,
            text: "Good, what is the complexity?".to_string(),
            improved: false,
        },
        TranscriptEntry {
            kind: TurnKind::User,
            text: "I would use a hashmap for O(1) lookups".to_string(),
            improved: true,
        },
    ];

    let rendered = transcript::render(&entries);
    insta::assert_snapshot!(rendered, @r###"
    Interviewee: I will use a hashmap
    Interviewer: Good, what is the complexity?
    Interviewee (revised): I would use a hashmap for O(1) lookups
    "###);
}

#[test]
fn it_renders_nothing_for_an_empty_transcript() {
    assert_eq!(transcript::render(&[]), "");
}

#[tokio::test]
async fn it_resolves_in_ledger_order() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let turns = TurnStore::new(dir.path().to_path_buf());

    let first = UserTurn::new(None, Some("First answer"));
    let reply = AgentTurn::new("Tell me more.");
    let second = UserTurn::new(None, Some("Second answer"));
    turns.save_user(&first).await?;
    turns.save_agent(&reply).await?;
    turns.save_user(&second).await?;

    let mut ledger = Ledger::new("session-1");
    ledger.append(ChatMessageRef::user(&first.id));
    ledger.append(ChatMessageRef::agent(&reply.id));
    ledger.append(ChatMessageRef::user(&second.id));

    let entries = transcript::resolve(&ledger, &turns).await?;
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].text, "First answer");
    assert_eq!(entries[1].text, "Tell me more.");
    assert_eq!(entries[2].text, "Second answer");

    return Ok(());
}
