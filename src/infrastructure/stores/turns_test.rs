use anyhow::Result;

use super::TurnStore;
use crate::domain::models::AgentTurn;
use crate::domain::models::ChatMessageRef;
use crate::domain::models::TurnKind;
use crate::domain::models::UserTurn;

#[tokio::test]
async fn it_round_trips_turns() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = TurnStore::new(dir.path().to_path_buf());

    let user = UserTurn::new(Some("print(1)"), Some("I will start simple"));
    let agent = AgentTurn::new("Sounds good, walk me through it.");
    store.save_user(&user).await?;
    store.save_agent(&agent).await?;

    let loaded_user = store.load_user(&user.id).await?;
    assert_eq!(loaded_user, user);
    assert!(!loaded_user.improved);

    let loaded_agent = store.load_agent(&agent.id).await?;
    assert_eq!(loaded_agent.content, "Sounds good, walk me through it.");

    return Ok(());
}

#[tokio::test]
async fn it_fails_to_load_missing_turns() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = TurnStore::new(dir.path().to_path_buf());

    assert!(store.load_user("nope").await.is_err());
    assert!(store.load_agent("nope").await.is_err());

    return Ok(());
}

#[tokio::test]
async fn it_resolves_refs_against_the_matching_collection() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = TurnStore::new(dir.path().to_path_buf());

    let user = UserTurn::new(None, Some("My answer"));
    store.save_user(&user).await?;

    let entry = store.resolve(&ChatMessageRef::user(&user.id)).await?;
    assert_eq!(entry.kind, TurnKind::User);
    assert_eq!(entry.text, "My answer");

    // The same id tagged as an agent ref must not resolve against the user
    // collection.
    let res = store.resolve(&ChatMessageRef::agent(&user.id)).await;
    assert!(res.is_err());

    return Ok(());
}

#[tokio::test]
async fn it_marks_improved_turns_on_resolve() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = TurnStore::new(dir.path().to_path_buf());

    let improved = UserTurn::new_improved("A sharper answer");
    store.save_user(&improved).await?;

    let entry = store.resolve(&ChatMessageRef::user(&improved.id)).await?;
    assert!(entry.improved);
    assert_eq!(entry.text, "A sharper answer");

    return Ok(());
}
