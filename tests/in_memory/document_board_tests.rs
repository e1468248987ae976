//! Tests for board moves persisted through the JSON document store.

use std::io;
use std::sync::Arc;

use super::helpers::{developer, drag_to, runtime, sessions, sign_in};
use camino::Utf8PathBuf;
use eyre::ensure;
use rstest::rstest;
use serde_json::{Value, json};
use taskboard::{
    board::services::{BoardEngine, TransitionOutcome},
    identity::adapters::memory::InMemorySessionStore,
    project::{
        adapters::document::{DEFAULT_FILE_NAME, JsonDocumentStore},
        domain::{ProjectId, TaskId, TaskStatus},
    },
};
use tempfile::TempDir;
use tokio::runtime::Runtime;

fn seed(path: &Utf8PathBuf) -> eyre::Result<()> {
    let document = json!({
        "projects": [{
            "id": "7",
            "name": "Orbit",
            "startDate": "2024-02-01",
            "estimatedEndDate": "2024-04-01",
            "budget": 1200,
            "tasks": [
                { "id": "1", "name": "Survey", "status": "to_do" },
                { "id": 2, "title": "Launch", "status": "in_progress", "dueDate": "2024-03-15" }
            ]
        }],
        "users": [],
        "settings": { "theme": "dark" }
    });
    std::fs::write(path, serde_json::to_string_pretty(&document)?)?;
    Ok(())
}

fn stored_statuses(path: &Utf8PathBuf) -> eyre::Result<Vec<String>> {
    let document: Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
    let tasks = document
        .pointer("/projects/0/tasks")
        .and_then(Value::as_array)
        .ok_or_else(|| eyre::eyre!("stored project has no tasks"))?;
    Ok(tasks
        .iter()
        .filter_map(|task| task.get("status").and_then(Value::as_str))
        .map(str::to_owned)
        .collect())
}

#[rstest]
fn drag_is_written_to_the_document(
    runtime: io::Result<Runtime>,
    sessions: Arc<InMemorySessionStore>,
) -> eyre::Result<()> {
    let rt = runtime?;
    let temp = TempDir::new()?;
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
        .map_err(|path| eyre::eyre!("temp path is not utf-8: {}", path.display()))?;
    let path = root.join(DEFAULT_FILE_NAME);
    seed(&path)?;
    let store = Arc::new(JsonDocumentStore::open(&path)?);
    sign_in(&sessions, &developer());

    let outcome = rt.block_on(async {
        let board = BoardEngine::open(store, Arc::clone(&sessions), ProjectId::new(7))?;
        board.load().await;
        drag_to(&board, TaskId::new(2), TaskStatus::Done).await
    })?;

    ensure!(
        outcome == TransitionOutcome::Confirmed { refreshed: true },
        "unexpected outcome: {outcome:?}"
    );
    ensure!(
        stored_statuses(&path)? == ["to_do", "done"],
        "stored statuses should reflect the move"
    );
    let document: Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    ensure!(
        document.pointer("/settings/theme") == Some(&json!("dark")),
        "unrelated document keys should survive"
    );
    ensure!(
        document.pointer("/projects/0/budget") == Some(&json!(1200)),
        "unknown project fields should survive"
    );
    Ok(())
}

#[rstest]
fn missing_document_shows_project_not_found(
    runtime: io::Result<Runtime>,
    sessions: Arc<InMemorySessionStore>,
) -> eyre::Result<()> {
    let rt = runtime?;
    let temp = TempDir::new()?;
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
        .map_err(|path| eyre::eyre!("temp path is not utf-8: {}", path.display()))?;
    let store = Arc::new(JsonDocumentStore::open(&root.join(DEFAULT_FILE_NAME))?);
    sign_in(&sessions, &developer());

    let board = BoardEngine::open(store, Arc::clone(&sessions), ProjectId::new(1))?;
    let view = rt.block_on(board.load());

    ensure!(view.project.project().is_none(), "no project should load");
    ensure!(
        matches!(
            board.screen(),
            taskboard::board::domain::BoardScreen::NotFound
        ),
        "board should show not found"
    );
    Ok(())
}
