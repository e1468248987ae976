//! Tests for project administration feeding the task board.

use std::io;
use std::sync::Arc;

use super::helpers::{administrator, developer, drag_to, runtime, sessions, sign_in};
use eyre::ensure;
use rstest::rstest;
use taskboard::{
    board::{domain::BoardScreen, services::BoardEngine, services::TransitionOutcome},
    identity::{adapters::memory::InMemorySessionStore, services::AccessDenied},
    project::{
        adapters::memory::InMemoryProjectRepository,
        domain::{Developer, NewProject, NewTask, ProjectDetails, TaskId, TaskStatus},
        services::{ProjectCatalogueError, ProjectCatalogueService},
    },
};
use tokio::runtime::Runtime;

fn apollo() -> NewProject {
    let details = ProjectDetails::new("Apollo")
        .with_schedule("2024-01-01", "2024-06-30")
        .with_owner(administrator().id())
        .with_developers([Developer::new(developer().id(), "Dev Eloper")]);
    NewProject::new(details).with_tasks([
        NewTask::new("Design").with_assignees(["Dev Eloper".to_owned()]),
        NewTask::new("Build").with_due_date("2024-05-01"),
    ])
}

#[rstest]
fn board_moves_show_up_in_catalogue_progress(
    runtime: io::Result<Runtime>,
    sessions: Arc<InMemorySessionStore>,
) -> eyre::Result<()> {
    let rt = runtime?;
    let repository = Arc::new(InMemoryProjectRepository::new());
    let catalogue = ProjectCatalogueService::new(Arc::clone(&repository), Arc::clone(&sessions));

    rt.block_on(async {
        sign_in(&sessions, &administrator());
        let project = catalogue.create_project(apollo()).await?;
        ensure!(project.tasks().len() == 2, "both tasks should be stored");

        sign_in(&sessions, &developer());
        let board = BoardEngine::open(Arc::clone(&repository), Arc::clone(&sessions), project.id())?;
        board.load().await;
        let outcome = drag_to(&board, TaskId::new(1), TaskStatus::Done).await?;
        ensure!(
            outcome == TransitionOutcome::Confirmed { refreshed: true },
            "unexpected outcome: {outcome:?}"
        );

        let summaries = catalogue.list_summaries().await?;
        let summary = summaries
            .first()
            .ok_or_else(|| eyre::eyre!("catalogue should list the project"))?;
        ensure!(summary.progress == 50, "progress was {}", summary.progress);
        ensure!(summary.team == "Dev Eloper", "team was {}", summary.team);
        ensure!(!summary.editable, "developers should not see the edit action");
        Ok(())
    })
}

#[rstest]
fn developers_cannot_create_projects(
    runtime: io::Result<Runtime>,
    sessions: Arc<InMemorySessionStore>,
) -> eyre::Result<()> {
    let rt = runtime?;
    let repository = Arc::new(InMemoryProjectRepository::new());
    let catalogue = ProjectCatalogueService::new(Arc::clone(&repository), Arc::clone(&sessions));
    sign_in(&sessions, &developer());

    let result = rt.block_on(catalogue.create_project(apollo()));

    ensure!(
        matches!(
            result,
            Err(ProjectCatalogueError::Access(AccessDenied::Forbidden { .. }))
        ),
        "expected forbidden, got {result:?}"
    );
    let stored = rt.block_on(catalogue.list_summaries())?;
    ensure!(stored.is_empty(), "nothing should have been stored");
    Ok(())
}

#[rstest]
fn moving_a_task_of_a_deleted_project_rolls_back(
    runtime: io::Result<Runtime>,
    sessions: Arc<InMemorySessionStore>,
) -> eyre::Result<()> {
    let rt = runtime?;
    let repository = Arc::new(InMemoryProjectRepository::new());
    let catalogue = ProjectCatalogueService::new(Arc::clone(&repository), Arc::clone(&sessions));

    rt.block_on(async {
        sign_in(&sessions, &administrator());
        let project = catalogue.create_project(apollo()).await?;
        let board = BoardEngine::open(Arc::clone(&repository), Arc::clone(&sessions), project.id())?;
        board.load().await;
        catalogue.delete_project(project.id()).await?;

        let outcome = drag_to(&board, TaskId::new(2), TaskStatus::InProgress).await?;

        ensure!(
            outcome == TransitionOutcome::RolledBack,
            "unexpected outcome: {outcome:?}"
        );
        let BoardScreen::Ready(layout) = board.screen() else {
            eyre::bail!("board should still show the last loaded project");
        };
        let todo = layout
            .column(TaskStatus::ToDo)
            .ok_or_else(|| eyre::eyre!("to do column missing"))?;
        ensure!(todo.count == 2, "both tasks should be back in to do");
        Ok(())
    })
}
