//! Given steps for board drag BDD scenarios.

use std::sync::Arc;

use super::world::{BoardWorld, FlakyRepository, PROJECT, run_async};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;
use taskboard::{
    board::services::BoardEngine,
    identity::domain::{Role, User, UserId},
    project::domain::{Project, ProjectDetails, Task, TaskId, TaskStatus},
};

fn parse_status(raw: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::try_from(raw).map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))
}

#[given(r#"a project with tasks "{first}" in "{first_status}" and "{second}" in "{second_status}""#)]
fn project_with_tasks(
    world: &mut BoardWorld,
    first: String,
    first_status: String,
    second: String,
    second_status: String,
) -> Result<(), eyre::Report> {
    let project = Project::new(PROJECT, ProjectDetails::new("Scenario project")).with_tasks(vec![
        Task::new(TaskId::new(1), first).with_status(parse_status(&first_status)?),
        Task::new(TaskId::new(2), second).with_status(parse_status(&second_status)?),
    ]);
    world.repository = Arc::new(FlakyRepository::with_project(project));
    Ok(())
}

#[given(r#"a "{role}" is signed in"#)]
fn user_signed_in(world: &mut BoardWorld, role: String) {
    let user = User::new(UserId::new(5), "scenario", "Scenario User", Role::from(role));
    world.sessions.sign_in(&user, &DefaultClock);
}

#[given("the board is open")]
fn board_is_open(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let board = BoardEngine::open(
        Arc::clone(&world.repository),
        Arc::clone(&world.sessions),
        PROJECT,
    )
    .wrap_err("open board for scenario")?;
    run_async(board.load());
    world.board = Some(board);
    Ok(())
}

#[given("the next save will fail")]
fn next_save_fails(world: &mut BoardWorld) {
    world.repository.fail_next_save();
}
