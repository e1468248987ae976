//! Presentation model the board columns are rendered from.

use super::{BoardViewState, ProjectLoad};
use crate::identity::domain::UserId;
use crate::project::domain::{Project, Task, TaskId, TaskStatus, calc_progress};

/// Text shown in a column with no tasks.
pub const EMPTY_COLUMN_LABEL: &str = "No tasks.";

/// A task collection partitioned by status, order preserved per bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardColumns {
    to_do: Vec<Task>,
    in_progress: Vec<Task>,
    done: Vec<Task>,
}

impl BoardColumns {
    /// Partitions `tasks` into the three status buckets.
    #[must_use]
    pub fn group(tasks: &[Task]) -> Self {
        let mut columns = Self::default();
        for task in tasks {
            columns.bucket_mut(task.status()).push(task.clone());
        }
        columns
    }

    /// Returns the tasks in one column.
    #[must_use]
    pub fn get(&self, status: TaskStatus) -> &[Task] {
        match status {
            TaskStatus::ToDo => &self.to_do,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }

    const fn bucket_mut(&mut self, status: TaskStatus) -> &mut Vec<Task> {
        match status {
            TaskStatus::ToDo => &mut self.to_do,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Done => &mut self.done,
        }
    }
}

/// Colour family of a chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipTone {
    /// Default styling.
    Neutral,
    /// Attention styling.
    Warning,
    /// Completion styling.
    Success,
}

impl From<TaskStatus> for ChipTone {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::ToDo => Self::Neutral,
            TaskStatus::InProgress => Self::Warning,
            TaskStatus::Done => Self::Success,
        }
    }
}

/// Small labelled badge on a task card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chip {
    /// The task status.
    Status {
        /// Status label.
        label: &'static str,
        /// Colour family.
        tone: ChipTone,
    },
    /// One assignee.
    Assignee(String),
    /// The due date.
    DueDate(String),
}

impl Chip {
    /// Returns the text shown on the chip.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Status { label, .. } => (*label).to_owned(),
            Self::Assignee(name) => name.clone(),
            Self::DueDate(date) => format!("Due: {date}"),
        }
    }
}

/// One task as rendered in a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCard {
    /// Task identifier.
    pub task_id: TaskId,
    /// Task title.
    pub title: String,
    /// Status chip, then one chip per assignee, then the due date if any.
    pub chips: Vec<Chip>,
    /// Whether pressing the card may start a drag.
    pub draggable: bool,
}

impl TaskCard {
    fn new(task: &Task, locked: bool) -> Self {
        let status = task.status();
        let mut chips = vec![Chip::Status {
            label: status.label(),
            tone: ChipTone::from(status),
        }];
        chips.extend(task.assignees().iter().cloned().map(Chip::Assignee));
        if let Some(due_date) = task.due_date() {
            chips.push(Chip::DueDate(due_date.to_owned()));
        }
        Self {
            task_id: task.id(),
            title: task.title().to_owned(),
            chips,
            draggable: !status.is_terminal() && !locked,
        }
    }
}

/// One status column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    /// Column status; its string form is the drop-target identity.
    pub status: TaskStatus,
    /// Column heading.
    pub label: &'static str,
    /// Number of tasks in the column.
    pub count: usize,
    /// Task cards in collection order.
    pub cards: Vec<TaskCard>,
}

impl ColumnView {
    /// Returns the drop-target identity of the column.
    #[must_use]
    pub const fn column_id(&self) -> &'static str {
        self.status.as_str()
    }

    /// Returns the heading with the task count, e.g. `"To do (2)"`.
    #[must_use]
    pub fn heading(&self) -> String {
        format!("{} ({})", self.label, self.count)
    }

    /// Returns the empty-state text when the column has no tasks.
    #[must_use]
    pub fn empty_label(&self) -> Option<&'static str> {
        if self.cards.is_empty() {
            Some(EMPTY_COLUMN_LABEL)
        } else {
            None
        }
    }
}

/// Everything needed to render a loaded board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardLayout {
    /// Project name.
    pub title: String,
    /// Start date label.
    pub start_date: String,
    /// Estimated end date label.
    pub estimated_end_date: String,
    /// Project owner.
    pub owner: Option<UserId>,
    /// Team names, comma separated.
    pub team: String,
    /// Overall completion percentage.
    pub progress: u8,
    /// The three status columns in board order.
    pub columns: Vec<ColumnView>,
}

impl BoardLayout {
    /// Builds the layout for `project`; `locked` marks tasks that cannot be
    /// dragged whatever their status, such as tasks with an outstanding
    /// persistence call or every task of a torn-down board.
    #[must_use]
    pub fn build(project: &Project, locked: impl Fn(TaskId) -> bool) -> Self {
        let grouped = BoardColumns::group(project.tasks());
        let columns = TaskStatus::ALL
            .into_iter()
            .map(|status| {
                let cards: Vec<TaskCard> = grouped
                    .get(status)
                    .iter()
                    .map(|task| TaskCard::new(task, locked(task.id())))
                    .collect();
                ColumnView {
                    status,
                    label: status.label(),
                    count: cards.len(),
                    cards,
                }
            })
            .collect();
        let details = project.details();
        Self {
            title: details.name.clone(),
            start_date: details.start_date.clone(),
            estimated_end_date: details.estimated_end_date.clone(),
            owner: details.owner,
            team: project.team_label(),
            progress: calc_progress(project.tasks()),
            columns,
        }
    }

    /// Returns the column for `status`.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> Option<&ColumnView> {
        self.columns.iter().find(|column| column.status == status)
    }
}

/// What the board area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardScreen {
    /// Loading indicator.
    Loading,
    /// "Project not found." message.
    NotFound,
    /// The board itself.
    Ready(BoardLayout),
}

impl BoardScreen {
    /// Derives the screen from a view snapshot.
    #[must_use]
    pub fn from_view(view: &BoardViewState, locked: impl Fn(TaskId) -> bool) -> Self {
        match &view.project {
            ProjectLoad::Loading => Self::Loading,
            ProjectLoad::NotFound => Self::NotFound,
            ProjectLoad::Loaded(project) => Self::Ready(BoardLayout::build(project, locked)),
        }
    }
}
