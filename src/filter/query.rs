//! Named queries
//!
//! Each named query is a pure predicate over a task and the reference date.
//! On the command line they are written with a leading colon (`:overdue`).

use chrono::{Duration, NaiveDate};
use std::fmt;

use crate::models::{Task, TaskState};

pub struct NamedQuery {
    pub name: &'static str,
    pub description: &'static str,
    /// Whether the query selects by state. A filter without any such query
    /// is restricted to active tasks.
    pub selects_state: bool,
    pub test: fn(&Task, NaiveDate) -> bool,
}

impl fmt::Debug for NamedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedQuery")
            .field("name", &self.name)
            .field("selects_state", &self.selects_state)
            .finish()
    }
}

impl NamedQuery {
    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        (self.test)(task, today)
    }
}

fn has_state(task: &Task, state: TaskState) -> bool {
    task.state.as_ref() == Some(&state)
}

fn active(task: &Task, _today: NaiveDate) -> bool {
    task.state.as_ref().is_some_and(TaskState::is_active)
}

fn done(task: &Task, _today: NaiveDate) -> bool {
    has_state(task, TaskState::Done)
}

fn blocked(task: &Task, _today: NaiveDate) -> bool {
    has_state(task, TaskState::Blocked)
}

fn waiting(task: &Task, _today: NaiveDate) -> bool {
    has_state(task, TaskState::Waiting)
}

fn started(task: &Task, _today: NaiveDate) -> bool {
    has_state(task, TaskState::Started)
}

fn new(task: &Task, _today: NaiveDate) -> bool {
    has_state(task, TaskState::New)
}

fn all(_task: &Task, _today: NaiveDate) -> bool {
    true
}

fn priority(task: &Task, _today: NaiveDate) -> bool {
    task.priority
}

fn note(task: &Task, _today: NaiveDate) -> bool {
    !task.note.is_empty()
}

fn due_today(task: &Task, today: NaiveDate) -> bool {
    task.due == Some(today)
}

fn due_tomorrow(task: &Task, today: NaiveDate) -> bool {
    task.due == Some(today + Duration::days(1))
}

fn due_next_7_days(task: &Task, today: NaiveDate) -> bool {
    task.due
        .is_some_and(|due| due >= today && due <= today + Duration::days(6))
}

fn overdue(task: &Task, today: NaiveDate) -> bool {
    task.due.is_some_and(|due| due < today)
}

fn has_due(task: &Task, _today: NaiveDate) -> bool {
    task.due.is_some()
}

fn recent(task: &Task, today: NaiveDate) -> bool {
    task.modified
        .is_some_and(|modified| modified <= today && modified > today - Duration::days(7))
}

pub static QUERIES: &[NamedQuery] = &[
    NamedQuery { name: ":active", description: "new, started, blocked or waiting", selects_state: true, test: active },
    NamedQuery { name: ":done", description: "completed tasks", selects_state: true, test: done },
    NamedQuery { name: ":blocked", description: "blocked tasks", selects_state: true, test: blocked },
    NamedQuery { name: ":waiting", description: "waiting tasks", selects_state: true, test: waiting },
    NamedQuery { name: ":started", description: "started tasks", selects_state: true, test: started },
    NamedQuery { name: ":new", description: "new tasks", selects_state: true, test: new },
    NamedQuery { name: ":all", description: "every task", selects_state: true, test: all },
    NamedQuery { name: ":priority", description: "high priority tasks", selects_state: false, test: priority },
    NamedQuery { name: ":note", description: "tasks with notes", selects_state: false, test: note },
    NamedQuery { name: ":today", description: "due today", selects_state: false, test: due_today },
    NamedQuery { name: ":tomorrow", description: "due tomorrow", selects_state: false, test: due_tomorrow },
    NamedQuery { name: ":next7days", description: "due within the next 7 days", selects_state: false, test: due_next_7_days },
    NamedQuery { name: ":overdue", description: "due date in the past", selects_state: false, test: overdue },
    NamedQuery { name: ":due", description: "tasks with a due date", selects_state: false, test: has_due },
    NamedQuery { name: ":recent", description: "modified in the last 7 days", selects_state: false, test: recent },
];

/// Look up a named query by its command-line name
pub fn lookup(name: &str) -> Option<&'static NamedQuery> {
    QUERIES.iter().find(|q| q.name == name)
}

/// The query applied when no state is selected
pub fn active_query() -> &'static NamedQuery {
    &QUERIES[0]
}

/// The query cleanup always applies
pub fn done_query() -> &'static NamedQuery {
    &QUERIES[1]
}
