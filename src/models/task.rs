use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{validate_title, TodoError};
use crate::utils::date::DateResolver;
use crate::utils::tags::extract_due_tag;

/// Tasks keyed by their 1-based position in the store.
pub type TaskMap = BTreeMap<usize, Task>;

/// Task state (lifecycle)
///
/// Unknown state strings found in the store are kept as `Other` so they
/// survive a load/save cycle untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskState {
    New,
    Started,
    Blocked,
    Waiting,
    Done,
    Other(String),
}

impl TaskState {
    pub fn as_str(&self) -> &str {
        match self {
            TaskState::New => "new",
            TaskState::Started => "started",
            TaskState::Blocked => "blocked",
            TaskState::Waiting => "waiting",
            TaskState::Done => "done",
            TaskState::Other(s) => s.as_str(),
        }
    }

    pub fn from_name(s: &str) -> Self {
        match s {
            "new" => TaskState::New,
            "started" => TaskState::Started,
            "blocked" => TaskState::Blocked,
            "waiting" => TaskState::Waiting,
            "done" => TaskState::Done,
            other => TaskState::Other(other.to_string()),
        }
    }

    /// Active tasks are the ones still being worked on.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            TaskState::New | TaskState::Started | TaskState::Blocked | TaskState::Waiting
        )
    }
}

impl From<String> for TaskState {
    fn from(s: String) -> Self {
        TaskState::from_name(&s)
    }
}

impl From<TaskState> for String {
    fn from(state: TaskState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Task record as persisted in one line of the store.
///
/// Field order here is the serialization order. Optional fields are written
/// only when they carry information: `priority` only when true, `due` only
/// when set, `note` only when non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<TaskState>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub priority: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub note: Vec<String>,
}

impl Task {
    /// Create a new task from free text.
    ///
    /// A `due:<value>` tag in the text is stripped from the title and
    /// resolved into the due date.
    pub fn create(text: &str, resolver: &DateResolver) -> Result<Self, TodoError> {
        let mut task = Self {
            state: Some(TaskState::New),
            title: String::new(),
            modified: Some(resolver.today()),
            priority: false,
            due: None,
            note: Vec::new(),
        };
        task.set_title(text, resolver)?;
        Ok(task)
    }

    pub fn is_done(&self) -> bool {
        self.state == Some(TaskState::Done)
    }

    pub fn touch(&mut self, today: NaiveDate) {
        self.modified = Some(today);
    }

    /// Replace the title, extracting an embedded due tag.
    pub fn set_title(&mut self, text: &str, resolver: &DateResolver) -> Result<(), TodoError> {
        let (title, due_tag) = extract_due_tag(text);
        validate_title(&title)?;
        let due = match due_tag {
            Some(token) => resolver.resolve(&token)?,
            None => None,
        };
        self.title = title;
        if due.is_some() {
            self.due = due;
        }
        Ok(())
    }

    pub fn append_title(&mut self, text: &str, resolver: &DateResolver) -> Result<(), TodoError> {
        let joined = format!("{} {}", self.title, text);
        self.set_title(&joined, resolver)
    }

    pub fn toggle_priority(&mut self) {
        self.priority = !self.priority;
    }

    /// Add a note entry; blank text is ignored.
    pub fn add_note(&mut self, text: &str) {
        if !text.trim().is_empty() {
            self.note.push(text.to_string());
        }
    }

    /// Delete one note by 1-based index, or all notes when no index is given.
    pub fn delete_note(&mut self, index: Option<usize>) -> Result<(), TodoError> {
        match index {
            None => self.note.clear(),
            Some(index) => {
                if index == 0 || index > self.note.len() {
                    return Err(TodoError::NoSuchNote(index));
                }
                self.note.remove(index - 1);
            }
        }
        Ok(())
    }
}
