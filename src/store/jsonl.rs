use anyhow::{Context, Result};
use log::debug;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::error::TodoError;
use crate::models::{Task, TaskMap};

/// JSON Lines task store
///
/// Positions are not persisted: they are assigned from line order on every
/// load. There is no locking; concurrent writers race and the last one wins.
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all tasks keyed by position (1-based, blank lines skipped).
    /// A missing file is an empty store.
    pub fn load(&self) -> Result<TaskMap> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("task file {} does not exist yet", self.path.display());
                return Ok(TaskMap::new());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read task file: {}", self.path.display()))
            }
        };

        let tasks = decode_tasks(&content)
            .with_context(|| format!("Failed to parse task file: {}", self.path.display()))?;
        debug!("loaded {} task(s) from {}", tasks.len(), self.path.display());
        Ok(tasks)
    }

    /// Load all tasks, failing if `position` does not exist
    pub fn load_checked(&self, position: usize) -> Result<TaskMap> {
        let tasks = self.load()?;
        if !tasks.contains_key(&position) {
            return Err(TodoError::NotFound(position).into());
        }
        Ok(tasks)
    }

    /// Rewrite the whole file in position order
    pub fn save(&self, tasks: &TaskMap) -> Result<()> {
        self.ensure_parent()?;
        let mut content = String::new();
        for task in tasks.values() {
            content.push_str(&encode_task(task)?);
            content.push('\n');
        }
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write task file: {}", self.path.display()))?;
        debug!("saved {} task(s) to {}", tasks.len(), self.path.display());
        Ok(())
    }

    /// Append one task at the end of the file
    ///
    /// A last line without a trailing newline is terminated first, so the
    /// new record always lands on its own line.
    pub fn append(&self, task: &Task) -> Result<()> {
        self.ensure_parent()?;
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open task file: {}", self.path.display()))?;

        let mut record = encode_task(task)?;
        record.push('\n');
        if needs_line_break(&mut file)
            .with_context(|| format!("Failed to read task file: {}", self.path.display()))?
        {
            record.insert(0, '\n');
        }
        file.write_all(record.as_bytes())
            .with_context(|| format!("Failed to write task file: {}", self.path.display()))?;
        debug!("appended task to {}", self.path.display());
        Ok(())
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }
        Ok(())
    }
}

/// Whether a non-empty file ends without a newline
fn needs_line_break(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

/// Encode one task as a single JSON line (without the newline)
pub fn encode_task(task: &Task) -> Result<String> {
    serde_json::to_string(task).context("Failed to encode task")
}

/// Decode JSON Lines content, assigning positions to non-blank lines
pub fn decode_tasks(content: &str) -> Result<TaskMap> {
    let mut tasks = TaskMap::new();
    for (line_no, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let task: Task = serde_json::from_str(line)
            .with_context(|| format!("Invalid task record on line {}", line_no + 1))?;
        tasks.insert(tasks.len() + 1, task);
    }
    Ok(tasks)
}

/// Close position gaps: tasks are renumbered 1..N keeping their order
pub fn renumber(tasks: TaskMap) -> TaskMap {
    tasks
        .into_values()
        .enumerate()
        .map(|(i, task)| (i + 1, task))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskState;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn task(title: &str) -> Task {
        Task {
            state: Some(TaskState::New),
            title: title.to_string(),
            modified: NaiveDate::from_ymd_opt(2026, 10, 16),
            priority: false,
            due: None,
            note: Vec::new(),
        }
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = TaskStore::new(temp_dir.path().join("todo.jsonl"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let content = "\n{\"state\":\"new\",\"title\":\"a\"}\n   \n{\"state\":\"done\",\"title\":\"b\"}\n";
        let tasks = decode_tasks(content).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[&1].title, "a");
        assert_eq!(tasks[&2].title, "b");
    }

    #[test]
    fn test_invalid_line_reports_line_number() {
        let err = decode_tasks("{\"title\":\"a\"}\nnot json\n").unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = TaskStore::new(temp_dir.path().join("nested").join("todo.jsonl"));

        let mut tasks = TaskMap::new();
        tasks.insert(1, task("Buy Milk"));
        let mut full = task("Plan trip @home");
        full.priority = true;
        full.due = NaiveDate::from_ymd_opt(2026, 10, 20);
        full.note = vec!["book hotel".to_string()];
        tasks.insert(2, full);

        store.save(&tasks).unwrap();
        assert_eq!(store.load().unwrap(), tasks);

        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.ends_with('\n'));
    }

    #[test]
    fn test_append_assigns_next_position() {
        let temp_dir = TempDir::new().unwrap();
        let store = TaskStore::new(temp_dir.path().join("todo.jsonl"));
        store.append(&task("first")).unwrap();
        store.append(&task("second")).unwrap();
        let tasks = store.load().unwrap();
        assert_eq!(tasks.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(tasks[&2].title, "second");
    }

    #[test]
    fn test_append_terminates_unfinished_last_line() {
        let temp_dir = TempDir::new().unwrap();
        let store = TaskStore::new(temp_dir.path().join("todo.jsonl"));
        fs::write(store.path(), "{\"state\":\"new\",\"title\":\"hand edited\"}").unwrap();
        store.append(&task("second")).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.ends_with('\n'));
        assert_eq!(store.load().unwrap()[&2].title, "second");
    }

    #[test]
    fn test_load_checked() {
        let temp_dir = TempDir::new().unwrap();
        let store = TaskStore::new(temp_dir.path().join("todo.jsonl"));
        store.append(&task("first")).unwrap();
        assert!(store.load_checked(1).is_ok());
        let err = store.load_checked(2).unwrap_err();
        assert!(matches!(err.downcast_ref::<TodoError>(), Some(TodoError::NotFound(2))));
    }

    #[test]
    fn test_renumber_closes_gaps() {
        let mut tasks = TaskMap::new();
        tasks.insert(1, task("a"));
        tasks.insert(3, task("c"));
        tasks.insert(7, task("g"));
        let tasks = renumber(tasks);
        assert_eq!(tasks.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(tasks[&3].title, "g");
    }
}
