use anyhow::Result;
use chrono::NaiveDate;
use log::debug;

use crate::error::TodoError;
use crate::filter::{filter_tasks, Filter};
use crate::models::{Task, TaskMap, TaskState};
use crate::store::{renumber, TaskStore};
use crate::utils::DateResolver;

/// Task mutations over the store
///
/// Every operation loads the store, changes one record, stamps `modified`,
/// writes the whole store back and returns the updated tasks for rendering.
pub struct TaskRepo;

impl TaskRepo {
    /// Add a new task at the end of the store
    pub fn add(store: &TaskStore, resolver: &DateResolver, text: &str) -> Result<TaskMap> {
        let task = Task::create(text, resolver)?;
        store.append(&task)?;
        debug!("added task '{}'", task.title);
        store.load()
    }

    /// Append text to a task title
    pub fn append(
        store: &TaskStore,
        resolver: &DateResolver,
        position: usize,
        text: &str,
    ) -> Result<TaskMap> {
        Self::update(store, resolver.today(), position, |task| task.append_title(text, resolver))
    }

    /// Replace a task title
    pub fn rename(
        store: &TaskStore,
        resolver: &DateResolver,
        position: usize,
        text: &str,
    ) -> Result<TaskMap> {
        Self::update(store, resolver.today(), position, |task| task.set_title(text, resolver))
    }

    /// Set the state of a task, optionally recording a note
    pub fn change_state(
        store: &TaskStore,
        today: NaiveDate,
        position: usize,
        state: TaskState,
        note: Option<&str>,
    ) -> Result<TaskMap> {
        Self::update(store, today, position, |task| {
            task.state = Some(state);
            if let Some(note) = note {
                task.add_note(note);
            }
            Ok(())
        })
    }

    /// Toggle the priority flag, optionally recording a note
    pub fn toggle_priority(
        store: &TaskStore,
        today: NaiveDate,
        position: usize,
        note: Option<&str>,
    ) -> Result<TaskMap> {
        Self::update(store, today, position, |task| {
            task.toggle_priority();
            if let Some(note) = note {
                task.add_note(note);
            }
            Ok(())
        })
    }

    /// Set or clear (empty token) the due date
    pub fn set_due(
        store: &TaskStore,
        resolver: &DateResolver,
        position: usize,
        token: &str,
    ) -> Result<TaskMap> {
        Self::update(store, resolver.today(), position, |task| {
            task.due = resolver.resolve(token)?;
            Ok(())
        })
    }

    pub fn add_note(store: &TaskStore, today: NaiveDate, position: usize, text: &str) -> Result<TaskMap> {
        Self::update(store, today, position, |task| {
            task.add_note(text);
            Ok(())
        })
    }

    /// Delete one note by 1-based index, or all notes
    pub fn delete_note(
        store: &TaskStore,
        today: NaiveDate,
        position: usize,
        index: Option<usize>,
    ) -> Result<TaskMap> {
        Self::update(store, today, position, |task| task.delete_note(index))
    }

    /// Delete a task; the ones after it move up by one position
    pub fn delete(store: &TaskStore, position: usize) -> Result<TaskMap> {
        let mut tasks = store.load_checked(position)?;
        tasks.remove(&position);
        let tasks = renumber(tasks);
        store.save(&tasks)?;
        debug!("deleted task {}", position);
        Ok(tasks)
    }

    /// Delete every task matching `filter`, returning how many were removed
    pub fn cleanup(store: &TaskStore, filter: &Filter, today: NaiveDate) -> Result<usize> {
        let mut tasks = store.load()?;
        let doomed: Vec<usize> = filter_tasks(&tasks, filter, today)
            .into_iter()
            .map(|(position, _)| position)
            .collect();
        if doomed.is_empty() {
            return Ok(0);
        }
        for position in &doomed {
            tasks.remove(position);
        }
        store.save(&renumber(tasks))?;
        debug!("cleaned up {} task(s)", doomed.len());
        Ok(doomed.len())
    }

    fn update<F>(store: &TaskStore, today: NaiveDate, position: usize, change: F) -> Result<TaskMap>
    where
        F: FnOnce(&mut Task) -> Result<(), TodoError>,
    {
        let mut tasks = store.load_checked(position)?;
        let task = tasks
            .get_mut(&position)
            .ok_or(TodoError::NotFound(position))?;
        change(task)?;
        task.touch(today);
        store.save(&tasks)?;
        debug!("updated task {}", position);
        Ok(tasks)
    }
}
