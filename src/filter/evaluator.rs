//! Filter evaluator
//!
//! A filter is a list of patterns that must all match. Each pattern is either
//! a named query from the catalog or a case-insensitive regular expression
//! matched against the task title.

use chrono::NaiveDate;
use regex::{Regex, RegexBuilder};

use crate::error::TodoError;
use crate::filter::query::{self, NamedQuery};
use crate::models::{Task, TaskMap};

#[derive(Debug, Clone)]
pub enum Pattern {
    Named(&'static NamedQuery),
    Regex(Regex),
}

impl Pattern {
    /// Parse a command-line token: a catalog name, otherwise a regex
    pub fn parse(token: &str) -> Result<Self, TodoError> {
        if let Some(named) = query::lookup(token) {
            return Ok(Pattern::Named(named));
        }
        RegexBuilder::new(token)
            .case_insensitive(true)
            .build()
            .map(Pattern::Regex)
            .map_err(|_| TodoError::InvalidPattern(token.to_string()))
    }

    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        match self {
            Pattern::Named(named) => named.matches(task, today),
            Pattern::Regex(re) => re.is_match(&task.title),
        }
    }

    pub fn selects_state(&self) -> bool {
        matches!(self, Pattern::Named(named) if named.selects_state)
    }
}

/// Conjunction of patterns
#[derive(Debug, Clone)]
pub struct Filter {
    patterns: Vec<Pattern>,
}

impl Filter {
    pub fn new(patterns: Vec<Pattern>) -> Self {
        Self { patterns }
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        self.patterns.iter().all(|p| p.matches(task, today))
    }
}

/// Select the tasks matching a filter, in position order
pub fn filter_tasks<'a>(tasks: &'a TaskMap, filter: &Filter, today: NaiveDate) -> Vec<(usize, &'a Task)> {
    tasks
        .iter()
        .filter(|(_, task)| filter.matches(task, today))
        .map(|(position, task)| (*position, task))
        .collect()
}
