//! Filter parser
//!
//! Turns command-line pattern tokens into a [`Filter`].
//!
//! # Rules
//!
//! - Tokens naming a catalog query (`:done`, `:overdue`, ...) become named
//!   patterns, everything else is a case-insensitive title regex.
//! - All patterns are ANDed together.
//! - Duplicate tokens are dropped, keeping the first occurrence.
//! - Unless some token selects by state (`:active`, `:done`, `:all`, ...),
//!   `:active` is added, so no tokens at all means "active tasks".
//!
//! # Examples
//!
//! ```text
//! list                  -> :active
//! list @home            -> :active AND /@home/i
//! list :all @home       -> :all AND /@home/i
//! list :done :overdue   -> :done AND :overdue
//! ```

use std::collections::HashSet;

use crate::error::TodoError;
use crate::filter::evaluator::{Filter, Pattern};
use crate::filter::query;

/// Parse filter tokens into a Filter
///
/// # Example
///
/// ```
/// use todo_jsonl::filter::parse_filter;
///
/// let filter = parse_filter(&["@home", ":overdue"]).unwrap();
/// assert_eq!(filter.patterns().len(), 3);
/// ```
pub fn parse_filter<S: AsRef<str>>(tokens: &[S]) -> Result<Filter, TodoError> {
    let mut seen = HashSet::new();
    let mut patterns = Vec::new();

    for token in tokens {
        let token = token.as_ref();
        if token.is_empty() || !seen.insert(token) {
            continue;
        }
        patterns.push(Pattern::parse(token)?);
    }

    if !patterns.iter().any(Pattern::selects_state) {
        patterns.insert(0, Pattern::Named(query::active_query()));
    }

    Ok(Filter::new(patterns))
}

/// Parse cleanup tokens: the given patterns ANDed with `:done`
pub fn parse_cleanup_filter<S: AsRef<str>>(tokens: &[S]) -> Result<Filter, TodoError> {
    let mut all: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();
    all.push(query::done_query().name);
    parse_filter(&all)
}
