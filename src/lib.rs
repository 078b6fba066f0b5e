//! todo-jsonl - a todo list manager inspired by todo.txt, storing tasks as JSON Lines
//!
//! This library provides the core functionality, including:
//! - The task record and its line-per-task store
//! - Date token resolution (`today`, `tomorrow`, weekday names)
//! - Named queries and regex filters
//! - Task mutations, sorting and terminal rendering
//! - CLI command parsing and execution, and the REPL
//!
//! # Example
//!
//! ```no_run
//! use todo_jsonl::cli::run;
//!
//! fn main() {
//!     if let Err(e) = run() {
//!         eprintln!("ERROR: {}", e);
//!         std::process::exit(1);
//!     }
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod repo;
pub mod store;
pub mod utils;
