// Core data models for todo-jsonl

pub mod task;

pub use task::*;
