pub mod jsonl;

pub use jsonl::{decode_tasks, encode_task, renumber, TaskStore};
