pub mod evaluator;
pub mod parser;
pub mod query;

pub use evaluator::{filter_tasks, Filter, Pattern};
pub use parser::{parse_cleanup_filter, parse_filter};
pub use query::{NamedQuery, QUERIES};
