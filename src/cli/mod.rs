pub mod commands;
pub mod output;
pub mod repl;

pub use commands::*;
pub use output::*;
