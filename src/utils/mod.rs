pub mod date;
pub mod tags;

pub use date::{days_until, DateResolver, DATE_FORMAT};
