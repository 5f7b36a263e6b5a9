pub mod rating;
pub mod schedule;
pub mod term;
