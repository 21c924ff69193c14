pub mod interactive;
pub mod schedule;
