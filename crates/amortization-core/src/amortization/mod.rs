pub mod inputs;
pub mod schedule;

pub use inputs::{normalize, TermInput};
pub use schedule::{analyze_schedule, compute_schedule, LoanParameters, PeriodRecord, Schedule};
