pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use amortization_core::amortization::Schedule;
use amortization_core::presentation::ScheduleSnapshot;
use amortization_core::ComputationOutput;
use serde_json::Value;

use crate::OutputFormat;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Print one recomputed schedule from the interactive loop.
pub fn print_snapshot(format: &OutputFormat, snapshot: &ScheduleSnapshot) {
    match format {
        OutputFormat::Json => match serde_json::to_value(&snapshot.schedule) {
            Ok(value) => json::print_json(&value),
            Err(e) => eprintln!("JSON serialization error: {}", e),
        },
        OutputFormat::Table => table::print_schedule_table(snapshot),
        OutputFormat::Csv => csv_out::print_schedule_csv(&snapshot.schedule),
        OutputFormat::Minimal => println!("{}", snapshot.total_interest_display),
    }
}

/// Recover a schedule envelope from its JSON form, if that is what `value` holds.
fn as_schedule_output(value: &Value) -> Option<ComputationOutput<Schedule>> {
    serde_json::from_value(value.clone()).ok()
}
