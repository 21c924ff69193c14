use serde_json::Value;
use std::io;

use amortization_core::amortization::Schedule;

use super::as_schedule_output;

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    match as_schedule_output(value) {
        Some(output) => print_schedule_csv(&output.result),
        None => print_field_values(value),
    }
}

/// One CSV record per period, headed by the record's field names.
pub fn print_schedule_csv(schedule: &Schedule) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    for period in &schedule.periods {
        if let Err(e) = wtr.serialize(period) {
            eprintln!("CSV serialization error: {}", e);
            return;
        }
    }
    if let Err(e) = wtr.flush() {
        tracing::debug!(error = %e, "stdout closed");
    }
}

fn print_field_values(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    if let Err(e) = wtr.write_record(["field", "value"]) {
        tracing::debug!(error = %e, "stdout closed");
        return;
    }

    if let Value::Object(map) = value {
        for (key, val) in map {
            let cell = match val {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            };
            if let Err(e) = wtr.write_record([key.as_str(), cell.as_str()]) {
                tracing::debug!(error = %e, "stdout closed");
                return;
            }
        }
    }
    if let Err(e) = wtr.flush() {
        tracing::debug!(error = %e, "stdout closed");
    }
}
