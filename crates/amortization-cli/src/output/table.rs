use serde_json::Value;
use tabled::{builder::Builder, Table};

use amortization_core::presentation::{ScheduleSnapshot, TABLE_HEADERS};

use super::as_schedule_output;

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    let Some(output) = as_schedule_output(value) else {
        print_flat_object(value);
        return;
    };

    print_schedule_table(&ScheduleSnapshot::from_schedule(output.result));

    if !output.warnings.is_empty() {
        println!("\nWarnings:");
        for w in &output.warnings {
            println!("  - {}", w);
        }
    }
    println!("\nMethodology: {}", output.methodology);
}

/// One row per period, then the total interest line.
pub fn print_schedule_table(snapshot: &ScheduleSnapshot) {
    let mut builder = Builder::default();
    builder.push_record(TABLE_HEADERS);
    for row in &snapshot.rows {
        builder.push_record(row.cells());
    }
    println!("{}", Table::from(builder));

    let schedule = &snapshot.schedule;
    println!("\nTotal interest paid: {}", snapshot.total_interest_display);
    if schedule.is_early_payoff() {
        println!(
            "Paid off after {} of {} months",
            schedule.periods_elapsed, schedule.nominal_term_months
        );
    }
}

fn print_flat_object(value: &Value) {
    let Value::Object(map) = value else {
        println!("{}", value);
        return;
    };
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        let cell = match val {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        builder.push_record([key.clone(), cell]);
    }
    println!("{}", Table::from(builder));
}
