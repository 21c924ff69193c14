use clap::Args;
use rust_decimal::Decimal;
use std::io::{self, BufRead};
use tracing::warn;

use amortization_core::amortization::TermInput;
use amortization_core::presentation::{RenderTarget, ScheduleSnapshot, ScheduleView};

use crate::input;
use crate::output;
use crate::OutputFormat;

/// Arguments for the recompute-on-change loop
#[derive(Args)]
pub struct InteractiveArgs {
    /// JSON or YAML file with the starting form values
    #[arg(long)]
    pub input: Option<String>,
}

/// Writes each recomputed schedule to stdout in the chosen format.
struct TerminalTarget {
    format: OutputFormat,
}

impl RenderTarget for TerminalTarget {
    fn render(&mut self, snapshot: &ScheduleSnapshot) {
        output::print_snapshot(&self.format, snapshot);
    }

    fn update(&mut self, snapshot: &ScheduleSnapshot) {
        println!();
        output::print_snapshot(&self.format, snapshot);
    }

    fn clear(&mut self) {
        println!("(no result)");
    }
}

pub fn run_interactive(
    args: InteractiveArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut raw: TermInput = match args.input {
        Some(ref path) => input::file::read_document(path)?,
        None => TermInput::default(),
    };

    if !input::stdin::is_piped() {
        eprintln!(
            "Enter field=value (principal, rate, years, months, overpayment); 'quit' to exit"
        );
    }

    let mut view = ScheduleView::new(TerminalTarget { format });
    refresh_or_warn(&mut view, &raw);

    for line in io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }
        match apply_assignment(&mut raw, line) {
            Ok(()) => refresh_or_warn(&mut view, &raw),
            Err(reason) => warn!(%line, %reason, "ignoring input line"),
        }
    }
    Ok(())
}

/// Recompute the view; a rejected form leaves it cleared and the session open.
fn refresh_or_warn<T: RenderTarget>(view: &mut ScheduleView<T>, raw: &TermInput) {
    if let Err(e) = view.refresh(raw) {
        warn!(error = %e, "form rejected; waiting for the next edit");
    }
}

/// Apply one `field=value` edit; an empty value blanks the field.
fn apply_assignment(raw: &mut TermInput, line: &str) -> Result<(), String> {
    let (field, value) = line
        .split_once('=')
        .ok_or_else(|| "expected field=value".to_string())?;
    let value = value.trim();

    match field.trim() {
        "principal" => raw.principal = parse_opt::<Decimal>(value)?,
        "rate" | "annual_interest_rate" => raw.annual_interest_rate_percent = parse_opt(value)?,
        "years" => raw.years = parse_opt(value)?,
        "months" => raw.months = parse_opt(value)?,
        "overpayment" => raw.overpayment = parse_opt(value)?,
        "first_payment_date" => raw.first_payment_date = parse_opt(value)?,
        other => return Err(format!("unknown field '{}'", other)),
    }
    Ok(())
}

fn parse_opt<T>(value: &str) -> Result<Option<T>, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<T>()
        .map(Some)
        .map_err(|e| format!("invalid value '{}': {}", value, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[derive(Default)]
    struct Counter {
        draws: usize,
        clears: usize,
    }

    impl RenderTarget for Counter {
        fn render(&mut self, _: &ScheduleSnapshot) {
            self.draws += 1;
        }
        fn update(&mut self, _: &ScheduleSnapshot) {
            self.draws += 1;
        }
        fn clear(&mut self) {
            self.clears += 1;
        }
    }

    #[test]
    fn test_apply_assignments() {
        let mut raw = TermInput::default();
        apply_assignment(&mut raw, "principal=100000").unwrap();
        apply_assignment(&mut raw, "rate = 5.5").unwrap();
        apply_assignment(&mut raw, "months=-1").unwrap();
        assert_eq!(raw.principal, Some(dec!(100000)));
        assert_eq!(raw.annual_interest_rate_percent, Some(dec!(5.5)));
        assert_eq!(raw.months, Some(-1));

        apply_assignment(&mut raw, "principal=").unwrap();
        assert_eq!(raw.principal, None);
    }

    #[test]
    fn test_bad_assignments_rejected() {
        let mut raw = TermInput::default();
        assert!(apply_assignment(&mut raw, "principal").is_err());
        assert!(apply_assignment(&mut raw, "colour=red").is_err());
        assert!(apply_assignment(&mut raw, "years=ten").is_err());
        assert_eq!(raw, TermInput::default());
    }

    #[test]
    fn test_rejected_form_keeps_session_open() {
        let mut raw = TermInput::default();
        for line in ["principal=12000", "rate=0", "years=1"] {
            apply_assignment(&mut raw, line).unwrap();
        }
        let mut view = ScheduleView::new(Counter::default());
        refresh_or_warn(&mut view, &raw);

        // Second payment date falls past the end of the calendar.
        raw.first_payment_date = Some(NaiveDate::MAX);
        refresh_or_warn(&mut view, &raw);
        assert!(view.current().is_none());

        apply_assignment(&mut raw, "first_payment_date=").unwrap();
        refresh_or_warn(&mut view, &raw);
        assert!(view.current().is_some());

        let target = view.into_target();
        assert_eq!((target.draws, target.clears), (2, 1));
    }
}
