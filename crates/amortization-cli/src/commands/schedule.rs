use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use amortization_core::amortization::{self, LoanParameters, TermInput};

use crate::input;

/// Arguments for a schedule computation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ScheduleArgs {
    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate as a percentage (e.g. 5.0 for 5%)
    #[arg(long, alias = "annual-interest-rate")]
    pub rate: Option<Decimal>,

    /// Term in whole years
    #[arg(long)]
    pub years: Option<i64>,

    /// Additional months of term; values outside 0-11 roll into years
    #[arg(long)]
    pub months: Option<i64>,

    /// Fixed extra payment each month; negative values count as zero
    #[arg(long, default_value = "0")]
    pub overpayment: Decimal,

    /// Date of the first payment (YYYY-MM-DD)
    #[arg(long)]
    pub first_payment_date: Option<NaiveDate>,

    /// Path to a JSON or YAML file with loan parameters (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params: LoanParameters = if let Some(ref path) = args.input {
        input::file::read_document(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        params_from_flags(&args)?
    };

    let result = amortization::analyze_schedule(&params)?;
    Ok(serde_json::to_value(result)?)
}

fn params_from_flags(args: &ScheduleArgs) -> Result<LoanParameters, Box<dyn std::error::Error>> {
    let raw = TermInput {
        principal: Some(
            args.principal
                .ok_or("--principal is required (or provide --input)")?,
        ),
        annual_interest_rate_percent: Some(
            args.rate.ok_or("--rate is required (or provide --input)")?,
        ),
        years: args.years,
        months: args.months,
        overpayment: Some(args.overpayment),
        first_payment_date: args.first_payment_date,
    };
    if raw.years.is_none() && raw.months.is_none() {
        return Err("--years or --months is required (or provide --input)".into());
    }

    amortization::normalize(&raw).ok_or_else(|| describe_rejection(&raw).into())
}

/// Explain which flag kept `normalize` from producing parameters.
fn describe_rejection(raw: &TermInput) -> String {
    if raw.principal.map_or(true, |p| p <= dec!(0)) {
        "--principal must be positive".to_string()
    } else if raw.annual_interest_rate_percent.map_or(true, |r| r < dec!(0)) {
        "--rate must be non-negative".to_string()
    } else {
        "--years and --months must total between one month and 100 years".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ScheduleArgs {
        ScheduleArgs {
            principal: Some(dec!(100_000)),
            rate: Some(dec!(5)),
            years: Some(30),
            months: None,
            overpayment: dec!(0),
            first_payment_date: None,
            input: None,
        }
    }

    #[test]
    fn test_flags_normalized() {
        let mut a = args();
        a.months = Some(14);
        a.overpayment = dec!(-10);
        let params = params_from_flags(&a).unwrap();
        assert_eq!((params.term_years, params.term_months), (31, 2));
        assert_eq!(params.overpayment, dec!(0));
    }

    #[test]
    fn test_missing_flag_named() {
        let mut a = args();
        a.rate = None;
        let err = params_from_flags(&a).unwrap_err();
        assert!(err.to_string().contains("--rate"));
    }

    #[test]
    fn test_rejection_names_flag() {
        let mut a = args();
        a.principal = Some(dec!(0));
        let err = params_from_flags(&a).unwrap_err();
        assert_eq!(err.to_string(), "--principal must be positive");

        let mut a = args();
        a.years = Some(0);
        a.months = Some(0);
        let err = params_from_flags(&a).unwrap_err();
        assert!(err.to_string().contains("between one month and 100 years"));
    }
}
