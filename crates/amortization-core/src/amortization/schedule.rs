//! Fixed-payment amortization with a constant per-period overpayment.
//!
//! The level payment is derived from the standard annuity formula over the
//! nominal term; the overpayment is added on top and never re-amortised, so
//! a loan carrying an overpayment retires before its nominal term. All math
//! in `rust_decimal::Decimal`.

use chrono::{Months as CalendarMonths, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, trace};

use crate::error::AmortizationError;
use crate::types::{with_metadata, ComputationOutput, Money, Months, Percent, Rate};
use crate::AmortizationResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Residual balance below which the final nominal period counts as paid off.
const BALANCE_EPSILON: Decimal = dec!(0.01);

/// Final-period overshoot large enough to be worth a warning.
const OVERSHOOT_WARNING_THRESHOLD: Decimal = dec!(0.01);

/// Longest nominal term accepted, in months (100 years).
pub const MAX_TERM_MONTHS: Months = 1200;

const METHODOLOGY: &str = "Fixed-payment amortization with constant overpayment";

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Loan terms for a single schedule computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Amount borrowed.
    pub principal: Money,
    /// Nominal annual rate as a percentage (5.0 = 5%).
    #[serde(alias = "annual_interest_rate")]
    pub annual_interest_rate_percent: Percent,
    /// Whole years of the nominal term.
    #[serde(default)]
    pub term_years: u32,
    /// Additional months of the nominal term.
    #[serde(default)]
    pub term_months: u32,
    /// Fixed extra amount added to every period's payment.
    #[serde(default)]
    pub overpayment: Money,
    /// Date of the first payment; later payments fall on the same day of
    /// each following month.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_payment_date: Option<NaiveDate>,
}

impl LoanParameters {
    pub fn new(
        principal: Money,
        annual_interest_rate_percent: Percent,
        term_years: u32,
        term_months: u32,
        overpayment: Money,
    ) -> Self {
        LoanParameters {
            principal,
            annual_interest_rate_percent,
            term_years,
            term_months,
            overpayment,
            first_payment_date: None,
        }
    }

    pub fn with_first_payment_date(mut self, date: NaiveDate) -> Self {
        self.first_payment_date = Some(date);
        self
    }

    /// Nominal term in months, `None` if it does not fit a `u32`.
    pub fn nominal_term_months(&self) -> Option<Months> {
        self.term_years
            .checked_mul(12)
            .and_then(|m| m.checked_add(self.term_months))
    }

    /// Periodic (monthly) rate as a decimal.
    pub fn monthly_rate(&self) -> Rate {
        self.annual_interest_rate_percent / dec!(100) / dec!(12)
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One elapsed period of the schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// 1-based period number.
    pub period_index: u32,
    /// Level payment plus overpayment; identical in every period.
    pub scheduled_payment: Money,
    pub interest_portion: Money,
    /// `scheduled_payment - interest_portion`, unreconciled in the final period.
    pub principal_portion: Money,
    /// Balance after this period, floored at zero.
    pub remaining_balance: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
}

/// Full amortization schedule plus its aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub periods: Vec<PeriodRecord>,
    /// Sum of `interest_portion` over all periods.
    pub total_interest_paid: Money,
    /// Level payment before overpayment.
    pub base_payment: Money,
    pub scheduled_payment: Money,
    /// Sum of nominal `scheduled_payment` over all periods.
    pub total_paid: Money,
    pub nominal_term_months: Months,
    pub periods_elapsed: Months,
    /// Nominal periods that were never needed thanks to the overpayment.
    pub periods_saved: Months,
    /// Amount by which the last principal portion exceeded the balance owed.
    pub final_period_overpayment: Money,
}

impl Schedule {
    pub fn is_early_payoff(&self) -> bool {
        self.periods_elapsed < self.nominal_term_months
    }

    pub fn final_balance(&self) -> Money {
        self.periods
            .last()
            .map(|p| p.remaining_balance)
            .unwrap_or(Decimal::ZERO)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the period-by-period schedule for `params`.
///
/// Fails with [`AmortizationError::InvalidInput`] before any iteration when
/// the principal is not positive, the rate or overpayment is negative, the
/// nominal term is zero or longer than [`MAX_TERM_MONTHS`], or the payment
/// or its totals exceed the Decimal range.
pub fn compute_schedule(params: &LoanParameters) -> AmortizationResult<Schedule> {
    let nper = validate(params)?;

    let monthly_rate = params.monthly_rate();
    let base_payment = level_payment(params.principal, monthly_rate, nper)?;
    let scheduled_payment = base_payment
        .checked_add(params.overpayment)
        .ok_or_else(|| out_of_range("overpayment"))?;
    // Bounds every running total below, so the loop cannot overflow.
    scheduled_payment
        .checked_mul(Decimal::from(nper))
        .ok_or_else(|| out_of_range("overpayment"))?;
    debug!(
        %monthly_rate,
        %base_payment,
        %scheduled_payment,
        nper,
        "derived level payment"
    );

    let mut periods = Vec::with_capacity(nper as usize);
    let mut balance = params.principal;
    let mut total_interest_paid = Decimal::ZERO;
    let mut total_paid = Decimal::ZERO;
    let mut final_period_overpayment = Decimal::ZERO;

    for period_index in 1..=nper {
        let interest_portion = balance
            .checked_mul(monthly_rate)
            .ok_or_else(|| out_of_range("annual_interest_rate_percent"))?;
        let principal_portion = scheduled_payment - interest_portion;

        let mut remaining_balance = balance - principal_portion;
        if remaining_balance < Decimal::ZERO {
            final_period_overpayment = -remaining_balance;
            remaining_balance = Decimal::ZERO;
        } else if period_index == nper && remaining_balance < BALANCE_EPSILON {
            // Rounding residual of the level payment over the full term.
            remaining_balance = Decimal::ZERO;
        }

        let payment_date = match params.first_payment_date {
            Some(first) => Some(nth_payment_date(first, period_index)?),
            None => None,
        };

        trace!(
            period_index,
            %interest_portion,
            %principal_portion,
            %remaining_balance,
            "amortization period"
        );

        total_interest_paid = total_interest_paid
            .checked_add(interest_portion)
            .ok_or_else(|| out_of_range("annual_interest_rate_percent"))?;
        total_paid += scheduled_payment;
        periods.push(PeriodRecord {
            period_index,
            scheduled_payment,
            interest_portion,
            principal_portion,
            remaining_balance,
            payment_date,
        });

        balance = remaining_balance;
        if balance <= Decimal::ZERO {
            break;
        }
    }

    let periods_elapsed = periods.len() as Months;
    if periods_elapsed < nper {
        debug!(
            periods_elapsed,
            nominal_term_months = nper,
            "loan paid off early"
        );
    }

    Ok(Schedule {
        periods,
        total_interest_paid,
        base_payment,
        scheduled_payment,
        total_paid,
        nominal_term_months: nper,
        periods_elapsed,
        periods_saved: nper - periods_elapsed,
        final_period_overpayment,
    })
}

/// Compute the schedule and wrap it in the standard output envelope.
pub fn analyze_schedule(
    params: &LoanParameters,
) -> AmortizationResult<ComputationOutput<Schedule>> {
    let start = Instant::now();
    let schedule = compute_schedule(params)?;

    let mut warnings: Vec<String> = Vec::new();
    if params.annual_interest_rate_percent.is_zero() {
        warnings.push("Interest rate is zero; every payment is pure principal".into());
    }
    if schedule.is_early_payoff() {
        warnings.push(format!(
            "Overpayment of {} per period retires the loan after {} of {} periods ({} saved)",
            params.overpayment.round_dp(2),
            schedule.periods_elapsed,
            schedule.nominal_term_months,
            schedule.periods_saved
        ));
    }
    if schedule.final_period_overpayment >= OVERSHOOT_WARNING_THRESHOLD {
        warnings.push(format!(
            "Final period reports the nominal payment; it exceeds the balance owed by {}",
            schedule.final_period_overpayment.round_dp(2)
        ));
    }

    Ok(with_metadata(METHODOLOGY, params, warnings, start, schedule))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(params: &LoanParameters) -> AmortizationResult<Months> {
    if params.principal <= Decimal::ZERO {
        return Err(AmortizationError::invalid(
            "principal",
            "Principal must be positive",
        ));
    }
    if params.annual_interest_rate_percent < Decimal::ZERO {
        return Err(AmortizationError::invalid(
            "annual_interest_rate_percent",
            "Interest rate must be non-negative",
        ));
    }
    if params.overpayment < Decimal::ZERO {
        return Err(AmortizationError::invalid(
            "overpayment",
            "Overpayment must be non-negative",
        ));
    }
    match params.nominal_term_months() {
        Some(0) => Err(AmortizationError::invalid(
            "term",
            "Term in years and months must total at least one month",
        )),
        Some(n) if n <= MAX_TERM_MONTHS => Ok(n),
        _ => Err(AmortizationError::invalid(
            "term",
            "Term may not exceed 100 years",
        )),
    }
}

fn out_of_range(field: &str) -> AmortizationError {
    AmortizationError::invalid(field, "Payment amounts exceed the representable range")
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Level payment retiring `principal` over `nper` periods at `rate`.
fn level_payment(principal: Money, rate: Rate, nper: Months) -> AmortizationResult<Money> {
    let straight_line = principal / Decimal::from(nper);
    if rate.is_zero() {
        return Ok(straight_line);
    }

    let interest_only = principal
        .checked_mul(rate)
        .ok_or_else(|| out_of_range("annual_interest_rate_percent"))?;
    let growth = match Decimal::ONE
        .checked_add(rate)
        .and_then(|base| compound(base, nper))
    {
        Some(growth) => growth,
        // (1+r)^n beyond Decimal range: the annuity factor is 1.
        None => return Ok(interest_only),
    };

    let denom = growth - Decimal::ONE;
    if denom.is_zero() {
        // Rate too small to move (1+r)^n at 28 digits.
        return Ok(straight_line);
    }
    growth
        .checked_div(denom)
        .and_then(|factor| interest_only.checked_mul(factor))
        .ok_or_else(|| out_of_range("annual_interest_rate_percent"))
}

/// Compute base^n via iterative multiplication; `None` on overflow.
fn compound(base: Decimal, n: Months) -> Option<Decimal> {
    let mut result = Decimal::ONE;
    for _ in 0..n {
        result = result.checked_mul(base)?;
    }
    Some(result)
}

fn nth_payment_date(first: NaiveDate, period_index: u32) -> AmortizationResult<NaiveDate> {
    first
        .checked_add_months(CalendarMonths::new(period_index - 1))
        .ok_or_else(|| {
            AmortizationError::invalid(
                "first_payment_date",
                "Payment dates run past the supported calendar range",
            )
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
