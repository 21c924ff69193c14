//! Raw loan-form input and its normalization into [`LoanParameters`].
//!
//! The engine expects well-formed parameters and never repeats this step.
//! Normalization returns `None` when the form is incomplete or invalid;
//! callers then show no result rather than an error.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::schedule::{LoanParameters, MAX_TERM_MONTHS};
use crate::types::{Money, Percent};

/// Loan fields as entered, before clamping and rolling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermInput {
    #[serde(default)]
    pub principal: Option<Money>,
    #[serde(default, alias = "rate")]
    pub annual_interest_rate_percent: Option<Percent>,
    #[serde(default)]
    pub years: Option<i64>,
    /// May fall outside 0..=11; overflow rolls into `years`.
    #[serde(default)]
    pub months: Option<i64>,
    /// Negative values are clamped to zero.
    #[serde(default)]
    pub overpayment: Option<Money>,
    #[serde(default)]
    pub first_payment_date: Option<NaiveDate>,
}

impl TermInput {
    /// `(years, months)` with months rolled into `0..=11`, if any term was given.
    pub fn rolled_term(&self) -> Option<(i64, i64)> {
        if self.years.is_none() && self.months.is_none() {
            return None;
        }
        let total = self
            .years
            .unwrap_or(0)
            .checked_mul(12)?
            .checked_add(self.months.unwrap_or(0))?;
        Some((total.div_euclid(12), total.rem_euclid(12)))
    }

    /// Overpayment with negatives and blanks mapped to zero.
    pub fn clamped_overpayment(&self) -> Money {
        self.overpayment
            .filter(|o| *o > Decimal::ZERO)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Turn raw form input into engine parameters, or `None` to withhold the
/// computation.
pub fn normalize(raw: &TermInput) -> Option<LoanParameters> {
    let params = try_normalize(raw);
    if params.is_none() {
        debug!(?raw, "loan inputs incomplete or invalid; no schedule");
    }
    params
}

fn try_normalize(raw: &TermInput) -> Option<LoanParameters> {
    let principal = raw.principal.filter(|p| *p > Decimal::ZERO)?;
    let rate = raw
        .annual_interest_rate_percent
        .filter(|r| *r >= Decimal::ZERO)?;
    let (years, months) = raw.rolled_term()?;
    let total = years * 12 + months;
    if total <= 0 || total > i64::from(MAX_TERM_MONTHS) {
        return None;
    }

    let mut params = LoanParameters::new(
        principal,
        rate,
        u32::try_from(years).ok()?,
        u32::try_from(months).ok()?,
        raw.clamped_overpayment(),
    );
    params.first_payment_date = raw.first_payment_date;
    Some(params)
}
