use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::amortization::{PeriodRecord, Schedule};
use crate::types::Money;

/// Column headings for a rendered schedule table.
pub const TABLE_HEADERS: [&str; 6] = [
    "Year",
    "Month",
    "Total Payment",
    "Principal Left",
    "Principal Paid",
    "Interest Paid",
];

/// A schedule period laid out for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub period_index: u32,
    /// Whole years elapsed, `period_index / 12`.
    pub year: u32,
    /// Month within the year, `period_index % 12 + 1`.
    pub month: u32,
    pub total_payment: String,
    pub principal_left: String,
    pub principal_paid: String,
    pub interest_paid: String,
}

impl ScheduleRow {
    pub fn from_record(record: &PeriodRecord) -> Self {
        let (year, month) = year_month(record.period_index);
        ScheduleRow {
            period_index: record.period_index,
            year,
            month,
            total_payment: format_currency(record.scheduled_payment),
            principal_left: format_currency(record.remaining_balance),
            principal_paid: format_currency(record.principal_portion),
            interest_paid: format_currency(record.interest_portion),
        }
    }

    /// Cells in [`TABLE_HEADERS`] order.
    pub fn cells(&self) -> [String; 6] {
        [
            self.year.to_string(),
            self.month.to_string(),
            self.total_payment.clone(),
            self.principal_left.clone(),
            self.principal_paid.clone(),
            self.interest_paid.clone(),
        ]
    }
}

/// Year/month grouping used by both the table and the chart labels.
pub fn year_month(period_index: u32) -> (u32, u32) {
    (period_index / 12, period_index % 12 + 1)
}

/// Render an amount as pounds to two decimal places.
pub fn format_currency(amount: Money) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    // Avoid "£-0.00" for tiny negative residuals.
    let rounded = if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    };
    format!("£{:.2}", rounded)
}

pub fn schedule_rows(schedule: &Schedule) -> Vec<ScheduleRow> {
    schedule.periods.iter().map(ScheduleRow::from_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::{compute_schedule, LoanParameters};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec!(1000)), "£1000.00");
        assert_eq!(format_currency(dec!(416.666666)), "£416.67");
        assert_eq!(format_currency(dec!(0.125)), "£0.13");
        assert_eq!(format_currency(dec!(-0.001)), "£0.00");
    }

    #[test]
    fn test_year_month_grouping() {
        assert_eq!(year_month(1), (0, 2));
        assert_eq!(year_month(11), (0, 12));
        assert_eq!(year_month(12), (1, 1));
        assert_eq!(year_month(25), (2, 2));
    }

    #[test]
    fn test_rows_for_zero_rate_loan() {
        let params = LoanParameters::new(dec!(12_000), dec!(0), 1, 0, dec!(0));
        let schedule = compute_schedule(&params).unwrap();
        let rows = schedule_rows(&schedule);
        assert_eq!(rows.len(), 12);
        assert_eq!(
            rows[0].cells(),
            [
                "0".to_string(),
                "2".to_string(),
                "£1000.00".to_string(),
                "£11000.00".to_string(),
                "£1000.00".to_string(),
                "£0.00".to_string(),
            ]
        );
        assert_eq!(rows[11].principal_left, "£0.00");
    }
}
