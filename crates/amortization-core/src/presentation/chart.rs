use serde::{Deserialize, Serialize};

use super::table::year_month;
use crate::amortization::Schedule;
use crate::types::Money;

/// Three per-period series for a payment breakdown chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub total_payments: Vec<Money>,
    pub principal_payments: Vec<Money>,
    pub interest_payments: Vec<Money>,
}

impl ChartSeries {
    pub fn from_schedule(schedule: &Schedule) -> Self {
        let n = schedule.periods.len();
        let mut series = ChartSeries {
            labels: Vec::with_capacity(n),
            total_payments: Vec::with_capacity(n),
            principal_payments: Vec::with_capacity(n),
            interest_payments: Vec::with_capacity(n),
        };
        for p in &schedule.periods {
            let (year, month) = year_month(p.period_index);
            series.labels.push(format!("Year {year} Month {month}"));
            series.total_payments.push(p.scheduled_payment);
            series.principal_payments.push(p.principal_portion);
            series.interest_payments.push(p.interest_portion);
        }
        series
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
