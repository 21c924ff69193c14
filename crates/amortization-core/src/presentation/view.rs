//! Recompute-on-change wiring between raw loan input and a render target.
//!
//! Every refresh produces a full replacement; there is no delta contract.
//! The first valid schedule is rendered, later ones update the target in
//! place, and incomplete input clears it.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::chart::ChartSeries;
use super::table::{format_currency, schedule_rows, ScheduleRow};
use crate::amortization::{compute_schedule, normalize, Schedule, TermInput};
use crate::AmortizationResult;

/// Everything a sink needs to draw one computed schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSnapshot {
    pub schedule: Schedule,
    pub rows: Vec<ScheduleRow>,
    pub chart: ChartSeries,
    /// `total_interest_paid` formatted as currency.
    pub total_interest_display: String,
}

impl ScheduleSnapshot {
    pub fn from_schedule(schedule: Schedule) -> Self {
        ScheduleSnapshot {
            rows: schedule_rows(&schedule),
            chart: ChartSeries::from_schedule(&schedule),
            total_interest_display: format_currency(schedule.total_interest_paid),
            schedule,
        }
    }
}

/// A drawing surface owned by a [`ScheduleView`].
pub trait RenderTarget {
    /// First draw.
    fn render(&mut self, snapshot: &ScheduleSnapshot);
    /// Replace the drawn schedule in place.
    fn update(&mut self, snapshot: &ScheduleSnapshot);
    /// Remove any drawn schedule.
    fn clear(&mut self);
}

pub struct ScheduleView<T: RenderTarget> {
    target: T,
    initialized: bool,
    current: Option<ScheduleSnapshot>,
}

impl<T: RenderTarget> ScheduleView<T> {
    pub fn new(target: T) -> Self {
        ScheduleView {
            target,
            initialized: false,
            current: None,
        }
    }

    /// Recompute from `raw` and push the result to the target.
    ///
    /// Returns `Ok(false)` when the input is incomplete and the target was
    /// cleared instead. An engine rejection also clears the target before
    /// the error is returned, so no stale schedule stays drawn.
    pub fn refresh(&mut self, raw: &TermInput) -> AmortizationResult<bool> {
        let params = match normalize(raw) {
            Some(p) => p,
            None => {
                self.reset();
                return Ok(false);
            }
        };

        let schedule = match compute_schedule(&params) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "schedule rejected; clearing view");
                self.reset();
                return Err(e);
            }
        };

        let snapshot = ScheduleSnapshot::from_schedule(schedule);
        if self.initialized {
            debug!(periods = snapshot.rows.len(), "updating schedule view");
            self.target.update(&snapshot);
        } else {
            debug!(periods = snapshot.rows.len(), "rendering schedule view");
            self.target.render(&snapshot);
            self.initialized = true;
        }
        self.current = Some(snapshot);
        Ok(true)
    }

    fn reset(&mut self) {
        self.target.clear();
        self.current = None;
    }

    pub fn current(&self) -> Option<&ScheduleSnapshot> {
        self.current.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn into_target(self) -> T {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(&'static str, usize)>,
    }

    impl RenderTarget for Recorder {
        fn render(&mut self, snapshot: &ScheduleSnapshot) {
            self.calls.push(("render", snapshot.rows.len()));
        }
        fn update(&mut self, snapshot: &ScheduleSnapshot) {
            self.calls.push(("update", snapshot.rows.len()));
        }
        fn clear(&mut self) {
            self.calls.push(("clear", 0));
        }
    }

    fn form() -> TermInput {
        TermInput {
            principal: Some(dec!(12_000)),
            annual_interest_rate_percent: Some(dec!(0)),
            years: Some(1),
            months: Some(0),
            overpayment: None,
            first_payment_date: None,
        }
    }

    #[test]
    fn test_render_then_update() {
        let mut view = ScheduleView::new(Recorder::default());
        let mut raw = form();
        assert!(view.refresh(&raw).unwrap());
        raw.overpayment = Some(dec!(1000));
        assert!(view.refresh(&raw).unwrap());
        assert_eq!(view.target().calls, vec![("render", 12), ("update", 6)]);
        assert_eq!(view.current().unwrap().total_interest_display, "£0.00");
    }

    #[test]
    fn test_incomplete_input_clears() {
        let mut view = ScheduleView::new(Recorder::default());
        let mut raw = form();
        view.refresh(&raw).unwrap();
        raw.principal = None;
        assert!(!view.refresh(&raw).unwrap());
        assert!(view.current().is_none());
        assert!(view.is_initialized());

        raw.principal = Some(dec!(6_000));
        view.refresh(&raw).unwrap();
        assert_eq!(
            view.into_target().calls,
            vec![("render", 12), ("clear", 0), ("update", 12)]
        );
    }

    #[test]
    fn test_engine_rejection_clears_previous_schedule() {
        let mut view = ScheduleView::new(Recorder::default());
        let mut raw = form();
        view.refresh(&raw).unwrap();

        // Second payment date falls past the end of the calendar.
        raw.first_payment_date = Some(NaiveDate::MAX);
        let err = view.refresh(&raw).unwrap_err();
        assert_eq!(err.field(), "first_payment_date");
        assert!(view.current().is_none());
        assert_eq!(view.target().calls, vec![("render", 12), ("clear", 0)]);

        raw.first_payment_date = None;
        assert!(view.refresh(&raw).unwrap());
        assert_eq!(
            view.into_target().calls,
            vec![("render", 12), ("clear", 0), ("update", 12)]
        );
    }

    #[test]
    fn test_oversized_term_clears_previous_schedule() {
        let mut view = ScheduleView::new(Recorder::default());
        let mut raw = form();
        view.refresh(&raw).unwrap();
        raw.years = Some(400_000_000);
        assert!(!view.refresh(&raw).unwrap());
        assert!(view.current().is_none());
        assert_eq!(view.target().calls, vec![("render", 12), ("clear", 0)]);
    }

    #[test]
    fn test_clear_before_first_render() {
        let mut view = ScheduleView::new(Recorder::default());
        assert!(!view.refresh(&TermInput::default()).unwrap());
        assert!(!view.is_initialized());
        view.refresh(&form()).unwrap();
        assert_eq!(view.target().calls, vec![("clear", 0), ("render", 12)]);
    }
}
