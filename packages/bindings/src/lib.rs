use napi::Result as NapiResult;
use napi_derive::napi;

use amortization_core::amortization::{self, LoanParameters, TermInput};
use amortization_core::presentation::{schedule_rows, ChartSeries};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_params(input_json: &str) -> NapiResult<LoanParameters> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

/// Enveloped schedule for a `LoanParameters` JSON document.
#[napi]
pub fn compute_schedule(input_json: String) -> NapiResult<String> {
    let params = parse_params(&input_json)?;
    let output = amortization::analyze_schedule(&params).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Normalize raw form values; returns `"null"` when no schedule should be shown.
#[napi]
pub fn normalize_form(input_json: String) -> NapiResult<String> {
    let raw: TermInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    serde_json::to_string(&amortization::normalize(&raw)).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

#[napi]
pub fn schedule_table(input_json: String) -> NapiResult<String> {
    let params = parse_params(&input_json)?;
    let schedule = amortization::compute_schedule(&params).map_err(to_napi_error)?;
    serde_json::to_string(&schedule_rows(&schedule)).map_err(to_napi_error)
}

#[napi]
pub fn chart_series(input_json: String) -> NapiResult<String> {
    let params = parse_params(&input_json)?;
    let schedule = amortization::compute_schedule(&params).map_err(to_napi_error)?;
    serde_json::to_string(&ChartSeries::from_schedule(&schedule)).map_err(to_napi_error)
}
