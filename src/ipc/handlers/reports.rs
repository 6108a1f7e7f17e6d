use chrono::NaiveDate;

use crate::calc;
use crate::ipc::error::HandlerErr;
use crate::ipc::helpers::{parse_optional_field, to_json, today, with_store};
use crate::ipc::types::{AppState, Request};
use crate::store::Store;

fn report_date(params: &serde_json::Value) -> Result<NaiveDate, HandlerErr> {
    Ok(parse_optional_field(params, "date")?.unwrap_or_else(today))
}

fn reports_dashboard(
    store: &mut Store,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let date = report_date(params)?;
    to_json(&calc::dashboard_summary(store, date))
}

fn reports_fees(store: &mut Store, _params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    to_json(&calc::fee_summary(store.fees()))
}

fn reports_attendance(
    store: &mut Store,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let date = report_date(params)?;
    to_json(&calc::attendance_day_summary(store, date))
}

fn reports_classes(
    store: &mut Store,
    _params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    to_json(&calc::class_summary(store))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "reports.dashboard" => Some(with_store(state, req, reports_dashboard)),
        "reports.fees" => Some(with_store(state, req, reports_fees)),
        "reports.attendance" => Some(with_store(state, req, reports_attendance)),
        "reports.classes" => Some(with_store(state, req, reports_classes)),
        _ => None,
    }
}
