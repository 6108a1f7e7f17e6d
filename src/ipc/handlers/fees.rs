use serde::Deserialize;
use serde_json::json;

use crate::calc;
use crate::ipc::error::HandlerErr;
use crate::ipc::helpers::{
    get_optional_str, get_required_str, parse_field, parse_optional_field, today, with_store,
};
use crate::ipc::types::{AppState, Request};
use crate::store::{new_record_id, FeeRecord, FeeStatus, PaymentMethod, Store};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewFee {
    id: Option<String>,
    student_id: String,
    month: String,
    amount: i64,
    #[serde(default)]
    class: String,
    #[serde(default)]
    subject: String,
}

fn fees_list(store: &mut Store, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let status: Option<FeeStatus> = parse_optional_field(params, "status")?;
    let search = get_optional_str(params, "search");
    let fees = calc::filter_fees(store, status, search.as_deref());
    Ok(json!({ "fees": fees }))
}

/// New fees always start out pending.
fn fees_create(store: &mut Store, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let new: NewFee = parse_field(params, "fee")?;
    if new.student_id.trim().is_empty() || new.month.trim().is_empty() {
        return Err(HandlerErr::bad_params("studentId/month must not be empty"));
    }
    let fee = FeeRecord::pending(
        new.id.unwrap_or_else(new_record_id),
        new.student_id,
        new.month,
        new.amount,
        new.class,
        new.subject,
    );
    store.add_fee(fee.clone());
    Ok(json!({ "fee": fee }))
}

fn fees_record_payment(
    store: &mut Store,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let fee_id = get_required_str(params, "feeId")?;
    let payment_date = parse_optional_field(params, "paymentDate")?.unwrap_or_else(today);
    let method = parse_optional_field(params, "paymentMethod")?.unwrap_or(PaymentMethod::Online);
    let recorded = store.record_fee_payment(&fee_id, payment_date, method);
    Ok(json!({ "recorded": recorded, "fee": store.find_fee(&fee_id) }))
}

fn fees_set_all(store: &mut Store, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let fees: Vec<FeeRecord> = parse_field(params, "fees")?;
    let count = fees.len();
    store.set_fees(fees);
    Ok(json!({ "count": count }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "fees.list" => Some(with_store(state, req, fees_list)),
        "fees.create" => Some(with_store(state, req, fees_create)),
        "fees.recordPayment" => Some(with_store(state, req, fees_record_payment)),
        "fees.setAll" => Some(with_store(state, req, fees_set_all)),
        _ => None,
    }
}
