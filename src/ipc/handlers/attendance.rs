use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use crate::calc;
use crate::ipc::error::HandlerErr;
use crate::ipc::helpers::{
    get_optional_str, get_required_str, parse_field, parse_optional_field, today, with_store,
};
use crate::ipc::types::{AppState, Request};
use crate::store::{new_record_id, AttendanceRecord, QrMatch, Store, UserType};

const FALLBACK_LABEL: &str = "General";

fn now_time() -> String {
    Local::now().format("%H:%M").to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewAttendance {
    id: Option<String>,
    user_id: String,
    user_type: UserType,
    date: Option<NaiveDate>,
    time: Option<String>,
    #[serde(default)]
    class: String,
    #[serde(default)]
    subject: String,
}

impl NewAttendance {
    fn into_record(self) -> AttendanceRecord {
        AttendanceRecord {
            id: self.id.unwrap_or_else(new_record_id),
            user_id: self.user_id,
            user_type: self.user_type,
            date: self.date.unwrap_or_else(today),
            time: self.time.unwrap_or_else(now_time),
            class: self.class,
            subject: self.subject,
        }
    }
}

fn attendance_list(
    store: &mut Store,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let date: Option<NaiveDate> = parse_optional_field(params, "date")?;
    let user_type: Option<UserType> = parse_optional_field(params, "userType")?;
    let records = calc::filter_attendance(store.attendance(), date, user_type);
    Ok(json!({ "records": records }))
}

/// Records exactly what it is given; the user id is not checked.
fn attendance_mark(
    store: &mut Store,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let new: NewAttendance = parse_field(params, "record")?;
    let record = new.into_record();
    store.mark_attendance(record.clone());
    Ok(json!({ "record": record }))
}

/// Simulated QR check-in: the scanned token is matched against student QR
/// codes, then tutor QR codes.
fn attendance_scan(
    store: &mut Store,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let qr_code = get_required_str(params, "qrCode")?;
    let class = get_optional_str(params, "class")
        .or_else(|| store.classes().first().map(|c| c.name.clone()))
        .unwrap_or_else(|| FALLBACK_LABEL.to_string());

    let (user_id, user_type, user_name, subject) = match store.find_by_qr(&qr_code) {
        Some(QrMatch::Student(s)) => (
            s.id.clone(),
            UserType::Student,
            s.name.clone(),
            Some(s.subject.clone()),
        ),
        Some(QrMatch::Tutor(t)) => (
            t.id.clone(),
            UserType::Tutor,
            t.name.clone(),
            t.subjects.first().cloned(),
        ),
        None => {
            tracing::info!(qr_code = %qr_code, "scan did not match anyone");
            return Err(HandlerErr {
                code: "qr_not_found",
                message: "QR code not found".to_string(),
                details: Some(json!({ "qrCode": qr_code })),
            });
        }
    };

    let record = AttendanceRecord {
        id: new_record_id(),
        user_id,
        user_type,
        date: today(),
        time: now_time(),
        class,
        subject: subject
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| FALLBACK_LABEL.to_string()),
    };
    store.mark_attendance(record.clone());
    Ok(json!({ "record": record, "userName": user_name }))
}

fn attendance_set_all(
    store: &mut Store,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let records: Vec<AttendanceRecord> = parse_field(params, "records")?;
    let count = records.len();
    store.set_attendance(records);
    Ok(json!({ "count": count }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "attendance.list" => Some(with_store(state, req, attendance_list)),
        "attendance.mark" => Some(with_store(state, req, attendance_mark)),
        "attendance.scan" => Some(with_store(state, req, attendance_scan)),
        "attendance.setAll" => Some(with_store(state, req, attendance_set_all)),
        _ => None,
    }
}
