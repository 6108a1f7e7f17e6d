use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use crate::calc;
use crate::ipc::error::HandlerErr;
use crate::ipc::helpers::{
    get_optional_str, get_required_str, next_display_code, parse_field, today, with_store,
};
use crate::ipc::types::{AppState, Request};
use crate::store::{new_record_id, Status, Store, Student, StudentPatch};

/// Student as submitted by the add form. Anything left out is filled in the
/// way the dashboard does it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewStudent {
    id: Option<String>,
    name: String,
    student_id: Option<String>,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    parent_name: String,
    #[serde(default)]
    parent_phone: String,
    #[serde(default)]
    grade: String,
    #[serde(default)]
    subject: String,
    enrollment_date: Option<NaiveDate>,
    status: Option<Status>,
    qr_code: Option<String>,
}

impl NewStudent {
    fn into_student(self, existing: usize, today: NaiveDate) -> Student {
        let student_id = self
            .student_id
            .unwrap_or_else(|| next_display_code("STU", today.year(), existing));
        let qr_code = self.qr_code.unwrap_or_else(|| format!("{}-QR", student_id));
        Student {
            id: self.id.unwrap_or_else(new_record_id),
            name: self.name.trim().to_string(),
            student_id,
            email: self.email,
            phone: self.phone,
            parent_name: self.parent_name,
            parent_phone: self.parent_phone,
            grade: self.grade,
            subject: self.subject,
            enrollment_date: self.enrollment_date.unwrap_or(today),
            status: self.status.unwrap_or(Status::Active),
            qr_code,
        }
    }
}

fn students_list(store: &mut Store, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let students: Vec<&Student> = match get_optional_str(params, "search") {
        Some(term) => store
            .students()
            .iter()
            .filter(|s| calc::student_matches(s, &term))
            .collect(),
        None => store.students().iter().collect(),
    };
    Ok(json!({ "students": students }))
}

fn students_get(store: &mut Store, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let id = get_required_str(params, "id")?;
    Ok(json!({ "student": store.find_student(&id) }))
}

fn students_create(
    store: &mut Store,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let new: NewStudent = parse_field(params, "student")?;
    if new.name.trim().is_empty() {
        return Err(HandlerErr::bad_params("name must not be empty"));
    }
    let student = new.into_student(store.students().len(), today());
    tracing::debug!(student_id = %student.id, code = %student.student_id, "adding student");
    store.add_student(student.clone());
    Ok(json!({ "student": student }))
}

fn students_update(
    store: &mut Store,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let id = get_required_str(params, "id")?;
    let patch: StudentPatch = parse_field(params, "patch")?;
    let updated = store.update_student(&id, patch);
    Ok(json!({ "updated": updated, "student": store.find_student(&id) }))
}

fn students_delete(
    store: &mut Store,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let id = get_required_str(params, "id")?;
    Ok(json!({ "deleted": store.delete_student(&id) }))
}

fn students_set_all(
    store: &mut Store,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let students: Vec<Student> = parse_field(params, "students")?;
    let count = students.len();
    store.set_students(students);
    Ok(json!({ "count": count }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(with_store(state, req, students_list)),
        "students.get" => Some(with_store(state, req, students_get)),
        "students.create" => Some(with_store(state, req, students_create)),
        "students.update" => Some(with_store(state, req, students_update)),
        "students.delete" => Some(with_store(state, req, students_delete)),
        "students.setAll" => Some(with_store(state, req, students_set_all)),
        _ => None,
    }
}
