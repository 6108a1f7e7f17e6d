use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use crate::calc;
use crate::ipc::error::HandlerErr;
use crate::ipc::helpers::{
    get_optional_str, get_required_str, next_display_code, parse_field, today, with_store,
};
use crate::ipc::types::{AppState, Request};
use crate::store::{new_record_id, ListInput, Status, Store, Tutor, TutorPatch};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewTutor {
    id: Option<String>,
    name: String,
    tutor_id: Option<String>,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    subjects: Option<ListInput>,
    joined_date: Option<NaiveDate>,
    status: Option<Status>,
    qr_code: Option<String>,
    classes: Option<ListInput>,
}

impl NewTutor {
    fn into_tutor(self, existing: usize, today: NaiveDate) -> Tutor {
        let tutor_id = self
            .tutor_id
            .unwrap_or_else(|| next_display_code("TUT", today.year(), existing));
        let qr_code = self.qr_code.unwrap_or_else(|| format!("{}-QR", tutor_id));
        Tutor {
            id: self.id.unwrap_or_else(new_record_id),
            name: self.name.trim().to_string(),
            tutor_id,
            email: self.email,
            phone: self.phone,
            subjects: self.subjects.map(ListInput::into_vec).unwrap_or_default(),
            joined_date: self.joined_date.unwrap_or(today),
            status: self.status.unwrap_or(Status::Active),
            qr_code,
            classes: self.classes.map(ListInput::into_vec).unwrap_or_default(),
        }
    }
}

fn tutors_list(store: &mut Store, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let tutors: Vec<&Tutor> = match get_optional_str(params, "search") {
        Some(term) => store
            .tutors()
            .iter()
            .filter(|t| calc::tutor_matches(t, &term))
            .collect(),
        None => store.tutors().iter().collect(),
    };
    Ok(json!({ "tutors": tutors }))
}

fn tutors_get(store: &mut Store, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let id = get_required_str(params, "id")?;
    Ok(json!({ "tutor": store.find_tutor(&id) }))
}

fn tutors_create(store: &mut Store, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let new: NewTutor = parse_field(params, "tutor")?;
    if new.name.trim().is_empty() {
        return Err(HandlerErr::bad_params("name must not be empty"));
    }
    let tutor = new.into_tutor(store.tutors().len(), today());
    tracing::debug!(tutor_id = %tutor.id, code = %tutor.tutor_id, "adding tutor");
    store.add_tutor(tutor.clone());
    Ok(json!({ "tutor": tutor }))
}

fn tutors_update(store: &mut Store, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let id = get_required_str(params, "id")?;
    let patch: TutorPatch = parse_field(params, "patch")?;
    let updated = store.update_tutor(&id, patch);
    Ok(json!({ "updated": updated, "tutor": store.find_tutor(&id) }))
}

fn tutors_delete(store: &mut Store, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let id = get_required_str(params, "id")?;
    Ok(json!({ "deleted": store.delete_tutor(&id) }))
}

fn tutors_set_all(store: &mut Store, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let tutors: Vec<Tutor> = parse_field(params, "tutors")?;
    let count = tutors.len();
    store.set_tutors(tutors);
    Ok(json!({ "count": count }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "tutors.list" => Some(with_store(state, req, tutors_list)),
        "tutors.get" => Some(with_store(state, req, tutors_get)),
        "tutors.create" => Some(with_store(state, req, tutors_create)),
        "tutors.update" => Some(with_store(state, req, tutors_update)),
        "tutors.delete" => Some(with_store(state, req, tutors_delete)),
        "tutors.setAll" => Some(with_store(state, req, tutors_set_all)),
        _ => None,
    }
}
