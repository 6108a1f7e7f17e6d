use serde::Deserialize;
use serde_json::json;

use crate::ipc::error::HandlerErr;
use crate::ipc::helpers::{get_required_str, parse_field, with_store};
use crate::ipc::types::{AppState, Request};
use crate::store::{new_record_id, Class, ClassPatch, ScheduleSlot, Store};

const DEFAULT_SLOT_TIME: &str = "4:00 PM - 5:30 PM";

fn default_schedule() -> Vec<ScheduleSlot> {
    vec![
        ScheduleSlot::new("Monday", DEFAULT_SLOT_TIME),
        ScheduleSlot::new("Wednesday", DEFAULT_SLOT_TIME),
    ]
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewClass {
    id: Option<String>,
    name: String,
    #[serde(default)]
    grade: String,
    #[serde(default)]
    subject: String,
    schedule: Option<Vec<ScheduleSlot>>,
    #[serde(default)]
    students: Vec<String>,
    #[serde(default)]
    tutors: Vec<String>,
}

fn classes_list(store: &mut Store, _params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    // Counts are taken from the class's own rosters, dangling ids included.
    let classes: Vec<serde_json::Value> = store
        .classes()
        .iter()
        .map(|c| {
            json!({
                "class": c,
                "studentCount": c.students.len(),
                "tutorCount": c.tutors.len()
            })
        })
        .collect();
    Ok(json!({ "classes": classes }))
}

fn classes_create(store: &mut Store, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let new: NewClass = parse_field(params, "class")?;
    let name = new.name.trim().to_string();
    if name.is_empty() {
        return Err(HandlerErr::bad_params("name must not be empty"));
    }
    let class = Class {
        id: new.id.unwrap_or_else(new_record_id),
        name,
        grade: new.grade,
        subject: new.subject,
        schedule: new.schedule.unwrap_or_else(default_schedule),
        students: new.students,
        tutors: new.tutors,
    };
    store.add_class(class.clone());
    Ok(json!({ "class": class }))
}

fn classes_update(store: &mut Store, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let id = get_required_str(params, "id")?;
    let patch: ClassPatch = parse_field(params, "patch")?;
    let updated = store.update_class(&id, patch);
    Ok(json!({ "updated": updated, "class": store.find_class(&id) }))
}

fn classes_delete(store: &mut Store, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let id = get_required_str(params, "id")?;
    Ok(json!({ "deleted": store.delete_class(&id) }))
}

fn classes_set_all(store: &mut Store, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let classes: Vec<Class> = parse_field(params, "classes")?;
    let count = classes.len();
    store.set_classes(classes);
    Ok(json!({ "count": count }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "classes.list" => Some(with_store(state, req, classes_list)),
        "classes.create" => Some(with_store(state, req, classes_create)),
        "classes.update" => Some(with_store(state, req, classes_update)),
        "classes.delete" => Some(with_store(state, req, classes_delete)),
        "classes.setAll" => Some(with_store(state, req, classes_set_all)),
        _ => None,
    }
}
