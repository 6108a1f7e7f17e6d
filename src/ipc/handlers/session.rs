use crate::ipc::error::HandlerErr;
use crate::ipc::helpers::{parse_field, with_store};
use crate::ipc::types::{AppState, Request};
use crate::store::{Store, User};
use serde_json::json;

fn session_get(store: &mut Store, _params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    Ok(json!({ "user": store.current_user() }))
}

/// `user: null` signs out.
fn session_set_user(
    store: &mut Store,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let user: Option<User> = parse_field(params, "user")?;
    store.set_current_user(user);
    Ok(json!({ "user": store.current_user() }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "session.get" => Some(with_store(state, req, session_get)),
        "session.setUser" => Some(with_store(state, req, session_set_user)),
        _ => None,
    }
}
