use crate::ipc::error::ok;
use crate::ipc::helpers::{to_json, with_store};
use crate::ipc::types::{AppState, Request};
use crate::store::Store;
use serde_json::json;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "storeOpen": state.store.is_some()
        }),
    )
}

fn handle_store_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    let seed = req
        .params
        .get("seed")
        .and_then(|v| v.as_bool())
        .unwrap_or(true);
    if state.store.is_some() {
        tracing::info!("replacing open store");
    }
    state.store = Some(if seed { Store::seeded() } else { Store::empty() });
    tracing::info!(seed, "store opened");
    ok(&req.id, json!({ "seeded": seed }))
}

fn handle_store_close(state: &mut AppState, req: &Request) -> serde_json::Value {
    let was_open = state.store.take().is_some();
    tracing::info!(was_open, "store closed");
    ok(&req.id, json!({ "wasOpen": was_open }))
}

fn handle_store_snapshot(state: &mut AppState, req: &Request) -> serde_json::Value {
    with_store(state, req, |store, _| to_json(&*store))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "store.open" => Some(handle_store_open(state, req)),
        "store.close" => Some(handle_store_close(state, req)),
        "store.snapshot" => Some(handle_store_snapshot(state, req)),
        _ => None,
    }
}
