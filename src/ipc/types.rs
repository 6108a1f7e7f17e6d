use serde::Deserialize;

use crate::store::Store;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Per-process state. `store` is `None` between `store.close` and the next
/// `store.open`; store methods invoked then fail with `no_store`.
pub struct AppState {
    pub store: Option<Store>,
}

impl AppState {
    pub fn new(store: Option<Store>) -> Self {
        Self { store }
    }
}
