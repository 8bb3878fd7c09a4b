//! Shared application state handed to every route.

use crate::store::{NewsStore, SharedStore};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    /// JSON document served verbatim at `GET /api`.
    pub endpoints_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(store: impl NewsStore, endpoints_path: impl Into<PathBuf>) -> Self {
        AppState {
            store: Arc::new(store),
            endpoints_path: Arc::new(endpoints_path.into()),
        }
    }

    pub fn store(&self) -> &dyn NewsStore {
        self.store.as_ref()
    }
}
