//! Shared application state for all routes.

use crate::store::Datastore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Datastore>,
}

impl AppState {
    pub fn new(store: impl Datastore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
