use crate::config::Config;
use crate::db::{Collection, DocumentStore, Model};
use axum::extract::FromRef;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub config: Config,
}

impl AppState {
    pub fn new(store: impl DocumentStore + 'static, config: Config) -> Self {
        Self {
            store: Arc::new(store),
            config,
        }
    }
}

impl<T: Model> FromRef<AppState> for Collection<T> {
    fn from_ref(state: &AppState) -> Self {
        Collection::new(state.store.clone())
    }
}
