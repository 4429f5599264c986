pub mod config;
pub mod controllers;
pub mod database;
pub mod models;
pub mod store;

use std::sync::Arc;

use crate::store::EventStore;

// Shared state for the whole application. The store handle is built once at
// startup and injected into every handler through axum's State extractor.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EventStore>,
    pub config: config::Config,
}

impl AppState {
    pub fn new(store: Arc<dyn EventStore>, config: config::Config) -> Arc<Self> {
        Arc::new(Self { store, config })
    }
}
