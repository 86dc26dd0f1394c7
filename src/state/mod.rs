use std::sync::Arc;

use crate::{
    dao::game_store::GameStore,
    services::game_service::{CatalogService, GameCatalog},
};

pub type SharedState = Arc<AppState>;

/// Handles shared by every request; holds no per-request data.
pub struct AppState {
    catalog: Arc<dyn GameCatalog>,
    store: Arc<dyn GameStore>,
}

impl AppState {
    /// Construct the state with the default [`CatalogService`] over `store`.
    pub fn new(store: Arc<dyn GameStore>) -> SharedState {
        let catalog = Arc::new(CatalogService::new(store.clone()));
        Self::with_catalog(catalog, store)
    }

    /// Construct the state around an arbitrary catalog implementation.
    pub fn with_catalog(catalog: Arc<dyn GameCatalog>, store: Arc<dyn GameStore>) -> SharedState {
        Arc::new(Self { catalog, store })
    }

    /// Catalog service answering the game routes.
    pub fn catalog(&self) -> &dyn GameCatalog {
        self.catalog.as_ref()
    }

    /// Storage backend, used by the health check.
    pub fn store(&self) -> &dyn GameStore {
        self.store.as_ref()
    }
}
