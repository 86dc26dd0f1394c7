use tracing::warn;

use crate::{
    dto::health::{HealthResponse, HealthStatus},
    state::SharedState,
};

/// Ping the storage backend and summarise the outcome.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let store = state.store();
    let status = match store.health_check().await {
        Ok(()) => HealthStatus::Ok,
        Err(err) => {
            warn!(backend = store.backend(), error = %err, "storage health check failed");
            HealthStatus::Degraded
        }
    };

    HealthResponse::new(status, store.backend())
}
