use serde::Serialize;
use utoipa::ToSchema;

/// Overall state reported by the `/healthcheck` route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Storage answered its health check.
    Ok,
    /// The storage backend failed its health check.
    Degraded,
}

/// Health payload naming the storage backend in use.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Overall state.
    pub status: HealthStatus,
    /// Storage backend label, e.g. `memory` or `mongodb`.
    pub storage: String,
}

impl HealthResponse {
    /// Report for the given storage backend label.
    pub fn new(status: HealthStatus, storage: &str) -> Self {
        Self {
            status,
            storage: storage.to_owned(),
        }
    }

    /// Whether the service can answer catalog requests.
    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Ok
    }
}
