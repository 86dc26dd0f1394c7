mod config;
mod connection;
mod error;
mod models;
pub mod store;

pub use config::MongoConfig;
pub use error::MongoDaoError;
pub use store::MongoGameStore;

use crate::dao::storage::StorageError;

/// Backend label used in logs and health reports.
pub const BACKEND_NAME: &str = "mongodb";

impl From<MongoDaoError> for StorageError {
    fn from(err: MongoDaoError) -> Self {
        match err {
            MongoDaoError::MalformedId { .. } => StorageError::Malformed(err.to_string()),
            other => StorageError::unavailable(BACKEND_NAME, other),
        }
    }
}
