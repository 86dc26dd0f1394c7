use std::time::Duration;

use mongodb::options::ClientOptions;

use super::error::{MongoDaoError, MongoResult};

const APP_NAME: &str = "catalogo-jogos";
const DEFAULT_DB: &str = "catalogo_jogos";
/// Bounds each operation while the server is unreachable instead of the driver's 30s.
const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Parsed connection settings for [`MongoGameStore`](super::MongoGameStore).
#[derive(Clone)]
pub struct MongoConfig {
    pub options: ClientOptions,
    pub database_name: String,
}

impl MongoConfig {
    /// Parse `uri` and tag the client with the application name.
    pub async fn from_uri(uri: &str, db_name: Option<&str>) -> MongoResult<Self> {
        let mut options =
            ClientOptions::parse(uri)
                .await
                .map_err(|source| MongoDaoError::InvalidUri {
                    uri: uri.to_owned(),
                    source,
                })?;
        options.app_name.get_or_insert_with(|| APP_NAME.to_owned());
        options
            .server_selection_timeout
            .get_or_insert(SERVER_SELECTION_TIMEOUT);

        let database_name = db_name
            .filter(|name| !name.is_empty())
            .or(options.default_database.as_deref())
            .unwrap_or(DEFAULT_DB)
            .to_owned();

        Ok(Self {
            options,
            database_name,
        })
    }
}
