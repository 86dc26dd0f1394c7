use futures::{TryStreamExt, future::BoxFuture};
use mongodb::{
    Collection, Database, IndexModel,
    bson::doc,
    error::{Error as MongoError, ErrorKind, WriteFailure},
    options::IndexOptions,
};
use tracing::info;
use uuid::Uuid;

use super::{
    BACKEND_NAME,
    config::MongoConfig,
    connection::establish_connection,
    error::{MongoDaoError, MongoResult},
    models::{MongoGameDocument, doc_id},
};
use crate::dao::{game_store::GameStore, models::GameEntity, storage::StorageResult};

const GAME_COLLECTION_NAME: &str = "games";
const DUPLICATE_KEY_CODE: i32 = 11000;

/// MongoDB-backed catalog store.
#[derive(Clone)]
pub struct MongoGameStore {
    database: Database,
    games: Collection<MongoGameDocument>,
}

impl MongoGameStore {
    /// Establish a connection to MongoDB and ensure indexes are present.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let database = establish_connection(&config).await?;
        let games = database.collection::<MongoGameDocument>(GAME_COLLECTION_NAME);

        let store = Self { database, games };
        store.ensure_indexes().await?;
        info!(database = %config.database_name, "connected to MongoDB");
        Ok(store)
    }

    async fn ensure_indexes(&self) -> MongoResult<()> {
        let index = IndexModel::builder()
            .keys(doc! {"name": 1, "producer": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("game_name_producer_unique".to_owned()))
                    .unique(Some(true))
                    .build(),
            )
            .build();

        self.games
            .create_index(index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: GAME_COLLECTION_NAME,
                index: "name,producer",
                source,
            })?;

        Ok(())
    }

    async fn ping(&self) -> MongoResult<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }

    async fn list(&self, offset: usize, limit: usize) -> MongoResult<Vec<GameEntity>> {
        let documents: Vec<MongoGameDocument> = self
            .games
            .find(doc! {})
            .sort(doc! {"created_at": 1, "_id": 1})
            .skip(offset as u64)
            .limit(limit as i64)
            .await
            .map_err(|source| MongoDaoError::ListGames { source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::ListGames { source })?;

        documents.into_iter().map(GameEntity::try_from).collect()
    }

    async fn find(&self, id: Uuid) -> MongoResult<Option<GameEntity>> {
        let document = self
            .games
            .find_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::LoadGame { id, source })?;

        document.map(GameEntity::try_from).transpose()
    }

    /// The unique `(name, producer)` index rejects duplicates server side.
    async fn insert(&self, game: GameEntity) -> MongoResult<bool> {
        let id = game.id;
        let document = MongoGameDocument::new(game);
        match self.games.insert_one(&document).await {
            Ok(_) => Ok(true),
            Err(source) if is_duplicate_key(&source) => Ok(false),
            Err(source) => Err(MongoDaoError::InsertGame { id, source }),
        }
    }

    async fn update(&self, game: GameEntity) -> MongoResult<bool> {
        let id = game.id;
        // $set keeps created_at, and with it the listing position.
        let update = doc! {
            "$set": {
                "name": game.name,
                "producer": game.producer,
                "price": game.price,
            }
        };
        let result = self
            .games
            .update_one(doc_id(id), update)
            .await
            .map_err(|source| MongoDaoError::UpdateGame { id, source })?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: Uuid) -> MongoResult<bool> {
        let result = self
            .games
            .delete_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::DeleteGame { id, source })?;
        Ok(result.deleted_count > 0)
    }
}

fn is_duplicate_key(err: &MongoError) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}

impl GameStore for MongoGameStore {
    fn list_games(
        &self,
        offset: usize,
        limit: usize,
    ) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list(offset, limit).await.map_err(Into::into) })
    }

    fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find(id).await.map_err(Into::into) })
    }

    fn insert_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.insert(game).await.map_err(Into::into) })
    }

    fn update_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.update(game).await.map_err(Into::into) })
    }

    fn delete_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.delete(id).await.map_err(Into::into) })
    }

    fn backend(&self) -> &'static str {
        BACKEND_NAME
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.ping().await.map_err(Into::into) })
    }
}
