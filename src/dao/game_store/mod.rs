pub mod memory;
#[cfg(feature = "mongo-store")]
pub mod mongodb;

use crate::dao::models::GameEntity;
use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;
use uuid::Uuid;

/// Abstraction over the persistence layer for catalog entries.
pub trait GameStore: Send + Sync {
    /// Return at most `limit` games, skipping the first `offset`, in insertion order.
    fn list_games(
        &self,
        offset: usize,
        limit: usize,
    ) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>>;
    fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>>;
    /// Store a new game unless one with the same name and producer exists.
    ///
    /// The check and the write are a single step; returns `false` on a duplicate.
    fn insert_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<bool>>;
    /// Replace a stored game. Returns `false` when no game carries `game.id`.
    fn update_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<bool>>;
    /// Remove a stored game. Returns `false` when nothing was deleted.
    fn delete_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>>;
    /// Short backend label reported by the health check.
    fn backend(&self) -> &'static str;
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}
