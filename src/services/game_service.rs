use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    dao::{game_store::GameStore, models::GameEntity},
    dto::game::{GameInput, GameView},
    error::ServiceError,
};

const ALREADY_REGISTERED: &str = "This game is already registered";
const NOT_REGISTERED: &str = "This game is not registered";

/// Catalog operations consumed by the HTTP layer.
pub trait GameCatalog: Send + Sync {
    /// Games of the requested page, in catalog order.
    fn list(
        &self,
        page: u32,
        page_size: u32,
    ) -> BoxFuture<'static, Result<Vec<GameView>, ServiceError>>;
    /// The game carrying `id`, if any.
    fn get(&self, id: Uuid) -> BoxFuture<'static, Result<Option<GameView>, ServiceError>>;
    /// Register a game. Fails with [`ServiceError::AlreadyRegistered`] on duplicates.
    fn insert(&self, input: GameInput) -> BoxFuture<'static, Result<GameView, ServiceError>>;
    /// Replace a game. Fails with [`ServiceError::NotRegistered`] for unknown ids.
    fn update(&self, id: Uuid, input: GameInput) -> BoxFuture<'static, Result<(), ServiceError>>;
    /// Change the price of a game. Fails with [`ServiceError::NotRegistered`] for unknown ids.
    fn update_price(&self, id: Uuid, price: f64) -> BoxFuture<'static, Result<(), ServiceError>>;
    /// Delete a game. Fails with [`ServiceError::NotRegistered`] for unknown ids.
    fn remove(&self, id: Uuid) -> BoxFuture<'static, Result<(), ServiceError>>;
}

/// [`GameCatalog`] implementation enforcing the catalog rules on top of a [`GameStore`].
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn GameStore>,
}

impl CatalogService {
    /// Build a catalog over the given store.
    pub fn new(store: Arc<dyn GameStore>) -> Self {
        Self { store }
    }

    async fn list_games(&self, page: u32, page_size: u32) -> Result<Vec<GameView>, ServiceError> {
        let limit = page_size as usize;
        let offset = (page.saturating_sub(1) as usize).saturating_mul(limit);
        debug!(page, page_size, offset, "listing games");

        let games = self.store.list_games(offset, limit).await?;
        Ok(games.into_iter().map(Into::into).collect())
    }

    async fn get_game(&self, id: Uuid) -> Result<Option<GameView>, ServiceError> {
        Ok(self.store.find_game(id).await?.map(Into::into))
    }

    async fn insert_game(&self, input: GameInput) -> Result<GameView, ServiceError> {
        let GameInput {
            nome,
            produtora,
            preco,
        } = input;

        let game = GameEntity {
            id: Uuid::new_v4(),
            name: nome,
            producer: produtora,
            price: preco,
        };
        if !self.store.insert_game(game.clone()).await? {
            debug!(name = %game.name, producer = %game.producer, "duplicate game refused");
            return Err(ServiceError::AlreadyRegistered(ALREADY_REGISTERED.into()));
        }
        info!(id = %game.id, name = %game.name, "game registered");

        Ok(game.into())
    }

    async fn update_game(&self, id: Uuid, input: GameInput) -> Result<(), ServiceError> {
        self.require_game(id).await?;

        let game = GameEntity {
            id,
            name: input.nome,
            producer: input.produtora,
            price: input.preco,
        };
        self.save_existing(game).await?;
        info!(%id, "game updated");
        Ok(())
    }

    async fn update_game_price(&self, id: Uuid, price: f64) -> Result<(), ServiceError> {
        let mut game = self.require_game(id).await?;
        game.price = price;
        self.save_existing(game).await?;
        info!(%id, price, "game price updated");
        Ok(())
    }

    async fn remove_game(&self, id: Uuid) -> Result<(), ServiceError> {
        self.require_game(id).await?;
        if !self.store.delete_game(id).await? {
            return Err(not_registered());
        }
        info!(%id, "game removed");
        Ok(())
    }

    async fn require_game(&self, id: Uuid) -> Result<GameEntity, ServiceError> {
        self.store.find_game(id).await?.ok_or_else(not_registered)
    }

    /// The game may vanish between the lookup and the write.
    async fn save_existing(&self, game: GameEntity) -> Result<(), ServiceError> {
        if self.store.update_game(game).await? {
            Ok(())
        } else {
            Err(not_registered())
        }
    }
}

fn not_registered() -> ServiceError {
    ServiceError::NotRegistered(NOT_REGISTERED.into())
}

impl GameCatalog for CatalogService {
    fn list(
        &self,
        page: u32,
        page_size: u32,
    ) -> BoxFuture<'static, Result<Vec<GameView>, ServiceError>> {
        let service = self.clone();
        Box::pin(async move { service.list_games(page, page_size).await })
    }

    fn get(&self, id: Uuid) -> BoxFuture<'static, Result<Option<GameView>, ServiceError>> {
        let service = self.clone();
        Box::pin(async move { service.get_game(id).await })
    }

    fn insert(&self, input: GameInput) -> BoxFuture<'static, Result<GameView, ServiceError>> {
        let service = self.clone();
        Box::pin(async move { service.insert_game(input).await })
    }

    fn update(&self, id: Uuid, input: GameInput) -> BoxFuture<'static, Result<(), ServiceError>> {
        let service = self.clone();
        Box::pin(async move { service.update_game(id, input).await })
    }

    fn update_price(&self, id: Uuid, price: f64) -> BoxFuture<'static, Result<(), ServiceError>> {
        let service = self.clone();
        Box::pin(async move { service.update_game_price(id, price).await })
    }

    fn remove(&self, id: Uuid) -> BoxFuture<'static, Result<(), ServiceError>> {
        let service = self.clone();
        Box::pin(async move { service.remove_game(id).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::{game_store::memory::MemoryGameStore, storage::StorageResult};

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(MemoryGameStore::new()))
    }

    fn input(nome: &str, produtora: &str, preco: f64) -> GameInput {
        GameInput {
            nome: nome.into(),
            produtora: produtora.into(),
            preco,
        }
    }

    #[tokio::test]
    async fn insert_assigns_an_id_and_round_trips() {
        let service = service();
        let created = service
            .insert(input("Hollow Knight", "Team Cherry", 49.9))
            .await
            .unwrap();

        assert_eq!(created.nome, "Hollow Knight");
        assert_eq!(created.produtora, "Team Cherry");
        assert_eq!(created.preco, 49.9);
        assert_eq!(service.get(created.id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn insert_rejects_duplicates() {
        let service = service();
        service
            .insert(input("Hades", "Supergiant", 80.0))
            .await
            .unwrap();

        let err = service
            .insert(input("Hades", "Supergiant", 60.0))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::AlreadyRegistered(ref message) if message == ALREADY_REGISTERED
        ));

        // Same name from another producer is a different game.
        assert!(service.insert(input("Hades", "Someone Else", 10.0)).await.is_ok());
    }

    /// Hands control back to the runtime before every store call.
    #[derive(Clone, Default)]
    struct YieldingStore {
        inner: MemoryGameStore,
    }

    impl GameStore for YieldingStore {
        fn list_games(
            &self,
            offset: usize,
            limit: usize,
        ) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
            let inner = self.inner.clone();
            Box::pin(async move {
                tokio::task::yield_now().await;
                inner.list_games(offset, limit).await
            })
        }

        fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
            let inner = self.inner.clone();
            Box::pin(async move {
                tokio::task::yield_now().await;
                inner.find_game(id).await
            })
        }

        fn insert_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<bool>> {
            let inner = self.inner.clone();
            Box::pin(async move {
                tokio::task::yield_now().await;
                inner.insert_game(game).await
            })
        }

        fn update_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<bool>> {
            self.inner.update_game(game)
        }

        fn delete_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
            self.inner.delete_game(id)
        }

        fn backend(&self) -> &'static str {
            self.inner.backend()
        }

        fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
            self.inner.health_check()
        }
    }

    #[tokio::test]
    async fn concurrent_duplicate_inserts_register_a_single_game() {
        let service = CatalogService::new(Arc::new(YieldingStore::default()));

        let (first, second) = tokio::join!(
            service.insert(input("Hades", "Supergiant", 80.0)),
            service.insert(input("Hades", "Supergiant", 80.0)),
        );

        let outcomes = [first, second];
        assert_eq!(outcomes.iter().filter(|outcome| outcome.is_ok()).count(), 1);
        assert!(outcomes.iter().any(|outcome| matches!(
            outcome,
            Err(ServiceError::AlreadyRegistered(message)) if message == ALREADY_REGISTERED
        )));
        assert_eq!(service.list(1, 50).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_pages_through_the_catalog() {
        let service = service();
        for index in 0..7 {
            service
                .insert(input(&format!("Game {index}"), "Studio", 10.0))
                .await
                .unwrap();
        }

        let first = service.list(1, 5).await.unwrap();
        assert_eq!(first.len(), 5);
        assert_eq!(first[0].nome, "Game 0");

        let second = service.list(2, 5).await.unwrap();
        let names: Vec<_> = second.iter().map(|game| game.nome.as_str()).collect();
        assert_eq!(names, vec!["Game 5", "Game 6"]);

        assert!(service.list(3, 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn mutations_on_unknown_games_fail_with_not_registered() {
        let service = service();
        let id = Uuid::new_v4();

        for result in [
            service.update(id, input("Tunic", "Finji", 30.0)).await,
            service.update_price(id, 29.99).await,
            service.remove(id).await,
        ] {
            assert!(matches!(
                result,
                Err(ServiceError::NotRegistered(ref message)) if message == NOT_REGISTERED
            ));
        }
    }

    #[tokio::test]
    async fn update_and_price_changes_keep_the_identifier() {
        let service = service();
        let created = service
            .insert(input("Celeste", "Maddy Makes Games", 40.0))
            .await
            .unwrap();

        service
            .update(created.id, input("Celeste DX", "Extremely OK Games", 45.0))
            .await
            .unwrap();
        service.update_price(created.id, 29.99).await.unwrap();

        let stored = service.get(created.id).await.unwrap().unwrap();
        assert_eq!(
            stored,
            GameView {
                id: created.id,
                nome: "Celeste DX".into(),
                produtora: "Extremely OK Games".into(),
                preco: 29.99,
            }
        );
    }

    #[tokio::test]
    async fn remove_deletes_the_game() {
        let service = service();
        let created = service
            .insert(input("Portal", "Valve", 20.0))
            .await
            .unwrap();

        service.remove(created.id).await.unwrap();
        assert_eq!(service.get(created.id).await.unwrap(), None);
        assert!(service.remove(created.id).await.is_err());
    }
}
