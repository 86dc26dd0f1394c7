use std::sync::Arc;

use futures::future::BoxFuture;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::dao::{game_store::GameStore, models::GameEntity, storage::StorageResult};

/// Process-local store keeping games in insertion order.
#[derive(Clone, Default)]
pub struct MemoryGameStore {
    games: Arc<RwLock<IndexMap<Uuid, GameEntity>>>,
}

impl MemoryGameStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl GameStore for MemoryGameStore {
    fn list_games(
        &self,
        offset: usize,
        limit: usize,
    ) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
        let games = self.games.clone();
        Box::pin(async move {
            let guard = games.read().await;
            Ok(guard
                .values()
                .skip(offset)
                .take(limit)
                .cloned()
                .collect())
        })
    }

    fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
        let games = self.games.clone();
        Box::pin(async move { Ok(games.read().await.get(&id).cloned()) })
    }

    fn insert_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<bool>> {
        let games = self.games.clone();
        Box::pin(async move {
            let mut guard = games.write().await;
            let duplicate = guard
                .values()
                .any(|stored| stored.name == game.name && stored.producer == game.producer);
            if duplicate {
                return Ok(false);
            }
            guard.insert(game.id, game);
            Ok(true)
        })
    }

    fn update_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<bool>> {
        let games = self.games.clone();
        Box::pin(async move {
            let mut guard = games.write().await;
            match guard.get_mut(&game.id) {
                Some(slot) => {
                    *slot = game;
                    Ok(true)
                }
                None => Ok(false),
            }
        })
    }

    fn delete_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let games = self.games.clone();
        // shift_remove keeps the remaining pages stable.
        Box::pin(async move { Ok(games.write().await.shift_remove(&id).is_some()) })
    }

    fn backend(&self) -> &'static str {
        "memory"
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(name: &str, producer: &str, price: f64) -> GameEntity {
        GameEntity {
            id: Uuid::new_v4(),
            name: name.into(),
            producer: producer.into(),
            price,
        }
    }

    #[tokio::test]
    async fn lists_in_insertion_order_with_offset() {
        let store = MemoryGameStore::new();
        let names = ["Portal", "Hades", "Celeste", "Tunic"];
        for name in names {
            store.insert_game(game(name, "Studio", 10.0)).await.unwrap();
        }

        let page = store.list_games(1, 2).await.unwrap();
        let listed: Vec<_> = page.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(listed, vec!["Hades", "Celeste"]);

        assert!(store.list_games(4, 2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_keeps_order_of_remaining_games() {
        let store = MemoryGameStore::new();
        let first = game("Portal", "Valve", 20.0);
        let second = game("Hades", "Supergiant", 25.0);
        let third = game("Celeste", "Maddy Makes Games", 15.0);
        for g in [&first, &second, &third] {
            store.insert_game(g.clone()).await.unwrap();
        }

        assert!(store.delete_game(second.id).await.unwrap());
        assert!(!store.delete_game(second.id).await.unwrap());

        let remaining = store.list_games(0, 10).await.unwrap();
        assert_eq!(remaining, vec![first, third]);
    }

    #[tokio::test]
    async fn update_reports_missing_games() {
        let store = MemoryGameStore::new();
        let mut stored = game("Portal", "Valve", 20.0);
        store.insert_game(stored.clone()).await.unwrap();

        stored.price = 9.99;
        assert!(store.update_game(stored.clone()).await.unwrap());
        assert_eq!(store.find_game(stored.id).await.unwrap(), Some(stored));

        assert!(!store.update_game(game("Tunic", "Finji", 30.0)).await.unwrap());
    }

    #[tokio::test]
    async fn insert_refuses_exact_name_and_producer_duplicates() {
        let store = MemoryGameStore::new();
        let stored = game("Portal", "Valve", 20.0);
        assert!(store.insert_game(stored.clone()).await.unwrap());

        assert!(!store.insert_game(game("Portal", "Valve", 5.0)).await.unwrap());
        assert!(store.insert_game(game("Portal", "Nuclear Monkey", 5.0)).await.unwrap());
        assert!(store.insert_game(game("portal", "Valve", 5.0)).await.unwrap());

        let listed = store.list_games(0, 10).await.unwrap();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0], stored);
    }

    #[tokio::test]
    async fn concurrent_duplicate_inserts_store_one_game() {
        let store = MemoryGameStore::new();
        let attempts = (0..8).map(|_| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .insert_game(game("Hades", "Supergiant", 80.0))
                    .await
            })
        });

        let mut inserted = 0;
        for attempt in attempts.collect::<Vec<_>>() {
            if attempt.await.unwrap().unwrap() {
                inserted += 1;
            }
        }

        assert_eq!(inserted, 1);
        assert_eq!(store.list_games(0, 10).await.unwrap().len(), 1);
    }
}
