use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Game catalog entry as persisted by the storage backends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameEntity {
    /// Identifier assigned by the catalog service on insertion.
    pub id: Uuid,
    /// Title of the game.
    pub name: String,
    /// Studio or publisher that produced the game.
    pub producer: String,
    /// Current selling price.
    pub price: f64,
}
