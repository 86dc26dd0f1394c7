use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::dao::models::GameEntity;

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_PAGE_SIZE: u32 = 5;

/// Payload used to register or replace a game.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GameInput {
    /// Title of the game.
    #[validate(length(
        min = 3,
        max = 100,
        message = "The game name must have between 3 and 100 characters"
    ))]
    pub nome: String,
    /// Studio or publisher that produced the game.
    #[validate(length(
        min = 1,
        max = 100,
        message = "The producer name must have between 1 and 100 characters"
    ))]
    pub produtora: String,
    /// Selling price.
    #[validate(range(
        min = 1.0,
        max = 1000.0,
        message = "The price must be at least 1 and at most 1000"
    ))]
    pub preco: f64,
}

/// Catalog entry returned to clients.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    /// Identifier assigned at registration.
    pub id: Uuid,
    /// Title of the game.
    pub nome: String,
    /// Studio or publisher that produced the game.
    pub produtora: String,
    /// Selling price.
    pub preco: f64,
}

impl From<GameEntity> for GameView {
    fn from(entity: GameEntity) -> Self {
        Self {
            id: entity.id,
            nome: entity.name,
            produtora: entity.producer,
            preco: entity.price,
        }
    }
}

/// Paging parameters accepted by the listing route.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Page to fetch, starting at 1.
    #[serde(default = "default_page")]
    #[param(minimum = 1, default = 1)]
    #[validate(range(min = 1))]
    pub pagina: u32,
    /// Games per page.
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 50, default = 5)]
    #[validate(range(min = 1, max = 50))]
    pub quantidade: u32,
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}
