/// OpenAPI documentation generation.
pub mod documentation;
/// Catalog business rules over the game store.
pub mod game_service;
/// Health check service.
pub mod health_service;
