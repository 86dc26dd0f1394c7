use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the games catalog.
#[openapi(
    info(
        title = "Catalogo de Jogos",
        description = "Catalog of games with paginated listing and price updates"
    ),
    paths(
        crate::routes::health::healthcheck,
        crate::routes::game::list_games,
        crate::routes::game::get_game,
        crate::routes::game::create_game,
        crate::routes::game::update_game,
        crate::routes::game::update_game_price,
        crate::routes::game::delete_game,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::health::HealthStatus,
            crate::dto::game::GameInput,
            crate::dto::game::GameView,
            crate::fault_boundary::FaultBody,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "jogos", description = "Game catalog operations"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_catalog_route() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for path in [
            "/healthcheck",
            "/api/v1/jogos",
            "/api/v1/jogos/{id}",
            "/api/v1/jogos/{id}/preco/{preco}",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
    }
}
