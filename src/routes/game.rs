use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
};
use uuid::Uuid;

use crate::{
    dto::{
        game::{GameInput, GameView, PageQuery},
        validation::validate_price,
    },
    error::{AppError, CREATE_TRANSLATION, MUTATE_TRANSLATION, NO_TRANSLATION},
    routes::extract::{RouteParams, ValidJson, ValidQuery},
    state::SharedState,
};

/// Catalog routes, versioned under `/api/v1/jogos`.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/v1/jogos", get(list_games).post(create_game))
        .route(
            "/api/v1/jogos/{id}",
            get(get_game).put(update_game).delete(delete_game),
        )
        .route("/api/v1/jogos/{id}/preco/{preco}", patch(update_game_price))
}

/// List the catalog page by page.
///
/// Listing the whole catalog at once is not supported.
#[utoipa::path(
    get,
    path = "/api/v1/jogos",
    tag = "jogos",
    params(PageQuery),
    responses(
        (status = 200, description = "Games of the requested page", body = [GameView]),
        (status = 204, description = "The requested page holds no games"),
        (status = 400, description = "Paging parameters out of range")
    )
)]
pub async fn list_games(
    State(state): State<SharedState>,
    ValidQuery(query): ValidQuery<PageQuery>,
) -> Result<Response, AppError> {
    let games = state
        .catalog()
        .list(query.pagina, query.quantidade)
        .await
        .map_err(|err| AppError::translate(err, NO_TRANSLATION))?;

    if games.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    Ok(Json(games).into_response())
}

/// Fetch a single game.
#[utoipa::path(
    get,
    path = "/api/v1/jogos/{id}",
    tag = "jogos",
    params(("id" = Uuid, Path, description = "Identifier of the game")),
    responses(
        (status = 200, description = "The game", body = GameView),
        (status = 204, description = "No game carries this identifier")
    )
)]
pub async fn get_game(
    State(state): State<SharedState>,
    RouteParams(id): RouteParams<Uuid>,
) -> Result<Response, AppError> {
    let game = state
        .catalog()
        .get(id)
        .await
        .map_err(|err| AppError::translate(err, NO_TRANSLATION))?;

    // A missing game answers 204 like an empty page.
    Ok(match game {
        Some(game) => Json(game).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

/// Register a new game.
#[utoipa::path(
    post,
    path = "/api/v1/jogos",
    tag = "jogos",
    request_body = GameInput,
    responses(
        (status = 200, description = "Game registered", body = GameView),
        (status = 400, description = "Invalid payload"),
        (status = 422, description = "Game already registered", body = String, content_type = "text/plain")
    )
)]
pub async fn create_game(
    State(state): State<SharedState>,
    ValidJson(payload): ValidJson<GameInput>,
) -> Result<Json<GameView>, AppError> {
    let game = state
        .catalog()
        .insert(payload)
        .await
        .map_err(|err| AppError::translate(err, CREATE_TRANSLATION))?;
    Ok(Json(game))
}

/// Replace every field of a game.
#[utoipa::path(
    put,
    path = "/api/v1/jogos/{id}",
    tag = "jogos",
    params(("id" = Uuid, Path, description = "Identifier of the game")),
    request_body = GameInput,
    responses(
        (status = 200, description = "Game updated"),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Game not registered", body = String, content_type = "text/plain")
    )
)]
pub async fn update_game(
    State(state): State<SharedState>,
    RouteParams(id): RouteParams<Uuid>,
    ValidJson(payload): ValidJson<GameInput>,
) -> Result<StatusCode, AppError> {
    state
        .catalog()
        .update(id, payload)
        .await
        .map_err(|err| AppError::translate(err, MUTATE_TRANSLATION))?;
    Ok(StatusCode::OK)
}

/// Change the price of a game.
#[utoipa::path(
    patch,
    path = "/api/v1/jogos/{id}/preco/{preco}",
    tag = "jogos",
    params(
        ("id" = Uuid, Path, description = "Identifier of the game"),
        ("preco" = f64, Path, description = "New price")
    ),
    responses(
        (status = 200, description = "Price updated"),
        (status = 400, description = "Price is negative or not a number"),
        (status = 404, description = "Game not registered", body = String, content_type = "text/plain")
    )
)]
pub async fn update_game_price(
    State(state): State<SharedState>,
    RouteParams((id, preco)): RouteParams<(Uuid, f64)>,
) -> Result<StatusCode, AppError> {
    validate_price(preco).map_err(|err| AppError::BadRequest(err.to_string()))?;

    state
        .catalog()
        .update_price(id, preco)
        .await
        .map_err(|err| AppError::translate(err, MUTATE_TRANSLATION))?;
    Ok(StatusCode::OK)
}

/// Delete a game.
#[utoipa::path(
    delete,
    path = "/api/v1/jogos/{id}",
    tag = "jogos",
    params(("id" = Uuid, Path, description = "Identifier of the game")),
    responses(
        (status = 200, description = "Game deleted"),
        (status = 404, description = "Game not registered", body = String, content_type = "text/plain")
    )
)]
pub async fn delete_game(
    State(state): State<SharedState>,
    RouteParams(id): RouteParams<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .catalog()
        .remove(id)
        .await
        .map_err(|err| AppError::translate(err, MUTATE_TRANSLATION))?;
    Ok(StatusCode::OK)
}
