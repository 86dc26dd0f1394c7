use axum::{Router, middleware};

use crate::{fault_boundary::fault_boundary, state::SharedState};

pub mod docs;
pub mod extract;
pub mod game;
pub mod health;

/// Compose all route trees behind the fault boundary, wiring in shared state.
pub fn router(state: SharedState) -> Router<()> {
    health::router()
        .merge(game::router())
        .merge(docs::router())
        .with_state(state)
        .layer(middleware::from_fn(fault_boundary))
}
