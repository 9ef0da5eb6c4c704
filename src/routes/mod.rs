//! Router assembly.

mod common;
mod entity;

pub use common::{common_routes, common_routes_with_ready};
pub use entity::entity_routes;

use crate::state::AppState;
use axum::Router;
use sqlx::PgPool;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Request bodies are small flat records.
pub const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Full application: common routes at the root, entity routes under `/api`.
pub fn app(state: AppState, pool: PgPool) -> Router {
    Router::new()
        .merge(common_routes_with_ready(pool))
        .nest("/api", entity_routes(state))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
}
