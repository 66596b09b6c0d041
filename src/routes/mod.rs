//! Router assembly: common and todo routes behind request tracing and a body size limit.

mod common;
mod todo;

pub use common::{common_routes, LIVENESS_MESSAGE};
pub use todo::todo_routes;

use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(todo_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES)),
        )
}
