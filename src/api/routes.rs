use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use super::handlers::{get_holders, get_range, get_stats, get_top, get_wallet, index, not_found};
use super::middleware::{cors, panic_response};
use super::state::AppState;

/// Every route answers other methods with the same 404 envelope as unknown paths.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).fallback(not_found))
        .route("/api/wallet/:address", get(get_wallet).fallback(not_found))
        .route("/api/holders", get(get_holders).fallback(not_found))
        .route("/api/range/:from/:to", get(get_range).fallback(not_found))
        .route("/api/top/:count", get(get_top).fallback(not_found))
        .route("/api/stats", get(get_stats).fallback(not_found))
        .fallback(not_found)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(cors))
                .layer(CatchPanicLayer::custom(panic_response)),
        )
}
