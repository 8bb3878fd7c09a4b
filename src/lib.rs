//! News API: topics, articles, comments and users over PostgreSQL.
//!
//! | Endpoint | Method |
//! |----------|--------|
//! | `/api` | GET |
//! | `/api/topics` | GET, POST |
//! | `/api/articles` | GET, POST |
//! | `/api/articles/:article_id` | GET, PATCH, DELETE |
//! | `/api/articles/:article_id/comments` | GET, POST |
//! | `/api/comments/:comment_id` | PATCH, DELETE |
//! | `/api/users` | GET |
//! | `/api/users/:username` | GET |

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{AppError, Resource};
pub use routes::{api_routes, status_routes};
pub use state::AppState;
pub use store::{MemoryStore, NewsStore, PgStore};

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Maximum request body size (64 KiB).
pub const MAX_BODY_SIZE: usize = 64 * 1024;

/// Full application router: `/api` routes, status routes, the `Invalid path`
/// fallback, request tracing and the body size limit. Every error response,
/// including 405 and 413 raised below the handlers, carries a `{"msg"}` body.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(status_routes(state.clone()))
        .merge(api_routes(state))
        .fallback(handlers::api::fallback)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(middleware::json_error_bodies))
                .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE)),
        )
}
