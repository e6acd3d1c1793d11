//! HTTP routes
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `POST /upload/{namespace}` | Upload an image (multipart field `file`) |
//! | `GET /static/upload/...` | Serve stored uploads |
//! | `GET /` | Article listing (`?page=N`, `?tag=T`) |
//! | `GET /tags` | Tag cloud |
//! | `GET /health` | Liveness |

mod articles;
mod upload;

pub use articles::{home, tags, HomeQuery};
pub use upload::upload;

use crate::state::QuillpostState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

/// `GET /health`
pub async fn health() -> &'static str {
    "ok"
}

/// Builds the application router
///
/// Uploads are served from the directory they are written to, at the URL
/// prefix derived from the upload root, so returned URLs resolve.
pub fn router(state: QuillpostState) -> Router {
    let planner = state.pipeline().planner();
    let prefix = planner.url_prefix();
    let files = ServeDir::new(planner.root());
    let body_limit = state.config().server.body_limit_bytes;

    let mut router = Router::new()
        .route("/", get(home))
        .route("/tags", get(tags))
        .route("/health", get(health))
        .route("/upload/{namespace}", post(upload));

    if prefix == "/" {
        tracing::warn!("Upload root has no URL prefix; stored files are not served");
    } else {
        router = router.nest_service(&prefix, files);
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}
