mod handlers;

pub use handlers::{CursorMoveResponse, CursorView};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::session::Session;

pub fn create_router(session: Session) -> Router {
    let api = Router::new()
        // Notes
        .route("/notes", get(handlers::list_notes).put(handlers::load_notes))
        // Cursor
        .route("/cursor", get(handlers::get_cursor))
        .route("/cursor/next", post(handlers::next_note))
        .route("/cursor/previous", post(handlers::previous_note))
        .route("/cursor/stream", get(handlers::stream_cursor))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(session)
}
