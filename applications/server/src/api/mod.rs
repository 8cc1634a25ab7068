/// API route modules
pub mod health;
pub mod playback;
pub mod ws;

use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Routes under `/api`
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/status", get(playback::status))
        .route("/queue", get(playback::queue))
        .route("/play", post(playback::play))
        .route("/stop", post(playback::stop))
        .route("/skip", post(playback::skip))
        .route("/ended", post(playback::ended))
        .route("/ws", get(ws::ws_handler))
}

/// Full application router
///
/// When `web_dir` is set, its files are served at `/` with `index.html` as
/// the fallback for unknown paths.
pub fn router(app_state: AppState, web_dir: Option<PathBuf>) -> Router {
    let mut app = Router::new().nest("/api", routes());

    if let Some(web_dir) = web_dir {
        let index = web_dir.join("index.html");
        app = app.fallback_service(ServeDir::new(web_dir).fallback(ServeFile::new(index)));
    }

    app.layer(
        TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default().include_headers(true)),
    )
    .layer(CorsLayer::permissive())
    .with_state(app_state)
}
