use crate::handlers;
use crate::state::AppState;
use axum::{
    http::{header, HeaderName, Method},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
            header::ACCEPT,
        ]);

    Router::new()
        .route("/", get(handlers::index))
        .route("/track", get(handlers::track))
        .route("/stats", get(handlers::stats_overview))
        // static route takes precedence over the capture below
        .route("/stats/history", get(handlers::stats_history))
        .route("/stats/:newsletter", get(handlers::stats_newsletter))
        .route("/dashboard", get(handlers::dashboard))
        .route("/history", get(handlers::history))
        .route("/reset", get(handlers::reset_page).post(handlers::reset))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(cors)
        .with_state(state)
}
