use crate::errors::AppError;
use crate::models::{
    HealthResponse, HistoryReport, NewsletterSummary, OpenEvent, ResetResponse, StatsResponse,
    TrackQuery,
};
use crate::state::AppState;
use crate::stats::{history_stats, newsletter_stats, overall_stats};
use crate::ui;
use axum::{
    extract::{ConnectInfo, Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use chrono::Utc;
use serde_json::json;
use std::net::SocketAddr;
use tracing::{error, info};

/// 1x1 transparent PNG served for every `/track` request.
const TRANSPARENT_PIXEL: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x04, 0x00, 0x00, 0x00, 0xb5,
    0x1c, 0x0c, 0x02, 0x00, 0x00, 0x00, 0x0b, 0x49, 0x44, 0x41, 0x54, 0x78, 0xda, 0x63, 0x64,
    0x60, 0x00, 0x00, 0x00, 0x06, 0x00, 0x02, 0x30, 0x81, 0xd0, 0x2f, 0x00, 0x00, 0x00, 0x00,
    0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

pub async fn index() -> Html<&'static str> {
    Html(ui::INDEX_HTML)
}

pub async fn track(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Query(query): Query<TrackQuery>,
) -> impl IntoResponse {
    let event = OpenEvent {
        email: field_or_unknown(query.email),
        user: field_or_unknown(query.user),
        newsletter: field_or_unknown(query.newsletter),
        timestamp: Utc::now(),
        ip: client_ip(&headers, addr),
        user_agent: header_or_unknown(&headers, header::USER_AGENT),
    };

    info!(
        "email opened: {} / {} from {}",
        event.email, event.newsletter, event.ip
    );

    // the pixel is served regardless of whether the append succeeds
    if let Err(err) = state.store.append(event).await {
        error!("failed to record open event: {}", err.message);
    }

    (
        [
            (header::CONTENT_TYPE, "image/png"),
            (
                header::CACHE_CONTROL,
                "no-store, no-cache, must-revalidate, proxy-revalidate",
            ),
            (header::PRAGMA, "no-cache"),
            (header::EXPIRES, "0"),
        ],
        TRANSPARENT_PIXEL,
    )
}

pub async fn stats_overview(State(state): State<AppState>) -> Json<StatsResponse> {
    let events = state.store.snapshot().await;
    let totals = overall_stats(&events);
    info!(
        "stats requested: {} opens, {} unique users",
        totals.total_opens, totals.unique_users
    );
    Json(StatsResponse {
        total_opens: totals.total_opens,
        unique_users: totals.unique_users,
        opens: events,
    })
}

pub async fn stats_newsletter(
    State(state): State<AppState>,
    Path(newsletter): Path<String>,
) -> Json<NewsletterSummary> {
    let events = state.store.snapshot().await;
    let summary = newsletter_stats(&events, &newsletter);
    info!(
        "newsletter stats requested: {} - {} opens, {} unique",
        summary.newsletter, summary.total_opens, summary.unique_users
    );
    Json(summary)
}

pub async fn stats_history(State(state): State<AppState>) -> Json<HistoryReport> {
    let events = state.store.snapshot().await;
    let report = history_stats(&events);
    info!(
        "historical stats requested: {} months, trend {}",
        report.total_months, report.overall_trend
    );
    Json(report)
}

pub async fn dashboard(State(state): State<AppState>) -> Html<String> {
    let events = state.store.snapshot().await;
    Html(ui::render_dashboard(&events))
}

pub async fn history(State(state): State<AppState>) -> Html<String> {
    let events = state.store.snapshot().await;
    let report = history_stats(&events);
    Html(ui::render_history(&report))
}

pub async fn reset_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    info!("resetting all tracking data");
    state.store.reset().await?;
    Ok(Html(ui::render_reset(Utc::now())))
}

pub async fn reset(State(state): State<AppState>) -> (StatusCode, Json<ResetResponse>) {
    info!("resetting all tracking data");
    match state.store.reset().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ResetResponse {
                success: true,
                message: "All tracking data has been reset".to_string(),
                timestamp: Utc::now(),
            }),
        ),
        Err(err) => {
            error!("failed to reset tracking data: {}", err.message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ResetResponse {
                    success: false,
                    message: "Failed to reset tracking data".to_string(),
                    timestamp: Utc::now(),
                }),
            )
        }
    }
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
    })
}

pub async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Endpoint not found" })),
    )
}

fn field_or_unknown(value: Option<String>) -> String {
    match value {
        Some(value) if !value.is_empty() => value,
        _ => "unknown".to_string(),
    }
}

fn header_or_unknown(headers: &HeaderMap, name: header::HeaderName) -> String {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

// First hop of a comma-separated forwarded-for chain, else the peer address.
fn client_ip(headers: &HeaderMap, peer: SocketAddr) -> String {
    match headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
    {
        Some(forwarded) => forwarded
            .split(',')
            .next()
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| "unknown".to_string()),
        None => peer.ip().to_string(),
    }
}
