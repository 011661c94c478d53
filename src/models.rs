use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One recorded tracking-pixel fetch. Immutable once appended to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenEvent {
    pub email: String,
    pub user: String,
    pub newsletter: String,
    pub timestamp: DateTime<Utc>,
    pub ip: String,
    pub user_agent: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct TrackQuery {
    pub email: Option<String>,
    pub user: Option<String>,
    pub newsletter: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub total_opens: usize,
    pub unique_users: usize,
}

/// Payload for `GET /stats`: overall totals plus the full raw record dump.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_opens: usize,
    pub unique_users: usize,
    pub opens: Vec<OpenEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOpens {
    pub count: u64,
    pub first_open: DateTime<Utc>,
    pub last_open: DateTime<Utc>,
    pub user: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSummary {
    pub newsletter: String,
    pub total_opens: usize,
    pub unique_users: usize,
    pub opens_by_user: BTreeMap<String, UserOpens>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    /// Human-readable label, e.g. "October 2025".
    pub month: String,
    /// Zero-padded "YYYY-MM" bucket key; lexicographic order is chronological.
    pub year_month: String,
    pub total_opens: usize,
    pub unique_users: usize,
    pub unique_newsletters: usize,
    pub avg_opens_per_user: f64,
    pub newsletters: BTreeSet<String>,
    /// Day of month with the most opens; ties resolve to the smaller day.
    pub peak_day: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryReport {
    pub total_months: usize,
    pub monthly_stats: Vec<MonthlySummary>,
    pub overall_trend: String,
    /// Timestamp of the positionally first/last stored record, not a
    /// re-sorted min/max. The store is append-only, so position tracks
    /// ingestion order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_record: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_record: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}
