//! Seeds the tracking store with several months of plausible open events,
//! for exercising the dashboard and history views.
//!
//! Run with: cargo run --bin generate_sample_data

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use email_tracker::models::OpenEvent;
use email_tracker::{resolve_data_path, EventStore};
use rand::Rng;
use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

const MONTHS_TO_GENERATE: u32 = 6;

const USERS: &[(&str, &str)] = &[
    ("john.doe@company.com", "John Doe"),
    ("jane.smith@company.com", "Jane Smith"),
    ("bob.johnson@company.com", "Bob Johnson"),
    ("alice.williams@company.com", "Alice Williams"),
    ("charlie.brown@company.com", "Charlie Brown"),
    ("diana.davis@company.com", "Diana Davis"),
    ("evan.miller@company.com", "Evan Miller"),
    ("fiona.wilson@company.com", "Fiona Wilson"),
    ("george.moore@company.com", "George Moore"),
    ("helen.taylor@company.com", "Helen Taylor"),
];

const NEWSLETTERS: &[&str] = &[
    "monthly-update",
    "weekly-digest",
    "special-announcement",
    "product-news",
];

const IP_ADDRESSES: &[&str] = &[
    "192.168.1.1",
    "192.168.1.2",
    "10.0.0.1",
    "10.0.0.2",
    "172.16.0.1",
];

const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 14_0 like Mac OS X) AppleWebKit/605.1.15",
    "Mozilla/5.0 (Linux; Android 11) AppleWebKit/537.36",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let data_path = resolve_data_path();
    if let Some(parent) = data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    info!("generating sample email tracking data");
    info!(
        "configuration: {MONTHS_TO_GENERATE} months, {} users, {} newsletters",
        USERS.len(),
        NEWSLETTERS.len()
    );

    let records = generate_records(Utc::now())?;
    let first = records.first().map(|r| r.timestamp.format("%b %d, %Y"));
    let last = records.last().map(|r| r.timestamp.format("%b %d, %Y"));
    let total = records.len();

    let store = EventStore::open(data_path.clone()).await;
    store
        .replace_all(records)
        .await
        .map_err(|err| err.message)?;

    info!("wrote {total} records to {}", data_path.display());
    if let (Some(first), Some(last)) = (first, last) {
        info!("date range: {first} - {last}");
    }
    info!("start the server and visit /dashboard or /history");

    Ok(())
}

fn generate_records(now: DateTime<Utc>) -> Result<Vec<OpenEvent>, String> {
    let mut rng = rand::thread_rng();
    let mut records = Vec::new();

    for month_offset in (0..MONTHS_TO_GENERATE).rev() {
        let (year, month) = months_back(now, month_offset);
        let label = month_key(year, month)?;

        // baseline grows toward the present, with some jitter
        let base = 30 + (MONTHS_TO_GENERATE - month_offset) * 10;
        let variation: i64 = rng.gen_range(-10..=10);
        let monthly_opens = (base as i64 + variation).max(1) as usize;
        info!("generating {monthly_opens} opens for {year:04}-{month:02}");

        for _ in 0..monthly_opens {
            let (email, name) = USERS[rng.gen_range(0..USERS.len())];
            let series = NEWSLETTERS[rng.gen_range(0..NEWSLETTERS.len())];
            let day = rng.gen_range(1..=days_in_month(year, month));
            let timestamp = Utc
                .with_ymd_and_hms(
                    year,
                    month,
                    day,
                    rng.gen_range(0..24),
                    rng.gen_range(0..60),
                    rng.gen_range(0..60),
                )
                .single()
                .ok_or_else(|| format!("invalid generated timestamp: {year}-{month}-{day}"))?;

            records.push(OpenEvent {
                email: email.to_string(),
                user: name.to_string(),
                newsletter: format!("{series}-{label}"),
                timestamp,
                ip: IP_ADDRESSES[rng.gen_range(0..IP_ADDRESSES.len())].to_string(),
                user_agent: USER_AGENTS[rng.gen_range(0..USER_AGENTS.len())].to_string(),
            });
        }
    }

    records.sort_by_key(|record| record.timestamp);
    Ok(records)
}

fn months_back(now: DateTime<Utc>, offset: u32) -> (i32, u32) {
    let total = now.year() * 12 + now.month0() as i32 - offset as i32;
    (total.div_euclid(12), total.rem_euclid(12) as u32 + 1)
}

// e.g. "oct-2025", matching the newsletter naming used in campaigns
fn month_key(year: i32, month: u32) -> Result<String, String> {
    let date = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| format!("invalid month: {year}-{month}"))?;
    Ok(date.format("%b-%Y").to_string().to_lowercase())
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}
