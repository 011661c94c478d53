use crate::models::{
    HistoryReport, MonthlySummary, NewsletterSummary, OpenEvent, OverallStats, UserOpens,
};
use chrono::{DateTime, Datelike, Utc};
use std::collections::{BTreeMap, BTreeSet, HashSet};

pub const TREND_GROWING: &str = "Growing";
pub const TREND_DECLINING: &str = "Declining";
pub const TREND_STABLE: &str = "Stable";
pub const TREND_NO_DATA: &str = "No data available";

pub fn overall_stats(events: &[OpenEvent]) -> OverallStats {
    let unique: HashSet<&str> = events.iter().map(|event| event.email.as_str()).collect();
    OverallStats {
        total_opens: events.len(),
        unique_users: unique.len(),
    }
}

pub fn newsletter_stats(events: &[OpenEvent], newsletter: &str) -> NewsletterSummary {
    let mut opens_by_user: BTreeMap<String, UserOpens> = BTreeMap::new();
    let mut total_opens = 0usize;

    for event in events.iter().filter(|event| event.newsletter == newsletter) {
        total_opens += 1;
        match opens_by_user.get_mut(&event.email) {
            Some(entry) => {
                entry.count += 1;
                if event.timestamp < entry.first_open {
                    entry.first_open = event.timestamp;
                }
                if event.timestamp > entry.last_open {
                    entry.last_open = event.timestamp;
                }
            }
            None => {
                // display name comes from the first-seen record for the email
                opens_by_user.insert(
                    event.email.clone(),
                    UserOpens {
                        count: 1,
                        first_open: event.timestamp,
                        last_open: event.timestamp,
                        user: event.user.clone(),
                    },
                );
            }
        }
    }

    NewsletterSummary {
        newsletter: newsletter.to_string(),
        total_opens,
        unique_users: opens_by_user.len(),
        opens_by_user,
    }
}

struct MonthBucket {
    label: String,
    total_opens: usize,
    emails: HashSet<String>,
    newsletters: BTreeSet<String>,
    daily_opens: BTreeMap<u32, usize>,
}

pub fn history_stats(events: &[OpenEvent]) -> HistoryReport {
    if events.is_empty() {
        return HistoryReport {
            total_months: 0,
            monthly_stats: Vec::new(),
            overall_trend: TREND_NO_DATA.to_string(),
            first_record: None,
            last_record: None,
        };
    }

    let mut buckets: BTreeMap<String, MonthBucket> = BTreeMap::new();
    for event in events {
        let bucket = buckets
            .entry(year_month(event.timestamp))
            .or_insert_with(|| MonthBucket {
                label: month_label(event.timestamp),
                total_opens: 0,
                emails: HashSet::new(),
                newsletters: BTreeSet::new(),
                daily_opens: BTreeMap::new(),
            });
        bucket.total_opens += 1;
        bucket.emails.insert(event.email.clone());
        bucket.newsletters.insert(event.newsletter.clone());
        *bucket.daily_opens.entry(event.timestamp.day()).or_insert(0) += 1;
    }

    // BTreeMap iteration over zero-padded keys is chronological
    let monthly_stats: Vec<MonthlySummary> = buckets
        .into_iter()
        .map(|(year_month, bucket)| {
            let unique_users = bucket.emails.len();
            let avg = bucket.total_opens as f64 / unique_users as f64;
            MonthlySummary {
                month: bucket.label,
                year_month,
                total_opens: bucket.total_opens,
                unique_users,
                unique_newsletters: bucket.newsletters.len(),
                avg_opens_per_user: (avg * 100.0).round() / 100.0,
                newsletters: bucket.newsletters,
                peak_day: peak_day(&bucket.daily_opens),
            }
        })
        .collect();

    HistoryReport {
        total_months: monthly_stats.len(),
        overall_trend: trend(&monthly_stats).to_string(),
        monthly_stats,
        first_record: events.first().map(|event| event.timestamp),
        last_record: events.last().map(|event| event.timestamp),
    }
}

/// Percentage change between two monthly totals, for the history page.
pub fn growth_percent(current: usize, previous: usize) -> f64 {
    (current as f64 - previous as f64) / previous as f64 * 100.0
}

fn trend(monthly: &[MonthlySummary]) -> &'static str {
    match monthly {
        [.., prev, last] => {
            if last.total_opens > prev.total_opens {
                TREND_GROWING
            } else if last.total_opens < prev.total_opens {
                TREND_DECLINING
            } else {
                TREND_STABLE
            }
        }
        _ => TREND_STABLE,
    }
}

// Month buckets use the UTC calendar, never the host locale.
fn year_month(timestamp: DateTime<Utc>) -> String {
    format!("{:04}-{:02}", timestamp.year(), timestamp.month())
}

fn month_label(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%B %Y").to_string()
}

fn peak_day(daily_opens: &BTreeMap<u32, usize>) -> u32 {
    let mut best_day = 1;
    let mut best_count = 0;
    // ascending iteration means ties keep the smaller day
    for (&day, &count) in daily_opens {
        if count > best_count {
            best_day = day;
            best_count = count;
        }
    }
    best_day
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(email: &str, user: &str, newsletter: &str, timestamp: &str) -> OpenEvent {
        OpenEvent {
            email: email.to_string(),
            user: user.to_string(),
            newsletter: newsletter.to_string(),
            timestamp: timestamp
                .parse()
                .unwrap_or_else(|_| panic!("bad timestamp in test: {timestamp}")),
            ip: "192.168.1.1".to_string(),
            user_agent: "test-agent".to_string(),
        }
    }

    #[test]
    fn overall_stats_counts_distinct_emails() {
        let events = vec![
            event("a@co.com", "A", "oct-2025", "2025-10-01T09:00:00Z"),
            event("b@co.com", "B", "oct-2025", "2025-10-02T09:00:00Z"),
            event("a@co.com", "A", "nov-2025", "2025-11-01T09:00:00Z"),
        ];
        let stats = overall_stats(&events);
        assert_eq!(stats.total_opens, 3);
        assert_eq!(stats.unique_users, 2);
    }

    #[test]
    fn overall_stats_empty_input_is_zeroes() {
        let stats = overall_stats(&[]);
        assert_eq!(stats.total_opens, 0);
        assert_eq!(stats.unique_users, 0);
    }

    #[test]
    fn newsletter_stats_zero_matches_is_empty_summary() {
        let events = vec![event("a@co.com", "A", "oct-2025", "2025-10-01T09:00:00Z")];
        let summary = newsletter_stats(&events, "nov-2025");
        assert_eq!(summary.newsletter, "nov-2025");
        assert_eq!(summary.total_opens, 0);
        assert_eq!(summary.unique_users, 0);
        assert!(summary.opens_by_user.is_empty());
    }

    #[test]
    fn newsletter_stats_groups_by_email() {
        let events = vec![
            event("a@co.com", "Alice", "oct-2025", "2025-10-05T10:00:00Z"),
            event("b@co.com", "Bob", "oct-2025", "2025-10-06T10:00:00Z"),
            event("a@co.com", "Alice Renamed", "oct-2025", "2025-10-02T10:00:00Z"),
            event("a@co.com", "Alice", "nov-2025", "2025-11-01T10:00:00Z"),
        ];
        let summary = newsletter_stats(&events, "oct-2025");
        assert_eq!(summary.total_opens, 3);
        assert_eq!(summary.unique_users, 2);

        let alice = &summary.opens_by_user["a@co.com"];
        assert_eq!(alice.count, 2);
        // first/last compare instants, not positions
        assert_eq!(alice.first_open, "2025-10-02T10:00:00Z".parse::<DateTime<Utc>>().unwrap());
        assert_eq!(alice.last_open, "2025-10-05T10:00:00Z".parse::<DateTime<Utc>>().unwrap());
        // display name is from the first-seen record
        assert_eq!(alice.user, "Alice");
    }

    #[test]
    fn history_stats_empty_input() {
        let report = history_stats(&[]);
        assert_eq!(report.total_months, 0);
        assert!(report.monthly_stats.is_empty());
        assert_eq!(report.overall_trend, TREND_NO_DATA);
        assert!(report.first_record.is_none());
        assert!(report.last_record.is_none());
    }

    #[test]
    fn history_stats_buckets_by_calendar_month() {
        let events = vec![
            event("a@co.com", "A", "jan-2025", "2025-01-15T12:00:00Z"),
            event("b@co.com", "B", "jan-2025", "2025-01-20T12:00:00Z"),
            event("a@co.com", "A", "feb-2025", "2025-02-01T12:00:00Z"),
        ];
        let report = history_stats(&events);
        assert_eq!(report.total_months, 2);
        assert_eq!(report.monthly_stats[0].year_month, "2025-01");
        assert_eq!(report.monthly_stats[0].total_opens, 2);
        assert_eq!(report.monthly_stats[0].month, "January 2025");
        assert_eq!(report.monthly_stats[1].year_month, "2025-02");
        assert_eq!(report.monthly_stats[1].total_opens, 1);
    }

    #[test]
    fn history_stats_first_and_last_record_are_positional() {
        let events = vec![
            event("a@co.com", "A", "n", "2025-03-10T00:00:00Z"),
            event("b@co.com", "B", "n", "2025-01-01T00:00:00Z"),
        ];
        let report = history_stats(&events);
        assert_eq!(report.first_record, Some("2025-03-10T00:00:00Z".parse().unwrap()));
        assert_eq!(report.last_record, Some("2025-01-01T00:00:00Z".parse().unwrap()));
    }

    fn month_of_opens(year: i32, month: u32, count: usize) -> Vec<OpenEvent> {
        (0..count)
            .map(|i| {
                event(
                    &format!("user{i}@co.com"),
                    "U",
                    "n",
                    &format!("{year:04}-{month:02}-10T{:02}:00:00Z", i % 24),
                )
            })
            .collect()
    }

    #[test]
    fn trend_is_declining_when_last_month_drops() {
        let mut events = month_of_opens(2025, 1, 10);
        events.extend(month_of_opens(2025, 2, 20));
        events.extend(month_of_opens(2025, 3, 15));
        let report = history_stats(&events);
        assert_eq!(report.overall_trend, TREND_DECLINING);
    }

    #[test]
    fn trend_is_stable_on_equal_totals() {
        let mut events = month_of_opens(2025, 1, 10);
        events.extend(month_of_opens(2025, 2, 20));
        events.extend(month_of_opens(2025, 3, 20));
        let report = history_stats(&events);
        assert_eq!(report.overall_trend, TREND_STABLE);
    }

    #[test]
    fn trend_is_growing_when_last_month_rises() {
        let mut events = month_of_opens(2025, 1, 10);
        events.extend(month_of_opens(2025, 2, 20));
        let report = history_stats(&events);
        assert_eq!(report.overall_trend, TREND_GROWING);
    }

    #[test]
    fn trend_is_stable_for_a_single_month() {
        let events = month_of_opens(2025, 1, 5);
        let report = history_stats(&events);
        assert_eq!(report.overall_trend, TREND_STABLE);
    }

    #[test]
    fn avg_opens_per_user_rounds_to_two_decimals() {
        // 5 opens from 2 distinct users
        let events = vec![
            event("a@co.com", "A", "n", "2025-04-01T00:00:00Z"),
            event("a@co.com", "A", "n", "2025-04-02T00:00:00Z"),
            event("a@co.com", "A", "n", "2025-04-03T00:00:00Z"),
            event("b@co.com", "B", "n", "2025-04-04T00:00:00Z"),
            event("b@co.com", "B", "n", "2025-04-05T00:00:00Z"),
        ];
        let report = history_stats(&events);
        assert_eq!(report.monthly_stats[0].avg_opens_per_user, 2.5);

        // 1/3 rounds to 0.33
        let events = vec![
            event("a@co.com", "A", "n", "2025-05-01T00:00:00Z"),
            event("b@co.com", "B", "n", "2025-05-01T00:00:00Z"),
            event("c@co.com", "C", "n", "2025-05-01T00:00:00Z"),
            event("a@co.com", "A", "n", "2025-05-02T00:00:00Z"),
        ];
        let report = history_stats(&events);
        assert_eq!(report.monthly_stats[0].avg_opens_per_user, 1.33);
    }

    #[test]
    fn peak_day_tie_breaks_to_smaller_day() {
        let events = vec![
            event("a@co.com", "A", "n", "2025-06-20T00:00:00Z"),
            event("b@co.com", "B", "n", "2025-06-20T01:00:00Z"),
            event("c@co.com", "C", "n", "2025-06-03T00:00:00Z"),
            event("d@co.com", "D", "n", "2025-06-03T01:00:00Z"),
            event("e@co.com", "E", "n", "2025-06-11T00:00:00Z"),
        ];
        let report = history_stats(&events);
        assert_eq!(report.monthly_stats[0].peak_day, 3);
    }

    #[test]
    fn history_counts_unique_newsletters_per_month() {
        let events = vec![
            event("a@co.com", "A", "weekly-digest", "2025-07-01T00:00:00Z"),
            event("a@co.com", "A", "monthly-update", "2025-07-02T00:00:00Z"),
            event("b@co.com", "B", "weekly-digest", "2025-07-03T00:00:00Z"),
        ];
        let report = history_stats(&events);
        let month = &report.monthly_stats[0];
        assert_eq!(month.unique_newsletters, 2);
        assert!(month.newsletters.contains("weekly-digest"));
        assert!(month.newsletters.contains("monthly-update"));
    }

    #[test]
    fn growth_percent_is_relative_to_previous() {
        assert_eq!(growth_percent(20, 10), 100.0);
        assert_eq!(growth_percent(15, 20), -25.0);
        assert_eq!(growth_percent(10, 10), 0.0);
    }
}
