use crate::models::{HistoryReport, OpenEvent};
use crate::stats::{growth_percent, overall_stats};
use chrono::{DateTime, SecondsFormat, Utc};

const RECENT_OPENS_LIMIT: usize = 50;

pub fn render_dashboard(events: &[OpenEvent]) -> String {
    let totals = overall_stats(events);
    let avg_opens = if totals.unique_users > 0 {
        format!(
            "{:.1}",
            totals.total_opens as f64 / totals.unique_users as f64
        )
    } else {
        "0".to_string()
    };

    let table = if events.is_empty() {
        NO_DATA_HTML.to_string()
    } else {
        let rows: String = events
            .iter()
            .rev()
            .take(RECENT_OPENS_LIMIT)
            .map(dashboard_row)
            .collect();
        DASHBOARD_TABLE_HTML.replace("{{ROWS}}", &rows)
    };

    DASHBOARD_HTML
        .replace("{{TOTAL_OPENS}}", &totals.total_opens.to_string())
        .replace("{{UNIQUE_USERS}}", &totals.unique_users.to_string())
        .replace("{{AVG_OPENS}}", &avg_opens)
        .replace("{{TABLE}}", &table)
        .replace("{{UPDATED}}", &updated_label())
}

pub fn render_history(report: &HistoryReport) -> String {
    if report.monthly_stats.is_empty() {
        return HISTORY_EMPTY_HTML.to_string();
    }

    let total_opens: usize = report.monthly_stats.iter().map(|m| m.total_opens).sum();
    let peak_opens = report
        .monthly_stats
        .iter()
        .map(|m| m.total_opens)
        .max()
        .unwrap_or(0);
    let avg_per_month = total_opens as f64 / report.monthly_stats.len() as f64;

    // chart runs oldest to newest; the comparison table newest first
    let bars: String = report
        .monthly_stats
        .iter()
        .map(|month| {
            let height = if peak_opens > 0 {
                month.total_opens as f64 / peak_opens as f64 * 100.0
            } else {
                0.0
            };
            let label: String = month
                .month
                .split(' ')
                .next()
                .unwrap_or("")
                .chars()
                .take(3)
                .collect();
            format!(
                r#"<div class="bar-group">
              <div class="bar" style="height: {height:.0}%">
                <div class="bar-value">{opens}</div>
              </div>
              <div class="bar-label">{label}</div>
            </div>
"#,
                opens = month.total_opens,
            )
        })
        .collect();

    let rows: String = report
        .monthly_stats
        .iter()
        .enumerate()
        .rev()
        .map(|(index, month)| {
            let growth = if index == 0 {
                r#"<span class="growth neutral">━</span>"#.to_string()
            } else {
                let previous = &report.monthly_stats[index - 1];
                let change = growth_percent(month.total_opens, previous.total_opens);
                if change > 0.0 {
                    format!(r#"<span class="growth positive">↑ {change:.1}%</span>"#)
                } else if change < 0.0 {
                    format!(
                        r#"<span class="growth negative">↓ {:.1}%</span>"#,
                        change.abs()
                    )
                } else {
                    r#"<span class="growth neutral">━</span>"#.to_string()
                }
            };
            format!(
                r#"<tr>
              <td><strong>{month}</strong></td>
              <td>{opens}</td>
              <td>{users}</td>
              <td>{newsletters}</td>
              <td>{avg:.2}</td>
              <td>{growth}</td>
            </tr>
"#,
                month = escape_html(&month.month),
                opens = month.total_opens,
                users = month.unique_users,
                newsletters = month.unique_newsletters,
                avg = month.avg_opens_per_user,
            )
        })
        .collect();

    let range = match (report.first_record, report.last_record) {
        (Some(first), Some(last)) => format!(
            "{} - {}",
            first.format("%b %d, %Y"),
            last.format("%b %d, %Y")
        ),
        _ => String::new(),
    };

    HISTORY_HTML
        .replace("{{MONTHS_TRACKED}}", &report.total_months.to_string())
        .replace("{{TOTAL_OPENS}}", &total_opens.to_string())
        .replace("{{PEAK_OPENS}}", &peak_opens.to_string())
        .replace("{{AVG_PER_MONTH}}", &format!("{avg_per_month:.0}"))
        .replace("{{CHART_BARS}}", &bars)
        .replace("{{TABLE_ROWS}}", &rows)
        .replace("{{DATA_RANGE}}", &range)
        .replace("{{UPDATED}}", &updated_label())
}

pub fn render_reset(timestamp: DateTime<Utc>) -> String {
    RESET_HTML.replace(
        "{{TIMESTAMP}}",
        &timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
    )
}

fn dashboard_row(event: &OpenEvent) -> String {
    format!(
        r#"<tr>
          <td>{email}</td>
          <td>{user}</td>
          <td><span class="newsletter-badge">{newsletter}</span></td>
          <td>{timestamp}</td>
          <td>{ip}</td>
        </tr>
"#,
        email = escape_html(&event.email),
        user = escape_html(&event.user),
        newsletter = escape_html(&event.newsletter),
        timestamp = event.timestamp.format("%b %d, %Y %H:%M:%S"),
        ip = escape_html(&event.ip),
    )
}

fn updated_label() -> String {
    Utc::now().format("%b %d, %Y %H:%M:%S UTC").to_string()
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Email Tracking Server</title>
  <style>
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
      max-width: 800px;
      margin: 50px auto;
      padding: 20px;
      line-height: 1.6;
      color: #333;
    }

    h1 {
      color: #2c3e50;
    }

    .endpoint {
      background: #f8f9fa;
      padding: 15px;
      margin: 10px 0;
      border-radius: 5px;
      border-left: 4px solid #3498db;
    }

    code {
      background: #e9ecef;
      padding: 2px 6px;
      border-radius: 3px;
      font-family: 'Courier New', monospace;
    }

    .link {
      display: inline-block;
      margin: 5px 0;
      color: #3498db;
      text-decoration: none;
    }

    .link:hover {
      text-decoration: underline;
    }

    pre {
      background: #f8f9fa;
      padding: 15px;
      border-radius: 5px;
      overflow-x: auto;
    }
  </style>
</head>
<body>
  <h1>Email Tracking Server</h1>
  <p>Internal company newsletter tracking system is running.</p>

  <h2>Available Endpoints:</h2>

  <div class="endpoint">
    <strong>Tracking Pixel:</strong><br>
    <code>GET /track?email=user@company.com&user=John&newsletter=oct-2025</code><br>
    <small>Returns a 1x1 transparent PNG pixel and logs the open event</small>
  </div>

  <div class="endpoint">
    <strong>Overall Statistics:</strong><br>
    <a href="/stats" class="link">GET /stats</a><br>
    <small>Returns total opens, unique users, and all tracking data</small>
  </div>

  <div class="endpoint">
    <strong>Newsletter Statistics:</strong><br>
    <code>GET /stats/:newsletter</code><br>
    <small>Example: <a href="/stats/oct-2025" class="link">/stats/oct-2025</a></small>
  </div>

  <div class="endpoint">
    <strong>Dashboard:</strong><br>
    <a href="/dashboard" class="link">GET /dashboard</a><br>
    <small>Visual dashboard with tracking data and statistics</small>
  </div>

  <div class="endpoint">
    <strong>Historical Analytics:</strong><br>
    <a href="/history" class="link">GET /history</a> | <a href="/stats/history" class="link">GET /stats/history</a><br>
    <small>Monthly trends and comparison data</small>
  </div>

  <div class="endpoint">
    <strong>Reset Data (Development):</strong><br>
    <a href="/reset" class="link">GET /reset</a><br>
    <small>Clear all tracking data - useful for development/testing</small>
  </div>

  <h2>Example HTML Tracking Pixel:</h2>
  <pre><code>&lt;img src="http://localhost:8080/track?email=user@company.com&amp;user=John&amp;newsletter=oct-2025" width="1" height="1" style="display:none;" alt="" /&gt;</code></pre>
</body>
</html>
"#;

const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Email Tracking Dashboard</title>
  <style>
    * {
      margin: 0;
      padding: 0;
      box-sizing: border-box;
    }

    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
      background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
      min-height: 100vh;
      padding: 20px;
      color: #333;
    }

    .container {
      max-width: 1400px;
      margin: 0 auto;
    }

    .header {
      text-align: center;
      color: white;
      margin-bottom: 30px;
    }

    .header h1 {
      font-size: 2.5em;
      margin-bottom: 10px;
      text-shadow: 2px 2px 4px rgba(0,0,0,0.2);
    }

    .header p {
      font-size: 1.1em;
      opacity: 0.95;
    }

    .stats-container {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(250px, 1fr));
      gap: 20px;
      margin-bottom: 30px;
    }

    .stat-card {
      background: white;
      padding: 25px;
      border-radius: 10px;
      box-shadow: 0 4px 6px rgba(0,0,0,0.1);
      text-align: center;
      transition: transform 0.2s;
    }

    .stat-card:hover {
      transform: translateY(-5px);
      box-shadow: 0 6px 12px rgba(0,0,0,0.15);
    }

    .stat-value {
      font-size: 3em;
      font-weight: bold;
      color: #667eea;
      margin-bottom: 10px;
    }

    .stat-label {
      font-size: 1.1em;
      color: #666;
      text-transform: uppercase;
      letter-spacing: 1px;
    }

    .table-container {
      background: white;
      border-radius: 10px;
      padding: 25px;
      box-shadow: 0 4px 6px rgba(0,0,0,0.1);
      overflow-x: auto;
    }

    .table-header {
      display: flex;
      justify-content: space-between;
      align-items: center;
      margin-bottom: 20px;
    }

    .table-header h2 {
      color: #2c3e50;
      font-size: 1.5em;
    }

    .refresh-btn {
      background: #667eea;
      color: white;
      border: none;
      padding: 10px 20px;
      border-radius: 5px;
      cursor: pointer;
      font-size: 1em;
      transition: background 0.3s;
    }

    .refresh-btn:hover {
      background: #5568d3;
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    thead {
      background: #f8f9fa;
    }

    th {
      padding: 15px;
      text-align: left;
      font-weight: 600;
      color: #2c3e50;
      border-bottom: 2px solid #dee2e6;
    }

    td {
      padding: 12px 15px;
      border-bottom: 1px solid #e9ecef;
    }

    tbody tr:hover {
      background: #f8f9fa;
    }

    .newsletter-badge {
      background: #667eea;
      color: white;
      padding: 4px 12px;
      border-radius: 15px;
      font-size: 0.9em;
      font-weight: 500;
    }

    .no-data {
      text-align: center;
      padding: 40px;
      color: #666;
      font-size: 1.1em;
    }

    .footer {
      text-align: center;
      color: white;
      margin-top: 30px;
      opacity: 0.9;
    }

    @media (max-width: 768px) {
      .header h1 {
        font-size: 1.8em;
      }

      .stat-value {
        font-size: 2em;
      }

      table {
        font-size: 0.9em;
      }

      th, td {
        padding: 8px;
      }
    }
  </style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1>Email Tracking Dashboard</h1>
      <p>Analytics for internal company newsletters</p>
    </div>

    <div class="stats-container">
      <div class="stat-card">
        <div class="stat-value">{{TOTAL_OPENS}}</div>
        <div class="stat-label">Total Opens</div>
      </div>

      <div class="stat-card">
        <div class="stat-value">{{UNIQUE_USERS}}</div>
        <div class="stat-label">Unique Users</div>
      </div>

      <div class="stat-card">
        <div class="stat-value">{{AVG_OPENS}}</div>
        <div class="stat-label">Avg Opens/User</div>
      </div>
    </div>

    <div class="table-container">
      <div class="table-header">
        <h2>Recent Email Opens (Last 50)</h2>
        <div>
          <button class="refresh-btn" onclick="location.href='/history'" style="margin-right: 10px;">View History</button>
          <button class="refresh-btn" onclick="location.reload()">Refresh</button>
        </div>
      </div>

      {{TABLE}}
    </div>

    <div class="footer">
      <p>Last updated: {{UPDATED}}</p>
    </div>
  </div>
</body>
</html>
"#;

const DASHBOARD_TABLE_HTML: &str = r#"<table>
        <thead>
          <tr>
            <th>Email</th>
            <th>User</th>
            <th>Newsletter</th>
            <th>Timestamp</th>
            <th>IP Address</th>
          </tr>
        </thead>
        <tbody>
          {{ROWS}}
        </tbody>
      </table>
"#;

const NO_DATA_HTML: &str = r#"<div class="no-data">
        No tracking data yet. Start tracking by embedding the tracking pixel in your emails!
      </div>
"#;

const HISTORY_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Historical Analytics - Email Tracking</title>
  <style>
    * {
      margin: 0;
      padding: 0;
      box-sizing: border-box;
    }

    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
      background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
      min-height: 100vh;
      padding: 20px;
      color: #333;
    }

    .container {
      max-width: 1400px;
      margin: 0 auto;
    }

    .header {
      text-align: center;
      color: white;
      margin-bottom: 30px;
    }

    .header h1 {
      font-size: 2.5em;
      margin-bottom: 10px;
      text-shadow: 2px 2px 4px rgba(0,0,0,0.2);
    }

    .header p {
      font-size: 1.1em;
      opacity: 0.95;
    }

    .nav-links {
      text-align: center;
      margin-bottom: 20px;
    }

    .nav-links a {
      display: inline-block;
      background: rgba(255,255,255,0.2);
      color: white;
      padding: 10px 20px;
      margin: 5px;
      border-radius: 5px;
      text-decoration: none;
      transition: background 0.3s;
    }

    .nav-links a:hover {
      background: rgba(255,255,255,0.3);
    }

    .summary-cards {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 20px;
      margin-bottom: 30px;
    }

    .summary-card {
      background: white;
      padding: 20px;
      border-radius: 10px;
      box-shadow: 0 4px 6px rgba(0,0,0,0.1);
      text-align: center;
    }

    .summary-card .value {
      font-size: 2.5em;
      font-weight: bold;
      color: #667eea;
      margin-bottom: 5px;
    }

    .summary-card .label {
      color: #666;
      font-size: 0.9em;
      text-transform: uppercase;
      letter-spacing: 1px;
    }

    .chart-container {
      background: white;
      padding: 30px;
      border-radius: 10px;
      box-shadow: 0 4px 6px rgba(0,0,0,0.1);
      margin-bottom: 30px;
    }

    .chart-container h2 {
      color: #2c3e50;
      margin-bottom: 20px;
    }

    .simple-chart {
      display: flex;
      align-items: flex-end;
      justify-content: space-around;
      height: 250px;
      border-left: 2px solid #ddd;
      border-bottom: 2px solid #ddd;
      padding: 20px;
      gap: 10px;
    }

    .bar-group {
      flex: 1;
      display: flex;
      flex-direction: column;
      align-items: center;
      gap: 10px;
      height: 100%;
      justify-content: flex-end;
    }

    .bar {
      width: 100%;
      background: linear-gradient(180deg, #667eea 0%, #764ba2 100%);
      border-radius: 5px 5px 0 0;
      position: relative;
      transition: transform 0.3s;
      min-height: 20px;
    }

    .bar:hover {
      transform: translateY(-5px);
    }

    .bar-label {
      font-size: 0.8em;
      color: #666;
      text-align: center;
      white-space: nowrap;
      overflow: hidden;
      text-overflow: ellipsis;
      max-width: 100%;
    }

    .bar-value {
      position: absolute;
      top: -25px;
      left: 50%;
      transform: translateX(-50%);
      font-weight: bold;
      color: #2c3e50;
      font-size: 0.9em;
    }

    .table-container {
      background: white;
      border-radius: 10px;
      padding: 25px;
      box-shadow: 0 4px 6px rgba(0,0,0,0.1);
      overflow-x: auto;
    }

    .table-container h2 {
      color: #2c3e50;
      margin-bottom: 20px;
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    thead {
      background: #f8f9fa;
    }

    th {
      padding: 15px;
      text-align: left;
      font-weight: 600;
      color: #2c3e50;
      border-bottom: 2px solid #dee2e6;
    }

    td {
      padding: 12px 15px;
      border-bottom: 1px solid #e9ecef;
    }

    tbody tr:hover {
      background: #f8f9fa;
    }

    .growth {
      padding: 4px 8px;
      border-radius: 4px;
      font-weight: 500;
      font-size: 0.9em;
    }

    .growth.positive {
      background: #d4edda;
      color: #155724;
    }

    .growth.negative {
      background: #f8d7da;
      color: #721c24;
    }

    .growth.neutral {
      background: #e9ecef;
      color: #666;
    }

    .footer {
      text-align: center;
      color: white;
      margin-top: 30px;
      opacity: 0.9;
    }

    @media (max-width: 768px) {
      .header h1 {
        font-size: 1.8em;
      }

      .summary-card .value {
        font-size: 2em;
      }

      .bar-label {
        font-size: 0.7em;
      }

      table {
        font-size: 0.9em;
      }
    }
  </style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1>Historical Analytics</h1>
      <p>Monthly email open trends and comparisons</p>
    </div>

    <div class="nav-links">
      <a href="/">Home</a>
      <a href="/dashboard">Current Dashboard</a>
      <a href="/stats">API Stats</a>
      <a href="/stats/history">History JSON</a>
    </div>

    <div class="summary-cards">
      <div class="summary-card">
        <div class="value">{{MONTHS_TRACKED}}</div>
        <div class="label">Months Tracked</div>
      </div>

      <div class="summary-card">
        <div class="value">{{TOTAL_OPENS}}</div>
        <div class="label">Total Opens</div>
      </div>

      <div class="summary-card">
        <div class="value">{{PEAK_OPENS}}</div>
        <div class="label">Peak Month Opens</div>
      </div>

      <div class="summary-card">
        <div class="value">{{AVG_PER_MONTH}}</div>
        <div class="label">Avg Opens/Month</div>
      </div>
    </div>

    <div class="chart-container">
      <h2>Monthly Opens Trend</h2>
      <div class="simple-chart">
        {{CHART_BARS}}
      </div>
    </div>

    <div class="table-container">
      <h2>Monthly Comparison Table</h2>
      <table>
        <thead>
          <tr>
            <th>Month</th>
            <th>Total Opens</th>
            <th>Unique Users</th>
            <th>Newsletters</th>
            <th>Avg Opens/User</th>
            <th>Growth</th>
          </tr>
        </thead>
        <tbody>
          {{TABLE_ROWS}}
        </tbody>
      </table>
    </div>

    <div class="footer">
      <p>Data range: {{DATA_RANGE}}</p>
      <p>Last updated: {{UPDATED}}</p>
    </div>
  </div>
</body>
</html>
"#;

const HISTORY_EMPTY_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Historical Analytics</title>
  <style>
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
      background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
      min-height: 100vh;
      display: flex;
      justify-content: center;
      align-items: center;
      padding: 20px;
    }

    .container {
      background: white;
      padding: 40px;
      border-radius: 10px;
      text-align: center;
      box-shadow: 0 4px 6px rgba(0,0,0,0.1);
    }

    h1 {
      color: #2c3e50;
    }

    p {
      color: #666;
      margin: 20px 0;
    }

    a {
      display: inline-block;
      background: #667eea;
      color: white;
      padding: 12px 24px;
      border-radius: 5px;
      text-decoration: none;
    }

    a:hover {
      background: #5568d3;
    }
  </style>
</head>
<body>
  <div class="container">
    <h1>No Historical Data</h1>
    <p>Start tracking emails to see monthly trends and comparisons!</p>
    <a href="/dashboard">Go to Dashboard</a>
  </div>
</body>
</html>
"#;

const RESET_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Reset Complete</title>
  <style>
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
      display: flex;
      justify-content: center;
      align-items: center;
      height: 100vh;
      margin: 0;
      background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
    }

    .container {
      background: white;
      padding: 40px;
      border-radius: 10px;
      box-shadow: 0 4px 6px rgba(0,0,0,0.1);
      text-align: center;
      max-width: 500px;
    }

    h1 {
      color: #2c3e50;
      margin-bottom: 20px;
    }

    p {
      color: #666;
      margin-bottom: 30px;
    }

    a {
      display: inline-block;
      background: #667eea;
      color: white;
      padding: 12px 24px;
      border-radius: 5px;
      text-decoration: none;
      margin: 5px;
    }

    a:hover {
      background: #5568d3;
    }
  </style>
</head>
<body>
  <div class="container">
    <h1>Tracking Data Reset</h1>
    <p>All tracking data has been cleared successfully!</p>
    <p><small>Timestamp: {{TIMESTAMP}}</small></p>
    <div>
      <a href="/dashboard">View Dashboard</a>
      <a href="/stats">View Stats</a>
      <a href="/">Home</a>
    </div>
  </div>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::history_stats;
    use chrono::Utc;

    fn event(email: &str, newsletter: &str, timestamp: &str) -> OpenEvent {
        OpenEvent {
            email: email.to_string(),
            user: "Test User".to_string(),
            newsletter: newsletter.to_string(),
            timestamp: timestamp.parse().unwrap(),
            ip: "10.0.0.1".to_string(),
            user_agent: "test-agent".to_string(),
        }
    }

    #[test]
    fn dashboard_without_data_shows_empty_state() {
        let html = render_dashboard(&[]);
        assert!(html.contains("No tracking data yet"));
        assert!(html.contains(">0<"));
    }

    #[test]
    fn dashboard_lists_recent_opens_newest_first() {
        let events = vec![
            event("old@co.com", "jan-2025", "2025-01-01T09:00:00Z"),
            event("new@co.com", "feb-2025", "2025-02-01T09:00:00Z"),
        ];
        let html = render_dashboard(&events);
        let newest = html.find("new@co.com").unwrap();
        let oldest = html.find("old@co.com").unwrap();
        assert!(newest < oldest);
    }

    #[test]
    fn dashboard_escapes_markup_in_event_fields() {
        let events = vec![event("<script>@co.com", "jan-2025", "2025-01-01T09:00:00Z")];
        let html = render_dashboard(&events);
        assert!(!html.contains("<script>@co.com"));
        assert!(html.contains("&lt;script&gt;@co.com"));
    }

    #[test]
    fn history_without_data_renders_empty_page() {
        let report = history_stats(&[]);
        let html = render_history(&report);
        assert!(html.contains("No Historical Data"));
    }

    #[test]
    fn history_table_marks_growth_and_decline() {
        let mut events = Vec::new();
        for i in 0..10 {
            events.push(event(
                &format!("u{i}@co.com"),
                "n",
                &format!("2025-01-{:02}T09:00:00Z", i + 1),
            ));
        }
        for i in 0..20 {
            events.push(event(
                &format!("u{i}@co.com"),
                "n",
                &format!("2025-02-{:02}T09:00:00Z", i + 1),
            ));
        }
        let report = history_stats(&events);
        let html = render_history(&report);
        assert!(html.contains("↑ 100.0%"));
        assert!(html.contains(r#"<span class="growth neutral">━</span>"#));
    }

    #[test]
    fn reset_page_carries_the_timestamp() {
        let now = Utc::now();
        let html = render_reset(now);
        assert!(html.contains(&now.to_rfc3339_opts(SecondsFormat::Secs, true)));
    }
}
