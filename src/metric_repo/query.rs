// Query builders for the composite read: series filters, host scoping, latest-per-series
// reduction and per-timestamp counter sums. Row parsing stays here too.

use crate::models::{
    CounterSum, LOOPBACK_INTERFACE, LatestSample, MetricValue, NetDirection, SeriesKind,
    SeriesSelector, TAG_INTERFACE,
};
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite};

/// Latest sample per (host, measurement, field) for every series of `K` in [from_ts, to_ts].
/// Equal timestamps resolve to the row inserted last.
pub(super) async fn latest_samples<K: SeriesKind>(
    conn: &mut SqliteConnection,
    hosts: &[String],
    from_ts: i64,
    to_ts: i64,
) -> anyhow::Result<Vec<LatestSample<K>>> {
    let selectors: Vec<SeriesSelector> = K::ALL.iter().map(|k| k.selector()).collect();

    let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new(
        "SELECT host, measurement, field, value_num, value_text, created_at FROM (
            SELECT host, measurement, field, value_num, value_text, created_at,
                   ROW_NUMBER() OVER (
                       PARTITION BY host, measurement, field
                       ORDER BY created_at DESC, id DESC
                   ) AS rn
            FROM metric_points WHERE created_at >= ",
    );
    qb.push_bind(from_ts);
    qb.push(" AND created_at <= ");
    qb.push_bind(to_ts);
    push_selector_filter(&mut qb, &selectors);
    push_host_filter(&mut qb, hosts);
    qb.push(") WHERE rn = 1 ORDER BY host, measurement, field");

    let rows = qb.build().fetch_all(&mut *conn).await?;
    let mut out = Vec::with_capacity(rows.len());
    for row in &rows {
        if let Some(sample) = parse_latest_row::<K>(row)? {
            out.push(sample);
        }
    }
    Ok(out)
}

/// Network byte counters summed across all interfaces except loopback, one row per
/// (host, direction, timestamp), ascending by time.
pub(super) async fn counter_sums(
    conn: &mut SqliteConnection,
    hosts: &[String],
    from_ts: i64,
    to_ts: i64,
) -> anyhow::Result<Vec<CounterSum>> {
    let selectors: Vec<SeriesSelector> = NetDirection::ALL.iter().map(|d| d.selector()).collect();

    let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new(
        "SELECT host, measurement, field, created_at, SUM(value_num) AS bytes
         FROM metric_points WHERE created_at >= ",
    );
    qb.push_bind(from_ts);
    qb.push(" AND created_at <= ");
    qb.push_bind(to_ts);
    push_selector_filter(&mut qb, &selectors);
    qb.push(" AND COALESCE(json_extract(tags, ");
    qb.push_bind(tag_path(TAG_INTERFACE));
    qb.push("), '') <> ");
    qb.push_bind(LOOPBACK_INTERFACE);
    push_host_filter(&mut qb, hosts);
    qb.push(" GROUP BY host, measurement, field, created_at ORDER BY host, field, created_at");

    let rows = qb.build().fetch_all(&mut *conn).await?;
    let mut out = Vec::with_capacity(rows.len());
    for row in &rows {
        let measurement: String = row.try_get("measurement")?;
        let field: String = row.try_get("field")?;
        let Some(direction) = NetDirection::from_series(&measurement, &field) else {
            continue;
        };
        let Some(bytes) = row.try_get::<Option<f64>, _>("bytes")? else {
            continue;
        };
        out.push(CounterSum {
            host: row.try_get("host")?,
            direction,
            timestamp: row.try_get("created_at")?,
            bytes,
        });
    }
    Ok(out)
}

/// Appends `AND ((measurement = ? AND field = ? [AND tag = ?]) OR ...)`.
fn push_selector_filter(qb: &mut QueryBuilder<'_, Sqlite>, selectors: &[SeriesSelector]) {
    qb.push(" AND (");
    for (i, sel) in selectors.iter().enumerate() {
        if i > 0 {
            qb.push(" OR ");
        }
        qb.push("(measurement = ");
        qb.push_bind(sel.measurement);
        qb.push(" AND field = ");
        qb.push_bind(sel.field);
        if let Some(tag) = sel.tag {
            qb.push(" AND json_extract(tags, ");
            qb.push_bind(tag_path(tag.key));
            qb.push(") = ");
            qb.push_bind(tag.value);
        }
        qb.push(")");
    }
    qb.push(")");
}

fn push_host_filter<'args>(qb: &mut QueryBuilder<'args, Sqlite>, hosts: &'args [String]) {
    qb.push(" AND host IN (");
    let mut separated = qb.separated(", ");
    for host in hosts {
        separated.push_bind(host.as_str());
    }
    separated.push_unseparated(")");
}

fn tag_path(key: &str) -> String {
    format!("$.{}", key)
}

fn parse_latest_row<K: SeriesKind>(row: &SqliteRow) -> anyhow::Result<Option<LatestSample<K>>> {
    let measurement: String = row.try_get("measurement")?;
    let field: String = row.try_get("field")?;
    let Some(kind) = K::from_series(&measurement, &field) else {
        return Ok(None);
    };
    let value_num: Option<f64> = row.try_get("value_num")?;
    let value_text: Option<String> = row.try_get("value_text")?;
    let value = match (value_num, value_text) {
        (Some(v), _) => MetricValue::Float(v),
        (None, Some(s)) => MetricValue::Text(s),
        (None, None) => return Ok(None),
    };
    Ok(Some(LatestSample {
        host: row.try_get("host")?,
        kind,
        value,
        timestamp: row.try_get("created_at")?,
    }))
}
