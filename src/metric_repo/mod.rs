// SQLite metric store. One metric_points table; the three snapshot fetches run inside one
// read transaction so they observe a single consistent state.

mod query;

use crate::models::{HostSeriesBatch, LiveField, MetaField, MetricPoint, MetricValue};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::collections::BTreeSet;
use std::path::Path;
use std::str::FromStr;
use tracing::instrument;

/// Lower bounds (epoch ms, inclusive) of each fetch window; all windows end at `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    pub now: i64,
    pub metadata_from: i64,
    pub live_from: i64,
    pub network_from: i64,
}

pub struct MetricRepo {
    pool: SqlitePool,
}

impl MetricRepo {
    pub async fn connect(path: &str, max_pool_size: u32) -> anyhow::Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5))
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_pool_size)
            .connect_with(opts)
            .await?;
        Ok(Self { pool })
    }

    pub async fn init(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS metric_points (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                host TEXT NOT NULL,
                measurement TEXT NOT NULL,
                field TEXT NOT NULL,
                tags TEXT NOT NULL DEFAULT '{}',
                created_at INTEGER NOT NULL,
                value_num REAL,
                value_text TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_points_host_created_at ON metric_points(host, created_at)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_points_series_created_at ON metric_points(measurement, field, created_at)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Writes points in one transaction. Used by fixtures and tooling; the dashboard itself only reads.
    #[instrument(skip(self, points), fields(repo = "metrics", operation = "insert_points", points_count = points.len()))]
    pub async fn insert_points(&self, points: &[MetricPoint]) -> anyhow::Result<()> {
        if points.is_empty() {
            return Ok(());
        }
        let mut tx = self.pool.begin().await?;
        for p in points {
            let tags = serde_json::to_string(&p.tags)?;
            let (value_num, value_text) = match &p.value {
                MetricValue::Float(v) => (Some(*v), None),
                MetricValue::Text(s) => (None, Some(s.as_str())),
            };
            sqlx::query(
                "INSERT INTO metric_points (host, measurement, field, tags, created_at, value_num, value_text) VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(&p.host)
            .bind(&p.measurement)
            .bind(&p.field)
            .bind(&tags)
            .bind(p.timestamp)
            .bind(value_num)
            .bind(value_text)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Distinct hosts with any point in [from_ts, to_ts].
    #[instrument(skip(self), fields(repo = "metrics", operation = "distinct_hosts"))]
    pub async fn distinct_hosts(&self, from_ts: i64, to_ts: i64) -> anyhow::Result<BTreeSet<String>> {
        let hosts = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT host FROM metric_points WHERE created_at >= $1 AND created_at <= $2",
        )
        .bind(from_ts)
        .bind(to_ts)
        .fetch_all(&self.pool)
        .await?;
        Ok(hosts.into_iter().collect())
    }

    /// Composite read for the given hosts: latest metadata, latest live gauges and
    /// per-timestamp network counter sums, each over its own window.
    #[instrument(skip(self, hosts), fields(repo = "metrics", operation = "fetch_host_series", hosts_count = hosts.len()))]
    pub async fn fetch_host_series(
        &self,
        hosts: &[String],
        bounds: WindowBounds,
    ) -> anyhow::Result<HostSeriesBatch> {
        if hosts.is_empty() {
            return Ok(HostSeriesBatch::default());
        }
        let mut tx = self.pool.begin().await?;
        let metadata =
            query::latest_samples::<MetaField>(&mut *tx, hosts, bounds.metadata_from, bounds.now)
                .await?;
        let live =
            query::latest_samples::<LiveField>(&mut *tx, hosts, bounds.live_from, bounds.now).await?;
        let network = query::counter_sums(&mut *tx, hosts, bounds.network_from, bounds.now).await?;
        tx.commit().await?;
        Ok(HostSeriesBatch {
            metadata,
            live,
            network,
        })
    }

    /// Closes the pool; later queries fail.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
