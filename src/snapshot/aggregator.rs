// Snapshot aggregation shared by the single-host and fleet paths.

use super::merge::{self, HostRecord};
use super::policy::FillPolicy;
use super::resolver::HostResolver;
use super::units::{bytes_to_gb, bytes_to_mb};
use super::{Cardinality, QueryWindows};
use crate::error::SnapshotError;
use crate::metric_repo::MetricRepo;
use crate::models::{HostSnapshot, HostStatus};
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::debug;

pub struct SnapshotAggregator {
    repo: Arc<MetricRepo>,
    resolver: HostResolver,
    windows: QueryWindows,
    policy: FillPolicy,
}

impl SnapshotAggregator {
    pub fn new(repo: Arc<MetricRepo>, windows: QueryWindows, policy: FillPolicy) -> Self {
        Self {
            resolver: HostResolver::new(repo.clone(), windows.discovery),
            repo,
            windows,
            policy,
        }
    }

    pub fn resolver(&self) -> &HostResolver {
        &self.resolver
    }

    /// Snapshot for one host. Requires metadata, live and network data inside their windows.
    pub async fn aggregate_one(&self, host_id: &str) -> Result<HostSnapshot, SnapshotError> {
        if host_id.trim().is_empty() {
            return Err(SnapshotError::Validation(
                "Instance ID (hostname) is required".into(),
            ));
        }
        let hosts = [host_id.to_string()];
        self.aggregate(&hosts, Cardinality::One)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| SnapshotError::NotFound {
                host_id: host_id.to_string(),
            })
    }

    /// Snapshots for every host in `host_ids` with data in at least one category.
    pub async fn aggregate_many(
        &self,
        host_ids: &BTreeSet<String>,
    ) -> Result<Vec<HostSnapshot>, SnapshotError> {
        let hosts: Vec<String> = host_ids.iter().cloned().collect();
        self.aggregate(&hosts, Cardinality::Many).await
    }

    /// Discovery followed by `aggregate_many`.
    pub async fn aggregate_fleet(&self) -> Result<Vec<HostSnapshot>, SnapshotError> {
        let hosts = self.resolver.resolve_hosts().await?;
        self.aggregate_many(&hosts).await
    }

    async fn aggregate(
        &self,
        hosts: &[String],
        cardinality: Cardinality,
    ) -> Result<Vec<HostSnapshot>, SnapshotError> {
        let now = Utc::now();
        let bounds = self.windows.bounds(now.timestamp_millis());
        let batch = self.repo.fetch_host_series(hosts, bounds).await?;
        let records = merge::merge(batch);
        let snapshots = build_snapshots(records, cardinality, &self.policy, now);
        debug!(
            requested = hosts.len(),
            returned = snapshots.len(),
            ?cardinality,
            "aggregated snapshots"
        );
        Ok(snapshots)
    }
}

/// Turns merged records into snapshots.
///
/// `Cardinality::One` keeps only complete records and never synthesizes values;
/// `Cardinality::Many` keeps any record with data and applies `policy`.
pub fn build_snapshots(
    records: BTreeMap<String, HostRecord>,
    cardinality: Cardinality,
    policy: &FillPolicy,
    now: DateTime<Utc>,
) -> Vec<HostSnapshot> {
    let last_updated = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    records
        .into_iter()
        .filter(|(_, record)| match cardinality {
            Cardinality::One => record.is_complete(),
            Cardinality::Many => record.has_any(),
        })
        .map(|(host, record)| {
            let policy = match cardinality {
                Cardinality::One => FillPolicy::measured_only(),
                Cardinality::Many => *policy,
            };
            to_snapshot(host, &record, &policy, &last_updated)
        })
        .collect()
}

fn to_snapshot(
    host: String,
    record: &HostRecord,
    policy: &FillPolicy,
    last_updated: &str,
) -> HostSnapshot {
    let filled = policy.fill(record);
    HostSnapshot {
        id: host.clone(),
        name: host,
        status: if record.is_online() {
            HostStatus::Online
        } else {
            HostStatus::Offline
        },
        os_type: filled.os_type,
        ip_address: filled.ip_address,
        cpu_cores: filled.cpu_cores.max(0.0).round() as u32,
        cpu_usage: filled.cpu_usage,
        ram_total: bytes_to_mb(filled.ram_total_bytes),
        ram_used: bytes_to_mb(filled.ram_used_bytes),
        storage_total: bytes_to_gb(filled.storage_total_bytes),
        storage_used: bytes_to_gb(filled.storage_used_bytes),
        network_in: bytes_to_mb(filled.network_in_bytes_per_sec),
        network_out: bytes_to_mb(filled.network_out_bytes_per_sec),
        created_at: record
            .metadata
            .sampled_at
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
            .unwrap_or_default(),
        last_updated: last_updated.to_string(),
    }
}
