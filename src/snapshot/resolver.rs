// Host discovery for the fleet path: every host with any point inside the discovery window.

use crate::error::SnapshotError;
use crate::metric_repo::MetricRepo;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub struct HostResolver {
    repo: Arc<MetricRepo>,
    window: Duration,
}

impl HostResolver {
    pub fn new(repo: Arc<MetricRepo>, window: Duration) -> Self {
        Self { repo, window }
    }

    /// Empty when nothing reported recently; that is not an error.
    pub async fn resolve_hosts(&self) -> Result<BTreeSet<String>, SnapshotError> {
        let now = chrono::Utc::now().timestamp_millis();
        self.resolve_hosts_at(now).await
    }

    pub async fn resolve_hosts_at(&self, now_ms: i64) -> Result<BTreeSet<String>, SnapshotError> {
        let from = now_ms - self.window.as_millis() as i64;
        let hosts = self.repo.distinct_hosts(from, now_ms).await?;
        debug!(hosts_count = hosts.len(), "resolved hosts");
        Ok(hosts)
    }
}
