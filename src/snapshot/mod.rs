// Host snapshot core: discovery, composite fetch, merge, gap filling, unit conversion.

mod aggregator;
pub mod merge;
pub mod policy;
pub mod rate;
mod resolver;
pub mod units;

pub use aggregator::{SnapshotAggregator, build_snapshots};
pub use merge::{HostRecord, LiveRecord, MetadataRecord, NetworkRecord};
pub use policy::{FillPolicy, FilledRecord};
pub use resolver::HostResolver;

use crate::config::WindowsConfig;
use crate::metric_repo::WindowBounds;
use std::time::Duration;

/// Entry cardinality of an aggregation: a single requested host or a discovered fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    One,
    Many,
}

/// Lookback of each fetch category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindows {
    pub discovery: Duration,
    pub metadata: Duration,
    pub live: Duration,
    pub network: Duration,
}

impl Default for QueryWindows {
    fn default() -> Self {
        Self {
            discovery: Duration::from_secs(24 * 60 * 60),
            metadata: Duration::from_secs(30 * 24 * 60 * 60),
            live: Duration::from_secs(5 * 60),
            network: Duration::from_secs(2 * 60),
        }
    }
}

impl QueryWindows {
    pub fn bounds(&self, now_ms: i64) -> WindowBounds {
        let since = |d: Duration| {
            now_ms.saturating_sub(i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
        };
        WindowBounds {
            now: now_ms,
            metadata_from: since(self.metadata),
            live_from: since(self.live),
            network_from: since(self.network),
        }
    }
}

impl From<&WindowsConfig> for QueryWindows {
    fn from(c: &WindowsConfig) -> Self {
        Self {
            discovery: Duration::from_secs(c.discovery_hours.saturating_mul(60 * 60)),
            metadata: Duration::from_secs(c.metadata_days.saturating_mul(24 * 60 * 60)),
            live: Duration::from_secs(c.live_secs),
            network: Duration::from_secs(c.network_secs),
        }
    }
}
