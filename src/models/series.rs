// Typed series selectors and the per-category rows returned by the composite read.
// Each snapshot input names exactly one (measurement, field, tag) series, so `mem.total`
// and `disk.total` never meet under a shared column name.

use super::MetricValue;

pub const TAG_CPU: &str = "cpu";
pub const TAG_PATH: &str = "path";
pub const TAG_INTERFACE: &str = "interface";

pub const CPU_TOTAL: &str = "cpu-total";
pub const ROOT_PATH: &str = "/";
pub const LOOPBACK_INTERFACE: &str = "lo";

/// Tag a series must carry, e.g. `cpu = "cpu-total"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagMatch {
    pub key: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesSelector {
    pub measurement: &'static str,
    pub field: &'static str,
    pub tag: Option<TagMatch>,
}

impl SeriesSelector {
    const fn new(measurement: &'static str, field: &'static str) -> Self {
        Self {
            measurement,
            field,
            tag: None,
        }
    }

    const fn tagged(self, key: &'static str, value: &'static str) -> Self {
        Self {
            tag: Some(TagMatch { key, value }),
            ..self
        }
    }

    pub fn matches(&self, measurement: &str, field: &str) -> bool {
        self.measurement == measurement && self.field == field
    }
}

/// A closed set of series read together in one fetch category.
pub trait SeriesKind: Copy + Sized + 'static {
    const ALL: &'static [Self];

    fn selector(self) -> SeriesSelector;

    /// Maps a stored (measurement, field) pair back to its typed kind.
    fn from_series(measurement: &str, field: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.selector().matches(measurement, field))
    }
}

/// Slowly changing host facts, read over the metadata window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetaField {
    OsType,
    IpAddress,
    CpuCores,
    RamTotal,
    StorageTotal,
}

impl SeriesKind for MetaField {
    const ALL: &'static [Self] = &[
        MetaField::OsType,
        MetaField::IpAddress,
        MetaField::CpuCores,
        MetaField::RamTotal,
        MetaField::StorageTotal,
    ];

    fn selector(self) -> SeriesSelector {
        match self {
            MetaField::OsType => SeriesSelector::new("system_meta", "os_type"),
            MetaField::IpAddress => SeriesSelector::new("system_meta", "ip_address"),
            MetaField::CpuCores => SeriesSelector::new("system", "n_cpus"),
            MetaField::RamTotal => SeriesSelector::new("mem", "total"),
            MetaField::StorageTotal => {
                SeriesSelector::new("disk", "total").tagged(TAG_PATH, ROOT_PATH)
            }
        }
    }
}

/// Utilization gauges, read over the live window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LiveField {
    CpuActive,
    CpuIdle,
    RamUsed,
    StorageUsed,
}

impl SeriesKind for LiveField {
    const ALL: &'static [Self] = &[
        LiveField::CpuActive,
        LiveField::CpuIdle,
        LiveField::RamUsed,
        LiveField::StorageUsed,
    ];

    fn selector(self) -> SeriesSelector {
        match self {
            LiveField::CpuActive => {
                SeriesSelector::new("cpu", "usage_active").tagged(TAG_CPU, CPU_TOTAL)
            }
            LiveField::CpuIdle => SeriesSelector::new("cpu", "usage_idle").tagged(TAG_CPU, CPU_TOTAL),
            LiveField::RamUsed => SeriesSelector::new("mem", "used"),
            LiveField::StorageUsed => {
                SeriesSelector::new("disk", "used").tagged(TAG_PATH, ROOT_PATH)
            }
        }
    }
}

/// Network byte counters; summed over non-loopback interfaces before the rate is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NetDirection {
    In,
    Out,
}

impl SeriesKind for NetDirection {
    const ALL: &'static [Self] = &[NetDirection::In, NetDirection::Out];

    fn selector(self) -> SeriesSelector {
        match self {
            NetDirection::In => SeriesSelector::new("net", "bytes_recv"),
            NetDirection::Out => SeriesSelector::new("net", "bytes_sent"),
        }
    }
}

/// Most recent sample of one series for one host.
#[derive(Debug, Clone, PartialEq)]
pub struct LatestSample<K> {
    pub host: String,
    pub kind: K,
    pub value: MetricValue,
    pub timestamp: i64,
}

/// A counter summed across interfaces at one timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterSum {
    pub host: String,
    pub direction: NetDirection,
    pub timestamp: i64,
    pub bytes: f64,
}

/// Output of one composite read: the three categories, each in its own window.
/// `network` is ordered by (host, direction, timestamp).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostSeriesBatch {
    pub metadata: Vec<LatestSample<MetaField>>,
    pub live: Vec<LatestSample<LiveField>>,
    pub network: Vec<CounterSum>,
}
