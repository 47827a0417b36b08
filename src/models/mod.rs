// Domain models: raw points, typed series, host snapshots

mod metric;
mod series;
mod snapshot;

pub use metric::{MetricPoint, MetricValue};
pub use series::{
    CPU_TOTAL, CounterSum, HostSeriesBatch, LOOPBACK_INTERFACE, LatestSample, LiveField,
    MetaField, NetDirection, ROOT_PATH, SeriesKind, SeriesSelector, TAG_CPU, TAG_INTERFACE,
    TAG_PATH, TagMatch,
};
pub use snapshot::{HostSnapshot, HostStatus};
