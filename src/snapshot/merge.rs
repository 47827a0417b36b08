// Merge of the three fetch categories into one typed record per host.
// Each category keeps its own sub-record, so mem/disk `total` and `used` land in
// distinct fields by construction.

use super::rate;
use crate::models::{HostSeriesBatch, LiveField, MetaField, NetDirection};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataRecord {
    pub os_type: Option<String>,
    pub ip_address: Option<String>,
    pub cpu_cores: Option<f64>,
    pub ram_total_bytes: Option<f64>,
    pub storage_total_bytes: Option<f64>,
    /// Most recent timestamp among the metadata samples (epoch ms).
    pub sampled_at: Option<i64>,
}

impl MetadataRecord {
    pub fn is_present(&self) -> bool {
        self.sampled_at.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiveRecord {
    /// Aggregate utilization across all cores, 0..=100.
    pub cpu_usage_percent: Option<f64>,
    pub ram_used_bytes: Option<f64>,
    pub storage_used_bytes: Option<f64>,
}

impl LiveRecord {
    pub fn is_present(&self) -> bool {
        self.cpu_usage_percent.is_some()
            || self.ram_used_bytes.is_some()
            || self.storage_used_bytes.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkRecord {
    pub in_bytes_per_sec: Option<f64>,
    pub out_bytes_per_sec: Option<f64>,
}

impl NetworkRecord {
    pub fn is_present(&self) -> bool {
        self.in_bytes_per_sec.is_some() || self.out_bytes_per_sec.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostRecord {
    pub metadata: MetadataRecord,
    pub live: LiveRecord,
    pub network: NetworkRecord,
}

impl HostRecord {
    /// At least one category has data.
    pub fn has_any(&self) -> bool {
        self.metadata.is_present() || self.live.is_present() || self.network.is_present()
    }

    /// Every category has data (the single-host join).
    pub fn is_complete(&self) -> bool {
        self.metadata.is_present() && self.live.is_present() && self.network.is_present()
    }

    /// Online iff any live gauge or network rate fell inside its window.
    pub fn is_online(&self) -> bool {
        self.live.is_present() || self.network.is_present()
    }
}

/// Folds a composite read into per-host records, keyed and ordered by host id.
pub fn merge(batch: HostSeriesBatch) -> BTreeMap<String, HostRecord> {
    let mut records: BTreeMap<String, HostRecord> = BTreeMap::new();

    for sample in batch.metadata {
        let meta = &mut records.entry(sample.host).or_default().metadata;
        match sample.kind {
            MetaField::OsType => meta.os_type = Some(sample.value.to_text()),
            MetaField::IpAddress => meta.ip_address = Some(sample.value.to_text()),
            MetaField::CpuCores => meta.cpu_cores = sample.value.as_f64(),
            MetaField::RamTotal => meta.ram_total_bytes = sample.value.as_f64(),
            MetaField::StorageTotal => meta.storage_total_bytes = sample.value.as_f64(),
        }
        meta.sampled_at = Some(
            meta.sampled_at
                .map_or(sample.timestamp, |t| t.max(sample.timestamp)),
        );
    }

    let mut cpu_idle: BTreeMap<String, f64> = BTreeMap::new();
    for sample in batch.live {
        let Some(value) = sample.value.as_f64() else {
            continue;
        };
        match sample.kind {
            LiveField::CpuIdle => {
                cpu_idle.insert(sample.host, value);
            }
            LiveField::CpuActive => {
                records.entry(sample.host).or_default().live.cpu_usage_percent =
                    Some(value.clamp(0.0, 100.0));
            }
            LiveField::RamUsed => {
                records.entry(sample.host).or_default().live.ram_used_bytes = Some(value);
            }
            LiveField::StorageUsed => {
                records.entry(sample.host).or_default().live.storage_used_bytes = Some(value);
            }
        }
    }
    // usage_active wins; idle-derived usage only fills hosts that lack it
    for (host, idle) in cpu_idle {
        let live = &mut records.entry(host).or_default().live;
        if live.cpu_usage_percent.is_none() {
            live.cpu_usage_percent = Some((100.0 - idle).clamp(0.0, 100.0));
        }
    }

    let mut counters: BTreeMap<(String, NetDirection), Vec<(i64, f64)>> = BTreeMap::new();
    for sum in batch.network {
        counters
            .entry((sum.host, sum.direction))
            .or_default()
            .push((sum.timestamp, sum.bytes));
    }
    for ((host, direction), mut samples) in counters {
        samples.sort_by_key(|&(ts, _)| ts);
        let Some(rate) = rate::latest_rate(&samples) else {
            continue;
        };
        let network = &mut records.entry(host).or_default().network;
        match direction {
            NetDirection::In => network.in_bytes_per_sec = Some(rate),
            NetDirection::Out => network.out_bytes_per_sec = Some(rate),
        }
    }

    records
}
