// Gap-filling policy applied to a merged host record before unit conversion.

use super::merge::HostRecord;

pub const UNKNOWN: &str = "unknown";

/// Record with every field resolved, still in raw units (bytes, bytes/s, percent).
#[derive(Debug, Clone, PartialEq)]
pub struct FilledRecord {
    pub os_type: String,
    pub ip_address: String,
    pub cpu_cores: f64,
    pub cpu_usage: f64,
    pub ram_total_bytes: f64,
    pub ram_used_bytes: f64,
    pub storage_total_bytes: f64,
    pub storage_used_bytes: f64,
    pub network_in_bytes_per_sec: f64,
    pub network_out_bytes_per_sec: f64,
}

/// Absent fields become 0 or "unknown". Optionally, absent used RAM is estimated as a
/// fraction of total RAM; that value is a placeholder, not a measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillPolicy {
    ram_used_fallback_ratio: Option<f64>,
}

impl Default for FillPolicy {
    fn default() -> Self {
        Self::with_ram_used_estimate(Self::DEFAULT_RAM_USED_RATIO)
    }
}

impl FillPolicy {
    pub const DEFAULT_RAM_USED_RATIO: f64 = 0.5;

    /// Never synthesizes values.
    pub const fn measured_only() -> Self {
        Self {
            ram_used_fallback_ratio: None,
        }
    }

    pub const fn with_ram_used_estimate(ratio: f64) -> Self {
        Self {
            ram_used_fallback_ratio: Some(ratio),
        }
    }

    pub fn ram_used_fallback_ratio(&self) -> Option<f64> {
        self.ram_used_fallback_ratio
    }

    /// Used RAM in bytes: the measurement when present, else the estimate when total RAM
    /// is known and positive, else 0.
    pub fn ram_used_bytes(&self, measured: Option<f64>, total: Option<f64>) -> f64 {
        match (measured, total, self.ram_used_fallback_ratio) {
            (Some(used), _, _) => used,
            (None, Some(total), Some(ratio)) if total > 0.0 => total * ratio,
            _ => 0.0,
        }
    }

    pub fn fill(&self, record: &HostRecord) -> FilledRecord {
        let meta = &record.metadata;
        let live = &record.live;
        FilledRecord {
            os_type: meta.os_type.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            ip_address: meta
                .ip_address
                .clone()
                .unwrap_or_else(|| UNKNOWN.to_string()),
            cpu_cores: meta.cpu_cores.unwrap_or(0.0),
            cpu_usage: live.cpu_usage_percent.unwrap_or(0.0),
            ram_total_bytes: meta.ram_total_bytes.unwrap_or(0.0),
            ram_used_bytes: self.ram_used_bytes(live.ram_used_bytes, meta.ram_total_bytes),
            storage_total_bytes: meta.storage_total_bytes.unwrap_or(0.0),
            storage_used_bytes: live.storage_used_bytes.unwrap_or(0.0),
            network_in_bytes_per_sec: record.network.in_bytes_per_sec.unwrap_or(0.0),
            network_out_bytes_per_sec: record.network.out_bytes_per_sec.unwrap_or(0.0),
        }
    }
}
