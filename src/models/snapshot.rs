// Display-ready host snapshot served by /instances

use serde::{Deserialize, Serialize};

/// Serializes to lowercase JSON ("online" / "offline").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostStatus {
    Online,
    Offline,
}

/// One merged, unit-converted record per host. RAM in MB, storage in GB, network in MB/s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostSnapshot {
    pub id: String,
    pub name: String,
    pub status: HostStatus,
    pub os_type: String,
    pub ip_address: String,
    pub cpu_cores: u32,
    pub cpu_usage: f64,
    pub ram_total: f64,
    pub ram_used: f64,
    pub storage_total: f64,
    pub storage_used: f64,
    pub network_in: f64,
    pub network_out: f64,
    /// Latest metadata sample time (RFC 3339), empty when no metadata exists.
    pub created_at: String,
    pub last_updated: String,
}
