// Shared test helpers: throwaway metric store and point builders

#![allow(dead_code)]

use hostwatch::metric_repo::MetricRepo;
use hostwatch::models::MetricPoint;
use std::sync::Arc;
use tempfile::TempDir;

pub const MB: f64 = 1_048_576.0;
pub const GB: f64 = 1_073_741_824.0;

pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Fresh store in a temp dir; keep the TempDir alive for the test's duration.
pub async fn temp_repo() -> (TempDir, Arc<MetricRepo>) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("metrics.db");
    let repo = MetricRepo::connect(path.to_str().unwrap(), 2).await.unwrap();
    repo.init().await.unwrap();
    (dir, Arc::new(repo))
}

/// OS, IP, core count, total RAM and root-disk total at `ts`.
pub fn metadata_points(
    host: &str,
    ts: i64,
    os: &str,
    ip: &str,
    cores: f64,
    ram_total: f64,
    storage_total: f64,
) -> Vec<MetricPoint> {
    vec![
        MetricPoint::new(host, "system_meta", "os_type", ts, os),
        MetricPoint::new(host, "system_meta", "ip_address", ts, ip),
        MetricPoint::new(host, "system", "n_cpus", ts, cores),
        MetricPoint::new(host, "mem", "total", ts, ram_total),
        MetricPoint::new(host, "disk", "total", ts, storage_total).with_tag("path", "/"),
    ]
}

/// Aggregate CPU (usage_active), used RAM and used root storage at `ts`.
pub fn live_points(
    host: &str,
    ts: i64,
    cpu_active: f64,
    ram_used: f64,
    storage_used: f64,
) -> Vec<MetricPoint> {
    vec![
        MetricPoint::new(host, "cpu", "usage_active", ts, cpu_active).with_tag("cpu", "cpu-total"),
        MetricPoint::new(host, "mem", "used", ts, ram_used),
        MetricPoint::new(host, "disk", "used", ts, storage_used).with_tag("path", "/"),
    ]
}

/// Byte counters of one interface at `ts`.
pub fn net_points(host: &str, ts: i64, interface: &str, recv: f64, sent: f64) -> Vec<MetricPoint> {
    vec![
        MetricPoint::new(host, "net", "bytes_recv", ts, recv).with_tag("interface", interface),
        MetricPoint::new(host, "net", "bytes_sent", ts, sent).with_tag("interface", interface),
    ]
}

/// A host with all three categories: 16 GiB RAM (8 GiB used), 500 GiB root disk (250 used),
/// 4 cores at 42.5 %, eth0 receiving 1 MiB/s and sending 0.5 MiB/s.
pub fn complete_host(host: &str, now: i64) -> Vec<MetricPoint> {
    let mut points = metadata_points(
        host,
        now - 60 * 60 * 1000,
        "Ubuntu 22.04",
        "192.168.1.100",
        4.0,
        16.0 * GB,
        500.0 * GB,
    );
    points.extend(live_points(host, now - 30_000, 42.5, 8.0 * GB, 250.0 * GB));
    points.extend(net_points(host, now - 40_000, "eth0", 100.0 * MB, 50.0 * MB));
    points.extend(net_points(host, now - 30_000, "eth0", 110.0 * MB, 55.0 * MB));
    points
}
