// Config loading and validation tests

use hostwatch::config::AppConfig;
use hostwatch::snapshot::{FillPolicy, QueryWindows};
use std::time::Duration;

const VALID_CONFIG: &str = r#"
[server]
port = 8081
host = "0.0.0.0"

[database]
path = "data/metrics.db"
max_pool_size = 10
"#;

const VALID_CONFIG_WITH_WINDOWS: &str = r#"
[server]
port = 8081
host = "0.0.0.0"

[database]
path = "data/metrics.db"
max_pool_size = 10

[windows]
discovery_hours = 12
metadata_days = 7
live_secs = 120
network_secs = 60

[policy]
synthesize_ram_used = true
ram_used_fallback_ratio = 0.25
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.server.port, 8081);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.database.path, "data/metrics.db");
    assert_eq!(config.database.max_pool_size, 10);
}

#[test]
fn test_config_window_defaults_when_omitted() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("valid");
    assert_eq!(config.windows.discovery_hours, 24);
    assert_eq!(config.windows.metadata_days, 30);
    assert_eq!(config.windows.live_secs, 300);
    assert_eq!(config.windows.network_secs, 120);
    assert_eq!(QueryWindows::from(&config.windows), QueryWindows::default());
}

#[test]
fn test_config_policy_defaults_to_half_ram_estimate() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("valid");
    assert!(config.policy.synthesize_ram_used);
    assert_eq!(config.policy.fill_policy(), FillPolicy::default());
    assert_eq!(config.policy.fill_policy().ram_used_fallback_ratio(), Some(0.5));
}

#[test]
fn test_config_loads_with_windows_and_policy() {
    let config = AppConfig::load_from_str(VALID_CONFIG_WITH_WINDOWS).expect("valid");
    let windows = QueryWindows::from(&config.windows);
    assert_eq!(windows.discovery, Duration::from_secs(12 * 3600));
    assert_eq!(windows.metadata, Duration::from_secs(7 * 24 * 3600));
    assert_eq!(windows.live, Duration::from_secs(120));
    assert_eq!(windows.network, Duration::from_secs(60));
    assert_eq!(config.policy.fill_policy().ram_used_fallback_ratio(), Some(0.25));
}

#[test]
fn test_config_policy_can_disable_ram_estimate() {
    let cfg = VALID_CONFIG_WITH_WINDOWS
        .replace("synthesize_ram_used = true", "synthesize_ram_used = false");
    let config = AppConfig::load_from_str(&cfg).expect("valid");
    assert_eq!(config.policy.fill_policy(), FillPolicy::measured_only());
}

#[test]
fn test_config_validation_rejects_invalid_port() {
    let bad = VALID_CONFIG.replace("port = 8081", "port = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.port"));
}

#[test]
fn test_config_validation_rejects_empty_db_path() {
    let bad = VALID_CONFIG.replace("path = \"data/metrics.db\"", "path = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("database.path"));
}

#[test]
fn test_config_validation_rejects_max_pool_size_zero() {
    let bad = VALID_CONFIG.replace("max_pool_size = 10", "max_pool_size = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("max_pool_size"));
}

#[test]
fn test_config_validation_rejects_live_window_zero() {
    let bad = VALID_CONFIG_WITH_WINDOWS.replace("live_secs = 120", "live_secs = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("windows.live_secs"));
}

#[test]
fn test_config_validation_rejects_network_window_zero() {
    let bad = VALID_CONFIG_WITH_WINDOWS.replace("network_secs = 60", "network_secs = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("windows.network_secs"));
}

#[test]
fn test_config_validation_rejects_discovery_window_zero() {
    let bad = VALID_CONFIG_WITH_WINDOWS.replace("discovery_hours = 12", "discovery_hours = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("windows.discovery_hours"));
}

#[test]
fn test_config_validation_rejects_oversized_windows() {
    let bad = VALID_CONFIG_WITH_WINDOWS.replace("metadata_days = 7", "metadata_days = 100000");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("windows.metadata_days"));

    let bad = VALID_CONFIG_WITH_WINDOWS.replace("network_secs = 60", "network_secs = 86401");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("windows.network_secs"));

    let bad = VALID_CONFIG_WITH_WINDOWS.replace("discovery_hours = 12", "discovery_hours = 1000000");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("windows.discovery_hours"));
}

#[test]
fn test_query_windows_saturate_instead_of_wrapping() {
    let windows = QueryWindows {
        discovery: Duration::MAX,
        metadata: Duration::MAX,
        live: Duration::from_secs(u64::MAX),
        network: Duration::from_secs(60),
    };
    let bounds = windows.bounds(1_000);
    assert_eq!(bounds.metadata_from, 1_000 - i64::MAX);
    assert_eq!(bounds.live_from, 1_000 - i64::MAX);
    assert_eq!(bounds.network_from, 1_000 - 60_000);
}

#[test]
fn test_config_validation_rejects_ratio_out_of_range() {
    let bad = VALID_CONFIG_WITH_WINDOWS.replace(
        "ram_used_fallback_ratio = 0.25",
        "ram_used_fallback_ratio = 1.5",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("ram_used_fallback_ratio"));
}

#[test]
fn test_config_validation_rejects_invalid_toml() {
    let err = AppConfig::load_from_str("not valid toml [[[").unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_config_load_from_file_via_env() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();
    unsafe { std::env::set_var("CONFIG_FILE", path.to_str().unwrap()) };
    let result = AppConfig::load();
    unsafe { std::env::remove_var("CONFIG_FILE") };
    let config = result.expect("load from CONFIG_FILE");
    assert_eq!(config.server.port, 8081);
    assert_eq!(config.database.path, "data/metrics.db");
}
