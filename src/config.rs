use serde::Deserialize;

use crate::snapshot::FillPolicy;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub windows: WindowsConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file holding the metric_points table.
    pub path: String,
    pub max_pool_size: u32,
}

/// Lookback windows for discovery and the three fetch categories.
#[derive(Debug, Clone, Deserialize)]
pub struct WindowsConfig {
    #[serde(default = "default_discovery_hours")]
    pub discovery_hours: u64,
    #[serde(default = "default_metadata_days")]
    pub metadata_days: u64,
    /// Live gauges older than this are stale and the host reads as offline.
    #[serde(default = "default_live_secs")]
    pub live_secs: u64,
    #[serde(default = "default_network_secs")]
    pub network_secs: u64,
}

impl Default for WindowsConfig {
    fn default() -> Self {
        Self {
            discovery_hours: default_discovery_hours(),
            metadata_days: default_metadata_days(),
            live_secs: default_live_secs(),
            network_secs: default_network_secs(),
        }
    }
}

const MAX_DISCOVERY_HOURS: u64 = 24 * 365;
const MAX_METADATA_DAYS: u64 = 10 * 365;
const MAX_LIVE_SECS: u64 = 24 * 60 * 60;
const MAX_NETWORK_SECS: u64 = 24 * 60 * 60;

fn default_discovery_hours() -> u64 {
    24
}

fn default_metadata_days() -> u64 {
    30
}

fn default_live_secs() -> u64 {
    300
}

fn default_network_secs() -> u64 {
    120
}

/// Gap filling for the fleet listing.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    /// Estimate missing used RAM from total RAM.
    #[serde(default = "default_synthesize_ram_used")]
    pub synthesize_ram_used: bool,
    #[serde(default = "default_ram_used_fallback_ratio")]
    pub ram_used_fallback_ratio: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            synthesize_ram_used: default_synthesize_ram_used(),
            ram_used_fallback_ratio: default_ram_used_fallback_ratio(),
        }
    }
}

fn default_synthesize_ram_used() -> bool {
    true
}

fn default_ram_used_fallback_ratio() -> f64 {
    FillPolicy::DEFAULT_RAM_USED_RATIO
}

impl PolicyConfig {
    pub fn fill_policy(&self) -> FillPolicy {
        if self.synthesize_ram_used {
            FillPolicy::with_ram_used_estimate(self.ram_used_fallback_ratio)
        } else {
            FillPolicy::measured_only()
        }
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.database.path.is_empty(),
            "database.path must be non-empty"
        );
        anyhow::ensure!(
            self.database.max_pool_size > 0,
            "database.max_pool_size must be > 0, got {}",
            self.database.max_pool_size
        );
        anyhow::ensure!(
            (1..=MAX_DISCOVERY_HOURS).contains(&self.windows.discovery_hours),
            "windows.discovery_hours must be within [1, {}], got {}",
            MAX_DISCOVERY_HOURS,
            self.windows.discovery_hours
        );
        anyhow::ensure!(
            (1..=MAX_METADATA_DAYS).contains(&self.windows.metadata_days),
            "windows.metadata_days must be within [1, {}], got {}",
            MAX_METADATA_DAYS,
            self.windows.metadata_days
        );
        anyhow::ensure!(
            (1..=MAX_LIVE_SECS).contains(&self.windows.live_secs),
            "windows.live_secs must be within [1, {}], got {}",
            MAX_LIVE_SECS,
            self.windows.live_secs
        );
        anyhow::ensure!(
            (1..=MAX_NETWORK_SECS).contains(&self.windows.network_secs),
            "windows.network_secs must be within [1, {}], got {}",
            MAX_NETWORK_SECS,
            self.windows.network_secs
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.policy.ram_used_fallback_ratio),
            "policy.ram_used_fallback_ratio must be within [0, 1], got {}",
            self.policy.ram_used_fallback_ratio
        );
        Ok(())
    }
}
