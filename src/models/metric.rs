// Raw metric points as stored in the time-series table

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Scalar carried by a point: numeric gauges/counters or string metadata (OS, IP).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Float(f64),
    Text(String),
}

impl MetricValue {
    /// Numeric view; text values are parsed, unparseable text yields None.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Float(v) => Some(*v),
            MetricValue::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            MetricValue::Float(v) => v.to_string(),
            MetricValue::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Float(v)
    }
}

impl From<&str> for MetricValue {
    fn from(s: &str) -> Self {
        MetricValue::Text(s.to_string())
    }
}

/// One timestamped scalar. `timestamp` is epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricPoint {
    pub host: String,
    pub measurement: String,
    pub field: String,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    pub timestamp: i64,
    pub value: MetricValue,
}

impl MetricPoint {
    pub fn new(
        host: impl Into<String>,
        measurement: impl Into<String>,
        field: impl Into<String>,
        timestamp: i64,
        value: impl Into<MetricValue>,
    ) -> Self {
        Self {
            host: host.into(),
            measurement: measurement.into(),
            field: field.into(),
            tags: BTreeMap::new(),
            timestamp,
            value: value.into(),
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}
