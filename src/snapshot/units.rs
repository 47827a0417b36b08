// Byte unit conversions used by every snapshot field.

pub const BYTES_PER_MB: f64 = 1_048_576.0;
pub const BYTES_PER_GB: f64 = 1_073_741_824.0;

/// RAM and network rates.
pub fn bytes_to_mb(bytes: f64) -> f64 {
    bytes / BYTES_PER_MB
}

/// Storage.
pub fn bytes_to_gb(bytes: f64) -> f64 {
    bytes / BYTES_PER_GB
}
