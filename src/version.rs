// Package identity reported by GET /version

/// Crate version, taken from Cargo.toml at build time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name, taken from Cargo.toml at build time.
pub const NAME: &str = env!("CARGO_PKG_NAME");
