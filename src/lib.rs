// Library for the binary and integration tests

pub mod config;
pub mod error;
pub mod metric_repo;
pub mod models;
pub mod routes;
pub mod snapshot;
pub mod version;
