// HTTP routes

mod http;
mod instances;

use axum::http::{HeaderValue, header};
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::snapshot::SnapshotAggregator;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) aggregator: Arc<SnapshotAggregator>,
}

pub fn app(aggregator: Arc<SnapshotAggregator>) -> Router {
    let state = AppState { aggregator };
    Router::new()
        .route("/version", get(http::version_handler)) // GET /version
        .route("/instances", get(instances::list_instances)) // GET /instances
        .route("/instances/", get(instances::missing_instance_id)) // GET /instances/
        .route("/instances/{id}", get(instances::get_instance)) // GET /instances/{id}
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
