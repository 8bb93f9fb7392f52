use axum::{
    http::StatusCode,
    middleware,
    response::Html,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{
    db::DataStore,
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    validation::Schema,
};

pub mod recommendations;

/// Shared, read-only application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DataStore>,
    pub schema: Arc<Schema>,
}

impl AppState {
    pub fn new(store: Arc<dyn DataStore>, schema: Schema) -> Self {
        Self {
            store,
            schema: Arc::new(schema),
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(hello_world))
        .route("/health", get(health_check))
        .route(
            "/random-recommendation",
            get(recommendations::random_recommendation),
        )
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
}

async fn hello_world() -> Html<&'static str> {
    Html("<p>Hello, World!</p>")
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
