// File: services/mobilify_backend/src/main.rs
use axum::{routing::get, Router};
use mobilify_adapter::routes as adapter_routes;
use mobilify_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() {
    let config = Arc::new(load_config().expect("Failed to load config"));
    mobilify_common::logging::init();

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to the Mobilify reference adapter!" }))
        .merge(adapter_routes::routes(config.clone()));

    let app = Router::new()
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http());

    // Bind and serve
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    info!("Starting adapter at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}
