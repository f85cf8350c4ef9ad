mod handlers;

use crate::api::CodeGenerator;
use crate::deploy::SiteDeployer;
use crate::errors::AppError;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub const GENERATE_ROUTE: &str = "/functions/v1/ai-code-generator";
pub const DEPLOY_ROUTE: &str = "/functions/v1/deploy-to-netlify";

pub struct ServerState {
    pub generator: Arc<dyn CodeGenerator>,
    pub deployer: Arc<dyn SiteDeployer>,
}

/// Builds the HTTP router exposing both functions behind permissive CORS.
pub fn router(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route(GENERATE_ROUTE, post(handlers::generate))
        .route(DEPLOY_ROUTE, post(handlers::deploy))
        .layer(cors)
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: Arc<ServerState>) -> Result<(), AppError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("listening on {}", addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
