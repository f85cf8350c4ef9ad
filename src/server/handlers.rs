use super::ServerState;
use crate::api::errors::GenerationError;
use crate::deploy::default_site_name;
use crate::models::wire::{DeployRequest, DeployResponse, ErrorBody, GenerateRequest, GenerateResponse};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    response::Response,
    Json,
};
use std::sync::Arc;

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

pub async fn generate(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            log::error!("AI code generator error: {}", rejection.body_text());
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, rejection.body_text());
        }
    };
    log::debug!("Generation request with {} message(s)", request.messages.len());

    match state.generator.generate(&request.messages).await {
        Ok(content) => Json(GenerateResponse { content }).into_response(),
        Err(e) => {
            log::error!("AI code generator error: {}", e);
            let (status, message) = match &e {
                GenerationError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, e.to_string()),
                GenerationError::PaymentRequired => (StatusCode::PAYMENT_REQUIRED, e.to_string()),
                GenerationError::GatewayError { .. } => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "AI gateway error".to_string())
                }
                _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            };
            error_response(status, message)
        }
    }
}

pub async fn deploy(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<DeployRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            log::error!("Error in deploy function: {}", rejection.body_text());
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DeployResponse::failed(rejection.body_text())),
            )
                .into_response();
        }
    };
    let site_name = request
        .site_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(default_site_name);
    log::info!("Deploying to Netlify: {}", site_name);

    match state.deployer.deploy(&request.html_content, &site_name).await {
        Ok(deployment) => Json(DeployResponse::succeeded(
            deployment.url,
            deployment.site_id,
            deployment.site_name,
        ))
        .into_response(),
        Err(e) => {
            log::error!("Error in deploy function: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DeployResponse::failed(e.to_string())),
            )
                .into_response()
        }
    }
}
