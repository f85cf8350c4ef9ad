use reqwest;
use serde_json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("LLM gateway API key is not configured")]
    MissingApiKey,
    #[error("Rate limits exceeded, please try again later.")]
    RateLimited,
    #[error("Payment required, please add funds to your AI workspace.")]
    PaymentRequired,
    #[error("AI gateway returned {status}: {body}")]
    GatewayError { status: u16, body: String },
    #[error("Invalid response format from AI")]
    InvalidResponse,
}
