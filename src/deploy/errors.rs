use reqwest;
use serde_json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("HTML content is required")]
    EmptyHtml,
    #[error("Netlify access token not configured")]
    MissingToken,
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Failed to build deploy archive: {0}")]
    ArchiveError(#[from] zip::result::ZipError),
    #[error("Failed to build deploy archive: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Netlify deployment failed: {status} {body}")]
    ApiError { status: u16, body: String },
    #[error("Deploy failed: {0}")]
    Failed(String),
    #[error("Deploy did not become ready after {attempts} status checks")]
    Timeout { attempts: u32 },
}
