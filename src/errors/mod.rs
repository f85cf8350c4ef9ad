use crate::api::errors::GenerationError;
use crate::deploy::errors::DeployError;
use crate::file_processing::tree::TreeError;
use std::fmt;
use toml;

#[derive(Debug)]
pub enum AppError {
    IoError(std::io::Error),
    GenerationError(GenerationError),
    DeployError(DeployError),
    TreeError(TreeError),
    TomlError(toml::de::Error),
    TomlWriteError(toml::ser::Error),
    MissingPrompt,
    GenerationFailed(String),
    NothingToDeploy,
    InvalidInput(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::IoError(e) => write!(f, "IO error: {}", e),
            AppError::GenerationError(e) => write!(f, "{}", e),
            AppError::DeployError(e) => write!(f, "{}", e),
            AppError::TreeError(e) => write!(f, "{}", e),
            AppError::TomlError(e) => write!(f, "TOML parsing error: {}", e),
            AppError::TomlWriteError(e) => write!(f, "TOML serialization error: {}", e),
            AppError::MissingPrompt => write!(f, "Prompt is required"),
            AppError::GenerationFailed(e) => write!(f, "Generation failed: {}", e),
            AppError::NothingToDeploy => {
                write!(f, "No code to deploy. Generate an app first.")
            }
            AppError::InvalidInput(e) => write!(f, "Invalid input: {}", e),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err)
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::TomlError(err)
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(err: toml::ser::Error) -> Self {
        AppError::TomlWriteError(err)
    }
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        AppError::GenerationError(err)
    }
}

impl From<DeployError> for AppError {
    fn from(err: DeployError) -> Self {
        AppError::DeployError(err)
    }
}

impl From<TreeError> for AppError {
    fn from(err: TreeError) -> Self {
        AppError::TreeError(err)
    }
}
