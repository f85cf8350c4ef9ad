pub mod client;
pub mod config;
pub mod errors;

use crate::models::chat::ConversationTurn;
use async_trait::async_trait;
use errors::GenerationError;

/// Anything that can turn a conversation into an assistant reply.
#[async_trait]
pub trait CodeGenerator: Send + Sync {
    async fn generate(&self, history: &[ConversationTurn]) -> Result<String, GenerationError>;
}
