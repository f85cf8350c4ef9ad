pub mod chat;
pub mod file_node;
pub mod wire;

use serde::{Deserialize, Serialize};

/// A file extracted from a model response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ParsedFile {
    pub path: String,
    pub content: String,
    pub language: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ParsedFolder {
    pub path: String,
}

/// Everything recovered from one model reply.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedResponse {
    pub files: Vec<ParsedFile>,
    pub folders: Vec<ParsedFolder>,
    pub explanation: String,
}

impl ParsedResponse {
    /// A reply without file blocks is a plain conversational answer.
    pub fn is_conversational(&self) -> bool {
        self.files.is_empty()
    }
}
