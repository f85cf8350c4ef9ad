use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

/// A node of the synthetic project tree. `children` is `Some` exactly when
/// the node is a folder.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    pub name: String,
    pub kind: NodeKind,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expanded: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl FileNode {
    pub fn folder(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Folder,
            path: path.into(),
            children: Some(Vec::new()),
            expanded: Some(false),
            content: None,
            language: None,
        }
    }

    pub fn file(
        name: impl Into<String>,
        path: impl Into<String>,
        content: Option<String>,
        language: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File,
            path: path.into(),
            children: None,
            expanded: None,
            content,
            language,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded.unwrap_or(false)
    }
}
