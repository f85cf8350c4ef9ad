use crate::api::CodeGenerator;
use crate::deploy::{default_site_name, Deployment, SiteDeployer};
use crate::errors::AppError;
use crate::file_processing::preview::build_preview;
use crate::file_processing::response_parser::parse_ai_response;
use crate::file_processing::tree::{self, create_file_tree};
use crate::models::chat::{ChatMessage, ConversationTurn, Role};
use crate::models::file_node::{FileNode, NodeKind};
use crate::models::ParsedFile;
use crate::workshop::terminal::Terminal;
use std::path::Path;
use std::sync::Arc;

pub const GREETING: &str = "Hello! I'm your AI coding assistant. I can help you write code, debug issues, and build applications. What would you like to create today?";

/// What a call to [`Workshop::submit`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The reply contained file blocks; the tree and preview were rebuilt.
    Generated { files: Vec<String> },
    /// The reply was plain conversation.
    Reply,
    /// The call failed with this message; it is also in the chat.
    Failed(String),
    /// Nothing was sent.
    Ignored,
}

/// State of one workshop: the chat, the generated project and its preview.
pub struct Workshop {
    generator: Arc<dyn CodeGenerator>,
    deployer: Arc<dyn SiteDeployer>,
    messages: Vec<ChatMessage>,
    history: Vec<ConversationTurn>,
    tree: Vec<FileNode>,
    preview: String,
    selected: Option<String>,
    deployment: Option<Deployment>,
    pub terminal: Terminal,
}

impl Workshop {
    pub fn new(
        generator: Arc<dyn CodeGenerator>,
        deployer: Arc<dyn SiteDeployer>,
        terminal: Terminal,
    ) -> Self {
        Workshop {
            generator,
            deployer,
            messages: vec![ChatMessage::new(Role::Assistant, GREETING)],
            history: Vec::new(),
            tree: Vec::new(),
            preview: String::new(),
            selected: None,
            deployment: None,
            terminal,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn history(&self) -> &[ConversationTurn] {
        &self.history
    }

    pub fn tree(&self) -> &[FileNode] {
        &self.tree
    }

    pub fn preview(&self) -> &str {
        &self.preview
    }

    pub fn deployment(&self) -> Option<&Deployment> {
        self.deployment.as_ref()
    }

    pub fn selected(&self) -> Option<&FileNode> {
        self.selected
            .as_deref()
            .and_then(|path| tree::find_node(&self.tree, path))
    }

    pub fn files(&self) -> Vec<ParsedFile> {
        tree::collect_files(&self.tree)
    }

    /// Sends a prompt with the whole conversation to the generator.
    ///
    /// The history only grows when the call succeeds, so a failed prompt is
    /// not replayed on the next submission.
    pub async fn submit(&mut self, prompt: &str) -> SubmitOutcome {
        if prompt.trim().is_empty() {
            return SubmitOutcome::Ignored;
        }

        self.messages.push(ChatMessage::new(Role::User, prompt));

        let mut pending = self.history.clone();
        pending.push(ConversationTurn::user(prompt));

        let response = match self.generator.generate(&pending).await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Generation failed: {}", e);
                self.messages
                    .push(ChatMessage::new(Role::Assistant, format!("Error: {}", e)));
                return SubmitOutcome::Failed(e.to_string());
            }
        };

        pending.push(ConversationTurn::assistant(response.clone()));
        self.history = pending;

        let parsed = parse_ai_response(&response);
        if parsed.is_conversational() {
            self.messages
                .push(ChatMessage::typing(Role::Assistant, response));
            return SubmitOutcome::Reply;
        }

        let summary = if parsed.explanation.is_empty() {
            format!(
                "Generated {} file(s). Check the Code section to view them.",
                parsed.files.len()
            )
        } else {
            parsed.explanation.clone()
        };
        self.messages
            .push(ChatMessage::typing(Role::Assistant, summary));

        self.tree = create_file_tree(&parsed.files, &parsed.folders);
        self.preview = build_preview(&parsed.files);
        self.selected = tree::first_file(&self.tree).map(|node| node.path.clone());

        log::info!(
            "Generated {} file(s), preview is {} bytes",
            parsed.files.len(),
            self.preview.len()
        );

        SubmitOutcome::Generated {
            files: parsed.files.into_iter().map(|file| file.path).collect(),
        }
    }

    /// Submits a prompt with an attached local file appended to it.
    pub async fn submit_with_attachment(
        &mut self,
        prompt: &str,
        attachment: &Path,
    ) -> Result<SubmitOutcome, AppError> {
        let content = tokio::fs::read_to_string(attachment).await?;
        let name = attachment
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| attachment.display().to_string());
        let prompt = format!(
            "{}\n\nAttached file `{}`:\n```\n{}\n```",
            prompt.trim(),
            name,
            content
        );
        Ok(self.submit(&prompt).await)
    }

    /// Marks a message as fully displayed.
    pub fn finish_typing(&mut self, id: &str) -> bool {
        match self.messages.iter_mut().find(|message| message.id == id) {
            Some(message) => {
                message.is_typing = false;
                true
            }
            None => false,
        }
    }

    pub fn toggle_folder(&mut self, path: &str) -> bool {
        tree::toggle_folder(&mut self.tree, path)
    }

    pub fn create_item(
        &mut self,
        kind: NodeKind,
        name: &str,
        parent: Option<&str>,
    ) -> Result<String, AppError> {
        let node = tree::create_item(&mut self.tree, kind, name, parent)?;
        Ok(node.path.clone())
    }

    /// Selects a file for viewing. Folders toggle instead, as in the explorer.
    pub fn select(&mut self, path: &str) -> Option<&FileNode> {
        let is_folder = tree::find_node(&self.tree, path)?.is_folder();
        if is_folder {
            self.toggle_folder(path);
        } else {
            self.selected = Some(path.to_string());
        }
        tree::find_node(&self.tree, path)
    }

    /// Replaces a file's content, rebuilding the preview for web assets.
    /// Returns the previous content.
    pub fn edit_file(&mut self, path: &str, content: &str) -> Result<String, AppError> {
        let previous = tree::find_node(&self.tree, path)
            .filter(|node| !node.is_folder())
            .map(|node| node.content.clone().unwrap_or_default())
            .ok_or_else(|| AppError::InvalidInput(format!("No file at {}", path)))?;

        tree::update_file_content(&mut self.tree, path, content);

        if tree::affects_preview(path) {
            self.preview = build_preview(&self.files());
            log::debug!("Rebuilt preview after editing {}", path);
        }
        Ok(previous)
    }

    /// Deploys the current preview under a fresh site name.
    pub async fn publish(&mut self) -> Result<Deployment, AppError> {
        if self.preview.is_empty() {
            self.terminal
                .push("❌ No code to deploy. Generate an app first.");
            return Err(AppError::NothingToDeploy);
        }

        self.terminal.push("🚀 Starting deployment to Netlify...");

        match self.deployer.deploy(&self.preview, &default_site_name()).await {
            Ok(deployment) => {
                self.terminal.push("✅ Deployed successfully!");
                self.terminal
                    .push(format!("🔗 Your app is live at: {}", deployment.url));
                self.terminal
                    .push(format!("📝 Site ID: {}", deployment.site_id));
                self.deployment = Some(deployment.clone());
                Ok(deployment)
            }
            Err(e) => {
                self.terminal.push(format!("❌ Deployment failed: {}", e));
                Err(e.into())
            }
        }
    }
}
