use crate::cli::display::CliDisplayManager;
use crate::errors::AppError;
use crate::file_processing::tree::render_tree;
use crate::file_processing::writer::{self, PREVIEW_FILE_NAME};
use crate::models::file_node::NodeKind;
use crate::workshop::session::{SubmitOutcome, Workshop};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: [&str; 13] = [
    "Type a prompt to generate or refine the app. Commands:",
    "  :tree                          Show the project tree",
    "  :open <path>                   Show a file (folders toggle)",
    "  :toggle <path>                 Expand or collapse a folder",
    "  :new file|folder <name> [dir]  Create an empty file or folder",
    "  :edit <path> <local-file>      Replace a file with a local file's content",
    "  :preview [file]                Write the preview document",
    "  :save                          Write the project and preview to disk",
    "  :publish                       Deploy the preview to Netlify",
    "  :status                        Show project and deployment status",
    "  :term <command> | $ <command>  Run a terminal command",
    "  :help                          Show this help",
    "  :quit                          Leave the workshop",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Prompt(String),
    Tree,
    Open(String),
    Toggle(String),
    New {
        kind: NodeKind,
        name: String,
        parent: Option<String>,
    },
    Edit {
        path: String,
        source: PathBuf,
    },
    Preview(Option<PathBuf>),
    Save,
    Publish,
    Status,
    Terminal(String),
    Help,
    Quit,
    Empty,
    Invalid(String),
}

/// Parses one line of workshop input.
pub fn parse_command(line: &str) -> ReplCommand {
    let line = line.trim();
    if line.is_empty() {
        return ReplCommand::Empty;
    }
    if let Some(command) = line.strip_prefix('$') {
        return ReplCommand::Terminal(command.trim().to_string());
    }
    let Some(command) = line.strip_prefix(':') else {
        return ReplCommand::Prompt(line.to_string());
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    match (name, args.as_slice()) {
        ("tree", []) => ReplCommand::Tree,
        ("open", [path]) => ReplCommand::Open(path.to_string()),
        ("toggle", [path]) => ReplCommand::Toggle(path.to_string()),
        ("new", [kind, name, rest @ ..]) if rest.len() <= 1 => {
            let kind = match *kind {
                "file" => NodeKind::File,
                "folder" => NodeKind::Folder,
                other => return ReplCommand::Invalid(format!("Unknown item kind: {}", other)),
            };
            ReplCommand::New {
                kind,
                name: name.to_string(),
                parent: rest.first().map(|parent| parent.trim_end_matches('/').to_string()),
            }
        }
        ("edit", [path, source]) => ReplCommand::Edit {
            path: path.to_string(),
            source: PathBuf::from(source),
        },
        ("preview", []) => ReplCommand::Preview(None),
        ("preview", [target]) => ReplCommand::Preview(Some(PathBuf::from(target))),
        ("save", []) => ReplCommand::Save,
        ("publish", []) => ReplCommand::Publish,
        ("status", []) => ReplCommand::Status,
        ("term", _) if !args.is_empty() => ReplCommand::Terminal(args.join(" ")),
        ("help", _) => ReplCommand::Help,
        ("quit" | "exit" | "q", _) => ReplCommand::Quit,
        _ => ReplCommand::Invalid(format!(
            "Unknown or malformed command: {}. Type :help for commands.",
            line
        )),
    }
}

/// Drives a [`Workshop`] from standard input.
pub struct WorkshopRepl {
    workshop: Workshop,
    display: CliDisplayManager,
    output_directory: PathBuf,
    typing_delay: Duration,
    reveal_delay: Duration,
}

impl WorkshopRepl {
    pub fn new(
        workshop: Workshop,
        output_directory: PathBuf,
        typing_delay: Duration,
        reveal_delay: Duration,
    ) -> Self {
        WorkshopRepl {
            workshop,
            display: CliDisplayManager::new(),
            output_directory,
            typing_delay,
            reveal_delay,
        }
    }

    pub async fn run(
        &mut self,
        initial_prompt: Option<String>,
        attachment: Option<PathBuf>,
    ) -> Result<(), AppError> {
        self.display.print_header();
        self.show_messages_from(0).await;

        if let Some(prompt) = initial_prompt {
            if let Err(e) = self.submit(&prompt, attachment.as_deref()).await {
                self.display.print_error(&e.to_string());
            }
        }

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("\n› ");
            if let Err(e) = std::io::Write::flush(&mut std::io::stdout()) {
                log::debug!("Failed to flush prompt: {}", e);
            }

            let Some(line) = lines.next_line().await? else {
                break;
            };

            match parse_command(&line) {
                ReplCommand::Quit => break,
                command => self.execute(command).await,
            }
        }

        Ok(())
    }

    /// Runs one command. A failure is reported and leaves the session intact.
    async fn execute(&mut self, command: ReplCommand) {
        if let Err(e) = self.apply(command).await {
            log::warn!("Workshop command failed: {}", e);
            self.display.print_error(&e.to_string());
        }
    }

    async fn apply(&mut self, command: ReplCommand) -> Result<(), AppError> {
        match command {
            ReplCommand::Prompt(prompt) => self.submit(&prompt, None).await?,
            ReplCommand::Tree => self.show_tree(),
            ReplCommand::Open(path) => match self.workshop.select(&path).cloned() {
                Some(node) if node.is_folder() => self.show_tree(),
                Some(node) => {
                    self.display.print_info(&node.path);
                    println!("{}", node.content.unwrap_or_default());
                }
                None => self.display.print_error(&format!("No item at {}", path)),
            },
            ReplCommand::Toggle(path) => {
                if self.workshop.toggle_folder(&path) {
                    self.show_tree();
                } else {
                    self.display.print_error(&format!("No folder at {}", path));
                }
            }
            ReplCommand::New { kind, name, parent } => {
                match self.workshop.create_item(kind, &name, parent.as_deref()) {
                    Ok(path) => {
                        self.display.print_info(&format!("Created {}", path));
                        self.show_tree();
                    }
                    Err(e) => self.display.print_error(&e.to_string()),
                }
            }
            ReplCommand::Edit { path, source } => {
                let content = match tokio::fs::read_to_string(&source).await {
                    Ok(content) => content,
                    Err(e) => {
                        self.display
                            .print_error(&format!("Cannot read {}: {}", source.display(), e));
                        return Ok(());
                    }
                };
                match self.workshop.edit_file(&path, &content) {
                    Ok(previous) => self.display.print_diff(&path, &previous, &content),
                    Err(e) => self.display.print_error(&e.to_string()),
                }
            }
            ReplCommand::Preview(target) => {
                if self.workshop.preview().is_empty() {
                    self.display.print_error("No preview yet. Generate an app first.");
                    return Ok(());
                }
                let target =
                    target.unwrap_or_else(|| self.output_directory.join(PREVIEW_FILE_NAME));
                writer::save_preview(self.workshop.preview(), &target).await?;
                self.display
                    .print_info(&format!("Preview written to {}", target.display()));
            }
            ReplCommand::Save => {
                self.display.print_saving_start();
                let saved = writer::save_project(
                    &self.workshop.files(),
                    self.workshop.preview(),
                    &self.output_directory,
                )
                .await?;
                self.display.print_info(&format!(
                    "Saved {} file(s) to {}",
                    saved,
                    self.output_directory.display()
                ));
            }
            ReplCommand::Publish => {
                let before = self.workshop.terminal.output().len();
                self.display.start_spinner("Waiting for Netlify");
                let result = self.workshop.publish().await;
                self.display.stop_spinner();
                if let Err(e) = result {
                    log::warn!("Publish failed: {}", e);
                }
                let lines = self.workshop.terminal.output()[before..].to_vec();
                self.display.print_lines(&lines);
            }
            ReplCommand::Status => {
                self.display.print_lines(&[
                    format!("Conversation turns: {}", self.workshop.history().len()),
                    format!("Files: {}", self.workshop.files().len()),
                    format!(
                        "Selected: {}",
                        self.workshop
                            .selected()
                            .map(|node| node.path.as_str())
                            .unwrap_or("none")
                    ),
                    format!("Preview: {} bytes", self.workshop.preview().len()),
                    match self.workshop.deployment() {
                        Some(deployment) => format!(
                            "Live at: {} ({})",
                            deployment.url, deployment.site_name
                        ),
                        None => "Not deployed".to_string(),
                    },
                ]);
            }
            ReplCommand::Terminal(command) => {
                let tree = self.workshop.tree().to_vec();
                let lines = self.workshop.terminal.run(&command, &tree).await;
                self.display.print_lines(&lines);
            }
            ReplCommand::Help => {
                for line in HELP {
                    println!("   {}", line);
                }
            }
            ReplCommand::Invalid(message) => self.display.print_error(&message),
            ReplCommand::Quit | ReplCommand::Empty => {}
        }
        Ok(())
    }

    async fn submit(&mut self, prompt: &str, attachment: Option<&Path>) -> Result<(), AppError> {
        let first_new = self.workshop.messages().len();

        self.display.start_spinner("Generating your application...");
        let outcome = match attachment {
            Some(path) => self.workshop.submit_with_attachment(prompt, path).await,
            None => Ok(self.workshop.submit(prompt).await),
        };
        self.display.stop_spinner();
        let outcome = outcome?;

        if let SubmitOutcome::Generated { files } = &outcome {
            self.display.print_generation_start();
            self.display
                .print_generated_files(files, self.reveal_delay)
                .await;
        }

        // The user's own line is already on screen.
        self.show_messages_from(first_new + 1).await;
        Ok(())
    }

    async fn show_messages_from(&mut self, start: usize) {
        let pending: Vec<_> = self
            .workshop
            .messages()
            .iter()
            .skip(start)
            .cloned()
            .collect();
        for message in pending {
            self.display
                .print_chat_message(&message, self.typing_delay)
                .await;
            if message.is_typing {
                self.workshop.finish_typing(&message.id);
            }
        }
    }

    fn show_tree(&self) {
        let lines = render_tree(self.workshop.tree());
        if lines.is_empty() {
            self.display.print_info("No files yet");
        } else {
            self.display.print_lines(&lines);
        }
    }
}
