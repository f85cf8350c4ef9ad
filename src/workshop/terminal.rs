use crate::models::file_node::FileNode;
use std::time::Duration;

pub const TERMINAL_READY: &str = "Terminal ready. Type commands below.";

/// A pretend shell with canned answers for a few common commands.
pub struct Terminal {
    output: Vec<String>,
    delay_scale: f64,
}

impl Terminal {
    /// `delay_scale` multiplies the simulated command durations; 0 disables
    /// them.
    pub fn new(delay_scale: f64) -> Self {
        Terminal {
            output: vec![TERMINAL_READY.to_string()],
            delay_scale: delay_scale.max(0.0),
        }
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.output.push(line.into());
    }

    async fn pause(&self, millis: u64) {
        if self.delay_scale > 0.0 {
            tokio::time::sleep(Duration::from_millis(millis).mul_f64(self.delay_scale)).await;
        }
    }

    /// Runs one command and returns the lines it appended.
    pub async fn run(&mut self, command: &str, tree: &[FileNode]) -> Vec<String> {
        if command.trim().is_empty() {
            return Vec::new();
        }

        let start = self.output.len();
        self.push(format!("$ {}", command));

        let cmd = command.trim().to_lowercase();

        match cmd.as_str() {
            "clear" | "cls" => {
                self.output = vec![TERMINAL_READY.to_string()];
                return self.output.clone();
            }
            "npm install" | "npm i" => {
                self.push("Installing Node.js packages...");
                self.pause(1000).await;
                self.push("added 1234 packages in 5.2s");
                self.push("✓ Node.js packages installed successfully");
            }
            "npm run build" => {
                self.push("Building project...");
                self.pause(1500).await;
                self.push("✓ Build completed successfully");
            }
            "ls" | "dir" => {
                let listing = tree
                    .iter()
                    .map(|node| node.name.as_str())
                    .collect::<Vec<_>>()
                    .join("  ");
                if listing.is_empty() {
                    self.push("No files yet");
                } else {
                    self.push(listing);
                }
            }
            "help" => {
                for line in [
                    "Available commands:",
                    "  npm install - Install Node.js packages",
                    "  npm run build - Build the project",
                    "  ls / dir - List files",
                    "  clear / cls - Clear terminal",
                    "  help - Show this help message",
                ] {
                    self.push(line);
                }
            }
            _ if cmd.starts_with("npm install ") || cmd.starts_with("npm i ") => {
                let package = cmd.split_whitespace().last().unwrap_or_default().to_string();
                self.push(format!("Installing {}...", package));
                self.pause(800).await;
                self.push(format!("✓ {} installed successfully", package));
            }
            _ => {
                self.push(format!(
                    "Command not found: {}. Type 'help' for available commands.",
                    command
                ));
            }
        }

        self.output[start..].to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn install_and_build_print_canned_output() {
        let mut terminal = Terminal::new(0.0);

        let lines = terminal.run("NPM Install", &[]).await;
        assert_eq!(
            lines,
            vec![
                "$ NPM Install",
                "Installing Node.js packages...",
                "added 1234 packages in 5.2s",
                "✓ Node.js packages installed successfully",
            ]
        );

        let lines = terminal.run("npm i lodash", &[]).await;
        assert_eq!(lines[1], "Installing lodash...");
        assert_eq!(lines[2], "✓ lodash installed successfully");

        let lines = terminal.run("npm run build", &[]).await;
        assert_eq!(lines.last().unwrap(), "✓ Build completed successfully");
    }

    #[tokio::test]
    async fn ls_lists_root_nodes() {
        let mut terminal = Terminal::new(0.0);
        assert_eq!(terminal.run("ls", &[]).await[1], "No files yet");

        let tree = vec![
            FileNode::folder("src", "src"),
            FileNode::file("index.html", "index.html", None, None),
        ];
        assert_eq!(terminal.run("dir", &tree).await[1], "src  index.html");
    }

    #[tokio::test]
    async fn clear_resets_and_unknown_commands_hint_help() {
        let mut terminal = Terminal::new(0.0);
        let lines = terminal.run("rm -rf /", &[]).await;
        assert_eq!(
            lines[1],
            "Command not found: rm -rf /. Type 'help' for available commands."
        );
        assert!(terminal.run("   ", &[]).await.is_empty());

        terminal.run("cls", &[]).await;
        assert_eq!(terminal.output(), &[TERMINAL_READY.to_string()]);
    }
}
