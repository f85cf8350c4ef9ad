use crate::models::chat::{ChatMessage, Role};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use similar::{ChangeTag, TextDiff};
use std::io::Write;
use std::time::Duration;

/// Manages CLI display and output formatting.
pub struct CliDisplayManager {
    spinner: Option<ProgressBar>,
}

impl CliDisplayManager {
    /// Creates a new `CliDisplayManager`.
    pub fn new() -> Self {
        CliDisplayManager { spinner: None }
    }

    /// Prints the application header.
    pub fn print_header(&self) {
        println!("\n{}", "╭──────────────────────╮".bright_cyan());
        println!(
            "{}",
            format!("│  ✦ Astra v{:<10}│", env!("CARGO_PKG_VERSION"))
                .bright_cyan()
                .bold()
        );
        println!("{}\n", "╰──────────────────────╯".bright_cyan());
    }

    pub fn print_generation_start(&self) {
        self.print_section("⚡", "Generating your application", "");
    }

    pub fn print_saving_start(&self) {
        self.print_section("💾", "Saving Results", "");
    }

    pub fn print_deploy_start(&self, site_name: &str) {
        self.print_section("🚀", "Deploying to Netlify", site_name);
    }

    /// Prints the application footer.
    pub fn print_footer(&self, saved_files: usize, duration: Duration) {
        println!();
        println!(
            "{}",
            format!("⚡ Wrote {} file(s)", saved_files)
                .bright_white()
                .dimmed(),
        );
        println!(
            "{}",
            format!("⚡ Completed in {:.2?}", duration)
                .bright_white()
                .dimmed(),
        );
        println!();
    }

    /// Starts a spinner for ongoing operations.
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template(&format!(
            "   {} {{spinner}} {}",
            "→".bright_white(),
            message.italic().bright_white()
        ))
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Stops the spinner.
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Reveals generated file paths one by one.
    pub async fn print_generated_files(&self, paths: &[String], delay: Duration) {
        for path in paths {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            println!("   {} {}", "✓".bright_green(), path.bright_white());
        }
    }

    /// Prints a chat message, typing it out when `delay` is non-zero.
    pub async fn print_chat_message(&self, message: &ChatMessage, delay: Duration) {
        let label = match message.role {
            Role::User => "you".bright_yellow().bold(),
            Role::Assistant => "astra".bright_cyan().bold(),
            Role::System => "system".dimmed(),
        };
        print!(
            "{} {} {} ",
            message.timestamp.format("%H:%M").to_string().dimmed(),
            label,
            "›".bright_white()
        );

        if message.is_typing && !delay.is_zero() {
            let mut stdout = std::io::stdout();
            for ch in message.content.chars() {
                print!("{}", ch);
                if let Err(e) = stdout.flush() {
                    log::debug!("Failed to flush chat output: {}", e);
                }
                tokio::time::sleep(delay).await;
            }
            println!();
        } else if message.content.starts_with("Error:") {
            println!("{}", message.content.bright_red());
        } else {
            println!("{}", message.content);
        }
    }

    pub fn print_lines(&self, lines: &[String]) {
        for line in lines {
            println!("   {}", line);
        }
    }

    /// Prints a line diff between two versions of a file.
    pub fn print_diff(&self, path: &str, old: &str, new: &str) {
        println!("{} {}", "±".bright_yellow(), path.bright_cyan());
        let diff = TextDiff::from_lines(old, new);
        for change in diff.iter_all_changes() {
            let line = change.to_string_lossy();
            let line = line.trim_end_matches('\n');
            match change.tag() {
                ChangeTag::Delete => println!("   {}", format!("- {}", line).red()),
                ChangeTag::Insert => println!("   {}", format!("+ {}", line).green()),
                ChangeTag::Equal => {}
            }
        }
    }

    pub fn print_error(&self, message: &str) {
        println!("   {} {}", "✗".bright_red(), message.bright_red());
    }

    /// Helper function to print a section header.
    fn print_section(&self, icon: &str, title: &str, description: &str) {
        println!("{} {}", icon.bright_yellow(), title.bright_cyan().bold());
        if !description.is_empty() {
            println!(
                "   {} {}",
                "→".bright_white(),
                description.italic().bright_white()
            );
        }
    }

    /// Helper function to print an informational message.
    pub fn print_info(&self, message: &str) {
        println!(
            "   {} {}",
            "→".bright_white(),
            message.italic().bright_white()
        );
    }
}
