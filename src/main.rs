mod api;
mod cli;
mod commands;
mod deploy;
mod errors;
mod file_processing;
mod models;
mod server;
mod utils;
mod workshop;

#[cfg(test)]
mod test_support;

use crate::utils::logger;
use clap::Parser;
use cli::args::Args;
use cli::display::CliDisplayManager;
use errors::AppError;
use file_processing::writer::{self, PREVIEW_FILE_NAME};
use std::path::Path;
use std::time::Instant;
use utils::config::read_config;
use workshop::session::{SubmitOutcome, Workshop};
use workshop::terminal::Terminal;

/// The main entry point of the application
#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();
    let start_time = Instant::now();

    if let Some(command) = args.command {
        return commands::handle_subcommand(command).await;
    }

    // Ensure prompt is provided
    let prompt = args.prompt.ok_or(AppError::MissingPrompt)?;

    let config = read_config()?;
    logger::setup_logger(&config);

    let mut display_manager = CliDisplayManager::new();
    display_manager.print_header();

    let mut workshop = Workshop::new(
        commands::build_generator(&config),
        commands::build_deployer(&config),
        Terminal::new(0.0),
    );
    let first_new = workshop.messages().len();

    display_manager.start_spinner("Generating your application...");
    let outcome = match &args.file {
        Some(path) => workshop.submit_with_attachment(&prompt, path).await,
        None => Ok(workshop.submit(&prompt).await),
    };
    display_manager.stop_spinner();
    let outcome = ensure_generated(outcome?);

    if let Ok(SubmitOutcome::Generated { files }) = &outcome {
        display_manager.print_generation_start();
        display_manager
            .print_generated_files(files, config.file_reveal_delay())
            .await;
    }

    // Skip the prompt itself; it is already on the command line.
    for message in workshop.messages().iter().skip(first_new + 1) {
        display_manager
            .print_chat_message(message, config.typing_delay())
            .await;
    }

    outcome?;

    let mut saved_files = 0;
    if !workshop.preview().is_empty() {
        let output_directory = Path::new(&config.output_directory);
        display_manager.print_saving_start();
        if args.save {
            saved_files =
                writer::save_project(&workshop.files(), workshop.preview(), output_directory)
                    .await?;
        } else {
            writer::save_preview(workshop.preview(), &output_directory.join(PREVIEW_FILE_NAME))
                .await?;
            saved_files = 1;
        }
    }

    log::debug!(
        "Conversation holds {} turn(s) after this run",
        workshop.history().len()
    );

    display_manager.print_footer(saved_files, start_time.elapsed());

    Ok(())
}

/// A failed generation ends a one-shot run with an error exit.
fn ensure_generated(outcome: SubmitOutcome) -> Result<SubmitOutcome, AppError> {
    match outcome {
        SubmitOutcome::Failed(message) => Err(AppError::GenerationFailed(message)),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_generation_is_an_error() {
        let error = ensure_generated(SubmitOutcome::Failed("AI gateway error".to_string()))
            .unwrap_err();
        assert_eq!(error.to_string(), "Generation failed: AI gateway error");

        assert_eq!(
            ensure_generated(SubmitOutcome::Reply).unwrap(),
            SubmitOutcome::Reply
        );
    }
}
