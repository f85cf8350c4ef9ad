use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the Astra application.
#[derive(Parser, Debug, PartialEq, Clone)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Describe the app to build.
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Attach a file to the prompt.
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Also write the generated project files to the output directory.
    #[arg(short, long)]
    pub save: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for the Astra application.
#[derive(Subcommand, Debug, PartialEq, Clone)]
pub enum Commands {
    /// Open an interactive workshop session.
    Workshop {
        /// First prompt to send when the session opens.
        #[arg(short, long)]
        prompt: Option<String>,

        /// Attach a file to the first prompt.
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Assemble a single-document preview from files on disk.
    Preview {
        /// Files or directories making up the project.
        #[arg(required = true, num_args = 1..)]
        paths: Vec<String>,

        /// Paths to files or directories to ignore.
        #[arg(short, long, num_args = 1.., value_delimiter = '&')]
        ignore: Vec<String>,

        /// Where to write the preview (defaults to the output directory).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Deploy an HTML document to Netlify.
    Deploy {
        /// The HTML file to publish.
        html: PathBuf,

        /// Site name to request (defaults to astra-app-<timestamp>).
        #[arg(long)]
        site_name: Option<String>,
    },

    /// Serve the generation and deploy functions over HTTP.
    Serve {
        /// Address to listen on (defaults to the configured address).
        #[arg(long)]
        addr: Option<String>,
    },

    /// Manage configuration options.
    Config {
        /// Set the log level (debug, info, warn, error, off).
        #[arg(long)]
        set_log_level: Option<String>,

        /// Set the output directory.
        #[arg(long)]
        set_output_directory: Option<String>,

        /// Set the Netlify access token.
        #[arg(long)]
        set_deploy_token: Option<String>,

        /// Set the number of deploy status checks.
        #[arg(long)]
        set_poll_attempts: Option<u32>,

        /// Set the address used by `serve`.
        #[arg(long)]
        set_server_address: Option<String>,
    },

    /// Manage model configuration options.
    ModelConfig {
        /// Set the API key for the LLM gateway.
        #[arg(long)]
        set_api_key: Option<String>,

        /// Set the model name.
        #[arg(long)]
        set_model: Option<String>,

        /// Set the gateway base URL.
        #[arg(long)]
        set_gateway_url: Option<String>,

        /// Set the maximum number of tokens per reply.
        #[arg(long)]
        set_max_tokens: Option<u32>,
    },
}
