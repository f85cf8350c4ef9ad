use crate::api::client::GenerationClient;
use crate::cli::args::Commands;
use crate::cli::display::CliDisplayManager;
use crate::deploy::client::NetlifyDeployer;
use crate::deploy::{default_site_name, SiteDeployer};
use crate::errors::AppError;
use crate::file_processing::preview::build_preview;
use crate::file_processing::{reader, writer};
use crate::server::{self, ServerState};
use crate::utils::config::{read_config, write_config, Config};
use crate::utils::logger;
use crate::workshop::repl::WorkshopRepl;
use crate::workshop::session::Workshop;
use crate::workshop::terminal::Terminal;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub fn build_generator(config: &Config) -> Arc<GenerationClient> {
    Arc::new(GenerationClient::new(
        config.resolve_api_key(),
        &config.gateway_url,
        &config.model,
        config.max_tokens,
    ))
}

pub fn build_deployer(config: &Config) -> Arc<NetlifyDeployer> {
    Arc::new(NetlifyDeployer::new(
        config.resolve_deploy_token(),
        &config.deploy_api_url,
        config.poll_interval(),
        config.poll_attempts,
    ))
}

pub fn build_workshop(config: &Config) -> Workshop {
    Workshop::new(
        build_generator(config),
        build_deployer(config),
        Terminal::new(1.0),
    )
}

/// Dispatches a subcommand.
pub async fn handle_subcommand(command: Commands) -> Result<(), AppError> {
    match command {
        Commands::Workshop { prompt, file } => handle_workshop_subcommand(prompt, file).await,
        Commands::Preview {
            paths,
            ignore,
            output,
        } => handle_preview_subcommand(&paths, &ignore, output).await,
        Commands::Deploy { html, site_name } => handle_deploy_subcommand(&html, site_name).await,
        Commands::Serve { addr } => handle_serve_subcommand(addr).await,
        Commands::Config {
            set_log_level,
            set_output_directory,
            set_deploy_token,
            set_poll_attempts,
            set_server_address,
        } => handle_config_subcommand(
            set_log_level,
            set_output_directory,
            set_deploy_token,
            set_poll_attempts,
            set_server_address,
        ),
        Commands::ModelConfig {
            set_api_key,
            set_model,
            set_gateway_url,
            set_max_tokens,
        } => handle_model_config_subcommand(set_api_key, set_model, set_gateway_url, set_max_tokens),
    }
}

/// Handles the workshop subcommand
async fn handle_workshop_subcommand(
    prompt: Option<String>,
    file: Option<PathBuf>,
) -> Result<(), AppError> {
    let config = read_config()?;
    logger::setup_logger(&config);

    let mut repl = WorkshopRepl::new(
        build_workshop(&config),
        PathBuf::from(&config.output_directory),
        config.typing_delay(),
        config.file_reveal_delay(),
    );
    repl.run(prompt, file).await
}

/// Handles the preview subcommand
async fn handle_preview_subcommand(
    paths: &[String],
    ignore: &[String],
    output: Option<PathBuf>,
) -> Result<(), AppError> {
    let config = read_config()?;
    logger::setup_logger(&config);
    let display = CliDisplayManager::new();

    let files = reader::read_project(paths, ignore).await?;
    if files.is_empty() {
        return Err(AppError::InvalidInput(
            "No project files found in the given paths".to_string(),
        ));
    }
    display.print_info(&format!("Read {} file(s)", files.len()));

    let preview = build_preview(&files);
    let target = output.unwrap_or_else(|| {
        Path::new(&config.output_directory).join(writer::PREVIEW_FILE_NAME)
    });
    writer::save_preview(&preview, &target).await?;
    display.print_info(&format!("Preview written to {}", target.display()));
    Ok(())
}

/// Handles the deploy subcommand
async fn handle_deploy_subcommand(html: &Path, site_name: Option<String>) -> Result<(), AppError> {
    let config = read_config()?;
    logger::setup_logger(&config);
    let mut display = CliDisplayManager::new();

    let content = tokio::fs::read_to_string(html).await?;
    let site_name = site_name.unwrap_or_else(default_site_name);

    display.print_deploy_start(&site_name);
    display.start_spinner("Waiting for Netlify");
    let result = build_deployer(&config).deploy(&content, &site_name).await;
    display.stop_spinner();

    let deployment = result?;
    display.print_info(&format!("✅ Deployed successfully! {}", deployment.url));
    display.print_info(&format!("📝 Site ID: {}", deployment.site_id));
    Ok(())
}

/// Handles the serve subcommand
async fn handle_serve_subcommand(addr: Option<String>) -> Result<(), AppError> {
    let config = read_config()?;
    logger::setup_logger(&config);

    let addr = addr.unwrap_or_else(|| config.server_address.clone());
    let addr: SocketAddr = addr
        .parse()
        .map_err(|_| AppError::InvalidInput(format!("Invalid address: {}", addr)))?;

    if config.resolve_api_key().is_none() {
        log::warn!("LLM gateway API key is not configured; generation requests will fail");
    }
    if config.resolve_deploy_token().is_none() {
        log::warn!("Netlify access token is not configured; deploy requests will fail");
    }

    let state = Arc::new(ServerState {
        generator: build_generator(&config),
        deployer: build_deployer(&config),
    });

    println!("Serving on http://{}", addr);
    server::serve(addr, state).await
}

/// Handles the config subcommand
fn handle_config_subcommand(
    set_log_level: Option<String>,
    set_output_directory: Option<String>,
    set_deploy_token: Option<String>,
    set_poll_attempts: Option<u32>,
    set_server_address: Option<String>,
) -> Result<(), AppError> {
    let mut config = read_config()?;

    if let Some(log_level) = set_log_level {
        config.log_level = log_level.clone();
        println!("Log level set to {}", log_level);
    }

    if let Some(output_directory) = set_output_directory {
        config.output_directory = output_directory.clone();
        println!("Output directory set to {}", output_directory);
    }

    if let Some(deploy_token) = set_deploy_token {
        config.deploy_token = Some(deploy_token);
        println!("Deploy token set");
    }

    if let Some(poll_attempts) = set_poll_attempts {
        config.poll_attempts = poll_attempts;
        println!("Poll attempts set to {}", poll_attempts);
    }

    if let Some(server_address) = set_server_address {
        config.server_address = server_address.clone();
        println!("Server address set to {}", server_address);
    }

    crate::utils::config::validate_config(&config)?;
    write_config(&config)?;
    Ok(())
}

/// Handles the model-config subcommand
fn handle_model_config_subcommand(
    set_api_key: Option<String>,
    set_model: Option<String>,
    set_gateway_url: Option<String>,
    set_max_tokens: Option<u32>,
) -> Result<(), AppError> {
    let mut config = read_config()?;

    if let Some(api_key) = set_api_key {
        config.api_key = Some(api_key);
        println!("API key set");
    }

    if let Some(model) = set_model {
        config.model = model.clone();
        println!("Model set to: {}", model);
    }

    if let Some(gateway_url) = set_gateway_url {
        config.gateway_url = gateway_url.clone();
        println!("Gateway URL set to: {}", gateway_url);
    }

    if let Some(max_tokens) = set_max_tokens {
        config.max_tokens = max_tokens;
        println!("Max tokens set to: {}", max_tokens);
    }

    crate::utils::config::validate_config(&config)?;
    write_config(&config)?;
    Ok(())
}
