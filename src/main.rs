// src/main.rs
mod cli;
mod logging;

use clap::Parser;
use cli::{Args, is_config_operation};
use logging::setup_logging;
use sleeper_mcp::config::Config;
use sleeper_mcp::data_fetcher::SleeperService;
use sleeper_mcp::error::AppError;
use sleeper_mcp::mcp::{McpServer, ToolHandlers, get_tool_definitions};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<ExitCode, AppError> {
    let args = Args::parse();

    // Configuration changes touch only the file, not the environment overrides
    if is_config_operation(&args) {
        handle_config_operation(&args).await?;
        return Ok(ExitCode::SUCCESS);
    }

    let config = Config::load().await?;
    let (log_file_path, _guard) = setup_logging(&args, &config).await?;
    info!("Logs are being written to: {log_file_path}");

    if args.list_tools {
        for tool in get_tool_definitions(&config.default_season) {
            println!("{:<24} {}", tool.name, tool.description);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let service = Arc::new(SleeperService::from_config(&config)?);

    if args.refresh_players {
        let players = service.player_directory().refresh().await?;
        println!(
            "Cached {} players at {}",
            players.len(),
            service.player_directory().cache_path().display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(tool) = args.call.as_deref() {
        return run_single_call(service, tool, &args.call_args).await;
    }

    let mut server = McpServer::new(service);
    server
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;
    Ok(ExitCode::SUCCESS)
}

async fn run_single_call(
    service: Arc<SleeperService>,
    tool: &str,
    raw_args: &str,
) -> Result<ExitCode, AppError> {
    let arguments: serde_json::Value = serde_json::from_str(raw_args)
        .map_err(|e| AppError::invalid_tool_arguments(tool, format!("--args is not JSON: {e}")))?;

    let result = ToolHandlers::new(service).dispatch(tool, &arguments).await?;
    println!("{}", result.first_text().unwrap_or_default());

    if result.is_error {
        error!("Tool {tool} reported an error");
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

async fn handle_config_operation(args: &Args) -> Result<(), AppError> {
    if args.list_config {
        return Config::display().await;
    }

    let config_path = Config::get_config_path();
    let mut config = if Path::new(&config_path).exists() {
        Config::load_from_path(&config_path).await?
    } else {
        Config::default()
    };

    if let Some(url) = &args.new_api_url {
        config.api_base_url = url.clone();
    }

    if let Some(new_log_path) = &args.new_log_file_path {
        config.log_file_path = Some(new_log_path.clone());
    } else if args.clear_log_file_path {
        config.log_file_path = None;
        println!("Custom log file path cleared. Using default location.");
    }

    config.validate()?;
    config.save().await?;
    println!("Config updated successfully!");
    Ok(())
}
