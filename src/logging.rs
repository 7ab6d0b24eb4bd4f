use crate::cli::Args;
use sleeper_mcp::config::Config;
use sleeper_mcp::constants::DEFAULT_LOG_FILE_NAME;
use sleeper_mcp::error::AppError;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn env_filter(level: &str) -> Result<EnvFilter, AppError> {
    let directive = format!("sleeper_mcp={level}")
        .parse()
        .map_err(|e| AppError::log_setup_error(format!("Invalid log directive: {e}")))?;
    Ok(EnvFilter::from_default_env().add_directive(directive))
}

/// Resolves the log directory and file name: `--log-file`, then the
/// configured path, then the platform log directory.
fn resolve_log_location(args: &Args, config: &Config) -> (String, String) {
    match args.log_file.as_ref().or(config.log_file_path.as_ref()) {
        Some(custom_path) => {
            let path = Path::new(custom_path);
            let parent = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(DEFAULT_LOG_FILE_NAME);
            (parent.to_string_lossy().to_string(), file_name.to_string())
        }
        None => (
            Config::get_log_dir_path(),
            DEFAULT_LOG_FILE_NAME.to_string(),
        ),
    }
}

/// Sets up logging for the process.
///
/// Always logs to a daily-rolling file through a non-blocking writer. With
/// `--debug` a second layer writes to stderr. Nothing is ever written to
/// stdout, which carries protocol messages.
///
/// Returns the log file path and the guard that must be kept alive for the
/// duration of the program to ensure proper log flushing.
pub async fn setup_logging(args: &Args, config: &Config) -> Result<(String, WorkerGuard), AppError> {
    let (log_dir, log_file_name) = resolve_log_location(args, config);

    if !Path::new(&log_dir).exists() {
        tokio::fs::create_dir_all(&log_dir).await.map_err(|e| {
            AppError::log_setup_error(format!("Failed to create log directory: {e}"))
        })?;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, &log_file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let level = if args.debug { "debug" } else { "info" };

    let stderr_layer = if args.debug {
        Some(
            fmt::Layer::new()
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .with_filter(env_filter(level)?),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(
            fmt::Layer::new()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(env_filter(level)?),
        )
        .with(stderr_layer)
        .try_init()
        .map_err(|e| AppError::log_setup_error(format!("Failed to install subscriber: {e}")))?;

    let log_file_path = format!("{log_dir}/{log_file_name}");
    Ok((log_file_path, guard))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_log_file_wins_over_config() {
        let args = Args::try_parse_from(["sleeper_mcp", "--log-file", "/tmp/a/cli.log"]).unwrap();
        let config = Config {
            log_file_path: Some("/tmp/b/config.log".to_string()),
            ..Config::default()
        };
        let (dir, name) = resolve_log_location(&args, &config);
        assert_eq!(dir, "/tmp/a");
        assert_eq!(name, "cli.log");
    }

    #[test]
    fn test_bare_file_name_uses_current_dir() {
        let args = Args::try_parse_from(["sleeper_mcp", "--log-file", "mcp.log"]).unwrap();
        let (dir, name) = resolve_log_location(&args, &Config::default());
        assert_eq!(dir, ".");
        assert_eq!(name, "mcp.log");
    }

    #[test]
    fn test_default_location() {
        let args = Args::try_parse_from(["sleeper_mcp"]).unwrap();
        let (dir, name) = resolve_log_location(&args, &Config::default());
        assert_eq!(dir, Config::get_log_dir_path());
        assert_eq!(name, DEFAULT_LOG_FILE_NAME);
    }
}
