use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// True when any configuration-management flag is present.
pub fn is_config_operation(args: &Args) -> bool {
    args.list_config
        || args.new_api_url.is_some()
        || args.new_log_file_path.is_some()
        || args.clear_log_file_path
}

/// Sleeper fantasy football tools over the Model Context Protocol
///
/// With no flags, serves JSON-RPC requests on stdin and answers on stdout.
/// Logs go to a daily-rolling file and never to stdout.
///
/// One-shot modes:
/// - --list-tools prints the available tools
/// - --call runs a single tool and prints its result
/// - --refresh-players rebuilds the player cache file
#[derive(Parser, Debug)]
#[command(about, version, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// Print the available tools with their descriptions and exit
    #[arg(long = "list-tools", help_heading = "One-shot")]
    pub list_tools: bool,

    /// Run one tool and print its text result to stdout.
    /// Exits with a non-zero status when the tool reports an error.
    #[arg(long = "call", value_name = "TOOL", help_heading = "One-shot")]
    pub call: Option<String>,

    /// JSON object of arguments for --call
    #[arg(
        long = "args",
        value_name = "JSON",
        requires = "call",
        default_value = "{}",
        help_heading = "One-shot"
    )]
    pub call_args: String,

    /// Download the player directory and rewrite the cache file, then exit
    #[arg(long = "refresh-players", help_heading = "One-shot")]
    pub refresh_players: bool,

    /// Update the API base URL in config
    #[arg(long = "set-api-url", value_name = "URL", help_heading = "Configuration")]
    pub new_api_url: Option<String>,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", value_name = "PATH", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the default log location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Also write logs to stderr at debug level
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", value_name = "PATH", help_heading = "Debug")]
    pub log_file: Option<String>,
}
