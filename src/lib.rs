//! Sleeper fantasy football API exposed as Model Context Protocol tools.
//!
//! This library wraps the public Sleeper read-only API, keeps a persistent
//! player directory for enriching rosters and trending lists, and renders
//! playoff brackets with final standings as text.
//!
//! # Examples
//!
//! ```rust,no_run
//! use sleeper_mcp::config::Config;
//! use sleeper_mcp::data_fetcher::SleeperService;
//! use sleeper_mcp::error::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let service = SleeperService::from_config(&config)?;
//!
//!     // Rosters with player names attached
//!     let rosters = service.get_league_rosters("289646328504385536", true).await?;
//!     println!("{} rosters", rosters.as_array().map_or(0, Vec::len));
//!
//!     // Both playoff brackets and final standings as text
//!     println!("{}", service.get_playoff_results("289646328504385536").await?);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod mcp;
pub mod playoffs;
pub mod testing_utils;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data_fetcher::{PlayerDirectory, SleeperApi, SleeperClient, SleeperService};
pub use error::AppError;
pub use mcp::McpServer;
pub use playoffs::format_playoff_results;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
