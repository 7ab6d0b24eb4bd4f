pub mod client;
mod fetch_utils;
pub mod http_client;
pub mod urls;

pub use client::{SleeperApi, SleeperClient};
pub use http_client::create_http_client_with_timeout;
pub use urls::*;
