//! Generic HTTP fetching with status-aware error mapping

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument};

use crate::error::AppError;

/// Performs exactly one GET against `url` and parses the JSON body.
///
/// There is no retry and no response caching: a transport failure or a
/// non-success status aborts the call with the matching `AppError`.
///
/// # Errors
/// * `NetworkTimeout` / `NetworkConnection` / `ApiFetch` - transport failures
/// * `ApiNotFound`, `ApiRateLimit`, `ApiClientError`, `ApiServiceUnavailable`,
///   `ApiServerError` - non-success HTTP statuses
/// * `ApiNoData`, `ApiMalformedJson`, `ApiUnexpectedStructure` - body problems
#[instrument(skip(client))]
pub(super) async fn fetch<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, AppError> {
    info!("Fetching data from URL: {url}");

    let response = match client.get(url).send().await {
        Ok(resp) => resp,
        Err(e) => {
            error!("Request failed for URL {}: {}", url, e);
            return Err(if e.is_timeout() {
                AppError::network_timeout(url)
            } else if e.is_connect() {
                AppError::network_connection(url, e.to_string())
            } else {
                AppError::ApiFetch(e)
            });
        }
    };

    let status = response.status();
    debug!("Response status: {status}");

    if !status.is_success() {
        let status_code = status.as_u16();
        let reason = status.canonical_reason().unwrap_or("Unknown error");

        error!("HTTP {} - {} (URL: {})", status_code, reason, url);

        return Err(match status_code {
            404 => AppError::api_not_found(url),
            429 => AppError::api_rate_limit(reason, url),
            400..=499 => AppError::api_client_error(status_code, reason, url),
            502 | 503 => AppError::api_service_unavailable(status_code, reason, url),
            _ => AppError::api_server_error(status_code, reason, url),
        });
    }

    let response_text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to read response text from URL {}: {}", url, e);
            return Err(if e.is_timeout() {
                AppError::network_timeout(url)
            } else {
                AppError::ApiFetch(e)
            });
        }
    };

    debug!("Response length: {} bytes", response_text.len());

    parse_body(&response_text, url)
}

/// Classifies a body that fails to parse: empty, not JSON at all, or JSON of
/// the wrong shape.
fn parse_body<T: DeserializeOwned>(text: &str, url: &str) -> Result<T, AppError> {
    match serde_json::from_str::<T>(text) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            error!("Failed to parse API response: {} (URL: {})", e, url);
            debug!(
                "Response text (first 200 chars): {}",
                text.chars().take(200).collect::<String>()
            );

            let trimmed = text.trim_start();
            if trimmed.is_empty() {
                Err(AppError::api_no_data("Response body is empty", url))
            } else if !trimmed.starts_with('{')
                && !trimmed.starts_with('[')
                && !trimmed.starts_with("null")
            {
                Err(AppError::api_malformed_json(
                    "Response is not valid JSON",
                    url,
                ))
            } else {
                Err(AppError::api_unexpected_structure(e.to_string(), url))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_parse_body_success() {
        let parsed: Vec<Value> = parse_body(r#"[{"r":1}]"#, "u").unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_parse_body_empty() {
        let result: Result<Value, _> = parse_body("   ", "u");
        assert!(matches!(result.unwrap_err(), AppError::ApiNoData { .. }));
    }

    #[test]
    fn test_parse_body_not_json() {
        let result: Result<Value, _> = parse_body("<html>oops</html>", "u");
        assert!(matches!(result.unwrap_err(), AppError::ApiMalformedJson { .. }));
    }

    #[test]
    fn test_parse_body_wrong_shape() {
        let result: Result<Vec<Value>, _> = parse_body(r#"{"not":"a list"}"#, "u");
        assert!(matches!(
            result.unwrap_err(),
            AppError::ApiUnexpectedStructure { .. }
        ));
    }

    #[test]
    fn test_parse_body_null_passes_through() {
        // Sleeper answers unknown users and leagues with a literal null
        let parsed: Value = parse_body("null", "u").unwrap();
        assert_eq!(parsed, Value::Null);
    }
}
