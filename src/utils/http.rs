use anyhow::Result;
use reqwest::{Client, ClientBuilder, Response, StatusCode};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, warn};

use crate::config::AppConfig;
use crate::error::SourceError;

pub fn create_client(config: &AppConfig) -> Result<Client> {
    let client = ClientBuilder::new()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .pool_max_idle_per_host(6)
        .build()?;

    Ok(client)
}

fn is_retryable(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

/// GETs `url`, retrying transport errors, 5xx and 429 with exponential backoff.
/// Other non-success statuses fail immediately.
pub async fn fetch_with_retry(
    client: &Client,
    url: &str,
    max_retries: u32,
    backoff: Duration,
) -> Result<Response, SourceError> {
    let max_attempts = max_retries.max(1);
    let mut attempts = 0;

    loop {
        attempts += 1;

        let failure = match client.get(url).send().await {
            Ok(response) if response.status().is_success() => return Ok(response),
            Ok(response) => {
                let status = response.status();
                warn!("HTTP error {}: {}", status, url);
                let failure = SourceError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_string(),
                };
                if !is_retryable(status) {
                    return Err(failure);
                }
                failure
            }
            Err(e) => {
                error!("Request failed for {}: {}", url, e);
                SourceError::Http {
                    url: url.to_string(),
                    source: e,
                }
            }
        };

        if attempts >= max_attempts {
            return Err(failure);
        }

        let delay = backoff.saturating_mul(2u32.saturating_pow(attempts - 1));
        warn!("Retrying in {:?}... (attempt {}/{})", delay, attempts + 1, max_attempts);
        sleep(delay).await;
    }
}
