use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Client;
use std::time::Duration;
use tracing::info;

use crate::config::AppConfig;
use crate::error::SourceError;
use crate::models::Row;
use crate::sources::{parse_csv, RowSource};
use crate::utils::http::fetch_with_retry;

/// Characters left alone by URI-component encoding.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Reads sheets from a static host laid out as `<base_url>/<folder>/<file>`.
pub struct HttpRowSource {
    client: Client,
    base_url: String,
    max_retries: u32,
    backoff: Duration,
}

impl HttpRowSource {
    pub fn new(client: Client, base_url: &str, max_retries: u32, backoff: Duration) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries,
            backoff,
        }
    }

    pub fn from_config(client: Client, config: &AppConfig) -> Self {
        Self::new(
            client,
            &config.base_url,
            config.max_retries,
            Duration::from_millis(config.retry_backoff_ms),
        )
    }

    pub fn sheet_url(&self, folder: &str, file_name: &str) -> String {
        let folder = folder
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| utf8_percent_encode(segment, COMPONENT).to_string())
            .collect::<Vec<_>>()
            .join("/");
        let file = utf8_percent_encode(file_name, COMPONENT);

        if folder.is_empty() {
            format!("{}/{}", self.base_url, file)
        } else {
            format!("{}/{}/{}", self.base_url, folder, file)
        }
    }
}

#[async_trait]
impl RowSource for HttpRowSource {
    async fn fetch_rows(&self, folder: &str, file_name: &str) -> Result<Vec<Row>, SourceError> {
        let url = self.sheet_url(folder, file_name);
        let response = fetch_with_retry(&self.client, &url, self.max_retries, self.backoff).await?;
        let body = response.text().await.map_err(|source| SourceError::Http {
            url: url.clone(),
            source,
        })?;

        let rows = parse_csv(&body, file_name)?;
        info!("Fetched {} rows from {}", rows.len(), url);
        Ok(rows)
    }

    fn name(&self) -> &str {
        &self.base_url
    }
}
