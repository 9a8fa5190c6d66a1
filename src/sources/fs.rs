use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

use crate::error::SourceError;
use crate::models::Row;
use crate::sources::{parse_csv, RowSource};

/// Reads sheets from a local directory laid out like the static host.
pub struct DirectoryRowSource {
    root: PathBuf,
    name: String,
}

impl DirectoryRowSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let name = root.display().to_string();
        Self { root, name }
    }
}

#[async_trait]
impl RowSource for DirectoryRowSource {
    async fn fetch_rows(&self, folder: &str, file_name: &str) -> Result<Vec<Row>, SourceError> {
        let path = self.root.join(folder).join(file_name);
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| SourceError::Io {
                path: path.display().to_string(),
                source,
            })?;

        let rows = parse_csv(&content, file_name)?;
        info!("Read {} rows from {}", rows.len(), path.display());
        Ok(rows)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
