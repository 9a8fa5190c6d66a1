use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::LoadError;
use crate::models::{find_category, Category, Row};
use crate::sources::RowSource;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedSource {
    pub file: String,
    pub reason: String,
}

/// Everything fetched for one category activation.
#[derive(Debug, Clone)]
pub struct CategoryLoad {
    pub category: Category,
    /// Rows from every sheet that loaded, in configured file order.
    pub rows: Vec<Row>,
    pub failed: Vec<FailedSource>,
    pub loaded_at: DateTime<Utc>,
}

impl CategoryLoad {
    pub fn failed_files(&self) -> Vec<String> {
        self.failed.iter().map(|f| f.file.clone()).collect()
    }
}

/// Fetches every sheet of a category concurrently. One sheet failing never
/// affects the others.
#[derive(Clone)]
pub struct CategoryLoader {
    source: Arc<dyn RowSource>,
    categories: Arc<Vec<Category>>,
}

impl CategoryLoader {
    pub fn new(source: Arc<dyn RowSource>, categories: Vec<Category>) -> Self {
        Self {
            source,
            categories: Arc::new(categories),
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, key: &str) -> Option<&Category> {
        find_category(&self.categories, key)
    }

    pub async fn load(&self, key: &str) -> Result<CategoryLoad, LoadError> {
        let category = self
            .category(key)
            .cloned()
            .ok_or_else(|| LoadError::CategoryNotFound(key.to_string()))?;

        info!(
            "Loading {} ({} files from {})",
            category.label,
            category.files.len(),
            self.source.name()
        );

        let fetches = category.files.iter().map(|file| {
            let source = self.source.clone();
            let folder = category.folder.clone();

            async move {
                let result = source.fetch_rows(&folder, file).await;
                (file.clone(), result)
            }
        });

        let mut rows = Vec::new();
        let mut failed = Vec::new();
        for (file, result) in join_all(fetches).await {
            match result {
                Ok(file_rows) => rows.extend(file_rows),
                Err(e) => {
                    warn!("Skipping {}/{}: {}", category.folder, file, e);
                    failed.push(FailedSource {
                        file,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Loaded {} rows for {} ({} files failed)",
            rows.len(),
            category.label,
            failed.len()
        );

        Ok(CategoryLoad {
            category,
            rows,
            failed,
            loaded_at: Utc::now(),
        })
    }
}
