use async_trait::async_trait;

use crate::error::SourceError;
use crate::models::Row;

mod fs;
mod http;
mod sheet;

pub use self::fs::DirectoryRowSource;
pub use self::http::HttpRowSource;
pub use self::sheet::{disambiguate_headers, parse_csv};

/// Supplies the parsed rows of one merchant sheet.
///
/// Every returned row carries `file_name` as its source file. A failure only
/// concerns that one sheet.
#[async_trait]
pub trait RowSource: Send + Sync {
    async fn fetch_rows(&self, folder: &str, file_name: &str) -> Result<Vec<Row>, SourceError>;
    fn name(&self) -> &str;
}
