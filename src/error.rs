use thiserror::Error;

/// Failure to obtain or decode one merchant sheet.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error for {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Category not found: {0}")]
    CategoryNotFound(String),
}
