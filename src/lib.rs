//! Loads per-merchant offer sheets for a category, keeps the rows flagged as
//! non-payment offers and resolves them into grouped, display-ready cards.

pub mod aggregate;
pub mod board;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod parsers;
pub mod render;
pub mod sources;
pub mod utils;

pub use aggregate::{filter_included, group, OfferBuilder};
pub use board::{Board, BoardStatus, BoardView, LoadTicket};
pub use config::AppConfig;
pub use error::{LoadError, SourceError};
pub use loader::{CategoryLoad, CategoryLoader, FailedSource};
pub use sources::{DirectoryRowSource, HttpRowSource, RowSource};
