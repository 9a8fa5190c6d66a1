pub mod html;
pub mod text;

use anyhow::Result;
use clap::ValueEnum;

use crate::board::BoardView;

pub use html::render_html;
pub use text::render_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

pub fn render(views: &[BoardView], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(views)),
        OutputFormat::Html => Ok(render_html(views)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(views)?),
    }
}
