use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use non_payment_offers::render::{render, OutputFormat};
use non_payment_offers::sources::{DirectoryRowSource, HttpRowSource, RowSource};
use non_payment_offers::utils::http::create_client;
use non_payment_offers::{AppConfig, Board, CategoryLoader};

#[derive(Debug, Parser)]
#[command(name = "offer-board", about = "Show non-payment offers grouped by merchant")]
struct Cli {
    /// Category key to show. Defaults to the first configured category.
    #[arg(short, long)]
    category: Option<String>,

    /// Show every configured category.
    #[arg(long, conflicts_with = "category")]
    all: bool,

    /// List configured categories and exit.
    #[arg(long)]
    list: bool,

    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Read sheets from a local directory instead of the static host.
    #[arg(long, env = "OFFERS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Configuration file (defaults to ./offers.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit logs as JSON.
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so rendered output stays clean on stdout
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("non_payment_offers=info".parse()?);
    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let config = AppConfig::load(cli.config.as_deref())?;

    if cli.list {
        for category in &config.categories {
            println!("{:<12} {} ({} files)", category.key, category.label, category.files.len());
        }
        return Ok(());
    }

    let source: Arc<dyn RowSource> = match &cli.data_dir {
        Some(dir) => Arc::new(DirectoryRowSource::new(dir)),
        None => {
            let client = create_client(&config).context("Failed to build HTTP client")?;
            Arc::new(HttpRowSource::from_config(client, &config))
        }
    };

    let keys: Vec<String> = if cli.all {
        config.categories.iter().map(|c| c.key.clone()).collect()
    } else {
        match cli.category.clone().or_else(|| config.categories.first().map(|c| c.key.clone())) {
            Some(key) => vec![key],
            None => bail!("No categories configured"),
        }
    };

    let loader = CategoryLoader::new(source, config.categories.clone());
    let board = Board::new(loader, config.offer_builder());

    let mut views = Vec::with_capacity(keys.len());
    for key in &keys {
        info!("Activating category {}", key);
        board.activate(key).await;
        views.push(board.view().await);
    }

    print!("{}", render(&views, cli.format)?);
    Ok(())
}
