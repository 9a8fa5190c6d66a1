use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::aggregate::OfferBuilder;
use crate::models::Category;
use crate::parsers::{default_alias_rules, AliasRule, ImagePolicy, LinkPolicy, SourceKeyMapper};

const DEFAULT_CONFIG_FILE: &str = "offers";
const ENV_PREFIX: &str = "OFFERS";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root of the static host serving `<folder>/<file>` sheets.
    pub base_url: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    pub categories: Vec<Category>,
    /// Merchant logo table keyed by source key.
    pub logos: HashMap<String, String>,
    pub link: LinkPolicy,
    pub image: ImagePolicy,
    pub source_aliases: Vec<AliasRule>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            user_agent: concat!("non-payment-offers/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout_secs: 25,
            max_retries: 3,
            retry_backoff_ms: 500,
            categories: default_categories(),
            logos: HashMap::new(),
            link: LinkPolicy::default(),
            image: ImagePolicy::default(),
            source_aliases: default_alias_rules(),
        }
    }
}

impl AppConfig {
    /// Built-in defaults, overlaid by `offers.toml` (or `path`) when present,
    /// then by `OFFERS__*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .context("Failed to read configuration")?;

        settings
            .try_deserialize::<AppConfig>()
            .context("Invalid configuration")
    }

    pub fn category(&self, key: &str) -> Option<&Category> {
        crate::models::find_category(&self.categories, key)
    }

    pub fn source_mapper(&self) -> SourceKeyMapper {
        SourceKeyMapper::new(self.source_aliases.clone())
    }

    pub fn offer_builder(&self) -> OfferBuilder {
        OfferBuilder::new(
            self.image.clone(),
            self.link.clone(),
            self.logos.clone(),
            self.source_mapper(),
        )
    }
}

pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("movie", "Movie Offers", "Movie-Offers", &["BookMyShow.csv", "PaytmMovies.csv"]),
        Category::new(
            "hotel",
            "Hotel Offers",
            "Hotel-Offers",
            &["Cleartrip.csv", "Goibibo.csv", "MakeMyTrip.csv"],
        ),
        Category::new(
            "airline",
            "Airline Offers",
            "Airline-Offers",
            &[
                "ixigo.csv",
                "yatraDomestic.csv",
                "easeMyTrip.csv",
                "makemytrip.csv",
                "airindia.csv",
                "goibibo.csv",
                "indigo.csv",
                "yatraInternational.csv",
            ],
        ),
        Category::new(
            "bus",
            "Bus Offers",
            "Bus-Offers",
            &["Abhibus.csv", "goibibo.csv", "makemytrip.csv", "redbus.csv"],
        ),
        Category::new(
            "electronics",
            "Electronics Offers",
            "Electronics-Offers",
            &["Amazon.csv", "Flipkart.csv", "Croma.csv"],
        ),
        Category::new(
            "dineout",
            "Dineout Offers",
            "Dineout-Offers",
            &["SwiggyDineout.csv", "EazyDiner.csv", "ZomatoDining.csv"],
        ),
        Category::new(
            "delivery",
            "Delivery Offers",
            "Delivery-Offers",
            &["Swiggy.csv", "Zomato.csv", "UberEats.csv"],
        ),
        Category::new(
            "grocery",
            "Grocery Offers",
            "Grocery-Offers",
            &["Blinkit.csv", "Zepto.csv", "BigBasket.csv"],
        ),
        Category::new(
            "ecommerce",
            "Ecommerce Offers",
            "Ecommerce-Offers",
            &["Amazon.csv", "Flipkart.csv", "Myntra.csv"],
        ),
        Category::new(
            "lounge",
            "Lounge Offers",
            "Lounge-Offers",
            &["AirportLounge.csv", "RailwayLounge.csv"],
        ),
        Category::new(
            "clothing",
            "Clothing Offers",
            "Clothing-Offers",
            &["Myntra.csv", "Ajio.csv", "TataCliq.csv"],
        ),
    ]
}
