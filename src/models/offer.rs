use serde::{Deserialize, Serialize};

/// How a card's image was chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDecision {
    /// Reference to show first. Empty means nothing to show.
    pub display_src: String,
    /// True when `display_src` is the merchant logo rather than the row's own image.
    pub is_fallback: bool,
    /// Merchant logo to switch to if `display_src` fails to load. Empty if none.
    pub fallback_src: String,
}

impl ImageDecision {
    pub fn has_image(&self) -> bool {
        !self.display_src.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "url", rename_all = "snake_case")]
pub enum LinkDecision {
    Usable(String),
    NoLink,
}

impl LinkDecision {
    pub fn from_normalized(url: String) -> Self {
        if url.is_empty() {
            LinkDecision::NoLink
        } else {
            LinkDecision::Usable(url)
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            LinkDecision::Usable(url) => Some(url),
            LinkDecision::NoLink => None,
        }
    }
}

/// Display-ready projection of a row. Rebuilt from the row whenever needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub title: String,
    pub description: Option<String>,
    pub terms: Option<String>,
    pub coupon: Option<String>,
    pub image: ImageDecision,
    pub link: LinkDecision,
    pub source_file: String,
}

/// Offers from one merchant sheet under its human-readable label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferGroup {
    pub label: String,
    pub offers: Vec<Offer>,
}

impl OfferGroup {
    pub fn heading(&self) -> String {
        format!("{} Offers", self.label)
    }
}
