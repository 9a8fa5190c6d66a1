use serde::{Deserialize, Serialize};

/// Display fields resolved from a row through an ordered alias list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SemanticField {
    Title,
    Image,
    Link,
    Description,
    Terms,
    Coupon,
}

impl SemanticField {
    /// Accepted header spellings, most preferred first.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            SemanticField::Title => &["Offer Title", "Title", "Offer"],
            SemanticField::Image => &["Image", "Offer Image", "image", "Credit Card Image", "Image URL"],
            SemanticField::Link => &["Link", "Offer Link", "Offer URL", "Url", "URL"],
            SemanticField::Description => &["Description", "Details", "Offer Description", "Benefit"],
            SemanticField::Terms => &[
                "Terms and conditions",
                "Terms & conditions",
                "Terms & Conditions",
                "T&C",
                "Terms",
            ],
            SemanticField::Coupon => &["Coupon code", "Coupon Code", "Coupon", "Code"],
        }
    }
}

/// Header spellings of the inclusion flag seen across merchant sheets.
pub const INCLUSION_FLAG_HEADERS: &[&str] = &[
    "Non-Payments-Offers",
    "Non Payment Offers",
    "Non-Payment Offers",
    "NonPaymentsOffers",
    "Non Payments Offers",
];
