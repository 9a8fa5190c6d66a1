pub mod category;
pub mod field;
pub mod offer;
pub mod row;

pub use category::*;
pub use field::*;
pub use offer::*;
pub use row::*;

// Display defaults
pub const DEFAULT_TITLE: &str = "Offer";
pub const DEFAULT_BOARD_LABEL: &str = "Offers";
pub const OTHER_SOURCE_FILE: &str = "Other.csv";
pub const OTHER_GROUP_LABEL: &str = "Other";
pub const EMPTY_BOARD_MESSAGE: &str = "No non-payment offers available";
pub const DISCLAIMER: &str = "All offers, coupons, and discounts listed on our platform are provided for informational purposes only. \
We do not guarantee the accuracy, availability, or validity of any offer. \
Users are advised to verify the terms and conditions with the respective merchants before making any purchase. \
We are not responsible for any discrepancies, expired offers, or losses arising from the use of these coupons.";
