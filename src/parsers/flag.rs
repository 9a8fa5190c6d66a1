use crate::models::{Row, INCLUSION_FLAG_HEADERS};

use super::field::value_by_normalized_key;
use super::text::normalize_opt;

const TRUTHY: &[&str] = &["yes", "y", "true", "1"];

/// True for the truthy spellings (`yes`, `y`, `true`, `1`) in any case or padding.
pub fn is_included(raw: Option<&str>) -> bool {
    let value = normalize_opt(raw);
    TRUTHY.contains(&value.as_str())
}

/// Raw inclusion-flag cell: the first non-blank value among the accepted
/// header spellings.
pub fn inclusion_value(row: &Row) -> Option<&str> {
    INCLUSION_FLAG_HEADERS
        .iter()
        .filter_map(|header| value_by_normalized_key(row, header))
        .find(|value| !value.trim().is_empty())
}

/// Whether a row belongs on the board. Rows without a flag are excluded.
pub fn row_is_included(row: &Row) -> bool {
    is_included(inclusion_value(row))
}
