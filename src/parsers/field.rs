use crate::models::{Row, SemanticField};

use super::text::normalize_key;

/// Strategies tried in order when resolving a field; the first one that
/// produces a usable value wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// Header equals an alias byte for byte.
    Exact,
    /// Normalized header equals a normalized alias, or extends it with a
    /// space-separated suffix (`image 1` for alias `image`).
    Normalized,
}

pub const MATCH_RULES: [MatchRule; 2] = [MatchRule::Exact, MatchRule::Normalized];

impl MatchRule {
    pub fn resolve<'r>(&self, row: &'r Row, aliases: &[&str]) -> Option<&'r str> {
        match self {
            MatchRule::Exact => aliases
                .iter()
                .filter_map(|alias| row.get(alias))
                .find_map(usable),
            MatchRule::Normalized => {
                let headers: Vec<(String, &str)> = row
                    .cells()
                    .map(|(header, value)| (normalize_key(header), value))
                    .collect();

                aliases
                    .iter()
                    .map(|alias| normalize_key(alias))
                    .filter(|wanted| !wanted.is_empty())
                    .find_map(|wanted| {
                        headers
                            .iter()
                            .filter(|(header, _)| header_matches(header, &wanted))
                            .find_map(|(_, value)| usable(*value))
                    })
            }
        }
    }
}

/// Full equality or prefix-plus-space. Never a bare substring match.
pub fn header_matches(normalized_header: &str, normalized_alias: &str) -> bool {
    match normalized_header.strip_prefix(normalized_alias) {
        Some("") => true,
        Some(rest) => rest.starts_with(' '),
        None => false,
    }
}

fn usable(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// First usable value for the given aliases, trimmed. `None` when every
/// candidate is missing or blank.
pub fn resolve_field<'r>(row: &'r Row, aliases: &[&str]) -> Option<&'r str> {
    MATCH_RULES
        .iter()
        .find_map(|rule| rule.resolve(row, aliases))
}

pub fn resolve_semantic<'r>(row: &'r Row, field: SemanticField) -> Option<&'r str> {
    resolve_field(row, field.aliases())
}

/// Value of the first header whose normalized form equals `wanted`'s, blank or not.
pub fn value_by_normalized_key<'r>(row: &'r Row, wanted: &str) -> Option<&'r str> {
    let wanted = normalize_key(wanted);
    row.cells()
        .find(|(header, _)| normalize_key(header) == wanted)
        .map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn exact_match_wins_before_fuzzy() {
        let row = Row::from_pairs(
            "Amazon.csv",
            &[("offer title", "fuzzy"), ("Title", "exact")],
        );
        assert_eq!(resolve_semantic(&row, SemanticField::Title), Some("exact"));
    }

    #[test]
    fn exact_match_respects_alias_priority() {
        let row = Row::from_pairs("Amazon.csv", &[("Title", "second"), ("Offer Title", "first")]);
        assert_eq!(resolve_semantic(&row, SemanticField::Title), Some("first"));
    }

    #[test]
    fn blank_exact_match_falls_through() {
        let row = Row::from_pairs("Amazon.csv", &[("Image", "   "), ("Image_1", "https://cdn.example.com/a.png")]);
        assert_eq!(
            resolve_semantic(&row, SemanticField::Image),
            Some("https://cdn.example.com/a.png")
        );
    }

    #[test]
    fn normalized_match_handles_case_and_bom() {
        let row = Row::from_pairs("Zepto.csv", &[("\u{feff}COUPON  CODE", "SAVE50")]);
        assert_eq!(resolve_semantic(&row, SemanticField::Coupon), Some("SAVE50"));
    }

    #[test]
    fn normalized_match_prefers_earlier_alias() {
        let row = Row::from_pairs(
            "Myntra.csv",
            &[("benefit ", "from benefit"), ("details", "from details")],
        );
        assert_eq!(
            resolve_semantic(&row, SemanticField::Description),
            Some("from details")
        );
    }

    #[test]
    fn suffix_match_requires_space_boundary() {
        let row = Row::from_pairs("Ajio.csv", &[("Images", "https://x.example/a.png")]);
        assert_eq!(resolve_semantic(&row, SemanticField::Image), None);

        let row = Row::from_pairs("Ajio.csv", &[("image 2", "https://x.example/a.png")]);
        assert_eq!(
            resolve_semantic(&row, SemanticField::Image),
            Some("https://x.example/a.png")
        );
    }

    #[test]
    fn unrelated_headers_never_match() {
        let row = Row::from_pairs("Ajio.csv", &[("Background Image", "https://x.example/a.png")]);
        assert_eq!(resolve_semantic(&row, SemanticField::Image), None);
    }

    #[test]
    fn accented_header_does_not_match_plain_alias() {
        let row = Row::from_pairs("Ajio.csv", &[("Tîtle", "hat")]);
        assert_eq!(resolve_field(&row, &["Title"]), None);
    }

    #[test]
    fn values_are_trimmed() {
        let row = Row::from_pairs("Ajio.csv", &[("Offer", "  Flat 20% off  ")]);
        assert_eq!(resolve_semantic(&row, SemanticField::Title), Some("Flat 20% off"));
    }

    #[test]
    fn header_matches_boundaries() {
        assert!(header_matches("image", "image"));
        assert!(header_matches("image 1", "image"));
        assert!(!header_matches("imageurl", "image"));
        assert!(!header_matches("offer image", "image"));
    }

    #[test]
    fn value_by_normalized_key_returns_blank_values() {
        let row = Row::from_pairs("Ajio.csv", &[("Non Payments Offers", "")]);
        assert_eq!(value_by_normalized_key(&row, "Non-Payments-Offers"), Some(""));
        assert_eq!(value_by_normalized_key(&row, "Non Payment Offers"), None);
    }
}
