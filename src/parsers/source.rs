use serde::{Deserialize, Serialize};

use crate::models::{OTHER_GROUP_LABEL, OTHER_SOURCE_FILE};

use super::text::normalize;

/// Merges several file names into one merchant key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "match", rename_all = "snake_case")]
pub enum AliasRule {
    /// Any key starting with `prefix` becomes `key` (`yatraDomestic` -> `yatra`).
    Prefix { prefix: String, key: String },
    /// A key equal to `name` becomes `key`.
    Exact { name: String, key: String },
}

impl AliasRule {
    fn apply(&self, folded: &str) -> Option<String> {
        match self {
            AliasRule::Prefix { prefix, key } => {
                let prefix = fold(prefix);
                (!prefix.is_empty() && folded.starts_with(&prefix)).then(|| fold(key))
            }
            AliasRule::Exact { name, key } => (folded == fold(name)).then(|| fold(key)),
        }
    }
}

pub fn default_alias_rules() -> Vec<AliasRule> {
    vec![
        AliasRule::Prefix {
            prefix: "yatra".to_string(),
            key: "yatra".to_string(),
        },
        AliasRule::Exact {
            name: "mmt".to_string(),
            key: "makemytrip".to_string(),
        },
        AliasRule::Exact {
            name: "emt".to_string(),
            key: "easemytrip".to_string(),
        },
    ]
}

/// Derives the canonical merchant key used for logo lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceKeyMapper {
    rules: Vec<AliasRule>,
}

impl Default for SourceKeyMapper {
    fn default() -> Self {
        Self::new(default_alias_rules())
    }
}

impl SourceKeyMapper {
    pub fn new(rules: Vec<AliasRule>) -> Self {
        Self { rules }
    }

    pub fn source_key(&self, file_name: &str) -> String {
        let folded = fold(strip_extension(file_name));
        self.rules
            .iter()
            .find_map(|rule| rule.apply(&folded))
            .unwrap_or(folded)
    }
}

/// Normalized text with spaces, hyphens and underscores removed.
fn fold(text: &str) -> String {
    normalize(text)
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .collect()
}

/// Drops a trailing `.ext` (alphanumeric, non-empty) when something precedes it.
pub fn strip_extension(file_name: &str) -> &str {
    let trimmed = file_name.trim();
    match trimmed.rsplit_once('.') {
        Some((stem, ext))
            if !stem.trim().is_empty()
                && !ext.is_empty()
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            stem
        }
        _ => trimmed,
    }
}

/// Human-readable group label for a source file: extension dropped,
/// separators turned into spaces, every word capitalized.
pub fn group_label(source_file: &str) -> String {
    let file = if source_file.trim().is_empty() {
        OTHER_SOURCE_FILE
    } else {
        source_file
    };

    let label = strip_extension(file)
        .replace(&['-', '_'][..], " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");

    if label.is_empty() {
        OTHER_GROUP_LABEL.to_string()
    } else {
        label
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn yatra_files_share_one_key() {
        let mapper = SourceKeyMapper::default();
        assert_eq!(mapper.source_key("yatraDomestic.csv"), "yatra");
        assert_eq!(mapper.source_key("yatraInternational.csv"), "yatra");
    }

    #[test]
    fn casing_and_separators_fold_together() {
        let mapper = SourceKeyMapper::default();
        assert_eq!(mapper.source_key("MakeMyTrip.csv"), "makemytrip");
        assert_eq!(mapper.source_key("make-my_trip.CSV"), "makemytrip");
        assert_eq!(mapper.source_key("Air India.csv"), "airindia");
        assert_eq!(mapper.source_key("\u{feff}Zomato Dining.csv"), "zomatodining");
    }

    #[test]
    fn short_forms_collapse() {
        let mapper = SourceKeyMapper::default();
        assert_eq!(mapper.source_key("MMT.csv"), "makemytrip");
        assert_eq!(mapper.source_key("EMT.csv"), "easemytrip");
    }

    #[test]
    fn custom_rules_replace_defaults() {
        let mapper = SourceKeyMapper::new(vec![AliasRule::Prefix {
            prefix: "Swiggy".to_string(),
            key: "swiggy".to_string(),
        }]);
        assert_eq!(mapper.source_key("SwiggyDineout.csv"), "swiggy");
        assert_eq!(mapper.source_key("yatraDomestic.csv"), "yatradomestic");
    }

    #[test]
    fn strip_extension_keeps_dotfiles_and_plain_names() {
        assert_eq!(strip_extension("Goibibo.csv"), "Goibibo");
        assert_eq!(strip_extension("Goibibo"), "Goibibo");
        assert_eq!(strip_extension(".csv"), ".csv");
        assert_eq!(strip_extension("v1.2 deals.csv"), "v1.2 deals");
    }

    #[test]
    fn group_labels_are_humanized() {
        assert_eq!(group_label("Goibibo.csv"), "Goibibo");
        assert_eq!(group_label("easeMyTrip.csv"), "EaseMyTrip");
        assert_eq!(group_label("airport_lounge-offers.csv"), "Airport Lounge Offers");
        assert_eq!(group_label(""), "Other");
    }
}
