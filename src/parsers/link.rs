use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use super::text::strip_invisible;

static WWW_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^www\.").expect("Invalid www regex")
});

// A scheme is followed by `//` or a non-digit; `host:8080` is a port, not a scheme
static SCHEME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[a-z][a-z0-9+.-]*:(?://|[^0-9])").expect("Invalid scheme regex")
});

static HTTP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^https?://").expect("Invalid http regex")
});

// label.label[.tld] with optional port and path/query/fragment
static BARE_DOMAIN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z]{2,}(?::\d{1,5})?(?:[/?#]\S*)?$")
        .expect("Invalid bare domain regex")
});

const QUOTE_PAIRS: &[(char, char)] = &[
    ('"', '"'),
    ('\'', '\''),
    ('`', '`'),
    ('\u{201c}', '\u{201d}'),
    ('\u{2018}', '\u{2019}'),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkPolicy {
    /// Placeholder values meaning "no link", compared case-insensitively.
    pub sentinels: Vec<String>,
    /// Repair `example.com/deal` into `https://example.com/deal`.
    pub accept_bare_domains: bool,
}

impl Default for LinkPolicy {
    fn default() -> Self {
        Self {
            sentinels: ["na", "n/a", "null", "undefined", "-", "#"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            accept_bare_domains: true,
        }
    }
}

impl LinkPolicy {
    pub fn is_sentinel(&self, value: &str) -> bool {
        self.sentinels.iter().any(|s| s.eq_ignore_ascii_case(value))
    }

    /// Repairs `raw` into an absolute http(s) URL. Empty string means rejected.
    pub fn normalize(&self, raw: &str) -> String {
        let cleaned = strip_invisible(raw);
        let unquoted = strip_quotes(cleaned.trim()).trim();

        if unquoted.is_empty() || self.is_sentinel(unquoted) {
            return String::new();
        }

        let repaired = if unquoted.starts_with("//") {
            format!("https:{unquoted}")
        } else if WWW_REGEX.is_match(unquoted) {
            format!("https://{unquoted}")
        } else if self.accept_bare_domains
            && !SCHEME_REGEX.is_match(unquoted)
            && BARE_DOMAIN_REGEX.is_match(unquoted)
        {
            format!("https://{unquoted}")
        } else {
            unquoted.to_string()
        };

        if !HTTP_REGEX.is_match(&repaired) || !is_valid_absolute(&repaired) {
            return String::new();
        }

        repaired
    }
}

/// `normalize` under the default policy.
pub fn normalize_link(raw: &str) -> String {
    LinkPolicy::default().normalize(raw)
}

fn strip_quotes(text: &str) -> &str {
    for (open, close) in QUOTE_PAIRS {
        if let Some(inner) = text
            .strip_prefix(*open)
            .and_then(|rest| rest.strip_suffix(*close))
        {
            return inner;
        }
    }
    text
}

fn is_valid_absolute(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().map_or(false, |host| !host.is_empty())
        }
        Err(_) => false,
    }
}
