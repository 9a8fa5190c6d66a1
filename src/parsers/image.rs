use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::ImageDecision;

use super::source::SourceKeyMapper;
use super::text::strip_invisible;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagePolicy {
    /// Placeholder values meaning "no image", compared case-insensitively.
    pub sentinels: Vec<String>,
    /// Only accept `http(s)://`, `data:image/` or absolute `/` references.
    pub require_reference_shape: bool,
}

impl Default for ImagePolicy {
    fn default() -> Self {
        Self {
            sentinels: ["na", "n/a", "null", "undefined", "-", "image unavailable"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            require_reference_shape: true,
        }
    }
}

impl ImagePolicy {
    pub fn is_sentinel(&self, value: &str) -> bool {
        self.sentinels.iter().any(|s| s.eq_ignore_ascii_case(value))
    }

    /// Cleaned reference if the value can be shown as an image.
    pub fn usable(&self, value: &str) -> Option<String> {
        let cleaned = strip_invisible(value);
        let cleaned = cleaned.trim();
        if cleaned.is_empty() || self.is_sentinel(cleaned) {
            return None;
        }
        if self.require_reference_shape && !looks_like_reference(cleaned) {
            return None;
        }
        Some(cleaned.to_string())
    }

    pub fn is_usable(&self, value: &str) -> bool {
        self.usable(value).is_some()
    }
}

fn looks_like_reference(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("data:image/")
        || lower.starts_with('/')
}

/// Picks a card image, falling back to the merchant logo.
#[derive(Debug, Clone, Default)]
pub struct ImageResolver {
    policy: ImagePolicy,
    logos: HashMap<String, String>,
    sources: SourceKeyMapper,
}

impl ImageResolver {
    pub fn new(policy: ImagePolicy, logos: HashMap<String, String>, sources: SourceKeyMapper) -> Self {
        Self { policy, logos, sources }
    }

    /// Logo configured for the merchant behind `source_file`, or empty.
    pub fn logo_for(&self, source_file: &str) -> String {
        let key = self.sources.source_key(source_file);
        self.logos
            .get(&key)
            .map(|logo| logo.trim().to_string())
            .unwrap_or_default()
    }

    pub fn resolve(&self, candidate: Option<&str>, source_file: &str) -> ImageDecision {
        let fallback_src = self.logo_for(source_file);

        match candidate.and_then(|c| self.policy.usable(c)) {
            Some(display_src) => ImageDecision {
                display_src,
                is_fallback: false,
                fallback_src,
            },
            None => ImageDecision {
                display_src: fallback_src.clone(),
                is_fallback: true,
                fallback_src,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageLoadOutcome {
    /// Switched to the merchant logo; try loading this instead.
    Substituted(String),
    Hidden,
}

/// Per-card image state for recovering from a reference that fails to load.
///
/// At most one substitution happens. A second failure, an empty fallback or a
/// fallback equal to the failed reference hides the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLoadState {
    current: String,
    fallback: String,
    fallback_attempted: bool,
    hidden: bool,
}

impl ImageLoadState {
    pub fn new(decision: &ImageDecision) -> Self {
        Self {
            current: decision.display_src.clone(),
            fallback: decision.fallback_src.clone(),
            fallback_attempted: false,
            hidden: decision.display_src.is_empty(),
        }
    }

    /// Source to render, or `None` once hidden.
    pub fn current(&self) -> Option<&str> {
        (!self.hidden).then_some(self.current.as_str())
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Reference the next load error would switch to, if a switch is still allowed.
    pub fn pending_fallback(&self) -> Option<&str> {
        (!self.hidden
            && !self.fallback_attempted
            && !self.fallback.is_empty()
            && self.fallback != self.current)
            .then_some(self.fallback.as_str())
    }

    pub fn on_load_error(&mut self) -> ImageLoadOutcome {
        if self.pending_fallback().is_some() {
            self.fallback_attempted = true;
            self.current = self.fallback.clone();
            return ImageLoadOutcome::Substituted(self.current.clone());
        }

        self.hidden = true;
        ImageLoadOutcome::Hidden
    }
}
