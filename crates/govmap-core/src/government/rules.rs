//! Mapping Rules
//!
//! Ordered `link` entries from the government mapping file. Each link names a
//! source government, a target government and optional thresholds.

use serde::Serialize;
use tracing::info;

use crate::document::Node;
use crate::nation::NationInput;

use super::classifier::ReformProgress;

pub const DEFAULT_MIN_POLITICAL_PROGRESS: f64 = 0.0;
pub const DEFAULT_MIN_SOCIAL_PROGRESS: f64 = 0.0;
pub const DEFAULT_MAX_SOCIAL_PROGRESS: f64 = 1.0;

/// Fields recognized inside a `link` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkField {
    SourceRegime,
    TargetRegime,
    RulingParty,
    MinPoliticalProgress,
    MinSocialProgress,
    MaxSocialProgress,
}

impl LinkField {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "vic" => Some(Self::SourceRegime),
            "hoi" => Some(Self::TargetRegime),
            "ruling_party" => Some(Self::RulingParty),
            "political_reforms" => Some(Self::MinPoliticalProgress),
            "social_reforms_above" => Some(Self::MinSocialProgress),
            "social_reforms_below" => Some(Self::MaxSocialProgress),
            _ => None,
        }
    }
}

/// One source → target government mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingRule {
    pub source_regime: String,
    pub target_regime: String,
    /// Empty matches any ruling ideology
    pub required_ruling_ideology: String,
    pub min_political_progress: f64,
    pub min_social_progress: f64,
    pub max_social_progress: f64,
}

impl MappingRule {
    pub fn new(source_regime: impl Into<String>, target_regime: impl Into<String>) -> Self {
        Self {
            source_regime: source_regime.into(),
            target_regime: target_regime.into(),
            required_ruling_ideology: String::new(),
            min_political_progress: DEFAULT_MIN_POLITICAL_PROGRESS,
            min_social_progress: DEFAULT_MIN_SOCIAL_PROGRESS,
            max_social_progress: DEFAULT_MAX_SOCIAL_PROGRESS,
        }
    }

    pub fn with_ruling_ideology(mut self, ideology: impl Into<String>) -> Self {
        self.required_ruling_ideology = ideology.into();
        self
    }

    pub fn with_min_political(mut self, value: f64) -> Self {
        self.min_political_progress = value;
        self
    }

    pub fn with_social_range(mut self, min: f64, max: f64) -> Self {
        self.min_social_progress = min;
        self.max_social_progress = max;
        self
    }

    fn from_link(link: &Node) -> Self {
        let mut rule = Self::new("", "");

        for item in link.children() {
            let Some(field) = LinkField::from_key(item.key()) else {
                continue;
            };
            let text = item.leaf().unwrap_or_default();
            match field {
                LinkField::SourceRegime => rule.source_regime = text.to_string(),
                LinkField::TargetRegime => rule.target_regime = text.to_string(),
                LinkField::RulingParty => rule.required_ruling_ideology = text.to_string(),
                LinkField::MinPoliticalProgress => rule.min_political_progress = parse_float(text),
                LinkField::MinSocialProgress => rule.min_social_progress = parse_float(text),
                LinkField::MaxSocialProgress => rule.max_social_progress = parse_float(text),
            }
        }

        rule
    }

    /// All five predicates must hold. Threshold bounds are inclusive.
    pub fn matches(&self, nation: &NationInput, progress: &ReformProgress) -> bool {
        self.source_regime == nation.government
            && (self.required_ruling_ideology.is_empty()
                || self.required_ruling_ideology == nation.ruling_ideology)
            && self.min_political_progress <= progress.political
            && self.min_social_progress <= progress.social
            && self.max_social_progress >= progress.social
    }
}

/// Ordered mapping rules. Earlier rules shadow later ones.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<MappingRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<MappingRule>) -> Self {
        Self { rules }
    }

    /// Collect every top-level `link` block in document order.
    pub fn build(root: &Node) -> Self {
        let rules: Vec<_> = root
            .children_named("link")
            .map(MappingRule::from_link)
            .collect();
        info!(rules = rules.len(), "Loaded government mapping rules");
        Self { rules }
    }

    pub fn rules(&self) -> &[MappingRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First matching rule and its position.
    pub fn resolve(
        &self,
        nation: &NationInput,
        progress: &ReformProgress,
    ) -> Option<(usize, &MappingRule)> {
        self.rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.matches(nation, progress))
    }
}

/// Parse the longest leading float, `atof` style. No numeric prefix gives 0.0.
fn parse_float(text: &str) -> f64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return 0.0;
    }
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    text[..end].parse().unwrap_or(0.0)
}
