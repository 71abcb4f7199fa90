//! Government Classifier
//!
//! Scores a nation's enacted reforms against the [`ReformCatalog`] and picks
//! the first [`MappingRule`] that accepts it.

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::document::{self, Node};
use crate::error::Result;
use crate::nation::NationInput;

use super::catalog::{ReformCatalog, TotalsMode};
use super::rules::{MappingRule, RuleSet};

/// Summed reform ranks and their normalized ratios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReformProgress {
    pub political_sum: u32,
    pub social_sum: u32,
    /// `political_sum / total_political_rank`; not finite when the total is 0
    pub political: f64,
    pub social: f64,
}

impl ReformProgress {
    pub fn compute(nation: &NationInput, catalog: &ReformCatalog) -> Self {
        let mut political_sum = 0;
        let mut social_sum = 0;

        // a level is looked up in both tables independently
        for (_, level) in nation.enacted_levels() {
            if let Some(rank) = catalog.political_rank(level) {
                political_sum += rank;
            }
            if let Some(rank) = catalog.social_rank(level) {
                social_sum += rank;
            }
        }

        Self {
            political_sum,
            social_sum,
            political: f64::from(political_sum) / f64::from(catalog.total_political_rank()),
            social: f64::from(social_sum) / f64::from(catalog.total_social_rank()),
        }
    }
}

/// Outcome of classifying one nation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub tag: String,
    pub source: String,
    /// Empty when no rule matched
    pub target: String,
    /// Position of the matching rule in the rule set
    pub rule_index: Option<usize>,
    pub progress: ReformProgress,
}

impl Classification {
    pub fn is_mapped(&self) -> bool {
        !self.target.is_empty()
    }
}

/// Target government for a nation, or an empty string when no rule matches.
pub fn classify(nation: &NationInput, rules: &RuleSet, catalog: &ReformCatalog) -> String {
    classify_detailed(nation, rules, catalog).target
}

pub fn classify_detailed(
    nation: &NationInput,
    rules: &RuleSet,
    catalog: &ReformCatalog,
) -> Classification {
    let progress = ReformProgress::compute(nation, catalog);
    let (rule_index, target) = match rules.resolve(nation, &progress) {
        Some((index, rule)) => (Some(index), rule.target_regime.clone()),
        None => (None, String::new()),
    };

    debug!(
        tag = %nation.tag,
        political = progress.political,
        social = progress.social,
        "Mapped {} government {} to {}",
        nation.tag,
        nation.government,
        target
    );

    Classification {
        tag: nation.tag.clone(),
        source: nation.government.clone(),
        target,
        rule_index,
        progress,
    }
}

/// Reform catalog and mapping rules loaded together.
#[derive(Debug, Clone, Default)]
pub struct GovernmentMapper {
    catalog: ReformCatalog,
    rules: RuleSet,
}

impl GovernmentMapper {
    pub fn new(catalog: ReformCatalog, rules: RuleSet) -> Self {
        Self { catalog, rules }
    }

    /// Build from already parsed reform and mapping documents.
    pub fn from_documents(reforms: &Node, mapping: &Node, mode: TotalsMode) -> Self {
        Self {
            catalog: ReformCatalog::build_with(reforms, mode),
            rules: RuleSet::build(mapping),
        }
    }

    /// Load both source files named in the config, relative to `base_dir`.
    pub fn from_config(base_dir: &Path, config: &Config) -> Result<Self> {
        let reforms = document::load(&config.reforms_path(base_dir))?;
        let mapping = document::load(&config.governments_path(base_dir))?;
        Ok(Self::from_documents(&reforms, &mapping, config.mapping.totals))
    }

    pub fn catalog(&self) -> &ReformCatalog {
        &self.catalog
    }

    pub fn rules(&self) -> &[MappingRule] {
        self.rules.rules()
    }

    pub fn progress(&self, nation: &NationInput) -> ReformProgress {
        ReformProgress::compute(nation, &self.catalog)
    }

    pub fn classify(&self, nation: &NationInput) -> String {
        classify(nation, &self.rules, &self.catalog)
    }

    pub fn classify_detailed(&self, nation: &NationInput) -> Classification {
        classify_detailed(nation, &self.rules, &self.catalog)
    }

    pub fn classify_all(&self, nations: &[NationInput]) -> Vec<Classification> {
        nations.iter().map(|n| self.classify_detailed(n)).collect()
    }
}
