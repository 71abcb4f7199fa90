//! # Government Module
//!
//! Maps a Victoria 2 government onto a Hearts of Iron IV government.
//!
//! ## Module layout
//!
//! - `catalog`: reform levels ranked per track, and the progress divisors
//! - `rules`: ordered `link` rules from the mapping file
//! - `classifier`: progress scoring and first-match rule resolution
//!
//! ## Example
//!
//! ```rust
//! use govmap_core::document::parse;
//! use govmap_core::government::{GovernmentMapper, TotalsMode};
//! use govmap_core::NationInput;
//!
//! let reforms = parse(
//!     r#"
//!     political_reforms = { vote_franschise = { none_voting = { } wealth_voting = { } universal_voting = { } } }
//!     social_reforms = { wage_reform = { no_minimum_wage = { } good_minimum_wage = { } } }
//!     "#,
//! )
//! .unwrap();
//! let mapping = parse(
//!     r#"
//!     link = { vic = democracy hoi = democratic_republic political_reforms = 0.5 }
//!     link = { vic = democracy hoi = oligarchic_republic }
//!     "#,
//! )
//! .unwrap();
//!
//! let mapper = GovernmentMapper::from_documents(&reforms, &mapping, TotalsMode::LastTrack);
//! let usa = NationInput::new("USA", "democracy").with_reform("vote_franschise", "universal_voting");
//! assert_eq!(mapper.classify(&usa), "democratic_republic");
//! ```

mod catalog;
mod classifier;
mod rules;

// Re-exports
pub use catalog::{ReformCatalog, ReformCategory, ReformLevel, TotalsMode, EXCLUDED_LEVELS};
pub use classifier::{
    classify, classify_detailed, Classification, GovernmentMapper, ReformProgress,
};
pub use rules::{
    LinkField, MappingRule, RuleSet, DEFAULT_MAX_SOCIAL_PROGRESS, DEFAULT_MIN_POLITICAL_PROGRESS,
    DEFAULT_MIN_SOCIAL_PROGRESS,
};
