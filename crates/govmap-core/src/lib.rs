pub mod config;
pub mod document;
pub mod error;
pub mod government;
pub mod nation;

pub use config::Config;
pub use error::{GovMapError, Result};
pub use government::{
    classify, Classification, GovernmentMapper, MappingRule, ReformCatalog, ReformCategory,
    ReformProgress, RuleSet, TotalsMode,
};
pub use nation::{load_nations, select_nation, NationInput};
