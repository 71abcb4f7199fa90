//! # Document Module
//!
//! Generic key/value tree used as input for the reform catalog and the
//! mapping rules, plus a reader for the brace-delimited text format the
//! Paradox games use for their definition files:
//!
//! ```text
//! political_reforms = {
//!     slavery = {
//!         next_step_only = yes
//!         yes_slavery = { }
//!         no_slavery = { }
//!     }
//! }
//! ```
//!
//! The government core only relies on the query side of [`Node`]
//! (key name, leaf text, children by key), so any producer that can build a
//! `Node` tree works.
//!
//! ```rust
//! use govmap_core::document;
//!
//! let root = document::parse("link = { vic = absolute_monarchy hoi = absolute_monarchy }").unwrap();
//! let link = root.child("link").unwrap();
//! assert_eq!(link.child("vic").and_then(|n| n.leaf()), Some("absolute_monarchy"));
//! ```

mod node;
mod parser;

pub use node::{Node, Value};
pub use parser::{load, parse};
