//! Post-search filtering of matches.
//!
//! Both mechanisms are pure and order preserving: [`CategoryToggles`] hides whole categories
//! and the [`parse_filter`] language narrows by category, character and field label.

pub mod apply;
pub mod ast;
pub mod parser;
pub mod toggles;

pub use apply::{apply_filters, filter_matches};
pub use ast::{FieldFilter, FilterExpr, FilterField, FilterOperator};
pub use parser::parse_filter;
pub use toggles::CategoryToggles;
