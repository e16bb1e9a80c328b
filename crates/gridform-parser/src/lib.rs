//! Parser for encoded gridform specifications.
//!
//! This crate decodes the compact string forms of column specs, row specs,
//! and cell constraints into the types of `gridform-core`.
//! Built on `nom` for the token-level rules.

mod constraints;
mod grammar;
mod lexer;
mod list;

pub use constraints::parse_cell_constraints;
pub use grammar::parse_spec;
pub use list::{parse_column_specs, parse_row_specs, parse_specs, MAX_REPEATED_TRACKS};

use gridform_core::{FormSpec, LayoutMap, Orientation, ParseError};

/// Parse one column spec, resolving variables against the standard map.
///
/// # Example
///
/// ```
/// use gridform_parser::parse_column_spec;
///
/// let spec = parse_column_spec("right:max(50dlu;pref):grow").unwrap();
/// assert!(spec.can_grow());
/// ```
pub fn parse_column_spec(encoded: &str) -> Result<FormSpec, ParseError> {
    parse_spec(encoded, Orientation::Horizontal, LayoutMap::shared_defaults())
}

/// Parse one row spec, resolving variables against the standard map.
pub fn parse_row_spec(encoded: &str) -> Result<FormSpec, ParseError> {
    parse_spec(encoded, Orientation::Vertical, LayoutMap::shared_defaults())
}
