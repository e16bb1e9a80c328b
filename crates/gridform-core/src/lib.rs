//! Core types for the gridform layout engine.
//!
//! This crate provides the foundational types used across the gridform crates:
//! - Sizes (constant, component-derived, bounded) and their pixel resolution
//! - Column and row specifications (`FormSpec`)
//! - Cell constraints placing components in the grid
//! - Layout variables (`LayoutMap`)
//! - Error types

pub mod constraints;
pub mod errors;
pub mod layout_map;
pub mod size;
pub mod spec;
pub mod types;

pub use constraints::*;
pub use errors::*;
pub use layout_map::*;
pub use size::*;
pub use spec::*;
pub use types::*;
