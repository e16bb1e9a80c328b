//! Layout computation for gridform.
//!
//! This crate sizes the columns and rows of a form grid and places every
//! component in its cell.
//!
//! # Architecture
//!
//! 1. **Measuring**: every component is measured once per pass; size groups
//!    share their largest measure
//! 2. **Sizing**: tracks resolve to minimum and preferred sizes, are fitted
//!    into the available space, and surplus space goes to growing tracks
//! 3. **Positioning**: components are aligned inside the union of the tracks
//!    they span
//!
//! # Example
//!
//! ```
//! use gridform_core::{CellConstraints, Dimension, LayoutMap};
//! use gridform_layout::{Bounds, ComponentSizes, FormLayout, LayoutOptions};
//! use indexmap::IndexMap;
//!
//! let mut layout = FormLayout::parse("pref, 4px, pref:grow", "pref", LayoutMap::shared_defaults())?;
//! layout.add_component("label", CellConstraints::xy(1, 1))?;
//! layout.add_component("field", CellConstraints::xy(3, 1))?;
//!
//! let mut sizes = IndexMap::new();
//! sizes.insert("label", ComponentSizes::fixed(Dimension::new(40, 20)));
//! sizes.insert("field", ComponentSizes::fixed(Dimension::new(100, 20)));
//!
//! let result = layout.layout(
//!     Bounds::new(0, 0, 200, 20),
//!     &["label", "field"],
//!     &sizes,
//!     &LayoutOptions::default(),
//! )?;
//! assert_eq!(result.bounds(&"field"), Some(Bounds::new(44, 0, 156, 20)));
//! # Ok::<(), gridform_core::FormsError>(())
//! ```

mod bounds;
mod compute;
mod form_layout;
mod measure;
mod options;

pub use bounds::Bounds;
pub use compute::LayoutResult;
pub use form_layout::FormLayout;
pub use measure::{ComponentSizes, Measure};
pub use options::LayoutOptions;
