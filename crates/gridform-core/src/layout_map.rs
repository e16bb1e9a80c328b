//! Layout variables: named column and row specs referenced as `$name`.

use std::sync::OnceLock;

use indexmap::IndexMap;

use crate::size::ConstantSize;
use crate::spec::FormSpec;
use crate::types::Orientation;

/// Prefix that marks a variable reference in an encoded spec.
pub const VARIABLE_PREFIX: char = '$';

/// Maps variable names to column and row specs.
///
/// Column and row variables live in separate namespaces, so `$rgap` can
/// mean a different gap horizontally and vertically. Names are stored
/// lower-case, matching the lower-cased encoded specs.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutMap {
    columns: IndexMap<String, FormSpec>,
    rows: IndexMap<String, FormSpec>,
}

impl LayoutMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map with the standard gap and glue variables.
    pub fn with_defaults() -> Self {
        let mut map = Self::new();
        let columns = [
            (&["lcg", "lcgap", "label-component-gap"][..], 3.0),
            (&["rg", "rgap", "related-gap"][..], 4.0),
            (&["ug", "ugap", "unrelated-gap"][..], 7.0),
        ];
        for (names, dlu) in columns {
            let spec = FormSpec::gap(Orientation::Horizontal, ConstantSize::dialog_units(dlu));
            for name in names {
                map.insert_column(name, spec);
            }
        }
        let rows = [
            (&["lg", "lgap", "line-gap"][..], 3.0),
            (&["nlg", "nlgap", "narrow-line-gap"][..], 2.0),
            (&["pg", "pgap", "paragraph-gap"][..], 9.0),
            (&["rg", "rgap", "related-gap"][..], 3.0),
            (&["ug", "ugap", "unrelated-gap"][..], 7.0),
        ];
        for (names, dlu) in rows {
            let spec = FormSpec::gap(Orientation::Vertical, ConstantSize::dialog_units(dlu));
            for name in names {
                map.insert_row(name, spec);
            }
        }
        map.insert_column("glue", FormSpec::glue(Orientation::Horizontal));
        map.insert_row("glue", FormSpec::glue(Orientation::Vertical));
        map
    }

    /// A process-wide map with the standard variables, built on first use.
    pub fn shared_defaults() -> &'static LayoutMap {
        static DEFAULTS: OnceLock<LayoutMap> = OnceLock::new();
        DEFAULTS.get_or_init(Self::with_defaults)
    }

    pub fn insert_column(&mut self, name: &str, spec: FormSpec) -> Option<FormSpec> {
        self.columns.insert(name.to_lowercase(), spec)
    }

    pub fn insert_row(&mut self, name: &str, spec: FormSpec) -> Option<FormSpec> {
        self.rows.insert(name.to_lowercase(), spec)
    }

    /// Insert under the namespace matching the spec's orientation.
    pub fn insert(&mut self, name: &str, spec: FormSpec) -> Option<FormSpec> {
        match spec.orientation() {
            Orientation::Horizontal => self.insert_column(name, spec),
            Orientation::Vertical => self.insert_row(name, spec),
        }
    }

    pub fn get(&self, name: &str, orientation: Orientation) -> Option<&FormSpec> {
        match orientation {
            Orientation::Horizontal => self.columns.get(name),
            Orientation::Vertical => self.rows.get(name),
        }
    }

    pub fn contains(&self, name: &str, orientation: Orientation) -> bool {
        self.get(name, orientation).is_some()
    }

    pub fn remove(&mut self, name: &str, orientation: Orientation) -> Option<FormSpec> {
        match orientation {
            Orientation::Horizontal => self.columns.shift_remove(name),
            Orientation::Vertical => self.rows.shift_remove(name),
        }
    }

    /// Iterate over the variables of one orientation in insertion order.
    pub fn iter(&self, orientation: Orientation) -> impl Iterator<Item = (&String, &FormSpec)> {
        match orientation {
            Orientation::Horizontal => self.columns.iter(),
            Orientation::Vertical => self.rows.iter(),
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len() + self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.rows.is_empty()
    }
}
