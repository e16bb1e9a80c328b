//! The form grid: column and row specs, track groups, and the constraints
//! of every component.

use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexMap;

use gridform_core::{
    ArityError, CellConstraints, ConfigurationError, FormSpec, LayoutError, LayoutMap,
    Orientation, ParseError,
};
use gridform_parser::{parse_column_specs, parse_row_specs};

/// A grid of columns and rows plus the placement of each component.
///
/// Track indices are 1-based throughout, matching cell constraints.
#[derive(Debug, Clone)]
pub struct FormLayout<K> {
    column_specs: Vec<FormSpec>,
    row_specs: Vec<FormSpec>,
    column_groups: Vec<Vec<usize>>,
    row_groups: Vec<Vec<usize>>,
    constraints: IndexMap<K, CellConstraints>,
}

impl<K: Eq + Hash + Clone + Debug> FormLayout<K> {
    pub fn new(column_specs: Vec<FormSpec>, row_specs: Vec<FormSpec>) -> Self {
        Self {
            column_specs,
            row_specs,
            column_groups: Vec::new(),
            row_groups: Vec::new(),
            constraints: IndexMap::new(),
        }
    }

    /// Build a grid from encoded column and row lists, e.g.
    /// `FormLayout::parse("right:pref, $lcgap, pref:grow", "p, $lgap, p", &map)`.
    pub fn parse(columns: &str, rows: &str, layout_map: &LayoutMap) -> Result<Self, ParseError> {
        Ok(Self::new(
            parse_column_specs(columns, layout_map)?,
            parse_row_specs(rows, layout_map)?,
        ))
    }

    pub fn column_count(&self) -> usize {
        self.column_specs.len()
    }

    pub fn row_count(&self) -> usize {
        self.row_specs.len()
    }

    pub fn column_specs(&self) -> &[FormSpec] {
        &self.column_specs
    }

    pub fn row_specs(&self) -> &[FormSpec] {
        &self.row_specs
    }

    pub fn specs(&self, orientation: Orientation) -> &[FormSpec] {
        match orientation {
            Orientation::Horizontal => &self.column_specs,
            Orientation::Vertical => &self.row_specs,
        }
    }

    pub fn column_spec(&self, index: usize) -> Result<&FormSpec, ArityError> {
        self.check_index(Orientation::Horizontal, index)?;
        Ok(&self.column_specs[index - 1])
    }

    pub fn row_spec(&self, index: usize) -> Result<&FormSpec, ArityError> {
        self.check_index(Orientation::Vertical, index)?;
        Ok(&self.row_specs[index - 1])
    }

    pub fn column_groups(&self) -> &[Vec<usize>] {
        &self.column_groups
    }

    pub fn row_groups(&self) -> &[Vec<usize>] {
        &self.row_groups
    }

    pub fn groups(&self, orientation: Orientation) -> &[Vec<usize>] {
        match orientation {
            Orientation::Horizontal => &self.column_groups,
            Orientation::Vertical => &self.row_groups,
        }
    }

    /// Force the columns of each group to a common width.
    pub fn set_column_groups(&mut self, groups: Vec<Vec<usize>>) -> Result<(), LayoutError> {
        self.validate_groups(Orientation::Horizontal, &groups)?;
        self.column_groups = groups;
        Ok(())
    }

    /// Force the rows of each group to a common height.
    pub fn set_row_groups(&mut self, groups: Vec<Vec<usize>>) -> Result<(), LayoutError> {
        self.validate_groups(Orientation::Vertical, &groups)?;
        self.row_groups = groups;
        Ok(())
    }

    pub fn append_column(&mut self, spec: FormSpec) {
        self.column_specs.push(spec);
    }

    pub fn append_row(&mut self, spec: FormSpec) {
        self.row_specs.push(spec);
    }

    /// Insert a column before `index`. Components and groups at or right of
    /// `index` move one column right; components spanning it get wider.
    pub fn insert_column(&mut self, index: usize, spec: FormSpec) -> Result<(), ArityError> {
        self.insert_track(Orientation::Horizontal, index, spec)
    }

    /// Insert a row before `index`.
    pub fn insert_row(&mut self, index: usize, spec: FormSpec) -> Result<(), ArityError> {
        self.insert_track(Orientation::Vertical, index, spec)
    }

    /// Remove the column at `index`. Fails if a component lies only in it or
    /// the column belongs to a group.
    pub fn remove_column(&mut self, index: usize) -> Result<FormSpec, LayoutError> {
        self.remove_track(Orientation::Horizontal, index)
    }

    /// Remove the row at `index`.
    pub fn remove_row(&mut self, index: usize) -> Result<FormSpec, LayoutError> {
        self.remove_track(Orientation::Vertical, index)
    }

    /// Set the constraints of a component. The constraints must be valid
    /// and fit the current grid. Returns the previous constraints.
    pub fn add_component(
        &mut self,
        component: K,
        constraints: CellConstraints,
    ) -> Result<Option<CellConstraints>, LayoutError> {
        constraints.validate()?;
        constraints.ensure_fits(self.column_count(), self.row_count())?;
        Ok(self.constraints.insert(component, constraints))
    }

    pub fn remove_component(&mut self, component: &K) -> Option<CellConstraints> {
        self.constraints.shift_remove(component)
    }

    pub fn constraints(&self, component: &K) -> Option<&CellConstraints> {
        self.constraints.get(component)
    }

    pub(crate) fn constraints_table(&self) -> &IndexMap<K, CellConstraints> {
        &self.constraints
    }

    fn specs_mut(&mut self, orientation: Orientation) -> &mut Vec<FormSpec> {
        match orientation {
            Orientation::Horizontal => &mut self.column_specs,
            Orientation::Vertical => &mut self.row_specs,
        }
    }

    fn groups_mut(&mut self, orientation: Orientation) -> &mut Vec<Vec<usize>> {
        match orientation {
            Orientation::Horizontal => &mut self.column_groups,
            Orientation::Vertical => &mut self.row_groups,
        }
    }

    fn check_index(&self, orientation: Orientation, index: usize) -> Result<(), ArityError> {
        let count = self.specs(orientation).len();
        if index == 0 || index > count {
            return Err(ArityError::IndexOutOfRange { orientation, index, count });
        }
        Ok(())
    }

    fn validate_groups(
        &self,
        orientation: Orientation,
        groups: &[Vec<usize>],
    ) -> Result<(), LayoutError> {
        let mut seen = vec![false; self.specs(orientation).len()];
        for group in groups {
            for &index in group {
                self.check_index(orientation, index)?;
                if std::mem::replace(&mut seen[index - 1], true) {
                    return Err(ConfigurationError::InvalidGroup {
                        orientation,
                        reason: format!(
                            "{} {index} is listed more than once",
                            orientation.track_name()
                        ),
                    }
                    .into());
                }
            }
        }
        Ok(())
    }

    fn insert_track(
        &mut self,
        orientation: Orientation,
        index: usize,
        spec: FormSpec,
    ) -> Result<(), ArityError> {
        let count = self.specs(orientation).len();
        if index == 0 || index > count + 1 {
            return Err(ArityError::IndexOutOfRange { orientation, index, count: count + 1 });
        }
        self.specs_mut(orientation).insert(index - 1, spec);

        for cc in self.constraints.values_mut() {
            let (origin, span) = origin_and_span_mut(cc, orientation);
            if *origin >= index {
                *origin += 1;
            } else if *origin + *span > index {
                *span += 1;
            }
        }
        for group in self.groups_mut(orientation) {
            for member in group.iter_mut().filter(|member| **member >= index) {
                *member += 1;
            }
        }
        Ok(())
    }

    fn remove_track(
        &mut self,
        orientation: Orientation,
        index: usize,
    ) -> Result<FormSpec, LayoutError> {
        self.check_index(orientation, index)?;

        let occupied = self.constraints.values().any(|cc| {
            cc.origin(orientation) == index && cc.span(orientation) == 1
        });
        if occupied {
            return Err(ConfigurationError::TrackInUse {
                orientation,
                index,
                reason: "a component lies only in it".to_string(),
            }
            .into());
        }
        if self.groups(orientation).iter().flatten().any(|&member| member == index) {
            return Err(ConfigurationError::TrackInUse {
                orientation,
                index,
                reason: "it belongs to a group".to_string(),
            }
            .into());
        }

        for cc in self.constraints.values_mut() {
            let (origin, span) = origin_and_span_mut(cc, orientation);
            if *origin > index {
                *origin -= 1;
            } else if *origin + *span > index {
                *span -= 1;
            }
        }
        for group in self.groups_mut(orientation) {
            for member in group.iter_mut().filter(|member| **member > index) {
                *member -= 1;
            }
        }
        Ok(self.specs_mut(orientation).remove(index - 1))
    }
}

fn origin_and_span_mut(
    cc: &mut CellConstraints,
    orientation: Orientation,
) -> (&mut usize, &mut usize) {
    match orientation {
        Orientation::Horizontal => (&mut cc.grid_x, &mut cc.grid_width),
        Orientation::Vertical => (&mut cc.grid_y, &mut cc.grid_height),
    }
}
