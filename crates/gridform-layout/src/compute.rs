//! One layout pass: measure the components, size the tracks, and position
//! every component inside its cell.

use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::{debug, trace};

use gridform_core::{
    ComponentExtent, ComponentSize, ConfigurationError, DefaultAlignment, Dimension, FormSpec,
    LayoutError, Orientation, SizeContext, UnitConverter,
};

use crate::bounds::Bounds;
use crate::form_layout::FormLayout;
use crate::measure::{measure_components, Measure, MeasuredComponent};
use crate::options::LayoutOptions;

/// Result of a layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult<K: Hash + Eq> {
    /// Column boundaries: `column_origins[i]` is the left edge of column
    /// `i + 1`, the last entry is the right edge of the last column.
    pub column_origins: Vec<i32>,
    /// Row boundaries, like `column_origins`.
    pub row_origins: Vec<i32>,
    /// Final bounds of every component, in the order they were passed.
    pub bounds: IndexMap<K, Bounds>,
}

impl<K: Hash + Eq> LayoutResult<K> {
    pub fn bounds(&self, component: &K) -> Option<Bounds> {
        self.bounds.get(component).copied()
    }

    pub fn origins(&self, orientation: Orientation) -> &[i32] {
        match orientation {
            Orientation::Horizontal => &self.column_origins,
            Orientation::Vertical => &self.row_origins,
        }
    }

    /// Resolved size of every column.
    pub fn column_widths(&self) -> Vec<i32> {
        self.column_origins.windows(2).map(|pair| pair[1].saturating_sub(pair[0])).collect()
    }

    /// Resolved size of every row.
    pub fn row_heights(&self) -> Vec<i32> {
        self.row_origins.windows(2).map(|pair| pair[1].saturating_sub(pair[0])).collect()
    }
}

const AXES: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

/// Minimum and preferred size of every track along one axis.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TrackSizes {
    minimum: Vec<i32>,
    preferred: Vec<i32>,
}

/// How the available space compared to the track sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SizingMode {
    Preferred,
    Compressed,
    Minimum,
}

impl<K: Eq + Hash + Clone + Debug> FormLayout<K> {
    /// Lay out `components` inside `container`.
    ///
    /// Every component needs constraints set with
    /// [`add_component`](FormLayout::add_component). The pass keeps no state,
    /// so the same inputs always give the same result.
    pub fn layout<M>(
        &self,
        container: Bounds,
        components: &[K],
        measure: &M,
        options: &LayoutOptions,
    ) -> Result<LayoutResult<K>, LayoutError>
    where
        M: Measure<K> + ?Sized,
    {
        debug!(
            columns = self.column_count(),
            rows = self.row_count(),
            components = components.len(),
            "starting layout pass"
        );
        let measured = self.measure(components, measure)?;
        let converter = &options.metrics;

        let mut origins = [Vec::new(), Vec::new()];
        for (slot, orientation) in AXES.into_iter().enumerate() {
            let tracks = self.track_sizes(orientation, &measured, converter)?;
            let available =
                container.extent(orientation).saturating_sub(options.border.along(orientation));
            let sizes = self.distribute(orientation, &tracks, available);
            let start =
                container.origin(orientation).saturating_add(options.border.leading(orientation));
            origins[slot] = cumulative_origins(start, &sizes);
        }
        let [column_origins, row_origins] = origins;

        let bounds = measured
            .iter()
            .map(|component| {
                let x = self.place(Orientation::Horizontal, component, &column_origins);
                let y = self.place(Orientation::Vertical, component, &row_origins);
                (component.key.clone(), Bounds::new(x.0, y.0, x.1, y.1))
            })
            .collect();

        Ok(LayoutResult { column_origins, row_origins, bounds })
    }

    /// Container size that shows every component at its minimum size.
    pub fn minimum_layout_size<M>(
        &self,
        components: &[K],
        measure: &M,
        options: &LayoutOptions,
    ) -> Result<Dimension, LayoutError>
    where
        M: Measure<K> + ?Sized,
    {
        self.layout_size(components, measure, options, SizingMode::Minimum)
    }

    /// Container size that shows every component at its preferred size.
    pub fn preferred_layout_size<M>(
        &self,
        components: &[K],
        measure: &M,
        options: &LayoutOptions,
    ) -> Result<Dimension, LayoutError>
    where
        M: Measure<K> + ?Sized,
    {
        self.layout_size(components, measure, options, SizingMode::Preferred)
    }

    fn layout_size<M>(
        &self,
        components: &[K],
        measure: &M,
        options: &LayoutOptions,
        mode: SizingMode,
    ) -> Result<Dimension, LayoutError>
    where
        M: Measure<K> + ?Sized,
    {
        let measured = self.measure(components, measure)?;
        let mut extents = [0, 0];
        for (slot, orientation) in AXES.into_iter().enumerate() {
            let tracks = self.track_sizes(orientation, &measured, &options.metrics)?;
            let (sizes, kind) = match mode {
                SizingMode::Minimum => (&tracks.minimum, ComponentSize::Minimum),
                _ => (&tracks.preferred, ComponentSize::Preferred),
            };
            let total = total_size(sizes);

            // Multi-span components widen the grid when their tracks are too small.
            let widened = measured
                .iter()
                .filter(|component| component.constraints.span(orientation) > 1)
                .map(|component| {
                    let start = component.constraints.origin(orientation) - 1;
                    let end = start + component.constraints.span(orientation);
                    let spanned = total_size(&sizes[start..end]);
                    let cc = &component.constraints;
                    let needed = component
                        .extent(orientation)
                        .get(kind)
                        .saturating_add(cc.insets.along(orientation));
                    total.saturating_sub(spanned).saturating_add(needed)
                })
                .fold(total, i32::max);

            extents[slot] = widened.saturating_add(options.border.along(orientation));
        }
        debug!(width = extents[0], height = extents[1], ?mode, "computed layout size");
        Ok(Dimension::new(extents[0], extents[1]))
    }

    fn measure<'a, M>(
        &self,
        components: &'a [K],
        measure: &M,
    ) -> Result<Vec<MeasuredComponent<'a, K>>, LayoutError>
    where
        M: Measure<K> + ?Sized,
    {
        let measured = measure_components(components, self.constraints_table(), measure)?;
        for component in &measured {
            component.constraints.ensure_fits(self.column_count(), self.row_count())?;
        }
        Ok(measured)
    }

    /// Resolve the minimum and preferred size of every track along one
    /// axis, then force grouped tracks to their group maximum.
    fn track_sizes(
        &self,
        orientation: Orientation,
        measured: &[MeasuredComponent<'_, K>],
        converter: &dyn UnitConverter,
    ) -> Result<TrackSizes, ConfigurationError> {
        let specs = self.specs(orientation);
        let mut minimum = Vec::with_capacity(specs.len());
        let mut preferred = Vec::with_capacity(specs.len());

        for (i, spec) in specs.iter().enumerate() {
            let members: SmallVec<[ComponentExtent; 4]> = measured
                .iter()
                .filter(|c| {
                    let cc = &c.constraints;
                    cc.origin(orientation) == i + 1 && cc.span(orientation) == 1
                })
                .map(|c| {
                    let mut extent = c.extent(orientation);
                    let insets = c.constraints.insets.along(orientation);
                    extent.minimum = extent.minimum.saturating_add(insets);
                    extent.preferred = extent.preferred.saturating_add(insets);
                    extent.default = extent.default.saturating_add(insets);
                    extent
                })
                .collect();
            // `default` resolves to the minimum here and to the default measure
            // for the preferred size
            let shrunk: SmallVec<[ComponentExtent; 4]> = members
                .iter()
                .map(|extent| ComponentExtent { default: extent.minimum, ..*extent })
                .collect();

            let size = spec.size();
            minimum.push(size.resolve(&SizeContext::measured(orientation, converter, &shrunk))?);
            preferred.push(size.resolve(&SizeContext::measured(orientation, converter, &members))?);
        }

        let groups = self.groups(orientation);
        apply_groups(&mut minimum, groups);
        apply_groups(&mut preferred, groups);
        trace!(%orientation, ?minimum, ?preferred, "resolved track sizes");
        Ok(TrackSizes { minimum, preferred })
    }

    /// Fit the tracks into `available` pixels: preferred, compressed, or
    /// minimum sizes, then any surplus split by resize weight.
    fn distribute(
        &self,
        orientation: Orientation,
        tracks: &TrackSizes,
        available: i32,
    ) -> Vec<i32> {
        let specs = self.specs(orientation);
        let total_minimum = total_size(&tracks.minimum);
        let total_preferred = total_size(&tracks.preferred);

        let (mode, mut sizes) = if available >= total_preferred {
            (SizingMode::Preferred, tracks.preferred.clone())
        } else if available <= total_minimum {
            (SizingMode::Minimum, tracks.minimum.clone())
        } else {
            let mut compressed = compress(specs, tracks, available);
            apply_groups(&mut compressed, self.groups(orientation));
            (SizingMode::Compressed, compressed)
        };
        debug!(%orientation, available, total_minimum, total_preferred, ?mode, "sized tracks");

        let surplus = available.saturating_sub(total_size(&sizes));
        if surplus > 0 {
            distribute_surplus(&mut sizes, specs, surplus);
        }
        trace!(%orientation, ?sizes, "distributed track sizes");
        sizes
    }

    /// Position and size of a component along one axis.
    fn place(
        &self,
        orientation: Orientation,
        component: &MeasuredComponent<'_, K>,
        origins: &[i32],
    ) -> (i32, i32) {
        let cc = &component.constraints;
        let first = cc.origin(orientation) - 1;
        let last = first + cc.span(orientation);
        let leading = cc.insets.leading(orientation);
        let cell_start = origins[first].saturating_add(leading);
        let cell_size = origins[last]
            .saturating_sub(origins[first])
            .saturating_sub(cc.insets.along(orientation))
            .max(0);

        let spec = &self.specs(orientation)[first];
        let alignment = cc.alignment(orientation).or_track_default(spec.default_alignment());
        if alignment == DefaultAlignment::Fill {
            return (cell_start, cell_size);
        }

        let extent = component.extent(orientation);
        let natural = match spec.size().component_kind() {
            Some(ComponentSize::Minimum) => extent.minimum,
            Some(ComponentSize::Default) if extent.preferred > cell_size => extent.minimum,
            _ => extent.preferred,
        };
        let size = natural.min(cell_size);
        let offset = match alignment {
            DefaultAlignment::Left | DefaultAlignment::Top => 0,
            DefaultAlignment::Right | DefaultAlignment::Bottom => cell_size - size,
            DefaultAlignment::Center | DefaultAlignment::Fill => (cell_size - size) / 2,
        };
        (cell_start.saturating_add(offset), size)
    }
}

/// Force every track of a group to the largest size in the group.
fn apply_groups(sizes: &mut [i32], groups: &[Vec<usize>]) {
    for group in groups {
        let max = group.iter().map(|&index| sizes[index - 1]).max().unwrap_or(0);
        for &index in group {
            sizes[index - 1] = max;
        }
    }
}

/// Shrink `default`-sized tracks from preferred towards minimum, in
/// proportion to their preferred-minimum difference. Other tracks keep
/// their preferred size.
fn compress(specs: &[FormSpec], tracks: &TrackSizes, available: i32) -> Vec<i32> {
    let compressible = |i: usize| specs[i].size().component_kind() == Some(ComponentSize::Default);
    let total_preferred = total_size(&tracks.preferred);
    let compression_space = (0..specs.len())
        .filter(|&i| compressible(i))
        .map(|i| tracks.preferred[i].saturating_sub(tracks.minimum[i]))
        .fold(0, i32::saturating_add);
    if compression_space <= 0 {
        return tracks.preferred.clone();
    }

    let shortfall = f64::from(total_preferred.saturating_sub(available));
    let factor = (shortfall / f64::from(compression_space)).min(1.0);
    (0..specs.len())
        .map(|i| {
            let preferred = tracks.preferred[i];
            if compressible(i) {
                let delta = f64::from(preferred.saturating_sub(tracks.minimum[i]));
                preferred.saturating_sub((delta * factor).round() as i32)
            } else {
                preferred
            }
        })
        .collect()
}

/// Give each growing track `floor(surplus * weight / total_weight)` pixels,
/// then hand out the leftover pixels one at a time in declaration order.
fn distribute_surplus(sizes: &mut [i32], specs: &[FormSpec], surplus: i32) {
    let total_weight: f64 = specs.iter().map(FormSpec::resize_weight).sum();
    if total_weight <= 0.0 {
        return;
    }
    let growing: SmallVec<[usize; 8]> = (0..specs.len()).filter(|&i| specs[i].can_grow()).collect();

    let mut handed_out: i32 = 0;
    for &i in &growing {
        let share = (f64::from(surplus) * specs[i].resize_weight() / total_weight).floor() as i32;
        sizes[i] = sizes[i].saturating_add(share);
        handed_out = handed_out.saturating_add(share);
    }
    for &i in growing.iter().cycle().take((surplus - handed_out).max(0) as usize) {
        sizes[i] = sizes[i].saturating_add(1);
    }
}

/// Sum of track sizes, pinned at `i32::MAX` for oversized constants.
fn total_size(sizes: &[i32]) -> i32 {
    sizes.iter().fold(0i32, |total, &size| total.saturating_add(size))
}

/// Track boundaries from `start`: one more entry than there are tracks.
fn cumulative_origins(start: i32, sizes: &[i32]) -> Vec<i32> {
    let mut origins = Vec::with_capacity(sizes.len() + 1);
    let mut current = start;
    origins.push(current);
    for size in sizes {
        current = current.saturating_add(*size);
        origins.push(current);
    }
    origins
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specs(encoded: &str) -> Vec<FormSpec> {
        gridform_parser::parse_column_specs(encoded, gridform_core::LayoutMap::shared_defaults()).unwrap()
    }

    #[test]
    fn test_surplus_goes_by_weight_then_declaration_order() {
        let specs = specs("10px, 10px:grow, 10px:grow");
        let mut sizes = vec![10, 10, 10];
        distribute_surplus(&mut sizes, &specs, 11);
        assert_eq!(sizes, vec![10, 16, 15]);
    }

    #[test]
    fn test_surplus_by_weight() {
        let specs = specs("0px:grow(1), 0px:grow(3)");
        let mut sizes = vec![0, 0];
        distribute_surplus(&mut sizes, &specs, 100);
        assert_eq!(sizes, vec![25, 75]);
    }

    #[test]
    fn test_no_growing_track_keeps_sizes() {
        let specs = specs("10px, 20px");
        let mut sizes = vec![10, 20];
        distribute_surplus(&mut sizes, &specs, 50);
        assert_eq!(sizes, vec![10, 20]);
    }

    #[test]
    fn test_compress_only_default_tracks() {
        let specs = specs("default, pref");
        let tracks = TrackSizes { minimum: vec![20, 30], preferred: vec![60, 50] };
        // 110 preferred, 20 pixels short of it, 40 pixels of compression space
        assert_eq!(compress(&specs, &tracks, 90), vec![40, 50]);
    }

    #[test]
    fn test_apply_groups() {
        let mut sizes = vec![10, 40, 20, 5];
        apply_groups(&mut sizes, &[vec![1, 3], vec![2, 4]]);
        assert_eq!(sizes, vec![20, 40, 20, 40]);
    }

    #[test]
    fn test_cumulative_origins() {
        assert_eq!(cumulative_origins(5, &[10, 0, 20]), vec![5, 15, 15, 35]);
    }

    #[test]
    fn test_oversized_tracks_saturate() {
        assert_eq!(total_size(&[i32::MAX, 10]), i32::MAX);
        assert_eq!(cumulative_origins(3, &[i32::MAX, 10]), vec![3, i32::MAX, i32::MAX]);
    }
}
