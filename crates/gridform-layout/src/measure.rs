//! Component measurement and the per-pass measurement cache.

use std::hash::Hash;

use indexmap::IndexMap;

use gridform_core::{
    CellConstraints, ComponentExtent, ConfigurationError, Dimension, Orientation,
};

/// Supplies the sizes of the components being laid out.
pub trait Measure<K> {
    fn minimum_size(&self, component: &K) -> Dimension;

    fn preferred_size(&self, component: &K) -> Dimension;

    /// Size used by `default` tracks when there is room. Falls back to the
    /// preferred size.
    fn default_size(&self, component: &K) -> Dimension {
        self.preferred_size(component)
    }
}

/// Fixed sizes for one component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentSizes {
    pub minimum: Dimension,
    pub preferred: Dimension,
    pub default: Dimension,
}

impl ComponentSizes {
    pub fn new(minimum: Dimension, preferred: Dimension) -> Self {
        Self { minimum, preferred, default: preferred }
    }

    /// Same minimum, preferred, and default size.
    pub fn fixed(size: Dimension) -> Self {
        Self::new(size, size)
    }

    pub fn with_default(mut self, default: Dimension) -> Self {
        self.default = default;
        self
    }
}

/// Pre-measured components. Unknown components measure as zero.
impl<K: Hash + Eq> Measure<K> for IndexMap<K, ComponentSizes> {
    fn minimum_size(&self, component: &K) -> Dimension {
        self.get(component).map(|sizes| sizes.minimum).unwrap_or_default()
    }

    fn preferred_size(&self, component: &K) -> Dimension {
        self.get(component).map(|sizes| sizes.preferred).unwrap_or_default()
    }

    fn default_size(&self, component: &K) -> Dimension {
        self.get(component).map(|sizes| sizes.default).unwrap_or_default()
    }
}

/// A component measured once for the current pass.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MeasuredComponent<'a, K> {
    pub key: &'a K,
    pub constraints: CellConstraints,
    pub horizontal: ComponentExtent,
    pub vertical: ComponentExtent,
}

impl<K> MeasuredComponent<'_, K> {
    pub fn extent(&self, orientation: Orientation) -> ComponentExtent {
        match orientation {
            Orientation::Horizontal => self.horizontal,
            Orientation::Vertical => self.vertical,
        }
    }

    fn extent_mut(&mut self, orientation: Orientation) -> &mut ComponentExtent {
        match orientation {
            Orientation::Horizontal => &mut self.horizontal,
            Orientation::Vertical => &mut self.vertical,
        }
    }
}

/// Measure every component once, then give the members of each size group
/// the group maximum along that group's axis.
pub(crate) fn measure_components<'a, K, M>(
    components: &'a [K],
    constraints: &IndexMap<K, CellConstraints>,
    measure: &M,
) -> Result<Vec<MeasuredComponent<'a, K>>, ConfigurationError>
where
    K: Hash + Eq + std::fmt::Debug,
    M: Measure<K> + ?Sized,
{
    let mut measured = components
        .iter()
        .map(|key| {
            let constraints = *constraints.get(key).ok_or_else(|| {
                ConfigurationError::MissingConstraints { component: format!("{key:?}") }
            })?;
            let minimum = measure.minimum_size(key);
            let preferred = measure.preferred_size(key);
            let default = measure.default_size(key);
            Ok(MeasuredComponent {
                key,
                constraints,
                horizontal: ComponentExtent::new(minimum.width, preferred.width, default.width),
                vertical: ComponentExtent::new(minimum.height, preferred.height, default.height),
            })
        })
        .collect::<Result<Vec<_>, ConfigurationError>>()?;

    for orientation in [Orientation::Horizontal, Orientation::Vertical] {
        unify_size_groups(&mut measured, orientation);
    }
    Ok(measured)
}

fn unify_size_groups<K>(measured: &mut [MeasuredComponent<'_, K>], orientation: Orientation) {
    let mut maxima: IndexMap<u32, ComponentExtent> = IndexMap::new();
    for component in measured.iter() {
        if let Some(group) = component.constraints.group(orientation) {
            let extent = component.extent(orientation);
            maxima
                .entry(group)
                .and_modify(|max| *max = max.max(extent))
                .or_insert(extent);
        }
    }
    if maxima.is_empty() {
        return;
    }
    for component in measured.iter_mut() {
        if let Some(max) = component.constraints.group(orientation).and_then(|g| maxima.get(&g)) {
            *component.extent_mut(orientation) = *max;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes() -> IndexMap<&'static str, ComponentSizes> {
        let mut sizes = IndexMap::new();
        sizes.insert("ok", ComponentSizes::new(Dimension::new(40, 10), Dimension::new(80, 20)));
        sizes.insert("cancel", ComponentSizes::new(Dimension::new(60, 12), Dimension::new(100, 20)));
        sizes
    }

    #[test]
    fn test_default_size_falls_back_to_preferred() {
        struct Fixed;
        impl Measure<u8> for Fixed {
            fn minimum_size(&self, _: &u8) -> Dimension {
                Dimension::new(1, 1)
            }
            fn preferred_size(&self, _: &u8) -> Dimension {
                Dimension::new(5, 5)
            }
        }
        assert_eq!(Fixed.default_size(&0), Dimension::new(5, 5));
    }

    #[test]
    fn test_missing_constraints() {
        let constraints = IndexMap::new();
        let err = measure_components(&["ok"], &constraints, &sizes()).unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingConstraints { ref component } if component == "\"ok\""));
    }

    #[test]
    fn test_size_groups_share_the_maximum() {
        let mut constraints = IndexMap::new();
        constraints.insert("ok", CellConstraints::xy(1, 1).with_h_group(1));
        constraints.insert("cancel", CellConstraints::xy(2, 1).with_h_group(1));
        let measured = measure_components(&["ok", "cancel"], &constraints, &sizes()).unwrap();

        for component in &measured {
            assert_eq!(component.horizontal, ComponentExtent::new(60, 100, 100));
        }
        // heights are not grouped
        assert_eq!(measured[0].vertical.preferred, 20);
        assert_eq!(measured[0].vertical.minimum, 10);
        assert_eq!(measured[1].vertical.minimum, 12);
    }
}
