//! Column and row specifications.

use std::fmt;

use crate::errors::ConfigurationError;
use crate::size::{ComponentExtent, ConstantSize, Size, SizeContext};
use crate::types::{DefaultAlignment, Orientation, UnitConverter};

/// Resize weight of a fixed-size track.
pub const NO_GROW: f64 = 0.0;

/// Resize weight used by `grow` without an explicit weight.
pub const DEFAULT_GROW: f64 = 1.0;

/// Describes one column or row: its default alignment, its size, and how
/// it takes part in distributing extra space.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormSpec {
    orientation: Orientation,
    default_alignment: DefaultAlignment,
    size: Size,
    resize_weight: f64,
}

impl FormSpec {
    /// Create a spec, rejecting negative weights and alignments that do not
    /// belong to the orientation.
    pub fn new(
        orientation: Orientation,
        default_alignment: DefaultAlignment,
        size: Size,
        resize_weight: f64,
    ) -> Result<Self, ConfigurationError> {
        if !resize_weight.is_finite() || resize_weight < 0.0 {
            return Err(ConfigurationError::InvalidResizeWeight { weight: resize_weight });
        }
        if !default_alignment.is_valid_for(orientation) {
            return Err(ConfigurationError::AlignmentOrientation {
                alignment: default_alignment,
                orientation,
            });
        }
        Ok(Self { orientation, default_alignment, size, resize_weight })
    }

    /// A fill-aligned column.
    pub fn column(size: Size, resize_weight: f64) -> Result<Self, ConfigurationError> {
        let orientation = Orientation::Horizontal;
        Self::new(orientation, Self::default_alignment_for(orientation), size, resize_weight)
    }

    /// A center-aligned row.
    pub fn row(size: Size, resize_weight: f64) -> Result<Self, ConfigurationError> {
        let orientation = Orientation::Vertical;
        Self::new(orientation, Self::default_alignment_for(orientation), size, resize_weight)
    }

    /// A fixed gap column or row of the given constant size.
    pub fn gap(orientation: Orientation, size: ConstantSize) -> Self {
        Self {
            orientation,
            default_alignment: Self::default_alignment_for(orientation),
            size: Size::Constant(size),
            resize_weight: NO_GROW,
        }
    }

    /// An empty track that absorbs extra space.
    pub fn glue(orientation: Orientation) -> Self {
        Self {
            orientation,
            default_alignment: Self::default_alignment_for(orientation),
            size: Size::Constant(ConstantSize::pixels(0.0)),
            resize_weight: DEFAULT_GROW,
        }
    }

    /// Alignment used when an encoded spec names none: fill for columns,
    /// center for rows.
    pub fn default_alignment_for(orientation: Orientation) -> DefaultAlignment {
        match orientation {
            Orientation::Horizontal => DefaultAlignment::Fill,
            Orientation::Vertical => DefaultAlignment::Center,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn default_alignment(&self) -> DefaultAlignment {
        self.default_alignment
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn resize_weight(&self) -> f64 {
        self.resize_weight
    }

    pub fn can_grow(&self) -> bool {
        self.resize_weight != NO_GROW
    }

    /// Size of this track for the given member extents.
    pub fn maximum_size(
        &self,
        converter: &dyn UnitConverter,
        members: &[ComponentExtent],
    ) -> Result<i32, ConfigurationError> {
        self.size
            .resolve(&SizeContext::measured(self.orientation, converter, members))
    }

    /// Compact debug form, e.g. `l:pref:g`. Not guaranteed to parse.
    pub fn to_short_string(&self) -> String {
        let resize = if self.resize_weight == NO_GROW {
            "n".to_string()
        } else if self.resize_weight == DEFAULT_GROW {
            "g".to_string()
        } else {
            format!("g({})", self.resize_weight)
        };
        format!("{}:{}:{}", self.default_alignment.abbreviation(), self.size, resize)
    }
}

/// Debug form, e.g. `left:pref:noGrow`. Not guaranteed to parse.
impl fmt::Display for FormSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:", self.default_alignment, self.size)?;
        if self.resize_weight == NO_GROW {
            f.write_str("noGrow")
        } else if self.resize_weight == DEFAULT_GROW {
            f.write_str("grow")
        } else {
            write!(f, "grow({})", self.resize_weight)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::size::ComponentSize;
    use crate::types::DialogMetrics;

    #[test]
    fn test_negative_weight_rejected() {
        let err = FormSpec::column(Size::PREFERRED, -1.0).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidResizeWeight { .. }));
        assert!(FormSpec::column(Size::PREFERRED, f64::NAN).is_err());
        assert!(FormSpec::column(Size::PREFERRED, f64::INFINITY).is_err());
    }

    #[test]
    fn test_alignment_must_match_orientation() {
        let err = FormSpec::new(
            Orientation::Horizontal,
            DefaultAlignment::Top,
            Size::PREFERRED,
            NO_GROW,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigurationError::AlignmentOrientation { .. }));
    }

    #[test]
    fn test_can_grow() {
        assert!(!FormSpec::row(Size::PREFERRED, NO_GROW).unwrap().can_grow());
        assert!(FormSpec::row(Size::PREFERRED, 0.5).unwrap().can_grow());
    }

    #[test]
    fn test_default_alignments() {
        assert_eq!(FormSpec::column(Size::MINIMUM, 0.0).unwrap().default_alignment(), DefaultAlignment::Fill);
        assert_eq!(FormSpec::row(Size::MINIMUM, 0.0).unwrap().default_alignment(), DefaultAlignment::Center);
    }

    #[test]
    fn test_maximum_size_uses_members() {
        let spec = FormSpec::column(Size::Component(ComponentSize::Minimum), DEFAULT_GROW).unwrap();
        let members = [ComponentExtent::new(12, 30, 30), ComponentExtent::new(18, 20, 20)];
        assert_eq!(spec.maximum_size(&DialogMetrics::DEFAULT, &members).unwrap(), 18);
    }

    #[test]
    fn test_debug_strings() {
        let spec = FormSpec::new(
            Orientation::Horizontal,
            DefaultAlignment::Left,
            Size::PREFERRED,
            NO_GROW,
        )
        .unwrap();
        insta::assert_snapshot!(spec.to_string(), @"left:pref:noGrow");
        insta::assert_snapshot!(spec.to_short_string(), @"l:pref:n");

        let weighted = FormSpec::row(Size::MINIMUM, 2.5).unwrap();
        insta::assert_snapshot!(weighted.to_string(), @"center:min:grow(2.5)");
    }
}
