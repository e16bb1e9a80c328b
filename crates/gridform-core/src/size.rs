//! Track sizes: constants, component-derived sizes, and bounded sizes.
//!
//! A [`Size`] turns into pixels through [`Size::resolve`]. Constants only
//! need a [`UnitConverter`]; component sizes additionally need the measured
//! extents of the components that live in the track.

use std::fmt;

use crate::errors::ConfigurationError;
use crate::types::{round_half_up, Orientation, Unit, UnitConverter};

/// A length with a unit, e.g. `4dlu` or `10px`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstantSize {
    pub value: f64,
    pub unit: Unit,
}

impl ConstantSize {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub fn pixels(value: f64) -> Self {
        Self::new(value, Unit::Pixel)
    }

    pub fn dialog_units(value: f64) -> Self {
        Self::new(value, Unit::DialogUnit)
    }

    /// Convert to pixels along `orientation`, rounding half-up.
    pub fn to_pixels(&self, orientation: Orientation, converter: &dyn UnitConverter) -> i32 {
        let factor = match self.unit {
            Unit::Pixel => 1.0,
            Unit::Point => converter.screen_resolution() / 72.0,
            Unit::Inch => converter.screen_resolution(),
            Unit::Millimeter => converter.screen_resolution() / 25.4,
            Unit::Centimeter => converter.screen_resolution() / 2.54,
            Unit::DialogUnit => converter.pixels_per_dialog_unit(orientation),
            Unit::DialogUnitX => converter.pixels_per_dialog_unit(Orientation::Horizontal),
            Unit::DialogUnitY => converter.pixels_per_dialog_unit(Orientation::Vertical),
        };
        round_half_up(self.value * factor)
    }
}

impl fmt::Display for ConstantSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.abbreviation())
    }
}

/// Which component measure a logical size uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComponentSize {
    Minimum,
    Preferred,
    /// Preferred if the container has room for it, minimum otherwise
    Default,
}

impl ComponentSize {
    /// Decode `m`/`min`, `p`/`pref`, or `d`/`default`.
    pub fn decode(token: &str) -> Option<Self> {
        match token {
            "m" | "min" => Some(Self::Minimum),
            "p" | "pref" => Some(Self::Preferred),
            "d" | "default" => Some(Self::Default),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Minimum => "min",
            Self::Preferred => "pref",
            Self::Default => "default",
        }
    }

    /// Largest extent among `members` for this measure, 0 when empty.
    pub fn maximum_of(self, members: &[ComponentExtent]) -> i32 {
        members.iter().map(|m| m.get(self)).max().unwrap_or(0)
    }
}

impl fmt::Display for ComponentSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A component size clamped by constant bounds. At least one bound is set.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundedSize {
    basis: ComponentSize,
    lower: Option<ConstantSize>,
    upper: Option<ConstantSize>,
}

impl BoundedSize {
    /// `basis`, but never smaller than `lower`.
    pub fn at_least(lower: ConstantSize, basis: ComponentSize) -> Self {
        Self { basis, lower: Some(lower), upper: None }
    }

    /// `basis`, but never larger than `upper`.
    pub fn at_most(basis: ComponentSize, upper: ConstantSize) -> Self {
        Self { basis, lower: None, upper: Some(upper) }
    }

    pub fn between(lower: ConstantSize, basis: ComponentSize, upper: ConstantSize) -> Self {
        Self { basis, lower: Some(lower), upper: Some(upper) }
    }

    pub fn basis(&self) -> ComponentSize {
        self.basis
    }

    pub fn lower_bound(&self) -> Option<ConstantSize> {
        self.lower
    }

    pub fn upper_bound(&self) -> Option<ConstantSize> {
        self.upper
    }

    fn clamp(&self, basis: i32, orientation: Orientation, converter: &dyn UnitConverter) -> i32 {
        let mut result = basis;
        if let Some(lower) = self.lower {
            result = result.max(lower.to_pixels(orientation, converter));
        }
        if let Some(upper) = self.upper {
            result = result.min(upper.to_pixels(orientation, converter));
        }
        result
    }
}

impl fmt::Display for BoundedSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        if let Some(lower) = self.lower {
            write!(f, "{};", lower)?;
        }
        write!(f, "{}", self.basis)?;
        if let Some(upper) = self.upper {
            write!(f, ";{}", upper)?;
        }
        f.write_str("]")
    }
}

/// Size of a column or row.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Size {
    Constant(ConstantSize),
    Component(ComponentSize),
    Bounded(BoundedSize),
}

impl Size {
    pub const MINIMUM: Self = Size::Component(ComponentSize::Minimum);
    pub const PREFERRED: Self = Size::Component(ComponentSize::Preferred);
    pub const DEFAULT: Self = Size::Component(ComponentSize::Default);

    /// Whether the size depends on measured components.
    pub fn is_component_derived(&self) -> bool {
        !matches!(self, Size::Constant(_))
    }

    /// The component measure this size is based on, if any.
    pub fn component_kind(&self) -> Option<ComponentSize> {
        match self {
            Size::Constant(_) => None,
            Size::Component(kind) => Some(*kind),
            Size::Bounded(bounded) => Some(bounded.basis),
        }
    }

    /// Resolve to pixels.
    pub fn resolve(&self, context: &SizeContext<'_>) -> Result<i32, ConfigurationError> {
        match self {
            Size::Constant(constant) => {
                Ok(constant.to_pixels(context.orientation, context.converter))
            }
            Size::Component(kind) => {
                let members = context.members(self)?;
                Ok(kind.maximum_of(members))
            }
            Size::Bounded(bounded) => {
                let members = context.members(self)?;
                let basis = bounded.basis.maximum_of(members);
                Ok(bounded.clamp(basis, context.orientation, context.converter))
            }
        }
    }
}

impl From<ConstantSize> for Size {
    fn from(size: ConstantSize) -> Self {
        Size::Constant(size)
    }
}

impl From<ComponentSize> for Size {
    fn from(size: ComponentSize) -> Self {
        Size::Component(size)
    }
}

impl From<BoundedSize> for Size {
    fn from(size: BoundedSize) -> Self {
        Size::Bounded(size)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Size::Constant(size) => size.fmt(f),
            Size::Component(size) => size.fmt(f),
            Size::Bounded(size) => size.fmt(f),
        }
    }
}

/// Measured extents of one component along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComponentExtent {
    pub minimum: i32,
    pub preferred: i32,
    pub default: i32,
}

impl ComponentExtent {
    pub fn new(minimum: i32, preferred: i32, default: i32) -> Self {
        Self { minimum, preferred, default }
    }

    pub fn get(&self, kind: ComponentSize) -> i32 {
        match kind {
            ComponentSize::Minimum => self.minimum,
            ComponentSize::Preferred => self.preferred,
            ComponentSize::Default => self.default,
        }
    }

    /// Component-wise maximum.
    pub fn max(self, other: Self) -> Self {
        Self {
            minimum: self.minimum.max(other.minimum),
            preferred: self.preferred.max(other.preferred),
            default: self.default.max(other.default),
        }
    }
}

/// Everything a [`Size`] needs to resolve along one axis.
#[derive(Clone, Copy)]
pub struct SizeContext<'a> {
    pub orientation: Orientation,
    pub converter: &'a dyn UnitConverter,
    /// Extents of the single-span components of the track, if measured.
    pub members: Option<&'a [ComponentExtent]>,
}

impl<'a> SizeContext<'a> {
    /// Context for constant sizes only.
    pub fn constant(orientation: Orientation, converter: &'a dyn UnitConverter) -> Self {
        Self { orientation, converter, members: None }
    }

    pub fn measured(
        orientation: Orientation,
        converter: &'a dyn UnitConverter,
        members: &'a [ComponentExtent],
    ) -> Self {
        Self { orientation, converter, members: Some(members) }
    }

    fn members(&self, size: &Size) -> Result<&'a [ComponentExtent], ConfigurationError> {
        self.members.ok_or_else(|| ConfigurationError::MissingMeasureContext {
            size: size.to_string(),
        })
    }
}

impl fmt::Debug for SizeContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SizeContext")
            .field("orientation", &self.orientation)
            .field("members", &self.members)
            .finish_non_exhaustive()
    }
}
