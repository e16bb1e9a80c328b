//! Core value types for gridform: orientation, units, alignments, insets.

use std::fmt;

/// Axis of a track. Columns are horizontal, rows are vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Orientation::Horizontal)
    }

    /// Name of a track along this axis, used in error messages.
    pub fn track_name(self) -> &'static str {
        match self {
            Orientation::Horizontal => "column",
            Orientation::Vertical => "row",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => f.write_str("horizontal"),
            Orientation::Vertical => f.write_str("vertical"),
        }
    }
}

/// Length units understood by constant sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    /// Screen pixels
    Pixel,
    /// Points (1/72 inch)
    Point,
    /// Dialog units along the axis of the owning track
    DialogUnit,
    /// Horizontal dialog units
    DialogUnitX,
    /// Vertical dialog units
    DialogUnitY,
    /// Inches
    Inch,
    /// Millimeters
    Millimeter,
    /// Centimeters
    Centimeter,
}

impl Unit {
    /// The encoded suffix of this unit, e.g. `dlu` or `px`.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Unit::Pixel => "px",
            Unit::Point => "pt",
            Unit::DialogUnit => "dlu",
            Unit::DialogUnitX => "dlux",
            Unit::DialogUnitY => "dluy",
            Unit::Inch => "in",
            Unit::Millimeter => "mm",
            Unit::Centimeter => "cm",
        }
    }

    /// Decode a unit suffix. Axis-bound dialog units are only accepted for
    /// their own orientation.
    pub fn from_abbreviation(suffix: &str, orientation: Orientation) -> Option<Self> {
        let unit = match suffix {
            "px" => Unit::Pixel,
            "pt" => Unit::Point,
            "dlu" => Unit::DialogUnit,
            "dlux" if orientation.is_horizontal() => Unit::DialogUnitX,
            "dluy" if !orientation.is_horizontal() => Unit::DialogUnitY,
            "in" => Unit::Inch,
            "mm" => Unit::Millimeter,
            "cm" => Unit::Centimeter,
            _ => return None,
        };
        Some(unit)
    }
}

/// Converts logical units into pixels.
///
/// Dialog units depend on the host font, so they are resolved through this
/// trait rather than by a fixed factor.
pub trait UnitConverter {
    /// Pixels per dialog unit along `orientation`.
    fn pixels_per_dialog_unit(&self, orientation: Orientation) -> f64;

    /// Screen resolution in dots per inch.
    fn screen_resolution(&self) -> f64;
}

/// Font-derived dialog base units plus screen resolution.
///
/// A horizontal dialog unit is a quarter of the average character width,
/// a vertical one is an eighth of the character height.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialogMetrics {
    /// Average character width in pixels
    pub base_unit_x: f64,
    /// Character height in pixels
    pub base_unit_y: f64,
    /// Screen resolution in dots per inch
    pub dpi: f64,
}

impl DialogMetrics {
    /// Metrics of an 11px sans-serif dialog font on a 96 DPI screen.
    pub const DEFAULT: Self = Self {
        base_unit_x: 6.0,
        base_unit_y: 13.0,
        dpi: 96.0,
    };

    pub fn new(base_unit_x: f64, base_unit_y: f64, dpi: f64) -> Self {
        Self { base_unit_x, base_unit_y, dpi }
    }
}

impl Default for DialogMetrics {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl UnitConverter for DialogMetrics {
    fn pixels_per_dialog_unit(&self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Horizontal => self.base_unit_x / 4.0,
            Orientation::Vertical => self.base_unit_y / 8.0,
        }
    }

    fn screen_resolution(&self) -> f64 {
        self.dpi
    }
}

/// Default alignment of a column or row, used when a cell does not
/// override it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DefaultAlignment {
    Left,
    Right,
    Top,
    Bottom,
    Center,
    Fill,
}

impl DefaultAlignment {
    /// Decode a full or one-letter alignment word for the given axis.
    pub fn decode(token: &str, orientation: Orientation) -> Option<Self> {
        match (token, orientation) {
            ("f" | "fill", _) => Some(Self::Fill),
            ("c" | "center", _) => Some(Self::Center),
            ("l" | "left", Orientation::Horizontal) => Some(Self::Left),
            ("r" | "right", Orientation::Horizontal) => Some(Self::Right),
            ("t" | "top", Orientation::Vertical) => Some(Self::Top),
            ("b" | "bottom", Orientation::Vertical) => Some(Self::Bottom),
            _ => None,
        }
    }

    pub fn is_valid_for(self, orientation: Orientation) -> bool {
        match self {
            Self::Fill | Self::Center => true,
            Self::Left | Self::Right => orientation.is_horizontal(),
            Self::Top | Self::Bottom => !orientation.is_horizontal(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Center => "center",
            Self::Fill => "fill",
        }
    }

    /// First character of the name, used by short debug strings.
    pub fn abbreviation(self) -> char {
        self.name().as_bytes()[0] as char
    }
}

impl fmt::Display for DefaultAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pixel insets around a cell or a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
}

impl Insets {
    pub const ZERO: Self = Self { top: 0, left: 0, bottom: 0, right: 0 };

    pub fn new(top: i32, left: i32, bottom: i32, right: i32) -> Self {
        Self { top, left, bottom, right }
    }

    pub fn uniform(amount: i32) -> Self {
        Self::new(amount, amount, amount, amount)
    }

    /// Total inset along an axis (left + right, or top + bottom).
    pub fn along(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.left.saturating_add(self.right),
            Orientation::Vertical => self.top.saturating_add(self.bottom),
        }
    }

    /// Leading inset along an axis (left or top).
    pub fn leading(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.left,
            Orientation::Vertical => self.top,
        }
    }
}

/// A width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimension {
    pub width: i32,
    pub height: i32,
}

impl Dimension {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// The extent along an axis.
    pub fn along(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }
}

/// Round a pixel value half-up.
pub(crate) fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}
