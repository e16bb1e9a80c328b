//! Cell constraints: where a component sits in the grid and how it is
//! aligned inside its cell.

use std::fmt;

use crate::errors::{ArityError, ConfigurationError};
use crate::types::{DefaultAlignment, Insets, Orientation};

/// Alignment of a component inside its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellAlignment {
    /// Use the default alignment of the column or row
    #[default]
    Default,
    Fill,
    Left,
    Right,
    Center,
    Top,
    Bottom,
}

impl CellAlignment {
    /// Decode a full or one-letter alignment word for the given axis.
    pub fn decode(token: &str, orientation: Orientation) -> Option<Self> {
        match (token, orientation) {
            ("d" | "default", _) => Some(Self::Default),
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
            Self::Default | Self::Fill | Self::Center => true,
            Self::Left | Self::Right => orientation.is_horizontal(),
            Self::Top | Self::Bottom => !orientation.is_horizontal(),
        }
    }

    /// This alignment, or the track default when unset.
    pub fn or_track_default(self, track_default: DefaultAlignment) -> DefaultAlignment {
        match self {
            Self::Default => track_default,
            Self::Fill => DefaultAlignment::Fill,
            Self::Left => DefaultAlignment::Left,
            Self::Right => DefaultAlignment::Right,
            Self::Center => DefaultAlignment::Center,
            Self::Top => DefaultAlignment::Top,
            Self::Bottom => DefaultAlignment::Bottom,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Fill => "fill",
            Self::Left => "left",
            Self::Right => "right",
            Self::Center => "center",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

impl fmt::Display for CellAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Placement of one component. Grid coordinates are 1-based.
///
/// This is a `Copy` value: every placement owns its constraints, so
/// reusing a value for several components never shares state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellConstraints {
    /// First column (1-based)
    pub grid_x: usize,
    /// First row (1-based)
    pub grid_y: usize,
    /// Number of columns spanned
    pub grid_width: usize,
    /// Number of rows spanned
    pub grid_height: usize,
    pub h_align: CellAlignment,
    pub v_align: CellAlignment,
    /// Space between the cell border and the component
    pub insets: Insets,
    /// Components with the same horizontal group share their widths
    pub h_group: Option<u32>,
    /// Components with the same vertical group share their heights
    pub v_group: Option<u32>,
}

impl Default for CellConstraints {
    fn default() -> Self {
        Self::xy(1, 1)
    }
}

impl CellConstraints {
    pub fn xy(grid_x: usize, grid_y: usize) -> Self {
        Self::xywh(grid_x, grid_y, 1, 1)
    }

    pub fn xyw(grid_x: usize, grid_y: usize, grid_width: usize) -> Self {
        Self::xywh(grid_x, grid_y, grid_width, 1)
    }

    pub fn xywh(grid_x: usize, grid_y: usize, grid_width: usize, grid_height: usize) -> Self {
        Self {
            grid_x,
            grid_y,
            grid_width,
            grid_height,
            h_align: CellAlignment::Default,
            v_align: CellAlignment::Default,
            insets: Insets::ZERO,
            h_group: None,
            v_group: None,
        }
    }

    pub fn with_alignment(mut self, h_align: CellAlignment, v_align: CellAlignment) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }

    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    pub fn with_h_group(mut self, group: u32) -> Self {
        self.h_group = Some(group);
        self
    }

    pub fn with_v_group(mut self, group: u32) -> Self {
        self.v_group = Some(group);
        self
    }

    pub fn origin(&self, orientation: Orientation) -> usize {
        match orientation {
            Orientation::Horizontal => self.grid_x,
            Orientation::Vertical => self.grid_y,
        }
    }

    pub fn span(&self, orientation: Orientation) -> usize {
        match orientation {
            Orientation::Horizontal => self.grid_width,
            Orientation::Vertical => self.grid_height,
        }
    }

    pub fn alignment(&self, orientation: Orientation) -> CellAlignment {
        match orientation {
            Orientation::Horizontal => self.h_align,
            Orientation::Vertical => self.v_align,
        }
    }

    pub fn group(&self, orientation: Orientation) -> Option<u32> {
        match orientation {
            Orientation::Horizontal => self.h_group,
            Orientation::Vertical => self.v_group,
        }
    }

    /// Check origins and spans are at least 1 and alignments fit their axis.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let fields = [
            ("grid_x", self.grid_x),
            ("grid_y", self.grid_y),
            ("grid_width", self.grid_width),
            ("grid_height", self.grid_height),
        ];
        if let Some((field, value)) = fields.into_iter().find(|(_, value)| *value == 0) {
            return Err(ConfigurationError::InvalidCell { field, value });
        }
        for orientation in [Orientation::Horizontal, Orientation::Vertical] {
            let alignment = self.alignment(orientation);
            if !alignment.is_valid_for(orientation) {
                return Err(ConfigurationError::InvalidCellAlignment {
                    alignment: alignment.to_string(),
                    orientation,
                });
            }
        }
        Ok(())
    }

    /// Check the cell lies within a grid of the given size.
    pub fn ensure_fits(&self, column_count: usize, row_count: usize) -> Result<(), ArityError> {
        for (orientation, count) in [
            (Orientation::Horizontal, column_count),
            (Orientation::Vertical, row_count),
        ] {
            let start = self.origin(orientation);
            let span = self.span(orientation);
            if start.checked_add(span).map_or(true, |end| end > count + 1) {
                return Err(ArityError::CellOutOfRange { orientation, start, span, count });
            }
        }
        Ok(())
    }
}
