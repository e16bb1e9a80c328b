//! Options for a layout pass.

use gridform_core::{DialogMetrics, Insets};

/// Options shared by layout and layout-size computations.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutOptions {
    /// Space between the container edge and the grid
    pub border: Insets,
    /// Dialog base units and screen resolution for unit conversion
    pub metrics: DialogMetrics,
}

impl LayoutOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the border insets.
    pub fn with_border(mut self, border: Insets) -> Self {
        self.border = border;
        self
    }

    /// Set the dialog metrics.
    pub fn with_metrics(mut self, metrics: DialogMetrics) -> Self {
        self.metrics = metrics;
        self
    }
}
