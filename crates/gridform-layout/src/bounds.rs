//! Pixel rectangles produced by a layout pass.

use gridform_core::{Insets, Orientation};

/// Axis-aligned rectangle in container pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    /// Create bounds with position and size.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Get the right edge (x + width).
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Get the bottom edge (y + height).
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Position along an axis.
    pub fn origin(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.x,
            Orientation::Vertical => self.y,
        }
    }

    /// Extent along an axis.
    pub fn extent(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }

    /// Shrink by `insets`. The size never drops below zero.
    pub fn inset(&self, insets: Insets) -> Bounds {
        Bounds::new(
            self.x + insets.left,
            self.y + insets.top,
            (self.width - insets.left - insets.right).max(0),
            (self.height - insets.top - insets.bottom).max(0),
        )
    }

    /// Check whether `other` lies entirely inside these bounds.
    pub fn contains(&self, other: &Bounds) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let bounds = Bounds::new(10, 20, 30, 40);
        assert_eq!(bounds.right(), 40);
        assert_eq!(bounds.bottom(), 60);
        assert_eq!(bounds.extent(Orientation::Vertical), 40);
        assert_eq!(bounds.origin(Orientation::Horizontal), 10);
    }

    #[test]
    fn test_inset_clamps_at_zero() {
        let bounds = Bounds::new(0, 0, 10, 10);
        assert_eq!(bounds.inset(Insets::new(1, 2, 3, 4)), Bounds::new(2, 1, 4, 6));
        assert_eq!(bounds.inset(Insets::uniform(8)).width, 0);
    }

    #[test]
    fn test_contains() {
        let outer = Bounds::new(0, 0, 100, 100);
        assert!(outer.contains(&Bounds::new(10, 10, 90, 90)));
        assert!(!outer.contains(&Bounds::new(10, 10, 91, 90)));
    }
}
