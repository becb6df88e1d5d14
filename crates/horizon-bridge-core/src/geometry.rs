//! Plain geometry types shared with the host across the C boundary.
//!
//! Both types are `#[repr(C)]` and passed by value, so their layout is part
//! of the ABI and checked at compile time.

use static_assertions::{assert_eq_align, assert_eq_size};

/// Absolute screen-space placement and size of a window at creation time.
///
/// Coordinates are in logical units with a top-left origin. Negative
/// placement is not representable.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rectangle {
    /// Distance from the left edge of the screen.
    pub left: u32,
    /// Distance from the top edge of the screen.
    pub top: u32,
    /// Content width.
    pub width: u32,
    /// Content height.
    pub height: u32,
}

impl Rectangle {
    /// Create a new rectangle.
    pub const fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// The rectangle's size as a floating-point [`SizeF`].
    pub fn size(&self) -> SizeF {
        SizeF::new(self.width as f32, self.height as f32)
    }

    /// Check if the rectangle has zero area.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A floating-point size in logical units.
///
/// Used for live view size queries and resize notifications.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeF {
    /// Width in logical units.
    pub width: f32,
    /// Height in logical units.
    pub height: f32,
}

impl SizeF {
    /// Tolerance used by [`SizeF::approx_eq`].
    ///
    /// Sizes round-trip through physical pixels and the scale factor, which
    /// can shift them by a fraction of a unit.
    pub const EPSILON: f32 = 0.5;

    /// A zero size.
    pub const ZERO: SizeF = SizeF {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Compare two sizes within [`SizeF::EPSILON`].
    pub fn approx_eq(&self, other: &SizeF) -> bool {
        (self.width - other.width).abs() <= Self::EPSILON
            && (self.height - other.height).abs() <= Self::EPSILON
    }
}

impl From<(f32, f32)> for SizeF {
    fn from((width, height): (f32, f32)) -> Self {
        Self::new(width, height)
    }
}

assert_eq_size!(Rectangle, [u32; 4]);
assert_eq_align!(Rectangle, u32);
assert_eq_size!(SizeF, [f32; 2]);
assert_eq_align!(SizeF, f32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_size() {
        let rect = Rectangle::new(10, 20, 800, 600);
        assert_eq!(rect.size(), SizeF::new(800.0, 600.0));
        assert!(!rect.is_empty());
        assert!(Rectangle::new(0, 0, 0, 600).is_empty());
    }

    #[test]
    fn test_size_approx_eq() {
        let a = SizeF::new(1024.0, 768.0);
        assert!(a.approx_eq(&SizeF::new(1024.25, 767.8)));
        assert!(!a.approx_eq(&SizeF::new(1025.0, 768.0)));
    }

    #[test]
    fn test_size_from_tuple() {
        let size: SizeF = (3.0, 4.0).into();
        assert_eq!(size, SizeF::new(3.0, 4.0));
    }
}
