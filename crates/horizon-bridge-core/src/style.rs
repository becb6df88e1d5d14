//! Window style bitmask.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Native window chrome selection.
///
/// The bit assignments follow AppKit's `NSWindowStyleMask` so hosts written
/// against that toolkit can pass their masks through unchanged. The bridge
/// never rejects unknown bits: backends map the bits they understand and
/// ignore the rest.
///
/// # Example
///
/// ```
/// use horizon_bridge_core::WindowStyle;
///
/// let style = WindowStyle::TITLED | WindowStyle::CLOSABLE;
/// assert!(style.is_titled());
/// assert!(!style.is_resizable());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowStyle(u32);

impl WindowStyle {
    /// No title bar, no buttons.
    pub const BORDERLESS: WindowStyle = WindowStyle(0);

    /// Window has a title bar.
    pub const TITLED: WindowStyle = WindowStyle(1 << 0);

    /// Window has a close button.
    pub const CLOSABLE: WindowStyle = WindowStyle(1 << 1);

    /// Window has a minimize button.
    pub const MINIATURIZABLE: WindowStyle = WindowStyle(1 << 2);

    /// Window can be resized by the user.
    pub const RESIZABLE: WindowStyle = WindowStyle(1 << 3);

    /// Content view extends underneath the title bar.
    pub const FULL_SIZE_CONTENT_VIEW: WindowStyle = WindowStyle(1 << 15);

    /// Title bar, all buttons, resizable.
    pub const DEFAULT: WindowStyle = WindowStyle(
        Self::TITLED.0 | Self::CLOSABLE.0 | Self::MINIATURIZABLE.0 | Self::RESIZABLE.0,
    );

    /// Wrap a raw mask received from the host.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw mask, exactly as received.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Check if all bits of `other` are set.
    pub const fn contains(self, other: WindowStyle) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_borderless(self) -> bool {
        !self.contains(Self::TITLED)
    }

    pub fn is_titled(self) -> bool {
        self.contains(Self::TITLED)
    }

    pub fn is_closable(self) -> bool {
        self.contains(Self::CLOSABLE)
    }

    pub fn is_miniaturizable(self) -> bool {
        self.contains(Self::MINIATURIZABLE)
    }

    pub fn is_resizable(self) -> bool {
        self.contains(Self::RESIZABLE)
    }

    pub fn has_full_size_content_view(self) -> bool {
        self.contains(Self::FULL_SIZE_CONTENT_VIEW)
    }
}

impl Default for WindowStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u32> for WindowStyle {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl BitOr for WindowStyle {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for WindowStyle {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for WindowStyle {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Debug for WindowStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WindowStyle({:#06x})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style() {
        let style = WindowStyle::default();
        assert!(style.is_titled());
        assert!(style.is_closable());
        assert!(style.is_miniaturizable());
        assert!(style.is_resizable());
        assert!(!style.has_full_size_content_view());
    }

    #[test]
    fn test_borderless() {
        assert!(WindowStyle::BORDERLESS.is_borderless());
        assert!(!WindowStyle::TITLED.is_borderless());
    }

    #[test]
    fn test_unknown_bits_pass_through() {
        let raw = (1 << 12) | 1;
        let style = WindowStyle::from_bits(raw);
        assert_eq!(style.bits(), raw);
        assert!(style.is_titled());
    }

    #[test]
    fn test_bit_ops() {
        let mut style = WindowStyle::TITLED;
        style |= WindowStyle::RESIZABLE;
        assert_eq!(style & WindowStyle::RESIZABLE, WindowStyle::RESIZABLE);
        assert_eq!(format!("{style:?}"), "WindowStyle(0x0009)");
    }
}
