//! Window configuration and lifecycle state.
//!
//! This module provides [`WindowConfig`], a builder describing a window to
//! create, and [`WindowState`], the per-window lifecycle:
//!
//! ```text
//! Created (hidden) ──show──▶ Shown ──will-resize──▶ Resizing
//!        │                     ▲                       │
//!        │                     └──────did-resize───────┘
//!        └──────────────close──────────▶ Closed (terminal)
//! ```

use crate::geometry::Rectangle;
use crate::handle::{WindowDelegateHandle, WindowHandle};
use crate::style::WindowStyle;

/// Configuration for creating a native window.
///
/// # Example
///
/// ```
/// use horizon_bridge_core::{Rectangle, WindowConfig, WindowStyle};
///
/// let config = WindowConfig::new("Test")
///     .with_rect(Rectangle::new(0, 0, 800, 600))
///     .with_style(WindowStyle::TITLED | WindowStyle::CLOSABLE);
///
/// assert_eq!(config.title(), "Test");
/// assert_eq!(config.rect().width, 800);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    title: String,
    rect: Rectangle,
    style: WindowStyle,
}

impl WindowConfig {
    /// Default content size used when no rectangle is given.
    pub const DEFAULT_RECT: Rectangle = Rectangle::new(100, 100, 800, 600);

    /// Create a configuration with the given title and default geometry.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rect: Self::DEFAULT_RECT,
            style: WindowStyle::DEFAULT,
        }
    }

    /// Build a configuration from the raw values the host passes.
    pub fn from_raw(rect: Rectangle, style: u32, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rect,
            style: WindowStyle::from_bits(style),
        }
    }

    /// Set the placement and content size.
    pub fn with_rect(mut self, rect: Rectangle) -> Self {
        self.rect = rect;
        self
    }

    /// Set the content size, keeping the current placement.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.rect.width = width;
        self.rect.height = height;
        self
    }

    /// Set the top-left placement, keeping the current size.
    pub fn with_position(mut self, left: u32, top: u32) -> Self {
        self.rect.left = left;
        self.rect.top = top;
        self
    }

    /// Set the window style mask.
    pub fn with_style(mut self, style: WindowStyle) -> Self {
        self.style = style;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rect(&self) -> Rectangle {
        self.rect
    }

    pub fn style(&self) -> WindowStyle {
        self.style
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new("")
    }
}

/// Lifecycle state of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindowState {
    /// Created but never shown.
    #[default]
    Created,
    /// Visible on screen.
    Shown,
    /// Between a will-resize and its did-resize.
    Resizing,
    /// Closed by the toolkit. Terminal.
    Closed,
}

impl WindowState {
    /// Check if the window still accepts operations.
    pub fn is_open(self) -> bool {
        self != WindowState::Closed
    }
}

/// Bridge-side bookkeeping for one window.
#[derive(Debug, Clone)]
pub(crate) struct WindowRecord {
    pub(crate) config: WindowConfig,
    pub(crate) state: WindowState,
    /// Whether the window has been shown; the state to return to after a
    /// resize.
    pub(crate) visible: bool,
    pub(crate) delegate: Option<WindowDelegateHandle>,
    pub(crate) owner: Option<WindowHandle>,
}

impl WindowRecord {
    pub(crate) fn new(config: WindowConfig) -> Self {
        Self {
            config,
            state: WindowState::Created,
            visible: false,
            delegate: None,
            owner: None,
        }
    }

    /// The state to settle in when no resize is in flight.
    pub(crate) fn resting_state(&self) -> WindowState {
        if self.visible {
            WindowState::Shown
        } else {
            WindowState::Created
        }
    }
}
