//! Window configuration to winit attributes.

use horizon_bridge_core::{WindowConfig, WindowStyle};
use winit::dpi::{LogicalPosition, LogicalSize, Position, Size};
use winit::window::{Window, WindowAttributes, WindowButtons};

/// Build the attributes for a new, hidden window.
///
/// Style bits winit has no equivalent for are ignored.
pub(crate) fn window_attributes(config: &WindowConfig) -> WindowAttributes {
    let rect = config.rect();
    let style = config.style();

    let mut attrs = Window::default_attributes()
        .with_title(config.title())
        .with_position(Position::Logical(LogicalPosition::new(
            rect.left as f64,
            rect.top as f64,
        )))
        // Native toolkits reject zero-sized content.
        .with_inner_size(Size::Logical(LogicalSize::new(
            rect.width.max(1) as f64,
            rect.height.max(1) as f64,
        )))
        .with_visible(false)
        .with_decorations(style.is_titled())
        .with_resizable(style.is_resizable())
        .with_enabled_buttons(window_buttons(style));

    #[cfg(target_os = "macos")]
    if style.has_full_size_content_view() {
        use winit::platform::macos::WindowAttributesExtMacOS;
        attrs = attrs
            .with_fullsize_content_view(true)
            .with_titlebar_transparent(true)
            .with_title_hidden(true);
    }

    attrs
}

fn window_buttons(style: WindowStyle) -> WindowButtons {
    let mut buttons = WindowButtons::empty();
    if style.is_closable() {
        buttons |= WindowButtons::CLOSE;
    }
    if style.is_miniaturizable() {
        buttons |= WindowButtons::MINIMIZE;
    }
    if style.is_resizable() {
        buttons |= WindowButtons::MAXIMIZE;
    }
    buttons
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_bridge_core::Rectangle;

    #[test]
    fn test_geometry_is_logical() {
        let config = WindowConfig::new("Test").with_rect(Rectangle::new(10, 20, 800, 600));
        let attrs = window_attributes(&config);

        assert_eq!(attrs.title, "Test");
        assert_eq!(
            attrs.inner_size,
            Some(Size::Logical(LogicalSize::new(800.0, 600.0)))
        );
        assert_eq!(
            attrs.position,
            Some(Position::Logical(LogicalPosition::new(10.0, 20.0)))
        );
        assert!(!attrs.visible);
    }

    #[test]
    fn test_default_style() {
        let attrs = window_attributes(&WindowConfig::default());
        assert!(attrs.decorations);
        assert!(attrs.resizable);
        assert_eq!(attrs.enabled_buttons, WindowButtons::all());
    }

    #[test]
    fn test_borderless_style() {
        let config = WindowConfig::new("Popup").with_style(WindowStyle::BORDERLESS);
        let attrs = window_attributes(&config);
        assert!(!attrs.decorations);
        assert!(!attrs.resizable);
        assert_eq!(attrs.enabled_buttons, WindowButtons::empty());
    }

    #[test]
    fn test_closable_only() {
        let config =
            WindowConfig::new("Dialog").with_style(WindowStyle::TITLED | WindowStyle::CLOSABLE);
        let attrs = window_attributes(&config);
        assert!(attrs.decorations);
        assert_eq!(attrs.enabled_buttons, WindowButtons::CLOSE);
    }

    #[test]
    fn test_zero_size_is_clamped() {
        let config = WindowConfig::new("Empty").with_size(0, 0);
        let attrs = window_attributes(&config);
        assert_eq!(attrs.inner_size, Some(Size::Logical(LogicalSize::new(1.0, 1.0))));
    }
}
