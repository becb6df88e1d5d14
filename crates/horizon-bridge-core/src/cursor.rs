//! Cursor state management.
//!
//! The cursor controller owns the process-wide cursor state:
//!
//! - the active cursor type,
//! - a LIFO stack of the cursors that were active before each
//!   [`CursorController::set_cursor_type`],
//! - a visibility flag,
//! - a "hidden until the mouse moves" latch.
//!
//! ```
//! use horizon_bridge_core::cursor::{CursorController, CursorType};
//!
//! let mut cursor = CursorController::new();
//! cursor.set_cursor_type(CursorType::IBeam);
//! cursor.set_cursor_type(CursorType::PointingHand);
//! cursor.pop(); // back to IBeam
//! cursor.pop(); // back to Arrow
//! assert_eq!(cursor.current(), CursorType::Arrow);
//!
//! // Popping an empty stack leaves the cursor alone.
//! assert!(!cursor.pop());
//! assert_eq!(cursor.current(), CursorType::Arrow);
//! ```
//!
//! # Visibility
//!
//! Visibility is a plain boolean, not a counter: hiding twice and unhiding
//! once shows the cursor again. The hidden-until-moves latch is independent
//! of it; the cursor is displayed only when it is visible and the latch is
//! clear.

use cursor_icon::CursorIcon;

use crate::error::BridgeError;
use crate::handle::CursorHandle;

/// The cursors the host can select, with stable ordinals `0..=17`.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorType {
    /// The default arrow.
    #[default]
    Arrow = 0,
    /// Text selection.
    IBeam = 1,
    /// Clickable element.
    PointingHand = 2,
    /// Something is being dragged.
    ClosedHand = 3,
    /// Something can be dragged.
    OpenHand = 4,
    ResizeLeft = 5,
    ResizeRight = 6,
    ResizeLeftRight = 7,
    ResizeUp = 8,
    ResizeDown = 9,
    ResizeUpDown = 10,
    /// Precise selection.
    Crosshair = 11,
    /// Dropping here removes the dragged item.
    DisappearingItem = 12,
    /// The operation is forbidden.
    OperationNotAllowed = 13,
    /// Dropping creates a link.
    DragLink = 14,
    /// Dropping creates a copy.
    DragCopy = 15,
    /// A context menu is available.
    ContextualMenu = 16,
    /// Text selection in vertical layout.
    IBeamVertical = 17,
}

impl CursorType {
    /// Every cursor type in ordinal order.
    pub const ALL: [CursorType; 18] = [
        CursorType::Arrow,
        CursorType::IBeam,
        CursorType::PointingHand,
        CursorType::ClosedHand,
        CursorType::OpenHand,
        CursorType::ResizeLeft,
        CursorType::ResizeRight,
        CursorType::ResizeLeftRight,
        CursorType::ResizeUp,
        CursorType::ResizeDown,
        CursorType::ResizeUpDown,
        CursorType::Crosshair,
        CursorType::DisappearingItem,
        CursorType::OperationNotAllowed,
        CursorType::DragLink,
        CursorType::DragCopy,
        CursorType::ContextualMenu,
        CursorType::IBeamVertical,
    ];

    /// The ordinal the host uses for this cursor.
    pub fn ordinal(self) -> u32 {
        self as u32
    }

    /// The native cursor object handle for this type.
    pub fn handle(self) -> CursorHandle {
        CursorHandle::from_ordinal(self.ordinal())
    }

    /// Look up the cursor type a handle was derived from.
    pub fn from_handle(handle: CursorHandle) -> Option<CursorType> {
        Self::ALL.get(handle.ordinal() as usize).copied()
    }

    /// The platform cursor icon for this type.
    pub fn icon(self) -> CursorIcon {
        match self {
            CursorType::Arrow => CursorIcon::Default,
            CursorType::IBeam => CursorIcon::Text,
            CursorType::PointingHand => CursorIcon::Pointer,
            CursorType::ClosedHand => CursorIcon::Grabbing,
            CursorType::OpenHand => CursorIcon::Grab,
            CursorType::ResizeLeft => CursorIcon::WResize,
            CursorType::ResizeRight => CursorIcon::EResize,
            CursorType::ResizeLeftRight => CursorIcon::EwResize,
            CursorType::ResizeUp => CursorIcon::NResize,
            CursorType::ResizeDown => CursorIcon::SResize,
            CursorType::ResizeUpDown => CursorIcon::NsResize,
            CursorType::Crosshair => CursorIcon::Crosshair,
            CursorType::DisappearingItem => CursorIcon::NoDrop,
            CursorType::OperationNotAllowed => CursorIcon::NotAllowed,
            CursorType::DragLink => CursorIcon::Alias,
            CursorType::DragCopy => CursorIcon::Copy,
            CursorType::ContextualMenu => CursorIcon::ContextMenu,
            CursorType::IBeamVertical => CursorIcon::VerticalText,
        }
    }

    /// Check if this is one of the resize cursors.
    pub fn is_resize_cursor(self) -> bool {
        matches!(
            self,
            CursorType::ResizeLeft
                | CursorType::ResizeRight
                | CursorType::ResizeLeftRight
                | CursorType::ResizeUp
                | CursorType::ResizeDown
                | CursorType::ResizeUpDown
        )
    }
}

impl TryFrom<u32> for CursorType {
    type Error = BridgeError;

    fn try_from(ordinal: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .get(ordinal as usize)
            .copied()
            .ok_or(BridgeError::InvalidCursorType(ordinal))
    }
}

/// What the backend should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorAppearance {
    /// The active cursor.
    pub cursor: CursorType,
    /// Whether the cursor is shown at all.
    pub visible: bool,
}

impl Default for CursorAppearance {
    fn default() -> Self {
        Self {
            cursor: CursorType::Arrow,
            visible: true,
        }
    }
}

/// Process-wide cursor state.
#[derive(Debug, Clone)]
pub struct CursorController {
    current: CursorType,
    /// Cursors displaced by `set_cursor_type`, most recent last.
    stack: Vec<CursorType>,
    visible: bool,
    hidden_until_mouse_moves: bool,
}

impl CursorController {
    /// Create a controller showing the arrow cursor.
    pub const fn new() -> Self {
        Self {
            current: CursorType::Arrow,
            stack: Vec::new(),
            visible: true,
            hidden_until_mouse_moves: false,
        }
    }

    /// Hide the cursor. Returns `true` if the visibility changed.
    pub fn hide(&mut self) -> bool {
        std::mem::replace(&mut self.visible, false)
    }

    /// Show the cursor again. Returns `true` if the visibility changed.
    pub fn unhide(&mut self) -> bool {
        !std::mem::replace(&mut self.visible, true)
    }

    /// Whether [`hide`](Self::hide) is in effect.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Set or clear the hidden-until-mouse-moves latch.
    pub fn set_hidden_until_mouse_moves(&mut self, hidden: bool) {
        self.hidden_until_mouse_moves = hidden;
    }

    pub fn is_hidden_until_mouse_moves(&self) -> bool {
        self.hidden_until_mouse_moves
    }

    /// Report a mouse move. Clears the latch.
    ///
    /// Returns `true` if the latch was set, meaning the displayed cursor
    /// changed.
    pub fn notify_mouse_moved(&mut self) -> bool {
        std::mem::take(&mut self.hidden_until_mouse_moves)
    }

    /// Push the active cursor and make `cursor` active.
    pub fn set_cursor_type(&mut self, cursor: CursorType) {
        let previous = std::mem::replace(&mut self.current, cursor);
        self.stack.push(previous);
    }

    /// Restore the cursor displaced by the most recent
    /// [`set_cursor_type`](Self::set_cursor_type).
    ///
    /// With an empty stack this does nothing and returns `false`.
    pub fn pop(&mut self) -> bool {
        match self.stack.pop() {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }

    /// The active cursor.
    pub fn current(&self) -> CursorType {
        self.current
    }

    /// Number of cursors that [`pop`](Self::pop) can restore.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// What should be on screen right now.
    pub fn appearance(&self) -> CursorAppearance {
        CursorAppearance {
            cursor: self.current,
            visible: self.visible && !self.hidden_until_mouse_moves,
        }
    }

    /// Reset to the arrow cursor, visible, with an empty stack.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for CursorController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_cursor_type_default() {
        assert_eq!(CursorType::default(), CursorType::Arrow);
    }

    #[test]
    fn test_ordinals_match_positions() {
        for (index, cursor) in CursorType::ALL.iter().enumerate() {
            assert_eq!(cursor.ordinal() as usize, index);
            assert_eq!(CursorType::try_from(index as u32), Ok(*cursor));
        }
        assert_eq!(
            CursorType::try_from(18),
            Err(BridgeError::InvalidCursorType(18))
        );
    }

    #[test]
    fn test_icons_are_distinct() {
        let icons: HashSet<_> = CursorType::ALL.iter().map(|c| c.icon()).collect();
        assert_eq!(icons.len(), CursorType::ALL.len());
    }

    #[test]
    fn test_handle_maps_back_to_type() {
        for cursor in CursorType::ALL {
            assert_eq!(CursorType::from_handle(cursor.handle()), Some(cursor));
        }
        assert_ne!(CursorType::Arrow.handle(), CursorType::IBeam.handle());
    }

    #[test]
    fn test_is_resize_cursor() {
        assert!(CursorType::ResizeLeftRight.is_resize_cursor());
        assert!(CursorType::ResizeUp.is_resize_cursor());
        assert!(!CursorType::Crosshair.is_resize_cursor());
    }

    #[test]
    fn test_set_then_pop_restores_previous_for_all_pairs() {
        for before in CursorType::ALL {
            for after in CursorType::ALL {
                if before == after {
                    continue;
                }
                let mut cursor = CursorController::new();
                cursor.set_cursor_type(before);
                cursor.set_cursor_type(after);
                assert_eq!(cursor.current(), after);
                assert!(cursor.pop());
                assert_eq!(cursor.current(), before);
            }
        }
    }

    #[test]
    fn test_pop_underflow_is_noop() {
        let mut cursor = CursorController::new();
        assert!(!cursor.pop());
        assert_eq!(cursor.current(), CursorType::Arrow);

        cursor.set_cursor_type(CursorType::Crosshair);
        assert!(cursor.pop());
        assert!(!cursor.pop());
        assert_eq!(cursor.current(), CursorType::Arrow);
        assert_eq!(cursor.depth(), 0);
    }

    #[test]
    fn test_hide_is_idempotent() {
        let mut cursor = CursorController::new();
        assert!(cursor.hide());
        assert!(!cursor.hide());
        assert!(!cursor.is_visible());

        // A single unhide undoes any number of hides.
        assert!(cursor.unhide());
        assert!(cursor.is_visible());
        assert!(!cursor.unhide());
    }

    #[test]
    fn test_hidden_until_mouse_moves() {
        let mut cursor = CursorController::new();
        cursor.set_hidden_until_mouse_moves(true);
        assert!(cursor.is_visible());
        assert!(!cursor.appearance().visible);

        assert!(cursor.notify_mouse_moved());
        assert!(cursor.appearance().visible);
        assert!(!cursor.notify_mouse_moved());
    }

    #[test]
    fn test_latch_does_not_override_hide() {
        let mut cursor = CursorController::new();
        cursor.hide();
        cursor.set_hidden_until_mouse_moves(true);
        cursor.notify_mouse_moved();
        assert!(!cursor.appearance().visible);
    }

    #[test]
    fn test_reset() {
        let mut cursor = CursorController::new();
        cursor.set_cursor_type(CursorType::DragCopy);
        cursor.hide();
        cursor.reset();
        assert_eq!(cursor.appearance(), CursorAppearance::default());
        assert_eq!(cursor.depth(), 0);
    }
}
