//! Cursor exports.
//!
//! Cursor objects are returned as opaque handles, one per cursor type.

use std::ffi::c_void;
use std::ptr;

use horizon_bridge_core::CursorType;

use super::{bridge, report, with_bridge};

fn cursor_ptr(cursor: CursorType) -> *mut c_void {
    ptr::without_provenance_mut(cursor.handle().addr())
}

#[unsafe(export_name = "Hide")]
pub extern "C" fn hide_cursor() {
    if let Some(bridge) = bridge() {
        bridge.hide_cursor();
    }
}

#[unsafe(export_name = "Unhide")]
pub extern "C" fn unhide_cursor() {
    if let Some(bridge) = bridge() {
        bridge.unhide_cursor();
    }
}

/// Hide the cursor until the mouse next moves (`true`), or cancel that.
#[unsafe(export_name = "SetHiddenUntilMouseMoves")]
pub extern "C" fn set_hidden_until_mouse_moves(hidden: bool) {
    if let Some(bridge) = bridge() {
        bridge.set_cursor_hidden_until_mouse_moves(hidden);
    }
}

/// The cursor object for a cursor type ordinal. `NULL` for unknown ordinals.
#[unsafe(export_name = "GetCursorType")]
pub extern "C" fn get_cursor_type(cursor: u32) -> *mut c_void {
    report("GetCursorType", CursorType::try_from(cursor)).map_or(ptr::null_mut(), cursor_ptr)
}

/// Push the active cursor and display the given cursor type.
#[unsafe(export_name = "SetCursorType")]
pub extern "C" fn set_cursor_type(cursor: u32) {
    with_bridge("SetCursorType", |bridge| {
        bridge.set_cursor_type(CursorType::try_from(cursor)?);
        Ok(())
    });
}

/// Restore the cursor displaced by the last `SetCursorType`.
///
/// Returns `false`, leaving the cursor unchanged, if there is nothing to
/// restore.
#[unsafe(export_name = "Pop")]
pub extern "C" fn pop_cursor() -> bool {
    bridge().is_some_and(|bridge| bridge.pop_cursor())
}

#[unsafe(export_name = "GetCurrentCursor")]
pub extern "C" fn get_current_cursor() -> *mut c_void {
    bridge().map_or(ptr::null_mut(), |bridge| cursor_ptr(bridge.current_cursor()))
}
