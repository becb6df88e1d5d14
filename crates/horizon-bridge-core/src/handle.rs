//! Ownership-erased handles.
//!
//! Every object the bridge hands to the host is addressed by a generational
//! key. A key never owns its referent: the registry (or the native toolkit
//! behind the backend) decides when the object dies, and a stale key simply
//! stops resolving.
//!
//! Keys cross the C boundary as pointer-sized integers. The raw value of a
//! live key is never zero, so `NULL` is free to mean "no object".

use std::fmt;
use std::num::NonZeroUsize;

use slotmap::{Key, KeyData};

slotmap::new_key_type! {
    /// Handle to a native window created by the bridge.
    pub struct WindowHandle;

    /// Handle to a window delegate (resize and close callback slots).
    pub struct WindowDelegateHandle;

    /// Handle to an application delegate (the ordered window collection).
    pub struct AppDelegateHandle;

    /// Handle to a native application object.
    pub struct AppHandle;
}

/// The kind of object a handle refers to, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    Window,
    WindowDelegate,
    ApplicationDelegate,
    Application,
    View,
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandleKind::Window => "window",
            HandleKind::WindowDelegate => "window delegate",
            HandleKind::ApplicationDelegate => "application delegate",
            HandleKind::Application => "application",
            HandleKind::View => "view",
        };
        f.write_str(name)
    }
}

/// Conversion between handles and the raw integers the host stores.
pub trait RawHandle: Sized {
    /// The raw value of this handle. Never zero for a live key.
    fn to_raw(self) -> u64;

    /// Rebuild a handle from a raw value. Returns `None` for zero.
    fn from_raw(raw: u64) -> Option<Self>;
}

impl<K: Key> RawHandle for K {
    fn to_raw(self) -> u64 {
        self.data().as_ffi()
    }

    fn from_raw(raw: u64) -> Option<Self> {
        if raw == 0 {
            None
        } else {
            Some(KeyData::from_ffi(raw).into())
        }
    }
}

/// Native content view of a window.
///
/// This is the toolkit's own object address (`NSView*` on macOS, the native
/// window handle elsewhere). It is derived from a window and stays valid
/// only while that window is open.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewHandle(NonZeroUsize);

impl ViewHandle {
    /// Wrap a native address. Returns `None` for zero.
    pub fn from_addr(addr: usize) -> Option<Self> {
        NonZeroUsize::new(addr).map(Self)
    }

    /// The native address.
    pub fn addr(self) -> usize {
        self.0.get()
    }
}

impl fmt::Debug for ViewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ViewHandle({:#x})", self.0)
    }
}

/// Opaque handle to a native cursor object.
///
/// Cursor objects are immutable and shared, so the handle is derived from
/// the cursor type alone: equal types always yield equal handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CursorHandle(NonZeroUsize);

impl CursorHandle {
    pub(crate) fn from_ordinal(ordinal: u32) -> Self {
        Self(NonZeroUsize::MIN.saturating_add(ordinal as usize))
    }

    /// Rebuild a handle from its raw value. Returns `None` for zero.
    pub fn from_addr(addr: usize) -> Option<Self> {
        NonZeroUsize::new(addr).map(Self)
    }

    /// The raw value handed to the host.
    pub fn addr(self) -> usize {
        self.0.get()
    }

    /// The ordinal of the cursor type this handle was derived from.
    pub fn ordinal(self) -> u32 {
        (self.0.get() - 1) as u32
    }
}
