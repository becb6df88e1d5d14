//! End-to-end lifecycle tests over the headless backend.

use std::sync::Arc;

use horizon_bridge_core::{
    Bridge, BridgeConfig, BridgeError, CursorType, HandleKind, HeadlessBackend, NativeEvent,
    Rectangle, SizeF, WindowConfig, WindowState, WindowStyle,
};
use parking_lot::Mutex;

fn setup() -> (Arc<HeadlessBackend>, Arc<Bridge>) {
    let backend = Arc::new(HeadlessBackend::new());
    let bridge = Arc::new(Bridge::new(backend.clone(), BridgeConfig::default()));
    (backend, bridge)
}

fn recorder<T: Send + 'static>() -> (Arc<Mutex<Vec<T>>>, Arc<Mutex<Vec<T>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    (log.clone(), log)
}

// =========================================================================
// Window manager
// =========================================================================

#[test]
fn test_new_window_size_matches_rect() {
    let (_, bridge) = setup();
    for (width, height) in [(800, 600), (1, 1), (3840, 2160), (333, 777)] {
        let config = WindowConfig::new("sized").with_rect(Rectangle::new(10, 20, width, height));
        let window = bridge.create_window(&config).unwrap();

        let size = bridge.view_size(window).unwrap();
        assert!(size.approx_eq(&SizeF::new(width as f32, height as f32)));
    }
}

#[test]
fn test_new_window_is_hidden_until_shown() {
    let (backend, bridge) = setup();
    let window = bridge.create_window(&WindowConfig::new("hidden")).unwrap();
    assert!(!backend.window(window).unwrap().visible);

    bridge.show_window(window).unwrap();
    let native = backend.window(window).unwrap();
    assert!(native.visible);
    assert!(native.key);
}

#[test]
fn test_style_and_title_pass_through() {
    let (backend, bridge) = setup();
    let style = WindowStyle::TITLED | WindowStyle::FULL_SIZE_CONTENT_VIEW;
    let window = bridge
        .create_window(&WindowConfig::new("Styled").with_style(style))
        .unwrap();

    let native = backend.window(window).unwrap();
    assert_eq!(native.title, "Styled");
    assert_eq!(native.style, style);
    assert_eq!(bridge.window_config(window).unwrap().style(), style);
}

#[test]
fn test_allocation_failure_is_not_retried() {
    let (backend, bridge) = setup();
    backend.fail_next_allocations(1);

    assert!(matches!(
        bridge.create_window(&WindowConfig::default()),
        Err(BridgeError::AllocationFailed(_))
    ));
    assert_eq!(backend.window_count(), 0);
}

#[test]
fn test_view_handles_are_per_window() {
    let (_, bridge) = setup();
    let a = bridge.create_window(&WindowConfig::new("a")).unwrap();
    let b = bridge.create_window(&WindowConfig::new("b")).unwrap();
    assert_ne!(bridge.view(a).unwrap(), bridge.view(b).unwrap());
    assert_eq!(bridge.view(a).unwrap(), bridge.view(a).unwrap());
}

#[test]
fn test_make_view_surface_compatible_twice() {
    let (backend, bridge) = setup();
    let window = bridge.create_window(&WindowConfig::default()).unwrap();
    let view = bridge.view(window).unwrap();

    assert_eq!(bridge.make_view_surface_compatible(view), Ok(true));
    assert_eq!(bridge.make_view_surface_compatible(view), Ok(false));
    assert!(backend.window(window).unwrap().surface_compatible);
}

// =========================================================================
// Delegates
// =========================================================================

#[test]
fn test_only_latest_delegate_fires() {
    let (backend, bridge) = setup();
    let window = bridge.create_window(&WindowConfig::new("w")).unwrap();
    let (log, seen) = recorder::<&'static str>();

    let first = bridge.create_window_delegate();
    let l = log.clone();
    bridge
        .set_did_resize_callback(first, move |_| l.lock().push("first"))
        .unwrap();

    let second = bridge.create_window_delegate();
    let l = log.clone();
    bridge
        .set_did_resize_callback(second, move |_| l.lock().push("second"))
        .unwrap();

    assert_eq!(bridge.set_window_delegate(window, first), Ok(None));
    assert_eq!(bridge.set_window_delegate(window, second), Ok(Some(first)));

    let app = bridge
        .create_application(bridge.create_application_delegate())
        .unwrap();
    backend.post_event(NativeEvent::Resized {
        window,
        size: SizeF::new(10.0, 10.0),
    });
    bridge.run_application(app).unwrap();

    assert_eq!(*seen.lock(), vec!["second"]);
}

#[test]
fn test_reattaching_same_delegate_keeps_callbacks() {
    let (backend, bridge) = setup();
    let window = bridge.create_window(&WindowConfig::new("w")).unwrap();
    let delegate = bridge.create_window_delegate();
    let (log, seen) = recorder::<SizeF>();

    bridge
        .set_did_resize_callback(delegate, move |size| log.lock().push(size))
        .unwrap();
    bridge.set_window_delegate(window, delegate).unwrap();
    assert_eq!(bridge.set_window_delegate(window, delegate), Ok(Some(delegate)));

    let app = bridge
        .create_application(bridge.create_application_delegate())
        .unwrap();
    backend.post_event(NativeEvent::Resized {
        window,
        size: SizeF::new(5.0, 6.0),
    });
    bridge.run_application(app).unwrap();

    assert_eq!(*seen.lock(), vec![SizeF::new(5.0, 6.0)]);
}

#[test]
fn test_window_without_delegate_is_silent() {
    let (backend, bridge) = setup();
    let window = bridge.create_window(&WindowConfig::new("w")).unwrap();
    let delegate = bridge.create_window_delegate();
    let (log, seen) = recorder::<SizeF>();
    bridge
        .set_did_resize_callback(delegate, move |size| log.lock().push(size))
        .unwrap();

    let app = bridge
        .create_application(bridge.create_application_delegate())
        .unwrap();
    backend.post_event(NativeEvent::Resized {
        window,
        size: SizeF::new(5.0, 6.0),
    });
    bridge.run_application(app).unwrap();

    assert!(seen.lock().is_empty());
    assert_eq!(bridge.view_size(window), Ok(SizeF::new(5.0, 6.0)));
}

#[test]
fn test_will_resize_sees_current_and_proposed() {
    let (backend, bridge) = setup();
    let window = bridge
        .create_window(&WindowConfig::new("w").with_size(800, 600))
        .unwrap();
    let delegate = bridge.create_window_delegate();
    bridge.set_window_delegate(window, delegate).unwrap();

    let (log, seen) = recorder::<(SizeF, SizeF, SizeF)>();
    let weak = Arc::downgrade(&bridge);
    bridge
        .set_will_resize_callback(delegate, move |current, proposed| {
            // Not yet committed: the view still reports the old size.
            let live = weak
                .upgrade()
                .and_then(|bridge| bridge.view_size(window).ok())
                .unwrap_or(SizeF::ZERO);
            log.lock().push((current, proposed, live));
        })
        .unwrap();

    let app = bridge
        .create_application(bridge.create_application_delegate())
        .unwrap();
    backend.post_event(NativeEvent::Resized {
        window,
        size: SizeF::new(400.0, 300.0),
    });
    bridge.run_application(app).unwrap();

    let old = SizeF::new(800.0, 600.0);
    assert_eq!(*seen.lock(), vec![(old, SizeF::new(400.0, 300.0), old)]);
}

#[test]
fn test_replacing_callback_keeps_single_slot() {
    let (_, bridge) = setup();
    let delegate = bridge.create_window_delegate();
    assert_eq!(bridge.set_will_close_callback(delegate, || {}), Ok(false));
    assert_eq!(bridge.set_will_close_callback(delegate, || {}), Ok(true));
    assert_eq!(bridge.clear_will_close_callback(delegate), Ok(true));
    assert_eq!(bridge.clear_will_close_callback(delegate), Ok(false));
}

// =========================================================================
// Application
// =========================================================================

#[test]
fn test_app_delegate_preserves_call_order() {
    let (_, bridge) = setup();
    let delegate = bridge.create_application_delegate();
    let windows: Vec<_> = (0..6)
        .map(|i| {
            bridge
                .create_window(&WindowConfig::new(format!("w{i}")))
                .unwrap()
        })
        .collect();

    for window in windows.iter().rev() {
        bridge.add_window_to_app_delegate(delegate, *window).unwrap();
    }

    let expected: Vec<_> = windows.iter().rev().copied().collect();
    assert_eq!(bridge.app_delegate_windows(delegate).unwrap(), expected);
}

#[test]
fn test_delegate_of_app() {
    let (_, bridge) = setup();
    let delegate = bridge.create_application_delegate();
    let app = bridge.create_application(delegate).unwrap();
    assert_eq!(bridge.delegate_of_app(app), Ok(delegate));
}

#[test]
fn test_end_to_end_resize() {
    let (backend, bridge) = setup();

    let window = bridge
        .create_window(&WindowConfig::from_raw(
            Rectangle::new(0, 0, 800, 600),
            WindowStyle::DEFAULT.bits(),
            "Test",
        ))
        .unwrap();
    let delegate = bridge.create_window_delegate();
    bridge.set_window_delegate(window, delegate).unwrap();

    let (log, seen) = recorder::<SizeF>();
    bridge
        .set_did_resize_callback(delegate, move |size| log.lock().push(size))
        .unwrap();

    let app_delegate = bridge.create_application_delegate();
    bridge.add_window_to_app_delegate(app_delegate, window).unwrap();
    let app = bridge.create_application(app_delegate).unwrap();
    bridge.show_window(window).unwrap();

    backend.post_event(NativeEvent::Resized {
        window,
        size: SizeF::new(1024.0, 768.0),
    });
    assert_eq!(bridge.run_application(app), Ok(0));

    assert_eq!(*seen.lock(), vec![SizeF::new(1024.0, 768.0)]);
    assert_eq!(bridge.view_size(window), Ok(SizeF::new(1024.0, 768.0)));
    assert_eq!(bridge.window_state(window), Ok(WindowState::Shown));
}

#[test]
fn test_closing_last_window_terminates_once() {
    let (backend, bridge) = setup();
    let a = bridge.create_window(&WindowConfig::new("a")).unwrap();
    let b = bridge.create_window(&WindowConfig::new("b")).unwrap();
    let app = bridge
        .create_application(bridge.create_application_delegate())
        .unwrap();

    let (log, seen) = recorder::<&'static str>();
    let l = log.clone();
    bridge.set_application_closed_callback(move || l.lock().push("app closed"));

    let delegate = bridge.create_window_delegate();
    bridge.set_window_delegate(a, delegate).unwrap();
    bridge
        .set_will_close_callback(delegate, move || log.lock().push("a will close"))
        .unwrap();

    backend.post_event(NativeEvent::CloseRequested { window: a });
    backend.post_event(NativeEvent::CloseRequested { window: b });
    backend.post_event(NativeEvent::MouseMoved);

    assert_eq!(bridge.run_application(app), Ok(0));
    assert_eq!(*seen.lock(), vec!["a will close", "app closed"]);
    assert_eq!(backend.pending_events(), 1);
    assert_eq!(bridge.open_window_count(), 0);
}

#[test]
fn test_last_window_close_can_keep_running() {
    let backend = Arc::new(HeadlessBackend::new());
    let bridge = Bridge::new(
        backend.clone(),
        BridgeConfig::new().with_terminate_after_last_window_closed(false),
    );
    let window = bridge.create_window(&WindowConfig::new("a")).unwrap();
    let app = bridge
        .create_application(bridge.create_application_delegate())
        .unwrap();

    backend.post_event(NativeEvent::CloseRequested { window });
    backend.post_event(NativeEvent::MouseMoved);
    bridge.run_application(app).unwrap();

    // The loop kept running until the queue drained.
    assert_eq!(backend.pending_events(), 0);
}

#[test]
fn test_quit_application_from_callback() {
    let (backend, bridge) = setup();
    let window = bridge.create_window(&WindowConfig::new("a")).unwrap();
    let delegate = bridge.create_window_delegate();
    bridge.set_window_delegate(window, delegate).unwrap();

    let weak = Arc::downgrade(&bridge);
    bridge
        .set_did_resize_callback(delegate, move |_| {
            if let Some(bridge) = weak.upgrade() {
                bridge.quit_application();
            }
        })
        .unwrap();

    let app = bridge
        .create_application(bridge.create_application_delegate())
        .unwrap();
    backend.post_event(NativeEvent::Resized {
        window,
        size: SizeF::new(1.0, 1.0),
    });
    backend.post_event(NativeEvent::MouseMoved);

    assert_eq!(bridge.run_application(app), Ok(0));
    assert_eq!(backend.pending_events(), 1);
    assert_eq!(bridge.window_state(window), Ok(WindowState::Created));
}

#[test]
fn test_closed_window_rejects_operations() {
    let (backend, bridge) = setup();
    let window = bridge.create_window(&WindowConfig::new("a")).unwrap();
    let app = bridge
        .create_application(bridge.create_application_delegate())
        .unwrap();
    backend.post_event(NativeEvent::CloseRequested { window });
    bridge.run_application(app).unwrap();

    assert_eq!(bridge.window_state(window), Ok(WindowState::Closed));
    assert_eq!(bridge.view(window), Err(BridgeError::WindowClosed));
    assert_eq!(bridge.view_size(window), Err(BridgeError::WindowClosed));
    assert_eq!(bridge.show_window(window), Err(BridgeError::WindowClosed));

    let delegate = bridge.create_window_delegate();
    assert_eq!(
        bridge.set_window_delegate(window, delegate),
        Err(BridgeError::WindowClosed)
    );
}

#[test]
fn test_stale_handles_are_invalid() {
    let (_, bridge) = setup();
    let other = Bridge::new(Arc::new(HeadlessBackend::new()), BridgeConfig::default());

    // Handles minted by another bridge do not resolve in an empty registry.
    let foreign_app = other
        .create_application(other.create_application_delegate())
        .unwrap();
    let foreign_delegate = other.create_window_delegate();

    assert_eq!(
        bridge.delegate_of_app(foreign_app),
        Err(BridgeError::invalid(HandleKind::Application))
    );
    assert_eq!(
        bridge.set_did_resize_callback(foreign_delegate, |_| {}),
        Err(BridgeError::invalid(HandleKind::WindowDelegate))
    );
}

// =========================================================================
// Cursor
// =========================================================================

#[test]
fn test_set_then_pop_for_every_pair() {
    let (_, bridge) = setup();
    for from in CursorType::ALL {
        for to in CursorType::ALL {
            if from == to {
                continue;
            }
            bridge.reset_cursor();
            bridge.set_cursor_type(from);
            bridge.set_cursor_type(to);
            assert_eq!(bridge.current_cursor(), to);
            assert!(bridge.pop_cursor());
            assert_eq!(bridge.current_cursor(), from);
        }
    }
}

#[test]
fn test_pop_underflow_is_noop() {
    let (backend, bridge) = setup();
    bridge.set_cursor_type(CursorType::OpenHand);
    bridge.pop_cursor();
    let updates = backend.cursor_updates();

    assert!(!bridge.pop_cursor());
    assert_eq!(bridge.current_cursor(), CursorType::Arrow);
    assert_eq!(bridge.cursor_depth(), 0);
    assert_eq!(backend.cursor_updates(), updates);
}

#[test]
fn test_hide_unhide() {
    let (backend, bridge) = setup();
    assert!(bridge.hide_cursor());
    assert!(!bridge.hide_cursor());
    assert!(!bridge.is_cursor_visible());
    assert!(!backend.applied_cursor().unwrap().visible);

    assert!(bridge.unhide_cursor());
    assert!(bridge.is_cursor_visible());
    assert!(backend.applied_cursor().unwrap().visible);
}

#[test]
fn test_hidden_until_mouse_moves() {
    let (backend, bridge) = setup();
    let app = bridge
        .create_application(bridge.create_application_delegate())
        .unwrap();

    bridge.set_cursor_hidden_until_mouse_moves(true);
    assert!(!bridge.is_cursor_visible());

    backend.post_event(NativeEvent::MouseMoved);
    bridge.run_application(app).unwrap();

    assert!(bridge.is_cursor_visible());
    assert!(backend.applied_cursor().unwrap().visible);
}

#[test]
fn test_cursor_change_from_callback() {
    let (backend, bridge) = setup();
    let window = bridge.create_window(&WindowConfig::new("a")).unwrap();
    let delegate = bridge.create_window_delegate();
    bridge.set_window_delegate(window, delegate).unwrap();

    let weak = Arc::downgrade(&bridge);
    bridge
        .set_will_resize_callback(delegate, move |_, _| {
            if let Some(bridge) = weak.upgrade() {
                bridge.set_cursor_type(CursorType::ResizeLeftRight);
            }
        })
        .unwrap();
    let weak = Arc::downgrade(&bridge);
    bridge
        .set_did_resize_callback(delegate, move |_| {
            if let Some(bridge) = weak.upgrade() {
                bridge.pop_cursor();
            }
        })
        .unwrap();

    let app = bridge
        .create_application(bridge.create_application_delegate())
        .unwrap();
    backend.post_event(NativeEvent::Resized {
        window,
        size: SizeF::new(2.0, 2.0),
    });
    bridge.run_application(app).unwrap();

    assert_eq!(bridge.current_cursor(), CursorType::Arrow);
    assert_eq!(backend.cursor_updates(), 2);
}
