//! Context-menu open state and anchor point.

use leptos::ev::MouseEvent;
use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Viewport point the menu is anchored at.
pub struct MenuPoint {
    /// Client x coordinate.
    pub x: i32,
    /// Client y coordinate.
    pub y: i32,
}

impl MenuPoint {
    /// Inline style positioning a fixed menu surface at this point.
    pub fn style(self) -> String {
        format!("position:fixed;left:{}px;top:{}px;", self.x, self.y)
    }
}

#[derive(Clone, Copy)]
/// Signals returned by [`use_context_menu`].
pub struct ContextMenu {
    /// Whether the menu is showing.
    pub clicked: RwSignal<bool>,
    /// Where the menu was requested.
    pub point: RwSignal<MenuPoint>,
}

impl ContextMenu {
    /// Suppresses the native menu and opens this one at the pointer.
    pub fn open_at(&self, ev: &MouseEvent) {
        ev.prevent_default();
        self.point.set(MenuPoint {
            x: ev.client_x(),
            y: ev.client_y(),
        });
        self.clicked.set(true);
    }

    /// Hides the menu.
    pub fn close(&self) {
        if self.clicked.get_untracked() {
            self.clicked.set(false);
        }
    }
}

/// Creates menu state that any click anywhere in the window closes.
pub fn use_context_menu() -> ContextMenu {
    let menu = ContextMenu {
        clicked: create_rw_signal(false),
        point: create_rw_signal(MenuPoint::default()),
    };

    let close_listener = window_event_listener(ev::click, move |_| menu.close());
    on_cleanup(move || close_listener.remove());

    menu
}
