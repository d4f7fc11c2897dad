//! Centralized inline-SVG icon set.

use leptos::*;

use crate::primitives::merge_layout_class;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Icons available to feature crates.
pub enum IconName {
    /// Closed folder.
    Folder,
    /// Folder with an up arrow, used for the parent entry.
    FolderUp,
    /// Folder with a plus sign.
    FolderAdd,
    /// Generic document.
    Document,
    /// Pencil.
    Rename,
    /// Trash can.
    Delete,
    /// Circular arrow.
    Refresh,
    /// Circled "i".
    Info,
    /// Tray with an up arrow.
    Upload,
    /// Tray with a down arrow.
    Download,
    /// Door with an arrow.
    SignOut,
    /// Cross.
    Dismiss,
}

impl IconName {
    /// Stable token used in `data-icon` attributes and tests.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::FolderUp => "folder-up",
            Self::FolderAdd => "folder-add",
            Self::Document => "document",
            Self::Rename => "rename",
            Self::Delete => "delete",
            Self::Refresh => "refresh",
            Self::Info => "info",
            Self::Upload => "upload",
            Self::Download => "download",
            Self::SignOut => "sign-out",
            Self::Dismiss => "dismiss",
        }
    }

    fn path(self) -> &'static str {
        match self {
            Self::Folder => "M3 6.5A2.5 2.5 0 0 1 5.5 4h3.6l2 2h7.4A2.5 2.5 0 0 1 21 8.5v9a2.5 2.5 0 0 1-2.5 2.5h-13A2.5 2.5 0 0 1 3 17.5z",
            Self::FolderUp => "M3 6.5A2.5 2.5 0 0 1 5.5 4h3.6l2 2h7.4A2.5 2.5 0 0 1 21 8.5v9a2.5 2.5 0 0 1-2.5 2.5h-13A2.5 2.5 0 0 1 3 17.5zM12 9l-3.5 3.5h2.5V17h2v-4.5h2.5z",
            Self::FolderAdd => "M3 6.5A2.5 2.5 0 0 1 5.5 4h3.6l2 2h7.4A2.5 2.5 0 0 1 21 8.5v9a2.5 2.5 0 0 1-2.5 2.5h-13A2.5 2.5 0 0 1 3 17.5zM11 10v2.5H8.5v2H11V17h2v-2.5h2.5v-2H13V10z",
            Self::Document => "M6.5 2h7l5.5 5.5v12A2.5 2.5 0 0 1 16.5 22h-10A2.5 2.5 0 0 1 4 19.5v-15A2.5 2.5 0 0 1 6.5 2zM13 3.5V8h4.5",
            Self::Rename => "M15.2 3.8a2.7 2.7 0 0 1 3.8 3.8L8.4 18.2 3 21l2.8-5.4z",
            Self::Delete => "M9 3h6l1 2h4v2H4V5h4zM6 8h12l-1 12.5a1.5 1.5 0 0 1-1.5 1.5h-7A1.5 1.5 0 0 1 7 20.5z",
            Self::Refresh => "M12 4a8 8 0 0 1 7.4 5H22l-3.5 4L15 9h2.2A6 6 0 1 0 18 14h2a8 8 0 1 1-8-10z",
            Self::Info => "M12 2a10 10 0 1 1 0 20 10 10 0 0 1 0-20zm-1 8v7h2v-7zm0-4v2h2V6z",
            Self::Upload => "M11 16V7.8L7.9 10.9 6.5 9.5 12 4l5.5 5.5-1.4 1.4L13 7.8V16zM4 15h2v3h12v-3h2v5H4z",
            Self::Download => "M11 4h2v8.2l3.1-3.1 1.4 1.4L12 16l-5.5-5.5 1.4-1.4 3.1 3.1zM4 15h2v3h12v-3h2v5H4z",
            Self::SignOut => "M4 3h9v2H6v14h7v2H4zm12.5 4.5L21 12l-4.5 4.5-1.4-1.4 2.1-2.1H9v-2h8.2l-2.1-2.1z",
            Self::Dismiss => "M5.6 4.2 12 10.6l6.4-6.4 1.4 1.4-6.4 6.4 6.4 6.4-1.4 1.4-6.4-6.4-6.4 6.4-1.4-1.4 6.4-6.4-6.4-6.4z",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Rendered icon sizes.
pub enum IconSize {
    /// Inline with dense text.
    Sm,
    /// Toolbar and menu size.
    #[default]
    Md,
    /// File tile size.
    Tile,
}

impl IconSize {
    /// Edge length in CSS pixels.
    pub const fn px(self) -> u32 {
        match self {
            Self::Sm => 16,
            Self::Md => 20,
            Self::Tile => 40,
        }
    }
}

fn icon_class(extra: Option<&'static str>) -> String {
    merge_layout_class("ui-icon", extra)
}

#[component]
/// Inline SVG icon. Decorative by default (`aria-hidden`).
///
/// `class` is appended to the base `ui-icon` class.
pub fn Icon(
    icon: IconName,
    #[prop(default = IconSize::Md)] size: IconSize,
    #[prop(optional)] class: Option<&'static str>,
) -> impl IntoView {
    let px = size.px();
    view! {
        <svg
            class=icon_class(class)
            data-icon=icon.token()
            width=px
            height=px
            viewBox="0 0 24 24"
            fill="currentColor"
            aria-hidden="true"
            focusable="false"
        >
            <path d=icon.path() />
        </svg>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_icons_render_at_forty_pixels() {
        assert_eq!(IconSize::Tile.px(), 40);
        assert_eq!(IconSize::default(), IconSize::Md);
    }

    #[test]
    fn extra_icon_class_keeps_base_class() {
        assert_eq!(icon_class(Some("file-icon")), "ui-icon file-icon");
        assert_eq!(icon_class(None), "ui-icon");
    }

    #[test]
    fn icon_tokens_are_unique() {
        let all = [
            IconName::Folder,
            IconName::FolderUp,
            IconName::FolderAdd,
            IconName::Document,
            IconName::Rename,
            IconName::Delete,
            IconName::Refresh,
            IconName::Info,
            IconName::Upload,
            IconName::Download,
            IconName::SignOut,
            IconName::Dismiss,
        ];
        let mut tokens: Vec<_> = all.iter().map(|icon| icon.token()).collect();
        tokens.sort_unstable();
        tokens.dedup();
        assert_eq!(tokens.len(), all.len());
    }
}
