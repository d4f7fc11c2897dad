//! Shared overlay, data-display, control, and navigation primitives.

use leptos::ev::{KeyboardEvent, MouseEvent};
use leptos::*;

use crate::{Icon, IconName, IconSize};

mod controls;
mod data_display;
mod navigation;
mod overlays;

pub use controls::{Button, TextField};
pub use data_display::{EmptyState, InlineAlert, StatusBarItem};
pub use navigation::{StatusBar, ToolBar};
pub use overlays::{MenuItem, MenuSeparator, MenuSurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Shared button variants.
pub enum ButtonVariant {
    /// Standard action button.
    #[default]
    Standard,
    /// Primary emphasized action button.
    Primary,
    /// Quiet/menu style button.
    Quiet,
    /// Danger/destructive button.
    Danger,
}

impl ButtonVariant {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Primary => "primary",
            Self::Quiet => "quiet",
            Self::Danger => "danger",
        }
    }
}

/// Gap token shared by toolbars and status bars.
pub(crate) const TOOLBAR_GAP: &str = "sm";

pub(crate) fn merge_layout_class(base: &'static str, layout_class: Option<&'static str>) -> String {
    match layout_class {
        Some(layout_class) if !layout_class.is_empty() => format!("{base} {layout_class}"),
        _ => base.to_string(),
    }
}

pub(crate) fn bool_token(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_layout_class_skips_empty_extras() {
        assert_eq!(merge_layout_class("ui-button", None), "ui-button");
        assert_eq!(merge_layout_class("ui-button", Some("")), "ui-button");
        assert_eq!(
            merge_layout_class("ui-button", Some("signin-submit")),
            "ui-button signin-submit"
        );
    }

    #[test]
    fn tokens_match_stylesheet_contract() {
        assert_eq!(ButtonVariant::default().token(), "standard");
        assert_eq!(ButtonVariant::Danger.token(), "danger");
        assert_eq!(TOOLBAR_GAP, "sm");
        assert_eq!(bool_token(true), "true");
    }
}
