//! Shared UI primitive library for the Cloud Files browser.
//!
//! The crate owns reusable Leptos primitives, a centralized icon API, and the stable
//! `data-ui-*` DOM contract consumed by the stylesheet. Feature crates compose these primitives
//! instead of emitting ad hoc control markup.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod icon;
mod primitives;

pub use icon::{Icon, IconName, IconSize};
pub use primitives::{
    Button, ButtonVariant, EmptyState, InlineAlert, MenuItem, MenuSeparator, MenuSurface,
    StatusBar, StatusBarItem, TextField, ToolBar,
};

/// Convenience imports for feature crates consuming the shared primitive set.
pub mod prelude {
    pub use crate::{
        Button, ButtonVariant, EmptyState, Icon, IconName, IconSize, InlineAlert, MenuItem,
        MenuSeparator, MenuSurface, StatusBar, StatusBarItem, TextField, ToolBar,
    };
}
