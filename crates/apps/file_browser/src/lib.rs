//! Remote file browser: tiles with click disambiguation, drag-and-drop moves, context menus,
//! uploads and downloads, and the parent view that drives them through
//! [`cloud_api::StorageApi`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod browser;
pub mod click;
pub mod context_menu;
pub mod drag;
pub mod state;
mod tile;

pub use browser::FileBrowser;
pub use click::{use_single_and_double_click, ClickDisambiguator, ClickHandlers};
pub use context_menu::{use_context_menu, ContextMenu, MenuPoint};
pub use drag::{accepts_drop, DragPayload, DragPayloadError, DropCandidate};
pub use state::{
    reduce_browser, BrowserAction, BrowserEffect, BrowserError, BrowserState, MenuTarget,
    NamePrompt,
};
pub use tile::{tile_class, FileTile};
