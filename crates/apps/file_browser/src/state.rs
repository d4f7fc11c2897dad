//! Browser state, actions, side-effect intents, and the transition function.

use cloud_api::{
    join_path, normalize_path, parent_path, sort_entries, validate_entry_name, FileContent,
    FileRecord, MoveTarget, PARENT_ENTRY_NAME,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
/// What a context menu was opened on.
pub enum MenuTarget {
    /// A tile in the listing.
    Entry(String),
    /// Empty space around the tiles.
    Background,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Name prompt currently shown above the tiles.
pub enum NamePrompt {
    /// Renaming an existing entry.
    Rename {
        /// Entry being renamed.
        name: String,
    },
    /// Creating a directory in the current directory.
    NewFolder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Reactive state of one [`crate::FileBrowser`].
pub struct BrowserState {
    /// Normalized directory being shown.
    pub current_dir: String,
    /// Entries of `current_dir`, sorted, without the parent entry.
    pub entries: Vec<FileRecord>,
    /// A listing request is in flight.
    pub loading: bool,
    /// Selected entry name.
    pub selected: Option<String>,
    /// Entry being dragged. At most one at a time.
    pub dragged: Option<String>,
    /// What the open context menu applies to.
    pub menu_target: Option<MenuTarget>,
    /// Open name prompt.
    pub prompt: Option<NamePrompt>,
    /// Details panel visibility.
    pub show_details: bool,
    /// Error banner text.
    pub error: Option<String>,
}

impl Default for BrowserState {
    fn default() -> Self {
        Self {
            current_dir: "/".to_string(),
            entries: Vec::new(),
            loading: false,
            selected: None,
            dragged: None,
            menu_target: None,
            prompt: None,
            show_details: true,
            error: None,
        }
    }
}

impl BrowserState {
    /// Returns `true` when showing the storage root.
    pub fn at_root(&self) -> bool {
        cloud_api::is_root(&self.current_dir)
    }

    /// Tiles to render: the parent entry (below the root) followed by the listing.
    pub fn visible_entries(&self) -> Vec<FileRecord> {
        let mut visible = Vec::with_capacity(self.entries.len() + 1);
        if !self.at_root() {
            visible.push(FileRecord::parent_entry());
        }
        visible.extend(self.entries.iter().cloned());
        visible
    }

    /// Looks up a listed entry by name.
    pub fn entry(&self, name: &str) -> Option<&FileRecord> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Selected entry record.
    pub fn selected_entry(&self) -> Option<&FileRecord> {
        self.selected.as_deref().and_then(|name| self.entry(name))
    }

    /// Full path of a listed entry.
    pub fn path_of(&self, name: &str) -> String {
        join_path(&self.current_dir, name)
    }

    fn require_entry(&self, name: &str) -> Result<&FileRecord, BrowserError> {
        self.entry(name)
            .ok_or_else(|| BrowserError::EntryNotFound(name.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_browser`].
pub enum BrowserAction {
    /// Show another directory.
    Navigate {
        /// Directory path.
        path: String,
    },
    /// Reload the current directory.
    Refresh,
    /// A listing request finished.
    ListingLoaded {
        /// Directory the listing belongs to.
        path: String,
        /// Listed entries in server order.
        entries: Vec<FileRecord>,
    },
    /// A listing request failed.
    ListingFailed {
        /// Directory that failed to load.
        path: String,
        /// Error text for the banner.
        message: String,
    },
    /// Select a tile.
    Select {
        /// Entry name.
        name: String,
    },
    /// Drop the selection.
    ClearSelection,
    /// A tile started dragging.
    StartDrag {
        /// Entry name.
        name: String,
    },
    /// The drag ended without a drop on a tile.
    EndDrag,
    /// Entries were dropped onto a tile.
    Drop {
        /// Dropped entry names.
        names: Vec<String>,
        /// Name of the tile receiving the drop.
        target: String,
    },
    /// A context menu opened.
    OpenContextMenu {
        /// What it was opened on.
        target: MenuTarget,
    },
    /// The context menu closed.
    CloseContextMenu,
    /// Open a tile: navigate into directories, show details for files.
    Open {
        /// Entry name, or the parent entry name.
        name: String,
    },
    /// Start renaming an entry.
    BeginRename {
        /// Entry name.
        name: String,
    },
    /// Start naming a new directory.
    BeginCreateDirectory,
    /// Close the name prompt without changes.
    CancelPrompt,
    /// Submit the name prompt.
    CommitPrompt {
        /// Text entered by the user.
        value: String,
    },
    /// Delete an entry.
    Delete {
        /// Entry name.
        name: String,
    },
    /// Save a listed file locally.
    Download {
        /// Entry name.
        name: String,
    },
    /// Store a picked file in the current directory.
    Upload {
        /// File name and bytes.
        file: FileContent,
    },
    /// The server refused to renew the session.
    SessionExpired,
    /// Show or hide the details panel.
    ToggleDetails,
    /// A side effect failed.
    OperationFailed {
        /// Error text for the banner.
        message: String,
    },
    /// Hide the error banner.
    DismissError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_browser`] and executed by the view.
pub enum BrowserEffect {
    /// Fetch a directory listing.
    LoadListing {
        /// Directory path.
        path: String,
    },
    /// Move entries of `dir`.
    MoveEntries {
        /// Directory holding the entries.
        dir: String,
        /// Entry names.
        names: Vec<String>,
        /// Destination.
        target: MoveTarget,
    },
    /// Rename an entry.
    Rename {
        /// Current path.
        path: String,
        /// Validated new name.
        new_name: String,
    },
    /// Delete an entry.
    Delete {
        /// Path to delete.
        path: String,
    },
    /// Create a directory.
    CreateDirectory {
        /// Parent directory.
        dir: String,
        /// Validated name.
        name: String,
    },
    /// Fetch a file and hand it to the browser as a download.
    Download {
        /// File path.
        path: String,
    },
    /// Upload a file into `dir`.
    Upload {
        /// Target directory.
        dir: String,
        /// File name and bytes.
        file: FileContent,
    },
    /// Tell the host the session is over.
    EndSession,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors returned by [`reduce_browser`].
pub enum BrowserError {
    /// The action named an entry that is not listed.
    #[error("no entry named `{0}` in this directory")]
    EntryNotFound(String),
    /// A name prompt was submitted with an unusable name.
    #[error("{0}")]
    InvalidName(String),
    /// A directory was asked for where only files apply.
    #[error("`{0}` is a folder, not a file")]
    NotAFile(String),
    /// The picked file has no content.
    #[error("`{0}` is empty and cannot be uploaded")]
    EmptyFile(String),
}

/// Applies a [`BrowserAction`] and collects the resulting side effects.
///
/// # Errors
///
/// Returns [`BrowserError::EntryNotFound`] for actions naming an unlisted entry,
/// [`BrowserError::InvalidName`] when a submitted name fails validation, and
/// [`BrowserError::NotAFile`] or [`BrowserError::EmptyFile`] for unusable transfers. The state is
/// left unchanged on error.
pub fn reduce_browser(
    state: &mut BrowserState,
    action: BrowserAction,
) -> Result<Vec<BrowserEffect>, BrowserError> {
    let mut effects = Vec::new();
    match action {
        BrowserAction::Navigate { path } => {
            let path = normalize_path(&path);
            state.current_dir = path.clone();
            state.entries.clear();
            state.selected = None;
            state.dragged = None;
            state.menu_target = None;
            state.prompt = None;
            state.loading = true;
            effects.push(BrowserEffect::LoadListing { path });
        }
        BrowserAction::Refresh => {
            state.loading = true;
            effects.push(BrowserEffect::LoadListing {
                path: state.current_dir.clone(),
            });
        }
        BrowserAction::ListingLoaded { path, mut entries } => {
            if normalize_path(&path) != state.current_dir {
                return Ok(effects);
            }
            entries.retain(|entry| !entry.is_parent_entry());
            sort_entries(&mut entries);
            state.entries = entries;
            state.loading = false;
            if state.selected_entry().is_none() {
                state.selected = None;
            }
        }
        BrowserAction::ListingFailed { path, message } => {
            if normalize_path(&path) != state.current_dir {
                return Ok(effects);
            }
            state.loading = false;
            state.error = Some(message);
        }
        BrowserAction::Select { name } => {
            state.require_entry(&name)?;
            state.selected = Some(name);
        }
        BrowserAction::ClearSelection => {
            state.selected = None;
        }
        BrowserAction::StartDrag { name } => {
            state.require_entry(&name)?;
            state.selected = Some(name.clone());
            state.dragged = Some(name);
            state.menu_target = None;
        }
        BrowserAction::EndDrag => {
            state.dragged = None;
        }
        BrowserAction::Drop { names, target } => {
            let names: Vec<String> = names.into_iter().filter(|name| *name != target).collect();
            if names.is_empty() {
                state.dragged = None;
                return Ok(effects);
            }
            for name in &names {
                state.require_entry(name)?;
            }
            let target = if target == PARENT_ENTRY_NAME {
                if state.at_root() {
                    return Err(BrowserError::EntryNotFound(target));
                }
                MoveTarget::Parent
            } else {
                match state.entry(&target) {
                    Some(entry) if entry.kind.is_directory() => MoveTarget::Directory(target),
                    _ => return Err(BrowserError::EntryNotFound(target)),
                }
            };
            state.dragged = None;
            if state.selected.as_ref().is_some_and(|name| names.contains(name)) {
                state.selected = None;
            }
            effects.push(BrowserEffect::MoveEntries {
                dir: state.current_dir.clone(),
                names,
                target,
            });
        }
        BrowserAction::OpenContextMenu { target } => {
            if let MenuTarget::Entry(name) = &target {
                state.require_entry(name)?;
                state.selected = Some(name.clone());
            }
            state.menu_target = Some(target);
        }
        BrowserAction::CloseContextMenu => {
            state.menu_target = None;
        }
        BrowserAction::Open { name } => {
            if name == PARENT_ENTRY_NAME {
                if state.at_root() {
                    return Ok(effects);
                }
                let parent = parent_path(&state.current_dir);
                return reduce_browser(state, BrowserAction::Navigate { path: parent });
            }
            let is_directory = state.require_entry(&name)?.kind.is_directory();
            state.menu_target = None;
            if is_directory {
                let path = state.path_of(&name);
                return reduce_browser(state, BrowserAction::Navigate { path });
            }
            state.selected = Some(name);
            state.show_details = true;
        }
        BrowserAction::BeginRename { name } => {
            state.require_entry(&name)?;
            state.menu_target = None;
            state.selected = Some(name.clone());
            state.prompt = Some(NamePrompt::Rename { name });
        }
        BrowserAction::BeginCreateDirectory => {
            state.menu_target = None;
            state.prompt = Some(NamePrompt::NewFolder);
        }
        BrowserAction::CancelPrompt => {
            state.prompt = None;
        }
        BrowserAction::CommitPrompt { value } => {
            let Some(prompt) = state.prompt.clone() else {
                return Ok(effects);
            };
            let name =
                validate_entry_name(&value).map_err(|err| BrowserError::InvalidName(err.to_string()))?;
            match prompt {
                NamePrompt::Rename { name: old_name } => {
                    state.require_entry(&old_name)?;
                    if name != old_name {
                        effects.push(BrowserEffect::Rename {
                            path: state.path_of(&old_name),
                            new_name: name.clone(),
                        });
                        state.selected = Some(name);
                    }
                }
                NamePrompt::NewFolder => {
                    if state.entry(&name).is_some() {
                        return Err(BrowserError::InvalidName(format!(
                            "`{name}` already exists"
                        )));
                    }
                    effects.push(BrowserEffect::CreateDirectory {
                        dir: state.current_dir.clone(),
                        name,
                    });
                }
            }
            state.prompt = None;
        }
        BrowserAction::Delete { name } => {
            state.require_entry(&name)?;
            state.menu_target = None;
            if state.selected.as_deref() == Some(name.as_str()) {
                state.selected = None;
            }
            effects.push(BrowserEffect::Delete {
                path: state.path_of(&name),
            });
        }
        BrowserAction::Download { name } => {
            if state.require_entry(&name)?.kind.is_directory() {
                return Err(BrowserError::NotAFile(name));
            }
            state.menu_target = None;
            effects.push(BrowserEffect::Download {
                path: state.path_of(&name),
            });
        }
        BrowserAction::Upload { file } => {
            if file.is_empty() {
                return Err(BrowserError::EmptyFile(file.file_name));
            }
            let name = validate_entry_name(&file.file_name)
                .map_err(|err| BrowserError::InvalidName(err.to_string()))?;
            if state.entry(&name).is_some_and(|entry| entry.kind.is_directory()) {
                return Err(BrowserError::InvalidName(format!(
                    "a folder named `{name}` already exists"
                )));
            }
            effects.push(BrowserEffect::Upload {
                dir: state.current_dir.clone(),
                file,
            });
        }
        BrowserAction::SessionExpired => {
            *state = BrowserState {
                current_dir: state.current_dir.clone(),
                show_details: state.show_details,
                error: Some("Your session has expired. Sign in again.".to_string()),
                ..BrowserState::default()
            };
            effects.push(BrowserEffect::EndSession);
        }
        BrowserAction::ToggleDetails => {
            state.show_details = !state.show_details;
        }
        BrowserAction::OperationFailed { message } => {
            state.loading = false;
            state.error = Some(message);
        }
        BrowserAction::DismissError => {
            state.error = None;
        }
    }
    Ok(effects)
}
