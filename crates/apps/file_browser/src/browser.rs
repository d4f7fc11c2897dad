//! Parent view composing tiles, menus, prompts, and the details panel over [`StorageApi`].

use std::time::Duration;

use cloud_api::{ApiError, FileRecord, StorageApi, PARENT_ENTRY_NAME};
use cloud_api_web::{pick_files, save_download};
use leptos::ev::{DragEvent, KeyboardEvent, MouseEvent};
use leptos::*;
use system_ui::prelude::*;

use crate::context_menu::{use_context_menu, ContextMenu};
use crate::drag::DragPayload;
use crate::state::{
    reduce_browser, BrowserAction, BrowserEffect, BrowserState, MenuTarget, NamePrompt,
};
use crate::tile::FileTile;

#[derive(Clone, Copy)]
struct BrowserContext {
    state: RwSignal<BrowserState>,
    dispatch: Callback<BrowserAction>,
    menu: ContextMenu,
    click_delay: Duration,
}

/// Action for a failed side effect.
fn failure_action(label: &str, err: &ApiError) -> BrowserAction {
    if err.is_session_expired() {
        BrowserAction::SessionExpired
    } else {
        BrowserAction::OperationFailed {
            message: format!("Could not {label}: {err}"),
        }
    }
}

/// A grid click clears the selection only when it lands on the grid itself.
fn background_click_action(on_background: bool) -> Option<BrowserAction> {
    on_background.then_some(BrowserAction::ClearSelection)
}

fn run_effect(
    storage: StorageApi,
    dispatch: Callback<BrowserAction>,
    on_session_expired: Option<Callback<()>>,
    effect: BrowserEffect,
) {
    if let BrowserEffect::EndSession = effect {
        // Deferred: the host may unmount this view.
        if let Some(on_session_expired) = on_session_expired {
            spawn_local(async move { on_session_expired.call(()) });
        }
        return;
    }

    spawn_local(async move {
        let (label, result) = match effect {
            BrowserEffect::LoadListing { path } => {
                let action = match storage.list(&path).await {
                    Ok(entries) => BrowserAction::ListingLoaded { path, entries },
                    Err(err) if err.is_session_expired() => BrowserAction::SessionExpired,
                    Err(err) => {
                        logging::warn!("listing `{path}` failed: {err}");
                        BrowserAction::ListingFailed {
                            path,
                            message: err.to_string(),
                        }
                    }
                };
                dispatch.call(action);
                return;
            }
            BrowserEffect::Download { path } => {
                let saved = storage
                    .download(&path)
                    .await
                    .and_then(|content| save_download(&content));
                if let Err(err) = saved {
                    logging::warn!("download `{path}` failed: {err}");
                    dispatch.call(failure_action("download", &err));
                }
                return;
            }
            BrowserEffect::MoveEntries { dir, names, target } => (
                "move",
                storage.move_entries(&dir, &names, &target).await,
            ),
            BrowserEffect::Rename { path, new_name } => {
                ("rename", storage.rename(&path, &new_name).await.map(|_| ()))
            }
            BrowserEffect::Delete { path } => ("delete", storage.delete(&path).await),
            BrowserEffect::CreateDirectory { dir, name } => (
                "create directory",
                storage.create_directory(&dir, &name).await.map(|_| ()),
            ),
            BrowserEffect::Upload { dir, file } => {
                ("upload", storage.upload(&dir, file).await.map(|_| ()))
            }
            BrowserEffect::EndSession => return,
        };

        if let Err(err) = result {
            logging::warn!("{label} failed: {err}");
            let action = failure_action(label, &err);
            let expired = action == BrowserAction::SessionExpired;
            dispatch.call(action);
            if expired {
                return;
            }
        }
        dispatch.call(BrowserAction::Refresh);
    });
}

/// Opens the file picker and queues an upload per picked file.
fn pick_and_upload(dispatch: Callback<BrowserAction>) {
    spawn_local(async move {
        match pick_files().await {
            Ok(files) => {
                for file in files {
                    dispatch.call(BrowserAction::Upload { file });
                }
            }
            Err(err) => {
                logging::warn!("file picker failed: {err}");
                dispatch.call(BrowserAction::OperationFailed {
                    message: format!("Could not pick files: {err}"),
                });
            }
        }
    });
}

#[component]
/// File browser over a remote storage directory tree.
pub fn FileBrowser(
    /// Storage endpoints used for listing and mutations.
    storage: StorageApi,
    /// Directory shown first.
    #[prop(default = "/".to_string(), into)]
    initial_path: String,
    /// Called once the server refuses to renew the session.
    #[prop(optional)]
    on_session_expired: Option<Callback<()>>,
) -> impl IntoView {
    let click_delay = Duration::from_millis(storage.client().config().click_delay_ms);
    let storage = store_value(storage);
    let state = create_rw_signal(BrowserState::default());
    let effects = create_rw_signal(Vec::<BrowserEffect>::new());
    let menu = use_context_menu();

    let dispatch = Callback::new(move |action: BrowserAction| {
        let mut next = state.get_untracked();
        let previous = next.clone();
        match reduce_browser(&mut next, action) {
            Ok(new_effects) => {
                if next != previous {
                    state.set(next);
                }
                if !new_effects.is_empty() {
                    effects.update(|queue| queue.extend(new_effects));
                }
            }
            Err(err) => {
                logging::warn!("file browser: {err}");
                state.update(|state| state.error = Some(err.to_string()));
            }
        }
    });

    create_effect(move |_| {
        let queued = effects.get();
        if queued.is_empty() {
            return;
        }
        effects.set(Vec::new());
        for effect in queued {
            run_effect(storage.get_value(), dispatch, on_session_expired, effect);
        }
    });

    create_effect(move |_| {
        if !menu.clicked.get() && state.with_untracked(|state| state.menu_target.is_some()) {
            dispatch.call(BrowserAction::CloseContextMenu);
        }
    });

    let ctx = BrowserContext {
        state,
        dispatch,
        menu,
        click_delay,
    };

    dispatch.call(BrowserAction::Navigate { path: initial_path });

    let error = create_memo(move |_| state.with(|state| state.error.clone()));
    let prompt = create_memo(move |_| state.with(|state| state.prompt.clone()));
    let at_root = Signal::derive(move || state.with(BrowserState::at_root));
    let loading = Signal::derive(move || state.with(|state| state.loading));

    view! {
        <div class="app-shell file-browser">
            <ToolBar aria_label="File browser toolbar" layout_class="file-browser-toolbar">
                <Button
                    leading_icon=IconName::FolderUp
                    aria_label="Up one level"
                    disabled=Signal::derive(move || at_root.get() || loading.get())
                    on_click=Callback::new(move |_| {
                        dispatch.call(BrowserAction::Open { name: PARENT_ENTRY_NAME.to_string() })
                    })
                >
                    "Up"
                </Button>
                <Button
                    leading_icon=IconName::FolderAdd
                    on_click=Callback::new(move |_| dispatch.call(BrowserAction::BeginCreateDirectory))
                >
                    "New folder"
                </Button>
                <Button
                    leading_icon=IconName::Upload
                    disabled=loading
                    on_click=Callback::new(move |_| pick_and_upload(dispatch))
                >
                    "Upload"
                </Button>
                <Button
                    leading_icon=IconName::Refresh
                    disabled=loading
                    on_click=Callback::new(move |_| dispatch.call(BrowserAction::Refresh))
                >
                    "Refresh"
                </Button>
                <Button
                    leading_icon=IconName::Info
                    on_click=Callback::new(move |_| dispatch.call(BrowserAction::ToggleDetails))
                >
                    {move || if state.with(|s| s.show_details) { "Details On" } else { "Details Off" }}
                </Button>
                <span class="file-browser-path">
                    {move || state.with(|state| state.current_dir.clone())}
                </span>
            </ToolBar>

            {move || {
                error.get().map(|message| {
                    view! {
                        <InlineAlert
                            message=message
                            on_dismiss=Callback::new(move |()| dispatch.call(BrowserAction::DismissError))
                        />
                    }
                })
            }}

            {move || prompt.get().map(|prompt| view! { <NamePromptBar ctx=ctx prompt=prompt /> })}

            <div class="file-browser-workspace">
                <section
                    class="file-grid"
                    aria-label="Files"
                    on:click=move |ev: MouseEvent| {
                        let on_background = ev.target().is_some() && ev.target() == ev.current_target();
                        if let Some(action) = background_click_action(on_background) {
                            dispatch.call(action);
                        }
                    }
                    on:contextmenu=move |ev: MouseEvent| {
                        menu.open_at(&ev);
                        dispatch.call(BrowserAction::OpenContextMenu { target: MenuTarget::Background });
                    }
                >
                    <For
                        each=move || state.with(BrowserState::visible_entries)
                        key=|record| (record.name.clone(), record.size, record.last_modified)
                        let:record
                    >
                        <BrowserTile ctx=ctx record=record />
                    </For>
                    <Show when=move || state.with(|state| !state.loading && state.entries.is_empty())>
                        <EmptyState>"This folder is empty."</EmptyState>
                    </Show>
                </section>

                <Show when=move || state.with(|state| state.show_details)>
                    <DetailsPanel state=state />
                </Show>
            </div>

            <BrowserContextMenu ctx=ctx />

            <StatusBar>
                <StatusBarItem>
                    {move || format!("{} item(s)", state.with(|state| state.entries.len()))}
                </StatusBarItem>
                <StatusBarItem>
                    {move || {
                        state.with(|state| {
                            if state.loading {
                                "Loading...".to_string()
                            } else if let Some(name) = &state.selected {
                                format!("Selected: {name}")
                            } else {
                                "Ready".to_string()
                            }
                        })
                    }}
                </StatusBarItem>
            </StatusBar>
        </div>
    }
}

#[component]
fn BrowserTile(ctx: BrowserContext, record: FileRecord) -> impl IntoView {
    let BrowserContext {
        state,
        dispatch,
        menu,
        click_delay,
    } = ctx;
    let name = store_value(record.name.clone());
    let selected =
        Signal::derive(move || state.with(|state| state.selected.as_deref() == Some(name.get_value().as_str())));
    let dragged =
        Signal::derive(move || state.with(|state| state.dragged.as_deref() == Some(name.get_value().as_str())));
    let loading = Signal::derive(move || state.with(|state| state.loading));

    let on_open = Callback::new(move |()| dispatch.call(BrowserAction::Open { name: name.get_value() }));
    let on_drop = Callback::new(move |(names, target): (Vec<String>, String)| {
        dispatch.call(BrowserAction::Drop { names, target })
    });

    if record.is_parent_entry() {
        return view! {
            <FileTile
                record=record
                disabled=loading
                click_delay=click_delay
                on_open=on_open
                on_drop=on_drop
            />
        }
        .into_view();
    }

    view! {
        <FileTile
            record=record
            disabled=loading
            selected=selected
            dragged=dragged
            click_delay=click_delay
            on_open=on_open
            on_drop=on_drop
            on_select=Callback::new(move |()| dispatch.call(BrowserAction::Select { name: name.get_value() }))
            on_context_menu=Callback::new(move |ev: MouseEvent| {
                ev.stop_propagation();
                menu.open_at(&ev);
                dispatch.call(BrowserAction::OpenContextMenu {
                    target: MenuTarget::Entry(name.get_value()),
                });
            })
            on_drag_start=Callback::new(move |ev: DragEvent| {
                if let Err(err) = DragPayload::single(name.get_value()).write_to(&ev) {
                    logging::warn!("cannot start drag: {err}");
                    return;
                }
                dispatch.call(BrowserAction::StartDrag { name: name.get_value() });
            })
            on_drag_end=Callback::new(move |_| dispatch.call(BrowserAction::EndDrag))
        />
    }
    .into_view()
}

#[component]
fn BrowserContextMenu(ctx: BrowserContext) -> impl IntoView {
    let BrowserContext {
        state,
        dispatch,
        menu,
        ..
    } = ctx;

    let items = move || match state.with(|state| state.menu_target.clone()) {
        Some(MenuTarget::Entry(name)) => {
            let is_file = state.with(|state| {
                state.entry(&name).is_some_and(|entry| !entry.kind.is_directory())
            });
            let open = name.clone();
            let download = name.clone();
            let rename = name.clone();
            let delete = name.clone();
            view! {
                <MenuItem
                    icon=IconName::Folder
                    on_click=Callback::new(move |_| dispatch.call(BrowserAction::Open { name: open.clone() }))
                >
                    "Open"
                </MenuItem>
                {is_file.then(|| view! {
                    <MenuItem
                        icon=IconName::Download
                        on_click=Callback::new(move |_| dispatch.call(BrowserAction::Download { name: download.clone() }))
                    >
                        "Download"
                    </MenuItem>
                })}
                <MenuItem
                    icon=IconName::Rename
                    on_click=Callback::new(move |_| dispatch.call(BrowserAction::BeginRename { name: rename.clone() }))
                >
                    "Rename"
                </MenuItem>
                <MenuItem
                    icon=IconName::Delete
                    danger=true
                    on_click=Callback::new(move |_| dispatch.call(BrowserAction::Delete { name: delete.clone() }))
                >
                    "Delete"
                </MenuItem>
                <MenuSeparator />
                <MenuItem
                    icon=IconName::Info
                    on_click=Callback::new(move |_| {
                        if !state.with_untracked(|state| state.show_details) {
                            dispatch.call(BrowserAction::ToggleDetails);
                        }
                    })
                >
                    "Properties"
                </MenuItem>
            }
            .into_view()
        }
        Some(MenuTarget::Background) => view! {
            <MenuItem
                icon=IconName::FolderAdd
                on_click=Callback::new(move |_| dispatch.call(BrowserAction::BeginCreateDirectory))
            >
                "New folder"
            </MenuItem>
            <MenuItem
                icon=IconName::Upload
                on_click=Callback::new(move |_| pick_and_upload(dispatch))
            >
                "Upload files"
            </MenuItem>
            <MenuItem
                icon=IconName::Refresh
                on_click=Callback::new(move |_| dispatch.call(BrowserAction::Refresh))
            >
                "Refresh"
            </MenuItem>
        }
        .into_view(),
        None => ().into_view(),
    };

    view! {
        <Show when=move || menu.clicked.get() && state.with(|state| state.menu_target.is_some())>
            <MenuSurface
                aria_label="File actions"
                style=Signal::derive(move || menu.point.get().style())
            >
                {items}
            </MenuSurface>
        </Show>
    }
}

#[component]
fn NamePromptBar(ctx: BrowserContext, prompt: NamePrompt) -> impl IntoView {
    let dispatch = ctx.dispatch;
    let (label, initial) = match &prompt {
        NamePrompt::Rename { name } => (format!("Rename `{name}` to"), name.clone()),
        NamePrompt::NewFolder => ("New folder name".to_string(), String::new()),
    };
    let aria_label = label.clone();
    let value = create_rw_signal(initial);
    let input_ref = create_node_ref::<html::Input>();
    input_ref.on_load(|input| {
        let _ = input.focus();
    });

    let commit = move || dispatch.call(BrowserAction::CommitPrompt { value: value.get_untracked() });

    view! {
        <ToolBar layout_class="file-browser-prompt" aria_label=aria_label>
            <label class="file-browser-prompt-label">{label}</label>
            <TextField
                node_ref=input_ref
                value=value
                on_input=Callback::new(move |next| value.set(next))
                on_keydown=Callback::new(move |ev: KeyboardEvent| match ev.key().as_str() {
                    "Enter" => commit(),
                    "Escape" => dispatch.call(BrowserAction::CancelPrompt),
                    _ => {}
                })
            />
            <Button variant=ButtonVariant::Primary on_click=Callback::new(move |_| commit())>
                "OK"
            </Button>
            <Button on_click=Callback::new(move |_| dispatch.call(BrowserAction::CancelPrompt))>
                "Cancel"
            </Button>
        </ToolBar>
    }
}

#[component]
fn DetailsPanel(state: RwSignal<BrowserState>) -> impl IntoView {
    view! {
        <aside class="file-browser-details" aria-label="Properties">
            {move || {
                state.with(|state| match state.selected_entry() {
                    Some(entry) => {
                        let kind = if entry.kind.is_directory() { "Folder" } else { "File" };
                        let size = entry.display_size();
                        view! {
                            <div class="details-grid">
                                <div>"Name"</div><div>{entry.name.clone()}</div>
                                <div>"Type"</div><div>{kind}</div>
                                <div>"Size"</div><div>{if size.is_empty() { "-".to_string() } else { size }}</div>
                                <div>"Modified"</div><div>{entry.display_last_modified()}</div>
                                <div>"Location"</div><div>{state.path_of(&entry.name)}</div>
                            </div>
                        }
                        .into_view()
                    }
                    None => view! {
                        <div class="details-empty">"Select an item to view properties."</div>
                    }
                    .into_view(),
                })
            }}
        </aside>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn clicks_inside_tiles_leave_the_selection_alone() {
        assert_eq!(background_click_action(false), None);
        assert_eq!(
            background_click_action(true),
            Some(BrowserAction::ClearSelection)
        );
    }

    #[test]
    fn rejected_refresh_expires_the_session() {
        assert_eq!(
            failure_action("move", &ApiError::RefreshRejected { status: 403 }),
            BrowserAction::SessionExpired
        );
        assert_eq!(
            failure_action(
                "move",
                &ApiError::Status {
                    status: 500,
                    body: String::new(),
                }
            ),
            BrowserAction::OperationFailed {
                message: "Could not move: server responded with status 500".to_string(),
            }
        );
    }
}
