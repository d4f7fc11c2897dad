//! File and folder tile.

use std::time::Duration;

use cloud_api::FileRecord;
use leptos::ev::{DragEvent, MouseEvent};
use leptos::*;
use system_ui::{Icon, IconName, IconSize};

use crate::click::{use_single_and_double_click, DEFAULT_CLICK_DELAY};
use crate::drag::{accepts_drop, DragPayload, DropCandidate};

/// Class list for a tile root. Selection and drag-over highlights only apply to enabled tiles.
pub fn tile_class(disabled: bool, selected: bool, drag_over: bool) -> String {
    let mut class = String::from("file");
    if disabled {
        class.push_str(" disabled");
    } else {
        if selected {
            class.push_str(" selected");
        }
        if drag_over {
            class.push_str(" drag-over");
        }
    }
    class
}

#[component]
/// One file or folder tile with name, modification date, and size.
///
/// A single click selects, a double click opens. Enabled tiles render an overlay that is
/// draggable when `on_drag_start` is wired and accepts drops only while it is an idle directory
/// (see [`accepts_drop`]).
pub fn FileTile(
    record: FileRecord,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional, into)] selected: MaybeSignal<bool>,
    #[prop(optional, into)] dragged: MaybeSignal<bool>,
    #[prop(default = DEFAULT_CLICK_DELAY)] click_delay: Duration,
    #[prop(optional)] on_select: Option<Callback<()>>,
    #[prop(optional)] on_open: Option<Callback<()>>,
    #[prop(optional)] on_context_menu: Option<Callback<MouseEvent>>,
    #[prop(optional)] on_drag_start: Option<Callback<DragEvent>>,
    #[prop(optional)] on_drag_end: Option<Callback<DragEvent>>,
    /// Receives the dropped names and this tile's name.
    #[prop(optional)]
    on_drop: Option<Callback<(Vec<String>, String)>>,
) -> impl IntoView {
    let drag_over = create_rw_signal(false);
    let name = store_value(record.name.clone());
    let is_directory = record.kind.is_directory();
    let icon = if is_directory {
        IconName::Folder
    } else {
        IconName::Document
    };

    let clicks = use_single_and_double_click(
        click_delay,
        Callback::new(move |()| {
            if let Some(on_select) = on_select.as_ref() {
                on_select.call(());
            }
        }),
        Callback::new(move |()| {
            if let Some(on_open) = on_open.as_ref() {
                on_open.call(());
            }
        }),
    );

    let drop_target = Signal::derive(move || {
        accepts_drop(DropCandidate {
            disabled: disabled.get(),
            is_directory,
            dragged: dragged.get(),
            selected: selected.get(),
            has_drop_handler: on_drop.is_some(),
        })
    });

    let overlay = move || {
        (!disabled.get()).then(|| {
            view! {
                <div
                    class="overlay"
                    draggable=if on_drag_start.is_some() { "true" } else { "false" }
                    data-drop-target=move || drop_target.get().to_string()
                    on:dragstart=move |ev: DragEvent| {
                        if let Some(on_drag_start) = on_drag_start.as_ref() {
                            on_drag_start.call(ev);
                        }
                    }
                    on:dragend=move |ev: DragEvent| {
                        if let Some(on_drag_end) = on_drag_end.as_ref() {
                            on_drag_end.call(ev);
                        }
                    }
                    on:dragover=move |ev: DragEvent| {
                        if drop_target.get_untracked() {
                            ev.prevent_default();
                        }
                    }
                    on:dragenter=move |_| {
                        if drop_target.get_untracked() {
                            drag_over.set(true);
                        }
                    }
                    on:dragleave=move |_| drag_over.set(false)
                    on:drop=move |ev: DragEvent| {
                        drag_over.set(false);
                        if !drop_target.get_untracked() {
                            return;
                        }
                        ev.prevent_default();
                        let Some(on_drop) = on_drop.as_ref() else {
                            return;
                        };
                        match DragPayload::read_from(&ev) {
                            Ok(payload) => on_drop.call((payload.names, name.get_value())),
                            Err(err) => logging::warn!("ignoring drop on `{}`: {err}", name.get_value()),
                        }
                    }
                ></div>
            }
        })
    };

    view! {
        <div
            class=move || tile_class(disabled.get(), selected.get(), drag_over.get())
            title=record.name.clone()
            on:click=move |ev| clicks.on_click.call(ev)
            on:dblclick=move |ev| clicks.on_double_click.call(ev)
            on:contextmenu=move |ev| {
                if let Some(on_context_menu) = on_context_menu.as_ref() {
                    on_context_menu.call(ev);
                }
            }
        >
            {overlay}
            <Icon icon=icon size=IconSize::Tile class="file-icon" />
            <div class="filename">{record.name.clone()}</div>
            <div class="file-last-modified">{record.display_last_modified()}</div>
            <div class="file-size">{record.display_size()}</div>
        </div>
    }
}
