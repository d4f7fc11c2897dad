use super::*;

#[component]
/// Shared floating menu surface, positioned by the caller through `style`.
pub fn MenuSurface(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional, into)] style: MaybeSignal<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <div
            class=merge_layout_class("ui-menu-surface", layout_class)
            role="menu"
            aria-label=aria_label
            style=move || style.get()
            data-ui-primitive="true"
            data-ui-kind="menu-surface"
            on:mousedown=move |ev| ev.stop_propagation()
            on:contextmenu=move |ev| ev.prevent_default()
        >
            {children()}
        </div>
    }
}

#[component]
/// Shared overlay menu item primitive.
pub fn MenuItem(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional)] icon: Option<IconName>,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional)] danger: bool,
    #[prop(optional)] on_click: Option<Callback<MouseEvent>>,
    children: Children,
) -> impl IntoView {
    let variant = if danger {
        ButtonVariant::Danger
    } else {
        ButtonVariant::Quiet
    };
    view! {
        <button
            type="button"
            class=merge_layout_class("ui-menu-item", layout_class)
            role="menuitem"
            disabled=move || disabled.get()
            data-ui-primitive="true"
            data-ui-kind="menu-item"
            data-ui-variant=variant.token()
            data-ui-disabled=move || bool_token(disabled.get())
            on:click=move |ev| {
                if let Some(on_click) = on_click.as_ref() {
                    on_click.call(ev);
                }
            }
        >
            {icon.map(|icon| view! { <Icon icon=icon size=IconSize::Sm /> })}
            <span>{children()}</span>
        </button>
    }
}

#[component]
/// Shared menu separator primitive.
pub fn MenuSeparator(#[prop(optional)] layout_class: Option<&'static str>) -> impl IntoView {
    view! {
        <div
            class=merge_layout_class("ui-menu-separator", layout_class)
            role="separator"
            aria-hidden="true"
            data-ui-primitive="true"
            data-ui-kind="menu-separator"
        ></div>
    }
}
