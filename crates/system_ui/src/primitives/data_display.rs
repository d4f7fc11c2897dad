use super::*;

#[component]
/// Placeholder shown when a list has nothing to render.
pub fn EmptyState(
    #[prop(optional)] layout_class: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    view! {
        <div
            class=merge_layout_class("ui-empty-state", layout_class)
            data-ui-primitive="true"
            data-ui-kind="empty-state"
        >
            {children()}
        </div>
    }
}

#[component]
/// Shared inline statusbar item wrapper.
pub fn StatusBarItem(
    #[prop(optional)] layout_class: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    view! {
        <span
            class=merge_layout_class("ui-statusbar-item", layout_class)
            data-ui-primitive="true"
            data-ui-kind="statusbar-item"
        >
            {children()}
        </span>
    }
}

#[component]
/// Dismissable error banner.
pub fn InlineAlert(
    #[prop(into)] message: String,
    #[prop(optional)] on_dismiss: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <div
            class="ui-inline-alert"
            role="alert"
            data-ui-primitive="true"
            data-ui-kind="inline-alert"
        >
            <span class="ui-inline-alert-message">{message}</span>
            {on_dismiss.map(|on_dismiss| {
                view! {
                    <button
                        type="button"
                        class="ui-inline-alert-dismiss"
                        aria-label="Dismiss"
                        on:click=move |_| on_dismiss.call(())
                    >
                        <Icon icon=IconName::Dismiss size=IconSize::Sm />
                    </button>
                }
            })}
        </div>
    }
}
