use super::*;

#[component]
/// Shared toolbar primitive.
pub fn ToolBar(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] aria_label: Option<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <div
            class=merge_layout_class("ui-toolbar", layout_class)
            role="toolbar"
            aria-label=aria_label
            data-ui-primitive="true"
            data-ui-kind="toolbar"
            data-ui-gap=TOOLBAR_GAP
        >
            {children()}
        </div>
    }
}

#[component]
/// Shared status bar primitive.
pub fn StatusBar(
    #[prop(optional)] layout_class: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    view! {
        <div
            class=merge_layout_class("ui-statusbar", layout_class)
            data-ui-primitive="true"
            data-ui-kind="statusbar"
            data-ui-gap=TOOLBAR_GAP
        >
            {children()}
        </div>
    }
}
