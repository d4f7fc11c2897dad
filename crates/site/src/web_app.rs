use cloud_api_web::WebServices;
use file_browser::FileBrowser;
use leptos::ev::KeyboardEvent;
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use system_ui::prelude::*;

use crate::client_config;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Cloud Files" />
        <Meta name="description" content="Browse and organize files in remote storage." />

        <Router>
            <main class="site-root">
                <Routes>
                    <Route path="" view=FilesEntry />
                </Routes>
            </main>
        </Router>
    }
}

/// Signed-in file browser, or the sign-in form when no token pair is stored.
///
/// A `?path=` query parameter picks the directory shown first. When the server refuses to renew
/// the session the stored pair is dropped and the sign-in form comes back.
#[component]
pub fn FilesEntry() -> impl IntoView {
    let services = WebServices::new(client_config());
    let signed_in = create_rw_signal(services.auth.is_signed_in());
    let query = use_query_map();
    let initial_path = query.with_untracked(|map| map.get("path").cloned().unwrap_or_else(|| "/".to_string()));
    provide_context(services.clone());

    let auth = services.auth.clone();
    let end_session = Callback::new(move |()| {
        if let Err(err) = auth.sign_out() {
            logging::warn!("sign out failed: {err}");
        }
        signed_in.set(false);
    });
    let on_session_expired = Callback::new(move |()| {
        logging::warn!("session expired, signing out");
        end_session.call(());
    });

    view! {
        <Show
            when=move || signed_in.get()
            fallback=move || view! { <SignInForm on_signed_in=Callback::new(move |()| signed_in.set(true)) /> }
        >
            <header class="site-header">
                <span class="site-title">"Cloud Files"</span>
                <Button
                    leading_icon=IconName::SignOut
                    on_click=Callback::new(move |_| end_session.call(()))
                >
                    "Sign out"
                </Button>
            </header>
            <FileBrowser
                storage=services.storage.clone()
                initial_path=initial_path.clone()
                on_session_expired=on_session_expired
            />
        </Show>
    }
}

#[component]
fn SignInForm(on_signed_in: Callback<()>) -> impl IntoView {
    let services = expect_context::<WebServices>();
    let username = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let pending = create_rw_signal(false);
    let error = create_rw_signal(None::<String>);

    let submit = move || {
        if pending.get_untracked() {
            return;
        }
        let auth = services.auth.clone();
        let user = username.get_untracked();
        let pass = password.get_untracked();
        if user.trim().is_empty() || pass.is_empty() {
            error.set(Some("Enter a username and password.".to_string()));
            return;
        }
        pending.set(true);
        error.set(None);
        spawn_local(async move {
            match auth.sign_in(&user, &pass).await {
                Ok(_) => {
                    logging::log!("signed in as {}", user.trim());
                    on_signed_in.call(());
                }
                Err(err) => {
                    logging::warn!("sign in failed: {err}");
                    error.set(Some(match err.status() {
                        Some(401) | Some(403) => "Wrong username or password.".to_string(),
                        _ => format!("Sign in failed: {err}"),
                    }));
                }
            }
            pending.set(false);
        });
    };
    let submit = store_value(submit);

    let on_enter = Callback::new(move |ev: KeyboardEvent| {
        if ev.key() == "Enter" {
            submit.with_value(|submit| submit());
        }
    });

    view! {
        <section class="signin" aria-label="Sign in">
            <h1>"Cloud Files"</h1>
            {move || error.get().map(|message| view! {
                <InlineAlert message=message on_dismiss=Callback::new(move |()| error.set(None)) />
            })}
            <TextField
                id="signin-username"
                placeholder="Username"
                aria_label="Username"
                autocomplete="username"
                value=username
                disabled=pending
                on_input=Callback::new(move |value| username.set(value))
                on_keydown=on_enter
            />
            <TextField
                id="signin-password"
                placeholder="Password"
                aria_label="Password"
                autocomplete="current-password"
                input_type="password"
                value=password
                disabled=pending
                on_input=Callback::new(move |value| password.set(value))
                on_keydown=on_enter
            />
            <Button
                variant=ButtonVariant::Primary
                layout_class="signin-submit"
                disabled=pending
                on_click=Callback::new(move |_| submit.with_value(|submit| submit()))
            >
                {move || if pending.get() { "Signing in..." } else { "Sign in" }}
            </Button>
        </section>
    }
}
