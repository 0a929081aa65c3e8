//! Authenticated landing route.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reached after sign-in. Signed-out visitors are sent back to `/` once the
//! startup token check has finished.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::profile_modal::ProfileModal;
use crate::state::auth::{AuthState, account_summary};
use crate::util::auth::install_unauth_redirect;

#[component]
pub fn ChatPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    let show_profile = RwSignal::new(false);
    let on_profile_close = Callback::new(move |()| show_profile.set(false));

    let display_name = move || {
        auth.with(|state| state.user().map(|u| u.display_name().to_owned()).unwrap_or_default())
    };
    let summary = move || auth.with(account_summary).unwrap_or_default();

    view! {
        <div class="chat-page">
            <header class="chat-header">
                <Show
                    when=move || !auth.with(AuthState::is_loading)
                    fallback=|| view! { <span class="chat-header__loading">"Loading…"</span> }
                >
                    <span class="chat-header__name">{display_name}</span>
                    <span class="chat-header__summary">{summary}</span>
                </Show>
                <div class="chat-header__actions">
                    <button class="btn" on:click=move |_| show_profile.set(true)>"Profile"</button>
                    <button class="btn" on:click=move |_| auth.update(AuthState::logout)>"Log Out"</button>
                </div>
            </header>
            <main class="chat-main">
                <p class="chat-main__empty">"Start a conversation."</p>
            </main>
            <Show when=move || show_profile.get()>
                <ProfileModal on_close=on_profile_close/>
            </Show>
        </div>
    }
}
