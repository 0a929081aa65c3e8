//! Public landing page with the sign-in entry point.

use leptos::prelude::*;

use crate::components::auth_modal::AuthModal;
use crate::state::auth::AuthState;

/// Landing page. Signed-out visitors open the auth modal; signed-in users get
/// a link straight to chat.
#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let modal_open = RwSignal::new(false);

    let signed_in = Memo::new(move |_| auth.with(AuthState::is_authenticated));
    let resolving = Memo::new(move |_| auth.with(AuthState::is_loading));

    view! {
        <div class="home-page">
            <header class="home-header">
                <h1>"Studio"</h1>
                <Show
                    when=move || signed_in.get()
                    fallback=move || view! {
                        <button
                            class="btn btn--primary"
                            disabled=move || resolving.get()
                            on:click=move |_| modal_open.set(true)
                        >
                            "Sign In"
                        </button>
                    }
                >
                    <a class="btn btn--primary" href="/chat">"Open Chat"</a>
                </Show>
            </header>
            <main class="home-hero">
                <p class="home-hero__tagline">"Chat with your assistant from any device."</p>
            </main>
            <AuthModal open=modal_open/>
        </div>
    }
}
