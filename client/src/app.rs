//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::net::api::HttpAuthApi;
use crate::pages::{chat::ChatPage, home::HomePage};
use crate::state::auth::new_auth_state;

/// Root application component.
///
/// Provides the session signal and API client to every route and starts
/// resolving a persisted token before the first route renders.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(new_auth_state());
    let api = HttpAuthApi::from_build_env();
    provide_context(auth);
    provide_context(api.clone());

    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        crate::state::auth::restore(auth, &api).await;
    });
    #[cfg(not(feature = "csr"))]
    let _ = api;

    view! {
        <Title text="Studio"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("chat") view=ChatPage/>
            </Routes>
        </Router>
    }
}
