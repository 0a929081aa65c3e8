//! Modal for editing the signed-in user's profile.
//!
//! SYSTEM CONTEXT
//! ==============
//! Drafts live in an `auth::ProfileEditor`. Saves and avatar uploads refresh
//! the session user; deleting the account logs the session out, which lets the
//! page's unauthenticated redirect take over.

use auth::notice::Notice;
use auth::profile::{ProfileEditor, ProfileEffect, ProfileRequest};
use leptos::prelude::*;

use crate::components::toast::Toast;
use crate::net::api::HttpAuthApi;
use crate::state::auth::AuthState;
use crate::util::avatar_file::accept_attribute;
use crate::util::timer::after;

/// Profile modal. `on_close` hides it; the owner decides whether it is mounted.
#[component]
pub fn ProfileModal(on_close: Callback<()>) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let api = expect_context::<HttpAuthApi>();

    let editor = RwSignal::new(auth.with_untracked(|state| ProfileEditor::from_user(state.user())));
    let loading = Memo::new(move |_| editor.with(ProfileEditor::is_loading));
    let confirming = Memo::new(move |_| editor.with(ProfileEditor::is_confirming_delete));

    // Keep drafts in step with the session user (e.g. after a refresh).
    Effect::new(move || {
        let user = auth.with(|state| state.user().cloned());
        editor.update(|e| e.sync_from(user.as_ref()));
    });

    let avatar_url = move || {
        auth.with(|state| state.user().and_then(|u| u.profile_photo_url.clone()))
    };
    let initial = move || {
        auth.with(|state| {
            state
                .user()
                .and_then(|u| u.display_name().chars().next())
                .map(|c| c.to_uppercase().to_string())
                .unwrap_or_default()
        })
    };

    let api_save = api.clone();
    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if let Some(request) = editor.try_update(ProfileEditor::save).flatten() {
            send(request, editor, auth, &api_save, on_close);
        }
    };

    let api_avatar = api.clone();
    let on_avatar = move |ev: leptos::ev::Event| {
        #[cfg(feature = "csr")]
        {
            use wasm_bindgen::JsCast;

            let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            input.set_value("");
            // Reject oversized files before reading them into memory.
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let size = file.size() as u64;
            if !editor.try_update(|e| e.check_avatar_size(size)).unwrap_or(false) {
                return;
            }
            let api = api_avatar.clone();
            leptos::task::spawn_local(async move {
                match crate::util::avatar_file::read_avatar(file).await {
                    Ok(avatar) => {
                        if let Some(request) = editor.try_update(|e| e.upload_avatar(avatar)).flatten() {
                            send(request, editor, auth, &api, on_close);
                        }
                    }
                    Err(e) => leptos::logging::warn!("avatar read failed: {e}"),
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (ev, &api_avatar);
    };

    let on_confirm_delete = move |_| {
        if let Some(request) = editor.try_update(ProfileEditor::confirm_delete).flatten() {
            send(request, editor, auth, &api, on_close);
        }
    };

    let notice = Signal::derive(move || editor.with(|e| e.notice().cloned()));
    let on_dismiss = Callback::new(move |shown: Notice| editor.update(|e| e.dismiss_notice(&shown)));
    let on_keydown = Callback::new(move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            on_close.run(());
        }
    });

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div
                class="dialog dialog--profile"
                on:click=move |ev| ev.stop_propagation()
                on:keydown=move |ev| on_keydown.run(ev)
                tabindex="0"
            >
                <h2>"Edit Profile"</h2>

                <Toast notice=notice on_dismiss=on_dismiss/>

                <div class="profile-avatar">
                    {move || match avatar_url() {
                        Some(url) => view! { <img class="profile-avatar__image" src=url alt="Profile picture"/> }.into_any(),
                        None => view! { <span class="profile-avatar__initial">{initial}</span> }.into_any(),
                    }}
                    <label class="btn profile-avatar__upload">
                        "Change Photo"
                        <input
                            type="file"
                            class="profile-avatar__input"
                            accept=accept_attribute()
                            disabled=move || loading.get()
                            on:change=on_avatar.clone()
                        />
                    </label>
                </div>

                <form class="profile-form" on:submit=on_save.clone()>
                    <label class="profile-form__field">
                        <span class="profile-form__label">"Display Name"</span>
                        <input
                            class="profile-form__input"
                            type="text"
                            prop:value=move || editor.with(|e| e.display_name.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                editor.update(|e| e.display_name = value);
                            }
                        />
                    </label>
                    <label class="profile-form__field">
                        <span class="profile-form__label">"Username"</span>
                        <input
                            class="profile-form__input"
                            type="text"
                            prop:value=move || editor.with(|e| e.username.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                editor.update(|e| e.username = value);
                            }
                        />
                    </label>
                    <div class="dialog__actions">
                        <button class="btn" type="button" on:click=move |_| on_close.run(())>"Cancel"</button>
                        <button class="btn btn--primary" type="submit" disabled=move || loading.get()>
                            {move || if loading.get() { "Saving…" } else { "Save Changes" }}
                        </button>
                    </div>
                </form>

                <div class="profile-danger">
                    <Show
                        when=move || confirming.get()
                        fallback=move || view! {
                            <button
                                class="btn btn--danger"
                                disabled=move || loading.get()
                                on:click=move |_| editor.update(ProfileEditor::request_delete)
                            >
                                "Delete Account"
                            </button>
                        }
                    >
                        <p class="profile-danger__warning">{auth::profile::MSG_DELETE_CONFIRM}</p>
                        <div class="dialog__actions">
                            <button class="btn" on:click=move |_| editor.update(ProfileEditor::cancel_delete)>
                                "Keep Account"
                            </button>
                            <button class="btn btn--danger" on:click=on_confirm_delete.clone()>
                                "Delete Permanently"
                            </button>
                        </div>
                    </Show>
                </div>
            </div>
        </div>
    }
}

/// Send `request` and bring the session in line with the outcome.
fn send(
    request: ProfileRequest,
    editor: RwSignal<ProfileEditor>,
    auth: RwSignal<AuthState>,
    api: &HttpAuthApi,
    on_close: Callback<()>,
) {
    #[cfg(feature = "csr")]
    {
        let api = api.clone();
        leptos::task::spawn_local(async move {
            let token = auth.with_untracked(AuthState::token);
            let result = auth::profile::dispatch(&api, token, &request).await;
            let effect = result.is_ok().then(|| request.effect());
            // The editor only drives the notice; a closed modal must not
            // keep the session out of step with the server.
            let _ = editor.try_update(|e| e.finish(result));
            let Some(effect) = effect else {
                return;
            };
            match effect {
                ProfileEffect::Saved { close_after } => {
                    crate::state::auth::refresh_profile(auth, &api).await;
                    after(close_after, move || {
                        let _ = on_close.try_run(());
                    });
                }
                ProfileEffect::AvatarUpdated => crate::state::auth::refresh_profile(auth, &api).await,
                ProfileEffect::AccountDeleted => {
                    auth.update(AuthState::logout);
                    let _ = on_close.try_run(());
                }
            }
        });
    }
    #[cfg(not(feature = "csr"))]
    let _ = (request, editor, auth, api, on_close);
}
