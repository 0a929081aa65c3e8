//! Transient notice banner used by the auth and profile modals.

use auth::notice::{NOTICE_DISMISS_AFTER, Notice};
use leptos::prelude::*;

use crate::util::timer::after;

/// Shows the current notice and asks for its dismissal after a few seconds.
///
/// `on_dismiss` receives the notice that was shown, so a newer notice raised
/// in the meantime survives the stale timer.
#[component]
pub fn Toast(#[prop(into)] notice: Signal<Option<Notice>>, on_dismiss: Callback<Notice>) -> impl IntoView {
    Effect::new(move || {
        if let Some(shown) = notice.get() {
            after(NOTICE_DISMISS_AFTER, move || {
                let _ = on_dismiss.try_run(shown);
            });
        }
    });

    move || {
        notice.get().map(|shown| {
            let class = format!("toast toast--{}", shown.kind.css_modifier());
            let dismiss = shown.clone();
            view! {
                <div class=class role="status">
                    <span class="toast__message">{shown.message}</span>
                    <button class="toast__close" title="Dismiss" on:click=move |_| on_dismiss.run(dismiss.clone())>
                        "×"
                    </button>
                </div>
            }
        })
    }
}
