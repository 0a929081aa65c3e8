//! Deferred UI actions (modal close, toast dismiss, form reset).

use std::time::Duration;

/// Run `action` once `delay` has elapsed.
///
/// Browser-only; without the `csr` feature the action is dropped unrun.
pub fn after<F>(delay: Duration, action: F)
where
    F: FnOnce() + 'static,
{
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        gloo_timers::future::sleep(delay).await;
        action();
    });
    #[cfg(not(feature = "csr"))]
    let _ = (delay, action);
}
