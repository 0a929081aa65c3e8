//! Transient notices (toasts) raised by the auth and profile flows.

use std::time::Duration;

/// How long a notice stays visible before it dismisses itself.
pub const NOTICE_DISMISS_AFTER: Duration = Duration::from_millis(3000);

/// Tone of a notice, used for styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

impl NoticeKind {
    /// CSS modifier suffix for the toast element.
    #[must_use]
    pub fn css_modifier(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A short-lived message for the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, message: message.into() }
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, message: message.into() }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, message: message.into() }
    }
}

/// Clear `slot` only if it still holds `shown`.
///
/// Auto-dismiss timers call this so an older timer never hides a newer notice.
pub fn dismiss(slot: &mut Option<Notice>, shown: &Notice) {
    if slot.as_ref() == Some(shown) {
        *slot = None;
    }
}
