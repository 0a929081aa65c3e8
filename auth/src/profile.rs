//! Profile modal: edit names, replace the avatar, delete the account.
//!
//! Same three-phase shape as [`crate::flow`]: a sync guard returns a
//! [`ProfileRequest`], [`dispatch`] performs it with the session token, and
//! `finish()` turns the result into a notice plus a [`ProfileEffect`]. The
//! host then refreshes the session (save, avatar) or logs out (delete).

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use std::time::Duration;

use crate::api::AuthApi;
use crate::error::ApiError;
use crate::notice::{self, Notice};
use crate::session::Session;
use crate::storage::TokenStore;
use crate::types::{AvatarUpload, ProfileUpdate, User};

/// Largest avatar accepted for upload (5 MiB).
pub const MAX_AVATAR_BYTES: u64 = 5 * 1024 * 1024;

/// MIME types offered by the avatar file picker.
pub const AVATAR_CONTENT_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/gif"];

/// Delay before closing the modal after a successful save.
pub const SAVE_CLOSE_DELAY: Duration = Duration::from_millis(1000);

pub const MSG_AVATAR_TOO_LARGE: &str = "File size must be less than 5MB";
pub const MSG_PROFILE_SAVED: &str = "Profile updated successfully";
pub const MSG_AVATAR_UPDATED: &str = "Profile picture updated";
pub const MSG_DELETE_CONFIRM: &str =
    "Are you sure you want to delete your account? This action cannot be undone.";

const FALLBACK_SAVE: &str = "Failed to update profile";
const FALLBACK_AVATAR: &str = "Failed to upload avatar";
const FALLBACK_DELETE: &str = "Failed to delete account";

/// A profile change ready to send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProfileRequest {
    Save(ProfileUpdate),
    UploadAvatar(AvatarUpload),
    DeleteAccount,
}

impl ProfileRequest {
    /// Session-side consequence of this request succeeding.
    ///
    /// Independent of any editor, so a host whose modal is already gone
    /// still keeps the session in line with the server.
    #[must_use]
    pub fn effect(&self) -> ProfileEffect {
        match self {
            Self::Save(_) => ProfileEffect::Saved { close_after: SAVE_CLOSE_DELAY },
            Self::UploadAvatar(_) => ProfileEffect::AvatarUpdated,
            Self::DeleteAccount => ProfileEffect::AccountDeleted,
        }
    }

    fn fallback(&self) -> &'static str {
        match self {
            Self::Save(_) => FALLBACK_SAVE,
            Self::UploadAvatar(_) => FALLBACK_AVATAR,
            Self::DeleteAccount => FALLBACK_DELETE,
        }
    }
}

/// What the host does after a successful request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileEffect {
    /// Refresh the session, then close the modal after the delay.
    Saved { close_after: Duration },
    /// Refresh the session so the new avatar URL shows.
    AvatarUpdated,
    /// Log the session out and close the modal.
    AccountDeleted,
}

/// Draft state of the profile modal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileEditor {
    pub display_name: String,
    pub username: String,
    /// Id of the user the drafts were seeded from.
    seeded_for: Option<String>,
    in_flight: Option<ProfileRequest>,
    confirming_delete: bool,
    notice: Option<Notice>,
}

impl ProfileEditor {
    /// Drafts seeded from the session user.
    #[must_use]
    pub fn from_user(user: Option<&User>) -> Self {
        let mut editor = Self::default();
        editor.sync_from(user);
        editor
    }

    /// Follow the session user.
    ///
    /// Drafts are re-seeded only when a different account shows up; refreshes
    /// of the same user keep whatever is being typed.
    pub fn sync_from(&mut self, user: Option<&User>) {
        let Some(user) = user else {
            self.seeded_for = None;
            return;
        };
        if self.seeded_for.as_deref() == Some(user.id.as_str()) {
            return;
        }
        self.display_name = user.full_name.clone().unwrap_or_default();
        self.username = user.username.clone();
        self.seeded_for = Some(user.id.clone());
    }

    fn has_user(&self) -> bool {
        self.seeded_for.is_some()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// True between `request_delete()` and confirm/cancel.
    #[must_use]
    pub fn is_confirming_delete(&self) -> bool {
        self.confirming_delete
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self, shown: &Notice) {
        notice::dismiss(&mut self.notice, shown);
    }

    /// Save the name drafts. No-op without a session user or while busy.
    pub fn save(&mut self) -> Option<ProfileRequest> {
        if !self.has_user() || self.is_loading() {
            return None;
        }
        let update = ProfileUpdate {
            full_name: self.display_name.trim().to_owned(),
            username: self.username.trim().to_owned(),
        };
        Some(self.begin(ProfileRequest::Save(update)))
    }

    /// Size guard run before the file is read or sent.
    ///
    /// Returns false and raises a notice when `size` exceeds
    /// [`MAX_AVATAR_BYTES`].
    pub fn check_avatar_size(&mut self, size: u64) -> bool {
        if size > MAX_AVATAR_BYTES {
            self.notice = Some(Notice::error(MSG_AVATAR_TOO_LARGE));
            return false;
        }
        true
    }

    /// Upload a new avatar, subject to the size guard.
    pub fn upload_avatar(&mut self, avatar: AvatarUpload) -> Option<ProfileRequest> {
        if !self.has_user() || self.is_loading() {
            return None;
        }
        let size = u64::try_from(avatar.bytes.len()).unwrap_or(u64::MAX);
        if !self.check_avatar_size(size) {
            return None;
        }
        Some(self.begin(ProfileRequest::UploadAvatar(avatar)))
    }

    /// Arm the delete confirmation.
    pub fn request_delete(&mut self) {
        if !self.is_loading() {
            self.confirming_delete = true;
        }
    }

    pub fn cancel_delete(&mut self) {
        self.confirming_delete = false;
    }

    /// Issue the deletion, only once armed by [`Self::request_delete`].
    pub fn confirm_delete(&mut self) -> Option<ProfileRequest> {
        if !self.confirming_delete || self.is_loading() {
            return None;
        }
        self.confirming_delete = false;
        Some(self.begin(ProfileRequest::DeleteAccount))
    }

    fn begin(&mut self, request: ProfileRequest) -> ProfileRequest {
        self.in_flight = Some(request.clone());
        request
    }

    /// Apply the result of the in-flight request.
    pub fn finish(&mut self, result: Result<(), ApiError>) -> Option<ProfileEffect> {
        let request = self.in_flight.take()?;
        if let Err(e) = result {
            tracing::debug!(error = %e, "profile request failed");
            self.notice = Some(Notice::error(e.notice_text(request.fallback())));
            return None;
        }
        let effect = request.effect();
        match effect {
            ProfileEffect::Saved { .. } => self.notice = Some(Notice::success(MSG_PROFILE_SAVED)),
            ProfileEffect::AvatarUpdated => self.notice = Some(Notice::success(MSG_AVATAR_UPDATED)),
            ProfileEffect::AccountDeleted => {}
        }
        Some(effect)
    }

    /// Run `request` end to end against `session`.
    pub async fn run<A: AuthApi, S: TokenStore>(
        &mut self,
        request: ProfileRequest,
        api: &A,
        session: &mut Session<S>,
    ) -> Option<ProfileEffect> {
        let result = dispatch(api, session.token(), &request).await;
        let effect = self.finish(result)?;
        apply_effect(effect, api, session).await;
        Some(effect)
    }
}

/// Perform `request` with the stored `token`.
///
/// # Errors
///
/// [`ApiError::NotAuthenticated`] without a token, else the transport error.
pub async fn dispatch<A: AuthApi>(
    api: &A,
    token: Option<String>,
    request: &ProfileRequest,
) -> Result<(), ApiError> {
    let token = token.ok_or(ApiError::NotAuthenticated)?;
    match request {
        ProfileRequest::Save(update) => api.update_profile(&token, update).await.map(|_| ()),
        ProfileRequest::UploadAvatar(avatar) => api.upload_avatar(&token, avatar).await,
        ProfileRequest::DeleteAccount => api.delete_account(&token).await,
    }
}

/// Bring the session in line with a successful profile request.
pub async fn apply_effect<A: AuthApi, S: TokenStore>(
    effect: ProfileEffect,
    api: &A,
    session: &mut Session<S>,
) {
    match effect {
        ProfileEffect::Saved { .. } | ProfileEffect::AvatarUpdated => session.refresh_profile(api).await,
        ProfileEffect::AccountDeleted => session.logout(),
    }
}
