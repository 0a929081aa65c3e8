//! Reading a picked `<input type="file">` into an upload payload.

#[cfg(test)]
#[path = "avatar_file_test.rs"]
mod avatar_file_test;

/// Used when the browser reports no MIME type for the picked file.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Value for the file picker's `accept` attribute.
pub fn accept_attribute() -> String {
    auth::profile::AVATAR_CONTENT_TYPES.join(", ")
}

/// Browser-reported MIME type, or [`FALLBACK_CONTENT_TYPE`] when blank.
pub fn content_type_or_default(reported: &str) -> String {
    let reported = reported.trim();
    if reported.is_empty() { FALLBACK_CONTENT_TYPE.to_owned() } else { reported.to_owned() }
}

/// Read the whole file into memory.
///
/// # Errors
///
/// Returns the JS error text when the browser fails to read the file.
#[cfg(feature = "csr")]
pub async fn read_avatar(file: web_sys::File) -> Result<auth::types::AvatarUpload, String> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("{e:?}"))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(auth::types::AvatarUpload {
        file_name: file.name(),
        content_type: content_type_or_default(&file.type_()),
        bytes,
    })
}
