use super::*;
use auth::api::{DEFAULT_API_URL, PROFILE_PATH};

#[test]
fn config_from_missing_build_value_uses_default() {
    assert_eq!(config_from(None).base_url(), DEFAULT_API_URL);
}

#[test]
fn config_from_build_value_is_normalized() {
    let config = config_from(Some("https://api.studio.example/"));
    assert_eq!(config.endpoint(PROFILE_PATH), "https://api.studio.example/api/v1/profile/");
}

#[test]
fn http_api_exposes_its_config() {
    let api = HttpAuthApi::new(ApiConfig::new("https://a.example"));
    assert_eq!(api.config().base_url(), "https://a.example");
}

#[test]
fn not_in_browser_message_is_descriptive() {
    assert_eq!(NOT_IN_BROWSER, "not available outside the browser");
}
