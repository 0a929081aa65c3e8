use super::*;

#[test]
fn endpoint_joins_origin_prefix_and_path() {
    let config = ApiConfig::new("https://api.example.com");
    assert_eq!(config.endpoint(START_PATH), "https://api.example.com/api/v1/auth/start");
    assert_eq!(config.endpoint(PROFILE_PATH), "https://api.example.com/api/v1/profile/");
}

#[test]
fn config_strips_trailing_slashes() {
    let config = ApiConfig::new("https://api.example.com//");
    assert_eq!(config.base_url(), "https://api.example.com");
}

#[test]
fn blank_config_uses_default_origin() {
    assert_eq!(ApiConfig::new("  ").base_url(), DEFAULT_API_URL);
    assert_eq!(ApiConfig::default().endpoint(SIGNIN_PATH), "http://127.0.0.1:8000/api/v1/auth/signin");
}

#[test]
fn bearer_formats_authorization_value() {
    assert_eq!(bearer("abc"), "Bearer abc");
}

#[test]
fn decode_json_parses_success_body() {
    let resp: AuthStartResponse = decode_json(200, true, r#"{"exists":true}"#).unwrap();
    assert!(resp.exists);
}

#[test]
fn decode_json_maps_failure_status_to_rejected() {
    let err = decode_json::<AuthStartResponse>(422, false, r#"{"detail":[{"msg":"bad email"}]}"#)
        .unwrap_err();
    assert_eq!(err, ApiError::Rejected { status: 422, detail: Some("bad email".to_owned()) });
}

#[test]
fn decode_json_reports_schema_mismatch() {
    let err = decode_json::<AuthStartResponse>(200, true, r#"{"nope":1}"#).unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn expect_success_ignores_body_on_success() {
    assert_eq!(expect_success(204, true, ""), Ok(()));
    assert_eq!(
        expect_success(404, false, r#"{"detail":"User not found"}"#),
        Err(ApiError::Rejected { status: 404, detail: Some("User not found".to_owned()) })
    );
}
