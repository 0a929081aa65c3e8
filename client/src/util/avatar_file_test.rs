use super::*;

#[test]
fn accept_attribute_lists_image_types() {
    assert_eq!(accept_attribute(), "image/png, image/jpeg, image/gif");
}

#[test]
fn content_type_falls_back_when_blank() {
    assert_eq!(content_type_or_default(""), FALLBACK_CONTENT_TYPE);
    assert_eq!(content_type_or_default("  "), FALLBACK_CONTENT_TYPE);
    assert_eq!(content_type_or_default("image/png"), "image/png");
}
