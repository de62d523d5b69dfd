use mediaqr_core::{
    ALLOWED_CONTENT_TYPES, DEFAULT_MAX_FILE_SIZE, MAX_FILENAME_LENGTH, UploadPolicy,
    is_allowed_content_type,
};
use mediaqr_error::ValidationErrorKind;

#[test]
fn default_ceiling_is_fifty_mebibytes() {
    assert_eq!(UploadPolicy::default().max_file_size(), DEFAULT_MAX_FILE_SIZE);
    assert_eq!(DEFAULT_MAX_FILE_SIZE, 52_428_800);
}

#[test]
fn allow_list_covers_only_media_families() {
    for content_type in ALLOWED_CONTENT_TYPES {
        let (family, _) = content_type.split_once('/').unwrap();
        assert!(matches!(family, "audio" | "video" | "image"), "{content_type}");
    }
    assert!(is_allowed_content_type("image/png"));
    assert!(is_allowed_content_type("audio/x-m4a"));
    assert!(!is_allowed_content_type("application/pdf"));
    assert!(!is_allowed_content_type("text/html"));
    assert!(!is_allowed_content_type("IMAGE/PNG"));
    assert!(!is_allowed_content_type("image/tiff"));
}

#[test]
fn payload_at_ceiling_passes() {
    let policy = UploadPolicy::new(10);
    assert!(policy.validate("image/png", 10).is_ok());
}

#[test]
fn payload_one_over_ceiling_reports_both_sizes() {
    let policy = UploadPolicy::new(10);
    let err = policy.validate("image/png", 11).unwrap_err();
    assert_eq!(
        err.kind,
        ValidationErrorKind::PayloadTooLarge { actual: 11, max: 10 }
    );
    assert!(err.is_too_large());
}

#[test]
fn empty_payload_is_distinct_from_too_large() {
    let policy = UploadPolicy::new(10);
    let err = policy.validate("audio/mpeg", 0).unwrap_err();
    assert_eq!(err.kind, ValidationErrorKind::EmptyPayload);
    assert!(!err.is_too_large());
}

#[test]
fn content_type_is_checked_first() {
    let policy = UploadPolicy::new(10);
    let err = policy.validate("application/zip", 0).unwrap_err();
    assert_eq!(
        err.kind,
        ValidationErrorKind::DisallowedContentType("application/zip".to_string())
    );
}

#[test]
fn filename_length_is_counted_in_characters() {
    let policy = UploadPolicy::default();
    assert!(policy.validate_filename(None).is_ok());
    assert!(policy.validate_filename(Some(&"a".repeat(MAX_FILENAME_LENGTH))).is_ok());
    // 255 two-byte characters fit even though they exceed 255 bytes.
    assert!(policy.validate_filename(Some(&"é".repeat(MAX_FILENAME_LENGTH))).is_ok());
}

#[test]
fn overlong_filename_reports_length() {
    let policy = UploadPolicy::default();
    let err = policy
        .validate_filename(Some(&"a".repeat(300)))
        .unwrap_err();
    assert_eq!(
        err.kind,
        ValidationErrorKind::FilenameTooLong {
            actual: 300,
            max: MAX_FILENAME_LENGTH
        }
    );
    assert!(!err.is_too_large());
}

#[test]
fn filename_with_control_characters_is_rejected() {
    let policy = UploadPolicy::default();
    for name in ["clip\0.png", "line\nbreak.png", "\u{7f}"] {
        let err = policy.validate_filename(Some(name)).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidFilename, "{name:?}");
    }
}
