//! Property-based tests for the multipart decoder
//!
//! Arbitrary payloads survive decoding byte for byte, and arbitrary input
//! never panics.

use bytes::Bytes;
use proptest::prelude::*;
use huddle::backend::uploads::classify::classify_filename;
use huddle::backend::uploads::multipart::parse_multipart;
use huddle::shared::MessageKind;
use crate::common::{MultipartBuilder, TEST_BOUNDARY};

proptest! {
    #[test]
    fn test_file_payload_is_preserved(
        payload in proptest::collection::vec(any::<u8>(), 0..2048),
        username in "[A-Za-z0-9 ]{0,40}",
    ) {
        // A payload containing the delimiter would legitimately end the part
        let delimiter = format!("\n--{}", TEST_BOUNDARY);
        prop_assume!(!payload.windows(delimiter.len()).any(|w| w == delimiter.as_bytes()));

        let body = MultipartBuilder::new()
            .field("username", &username)
            .file("file", "blob.bin", &payload)
            .build();

        let parsed = parse_multipart(&Bytes::from(body), TEST_BOUNDARY);

        prop_assert_eq!(parsed.skipped, 0);
        prop_assert_eq!(parsed.field_text("username"), Some(username));
        let files: Vec<_> = parsed.files().collect();
        prop_assert_eq!(files.len(), 1);
        prop_assert_eq!(&files[0].data[..], &payload[..]);
    }

    #[test]
    fn test_arbitrary_bytes_never_panic(body in proptest::collection::vec(any::<u8>(), 0..1024)) {
        let parsed = parse_multipart(&Bytes::from(body), TEST_BOUNDARY);
        prop_assert!(parsed.parts.len() + parsed.skipped <= 1024);
    }

    #[test]
    fn test_classification_ignores_case(
        stem in "[a-z]{1,12}",
        ext in prop::sample::select(vec!["jpg", "png", "webp", "mp4", "mkv", "mp3", "ogg", "bin", "pdf"]),
        upper in any::<bool>(),
    ) {
        let ext = if upper { ext.to_uppercase() } else { ext.to_string() };
        let kind = classify_filename(&format!("{}.{}", stem, ext));
        let expected = match ext.to_lowercase().as_str() {
            "jpg" | "png" | "webp" => MessageKind::Image,
            "mp4" | "mkv" => MessageKind::Video,
            "mp3" | "ogg" => MessageKind::Audio,
            _ => MessageKind::File,
        };
        prop_assert_eq!(kind, expected);
    }
}
