//! Candidate selection over provider results.

use super::{MediaKind, SearchResult};

/// Marker for inline-encoded payloads (`data:image/png;base64,...`).
const INLINE_PAYLOAD_MARKER: &str = "base64,";

/// Check whether a candidate URL may be handed to a renderer.
///
/// Rejects empty strings, anything not starting with `http://` or `https://`,
/// and inline base64 payloads.
pub fn is_acceptable_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }
    if !has_scheme(url, "http://") && !has_scheme(url, "https://") {
        return false;
    }
    !url.contains(INLINE_PAYLOAD_MARKER)
}

fn has_scheme(url: &str, scheme: &str) -> bool {
    url.as_bytes()
        .get(..scheme.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme.as_bytes()))
}

/// Select the first acceptable URL, scanning results in provider order.
///
/// Each result contributes a single candidate: its first non-empty field by
/// the kind's priority. A rejected candidate moves the scan to the next
/// result; lower-priority fields of the same result are not retried.
pub fn select_url(results: &[SearchResult], kind: MediaKind) -> Option<String> {
    results.iter().find_map(|result| {
        let candidate = kind.field_priority().iter().find_map(|name| result.field(name))?;
        is_acceptable_url(candidate).then(|| candidate.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acceptable_urls() {
        assert!(is_acceptable_url("https://img.example/t.jpg"));
        assert!(is_acceptable_url("http://img.example/t.jpg"));
        assert!(is_acceptable_url("HTTPS://img.example/t.jpg"));
    }

    #[test]
    fn test_rejected_urls() {
        assert!(!is_acceptable_url(""));
        assert!(!is_acceptable_url("ftp://img.example/t.jpg"));
        assert!(!is_acceptable_url("//img.example/t.jpg"));
        assert!(!is_acceptable_url("data:image/png;base64,iVBORw0"));
        assert!(!is_acceptable_url("https://img.example/inline?d=base64,abcd"));
        assert!(!is_acceptable_url("htt"));
    }

    #[test]
    fn test_non_ascii_prefix_does_not_panic() {
        assert!(!is_acceptable_url("ñandú://x"));
        assert!(!is_acceptable_url("🧘"));
    }

    #[test]
    fn test_image_prefers_primary_field() {
        let results = vec![
            SearchResult::new()
                .with("image", "https://img.example/full.jpg")
                .with("thumbnail", "https://img.example/thumb.jpg"),
        ];
        assert_eq!(select_url(&results, MediaKind::Image).as_deref(), Some("https://img.example/full.jpg"));
    }

    #[test]
    fn test_image_falls_back_to_thumbnail() {
        let results = vec![SearchResult::new().with("image", "").with("thumbnail", "https://img.example/thumb.jpg")];
        assert_eq!(select_url(&results, MediaKind::Image).as_deref(), Some("https://img.example/thumb.jpg"));
    }

    #[test]
    fn test_skips_base64_and_keeps_order() {
        let results = vec![
            SearchResult::new().with("image", "data:base64,abcd"),
            SearchResult::new().with("thumbnail", "https://img.example/t.jpg"),
            SearchResult::new().with("image", "https://img.example/later.jpg"),
        ];
        assert_eq!(select_url(&results, MediaKind::Image).as_deref(), Some("https://img.example/t.jpg"));
    }

    #[test]
    fn test_rejected_primary_skips_whole_result() {
        let results = vec![
            SearchResult::new()
                .with("image", "data:image/png;base64,xyz")
                .with("thumbnail", "https://img.example/same-record.jpg"),
            SearchResult::new().with("image", "https://img.example/next.jpg"),
        ];
        assert_eq!(select_url(&results, MediaKind::Image).as_deref(), Some("https://img.example/next.jpg"));
    }

    #[test]
    fn test_video_priority() {
        let results = vec![
            SearchResult::new().with("title", "no urls here"),
            SearchResult::new()
                .with("href", "https://video.example/embed/1")
                .with("thumbnail", "https://video.example/1.jpg"),
        ];
        assert_eq!(select_url(&results, MediaKind::Video).as_deref(), Some("https://video.example/embed/1"));

        let results = vec![
            SearchResult::new()
                .with("content", "https://video.example/watch?v=2")
                .with("href", "https://video.example/embed/2"),
        ];
        assert_eq!(select_url(&results, MediaKind::Video).as_deref(), Some("https://video.example/watch?v=2"));
    }

    #[test]
    fn test_video_ignores_image_field() {
        let results = vec![SearchResult::new().with("image", "https://img.example/a.jpg")];
        assert_eq!(select_url(&results, MediaKind::Video), None);
    }

    #[test]
    fn test_all_candidates_rejected() {
        let results = vec![
            SearchResult::new().with("image", ""),
            SearchResult::new().with("image", "ftp://img.example/a.jpg"),
            SearchResult::new().with("thumbnail", "data:image/jpeg;base64,00"),
        ];
        assert_eq!(select_url(&results, MediaKind::Image), None);
    }

    #[test]
    fn test_empty_results() {
        assert_eq!(select_url(&[], MediaKind::Image), None);
        assert_eq!(select_url(&[], MediaKind::Video), None);
    }
}
