// URL classification
//
// Plain substring check, no URL parsing. A `list=` outside the query string
// (path segment, fragment) still counts as a playlist.

/// Marker that identifies a playlist reference
const PLAYLIST_MARKER: &str = "list=";

/// Result of classifying a user-supplied URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlClass {
    pub is_playlist: bool,
}

/// Classify a URL. Never fails, malformed input is left for yt-dlp to reject.
pub fn classify(url: &str) -> UrlClass {
    UrlClass {
        is_playlist: url.contains(PLAYLIST_MARKER),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_video_url() {
        assert!(!classify("https://x.test/watch?v=AAA").is_playlist);
    }

    #[test]
    fn test_video_inside_playlist() {
        assert!(classify("https://x.test/watch?v=AAA&list=PLxyz").is_playlist);
    }

    #[test]
    fn test_playlist_only_url() {
        assert!(classify("https://www.youtube.com/playlist?list=PL123").is_playlist);
    }

    #[test]
    fn test_empty_string() {
        assert!(!classify("").is_playlist);
    }

    #[test]
    fn test_marker_outside_query_still_counts() {
        assert!(classify("https://x.test/list=abc/video").is_playlist);
        assert!(classify("https://x.test/watch?v=AAA#list=1").is_playlist);
    }

    #[test]
    fn test_similar_words_without_marker() {
        assert!(!classify("https://x.test/playlist?id=1").is_playlist);
        assert!(!classify("https://x.test/watch?v=AAA&list").is_playlist);
        assert!(!classify("not a url at all").is_playlist);
    }

    #[test]
    fn test_marker_anywhere_property() {
        let prefixes = ["", "https://x.test/", "https://x.test/watch?v=A&", "garbage "];
        let suffixes = ["", "PL1", "&index=3", " trailing"];
        for prefix in prefixes {
            for suffix in suffixes {
                let with = format!("{}list={}", prefix, suffix);
                let without = format!("{}{}", prefix, suffix);
                assert!(classify(&with).is_playlist, "{}", with);
                assert!(!classify(&without).is_playlist, "{}", without);
            }
        }
    }
}
