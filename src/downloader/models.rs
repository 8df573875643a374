// Common data models for downloader

use std::process::ExitStatus;

/// Video codecs requested from the tool, highest priority first
pub const VIDEO_CODEC_PREFERENCE: &[&str] = &["h264"];

/// Audio codecs requested from the tool, highest priority first
pub const AUDIO_CODEC_PREFERENCE: &[&str] = &["aac"];

/// Container the fetched streams are merged into
pub const OUTPUT_CONTAINER: &str = "mp4";

/// A single, fully resolved download.
///
/// Built by [`crate::downloader::request::build`] and consumed once by a
/// [`crate::downloader::ToolInvoker`]. Fields are read-only after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    raw_url: String,
    is_playlist: bool,
    skip_playlist_expansion: bool,
    video_codec_preference: Vec<String>,
    audio_codec_preference: Vec<String>,
    output_container: String,
}

impl DownloadRequest {
    pub(crate) fn new(raw_url: String, is_playlist: bool) -> Self {
        Self {
            raw_url,
            is_playlist,
            // Only ever the referenced item, never the whole list
            skip_playlist_expansion: is_playlist,
            video_codec_preference: VIDEO_CODEC_PREFERENCE.iter().map(|c| c.to_string()).collect(),
            audio_codec_preference: AUDIO_CODEC_PREFERENCE.iter().map(|c| c.to_string()).collect(),
            output_container: OUTPUT_CONTAINER.to_string(),
        }
    }

    pub fn raw_url(&self) -> &str {
        &self.raw_url
    }

    pub fn is_playlist(&self) -> bool {
        self.is_playlist
    }

    pub fn skip_playlist_expansion(&self) -> bool {
        self.skip_playlist_expansion
    }

    pub fn video_codec_preference(&self) -> &[String] {
        &self.video_codec_preference
    }

    pub fn audio_codec_preference(&self) -> &[String] {
        &self.audio_codec_preference
    }

    pub fn output_container(&self) -> &str {
        &self.output_container
    }
}

/// Outcome of one subprocess run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvocationResult {
    exit_code: i32,
    succeeded: bool,
}

impl InvocationResult {
    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn from_exit_code(exit_code: i32) -> Self {
        Self {
            exit_code,
            succeeded: exit_code == 0,
        }
    }

    /// Killed-by-signal has no code and counts as a failure (-1)
    pub fn from_status(status: ExitStatus) -> Self {
        Self::from_exit_code(status.code().unwrap_or(-1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_exit_succeeds() {
        let result = InvocationResult::from_exit_code(0);
        assert!(result.succeeded());
        assert_eq!(result.exit_code(), 0);
    }

    #[test]
    fn test_nonzero_exit_fails() {
        for code in [1, 2, 101, -1] {
            assert!(!InvocationResult::from_exit_code(code).succeeded());
        }
    }

    #[test]
    fn test_success_always_matches_exit_code() {
        for code in -2..=3 {
            let result = InvocationResult::from_exit_code(code);
            assert_eq!(result.succeeded(), result.exit_code() == 0);
            assert_eq!(result.exit_code(), code);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_from_status_keeps_code() {
        use std::os::unix::process::ExitStatusExt;

        // raw wait status: exit code lives in the high byte
        let status = ExitStatus::from_raw(3 << 8);
        let result = InvocationResult::from_status(status);
        assert_eq!(result.exit_code(), 3);
        assert!(!result.succeeded());

        // killed by SIGKILL, no exit code
        let killed = InvocationResult::from_status(ExitStatus::from_raw(9));
        assert_eq!(killed.exit_code(), -1);
        assert!(!killed.succeeded());
    }

    #[test]
    fn test_request_defaults_follow_policy() {
        let request = DownloadRequest::new("https://x.test/watch?v=AAA".to_string(), false);
        assert_eq!(request.video_codec_preference(), ["h264".to_string()]);
        assert_eq!(request.audio_codec_preference(), ["aac".to_string()]);
        assert_eq!(request.output_container(), "mp4");
    }
}
