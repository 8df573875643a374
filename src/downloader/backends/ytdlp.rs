use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::ToolConfig;
use crate::downloader::errors::DownloadError;
use crate::downloader::models::{DownloadRequest, InvocationResult};
use crate::downloader::traits::ToolInvoker;
use crate::downloader::utils;

/// Invokes the yt-dlp binary with the request's stream policy
pub struct YtDlpInvoker {
    ytdlp_bin: PathBuf,
    search_dirs: Vec<PathBuf>,
}

impl YtDlpInvoker {
    pub fn new(config: &ToolConfig) -> Self {
        Self::with_program(config.ytdlp_program.clone())
    }

    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            ytdlp_bin: program.into(),
            search_dirs: utils::common_install_dirs(),
        }
    }

    /// Replace the install dirs searched before each run
    pub fn with_search_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.search_dirs = dirs;
        self
    }

    /// Build command arguments, URL always last after `--`
    pub fn build_args(request: &DownloadRequest) -> Vec<String> {
        let mut args = vec![
            "-S".to_string(),
            Self::sort_expression(request),
            "--merge-output-format".to_string(),
            request.output_container().to_string(),
        ];

        if request.skip_playlist_expansion() {
            args.push("--no-playlist".to_string());
        }

        // Input starting with `-` must reach yt-dlp as a URL, not an option
        args.push("--".to_string());
        args.push(request.raw_url().to_string());
        args
    }

    /// `-S` sort fields: video codecs in order, then audio codecs
    fn sort_expression(request: &DownloadRequest) -> String {
        request
            .video_codec_preference()
            .iter()
            .map(|codec| format!("vcodec:{}", codec))
            .chain(
                request
                    .audio_codec_preference()
                    .iter()
                    .map(|codec| format!("acodec:{}", codec)),
            )
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Program to run right now.
    ///
    /// yt-dlp may have been installed after startup (option 1), so an
    /// existing configured path wins, otherwise the install dirs and PATH are
    /// searched again before falling back to the configured value.
    async fn resolve_program(&self) -> PathBuf {
        if self.ytdlp_bin.components().count() > 1 && self.ytdlp_bin.is_file() {
            return self.ytdlp_bin.clone();
        }

        let name = self
            .ytdlp_bin
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "yt-dlp".to_string());

        match utils::locate_in(&self.search_dirs, &name).await {
            Some(path) => path,
            None => self.ytdlp_bin.clone(),
        }
    }
}

impl Default for YtDlpInvoker {
    fn default() -> Self {
        Self::new(&ToolConfig::default())
    }
}

#[async_trait]
impl ToolInvoker for YtDlpInvoker {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    async fn invoke(&self, request: DownloadRequest) -> Result<InvocationResult, DownloadError> {
        let program = self.resolve_program().await;
        let args = Self::build_args(&request);
        debug!(invoker = self.name(), program = %program.display(), ?args, "built yt-dlp arguments");
        utils::run_inherited(Path::new(&program), &args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::downloader::classifier::classify;
    use crate::downloader::request::build;

    fn request_for(url: &str) -> DownloadRequest {
        build(url, classify(url).is_playlist)
    }

    #[test]
    fn test_single_video_args() {
        let args = YtDlpInvoker::build_args(&request_for("https://x.test/watch?v=AAA"));
        assert_eq!(
            args,
            vec![
                "-S",
                "vcodec:h264,acodec:aac",
                "--merge-output-format",
                "mp4",
                "--",
                "https://x.test/watch?v=AAA",
            ]
        );
    }

    #[test]
    fn test_playlist_args_restrict_to_one_item() {
        let url = "https://x.test/watch?v=AAA&list=PLxyz";
        let args = YtDlpInvoker::build_args(&request_for(url));
        assert!(args.contains(&"--no-playlist".to_string()));
        assert_eq!(args.last().map(String::as_str), Some(url));
    }

    #[test]
    fn test_restriction_flag_iff_playlist() {
        let urls = [
            "https://x.test/watch?v=AAA",
            "https://x.test/watch?v=AAA&list=PLxyz",
            "https://x.test/list=abc",
            "",
            "garbage",
        ];
        for url in urls {
            let request = request_for(url);
            let has_flag = YtDlpInvoker::build_args(&request)
                .iter()
                .any(|a| a == "--no-playlist");
            assert_eq!(has_flag, request.is_playlist(), "{}", url);
        }
    }

    #[test]
    fn test_dash_prefixed_input_stays_positional() {
        for url in ["--version", "--exec=rm -rf /", "-U"] {
            let args = YtDlpInvoker::build_args(&request_for(url));
            let n = args.len();
            assert_eq!(args[n - 2], "--", "{}", url);
            assert_eq!(args[n - 1], url);
            // nothing user-supplied appears before the separator
            assert!(!args[..n - 2].iter().any(|a| a == url), "{}", url);
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_invoke_success_exit_code() {
        // `true` ignores its arguments and exits 0
        let invoker = YtDlpInvoker::with_program("true");
        let result = invoker.invoke(request_for("https://x.test/watch?v=AAA")).await.unwrap();
        assert!(result.succeeded());
        assert_eq!(result.exit_code(), 0);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_invoke_failure_exit_code() {
        let invoker = YtDlpInvoker::with_program("false");
        let result = invoker.invoke(request_for("https://x.test/watch?v=AAA")).await.unwrap();
        assert!(!result.succeeded());
        assert_eq!(result.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_invoke_missing_tool() {
        let invoker = YtDlpInvoker::with_program("/nonexistent/bin/vg-missing-ytdlp")
            .with_search_dirs(Vec::new());
        let err = invoker
            .invoke(request_for("https://x.test/watch?v=AAA"))
            .await
            .unwrap_err();
        assert!(matches!(err, DownloadError::ToolNotFound(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_invoke_finds_tool_installed_after_startup() {
        use std::os::unix::fs::PermissionsExt;

        let user_bin = tempfile::tempdir().unwrap();
        let invoker = YtDlpInvoker::with_program("vg-late-ytdlp")
            .with_search_dirs(vec![user_bin.path().to_path_buf()]);

        // Not there yet: the bare name cannot be started
        let err = invoker
            .invoke(request_for("https://x.test/watch?v=AAA"))
            .await
            .unwrap_err();
        assert!(matches!(err, DownloadError::ToolNotFound(_)));

        // Simulate `pip install --user` dropping the binary in place
        let script = user_bin.path().join("vg-late-ytdlp");
        std::fs::write(&script, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let result = invoker
            .invoke(request_for("https://x.test/watch?v=AAA"))
            .await
            .unwrap();
        assert!(result.succeeded());
    }
}
