// Tool configuration
//
// Built in code only: the program takes no flags, reads no environment
// variables and keeps no config file.

use std::path::PathBuf;

use tracing::debug;

use crate::downloader::utils;

/// Programs the session shells out to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    /// yt-dlp binary used for downloads
    pub ytdlp_program: PathBuf,
    /// Interpreter used for `-m pip` installs
    pub python_program: String,
    /// Needed by yt-dlp to merge video and audio
    pub ffmpeg_program: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            ytdlp_program: PathBuf::from(utils::executable_name("yt-dlp")),
            python_program: default_python().to_string(),
            ffmpeg_program: "ffmpeg".to_string(),
        }
    }
}

impl ToolConfig {
    /// Resolve yt-dlp on this machine, falling back to the bare name
    pub async fn detect() -> Self {
        let config = Self::default();
        match utils::locate("yt-dlp").await {
            Some(path) => {
                debug!(path = %path.display(), "using detected yt-dlp");
                config.with_ytdlp_program(path)
            }
            None => config,
        }
    }

    pub fn with_ytdlp_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.ytdlp_program = program.into();
        self
    }

    pub fn with_python_program(mut self, program: impl Into<String>) -> Self {
        self.python_program = program.into();
        self
    }

    pub fn with_ffmpeg_program(mut self, program: impl Into<String>) -> Self {
        self.ffmpeg_program = program.into();
        self
    }
}

fn default_python() -> &'static str {
    if cfg!(target_os = "windows") {
        "python"
    } else {
        "python3"
    }
}
