// Seams between the session and the outside world

use async_trait::async_trait;

use super::errors::DownloadError;
use super::models::{DownloadRequest, InvocationResult};
use super::tools::{StepOutcome, ToolInfo};

/// Runs the external downloader for one request
#[async_trait]
pub trait ToolInvoker: Send + Sync {
    /// Name of the invoker (for logging)
    fn name(&self) -> &'static str;

    /// Run one download to completion and report its exit status
    async fn invoke(&self, request: DownloadRequest) -> Result<InvocationResult, DownloadError>;
}

/// Installs and updates the tools the invoker depends on
#[async_trait]
pub trait ToolMaintainer: Send + Sync {
    /// Install yt-dlp and its helpers, one outcome per step
    async fn install_tools(&self) -> Vec<StepOutcome>;

    /// Update yt-dlp in place
    async fn update_tool(&self) -> Result<Vec<StepOutcome>, DownloadError>;

    /// Current state of every managed tool
    async fn tools_status(&self) -> Vec<ToolInfo>;
}
