pub mod config;
pub mod downloader;
pub mod error;
pub mod logging;
pub mod session;

use tokio::io::BufReader;
use tracing::info;

use config::ToolConfig;
use downloader::{ToolManager, YtDlpInvoker};
use error::AppError;
use session::Session;

/// Start the interactive menu on the current terminal
pub fn run() -> Result<(), AppError> {
    logging::init_logging();

    // One user, one subprocess at a time
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(AppError::Runtime)?;

    runtime.block_on(async {
        let config = ToolConfig::detect().await;
        info!(ytdlp = %config.ytdlp_program.display(), "session starting");

        let mut session = Session::new(
            BufReader::new(tokio::io::stdin()),
            std::io::stdout(),
            Box::new(YtDlpInvoker::new(&config)),
            Box::new(ToolManager::new(config)),
        );
        session.run().await?;
        Ok::<_, AppError>(())
    })
}
