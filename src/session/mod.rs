// Interactive session controller
//
// Explicit state machine: every transition takes the current `SessionState`
// and returns the next one. `run` loops until `Exited`.

pub mod menu;
pub mod state;

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use crate::downloader::classifier::classify;
use crate::downloader::errors::DownloadError;
use crate::downloader::request;
use crate::downloader::traits::{ToolInvoker, ToolMaintainer};
use crate::error::SessionError;

pub use menu::{Menu, MenuChoice};
pub use state::SessionState;

const UPDATE_HINT: &str = "If downloads keep failing, try option 3 to update yt-dlp.";
const INSTALL_HINT: &str = "yt-dlp could not be started. Use option 1 to install the tools.";

pub struct Session<R, W> {
    input: R,
    output: W,
    invoker: Box<dyn ToolInvoker>,
    maintainer: Box<dyn ToolMaintainer>,
}

impl<R, W> Session<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(
        input: R,
        output: W,
        invoker: Box<dyn ToolInvoker>,
        maintainer: Box<dyn ToolMaintainer>,
    ) -> Self {
        Self {
            input,
            output,
            invoker,
            maintainer,
        }
    }

    /// Drive the menu loop until the user exits (or input ends)
    pub async fn run(&mut self) -> Result<(), SessionError> {
        let mut state = SessionState::MenuDisplayed;
        while !state.is_terminal() {
            state = self.step(state).await?;
        }
        Ok(())
    }

    /// Perform one transition
    pub async fn step(&mut self, state: SessionState) -> Result<SessionState, SessionError> {
        debug!(?state, "session step");
        let next = match state {
            SessionState::MenuDisplayed => {
                write!(self.output, "{}", Menu)?;
                self.prompt("Select an option: ")?;
                SessionState::AwaitingChoice
            }
            SessionState::AwaitingChoice => match self.read_line().await? {
                // End of input behaves like choosing Exit
                None => SessionState::Exiting,
                Some(line) => {
                    let choice = MenuChoice::parse(&line);
                    if choice == MenuChoice::Invalid {
                        writeln!(
                            self.output,
                            "Invalid choice {:?}. Please enter a number from 1 to 4.",
                            line.trim()
                        )?;
                    }
                    SessionState::after_choice(choice)
                }
            },
            SessionState::Downloading => self.download().await?,
            SessionState::Installing => {
                self.install().await?;
                SessionState::MenuDisplayed
            }
            SessionState::Updating => {
                self.update().await?;
                SessionState::MenuDisplayed
            }
            SessionState::Exiting => {
                writeln!(self.output, "Goodbye!")?;
                self.output.flush()?;
                SessionState::Exited
            }
            SessionState::Exited => SessionState::Exited,
        };
        Ok(next)
    }

    async fn download(&mut self) -> Result<SessionState, SessionError> {
        self.prompt("Enter the video URL: ")?;
        let url = match self.read_line().await? {
            None => return Ok(SessionState::Exiting),
            Some(line) => line.trim().to_string(),
        };

        if url.is_empty() {
            writeln!(self.output, "No URL entered.")?;
            return Ok(SessionState::MenuDisplayed);
        }

        let class = classify(&url);
        if class.is_playlist {
            writeln!(
                self.output,
                "Playlist link detected, only the selected video will be downloaded."
            )?;
        }
        let download = request::build(&url, class.is_playlist);

        // yt-dlp shares the terminal, so everything we wrote must land first
        self.output.flush()?;
        info!(invoker = self.invoker.name(), url = %url, playlist = class.is_playlist, "starting download");

        match self.invoker.invoke(download).await {
            Ok(result) if result.succeeded() => {
                writeln!(self.output, "Download complete.")?;
            }
            Ok(result) => {
                writeln!(self.output, "Download failed (exit code {}).", result.exit_code())?;
                writeln!(self.output, "{}", UPDATE_HINT)?;
            }
            Err(e @ DownloadError::ToolNotFound(_)) => {
                writeln!(self.output, "Download failed: {}", e)?;
                writeln!(self.output, "{}", INSTALL_HINT)?;
            }
            Err(e) => {
                writeln!(self.output, "Download failed: {}", e)?;
                writeln!(self.output, "{}", UPDATE_HINT)?;
            }
        }

        Ok(SessionState::MenuDisplayed)
    }

    async fn install(&mut self) -> Result<(), SessionError> {
        writeln!(self.output, "Installing tools...")?;
        self.output.flush()?;

        let outcomes = self.maintainer.install_tools().await;
        for outcome in &outcomes {
            writeln!(self.output, "{}", outcome)?;
        }

        if outcomes.iter().all(|o| o.passed()) {
            writeln!(self.output, "All tools installed.")?;
        } else {
            writeln!(self.output, "Some steps did not complete, see above.")?;
        }
        self.print_tools_status().await
    }

    async fn update(&mut self) -> Result<(), SessionError> {
        writeln!(self.output, "Updating yt-dlp...")?;
        self.output.flush()?;

        match self.maintainer.update_tool().await {
            Ok(outcomes) => {
                for outcome in &outcomes {
                    writeln!(self.output, "{}", outcome)?;
                }
                if outcomes.iter().all(|o| o.passed()) {
                    writeln!(self.output, "yt-dlp is up to date.")?;
                } else {
                    writeln!(self.output, "Update failed.")?;
                }
                self.print_tools_status().await
            }
            Err(e) => {
                writeln!(self.output, "Update failed: {}", e)?;
                Ok(())
            }
        }
    }

    async fn print_tools_status(&mut self) -> Result<(), SessionError> {
        let status = self.maintainer.tools_status().await;
        writeln!(self.output, "Tool status:")?;
        for info in status {
            writeln!(self.output, "  {}", info)?;
        }
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<(), SessionError> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }

    /// Read one line, `None` at end of input
    async fn read_line(&mut self) -> Result<Option<String>, SessionError> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line).await?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
