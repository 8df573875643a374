// Numbered menu shown at the top of every loop iteration

use std::fmt;

/// One parsed line of menu input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    InstallTools,
    Download,
    UpdateTool,
    Exit,
    Invalid,
}

impl MenuChoice {
    /// Options in display order
    pub const OPTIONS: [MenuChoice; 4] = [
        MenuChoice::InstallTools,
        MenuChoice::Download,
        MenuChoice::UpdateTool,
        MenuChoice::Exit,
    ];

    /// Parse a raw input line. Only the exact option numbers are accepted.
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => MenuChoice::InstallTools,
            "2" => MenuChoice::Download,
            "3" => MenuChoice::UpdateTool,
            "4" => MenuChoice::Exit,
            _ => MenuChoice::Invalid,
        }
    }

    pub fn number(&self) -> Option<u8> {
        match self {
            MenuChoice::InstallTools => Some(1),
            MenuChoice::Download => Some(2),
            MenuChoice::UpdateTool => Some(3),
            MenuChoice::Exit => Some(4),
            MenuChoice::Invalid => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::InstallTools => "Install tools (yt-dlp, ffmpeg)",
            MenuChoice::Download => "Download a video",
            MenuChoice::UpdateTool => "Update yt-dlp",
            MenuChoice::Exit => "Exit",
            MenuChoice::Invalid => "Invalid choice",
        }
    }
}

/// Rendered menu block
pub struct Menu;

impl fmt::Display for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "==== Video Grabber ====")?;
        for choice in MenuChoice::OPTIONS {
            if let Some(n) = choice.number() {
                writeln!(f, "{}. {}", n, choice.label())?;
            }
        }
        Ok(())
    }
}
