use super::menu::MenuChoice;

/// Where the session is in its menu loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    MenuDisplayed,
    AwaitingChoice,
    Installing,
    Downloading,
    Updating,
    Exiting,
    /// Terminal, stepping from here is a no-op
    Exited,
}

impl SessionState {
    /// State entered after the user picks `choice`
    pub fn after_choice(choice: MenuChoice) -> Self {
        match choice {
            MenuChoice::InstallTools => SessionState::Installing,
            MenuChoice::Download => SessionState::Downloading,
            MenuChoice::UpdateTool => SessionState::Updating,
            MenuChoice::Exit => SessionState::Exiting,
            MenuChoice::Invalid => SessionState::MenuDisplayed,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Exited)
    }
}
