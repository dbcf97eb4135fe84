/// Lifecycle of the main window's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShellState {
    #[default]
    Uninitialized,
    ShowingSetup,
    ShowingServer,
    Closed,
}

impl ShellState {
    pub fn is_live(self) -> bool {
        matches!(self, Self::ShowingSetup | Self::ShowingServer)
    }
}
