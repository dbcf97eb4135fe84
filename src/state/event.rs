use super::model::ShellState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellEvent {
    ShowSetup,
    ShowServer,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub from: Option<ShellState>,
    pub event: ShellEvent,
    pub to: ShellState,
}

impl StateTransition {
    pub const fn new(from: Option<ShellState>, event: ShellEvent, to: ShellState) -> Self {
        Self { from, event, to }
    }
}
