use super::error::{StateError, StateResult};
use super::{ShellEvent, ShellState, StateTransition};

#[derive(Debug)]
pub struct StateMachine {
    state: ShellState,
    transition_history: Vec<StateTransition>,
}

impl StateMachine {
    pub fn new() -> Self {
        Self {
            state: ShellState::default(),
            transition_history: Vec::new(),
        }
    }

    pub fn state(&self) -> ShellState {
        self.state
    }

    pub fn can_transition(&self, event: ShellEvent) -> bool {
        self.next_state(event).is_some()
    }

    pub fn next_state(&self, event: ShellEvent) -> Option<ShellState> {
        use ShellEvent::*;
        match (self.state, event) {
            (ShellState::Closed, _) => None,
            (_, ShowSetup) => Some(ShellState::ShowingSetup),
            (_, ShowServer) => Some(ShellState::ShowingServer),
            (ShellState::ShowingSetup | ShellState::ShowingServer, Close) => {
                Some(ShellState::Closed)
            }
            (ShellState::Uninitialized, Close) => None,
        }
    }

    pub fn transition(&mut self, event: ShellEvent) -> StateResult<ShellState> {
        tracing::debug!(from = ?self.state, event = ?event, "request state transition");
        let next = self.next_state(event).ok_or_else(|| {
            let from = self.state;
            tracing::warn!(from = ?from, event = ?event, "invalid state transition requested");
            StateError::InvalidStateTransition { from, event }
        })?;

        let record = StateTransition::new(Some(self.state), event, next);
        self.state = next;
        self.transition_history.push(record);

        Ok(self.state)
    }
}

#[cfg(test)]
impl StateMachine {
    fn history(&self) -> &[StateTransition] {
        &self.transition_history
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ShellState::{:?}", self.state)
    }
}
