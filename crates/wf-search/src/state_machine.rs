use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// InvocationState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationState {
    Idle,
    Dispatched,
    Running,
    Completed,
}

impl fmt::Display for InvocationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InvocationState::Idle => "Idle",
            InvocationState::Dispatched => "Dispatched",
            InvocationState::Running => "Running",
            InvocationState::Completed => "Completed",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// InvocationEvent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationEvent {
    Trigger,
    WorkerStarted,
    Finished,
    Reset,
}

impl fmt::Display for InvocationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InvocationEvent::Trigger => "Trigger",
            InvocationEvent::WorkerStarted => "WorkerStarted",
            InvocationEvent::Finished => "Finished",
            InvocationEvent::Reset => "Reset",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors that can occur during invocation state transitions.
///
/// The machine enforces the single path an invocation may take
/// (Idle → Dispatched → Running → Completed → Idle); anything else, most
/// importantly a second trigger while one invocation is in flight, is
/// rejected with this error.
#[derive(Debug, thiserror::Error)]
pub enum StateMachineError {
    /// An invalid state transition was attempted. The error carries the
    /// current state and the event that could not be applied.
    #[error("invalid transition: cannot apply {event} in state {state}")]
    InvalidTransition {
        state: InvocationState,
        event: InvocationEvent,
    },
}

// ---------------------------------------------------------------------------
// InvocationStateMachine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct InvocationStateMachine {
    current: InvocationState,
    history: Vec<(InvocationState, InvocationEvent, InvocationState)>,
}

impl InvocationStateMachine {
    /// Create a new state machine starting in `Idle`.
    pub fn new() -> Self {
        Self {
            current: InvocationState::Idle,
            history: Vec::new(),
        }
    }

    /// Return the current state.
    pub fn state(&self) -> InvocationState {
        self.current
    }

    /// `true` while an invocation is anywhere between trigger and reset.
    pub fn is_busy(&self) -> bool {
        self.current != InvocationState::Idle
    }

    /// Return the full transition history.
    pub fn history(&self) -> &[(InvocationState, InvocationEvent, InvocationState)] {
        &self.history
    }

    /// Attempt a state transition driven by `event`.
    ///
    /// Valid transitions:
    /// - Idle       + Trigger       -> Dispatched
    /// - Dispatched + WorkerStarted -> Running
    /// - Running    + Finished      -> Completed
    /// - Completed  + Reset         -> Idle
    pub fn transition(
        &mut self,
        event: InvocationEvent,
    ) -> Result<InvocationState, StateMachineError> {
        let next = match (self.current, event) {
            (InvocationState::Idle, InvocationEvent::Trigger) => InvocationState::Dispatched,
            (InvocationState::Dispatched, InvocationEvent::WorkerStarted) => {
                InvocationState::Running
            }
            (InvocationState::Running, InvocationEvent::Finished) => InvocationState::Completed,
            (InvocationState::Completed, InvocationEvent::Reset) => InvocationState::Idle,
            _ => {
                return Err(StateMachineError::InvalidTransition {
                    state: self.current,
                    event,
                });
            }
        };

        let from = self.current;
        self.current = next;
        self.history.push((from, event, next));
        tracing::debug!(from = %from, event = %event, to = %next, "invocation state transition");
        Ok(next)
    }

    /// Returns `true` if the given event is valid in the current state.
    pub fn can_transition(&self, event: InvocationEvent) -> bool {
        matches!(
            (self.current, event),
            (InvocationState::Idle, InvocationEvent::Trigger)
                | (InvocationState::Dispatched, InvocationEvent::WorkerStarted)
                | (InvocationState::Running, InvocationEvent::Finished)
                | (InvocationState::Completed, InvocationEvent::Reset)
        )
    }
}

impl Default for InvocationStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
