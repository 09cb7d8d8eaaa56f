use wf_search::state_machine::{InvocationEvent, InvocationState, InvocationStateMachine};

#[test]
fn valid_idle_to_dispatched_to_running() {
    let mut sm = InvocationStateMachine::new();
    assert_eq!(sm.state(), InvocationState::Idle);

    let s = sm.transition(InvocationEvent::Trigger).unwrap();
    assert_eq!(s, InvocationState::Dispatched);
    assert_eq!(sm.state(), InvocationState::Dispatched);

    let s = sm.transition(InvocationEvent::WorkerStarted).unwrap();
    assert_eq!(s, InvocationState::Running);
    assert_eq!(sm.state(), InvocationState::Running);
}

#[test]
fn invalid_idle_to_running() {
    let mut sm = InvocationStateMachine::new();
    let result = sm.transition(InvocationEvent::WorkerStarted);
    assert!(result.is_err());
    // State should remain Idle after a rejected transition.
    assert_eq!(sm.state(), InvocationState::Idle);
}

#[test]
fn full_cycle_returns_to_idle() {
    let mut sm = InvocationStateMachine::new();

    sm.transition(InvocationEvent::Trigger).unwrap(); // Idle -> Dispatched
    sm.transition(InvocationEvent::WorkerStarted).unwrap(); // Dispatched -> Running
    sm.transition(InvocationEvent::Finished).unwrap(); // Running -> Completed
    let s = sm.transition(InvocationEvent::Reset).unwrap(); // Completed -> Idle
    assert_eq!(s, InvocationState::Idle);

    assert_eq!(sm.history().len(), 4);
}

#[test]
fn trigger_is_rejected_until_the_cycle_completes() {
    let mut sm = InvocationStateMachine::new();

    sm.transition(InvocationEvent::Trigger).unwrap();
    assert!(sm.transition(InvocationEvent::Trigger).is_err());
    assert_eq!(sm.state(), InvocationState::Dispatched);

    sm.transition(InvocationEvent::WorkerStarted).unwrap();
    assert!(sm.transition(InvocationEvent::Trigger).is_err());
    assert_eq!(sm.state(), InvocationState::Running);

    sm.transition(InvocationEvent::Finished).unwrap();
    assert!(sm.transition(InvocationEvent::Trigger).is_err());

    sm.transition(InvocationEvent::Reset).unwrap();
    assert!(sm.transition(InvocationEvent::Trigger).is_ok());
}

#[test]
fn can_transition_checks() {
    let sm = InvocationStateMachine::new();
    assert!(sm.can_transition(InvocationEvent::Trigger));
    assert!(!sm.can_transition(InvocationEvent::WorkerStarted));
    assert!(!sm.can_transition(InvocationEvent::Finished));
    assert!(!sm.can_transition(InvocationEvent::Reset));
}

#[test]
fn is_busy_everywhere_except_idle() {
    let mut sm = InvocationStateMachine::new();
    assert!(!sm.is_busy());

    sm.transition(InvocationEvent::Trigger).unwrap();
    assert!(sm.is_busy());
    sm.transition(InvocationEvent::WorkerStarted).unwrap();
    assert!(sm.is_busy());
    sm.transition(InvocationEvent::Finished).unwrap();
    assert!(sm.is_busy());
    sm.transition(InvocationEvent::Reset).unwrap();
    assert!(!sm.is_busy());
}

#[test]
fn history_records_each_transition() {
    let mut sm = InvocationStateMachine::new();
    sm.transition(InvocationEvent::Trigger).unwrap();
    sm.transition(InvocationEvent::WorkerStarted).unwrap();

    let history = sm.history();
    assert_eq!(
        history,
        [
            (
                InvocationState::Idle,
                InvocationEvent::Trigger,
                InvocationState::Dispatched
            ),
            (
                InvocationState::Dispatched,
                InvocationEvent::WorkerStarted,
                InvocationState::Running
            ),
        ]
    );
}

#[test]
fn reset_is_only_valid_from_completed() {
    let mut sm = InvocationStateMachine::new();
    assert!(sm.transition(InvocationEvent::Reset).is_err());

    sm.transition(InvocationEvent::Trigger).unwrap();
    assert!(sm.transition(InvocationEvent::Reset).is_err());
    assert_eq!(sm.state(), InvocationState::Dispatched);
}
