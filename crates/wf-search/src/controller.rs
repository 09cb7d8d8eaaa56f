use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::command::{CommandDescriptor, RouteOperation};
use crate::provider::{NavigationProvider, RouteLookup, SurfaceIndicator};
use crate::sink::{ExecutionResult, ResultSink};
use crate::state_machine::{
    InvocationEvent, InvocationState, InvocationStateMachine, StateMachineError,
};

/// Deadline applied when the caller does not configure one.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(60);

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum DispatchError {
    /// A trigger arrived while an invocation was in flight. It is rejected,
    /// not queued.
    #[error("an invocation is already in flight (state {state})")]
    Busy { state: InvocationState },
    #[error("invocation state error: {0}")]
    State(#[from] StateMachineError),
}

// ---------------------------------------------------------------------------
// DispatchHandle
// ---------------------------------------------------------------------------

/// Single-writer channel back to whoever triggered the search.
#[derive(Debug)]
pub struct DispatchHandle {
    pub invocation_id: Uuid,
    pub operation: RouteOperation,
    completion: oneshot::Receiver<ExecutionResult>,
}

impl DispatchHandle {
    /// Wait for the invocation's terminal result. The sender side fires only
    /// after the sink has been handed the result and the surface restored,
    /// so an observer waking up here sees final state.
    pub async fn wait(self) -> Option<ExecutionResult> {
        self.completion.await.ok()
    }
}

// ---------------------------------------------------------------------------
// SearchController
// ---------------------------------------------------------------------------

/// Runs resolved search commands on worker tasks, one at a time.
///
/// Dispatch is synchronous: the single invocation slot is claimed, or the
/// trigger rejected, before this returns, and the invoking surface is marked
/// busy. A supervisor task then drives the remote call and funnels every
/// outcome (destination, no destination, provider error, worker panic,
/// elapsed deadline) through one completion path: hand the result to the
/// sink exactly once, mark the surface idle, reset the machine, fulfil the
/// handle. No retries, no queuing, no cancellation; the deadline only bounds
/// how long a stalled call can hold the slot.
pub struct SearchController {
    provider: Arc<dyn NavigationProvider>,
    sink: Arc<dyn ResultSink>,
    surface: Arc<dyn SurfaceIndicator>,
    machine: Arc<std::sync::Mutex<InvocationStateMachine>>,
    deadline: Duration,
    stats: Arc<ControllerStats>,
}

impl SearchController {
    pub fn new(
        provider: Arc<dyn NavigationProvider>,
        sink: Arc<dyn ResultSink>,
        surface: Arc<dyn SurfaceIndicator>,
    ) -> Self {
        Self {
            provider,
            sink,
            surface,
            machine: Arc::new(std::sync::Mutex::new(InvocationStateMachine::new())),
            deadline: DEFAULT_DEADLINE,
            stats: Arc::new(ControllerStats::default()),
        }
    }

    /// Override the per-invocation deadline.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Current phase of the invocation slot.
    pub fn state(&self) -> InvocationState {
        lock_machine(&self.machine).state()
    }

    pub fn is_idle(&self) -> bool {
        self.state() == InvocationState::Idle
    }

    /// Point-in-time view of the dispatch counters.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Claim the invocation slot and start a worker for `descriptor`.
    ///
    /// Rejects with [`DispatchError::Busy`] while a previous invocation has
    /// not reached its terminal state yet.
    pub fn dispatch(&self, descriptor: CommandDescriptor) -> Result<DispatchHandle, DispatchError> {
        let CommandDescriptor { id, operation, .. } = descriptor;

        {
            let mut machine = lock_machine(&self.machine);
            if !machine.can_transition(InvocationEvent::Trigger) {
                self.stats.record_rejected();
                warn!(
                    invocation_id = %id,
                    state = %machine.state(),
                    "search trigger rejected, invocation in flight"
                );
                return Err(DispatchError::Busy {
                    state: machine.state(),
                });
            }
            machine.transition(InvocationEvent::Trigger)?;
        }
        self.surface.set_busy(true);
        self.stats.record_dispatched();
        info!(invocation_id = %id, operation = operation.name(), "search dispatched");

        let (done_tx, done_rx) = oneshot::channel();
        let machine = Arc::clone(&self.machine);
        let provider = Arc::clone(&self.provider);
        let sink = Arc::clone(&self.sink);
        let surface = Arc::clone(&self.surface);
        let stats = Arc::clone(&self.stats);
        let deadline = self.deadline;

        tokio::spawn(async move {
            let started = Instant::now();
            advance(&machine, InvocationEvent::WorkerStarted);

            // The provider call runs in its own task so a panic inside it is
            // contained and reported like any other failure.
            let worker = tokio::spawn(run_operation(provider, operation));
            let result = match tokio::time::timeout(deadline, worker).await {
                Ok(Ok(Ok(Some(destination)))) => ExecutionResult::Success { destination },
                Ok(Ok(Ok(None))) => ExecutionResult::NoResult,
                Ok(Ok(Err(err))) => ExecutionResult::Failure {
                    reason: err.to_string(),
                },
                Ok(Err(join_err)) => ExecutionResult::Failure {
                    reason: format!("search worker panicked: {join_err}"),
                },
                Err(_) => ExecutionResult::Failure {
                    reason: format!("search deadline of {deadline:?} elapsed"),
                },
            };

            advance(&machine, InvocationEvent::Finished);
            sink.accept(&result);
            // The surface must be idle again before the slot frees: a
            // trigger accepted in between would have its busy mark
            // overwritten by this invocation's restore.
            surface.set_busy(false);
            advance(&machine, InvocationEvent::Reset);
            stats.record_outcome(&result);

            let duration_ms = started.elapsed().as_millis() as u64;
            match &result {
                ExecutionResult::Success { destination } => info!(
                    invocation_id = %id,
                    operation = operation.name(),
                    destination = %destination,
                    duration_ms,
                    "search completed"
                ),
                ExecutionResult::NoResult => info!(
                    invocation_id = %id,
                    operation = operation.name(),
                    duration_ms,
                    "search completed without a destination"
                ),
                ExecutionResult::Failure { reason } => warn!(
                    invocation_id = %id,
                    operation = operation.name(),
                    reason = %reason,
                    duration_ms,
                    "search failed"
                ),
            }

            let _ = done_tx.send(result);
        });

        Ok(DispatchHandle {
            invocation_id: id,
            operation,
            completion: done_rx,
        })
    }
}

/// Invoke the provider entry point the operation names.
async fn run_operation(
    provider: Arc<dyn NavigationProvider>,
    operation: RouteOperation,
) -> RouteLookup {
    match operation {
        RouteOperation::Service { target } => provider.service_route(target.token()).await,
        RouteOperation::Expiring => provider.expiring_route().await,
        RouteOperation::Farthest => provider.farthest_route().await,
        RouteOperation::Most => provider.most_route().await,
        RouteOperation::Nearest => provider.nearest_route().await,
        RouteOperation::Next => provider.next_route().await,
        RouteOperation::Missions => provider.missions_route().await,
        RouteOperation::Source => provider.source_route().await,
        RouteOperation::Update => provider.update_route().await,
        // Accepted cancellation has no destination payload.
        RouteOperation::Cancel => provider.cancel_route().await.map(|()| None),
        RouteOperation::Scoop { distance_ly } => provider.scoop_route(distance_ly).await,
        RouteOperation::Set => provider.set_route().await,
    }
}

fn lock_machine(
    machine: &std::sync::Mutex<InvocationStateMachine>,
) -> std::sync::MutexGuard<'_, InvocationStateMachine> {
    machine.lock().unwrap_or_else(|e| {
        warn!("invocation machine lock was poisoned, recovering");
        e.into_inner()
    })
}

fn advance(machine: &std::sync::Mutex<InvocationStateMachine>, event: InvocationEvent) {
    if let Err(err) = lock_machine(machine).transition(event) {
        error!(error = %err, "invocation machine out of step");
    }
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ControllerStats {
    dispatched: AtomicU64,
    rejected: AtomicU64,
    succeeded: AtomicU64,
    no_result: AtomicU64,
    failed: AtomicU64,
}

impl ControllerStats {
    fn record_dispatched(&self) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
    }

    fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    fn record_outcome(&self, result: &ExecutionResult) {
        let counter = match result {
            ExecutionResult::Success { .. } => &self.succeeded,
            ExecutionResult::NoResult => &self.no_result,
            ExecutionResult::Failure { .. } => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            dispatched: self.dispatched.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            succeeded: self.succeeded.load(Ordering::Relaxed),
            no_result: self.no_result.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of the controller's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub dispatched: u64,
    pub rejected: u64,
    pub succeeded: u64,
    pub no_result: u64,
    pub failed: u64,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
