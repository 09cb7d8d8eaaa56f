use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// ExecutionResult
// ---------------------------------------------------------------------------

/// Terminal outcome of one search invocation. Exactly one is produced per
/// dispatch, whatever the exit path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ExecutionResult {
    /// The search named a destination.
    Success { destination: String },
    /// The search completed without a destination, e.g. nothing matched or
    /// the operation has no payload.
    NoResult,
    /// The remote call failed, panicked or overran its deadline.
    Failure { reason: String },
}

impl ExecutionResult {
    pub fn destination(&self) -> Option<&str> {
        match self {
            ExecutionResult::Success { destination } => Some(destination),
            _ => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ExecutionResult::Failure { .. })
    }
}

// ---------------------------------------------------------------------------
// ResultSink
// ---------------------------------------------------------------------------

/// Consumes the terminal result of an invocation.
///
/// The controller calls `accept` exactly once per dispatch; implementations
/// can rely on never seeing a second result for the same invocation and on
/// the call arriving for every terminal state, including failures.
pub trait ResultSink: Send + Sync {
    fn accept(&self, result: &ExecutionResult);
}

/// Publishes successful destinations into a shared channel, where the host
/// hands them to the system clipboard or whichever consumer it wires up.
/// No-result and failed searches flow through the same path but publish
/// nothing.
pub struct ChannelSink {
    tx: flume::Sender<String>,
}

impl ChannelSink {
    /// Create the sink together with the consumer side of its channel.
    pub fn new() -> (Self, flume::Receiver<String>) {
        let (tx, rx) = flume::unbounded();
        (Self { tx }, rx)
    }
}

impl ResultSink for ChannelSink {
    fn accept(&self, result: &ExecutionResult) {
        match result {
            ExecutionResult::Success { destination } => {
                if self.tx.send(destination.clone()).is_err() {
                    warn!(destination = %destination, "destination consumer disconnected");
                }
            }
            ExecutionResult::NoResult => {
                debug!("search finished without a destination");
            }
            ExecutionResult::Failure { reason } => {
                debug!(reason = %reason, "failed search reached the sink");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
