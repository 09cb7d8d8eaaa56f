use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use wf_core::catalog::SearchQuery;

// ---------------------------------------------------------------------------
// ServiceTarget
// ---------------------------------------------------------------------------

/// Station service a service search can target. Only these tokens are
/// routable through `service-route`, so an unroutable argument cannot be
/// constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceTarget {
    Encoded,
    Facilitator,
    Guardian,
    Human,
    Manufactured,
    Raw,
}

impl ServiceTarget {
    /// Wire token passed to the navigation provider.
    pub fn token(&self) -> &'static str {
        match self {
            ServiceTarget::Encoded => "encoded",
            ServiceTarget::Facilitator => "facilitator",
            ServiceTarget::Guardian => "guardian",
            ServiceTarget::Human => "human",
            ServiceTarget::Manufactured => "manufactured",
            ServiceTarget::Raw => "raw",
        }
    }

    /// Map a catalog query token onto a routable service. `None` for tokens
    /// that are not service searches.
    pub fn from_query(query: SearchQuery) -> Option<ServiceTarget> {
        match query {
            SearchQuery::Encoded => Some(ServiceTarget::Encoded),
            SearchQuery::Facilitator => Some(ServiceTarget::Facilitator),
            SearchQuery::Guardian => Some(ServiceTarget::Guardian),
            SearchQuery::Human => Some(ServiceTarget::Human),
            SearchQuery::Manufactured => Some(ServiceTarget::Manufactured),
            SearchQuery::Raw => Some(ServiceTarget::Raw),
            _ => None,
        }
    }
}

impl fmt::Display for ServiceTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

// ---------------------------------------------------------------------------
// RouteOperation
// ---------------------------------------------------------------------------

/// One remote lookup offered by the navigation provider, with its arguments
/// snapshotted at resolve time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RouteOperation {
    /// Nearest destination offering a service.
    Service { target: ServiceTarget },
    /// Destination of the soonest-expiring mission.
    Expiring,
    /// Farthest mission destination.
    Farthest,
    /// System with the most stacked missions.
    Most,
    /// Nearest mission destination.
    Nearest,
    /// Next waypoint of the plotted route.
    Next,
    /// Full missions route.
    Missions,
    /// Source system for mission cargo.
    Source,
    /// Recompute the route, dropping visited waypoints.
    Update,
    /// Drop the plotted route. Success carries no destination.
    Cancel,
    /// Nearest scoopable star within the ship's jump range.
    Scoop { distance_ly: f64 },
    /// Plot the prepared route.
    Set,
}

impl RouteOperation {
    /// Provider entry point this operation resolves to.
    pub fn name(&self) -> &'static str {
        match self {
            RouteOperation::Service { .. } => "service-route",
            RouteOperation::Expiring => "expiring-route",
            RouteOperation::Farthest => "farthest-route",
            RouteOperation::Most => "most-route",
            RouteOperation::Nearest => "nearest-route",
            RouteOperation::Next => "next-route",
            RouteOperation::Missions => "missions-route",
            RouteOperation::Source => "source-route",
            RouteOperation::Update => "update-route",
            RouteOperation::Cancel => "cancel-route",
            RouteOperation::Scoop { .. } => "scoop-route",
            RouteOperation::Set => "set-route",
        }
    }

    /// Whether a successful call is expected to name a destination. Route
    /// cancellation succeeds without one.
    pub fn expects_destination(&self) -> bool {
        !matches!(self, RouteOperation::Cancel)
    }
}

impl fmt::Display for RouteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ---------------------------------------------------------------------------
// CommandDescriptor
// ---------------------------------------------------------------------------

/// An immutable, fully resolved search command.
///
/// Built fresh for every trigger: re-invoking the same selection produces a
/// new descriptor with a new id and freshly read arguments, never a reused
/// one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandDescriptor {
    pub id: Uuid,
    pub operation: RouteOperation,
    pub issued_at: DateTime<Utc>,
}

impl CommandDescriptor {
    pub fn new(operation: RouteOperation) -> Self {
        Self {
            id: Uuid::new_v4(),
            operation,
            issued_at: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
