use async_trait::async_trait;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("navigation service unavailable: {0}")]
    Unavailable(String),
    #[error("route lookup failed: {0}")]
    Lookup(String),
}

/// Destination of a successful route lookup, `None` when the search finished
/// without finding one.
pub type RouteLookup = Result<Option<String>, NavigationError>;

// ---------------------------------------------------------------------------
// NavigationProvider
// ---------------------------------------------------------------------------

/// The navigation query surface this panel drives, one method per remote
/// lookup. Implementations talk to the actual routing service; the panel
/// treats them as opaque calls that may take a while.
#[async_trait]
pub trait NavigationProvider: Send + Sync {
    /// Nearest destination offering the given service token.
    async fn service_route(&self, service: &str) -> RouteLookup;
    /// Destination of the soonest-expiring mission.
    async fn expiring_route(&self) -> RouteLookup;
    /// Farthest mission destination.
    async fn farthest_route(&self) -> RouteLookup;
    /// System with the most stacked missions.
    async fn most_route(&self) -> RouteLookup;
    /// Nearest mission destination.
    async fn nearest_route(&self) -> RouteLookup;
    /// Next waypoint of the plotted route.
    async fn next_route(&self) -> RouteLookup;
    /// Full missions route.
    async fn missions_route(&self) -> RouteLookup;
    /// Source system for mission cargo.
    async fn source_route(&self) -> RouteLookup;
    /// Recompute the route, dropping visited waypoints.
    async fn update_route(&self) -> RouteLookup;
    /// Drop the plotted route. Success is the request being accepted; there
    /// is no destination payload.
    async fn cancel_route(&self) -> Result<(), NavigationError>;
    /// Nearest scoopable star within `distance_ly`.
    async fn scoop_route(&self, distance_ly: f64) -> RouteLookup;
    /// Plot the prepared route.
    async fn set_route(&self) -> RouteLookup;
}

// ---------------------------------------------------------------------------
// ShipStateProvider
// ---------------------------------------------------------------------------

/// Read side of the ship telemetry the resolver consults.
pub trait ShipStateProvider: Send + Sync {
    /// Total jump distance of the current ship, in light years. `None` while
    /// ship telemetry has not been received yet.
    fn total_jump_distance(&self) -> Option<f64>;
}

// ---------------------------------------------------------------------------
// SurfaceIndicator
// ---------------------------------------------------------------------------

/// Busy indicator of whichever surface triggered the search. Marked busy
/// when an invocation is dispatched and idle again once its result has been
/// delivered, on every exit path.
pub trait SurfaceIndicator: Send + Sync {
    fn set_busy(&self, busy: bool);
}

/// Surface that ignores busy signals, for headless hosts.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl SurfaceIndicator for NullSurface {
    fn set_busy(&self, _busy: bool) {}
}
