use std::sync::Arc;

use thiserror::Error;

use wf_core::catalog::{SearchCategory, SearchQuery};

use crate::command::{CommandDescriptor, RouteOperation, ServiceTarget};
use crate::provider::ShipStateProvider;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ResolveError {
    /// The pair is not a registered search. Nothing is dispatched.
    #[error("no search is registered for {category}/{query}")]
    UnsupportedSelection {
        category: SearchCategory,
        query: SearchQuery,
    },
    /// A required argument source has no value yet. Nothing is dispatched.
    #[error("{0} is not available yet")]
    ContextUnavailable(&'static str),
}

// ---------------------------------------------------------------------------
// CommandResolver
// ---------------------------------------------------------------------------

/// Maps a validated `(category, query)` selection onto a fully resolved
/// [`CommandDescriptor`].
///
/// Pure lookup over the enumerated pairs: exact matches only, no prefix
/// matching, no default operation. Arguments are read fresh on every call,
/// so the scoop distance is taken from ship telemetry here, synchronously,
/// before anything is dispatched.
pub struct CommandResolver {
    ship_state: Arc<dyn ShipStateProvider>,
}

impl CommandResolver {
    pub fn new(ship_state: Arc<dyn ShipStateProvider>) -> Self {
        Self { ship_state }
    }

    pub fn resolve(
        &self,
        category: SearchCategory,
        query: SearchQuery,
    ) -> Result<CommandDescriptor, ResolveError> {
        use SearchCategory as C;
        use SearchQuery as Q;

        let operation = match (category, query) {
            (C::Crime, Q::Facilitator) => RouteOperation::Service {
                target: ServiceTarget::Facilitator,
            },
            (C::Missions, Q::Expiring) => RouteOperation::Expiring,
            (C::Missions, Q::Farthest) => RouteOperation::Farthest,
            (C::Missions, Q::Most) => RouteOperation::Most,
            (C::Missions, Q::Nearest) => RouteOperation::Nearest,
            (C::Missions, Q::Next) => RouteOperation::Next,
            (C::Missions, Q::Route) => RouteOperation::Missions,
            (C::Missions, Q::Source) => RouteOperation::Source,
            (C::Missions, Q::Update) => RouteOperation::Update,
            // Every catalog-registered services token passes straight
            // through to the provider.
            (C::Services, q) => match ServiceTarget::from_query(q) {
                Some(target) => RouteOperation::Service { target },
                None => {
                    return Err(ResolveError::UnsupportedSelection { category, query });
                }
            },
            (C::Ship, Q::Cancel) => RouteOperation::Cancel,
            (C::Ship, Q::Scoop) => {
                let distance_ly = self
                    .ship_state
                    .total_jump_distance()
                    .ok_or(ResolveError::ContextUnavailable("ship jump telemetry"))?;
                RouteOperation::Scoop { distance_ly }
            }
            (C::Ship, Q::Set) => RouteOperation::Set,
            _ => {
                return Err(ResolveError::UnsupportedSelection { category, query });
            }
        };

        let descriptor = CommandDescriptor::new(operation);
        tracing::debug!(
            invocation_id = %descriptor.id,
            category = %category,
            query = %query,
            operation = descriptor.operation.name(),
            "selection resolved"
        );
        Ok(descriptor)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
