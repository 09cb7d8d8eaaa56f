use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use wf_core::catalog::{SearchCategory, SearchQuery};
use wf_core::selection::{SelectionError, SelectionState};

use crate::controller::{DispatchError, DispatchHandle, SearchController, StatsSnapshot};
use crate::provider::{NavigationProvider, ShipStateProvider, SurfaceIndicator};
use crate::resolver::{CommandResolver, ResolveError};
use crate::sink::ResultSink;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SearchError {
    /// `execute` was called before a category and query were both chosen.
    #[error("no search selected")]
    NothingSelected,
    #[error("selection: {0}")]
    Selection(#[from] SelectionError),
    #[error("resolve: {0}")]
    Resolve(#[from] ResolveError),
    #[error("dispatch: {0}")]
    Dispatch(#[from] DispatchError),
}

// ---------------------------------------------------------------------------
// SearchCoordinator
// ---------------------------------------------------------------------------

/// Front door tying the pieces together: a selection pane, the resolver that
/// turns a selection into a concrete command, and the controller that runs
/// it.
///
/// One coordinator drives one search surface. Hosts narrow the selection
/// with [`select_category`](Self::select_category) and
/// [`select_query`](Self::select_query), then fire it with
/// [`execute`](Self::execute). Everything downstream, the single invocation
/// slot, sink delivery and the surface busy flag, is the controller's job.
pub struct SearchCoordinator {
    selection: SelectionState,
    resolver: CommandResolver,
    controller: SearchController,
}

impl SearchCoordinator {
    pub fn new(
        provider: Arc<dyn NavigationProvider>,
        ship_state: Arc<dyn ShipStateProvider>,
        sink: Arc<dyn ResultSink>,
        surface: Arc<dyn SurfaceIndicator>,
    ) -> Self {
        Self {
            selection: SelectionState::new(),
            resolver: CommandResolver::new(ship_state),
            controller: SearchController::new(provider, sink, surface),
        }
    }

    /// Override the controller's per-invocation deadline.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.controller = self.controller.with_deadline(deadline);
        self
    }

    /// Switch the category pane. Any earlier query choice is cleared and the
    /// query set valid for `category` is returned so the host can repopulate
    /// its query pane.
    pub fn select_category(&mut self, category: SearchCategory) -> &'static [SearchQuery] {
        self.selection.set_category(category)
    }

    /// Choose a query within the current category. Rejected choices leave
    /// the selection untouched.
    pub fn select_query(&mut self, query: SearchQuery) -> Result<(), SearchError> {
        Ok(self.selection.set_query(query)?)
    }

    pub fn selection(&self) -> Option<(SearchCategory, SearchQuery)> {
        self.selection.current_selection()
    }

    /// Queries valid for the selected category, empty when none is chosen.
    pub fn valid_queries(&self) -> &'static [SearchQuery] {
        self.selection.valid_queries()
    }

    /// Resolve the current selection into a command and hand it to the
    /// controller. Fails without side effects when nothing is selected, the
    /// selection has no registered command, required context is missing, or
    /// an invocation is already in flight.
    pub fn execute(&self) -> Result<DispatchHandle, SearchError> {
        let (category, query) = self
            .selection
            .current_selection()
            .ok_or(SearchError::NothingSelected)?;
        let descriptor = self.resolver.resolve(category, query)?;
        Ok(self.controller.dispatch(descriptor)?)
    }

    pub fn is_busy(&self) -> bool {
        !self.controller.is_idle()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.controller.stats()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{NavigationError, NullSurface, RouteLookup};
    use crate::sink::ExecutionResult;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // -- Mocks --

    #[derive(Default)]
    struct RecordingProvider {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingProvider {
        fn recorded_calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        async fn respond(&self, call: String) -> RouteLookup {
            self.calls.lock().unwrap().push(call);
            Ok(Some("Lembava".into()))
        }
    }

    #[async_trait]
    impl NavigationProvider for RecordingProvider {
        async fn service_route(&self, service: &str) -> RouteLookup {
            self.respond(format!("service-route({service})")).await
        }
        async fn expiring_route(&self) -> RouteLookup {
            self.respond("expiring-route".into()).await
        }
        async fn farthest_route(&self) -> RouteLookup {
            self.respond("farthest-route".into()).await
        }
        async fn most_route(&self) -> RouteLookup {
            self.respond("most-route".into()).await
        }
        async fn nearest_route(&self) -> RouteLookup {
            self.respond("nearest-route".into()).await
        }
        async fn next_route(&self) -> RouteLookup {
            self.respond("next-route".into()).await
        }
        async fn missions_route(&self) -> RouteLookup {
            self.respond("missions-route".into()).await
        }
        async fn source_route(&self) -> RouteLookup {
            self.respond("source-route".into()).await
        }
        async fn update_route(&self) -> RouteLookup {
            self.respond("update-route".into()).await
        }
        async fn cancel_route(&self) -> Result<(), NavigationError> {
            self.respond("cancel-route".into()).await.map(|_| ())
        }
        async fn scoop_route(&self, distance_ly: f64) -> RouteLookup {
            self.respond(format!("scoop-route({distance_ly})")).await
        }
        async fn set_route(&self) -> RouteLookup {
            self.respond("set-route".into()).await
        }
    }

    struct FixedShipState(Option<f64>);

    impl ShipStateProvider for FixedShipState {
        fn total_jump_distance(&self) -> Option<f64> {
            self.0
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        results: Mutex<Vec<ExecutionResult>>,
    }

    impl RecordingSink {
        fn results(&self) -> Vec<ExecutionResult> {
            self.results.lock().unwrap().clone()
        }
    }

    impl ResultSink for RecordingSink {
        fn accept(&self, result: &ExecutionResult) {
            self.results.lock().unwrap().push(result.clone());
        }
    }

    fn coordinator() -> (SearchCoordinator, Arc<RecordingProvider>, Arc<RecordingSink>) {
        coordinator_with_ship_state(Some(42.0))
    }

    fn coordinator_with_ship_state(
        jump_distance: Option<f64>,
    ) -> (SearchCoordinator, Arc<RecordingProvider>, Arc<RecordingSink>) {
        let provider = Arc::new(RecordingProvider::default());
        let sink = Arc::new(RecordingSink::default());
        let coordinator = SearchCoordinator::new(
            provider.clone(),
            Arc::new(FixedShipState(jump_distance)),
            sink.clone(),
            Arc::new(NullSurface),
        );
        (coordinator, provider, sink)
    }

    // -- Tests --

    #[tokio::test]
    async fn execute_without_a_selection_fails() {
        let (coordinator, provider, _sink) = coordinator();

        let err = coordinator.execute().unwrap_err();

        assert!(matches!(err, SearchError::NothingSelected));
        assert!(provider.recorded_calls().is_empty());
    }

    #[tokio::test]
    async fn category_alone_is_not_enough() {
        let (mut coordinator, provider, _sink) = coordinator();
        coordinator.select_category(SearchCategory::Missions);

        let err = coordinator.execute().unwrap_err();

        assert!(matches!(err, SearchError::NothingSelected));
        assert!(provider.recorded_calls().is_empty());
    }

    #[tokio::test]
    async fn selected_search_reaches_the_named_entry_point() {
        let (mut coordinator, provider, sink) = coordinator();
        coordinator.select_category(SearchCategory::Missions);
        coordinator.select_query(SearchQuery::Nearest).unwrap();

        let handle = coordinator.execute().unwrap();
        let result = handle.wait().await.unwrap();

        assert_eq!(
            result,
            ExecutionResult::Success {
                destination: "Lembava".into()
            }
        );
        assert_eq!(provider.recorded_calls(), ["nearest-route"]);
        assert_eq!(sink.results().len(), 1);
        assert!(!coordinator.is_busy());
    }

    #[tokio::test]
    async fn switching_category_clears_the_query() {
        let (mut coordinator, provider, _sink) = coordinator();
        coordinator.select_category(SearchCategory::Missions);
        coordinator.select_query(SearchQuery::Nearest).unwrap();

        let queries = coordinator.select_category(SearchCategory::Ship);

        assert!(queries.contains(&SearchQuery::Scoop));
        assert_eq!(coordinator.selection(), None);
        assert!(coordinator.execute().is_err());
        assert!(provider.recorded_calls().is_empty());
    }

    #[tokio::test]
    async fn rejected_query_leaves_the_previous_one_active() {
        let (mut coordinator, provider, _sink) = coordinator();
        coordinator.select_category(SearchCategory::Crime);
        coordinator.select_query(SearchQuery::Facilitator).unwrap();

        let err = coordinator.select_query(SearchQuery::Update).unwrap_err();

        assert!(matches!(
            err,
            SearchError::Selection(SelectionError::InvalidQueryForCategory { .. })
        ));
        assert_eq!(
            coordinator.selection(),
            Some((SearchCategory::Crime, SearchQuery::Facilitator))
        );

        let handle = coordinator.execute().unwrap();
        handle.wait().await.unwrap();
        assert_eq!(provider.recorded_calls(), ["service-route(facilitator)"]);
    }

    #[tokio::test]
    async fn missing_ship_context_fails_before_the_provider_is_touched() {
        let (mut coordinator, provider, sink) = coordinator_with_ship_state(None);
        coordinator.select_category(SearchCategory::Ship);
        coordinator.select_query(SearchQuery::Scoop).unwrap();

        let err = coordinator.execute().unwrap_err();

        assert!(matches!(
            err,
            SearchError::Resolve(ResolveError::ContextUnavailable(_))
        ));
        assert!(provider.recorded_calls().is_empty());
        assert!(sink.results().is_empty());
        assert!(!coordinator.is_busy());
    }

    #[tokio::test]
    async fn scoop_reads_the_jump_distance_at_execute_time() {
        let (mut coordinator, provider, _sink) = coordinator_with_ship_state(Some(42.0));
        coordinator.select_category(SearchCategory::Ship);
        coordinator.select_query(SearchQuery::Scoop).unwrap();

        let handle = coordinator.execute().unwrap();
        handle.wait().await.unwrap();

        assert_eq!(provider.recorded_calls(), ["scoop-route(42)"]);
    }

    #[tokio::test]
    async fn valid_queries_follow_the_selected_category() {
        let (mut coordinator, _provider, _sink) = coordinator();

        assert!(coordinator.valid_queries().is_empty());

        let queries = coordinator.select_category(SearchCategory::Services);
        assert_eq!(queries, coordinator.valid_queries());
        assert_eq!(queries.len(), 5);
    }

    #[tokio::test]
    async fn stats_surface_dispatch_outcomes() {
        let (mut coordinator, _provider, _sink) = coordinator();
        coordinator.select_category(SearchCategory::Missions);
        coordinator.select_query(SearchQuery::Route).unwrap();

        let handle = coordinator.execute().unwrap();
        handle.wait().await.unwrap();

        let stats = coordinator.stats();
        assert_eq!(stats.dispatched, 1);
        assert_eq!(stats.succeeded, 1);
    }
}
