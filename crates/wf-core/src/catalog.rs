use serde::{Deserialize, Serialize};

/// Top-level search category offered by the panel's first selector.
///
/// The set is closed: adding a category means adding a variant here plus its
/// query table below, and the compiler points at every match that needs a new
/// arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchCategory {
    Crime,
    Missions,
    Services,
    Ship,
}

/// Second-level query token. Validity is category-dependent: a token is only
/// meaningful as part of a `(category, query)` pair registered in the tables
/// below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchQuery {
    Cancel,
    Encoded,
    Expiring,
    Facilitator,
    Farthest,
    Guardian,
    Human,
    Manufactured,
    Most,
    Nearest,
    Next,
    Raw,
    Route,
    Scoop,
    Set,
    Source,
    Update,
}

impl SearchCategory {
    pub const ALL: [SearchCategory; 4] = [
        SearchCategory::Crime,
        SearchCategory::Missions,
        SearchCategory::Services,
        SearchCategory::Ship,
    ];

    /// Ordered query set for this category. Never empty.
    pub fn queries(&self) -> &'static [SearchQuery] {
        match self {
            SearchCategory::Crime => &[SearchQuery::Facilitator],
            SearchCategory::Missions => &[
                SearchQuery::Expiring,
                SearchQuery::Farthest,
                SearchQuery::Most,
                SearchQuery::Nearest,
                SearchQuery::Next,
                SearchQuery::Route,
                SearchQuery::Source,
                SearchQuery::Update,
            ],
            SearchCategory::Services => &[
                SearchQuery::Encoded,
                SearchQuery::Guardian,
                SearchQuery::Human,
                SearchQuery::Manufactured,
                SearchQuery::Raw,
            ],
            SearchCategory::Ship => &[SearchQuery::Cancel, SearchQuery::Scoop, SearchQuery::Set],
        }
    }

    /// Query preselected when the category is first chosen in the panel.
    pub fn default_query(&self) -> SearchQuery {
        match self {
            SearchCategory::Crime => SearchQuery::Facilitator,
            SearchCategory::Missions => SearchQuery::Route,
            SearchCategory::Services => SearchQuery::Encoded,
            SearchCategory::Ship => SearchQuery::Scoop,
        }
    }

    pub fn contains(&self, query: SearchQuery) -> bool {
        self.queries().contains(&query)
    }

    /// Display name for category selectors.
    pub fn label(&self) -> &'static str {
        match self {
            SearchCategory::Crime => "Crime & legal",
            SearchCategory::Missions => "Missions",
            SearchCategory::Services => "Station services",
            SearchCategory::Ship => "Ship & route",
        }
    }
}

impl std::fmt::Display for SearchCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCategory::Crime => write!(f, "crime"),
            SearchCategory::Missions => write!(f, "missions"),
            SearchCategory::Services => write!(f, "services"),
            SearchCategory::Ship => write!(f, "ship"),
        }
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let token = match self {
            SearchQuery::Cancel => "cancel",
            SearchQuery::Encoded => "encoded",
            SearchQuery::Expiring => "expiring",
            SearchQuery::Facilitator => "facilitator",
            SearchQuery::Farthest => "farthest",
            SearchQuery::Guardian => "guardian",
            SearchQuery::Human => "human",
            SearchQuery::Manufactured => "manufactured",
            SearchQuery::Most => "most",
            SearchQuery::Nearest => "nearest",
            SearchQuery::Next => "next",
            SearchQuery::Raw => "raw",
            SearchQuery::Route => "route",
            SearchQuery::Scoop => "scoop",
            SearchQuery::Set => "set",
            SearchQuery::Source => "source",
            SearchQuery::Update => "update",
        };
        write!(f, "{token}")
    }
}

/// Display label for a registered `(category, query)` pair.
///
/// Unregistered pairs are a programmer error, not user input: the selectors
/// only ever offer tokens from [`SearchCategory::queries`].
pub fn label_for(
    category: SearchCategory,
    query: SearchQuery,
) -> Result<&'static str, CatalogError> {
    use SearchCategory as C;
    use SearchQuery as Q;
    let label = match (category, query) {
        (C::Crime, Q::Facilitator) => "Legal facilitator",
        (C::Missions, Q::Expiring) => "Expiring mission destination",
        (C::Missions, Q::Farthest) => "Farthest mission destination",
        (C::Missions, Q::Most) => "System with most missions",
        (C::Missions, Q::Nearest) => "Nearest mission destination",
        (C::Missions, Q::Next) => "Next waypoint in route",
        (C::Missions, Q::Route) => "Full missions route",
        (C::Missions, Q::Source) => "Mission cargo source",
        (C::Missions, Q::Update) => "Updated missions route",
        (C::Services, Q::Encoded) => "Encoded materials trader",
        (C::Services, Q::Guardian) => "Guardian technology broker",
        (C::Services, Q::Human) => "Human technology broker",
        (C::Services, Q::Manufactured) => "Manufactured materials trader",
        (C::Services, Q::Raw) => "Raw materials trader",
        (C::Ship, Q::Cancel) => "Cancel plotted route",
        (C::Ship, Q::Scoop) => "Nearest scoopable star",
        (C::Ship, Q::Set) => "Set plotted route",
        _ => return Err(CatalogError::UnknownPair { category, query }),
    };
    Ok(label)
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("no search registered for {category}/{query}")]
    UnknownPair {
        category: SearchCategory,
        query: SearchQuery,
    },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
