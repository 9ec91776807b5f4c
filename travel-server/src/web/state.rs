//! Application state for the web layer.

use std::sync::Arc;

use crate::navitia::NavitiaClient;
use crate::order::OrderResolver;
use crate::stations::StationCatalog;

/// Shared application state.
///
/// Everything here is built once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Station catalog
    pub catalog: Arc<StationCatalog>,

    /// Entity to travel order resolution
    pub resolver: Arc<OrderResolver>,

    /// Journey planner client
    pub navitia: Arc<NavitiaClient>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(catalog: Arc<StationCatalog>, resolver: OrderResolver, navitia: NavitiaClient) -> Self {
        Self {
            catalog,
            resolver: Arc::new(resolver),
            navitia: Arc::new(navitia),
        }
    }
}
