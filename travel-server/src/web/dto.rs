//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinates, ExtractedEntity, Journey, ResolvedOrder, StationId};
use crate::navitia::{ErrorKind, JourneyError};
use crate::stations::{StationEntry, StationMatcher};

/// A station in the listing.
#[derive(Debug, Serialize)]
pub struct StationSummary {
    pub id: StationId,
    pub name: String,
}

impl StationSummary {
    pub fn from_entry(entry: &StationEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name.clone(),
        }
    }
}

/// All catalog stations, in catalog order.
#[derive(Debug, Serialize)]
pub struct StationListResponse {
    pub stations: Vec<StationSummary>,
}

/// Request to resolve recognized entities into a travel order.
#[derive(Debug, Deserialize)]
pub struct ResolveOrderRequest {
    /// Entities from the recognizer
    #[serde(default)]
    pub entities: Vec<ExtractedEntity>,

    /// Caller latitude, used only together with `lon`
    pub lat: Option<f64>,

    /// Caller longitude, used only together with `lat`
    pub lon: Option<f64>,
}

impl ResolveOrderRequest {
    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::from_parts(self.lat, self.lon)
    }
}

/// A resolved travel order with display names.
#[derive(Debug, Serialize)]
pub struct ResolveOrderResponse {
    pub departure_id: Option<StationId>,
    pub destination_id: Option<StationId>,
    pub datetime_iso: Option<String>,
    pub departure_name: Option<String>,
    pub destination_name: Option<String>,
}

impl ResolveOrderResponse {
    /// Attach canonical names to the resolved ids.
    pub fn from_order(order: ResolvedOrder, stations: &StationMatcher) -> Self {
        let name = |id: Option<StationId>| id.and_then(|id| stations.get_by_id(id)).map(|m| m.name);
        Self {
            departure_name: name(order.departure_id),
            destination_name: name(order.destination_id),
            departure_id: order.departure_id,
            destination_id: order.destination_id,
            datetime_iso: order.datetime_iso,
        }
    }
}

/// Query parameters for a journey search.
#[derive(Debug, Deserialize)]
pub struct JourneySearchParams {
    pub departure_id: u32,
    pub destination_id: u32,

    /// `YYYY-MM-DDTHH:MM:SS`; defaults to now on the planner side
    pub datetime_iso: Option<String>,

    /// "departure" (default) or "arrival"
    pub datetime_represents: Option<String>,
}

/// Successful journey search.
#[derive(Debug, Serialize)]
pub struct JourneySearchResponse {
    pub journeys: Vec<Journey>,
    pub error: Option<String>,
}

impl JourneySearchResponse {
    pub fn new(journeys: Vec<Journey>) -> Self {
        Self {
            journeys,
            error: None,
        }
    }
}

/// Failed journey search.
#[derive(Debug, Serialize)]
pub struct JourneyErrorResponse {
    pub journeys: Vec<Journey>,
    pub error: String,
    pub kind: ErrorKind,
}

impl JourneyErrorResponse {
    pub fn from_error(err: &JourneyError) -> Self {
        Self {
            journeys: Vec::new(),
            error: err.to_string(),
            kind: err.kind(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
