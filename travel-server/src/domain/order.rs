//! Resolved travel order.

use serde::Serialize;

use super::StationId;

/// Outcome of resolving a travel request.
///
/// Every slot is independently optional: `None` means resolution failed for
/// that slot and the user must be asked to clarify. This is a normal
/// outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedOrder {
    pub departure_id: Option<StationId>,
    pub destination_id: Option<StationId>,
    pub datetime_iso: Option<String>,
}

impl ResolvedOrder {
    /// Whether every slot was resolved.
    pub fn is_complete(&self) -> bool {
        self.departure_id.is_some() && self.destination_id.is_some() && self.datetime_iso.is_some()
    }

    /// Whether enough is known to query journeys (departure and destination).
    pub fn is_routable(&self) -> bool {
        self.departure_id.is_some() && self.destination_id.is_some()
    }
}
