//! Domain types for travel order resolution.
//!
//! These are the request-scoped values that flow through the pipeline:
//! recognized entities in, resolved orders and normalized journeys out.

mod entity;
mod journey;
mod order;
mod station;

pub use entity::{EntityLabel, ExtractedEntity};
pub use journey::{Journey, JourneyPlace, JourneySection, SectionType, UNKNOWN_PLACE};
pub use order::ResolvedOrder;
pub use station::{Coordinates, StationId};
