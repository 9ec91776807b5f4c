//! Journey planner (Navitia) client.
//!
//! Key characteristics of the planner API:
//! - Stations are addressed by `lon;lat` pairs, not by our catalog ids
//! - Datetimes are sent and returned in the compact `YYYYMMDDTHHMMSS` form
//! - Coordinates in responses are strings ("2.3730"), sometimes numbers
//! - A 200 response may still carry an error block and zero journeys

mod client;
mod convert;
mod error;
mod types;


pub use client::{
    DEFAULT_BASE_URL, DEFAULT_COVERAGE, DatetimeRepresents, JourneyQuery, NavitiaClient,
    NavitiaConfig, to_planner_datetime,
};
pub use convert::{
    JourneySearchResult, convert_journey, convert_journeys_response, convert_place,
    convert_section, decode_journey, parse_journeys_response,
};
pub use error::{ErrorKind, JourneyError, ParseSkip, StationSide};
pub use types::{
    ApiErrorDto, Co2Dto, CoordDto, DisplayInformationsDto, DurationsDto, JourneyDto,
    JourneysResponse, NamedPointDto, PlaceDto, SectionDto,
};
