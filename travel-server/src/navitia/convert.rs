//! Conversion from planner DTOs to domain journeys.
//!
//! Each journey record is decoded on its own into `Result<Journey,
//! ParseSkip>`; the caller keeps the successes and logs the skips, so one
//! malformed record never fails a whole search.

use serde::Deserialize;
use tracing::warn;

use crate::domain::{Journey, JourneyPlace, JourneySection, SectionType, UNKNOWN_PLACE};

use super::error::{JourneyError, ParseSkip};
use super::types::{JourneyDto, JourneysResponse, NamedPointDto, PlaceDto, SectionDto};

/// Result of a journey search: the parsed journeys (possibly none) or a
/// typed error, never both.
pub type JourneySearchResult = Result<Vec<Journey>, JourneyError>;

/// Message used when the planner sends an error block without any text.
const UNKNOWN_PLANNER_ERROR: &str = "unknown journey planner error";

/// Parse a successful planner response body.
///
/// Pure: the same body always yields the same result.
pub fn parse_journeys_response(body: &str) -> JourneySearchResult {
    let doc: JourneysResponse =
        serde_json::from_str(body).map_err(|e| JourneyError::Malformed(e.to_string()))?;
    convert_journeys_response(&doc)
}

/// Convert a decoded planner document.
pub fn convert_journeys_response(doc: &JourneysResponse) -> JourneySearchResult {
    let records = doc.journeys.as_deref().unwrap_or(&[]);

    let mut journeys = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        match decode_journey(index, record) {
            Ok(journey) => journeys.push(journey),
            Err(skip) => warn!(index = skip.index, reason = %skip.reason, "skipping journey"),
        }
    }

    if journeys.is_empty() {
        if let Some(error) = &doc.error {
            let message = error
                .message
                .clone()
                .or_else(|| error.id.clone())
                .unwrap_or_else(|| UNKNOWN_PLANNER_ERROR.to_string());
            return Err(JourneyError::Planner { message });
        }
    }

    Ok(journeys)
}

/// Decode and convert one raw journey record.
pub fn decode_journey(index: usize, record: &serde_json::Value) -> Result<Journey, ParseSkip> {
    let dto = JourneyDto::deserialize(record).map_err(|e| ParseSkip {
        index,
        reason: e.to_string(),
    })?;
    Ok(convert_journey(&dto))
}

/// Map a decoded journey. Missing counts and durations default to zero.
pub fn convert_journey(dto: &JourneyDto) -> Journey {
    let sections = dto
        .sections
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .map(convert_section)
        .collect();

    Journey {
        departure_at: dto.departure_date_time.clone().unwrap_or_default(),
        arrival_at: dto.arrival_date_time.clone().unwrap_or_default(),
        duration_seconds: dto.duration.unwrap_or(0),
        transfer_count: dto.nb_transfers.unwrap_or(0),
        walking_duration_seconds: dto
            .durations
            .as_ref()
            .and_then(|d| d.walking)
            .unwrap_or(0),
        co2_grams: dto.co2_emission.as_ref().and_then(|c| c.value),
        sections,
    }
}

/// Map one section. Transport metadata is only filled from a display
/// information block.
pub fn convert_section(dto: &SectionDto) -> JourneySection {
    let display = dto.display_informations.as_ref();

    JourneySection {
        section_type: SectionType::parse(dto.section_type.as_deref().unwrap_or_default()),
        mode: dto.mode.clone(),
        from: dto
            .from
            .as_ref()
            .map_or_else(JourneyPlace::unknown, convert_place),
        to: dto
            .to
            .as_ref()
            .map_or_else(JourneyPlace::unknown, convert_place),
        departure_at: dto.departure_date_time.clone().unwrap_or_default(),
        arrival_at: dto.arrival_date_time.clone().unwrap_or_default(),
        duration_seconds: dto.duration.unwrap_or(0),
        line_name: display.and_then(|d| d.label.clone()),
        line_code: display.and_then(|d| d.code.clone()),
        commercial_mode: display.and_then(|d| d.commercial_mode.clone()),
        direction: display.and_then(|d| d.direction.clone()),
        network: display.and_then(|d| d.network.clone()),
    }
}

/// Resolve a place, preferring transit stops over street addresses.
pub fn convert_place(dto: &PlaceDto) -> JourneyPlace {
    let candidates: [Option<&NamedPointDto>; 3] = [
        dto.stop_point.as_ref(),
        dto.stop_area.as_ref(),
        dto.address.as_ref(),
    ];

    let name = candidates
        .iter()
        .flatten()
        .find_map(|p| p.name.clone())
        .or_else(|| dto.name.clone())
        .unwrap_or_else(|| UNKNOWN_PLACE.to_string());

    let coord = candidates
        .iter()
        .flatten()
        .find_map(|p| p.coord)
        .map(|c| (c.lon, c.lat));

    JourneyPlace { name, coord }
}
