//! Journey types.
//!
//! A `Journey` is one itinerary returned by the journey planner, made of
//! ordered sections (transit rides, walks, transfers and waits). These are
//! the stable shapes handed to callers, independent of the planner's wire
//! format.

use serde::Serialize;

/// Kind of a journey section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    PublicTransport,
    StreetNetwork,
    Transfer,
    Waiting,
    Unknown,
}

impl SectionType {
    /// Map the planner's section type string. Unrecognized values are `Unknown`.
    pub fn parse(s: &str) -> Self {
        match s {
            "public_transport" => SectionType::PublicTransport,
            "street_network" => SectionType::StreetNetwork,
            "transfer" => SectionType::Transfer,
            "waiting" => SectionType::Waiting,
            _ => SectionType::Unknown,
        }
    }
}

/// Place name used when a section endpoint carries no usable name.
pub const UNKNOWN_PLACE: &str = "unknown";

/// An endpoint of a section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JourneyPlace {
    pub name: String,
    /// `(longitude, latitude)`
    pub coord: Option<(f64, f64)>,
}

impl JourneyPlace {
    pub fn unknown() -> Self {
        Self {
            name: UNKNOWN_PLACE.to_string(),
            coord: None,
        }
    }
}

/// One leg of an itinerary.
///
/// Transport metadata (`line_name` .. `network`) is only present on
/// sections that carried display information, typically public transport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JourneySection {
    #[serde(rename = "type")]
    pub section_type: SectionType,
    pub mode: Option<String>,
    pub from: JourneyPlace,
    pub to: JourneyPlace,
    pub departure_at: String,
    pub arrival_at: String,
    pub duration_seconds: i64,
    pub line_name: Option<String>,
    pub line_code: Option<String>,
    pub commercial_mode: Option<String>,
    pub direction: Option<String>,
    pub network: Option<String>,
}

impl JourneySection {
    /// Returns true if this section is a ride on a transit vehicle.
    pub fn is_public_transport(&self) -> bool {
        self.section_type == SectionType::PublicTransport
    }
}

/// A complete itinerary from departure to destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Journey {
    pub departure_at: String,
    pub arrival_at: String,
    pub duration_seconds: i64,
    pub transfer_count: u32,
    pub walking_duration_seconds: i64,
    pub co2_grams: Option<f64>,
    pub sections: Vec<JourneySection>,
}

impl Journey {
    /// Sections that are transit rides, in travel order.
    pub fn rides(&self) -> impl Iterator<Item = &JourneySection> {
        self.sections.iter().filter(|s| s.is_public_transport())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(section_type: SectionType) -> JourneySection {
        JourneySection {
            section_type,
            mode: None,
            from: JourneyPlace::unknown(),
            to: JourneyPlace::unknown(),
            departure_at: String::new(),
            arrival_at: String::new(),
            duration_seconds: 0,
            line_name: None,
            line_code: None,
            commercial_mode: None,
            direction: None,
            network: None,
        }
    }

    #[test]
    fn parse_section_types() {
        assert_eq!(
            SectionType::parse("public_transport"),
            SectionType::PublicTransport
        );
        assert_eq!(
            SectionType::parse("street_network"),
            SectionType::StreetNetwork
        );
        assert_eq!(SectionType::parse("transfer"), SectionType::Transfer);
        assert_eq!(SectionType::parse("waiting"), SectionType::Waiting);
        assert_eq!(SectionType::parse("crow_fly"), SectionType::Unknown);
        assert_eq!(SectionType::parse(""), SectionType::Unknown);
    }

    #[test]
    fn rides_filters_public_transport() {
        let journey = Journey {
            departure_at: "20240115T080000".into(),
            arrival_at: "20240115T100000".into(),
            duration_seconds: 7200,
            transfer_count: 0,
            walking_duration_seconds: 300,
            co2_grams: None,
            sections: vec![
                section(SectionType::StreetNetwork),
                section(SectionType::PublicTransport),
                section(SectionType::Waiting),
            ],
        };
        assert_eq!(journey.rides().count(), 1);
    }

    #[test]
    fn section_type_serializes_snake_case() {
        let json = serde_json::to_value(section(SectionType::PublicTransport)).unwrap();
        assert_eq!(json["type"], "public_transport");
        assert_eq!(json["from"]["name"], UNKNOWN_PLACE);
    }
}
