//! Journey planner response DTOs.
//!
//! These types map the planner's JSON. Nearly everything is `Option`
//! because the planner omits fields freely; defaults are applied later in
//! `convert`, keeping "tolerate missing keys" apart from the mapping rules.

use serde::{Deserialize, Deserializer, de};

/// Top-level document returned by the journeys endpoint.
///
/// Journeys stay as raw JSON values here so that each one can be decoded
/// on its own and a malformed record only loses itself.
#[derive(Debug, Clone, Deserialize)]
pub struct JourneysResponse {
    pub journeys: Option<Vec<serde_json::Value>>,

    /// Error block, present when the planner could not answer.
    pub error: Option<ApiErrorDto>,
}

/// Planner-reported error.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDto {
    /// Machine-readable id such as "no_solution".
    pub id: Option<String>,
    pub message: Option<String>,
}

/// One journey record.
#[derive(Debug, Clone, Deserialize)]
pub struct JourneyDto {
    /// Planner-formatted datetime, e.g. "20240115T153000".
    pub departure_date_time: Option<String>,
    pub arrival_date_time: Option<String>,

    /// Total duration in seconds.
    pub duration: Option<i64>,
    pub nb_transfers: Option<u32>,
    pub durations: Option<DurationsDto>,
    pub co2_emission: Option<Co2Dto>,
    pub sections: Option<Vec<SectionDto>>,
}

/// Duration breakdown of a journey.
#[derive(Debug, Clone, Deserialize)]
pub struct DurationsDto {
    pub walking: Option<i64>,
}

/// CO2 estimate; the unit is grams in practice.
#[derive(Debug, Clone, Deserialize)]
pub struct Co2Dto {
    pub value: Option<f64>,
    pub unit: Option<String>,
}

/// One section of a journey.
#[derive(Debug, Clone, Deserialize)]
pub struct SectionDto {
    /// "public_transport", "street_network", "transfer", "waiting", ...
    #[serde(rename = "type")]
    pub section_type: Option<String>,
    pub mode: Option<String>,
    pub from: Option<PlaceDto>,
    pub to: Option<PlaceDto>,
    pub departure_date_time: Option<String>,
    pub arrival_date_time: Option<String>,
    pub duration: Option<i64>,

    /// Line and vehicle details, only present on transit rides.
    pub display_informations: Option<DisplayInformationsDto>,
}

/// A section endpoint. At most one of the nested objects is usually set.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDto {
    pub name: Option<String>,
    pub embedded_type: Option<String>,
    pub stop_point: Option<NamedPointDto>,
    pub stop_area: Option<NamedPointDto>,
    pub address: Option<NamedPointDto>,
}

/// A named object with a position (stop point, stop area, address).
#[derive(Debug, Clone, Deserialize)]
pub struct NamedPointDto {
    pub name: Option<String>,
    pub coord: Option<CoordDto>,
}

/// Position. The planner sends numbers as strings ("2.3730").
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CoordDto {
    #[serde(deserialize_with = "number_or_string")]
    pub lon: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub lat: f64,
}

/// Line and vehicle details for a transit section.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayInformationsDto {
    pub label: Option<String>,
    pub code: Option<String>,
    pub commercial_mode: Option<String>,
    pub direction: Option<String>,
    pub network: Option<String>,
}

fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid coordinate: {s:?}"))),
    }
}
