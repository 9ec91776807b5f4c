//! Journey planner HTTP client.
//!
//! Looks up station coordinates in the catalog, queries the planner's
//! journeys endpoint and maps every failure onto [`JourneyError`].

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{Coordinates, StationId};
use crate::stations::StationCatalog;

use super::convert::{JourneySearchResult, parse_journeys_response};
use super::error::{JourneyError, StationSide};

/// Default base URL for the planner API.
pub const DEFAULT_BASE_URL: &str = "https://api.navitia.io/v1";

/// Default coverage region.
pub const DEFAULT_COVERAGE: &str = "sncf";

/// Datetime format the planner expects in query strings.
const PLANNER_DATETIME_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Configuration for the journey planner client.
#[derive(Debug, Clone)]
pub struct NavitiaConfig {
    /// API key sent in the `Authorization` header
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Coverage region, e.g. "sncf"
    pub coverage: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Number of journeys requested
    pub count: u32,
    /// Level of detail requested from the planner
    pub depth: u32,
}

impl NavitiaConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            coverage: DEFAULT_COVERAGE.to_string(),
            timeout_secs: 30,
            count: 1,
            depth: 2,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the coverage region.
    pub fn with_coverage(mut self, coverage: impl Into<String>) -> Self {
        self.coverage = coverage.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Whether an API key has been configured.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    fn journeys_url(&self) -> String {
        format!(
            "{}/coverage/{}/journeys",
            self.base_url.trim_end_matches('/'),
            self.coverage
        )
    }
}

/// Whether the requested datetime is a departure or an arrival time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatetimeRepresents {
    #[default]
    Departure,
    Arrival,
}

impl DatetimeRepresents {
    /// Parse "departure" or "arrival" (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "departure" => Some(DatetimeRepresents::Departure),
            "arrival" => Some(DatetimeRepresents::Arrival),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DatetimeRepresents::Departure => "departure",
            DatetimeRepresents::Arrival => "arrival",
        }
    }
}

/// A journey search between two catalog stations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyQuery {
    pub departure: StationId,
    pub destination: StationId,
    /// Requested instant, `YYYY-MM-DDTHH:MM:SS`. `None` means "now".
    pub datetime_iso: Option<String>,
    pub represents: DatetimeRepresents,
}

impl JourneyQuery {
    pub fn new(departure: StationId, destination: StationId) -> Self {
        Self {
            departure,
            destination,
            datetime_iso: None,
            represents: DatetimeRepresents::Departure,
        }
    }

    pub fn at(mut self, datetime_iso: impl Into<String>) -> Self {
        self.datetime_iso = Some(datetime_iso.into());
        self
    }

    pub fn represents(mut self, represents: DatetimeRepresents) -> Self {
        self.represents = represents;
        self
    }
}

/// Convert an ISO 8601 datetime to the planner's compact form.
///
/// Accepts RFC 3339 (the offset is dropped, local wall time kept), naive
/// datetimes with or without seconds, and bare dates (midnight).
pub fn to_planner_datetime(iso: &str) -> Option<String> {
    let iso = iso.trim();
    let naive = DateTime::parse_from_rfc3339(iso)
        .map(|dt| dt.naive_local())
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%.f").ok())
        .or_else(|| NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M").ok())
        .or_else(|| {
            NaiveDate::parse_from_str(iso, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;
    Some(naive.format(PLANNER_DATETIME_FORMAT).to_string())
}

/// Journey planner API client.
///
/// Station ids are turned into coordinates through the shared catalog, so
/// only geo-located stations can be queried.
#[derive(Debug, Clone)]
pub struct NavitiaClient {
    http: reqwest::Client,
    config: NavitiaConfig,
    catalog: Arc<StationCatalog>,
}

impl NavitiaClient {
    /// Create a new client. A missing API key is reported per search, not here.
    pub fn new(config: NavitiaConfig, catalog: Arc<StationCatalog>) -> Result<Self, JourneyError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            config,
            catalog,
        })
    }

    pub fn config(&self) -> &NavitiaConfig {
        &self.config
    }

    /// Search journeys for the query.
    ///
    /// Configuration and station checks happen before any network I/O.
    pub async fn search_journeys(&self, query: &JourneyQuery) -> JourneySearchResult {
        let params = self.prepare(query)?;
        self.fetch(params).await
    }

    /// Like [`search_journeys`](Self::search_journeys), but gives up with
    /// [`JourneyError::Timeout`] as soon as `cancel` completes.
    pub async fn search_journeys_until<F>(
        &self,
        query: &JourneyQuery,
        cancel: F,
    ) -> JourneySearchResult
    where
        F: Future<Output = ()>,
    {
        let params = self.prepare(query)?;
        tokio::select! {
            result = self.fetch(params) => result,
            () = cancel => {
                debug!(departure = %query.departure, destination = %query.destination, "journey search cancelled");
                Err(JourneyError::Timeout)
            }
        }
    }

    fn station_coordinates(
        &self,
        side: StationSide,
        id: StationId,
    ) -> Result<Coordinates, JourneyError> {
        self.catalog
            .coordinates(id)
            .ok_or(JourneyError::StationNotFound { side, id })
    }

    fn prepare(&self, query: &JourneyQuery) -> Result<Vec<(&'static str, String)>, JourneyError> {
        if !self.config.has_api_key() {
            warn!("journey search requested without an API key");
            return Err(JourneyError::MissingApiKey);
        }

        let from = self.station_coordinates(StationSide::Departure, query.departure)?;
        let to = self.station_coordinates(StationSide::Destination, query.destination)?;

        let mut params = vec![
            ("from", from.to_lon_lat()),
            ("to", to.to_lon_lat()),
            ("datetime_represents", query.represents.as_str().to_string()),
            ("count", self.config.count.to_string()),
            ("depth", self.config.depth.to_string()),
        ];

        if let Some(iso) = query.datetime_iso.as_deref() {
            match to_planner_datetime(iso) {
                Some(datetime) => params.push(("datetime", datetime)),
                None => warn!(datetime = iso, "ignoring unparsable journey datetime"),
            }
        }

        Ok(params)
    }

    async fn fetch(&self, params: Vec<(&'static str, String)>) -> JourneySearchResult {
        let url = self.config.journeys_url();
        debug!(url = %url, ?params, "querying journey planner");

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, self.config.api_key.as_str())
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                let err = JourneyError::from(e);
                warn!(error = %err, "journey planner request failed");
                err
            })?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            warn!("journey planner rejected the API key");
            return Err(JourneyError::InvalidCredentials);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            debug!("journey planner found no journey");
            return Err(JourneyError::NoJourneyFound);
        }

        if !status.is_success() {
            warn!(status = status.as_u16(), "journey planner returned an error status");
            return Err(JourneyError::Upstream {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        parse_journeys_response(&body)
    }
}
