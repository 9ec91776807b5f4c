//! In-memory station reference data.
//!
//! Loaded once at startup from a CSV file and read-only afterwards, so a
//! single `Arc<StationCatalog>` can be shared by every request without
//! locking.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::{Coordinates, StationId};
use crate::text::normalize;

use super::error::CatalogError;

/// A station as known to the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct StationEntry {
    pub id: StationId,
    /// Display name.
    pub name: String,
    /// Normalized alias compared against entity text.
    pub match_key: String,
    /// Absent for rows without usable coordinates.
    pub coordinates: Option<Coordinates>,
}

impl StationEntry {
    /// Create an entry, normalizing `alias` into its match key.
    pub fn new(
        id: impl Into<StationId>,
        name: impl Into<String>,
        alias: &str,
        coordinates: Option<Coordinates>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            match_key: normalize(alias),
            coordinates,
        }
    }
}

/// One CSV row. Headers from the processed station export are accepted
/// alongside the plain column names.
#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(alias = "index")]
    id: u32,
    #[serde(alias = "raw")]
    name: String,
    #[serde(alias = "entries", default)]
    alias: Option<String>,
    #[serde(alias = "Y_WGS84", default)]
    latitude: Option<f64>,
    #[serde(alias = "X_WGS84", default)]
    longitude: Option<f64>,
}

impl CatalogRow {
    fn into_entry(self) -> StationEntry {
        let alias = match self.alias.as_deref() {
            Some(a) if !a.trim().is_empty() => a.to_string(),
            _ => self.name.clone(),
        };
        let coordinates = Coordinates::from_parts(
            self.latitude.filter(|v| v.is_finite()),
            self.longitude.filter(|v| v.is_finite()),
        );
        StationEntry::new(self.id, self.name, &alias, coordinates)
    }
}

/// Read-only station catalog, in file order.
#[derive(Debug, Clone, Default)]
pub struct StationCatalog {
    entries: Vec<StationEntry>,
    by_id: HashMap<StationId, usize>,
}

impl StationCatalog {
    /// Load the catalog from a CSV file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            stations = catalog.len(),
            geo_located = catalog.geo_located_count(),
            "loaded station catalog"
        );
        Ok(catalog)
    }

    /// Parse the catalog from any CSV source with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut entries = Vec::new();
        for row in csv.deserialize::<CatalogRow>() {
            entries.push(row?.into_entry());
        }

        Self::from_entries(entries)
    }

    /// Build a catalog from prepared entries, keeping their order.
    pub fn from_entries(entries: Vec<StationEntry>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            if by_id.insert(entry.id, idx).is_some() {
                return Err(CatalogError::DuplicateId(entry.id));
            }
            if entry.match_key.is_empty() {
                debug!(id = %entry.id, name = %entry.name, "station has an empty match key");
            }
        }
        Ok(Self { entries, by_id })
    }

    /// Look up a station by id.
    pub fn get(&self, id: StationId) -> Option<&StationEntry> {
        self.by_id.get(&id).map(|&idx| &self.entries[idx])
    }

    /// Coordinates of a station, if it exists and is geo-located.
    pub fn coordinates(&self, id: StationId) -> Option<Coordinates> {
        self.get(id).and_then(|e| e.coordinates)
    }

    /// All stations in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &StationEntry> {
        self.entries.iter()
    }

    /// Stations that have coordinates, in catalog order.
    pub fn geo_located(&self) -> impl Iterator<Item = (StationId, Coordinates)> + '_ {
        self.entries
            .iter()
            .filter_map(|e| e.coordinates.map(|c| (e.id, c)))
    }

    pub fn geo_located_count(&self) -> usize {
        self.geo_located().count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
