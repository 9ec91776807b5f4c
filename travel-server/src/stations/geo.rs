//! Nearest-station lookup by great-circle distance.

use crate::domain::{Coordinates, StationId};

use super::catalog::StationCatalog;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometres.
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    EARTH_RADIUS_KM * 2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

impl StationCatalog {
    /// Id of the geo-located station closest to `point`.
    ///
    /// Stations without coordinates are never candidates. Equal distances
    /// keep the first station in catalog order.
    pub fn nearest(&self, point: Coordinates) -> Option<StationId> {
        self.geo_located()
            .map(|(id, c)| (id, haversine_km(point, c)))
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(id, _)| id)
    }
}
