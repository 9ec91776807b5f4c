//! Station catalog error types.

use std::path::PathBuf;

use crate::domain::StationId;

/// Errors that can occur while loading the station catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Catalog file could not be opened
    #[error("failed to read station catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row could not be decoded
    #[error("invalid station catalog row: {0}")]
    Csv(#[from] csv::Error),

    /// Two rows share an id
    #[error("duplicate station id {0} in catalog")]
    DuplicateId(StationId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CatalogError::DuplicateId(StationId(12));
        assert_eq!(err.to_string(), "duplicate station id 12 in catalog");

        let err = CatalogError::Io {
            path: PathBuf::from("data/stations.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.to_string().contains("data/stations.csv"));
        assert!(err.to_string().contains("no such file"));
    }
}
