//! Fuzzy station name resolution.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, trace};

use crate::domain::StationId;
use crate::text::normalize;

use super::catalog::{StationCatalog, StationEntry};
use super::similarity::token_sort_ratio;

/// Default minimum score (0..=100) for a match to be accepted.
pub const DEFAULT_MIN_SCORE: u8 = 60;

/// A catalog station chosen for some text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationMatch {
    pub id: StationId,
    pub name: String,
    /// The catalog alias that won.
    pub matched_alias: String,
    pub score: u8,
}

impl StationMatch {
    fn from_entry(entry: &StationEntry, score: u8) -> Self {
        Self {
            id: entry.id,
            name: entry.name.clone(),
            matched_alias: entry.match_key.clone(),
            score,
        }
    }
}

/// Resolves free text to the best-scoring catalog station.
///
/// Candidates are scored with a token-sort ratio. The highest score wins and
/// equal scores keep the station that appears first in the catalog.
#[derive(Debug, Clone)]
pub struct StationMatcher {
    catalog: Arc<StationCatalog>,
    min_score: u8,
}

impl StationMatcher {
    /// Create a matcher with the default threshold.
    pub fn new(catalog: Arc<StationCatalog>) -> Self {
        Self {
            catalog,
            min_score: DEFAULT_MIN_SCORE,
        }
    }

    /// Set the minimum accepted score (clamped to 100).
    pub fn with_min_score(mut self, min_score: u8) -> Self {
        self.min_score = min_score.min(100);
        self
    }

    pub fn min_score(&self) -> u8 {
        self.min_score
    }

    pub fn catalog(&self) -> &Arc<StationCatalog> {
        &self.catalog
    }

    /// Resolve raw entity text to a station.
    ///
    /// Returns `None` for blank input or when no station reaches the
    /// threshold.
    pub fn resolve(&self, raw: &str) -> Option<StationMatch> {
        let query = normalize(raw);
        if query.is_empty() {
            return None;
        }

        let mut best: Option<(&StationEntry, u8)> = None;
        for entry in self.catalog.iter() {
            let score = token_sort_ratio(&query, &entry.match_key);
            trace!(id = %entry.id, alias = %entry.match_key, score, "scored candidate");
            // Strictly greater: the first station seen keeps a tie.
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((entry, score));
            }
        }

        match best {
            Some((entry, score)) if score >= self.min_score => {
                debug!(query = %query, id = %entry.id, score, "station matched");
                Some(StationMatch::from_entry(entry, score))
            }
            Some((entry, score)) => {
                debug!(
                    query = %query,
                    best_id = %entry.id,
                    score,
                    min_score = self.min_score,
                    "best station below threshold"
                );
                None
            }
            None => None,
        }
    }

    /// Project a known id back into display form, with a score of 100.
    pub fn get_by_id(&self, id: StationId) -> Option<StationMatch> {
        self.catalog
            .get(id)
            .map(|entry| StationMatch::from_entry(entry, 100))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinates;

    fn catalog() -> Arc<StationCatalog> {
        let entries = vec![
            StationEntry::new(
                1u32,
                "Paris Gare de Lyon",
                "paris gare de lyon",
                Some(Coordinates::new(48.8443, 2.3730)),
            ),
            StationEntry::new(
                2u32,
                "Lyon Part-Dieu",
                "lyon part dieu",
                Some(Coordinates::new(45.7606, 4.8594)),
            ),
            StationEntry::new(
                3u32,
                "Marseille Saint-Charles",
                "marseille saint charles",
                Some(Coordinates::new(43.3027, 5.3806)),
            ),
            StationEntry::new(4u32, "Nîmes", "nimes", None),
            StationEntry::new(5u32, "Nîmes Centre", "nimes", None),
        ];
        Arc::new(StationCatalog::from_entries(entries).unwrap())
    }

    #[test]
    fn exact_match() {
        let matcher = StationMatcher::new(catalog());
        let m = matcher.resolve("Lyon Part-Dieu").unwrap();
        assert_eq!(m.id, StationId(2));
        assert_eq!(m.score, 100);
        assert_eq!(m.name, "Lyon Part-Dieu");
        assert_eq!(m.matched_alias, "lyon part dieu");
    }

    #[test]
    fn word_order_does_not_matter() {
        let matcher = StationMatcher::new(catalog());
        let a = matcher.resolve("Gare de Lyon Paris").unwrap();
        let b = matcher.resolve("Paris Gare de Lyon").unwrap();
        assert_eq!(a.id, b.id);
        assert_eq!(a.id, StationId(1));
    }

    #[test]
    fn accents_and_case_are_ignored() {
        let matcher = StationMatcher::new(catalog());
        let m = matcher.resolve("MARSEILLE SAINT-CHARLES").unwrap();
        assert_eq!(m.id, StationId(3));
    }

    #[test]
    fn typo_still_matches() {
        let matcher = StationMatcher::new(catalog());
        let m = matcher.resolve("marseile saint charle").unwrap();
        assert_eq!(m.id, StationId(3));
        assert!(m.score < 100);
    }

    #[test]
    fn below_threshold_is_no_match() {
        let matcher = StationMatcher::new(catalog());
        assert!(matcher.resolve("zzzz qqqq").is_none());
        // "paris" alone against "de gare lyon paris" scores 43
        assert!(matcher.resolve("paris").is_none());
    }

    #[test]
    fn custom_threshold() {
        let matcher = StationMatcher::new(catalog()).with_min_score(40);
        assert_eq!(matcher.resolve("paris").unwrap().id, StationId(1));

        let strict = StationMatcher::new(catalog()).with_min_score(101);
        assert_eq!(strict.min_score(), 100);
        assert!(strict.resolve("marseile saint charle").is_none());
    }

    #[test]
    fn blank_input_is_no_match() {
        let matcher = StationMatcher::new(catalog());
        assert!(matcher.resolve("").is_none());
        assert!(matcher.resolve("   ").is_none());
        assert!(matcher.resolve("?!").is_none());
    }

    #[test]
    fn ties_keep_first_catalog_entry() {
        let matcher = StationMatcher::new(catalog());
        let m = matcher.resolve("Nimes").unwrap();
        assert_eq!(m.id, StationId(4));
    }

    #[test]
    fn empty_catalog_is_no_match() {
        let matcher = StationMatcher::new(Arc::new(StationCatalog::default()));
        assert!(matcher.resolve("lyon").is_none());
    }

    #[test]
    fn get_by_id_projects_display_form() {
        let matcher = StationMatcher::new(catalog());
        let m = matcher.get_by_id(StationId(3)).unwrap();
        assert_eq!(m.name, "Marseille Saint-Charles");
        assert_eq!(m.score, 100);
        assert!(matcher.get_by_id(StationId(42)).is_none());
    }
}
