//! Travel order resolution.
//!
//! Combines the station matcher, the geo fallback and the time resolver to
//! turn recognized entities into a [`ResolvedOrder`]. A slot that cannot be
//! resolved is left `None`; that is an expected outcome, never an error.

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info};

use crate::domain::{Coordinates, EntityLabel, ExtractedEntity, ResolvedOrder, StationId};
use crate::ner::EntityExtractor;
use crate::stations::{StationCatalog, StationMatcher};
use crate::time::{DateParser, RelativeDateParser, TimeResolver, format_iso};

/// Raw text of the last entity seen for each label.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Mentions<'a> {
    departure: Option<&'a str>,
    destination: Option<&'a str>,
    time: Option<&'a str>,
}

impl<'a> Mentions<'a> {
    /// Later spans override earlier ones with the same label.
    fn collect(entities: &'a [ExtractedEntity]) -> Self {
        let mut mentions = Mentions::default();
        for entity in entities {
            let slot = match entity.label {
                EntityLabel::Departure => &mut mentions.departure,
                EntityLabel::Destination => &mut mentions.destination,
                EntityLabel::Time => &mut mentions.time,
            };
            *slot = Some(entity.text.as_str());
        }
        mentions
    }
}

/// Resolves recognized entities to station ids and an instant.
#[derive(Debug, Clone)]
pub struct OrderResolver<P = RelativeDateParser> {
    stations: StationMatcher,
    time: TimeResolver<P>,
}

impl OrderResolver {
    /// Create a resolver using the built-in date parser.
    pub fn new(stations: StationMatcher) -> Self {
        Self::with_time_resolver(stations, TimeResolver::new())
    }
}

impl<P: DateParser> OrderResolver<P> {
    pub fn with_time_resolver(stations: StationMatcher, time: TimeResolver<P>) -> Self {
        Self { stations, time }
    }

    pub fn stations(&self) -> &StationMatcher {
        &self.stations
    }

    fn catalog(&self) -> &StationCatalog {
        self.stations.catalog()
    }

    /// Resolve entities against the current local time.
    pub fn resolve(
        &self,
        entities: &[ExtractedEntity],
        coords: Option<Coordinates>,
    ) -> ResolvedOrder {
        self.resolve_at(entities, coords, Local::now().naive_local())
    }

    /// Resolve entities against an explicit reference instant.
    pub fn resolve_at(
        &self,
        entities: &[ExtractedEntity],
        coords: Option<Coordinates>,
        now: NaiveDateTime,
    ) -> ResolvedOrder {
        let mentions = Mentions::collect(entities);

        let departure_id = self
            .station(mentions.departure)
            .or_else(|| coords.and_then(|point| self.nearest_departure(point)));
        let destination_id = self.station(mentions.destination);
        let datetime_iso = mentions.time.and_then(|text| {
            let resolved = self.time.resolve(text, now);
            if resolved.is_none() {
                debug!(text, "time expression not resolved");
            }
            resolved.map(format_iso)
        });

        let order = ResolvedOrder {
            departure_id,
            destination_id,
            datetime_iso,
        };
        info!(
            departure = ?order.departure_id,
            destination = ?order.destination_id,
            datetime = ?order.datetime_iso,
            "resolved travel order"
        );
        order
    }

    /// Run `extractor` over `text`, then resolve the entities it found.
    pub fn resolve_text<E>(
        &self,
        extractor: &E,
        text: &str,
        coords: Option<Coordinates>,
    ) -> ResolvedOrder
    where
        E: EntityExtractor + ?Sized,
    {
        let entities = extractor.extract(text);
        debug!(count = entities.len(), "extracted entities");
        self.resolve(&entities, coords)
    }

    fn station(&self, text: Option<&str>) -> Option<StationId> {
        let text = text?;
        match self.stations.resolve(text) {
            Some(m) => Some(m.id),
            None => {
                debug!(text, "station text not resolved");
                None
            }
        }
    }

    fn nearest_departure(&self, point: Coordinates) -> Option<StationId> {
        let id = self.catalog().nearest(point);
        debug!(
            latitude = point.latitude,
            longitude = point.longitude,
            id = ?id,
            "departure from geo fallback"
        );
        id
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::*;
    use crate::ner::StaticExtractor;
    use crate::stations::StationEntry;

    fn catalog() -> Arc<StationCatalog> {
        let entries = vec![
            StationEntry::new(
                1u32,
                "Paris Gare de Lyon",
                "paris gare de lyon",
                Some(Coordinates::new(48.8443, 2.3730)),
            ),
            StationEntry::new(
                42u32,
                "Lyon Perrache",
                "lyon perrache",
                Some(Coordinates::new(45.7485, 4.8257)),
            ),
            StationEntry::new(
                3u32,
                "Marseille Saint-Charles",
                "marseille saint charles",
                Some(Coordinates::new(43.3027, 5.3806)),
            ),
            StationEntry::new(4u32, "Bordeaux Saint-Jean", "bordeaux saint jean", None),
        ];
        Arc::new(StationCatalog::from_entries(entries).unwrap())
    }

    fn resolver() -> OrderResolver {
        OrderResolver::new(StationMatcher::new(catalog()))
    }

    fn reference() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn entity(label: EntityLabel, text: &str) -> ExtractedEntity {
        ExtractedEntity::new(label, text)
    }

    #[test]
    fn resolves_all_slots() {
        let entities = [
            entity(EntityLabel::Departure, "Paris Gare de Lyon"),
            entity(EntityLabel::Destination, "Marseille St Charles"),
            entity(EntityLabel::Time, "15h"),
        ];
        let order = resolver().resolve_at(&entities, None, reference());
        assert_eq!(order.departure_id, Some(StationId(1)));
        assert_eq!(order.destination_id, Some(StationId(3)));
        assert_eq!(order.datetime_iso.as_deref(), Some("2024-01-15T15:00:00"));
        assert!(order.is_complete());
    }

    #[test]
    fn no_entities_gives_empty_order() {
        let order = resolver().resolve_at(&[], None, reference());
        assert_eq!(order, ResolvedOrder::default());
    }

    #[test]
    fn geo_fallback_fills_departure_only() {
        let entities = [entity(EntityLabel::Destination, "Atlantis")];
        let coords = Some(Coordinates::new(45.75, 4.85));
        let order = resolver().resolve_at(&entities, coords, reference());
        assert_eq!(order.departure_id, Some(StationId(42)));
        assert_eq!(order.destination_id, None);
    }

    #[test]
    fn geo_fallback_without_entities() {
        let order = resolver().resolve_at(&[], Some(Coordinates::new(45.75, 4.85)), reference());
        assert_eq!(order.departure_id, Some(StationId(42)));
        assert_eq!(order.destination_id, None);
        assert_eq!(order.datetime_iso, None);
    }

    #[test]
    fn geo_fallback_when_departure_text_misses() {
        let entities = [entity(EntityLabel::Departure, "zzzz")];
        let coords = Some(Coordinates::new(43.3, 5.38));
        let order = resolver().resolve_at(&entities, coords, reference());
        assert_eq!(order.departure_id, Some(StationId(3)));
    }

    #[test]
    fn matched_departure_ignores_coordinates() {
        let entities = [entity(EntityLabel::Departure, "Marseille Saint Charles")];
        let coords = Some(Coordinates::new(48.85, 2.37));
        let order = resolver().resolve_at(&entities, coords, reference());
        assert_eq!(order.departure_id, Some(StationId(3)));
    }

    #[test]
    fn unmatched_departure_without_coordinates_is_none() {
        let entities = [entity(EntityLabel::Departure, "zzzz")];
        let order = resolver().resolve_at(&entities, None, reference());
        assert_eq!(order.departure_id, None);
    }

    #[test]
    fn last_mention_wins() {
        let entities = [
            entity(EntityLabel::Destination, "Paris Gare de Lyon"),
            entity(EntityLabel::Time, "8h"),
            entity(EntityLabel::Destination, "Lyon Perrache"),
            entity(EntityLabel::Time, "ce soir"),
        ];
        let order = resolver().resolve_at(&entities, None, reference());
        assert_eq!(order.destination_id, Some(StationId(42)));
        assert_eq!(order.datetime_iso.as_deref(), Some("2024-01-15T18:00:00"));
    }

    #[test]
    fn last_mention_wins_even_when_it_misses() {
        let entities = [
            entity(EntityLabel::Destination, "Lyon Perrache"),
            entity(EntityLabel::Destination, "qqqq"),
        ];
        let order = resolver().resolve_at(&entities, None, reference());
        assert_eq!(order.destination_id, None);
    }

    #[test]
    fn unresolvable_time_is_none() {
        let entities = [entity(EntityLabel::Time, "whenever")];
        let order = resolver().resolve_at(&entities, None, reference());
        assert_eq!(order.datetime_iso, None);
    }

    #[test]
    fn past_clock_time_rolls_over() {
        let evening = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap();
        let entities = [entity(EntityLabel::Time, "à 15h")];
        let order = resolver().resolve_at(&entities, None, evening);
        assert_eq!(order.datetime_iso.as_deref(), Some("2024-01-16T15:00:00"));
    }

    #[test]
    fn resolve_text_uses_extractor() {
        let extractor = StaticExtractor::new(vec![
            entity(EntityLabel::Departure, "Bordeaux Saint Jean"),
            entity(EntityLabel::Destination, "Paris Gare de Lyon"),
        ]);
        let order = resolver().resolve_text(&extractor, "Bordeaux -> Paris", None);
        assert_eq!(order.departure_id, Some(StationId(4)));
        assert_eq!(order.destination_id, Some(StationId(1)));
        assert!(order.is_routable());
    }

    #[test]
    fn mentions_keep_last_text() {
        let entities = [
            entity(EntityLabel::Departure, "a"),
            entity(EntityLabel::Departure, "b"),
        ];
        let mentions = Mentions::collect(&entities);
        assert_eq!(mentions.departure, Some("b"));
        assert_eq!(mentions.destination, None);
    }
}
