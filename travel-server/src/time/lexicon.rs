//! Day-part phrases and the time of day they stand for.

/// A vague phrase anchored to a representative time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayPart {
    /// Normalized phrase searched for as a substring.
    pub phrase: &'static str,
    pub hour: u32,
    pub minute: u32,
}

const fn part(phrase: &'static str, hour: u32, minute: u32) -> DayPart {
    DayPart {
        phrase,
        hour,
        minute,
    }
}

/// Day-part table, searched in declaration order.
///
/// A phrase that contains another phrase is declared first so that
/// "apres midi" is not read as "midi" and "soiree" not as "soir".
pub const DAY_PARTS: &[DayPart] = &[
    part("apres midi", 14, 0),
    part("matinee", 9, 0),
    part("matin", 8, 0),
    part("midi", 12, 0),
    part("soiree", 19, 0),
    part("soir", 18, 0),
    part("nuit", 21, 0),
    part("afternoon", 14, 0),
    part("morning", 8, 0),
    part("noon", 12, 0),
    part("evening", 18, 0),
    part("tonight", 20, 0),
    part("night", 21, 0),
];

/// First day part whose phrase occurs in `normalized`.
pub fn lookup(normalized: &str) -> Option<&'static DayPart> {
    DAY_PARTS.iter().find(|p| normalized.contains(p.phrase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evening() {
        let p = lookup("ce soir").unwrap();
        assert_eq!((p.hour, p.minute), (18, 0));
    }

    #[test]
    fn longer_phrase_wins_over_contained_phrase() {
        assert_eq!(lookup("cet apres midi").unwrap().hour, 14);
        assert_eq!(lookup("dans la matinee").unwrap().hour, 9);
        assert_eq!(lookup("en soiree").unwrap().hour, 19);
        assert_eq!(lookup("a midi").unwrap().hour, 12);
    }

    #[test]
    fn english_phrases() {
        assert_eq!(lookup("tomorrow morning").unwrap().hour, 8);
        assert_eq!(lookup("tonight").unwrap().hour, 20);
        assert_eq!(lookup("late at night").unwrap().hour, 21);
    }

    #[test]
    fn no_phrase() {
        assert!(lookup("demain").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn every_entry_is_a_valid_time() {
        for p in DAY_PARTS {
            assert!(p.hour < 24 && p.minute < 60, "{p:?}");
            assert_eq!(crate::text::normalize(p.phrase), p.phrase);
        }
    }
}
