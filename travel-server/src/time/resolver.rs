//! Time expression resolution.
//!
//! Tiers are tried in order and the first that produces a value wins:
//!
//! 1. a clock time such as "15h", "à 8h45" or "17:30";
//! 2. a day part such as "ce soir" or "tomorrow morning";
//! 3. a general date expression, delegated to a [`DateParser`].
//!
//! Tiers 1 and 2 only know a time of day. They are placed on the reference
//! day and pushed to the next day when that instant is already past, so the
//! result is never earlier than the reference. Tier 3 results are returned
//! as the parser produced them.

use std::sync::OnceLock;

use chrono::{Duration, NaiveDateTime};
use regex::Regex;
use tracing::debug;

use crate::text::normalize;

use super::lexicon;
use super::relative::{DateParser, DateParserSettings, RelativeDateParser};

/// Format used for resolved instants.
pub const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Format an instant the way resolved orders carry it.
pub fn format_iso(dt: NaiveDateTime) -> String {
    dt.format(ISO_FORMAT).to_string()
}

fn clock_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?:\b(dans|in)\s+)?(?:\b(?:a|à|vers|at)\s+)?(\d{1,2})\s*(?:heures?|h|:)\s*(\d{1,2})?\b",
        )
            .expect("clock regex must compile")
    })
}

/// Which tier produced a resolved time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeTier {
    Clock,
    DayPart,
    General,
}

/// Resolves time expressions against a reference instant.
#[derive(Debug, Clone, Default)]
pub struct TimeResolver<P = RelativeDateParser> {
    parser: P,
}

impl TimeResolver {
    /// Create a resolver backed by the built-in date parser.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: DateParser> TimeResolver<P> {
    /// Create a resolver with a custom general-purpose date parser.
    pub fn with_parser(parser: P) -> Self {
        Self { parser }
    }

    /// Resolve `expression` relative to `reference`, reporting the tier used.
    pub fn resolve_with_tier(
        &self,
        expression: &str,
        reference: NaiveDateTime,
    ) -> Option<(NaiveDateTime, TimeTier)> {
        let lowered = expression.trim().to_lowercase();
        if lowered.is_empty() {
            return None;
        }

        if let Some((hour, minute)) = parse_clock(&lowered) {
            return at_or_after(reference, hour, minute).map(|dt| (dt, TimeTier::Clock));
        }

        let normalized = normalize(&lowered);
        if let Some(part) = lexicon::lookup(&normalized) {
            return at_or_after(reference, part.hour, part.minute)
                .map(|dt| (dt, TimeTier::DayPart));
        }

        let settings = DateParserSettings::anchored_at(reference);
        match self.parser.parse(expression, &settings) {
            Some(dt) => Some((dt, TimeTier::General)),
            None => {
                debug!(expression, "no time tier matched");
                None
            }
        }
    }

    /// Resolve `expression` relative to `reference`.
    pub fn resolve(&self, expression: &str, reference: NaiveDateTime) -> Option<NaiveDateTime> {
        self.resolve_with_tier(expression, reference)
            .map(|(dt, _)| dt)
    }

    /// Resolve `expression` and format it as `YYYY-MM-DDTHH:MM:SS`.
    pub fn normalize(&self, expression: &str, reference: NaiveDateTime) -> Option<String> {
        self.resolve(expression, reference).map(format_iso)
    }
}

/// Hour and minute of the first clock pattern, if it is a valid time.
///
/// "dans 2 heures" is an offset, not a clock time, and is left to the
/// general tier. An out-of-range hour or minute is not a clock time at all,
/// so the caller falls through to the next tier.
fn parse_clock(lowered: &str) -> Option<(u32, u32)> {
    let caps = clock_re()
        .captures_iter(lowered)
        .find(|caps| caps.get(1).is_none())?;
    let hour: u32 = caps.get(2)?.as_str().parse().ok()?;
    let minute: u32 = match caps.get(3) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}

/// `hour:minute` on the reference day, or the next day if that is earlier
/// than the reference.
fn at_or_after(reference: NaiveDateTime, hour: u32, minute: u32) -> Option<NaiveDateTime> {
    let same_day = reference.date().and_hms_opt(hour, minute, 0)?;
    if same_day < reference {
        same_day.checked_add_signed(Duration::days(1))
    } else {
        Some(same_day)
    }
}
