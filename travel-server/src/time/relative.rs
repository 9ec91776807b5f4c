//! General date expressions: relative days, weekdays, offsets and dates.
//!
//! This is the last resort after clock times and day parts. It sits behind
//! the [`DateParser`] trait so a fuller natural-language parser can be
//! swapped in without touching the resolver.

use std::sync::OnceLock;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use regex::Regex;

use crate::text::{normalize, tokens};

/// How ambiguous expressions are anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateParserSettings {
    /// Instant relative expressions are measured from.
    pub relative_base: NaiveDateTime,
    /// Pick the next occurrence rather than the most recent one.
    pub prefer_future: bool,
    /// Use day 1 when an expression names a month but no day.
    pub prefer_first_day_of_month: bool,
}

impl DateParserSettings {
    /// Future-leaning, first-of-month settings anchored at `base`.
    pub fn anchored_at(relative_base: NaiveDateTime) -> Self {
        Self {
            relative_base,
            prefer_future: true,
            prefer_first_day_of_month: true,
        }
    }
}

/// Natural-language date/time parsing collaborator.
pub trait DateParser {
    /// Parse `text` into an absolute instant, or `None` if not understood.
    fn parse(&self, text: &str, settings: &DateParserSettings) -> Option<NaiveDateTime>;
}

/// Rule-based French/English date parser.
///
/// Relative days and weekdays keep the base time of day; offsets in minutes
/// or hours move it; explicit calendar dates resolve to midnight.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelativeDateParser;

const MONTHS: &[(&str, u32)] = &[
    ("janvier", 1),
    ("january", 1),
    ("fevrier", 2),
    ("february", 2),
    ("mars", 3),
    ("march", 3),
    ("avril", 4),
    ("april", 4),
    ("mai", 5),
    ("may", 5),
    ("juin", 6),
    ("june", 6),
    ("juillet", 7),
    ("july", 7),
    ("aout", 8),
    ("august", 8),
    ("septembre", 9),
    ("september", 9),
    ("octobre", 10),
    ("october", 10),
    ("novembre", 11),
    ("november", 11),
    ("decembre", 12),
    ("december", 12),
];

const WEEKDAYS: &[(&str, Weekday)] = &[
    ("lundi", Weekday::Mon),
    ("monday", Weekday::Mon),
    ("mardi", Weekday::Tue),
    ("tuesday", Weekday::Tue),
    ("mercredi", Weekday::Wed),
    ("wednesday", Weekday::Wed),
    ("jeudi", Weekday::Thu),
    ("thursday", Weekday::Thu),
    ("vendredi", Weekday::Fri),
    ("friday", Weekday::Fri),
    ("samedi", Weekday::Sat),
    ("saturday", Weekday::Sat),
    ("dimanche", Weekday::Sun),
    ("sunday", Weekday::Sun),
];

fn offset_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"\b(?:dans|in) (\d{1,4}) ?(minutes?|mins?|heures?|hours?|h|jours?|days?|semaines?|weeks?)\b",
        )
        .expect("offset regex must compile")
    })
}

fn numeric_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(\d{1,2})[/.-](\d{1,2})(?:[/.-](\d{2}|\d{4}))?\b")
            .expect("numeric date regex must compile")
    })
}

fn iso_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b").expect("iso date regex must compile")
    })
}

fn day_month_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(\d{1,2})(?:er|st|nd|rd|th)? ([a-z]+)(?: (\d{4}))?\b")
            .expect("day month regex must compile")
    })
}

impl DateParser for RelativeDateParser {
    fn parse(&self, text: &str, settings: &DateParserSettings) -> Option<NaiveDateTime> {
        let base = settings.relative_base;
        let normalized = normalize(text);
        if normalized.is_empty() {
            return None;
        }

        if let Some(dt) = parse_offset(&normalized, base) {
            return Some(dt);
        }
        if let Some(days) = relative_day(&normalized) {
            return base.checked_add_signed(Duration::days(days));
        }
        if let Some(date) = parse_iso_date(text) {
            return date.and_hms_opt(0, 0, 0);
        }
        if let Some(date) = parse_numeric_date(&text.to_lowercase(), settings) {
            return date.and_hms_opt(0, 0, 0);
        }
        if let Some(date) = parse_day_month(&normalized, settings) {
            return date.and_hms_opt(0, 0, 0);
        }
        if let Some(weekday) = find_weekday(&normalized) {
            let date = next_weekday(base.date(), weekday, settings.prefer_future);
            return Some(date.and_time(base.time()));
        }
        if let Some(date) = parse_bare_month(&normalized, settings) {
            return date.and_hms_opt(0, 0, 0);
        }

        None
    }
}

/// Days from the base for words like "demain".
fn relative_day(normalized: &str) -> Option<i64> {
    // Compound phrases first: "apres demain" contains "demain".
    const PHRASES: &[(&str, i64)] = &[
        ("apres demain", 2),
        ("day after tomorrow", 2),
        ("avant hier", -2),
        ("aujourd hui", 0),
        ("demain", 1),
        ("tomorrow", 1),
        ("today", 0),
        ("tonight", 0),
        ("maintenant", 0),
        ("now", 0),
        ("hier", -1),
        ("yesterday", -1),
    ];
    let padded = format!(" {normalized} ");
    PHRASES
        .iter()
        .find(|(phrase, _)| padded.contains(&format!(" {phrase} ")))
        .map(|&(_, days)| days)
}

fn parse_offset(normalized: &str, base: NaiveDateTime) -> Option<NaiveDateTime> {
    let caps = offset_re().captures(normalized)?;
    let amount: i64 = caps[1].parse().ok()?;
    let unit = &caps[2];
    let delta = match unit.chars().next()? {
        'm' => Duration::minutes(amount),
        'h' => Duration::hours(amount),
        'j' | 'd' => Duration::days(amount),
        's' | 'w' => Duration::weeks(amount),
        _ => return None,
    };
    base.checked_add_signed(delta)
}

fn month_number(word: &str) -> Option<u32> {
    MONTHS.iter().find(|(name, _)| *name == word).map(|&(_, m)| m)
}

fn find_weekday(normalized: &str) -> Option<Weekday> {
    tokens(normalized).find_map(|t| {
        WEEKDAYS
            .iter()
            .find(|(name, _)| *name == t)
            .map(|&(_, d)| d)
    })
}

/// Next date falling on `weekday`. With `prefer_future` a weekday equal to
/// today means next week; otherwise it means today.
fn next_weekday(today: NaiveDate, weekday: Weekday, prefer_future: bool) -> NaiveDate {
    let current = today.weekday().num_days_from_monday() as i64;
    let target = weekday.num_days_from_monday() as i64;
    let mut ahead = (target - current).rem_euclid(7);
    if ahead == 0 && prefer_future {
        ahead = 7;
    }
    today + Duration::days(ahead)
}

/// Resolve a day/month with an optional year. Without a year, a date already
/// past moves to next year when the future is preferred.
fn resolve_year(
    day: u32,
    month: u32,
    year: Option<i32>,
    settings: &DateParserSettings,
) -> Option<NaiveDate> {
    let today = settings.relative_base.date();
    if let Some(year) = year {
        return NaiveDate::from_ymd_opt(year, month, day);
    }
    let date = NaiveDate::from_ymd_opt(today.year(), month, day)?;
    if settings.prefer_future && date < today {
        NaiveDate::from_ymd_opt(today.year() + 1, month, day)
    } else {
        Some(date)
    }
}

fn parse_year(s: &str) -> Option<i32> {
    let year: i32 = s.parse().ok()?;
    Some(if s.len() == 2 { 2000 + year } else { year })
}

/// `YYYY-MM-DD`, checked before day-first dates so "2024-01-20" is not read
/// as day 01 of month 20.
fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    let caps = iso_date_re().captures(text)?;
    NaiveDate::from_ymd_opt(
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
    )
}

fn parse_numeric_date(lowered: &str, settings: &DateParserSettings) -> Option<NaiveDate> {
    let caps = numeric_date_re().captures(lowered)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year = match caps.get(3) {
        Some(y) => Some(parse_year(y.as_str())?),
        None => None,
    };
    resolve_year(day, month, year, settings)
}

fn parse_day_month(normalized: &str, settings: &DateParserSettings) -> Option<NaiveDate> {
    day_month_re().captures_iter(normalized).find_map(|caps| {
        let month = month_number(&caps[2])?;
        let day: u32 = caps[1].parse().ok()?;
        let year = caps.get(3).and_then(|y| y.as_str().parse().ok());
        resolve_year(day, month, year, settings)
    })
}

fn parse_bare_month(normalized: &str, settings: &DateParserSettings) -> Option<NaiveDate> {
    let words: Vec<&str> = tokens(normalized).collect();
    let (idx, month) = words
        .iter()
        .enumerate()
        .find_map(|(i, w)| month_number(w).map(|m| (i, m)))?;
    let year = words
        .get(idx + 1)
        .filter(|w| w.len() == 4)
        .and_then(|w| w.parse::<i32>().ok());

    let today = settings.relative_base.date();
    let day = if settings.prefer_first_day_of_month {
        1
    } else {
        today.day()
    };

    let candidate = |y: i32| clamp_to_month(y, month, day);
    match year {
        Some(y) => candidate(y),
        None => {
            let date = candidate(today.year())?;
            if settings.prefer_future && date < today {
                candidate(today.year() + 1)
            } else {
                Some(date)
            }
        }
    }
}

/// Date in the given month, pulling `day` back to the month's last day.
fn clamp_to_month(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    (1..=day)
        .rev()
        .find_map(|d| NaiveDate::from_ymd_opt(year, month, d))
}
