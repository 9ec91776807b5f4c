//! Natural-language time resolution.
//!
//! Turns a time expression ("15h30", "ce soir", "demain") into an absolute
//! instant relative to a reference instant.

mod lexicon;
mod relative;
mod resolver;

pub use lexicon::{DAY_PARTS, DayPart};
pub use relative::{DateParser, DateParserSettings, RelativeDateParser};
pub use resolver::{ISO_FORMAT, TimeResolver, TimeTier, format_iso};
