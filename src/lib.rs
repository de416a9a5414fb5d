//! Locale-aware date/time and number formatting
//!
//! This crate converts between structured calendar and numeric values and
//! their textual representation in an arbitrary locale, in both directions.
//! The pieces:
//!
//! - [`NumberCodec`]: integers and doubles under locale numeric conventions
//!   (numbering system, grouping, signs, exponent forms), with symmetric
//!   parsing.
//! - [`parser::compile_pattern`]: the `yyyy-MM-dd HH:mm:ss` pattern
//!   mini-language, compiled once into an immutable [`Pattern`].
//! - [`DateTimeFormatter`] / [`DateTimeParser`]: render and read calendar
//!   values through a compiled pattern, with strict and lenient matching.
//! - [`LocaleKey`]: BCP-47-like tag resolution to a canonical locale, backed
//!   by the embedded [`locale::LocaleDataSource`] tables.
//!
//! Calendar math and time zones are injected collaborators
//! ([`calendar::CalendarSystem`], [`calendar::TimeZoneProvider`]); the
//! formatting core never reimplements them.
//!
//! ```
//! use locale_format::{DateTimeFormatter, Pattern, locale::{embedded_data, LocaleKey}};
//! use locale_format::calendar::CalendarDate;
//!
//! let data = embedded_data();
//! let locale = LocaleKey::parse("de_DE", data);
//! let pattern = Pattern::compile("d. MMMM yyyy").unwrap();
//! let formatter = DateTimeFormatter::new(pattern, data, &locale);
//! assert_eq!(formatter.format_date(CalendarDate::new(2024, 3, 1)), "1. März 2024");
//! ```

pub mod calendar;
pub mod datetime;
pub mod error;
pub mod locale;
pub mod number;
pub mod parser;
pub mod types;

pub use calendar::{CalendarDate, TimeOfDay};
pub use datetime::{DateTimeFormatter, DateTimeParser, ParsedDateTime};
pub use error::{FormatError, Result};
pub use locale::LocaleKey;
pub use number::NumberCodec;
pub use types::{
    FieldKind, FloatOptions, FloatStyle, FormatContext, GroupingRule, IntegerOptions, MatchMode,
    NameContext, NameWidth, NumericValue, Pattern, PatternDomain, PatternToken, SeparatorPolicy,
    ShortYearWindow, StandardStyle,
};

#[cfg(test)]
mod tests;
