//! Pattern-driven date/time formatting and parsing
//!
//! Both directions are driven by the same `(FieldKind, repeat)` render-rule
//! table, so any text the formatter emits the parser accepts under the same
//! pattern and locale. Formatting of invalid calendar or clock values yields
//! an empty string; parsing failures are explicit errors, never sentinel
//! values.

mod format;
mod parse;

pub use parse::ParsedDateTime;

use crate::calendar::{CalendarSystem, Gregorian, TimeZoneProvider, UtcZone};
use crate::error::Result;
use crate::locale::{LocaleDataSource, LocaleKey};
use crate::number::NumberCodec;
use crate::types::{
    FieldKind, FormatContext, MatchMode, NameContext, Pattern, PatternDomain, ShortYearWindow,
    StandardStyle,
};

/// Name context for one pattern: month/weekday names embedded in a full date
/// use the Format tables, names without a day-of-month alongside them (a
/// calendar header, a month picker) use the Standalone tables.
fn name_context(pattern: &Pattern) -> NameContext {
    if pattern.has_field(FieldKind::Day) {
        NameContext::Format
    } else {
        NameContext::Standalone
    }
}

/// Formats dates, times and datetimes through a compiled pattern.
pub struct DateTimeFormatter<'a> {
    pattern: Pattern,
    locale: LocaleKey,
    data: &'a dyn LocaleDataSource,
    codec: NumberCodec,
    context: NameContext,
    calendar: Box<dyn CalendarSystem>,
    zone: Box<dyn TimeZoneProvider>,
}

impl<'a> DateTimeFormatter<'a> {
    pub fn new(pattern: Pattern, data: &'a dyn LocaleDataSource, locale: &LocaleKey) -> Self {
        let mut format_context = FormatContext::for_locale(data, locale);
        // Grouping never applies inside date/time fields.
        format_context.omit_group_separator = true;
        let context = name_context(&pattern);
        DateTimeFormatter {
            pattern,
            locale: locale.clone(),
            data,
            codec: NumberCodec::new(format_context),
            context,
            calendar: Box::new(Gregorian),
            zone: Box::new(UtcZone),
        }
    }

    /// Build from a locale's standard pattern for the given style.
    pub fn from_style(
        domain: PatternDomain,
        style: StandardStyle,
        data: &'a dyn LocaleDataSource,
        locale: &LocaleKey,
    ) -> Result<Self> {
        let pattern = Pattern::compile(&data.standard_pattern(locale, domain, style))?;
        Ok(DateTimeFormatter::new(pattern, data, locale))
    }

    pub fn with_calendar(mut self, calendar: Box<dyn CalendarSystem>) -> Self {
        self.calendar = calendar;
        self
    }

    pub fn with_zone(mut self, zone: Box<dyn TimeZoneProvider>) -> Self {
        self.zone = zone;
        self
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn locale(&self) -> &LocaleKey {
        &self.locale
    }
}

/// Parses dates, times and datetimes through a compiled pattern.
pub struct DateTimeParser<'a> {
    pattern: Pattern,
    locale: LocaleKey,
    data: &'a dyn LocaleDataSource,
    format_context: FormatContext,
    context: NameContext,
    calendar: Box<dyn CalendarSystem>,
    mode: MatchMode,
    pivot: ShortYearWindow,
}

impl<'a> DateTimeParser<'a> {
    pub fn new(pattern: Pattern, data: &'a dyn LocaleDataSource, locale: &LocaleKey) -> Self {
        let format_context = FormatContext::for_locale(data, locale);
        let context = name_context(&pattern);
        let pivot = ShortYearWindow(data.short_year_pivot(locale));
        DateTimeParser {
            pattern,
            locale: locale.clone(),
            data,
            format_context,
            context,
            calendar: Box::new(Gregorian),
            mode: MatchMode::default(),
            pivot,
        }
    }

    pub fn from_style(
        domain: PatternDomain,
        style: StandardStyle,
        data: &'a dyn LocaleDataSource,
        locale: &LocaleKey,
    ) -> Result<Self> {
        let pattern = Pattern::compile(&data.standard_pattern(locale, domain, style))?;
        Ok(DateTimeParser::new(pattern, data, locale))
    }

    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_pivot(mut self, pivot: ShortYearWindow) -> Self {
        self.pivot = pivot;
        self
    }

    pub fn with_calendar(mut self, calendar: Box<dyn CalendarSystem>) -> Self {
        self.calendar = calendar;
        self
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }
}
