//! The parsing direction: consume input token by token under the same
//! render-rule table the formatter emits by, collect raw field values, then
//! assemble and validate the result.

use super::DateTimeParser;
use crate::calendar::{CalendarDate, TimeOfDay};
use crate::error::{FormatError, Result};
use crate::types::{
    FieldKind, MatchMode, NameContext, NameWidth, OffsetStyle, PatternToken, RenderRule,
    render_rule,
};

/// Everything a single parse can yield. `offset_seconds` is populated only
/// when the pattern carried an offset field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDateTime {
    pub date: CalendarDate,
    pub time: TimeOfDay,
    pub offset_seconds: Option<i32>,
}

/// Raw field values accumulated during the token walk.
#[derive(Debug, Default)]
struct Collected {
    year: Option<i64>,
    two_digit_year: Option<i64>,
    era: Option<usize>,
    month: Option<i64>,
    day: Option<i64>,
    day_of_year: Option<i64>,
    hour12: Option<i64>,
    hour24: Option<i64>,
    minute: Option<i64>,
    second: Option<i64>,
    nanosecond: Option<u32>,
    pm: Option<bool>,
    offset_seconds: Option<i32>,
}

struct Cursor<'t> {
    text: &'t str,
    pos: usize,
}

impl<'t> Cursor<'t> {
    fn rest(&self) -> &'t str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn advance(&mut self, bytes: usize) {
        self.pos += bytes;
    }
}

impl DateTimeParser<'_> {
    /// Parse a date. The pattern's time fields still consume input; their
    /// values are discarded.
    pub fn parse_date(&self, text: &str) -> Result<CalendarDate> {
        Ok(self.parse(text)?.date)
    }

    /// Parse a wall-clock time.
    pub fn parse_time(&self, text: &str) -> Result<TimeOfDay> {
        Ok(self.parse(text)?.time)
    }

    pub fn parse_datetime(&self, text: &str) -> Result<(CalendarDate, TimeOfDay)> {
        let parsed = self.parse(text)?;
        Ok((parsed.date, parsed.time))
    }

    /// Run the full token walk and assemble the result.
    pub fn parse(&self, text: &str) -> Result<ParsedDateTime> {
        let mut cursor = Cursor { text, pos: 0 };
        let mut collected = Collected::default();

        let tokens = self.pattern.tokens();
        for (i, token) in tokens.iter().enumerate() {
            match token {
                PatternToken::Literal(literal) => self.match_literal(&mut cursor, literal)?,
                PatternToken::Field { kind, repeat, .. } => {
                    let next_numeric = matches!(
                        tokens.get(i + 1),
                        Some(PatternToken::Field { kind, repeat, .. })
                            if matches!(
                                render_rule(*kind, *repeat),
                                RenderRule::Numeric { .. }
                                    | RenderRule::TwoDigitYear
                                    | RenderRule::FractionalSecond { .. }
                            )
                    );
                    self.match_field(&mut cursor, *kind, *repeat, next_numeric, &mut collected)?;
                }
            }
        }

        if self.mode == MatchMode::Lenient {
            while cursor.peek().is_some_and(|c| self.format_context.is_space(c)) {
                cursor.bump();
            }
        }
        if !cursor.rest().is_empty() {
            return Err(FormatError::malformed(cursor.pos, "unexpected trailing text"));
        }

        self.assemble(collected)
    }

    fn match_literal(&self, cursor: &mut Cursor, literal: &str) -> Result<()> {
        if self.mode == MatchMode::Lenient {
            // Prefer the literal as written; failing that, accept any run of
            // separator filler (whitespace and punctuation) in its place.
            if let Some(len) = self.literal_prefix(cursor.rest(), literal) {
                cursor.advance(len);
            } else {
                while cursor.peek().is_some_and(|c| {
                    self.format_context.is_space(c)
                        || (!c.is_alphanumeric() && self.format_context.digit_value(c).is_none())
                }) {
                    cursor.bump();
                }
            }
            return Ok(());
        }
        for expected in literal.chars() {
            let Some(actual) = cursor.peek() else {
                return Err(FormatError::malformed(cursor.pos, "unexpected end of input"));
            };
            let space_match =
                self.format_context.is_space(expected) && self.format_context.is_space(actual);
            if actual != expected && !space_match {
                return Err(FormatError::malformed(
                    cursor.pos,
                    format!("expected {expected:?}"),
                ));
            }
            cursor.bump();
        }
        Ok(())
    }

    /// Byte length the literal occupies at the head of `text`, matched
    /// case-insensitively with space-class equivalence, if it matches whole.
    fn literal_prefix(&self, text: &str, literal: &str) -> Option<usize> {
        let mut iter = text.char_indices();
        for expected in literal.chars() {
            let (_, actual) = iter.next()?;
            let ok = actual == expected
                || (self.format_context.is_space(expected) && self.format_context.is_space(actual))
                || actual.to_lowercase().eq(expected.to_lowercase());
            if !ok {
                return None;
            }
        }
        Some(iter.next().map(|(i, _)| i).unwrap_or(text.len()))
    }

    fn match_field(
        &self,
        cursor: &mut Cursor,
        kind: FieldKind,
        repeat: usize,
        next_numeric: bool,
        collected: &mut Collected,
    ) -> Result<()> {
        match render_rule(kind, repeat) {
            RenderRule::Numeric { min_digits } => {
                let signed = kind == FieldKind::Year;
                let max = if next_numeric {
                    repeat
                } else {
                    numeric_capacity(kind)
                };
                let value = self.read_number(cursor, min_digits, max, signed)?;
                self.store_numeric(kind, value, collected);
            }
            RenderRule::TwoDigitYear => {
                let value = self.read_number(cursor, 2, 2, false)?;
                collected.two_digit_year = Some(value);
            }
            RenderRule::FractionalSecond { digits } => {
                let max = usize::from(digits);
                let start = cursor.pos;
                let value = self.read_number(cursor, 1, max, false)?;
                let consumed = count_digits(&cursor.text[start..cursor.pos]);
                collected.nanosecond =
                    Some((value as u32) * 10u32.pow(9 - consumed.min(9) as u32));
            }
            RenderRule::MonthName(width) => {
                let index = self.read_name(cursor, FieldKind::Month, 1..=12, width)?;
                collected.month = Some(index as i64);
            }
            RenderRule::DayOfWeekName(width) => {
                // Consumed for position; the day of month is authoritative.
                self.read_name(cursor, FieldKind::DayOfWeekName, 1..=7, width)?;
            }
            RenderRule::QuarterName(width) => {
                self.read_name(cursor, FieldKind::Quarter, 1..=4, width)?;
            }
            RenderRule::EraName(width) => {
                let index = self.read_name(cursor, FieldKind::Era, 0..=1, width)?;
                collected.era = Some(index);
            }
            RenderRule::DayPeriodName(width) => {
                let index = self.read_name(cursor, FieldKind::DayPeriod, 0..=1, width)?;
                collected.pm = Some(index == 1);
            }
            RenderRule::AmPmText => {
                let index = self.read_name(cursor, FieldKind::AmPm, 0..=1, NameWidth::Short)?;
                collected.pm = Some(index == 1);
            }
            RenderRule::ZoneOffset(style) => {
                collected.offset_seconds = Some(self.read_offset(cursor, style)?);
            }
            RenderRule::ZoneName => {
                // Abbreviations cannot be mapped back to an offset; consume
                // the letter run and move on.
                let run: usize = cursor
                    .rest()
                    .chars()
                    .take_while(|c| c.is_alphabetic())
                    .map(|c| c.len_utf8())
                    .sum();
                if run == 0 {
                    return Err(FormatError::malformed(cursor.pos, "expected zone name"));
                }
                cursor.advance(run);
            }
        }
        Ok(())
    }

    /// Read a digit run: at least `min_digits` in strict mode, at most `max`
    /// in both. Year fields additionally accept a leading minus.
    fn read_number(
        &self,
        cursor: &mut Cursor,
        min_digits: u8,
        max: usize,
        signed: bool,
    ) -> Result<i64> {
        let start = cursor.pos;
        let negative = signed && cursor.peek() == Some('-');
        if negative {
            cursor.bump();
        }

        let mut value: i64 = 0;
        let mut count = 0usize;
        while count < max {
            let Some(c) = cursor.peek() else { break };
            let Some(d) = self.format_context.digit_value(c) else {
                break;
            };
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(i64::from(d)))
                .ok_or_else(|| FormatError::OutOfRange("numeric field overflow".to_string()))?;
            count += 1;
            cursor.bump();
        }

        if count == 0 {
            return Err(FormatError::malformed(start, "expected digits"));
        }
        if self.mode == MatchMode::Strict && count < usize::from(min_digits) {
            return Err(FormatError::malformed(start, "field narrower than pattern"));
        }
        Ok(if negative { -value } else { value })
    }

    fn store_numeric(&self, kind: FieldKind, value: i64, collected: &mut Collected) {
        match kind {
            FieldKind::Year => collected.year = Some(value),
            FieldKind::Month => collected.month = Some(value),
            FieldKind::Day => collected.day = Some(value),
            FieldKind::DayOfYear => collected.day_of_year = Some(value),
            FieldKind::Quarter => {}
            FieldKind::Hour12 => collected.hour12 = Some(value),
            FieldKind::Hour24 => collected.hour24 = Some(value),
            FieldKind::Minute => collected.minute = Some(value),
            FieldKind::Second => collected.second = Some(value),
            _ => {}
        }
    }

    /// Longest-prefix name match against the locale tables.
    ///
    /// Strict mode consults only the width and context the rule formats
    /// with; lenient mode widens to every width and both contexts, still
    /// preferring the longest match, with the rule's own table winning ties.
    fn read_name(
        &self,
        cursor: &mut Cursor,
        kind: FieldKind,
        indices: std::ops::RangeInclusive<usize>,
        width: NameWidth,
    ) -> Result<usize> {
        let mut tables: Vec<(NameWidth, NameContext)> = vec![(width, self.context)];
        if self.mode == MatchMode::Lenient {
            for w in [NameWidth::Long, NameWidth::Short, NameWidth::Narrow] {
                for c in [NameContext::Format, NameContext::Standalone] {
                    if !tables.contains(&(w, c)) {
                        tables.push((w, c));
                    }
                }
            }
        }

        let rest = cursor.rest();
        let mut best: Option<(usize, usize)> = None;
        for (w, c) in tables {
            for index in indices.clone() {
                let Some(name) = self.data.field_name(&self.locale, kind, index, w, c) else {
                    continue;
                };
                if name.is_empty() {
                    continue;
                }
                if let Some(len) = prefix_len_ignore_case(rest, &name) {
                    if best.map(|(_, l)| len > l).unwrap_or(true) {
                        best = Some((index, len));
                    }
                }
            }
        }

        let (index, len) =
            best.ok_or_else(|| FormatError::malformed(cursor.pos, "unrecognized name"))?;
        cursor.advance(len);
        Ok(index)
    }

    /// Read a UTC offset in the style the rule formats with; lenient mode
    /// accepts any of the three shapes and a bare `GMT`/`UTC`/`Z`.
    fn read_offset(&self, cursor: &mut Cursor, style: OffsetStyle) -> Result<i32> {
        let start = cursor.pos;
        let lenient = self.mode == MatchMode::Lenient;

        let has_gmt = ["GMT", "UTC"]
            .iter()
            .find(|p| cursor.rest().starts_with(**p))
            .copied();
        if let Some(prefix) = has_gmt {
            cursor.advance(prefix.len());
        } else if style == OffsetStyle::Gmt && !lenient {
            return Err(FormatError::malformed(start, "expected GMT prefix"));
        }

        if lenient && cursor.peek() == Some('Z') {
            cursor.bump();
            return Ok(0);
        }
        let sign = match cursor.peek() {
            Some('+') => 1,
            Some('-') => -1,
            None if has_gmt.is_some() => return Ok(0),
            _ if lenient && has_gmt.is_some() => return Ok(0),
            _ => return Err(FormatError::malformed(cursor.pos, "expected offset sign")),
        };
        cursor.bump();

        let hours = self.read_number(cursor, 1, 2, false)?;
        let colon_expected = style != OffsetStyle::Basic;
        let has_colon = cursor.peek() == Some(':');
        if has_colon {
            if !colon_expected && !lenient {
                return Err(FormatError::malformed(cursor.pos, "unexpected colon"));
            }
            cursor.bump();
        } else if colon_expected && !lenient {
            return Err(FormatError::malformed(cursor.pos, "expected colon"));
        }
        let minutes = self.read_number(cursor, 2, 2, false)?;
        if !(0..=18).contains(&hours) || !(0..60).contains(&minutes) {
            return Err(FormatError::OutOfRange("offset out of range".to_string()));
        }
        Ok(sign * (hours as i32 * 3600 + minutes as i32 * 60))
    }

    fn assemble(&self, collected: Collected) -> Result<ParsedDateTime> {
        let out_of_range = |what: &str| FormatError::OutOfRange(what.to_string());

        let mut year = match (collected.year, collected.two_digit_year) {
            (Some(y), _) => i32::try_from(y).map_err(|_| out_of_range("year"))?,
            (None, Some(two)) => self.pivot.resolve(two as i32),
            (None, None) => 1900,
        };
        if collected.era == Some(0) {
            // Era-relative year 1 of the before-epoch era is astronomical 0.
            year = 1 - year;
        }

        let month = collected.month.unwrap_or(1);
        let mut date = CalendarDate {
            year,
            month: u32::try_from(month).map_err(|_| out_of_range("month"))?,
            day: u32::try_from(collected.day.unwrap_or(1)).map_err(|_| out_of_range("day"))?,
        };

        // A day-of-year with no explicit month/day fixes the date on its own.
        if let (Some(ordinal), None, None) = (collected.day_of_year, collected.month, collected.day)
        {
            let jan1 = CalendarDate::new(year, 1, 1);
            let derived = self
                .calendar
                .to_julian_day(jan1)
                .and_then(|jd| self.calendar.from_julian_day(jd + ordinal - 1))
                .ok_or_else(|| out_of_range("day of year"))?;
            if derived.year != year {
                return Err(out_of_range("day of year"));
            }
            date = derived;
        }

        if !self.calendar.is_valid(date) {
            return Err(out_of_range("calendar date"));
        }

        let hour = match (collected.hour24, collected.hour12) {
            (Some(h), _) => h,
            (None, Some(h)) => {
                if !(1..=12).contains(&h) {
                    return Err(out_of_range("hour"));
                }
                let wrapped = if h == 12 { 0 } else { h };
                if collected.pm == Some(true) { wrapped + 12 } else { wrapped }
            }
            (None, None) => 0,
        };
        let time = TimeOfDay {
            hour: u32::try_from(hour).map_err(|_| out_of_range("hour"))?,
            minute: u32::try_from(collected.minute.unwrap_or(0))
                .map_err(|_| out_of_range("minute"))?,
            second: u32::try_from(collected.second.unwrap_or(0))
                .map_err(|_| out_of_range("second"))?,
            nanosecond: collected.nanosecond.unwrap_or(0),
        };
        if !time.is_valid() {
            return Err(out_of_range("time of day"));
        }

        Ok(ParsedDateTime {
            date,
            time,
            offset_seconds: collected.offset_seconds,
        })
    }
}

/// Greedy capacity of a numeric field when nothing numeric follows it.
fn numeric_capacity(kind: FieldKind) -> usize {
    match kind {
        FieldKind::Year => 9,
        FieldKind::DayOfYear => 3,
        _ => 2,
    }
}

fn count_digits(consumed: &str) -> usize {
    consumed.chars().filter(|c| !matches!(c, '-')).count()
}

/// Byte length of `text`'s prefix matching `name` case-insensitively, if it
/// does.
fn prefix_len_ignore_case(text: &str, name: &str) -> Option<usize> {
    let mut text_iter = text.char_indices();
    let mut name_chars = name.chars();
    loop {
        let Some(expected) = name_chars.next() else {
            return Some(text_iter.next().map(|(i, _)| i).unwrap_or(text.len()));
        };
        let (_, actual) = text_iter.next()?;
        if actual != expected && !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
}
