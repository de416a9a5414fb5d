//! The formatting direction: walk the token sequence, emitting literals
//! verbatim and fields per their render rule.

use super::DateTimeFormatter;
use crate::calendar::{CalendarDate, TimeOfDay};
use crate::types::{
    FieldKind, IntegerOptions, NameWidth, OffsetStyle, PatternToken, RenderRule, render_rule,
};

impl DateTimeFormatter<'_> {
    /// Format a date. Time fields in the pattern render as empty text.
    /// An invalid date yields an empty string.
    pub fn format_date(&self, date: CalendarDate) -> String {
        if !self.calendar.is_valid(date) {
            return String::new();
        }
        self.render(Some(date), None)
    }

    /// Format a wall-clock time. Date fields in the pattern render as empty
    /// text. An invalid time yields an empty string.
    pub fn format_time(&self, time: TimeOfDay) -> String {
        if !time.is_valid() {
            return String::new();
        }
        self.render(None, Some(time))
    }

    /// Format a combined date and time. Either half being invalid yields an
    /// empty string.
    pub fn format_datetime(&self, date: CalendarDate, time: TimeOfDay) -> String {
        if !self.calendar.is_valid(date) || !time.is_valid() {
            return String::new();
        }
        self.render(Some(date), Some(time))
    }

    fn render(&self, date: Option<CalendarDate>, time: Option<TimeOfDay>) -> String {
        let has_era = self.pattern.has_field(FieldKind::Era);
        // The AM/PM half and the wrapped 12-hour value fall out of the hour
        // once, ahead of the token walk.
        let pm = time.map(|t| t.hour >= 12).unwrap_or(false);
        let hour12 = time
            .map(|t| {
                let h = t.hour % 12;
                if h == 0 { 12 } else { h }
            })
            .unwrap_or(12);

        let mut out = String::new();
        for token in self.pattern.tokens() {
            let (kind, repeat) = match token {
                PatternToken::Literal(text) => {
                    out.push_str(text);
                    continue;
                }
                PatternToken::Field { kind, repeat, .. } => (*kind, *repeat),
            };
            if kind.is_date_field() && date.is_none() {
                continue;
            }
            if kind.is_time_field() && time.is_none() {
                continue;
            }
            match render_rule(kind, repeat) {
                RenderRule::Numeric { min_digits } => {
                    let value = self.numeric_value(kind, date, time, hour12, has_era);
                    self.push_number(value, min_digits, &mut out);
                }
                RenderRule::TwoDigitYear => {
                    let year = self.display_year(date, has_era);
                    self.push_number(i64::from(year.rem_euclid(100)), 2, &mut out);
                }
                RenderRule::MonthName(width) => {
                    let month = date.map(|d| d.month).unwrap_or(1);
                    self.push_name(FieldKind::Month, month as usize, width, &mut out);
                }
                RenderRule::DayOfWeekName(width) => {
                    if let Some(weekday) =
                        date.and_then(|d| self.calendar.day_of_week(d))
                    {
                        self.push_name(
                            FieldKind::DayOfWeekName,
                            weekday as usize,
                            width,
                            &mut out,
                        );
                    }
                }
                RenderRule::QuarterName(width) => {
                    let quarter = date.map(|d| d.quarter()).unwrap_or(1);
                    self.push_name(FieldKind::Quarter, quarter as usize, width, &mut out);
                }
                RenderRule::EraName(width) => {
                    let index = if date.map(|d| d.year > 0).unwrap_or(true) { 1 } else { 0 };
                    self.push_name(FieldKind::Era, index, width, &mut out);
                }
                RenderRule::DayPeriodName(width) => {
                    self.push_name(FieldKind::DayPeriod, usize::from(pm), width, &mut out);
                }
                RenderRule::AmPmText => {
                    self.push_name(FieldKind::AmPm, usize::from(pm), NameWidth::Short, &mut out);
                }
                RenderRule::FractionalSecond { digits } => {
                    let nanos = time.map(|t| t.nanosecond).unwrap_or(0);
                    let scaled = nanos / 10u32.pow(9 - u32::from(digits));
                    self.push_number(i64::from(scaled), digits, &mut out);
                }
                RenderRule::ZoneOffset(style) => {
                    let info = self.zone_info(date, time);
                    push_offset(info.offset_seconds, style, &mut out);
                }
                RenderRule::ZoneName => {
                    let info = self.zone_info(date, time);
                    out.push_str(&info.abbreviation);
                }
            }
        }
        out
    }

    fn numeric_value(
        &self,
        kind: FieldKind,
        date: Option<CalendarDate>,
        time: Option<TimeOfDay>,
        hour12: u32,
        has_era: bool,
    ) -> i64 {
        match kind {
            FieldKind::Year => i64::from(self.display_year(date, has_era)),
            FieldKind::Month => date.map(|d| i64::from(d.month)).unwrap_or(1),
            FieldKind::Day => date.map(|d| i64::from(d.day)).unwrap_or(1),
            FieldKind::DayOfYear => date
                .and_then(|d| self.calendar.day_of_year(d))
                .map(i64::from)
                .unwrap_or(1),
            FieldKind::Quarter => date.map(|d| i64::from(d.quarter())).unwrap_or(1),
            FieldKind::Hour12 => i64::from(hour12),
            FieldKind::Hour24 => time.map(|t| i64::from(t.hour)).unwrap_or(0),
            FieldKind::Minute => time.map(|t| i64::from(t.minute)).unwrap_or(0),
            FieldKind::Second => time.map(|t| i64::from(t.second)).unwrap_or(0),
            _ => 0,
        }
    }

    /// The year digits a pattern shows: the astronomical year, except that an
    /// era field switches to era-relative counting (year 0 renders as 1 of
    /// the before-epoch era).
    fn display_year(&self, date: Option<CalendarDate>, has_era: bool) -> i32 {
        let year = date.map(|d| d.year).unwrap_or(1970);
        if has_era && year <= 0 { 1 - year } else { year }
    }

    fn push_number(&self, value: i64, min_digits: u8, out: &mut String) {
        out.push_str(&self.codec.format_i64(
            value,
            IntegerOptions {
                min_digits,
                ..IntegerOptions::default()
            },
        ));
    }

    fn push_name(&self, kind: FieldKind, index: usize, width: NameWidth, out: &mut String) {
        if let Some(name) = self
            .data
            .field_name(&self.locale, kind, index, width, self.context)
        {
            out.push_str(&name);
        }
    }

    fn zone_info(
        &self,
        date: Option<CalendarDate>,
        time: Option<TimeOfDay>,
    ) -> crate::calendar::ZoneInfo {
        self.zone.zone_info(
            date.unwrap_or(CalendarDate::new(1970, 1, 1)),
            time.unwrap_or_default(),
        )
    }
}

/// Offsets always use ASCII digits and signs; they name a zone, not a
/// locale-rendered quantity.
fn push_offset(offset_seconds: i32, style: OffsetStyle, out: &mut String) {
    let sign = if offset_seconds < 0 { '-' } else { '+' };
    let magnitude = offset_seconds.unsigned_abs();
    let hours = magnitude / 3600;
    let minutes = (magnitude % 3600) / 60;
    match style {
        OffsetStyle::Basic => {
            out.push(sign);
            out.push_str(&format!("{hours:02}{minutes:02}"));
        }
        OffsetStyle::Gmt => {
            out.push_str("GMT");
            out.push(sign);
            out.push_str(&format!("{hours:02}:{minutes:02}"));
        }
        OffsetStyle::Extended => {
            out.push(sign);
            out.push_str(&format!("{hours:02}:{minutes:02}"));
        }
    }
}
