//! Calendar and time-zone collaborators
//!
//! The formatting core never does calendar math itself; it asks a
//! `CalendarSystem` for validity, day-of-week and day-of-year, and a
//! `TimeZoneProvider` for offsets and zone names. `Gregorian` is the built-in
//! calendar, delegating to chrono's proleptic Gregorian implementation.

use chrono::{Datelike, NaiveDate};

/// Julian day number of 0001-01-01 proleptic Gregorian minus one, so that
/// `julian_day = num_days_from_ce + JULIAN_DAY_OFFSET`.
const JULIAN_DAY_OFFSET: i64 = 1_721_425;

/// A calendar date as a plain (year, month, day) triple. Not validated on
/// construction; validity is a `CalendarSystem` question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        CalendarDate { year, month, day }
    }

    pub fn quarter(&self) -> u32 {
        (self.month.saturating_sub(1)) / 3 + 1
    }
}

/// A wall-clock time. `nanosecond` carries the sub-second part; fractional
/// second fields render from its leading digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub nanosecond: u32,
}

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32, second: u32) -> Self {
        TimeOfDay {
            hour,
            minute,
            second,
            nanosecond: 0,
        }
    }

    pub fn with_nanosecond(mut self, nanosecond: u32) -> Self {
        self.nanosecond = nanosecond;
        self
    }

    pub fn is_valid(&self) -> bool {
        self.hour < 24 && self.minute < 60 && self.second < 60 && self.nanosecond < 1_000_000_000
    }
}

impl Default for TimeOfDay {
    fn default() -> Self {
        TimeOfDay::new(0, 0, 0)
    }
}

/// Calendar queries the formatting core needs. Day-of-week numbering is
/// ISO: 1 = Monday through 7 = Sunday.
pub trait CalendarSystem: Send + Sync {
    fn is_valid(&self, date: CalendarDate) -> bool;

    fn days_in_month(&self, year: i32, month: u32) -> u32;

    fn months_in_year(&self, _year: i32) -> u32 {
        12
    }

    fn is_leap_year(&self, year: i32) -> bool;

    fn day_of_week(&self, date: CalendarDate) -> Option<u32>;

    fn day_of_year(&self, date: CalendarDate) -> Option<u32>;

    fn to_julian_day(&self, date: CalendarDate) -> Option<i64>;

    fn from_julian_day(&self, julian_day: i64) -> Option<CalendarDate>;
}

/// Proleptic Gregorian calendar backed by chrono.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gregorian;

impl Gregorian {
    fn naive(&self, date: CalendarDate) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(date.year, date.month, date.day)
    }
}

impl CalendarSystem for Gregorian {
    fn is_valid(&self, date: CalendarDate) -> bool {
        self.naive(date).is_some()
    }

    fn days_in_month(&self, year: i32, month: u32) -> u32 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if self.is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }

    fn is_leap_year(&self, year: i32) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    fn day_of_week(&self, date: CalendarDate) -> Option<u32> {
        self.naive(date)
            .map(|d| d.weekday().number_from_monday())
    }

    fn day_of_year(&self, date: CalendarDate) -> Option<u32> {
        self.naive(date).map(|d| d.ordinal())
    }

    fn to_julian_day(&self, date: CalendarDate) -> Option<i64> {
        self.naive(date)
            .map(|d| i64::from(d.num_days_from_ce()) + JULIAN_DAY_OFFSET)
    }

    fn from_julian_day(&self, julian_day: i64) -> Option<CalendarDate> {
        let days = i32::try_from(julian_day - JULIAN_DAY_OFFSET).ok()?;
        let d = NaiveDate::from_num_days_from_ce_opt(days)?;
        Some(CalendarDate::new(d.year(), d.month(), d.day()))
    }
}

/// Zone data for one instant: UTC offset, display abbreviation, DST flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneInfo {
    pub offset_seconds: i32,
    pub abbreviation: String,
    pub is_dst: bool,
}

/// Supplies zone offsets and names for a wall-clock instant.
pub trait TimeZoneProvider: Send + Sync {
    fn zone_info(&self, date: CalendarDate, time: TimeOfDay) -> ZoneInfo;
}

/// The UTC provider: zero offset, abbreviation `UTC`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UtcZone;

impl TimeZoneProvider for UtcZone {
    fn zone_info(&self, _date: CalendarDate, _time: TimeOfDay) -> ZoneInfo {
        ZoneInfo {
            offset_seconds: 0,
            abbreviation: "UTC".to_string(),
            is_dst: false,
        }
    }
}

/// A fixed-offset zone with a caller-supplied abbreviation.
#[derive(Debug, Clone)]
pub struct FixedZone {
    offset_seconds: i32,
    abbreviation: String,
}

impl FixedZone {
    pub fn new(offset_seconds: i32, abbreviation: impl Into<String>) -> Self {
        FixedZone {
            offset_seconds,
            abbreviation: abbreviation.into(),
        }
    }
}

impl TimeZoneProvider for FixedZone {
    fn zone_info(&self, _date: CalendarDate, _time: TimeOfDay) -> ZoneInfo {
        ZoneInfo {
            offset_seconds: self.offset_seconds,
            abbreviation: self.abbreviation.clone(),
            is_dst: false,
        }
    }
}
