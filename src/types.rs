//! Core value types shared across the crate
//!
//! This module defines the compiled pattern representation, the field-kind
//! enumeration, and the single `(FieldKind, repeat count)` to `RenderRule`
//! table that both the formatter and the parser consult. Keeping that table
//! in one place is what guarantees format/parse symmetry.

/// A calendar or clock field addressed by a pattern letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Calendar year (y)
    Year,
    /// Month of year (M)
    Month,
    /// Day of month (d)
    Day,
    /// Named day of week (E)
    DayOfWeekName,
    /// Ordinal day within the year (D)
    DayOfYear,
    /// Quarter of the year (Q)
    Quarter,
    /// Era, e.g. AD/BC (G)
    Era,
    /// Hour on a 12-hour clock (h)
    Hour12,
    /// Hour on a 24-hour clock (H)
    Hour24,
    /// Minute of hour (m)
    Minute,
    /// Second of minute (s)
    Second,
    /// Fractional seconds, one digit per repeat (S)
    FractionalSecond,
    /// AM/PM marker (a)
    AmPm,
    /// Day period such as "in the morning" (B)
    DayPeriod,
    /// UTC offset (Z)
    TimeZoneOffset,
    /// Zone name/abbreviation (z, v, V)
    TimeZoneName,
}

impl FieldKind {
    /// Map a pattern letter to its field kind. Letters outside this set pass
    /// through the compiler as literal characters.
    pub fn from_letter(c: char) -> Option<FieldKind> {
        match c {
            'y' => Some(FieldKind::Year),
            'M' => Some(FieldKind::Month),
            'd' => Some(FieldKind::Day),
            'E' => Some(FieldKind::DayOfWeekName),
            'D' => Some(FieldKind::DayOfYear),
            'Q' => Some(FieldKind::Quarter),
            'G' => Some(FieldKind::Era),
            'h' => Some(FieldKind::Hour12),
            'H' => Some(FieldKind::Hour24),
            'm' => Some(FieldKind::Minute),
            's' => Some(FieldKind::Second),
            'S' => Some(FieldKind::FractionalSecond),
            'a' => Some(FieldKind::AmPm),
            'B' => Some(FieldKind::DayPeriod),
            'v' | 'V' | 'z' => Some(FieldKind::TimeZoneName),
            'Z' => Some(FieldKind::TimeZoneOffset),
            _ => None,
        }
    }

    /// True for fields carried by the date half of a datetime value.
    pub fn is_date_field(&self) -> bool {
        matches!(
            self,
            FieldKind::Year
                | FieldKind::Month
                | FieldKind::Day
                | FieldKind::DayOfWeekName
                | FieldKind::DayOfYear
                | FieldKind::Quarter
                | FieldKind::Era
        )
    }

    /// True for fields carried by the time half of a datetime value.
    pub fn is_time_field(&self) -> bool {
        matches!(
            self,
            FieldKind::Hour12
                | FieldKind::Hour24
                | FieldKind::Minute
                | FieldKind::Second
                | FieldKind::FractionalSecond
                | FieldKind::AmPm
                | FieldKind::DayPeriod
                | FieldKind::TimeZoneOffset
                | FieldKind::TimeZoneName
        )
    }
}

/// One token of a compiled pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternToken {
    /// A run of identical field letters, e.g. `yyyy`.
    Field {
        kind: FieldKind,
        letter: char,
        repeat: usize,
    },
    /// Literal text emitted (or matched) verbatim.
    Literal(String),
}

/// An immutable compiled pattern, safe to share across format/parse calls.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    tokens: Vec<PatternToken>,
}

impl Pattern {
    pub(crate) fn new(tokens: Vec<PatternToken>) -> Self {
        Pattern { tokens }
    }

    pub fn tokens(&self) -> &[PatternToken] {
        &self.tokens
    }

    /// Whether any field token of the given kind appears in the pattern.
    pub fn has_field(&self, kind: FieldKind) -> bool {
        self.tokens
            .iter()
            .any(|t| matches!(t, PatternToken::Field { kind: k, .. } if *k == kind))
    }

    /// Re-emit the pattern as text. Field runs come back as their letter
    /// repeated; literal text is re-escaped, with a bare quote re-emitted as
    /// the doubled form `''`.
    pub fn to_pattern_string(&self) -> String {
        fn flush(run: &mut String, out: &mut String) {
            if !run.is_empty() {
                out.push('\'');
                out.push_str(run);
                out.push('\'');
                run.clear();
            }
        }
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                PatternToken::Field { letter, repeat, .. } => {
                    for _ in 0..*repeat {
                        out.push(*letter);
                    }
                }
                PatternToken::Literal(text) => {
                    let mut quoted_run = String::new();
                    for c in text.chars() {
                        if c == '\'' {
                            flush(&mut quoted_run, &mut out);
                            out.push_str("''");
                        } else if c.is_ascii_alphabetic() {
                            quoted_run.push(c);
                        } else {
                            flush(&mut quoted_run, &mut out);
                            out.push(c);
                        }
                    }
                    flush(&mut quoted_run, &mut out);
                }
            }
        }
        out
    }
}

/// Width of a looked-up name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameWidth {
    Short,
    Long,
    Narrow,
}

/// Grammatical context of a looked-up name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameContext {
    /// Embedded in a full date ("1 de enero").
    Format,
    /// Used alone, e.g. a calendar header.
    Standalone,
}

/// Offset rendering shapes for the `Z` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetStyle {
    /// `+0530`
    Basic,
    /// `GMT+05:30`
    Gmt,
    /// `+05:30`
    Extended,
}

/// How one field token renders, derived from its kind and repeat count.
///
/// This mapping is the single source of truth for both directions: the
/// formatter renders by it and the parser consumes by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderRule {
    /// Decimal number, zero padded to at least `min_digits`.
    Numeric { min_digits: u8 },
    /// Year modulo 100, padded to two digits; parsing applies the pivot window.
    TwoDigitYear,
    MonthName(NameWidth),
    DayOfWeekName(NameWidth),
    QuarterName(NameWidth),
    EraName(NameWidth),
    DayPeriodName(NameWidth),
    AmPmText,
    /// Fractional seconds truncated to `digits` places.
    FractionalSecond { digits: u8 },
    ZoneOffset(OffsetStyle),
    ZoneName,
}

/// Resolve a field token to its rendering rule. Repeat counts beyond a
/// kind's defined maximum degrade to the maximum-width rendering.
pub fn render_rule(kind: FieldKind, repeat: usize) -> RenderRule {
    let name_width = |repeat: usize| match repeat {
        0..=3 => NameWidth::Short,
        4 => NameWidth::Long,
        _ => NameWidth::Narrow,
    };
    match kind {
        FieldKind::Year => match repeat {
            1 => RenderRule::Numeric { min_digits: 1 },
            2 => RenderRule::TwoDigitYear,
            n => RenderRule::Numeric {
                min_digits: n.min(4) as u8,
            },
        },
        FieldKind::Month => match repeat {
            1 => RenderRule::Numeric { min_digits: 1 },
            2 => RenderRule::Numeric { min_digits: 2 },
            3 => RenderRule::MonthName(NameWidth::Short),
            4 => RenderRule::MonthName(NameWidth::Long),
            _ => RenderRule::MonthName(NameWidth::Narrow),
        },
        FieldKind::Day => RenderRule::Numeric {
            min_digits: repeat.min(2) as u8,
        },
        FieldKind::DayOfWeekName => RenderRule::DayOfWeekName(name_width(repeat)),
        FieldKind::DayOfYear => RenderRule::Numeric {
            min_digits: repeat.min(3) as u8,
        },
        FieldKind::Quarter => match repeat {
            1 => RenderRule::Numeric { min_digits: 1 },
            2 => RenderRule::Numeric { min_digits: 2 },
            3 => RenderRule::QuarterName(NameWidth::Short),
            _ => RenderRule::QuarterName(NameWidth::Long),
        },
        FieldKind::Era => RenderRule::EraName(name_width(repeat)),
        FieldKind::Hour12 | FieldKind::Hour24 | FieldKind::Minute | FieldKind::Second => {
            RenderRule::Numeric {
                min_digits: repeat.min(2) as u8,
            }
        }
        FieldKind::FractionalSecond => RenderRule::FractionalSecond {
            digits: repeat.min(9) as u8,
        },
        FieldKind::AmPm => RenderRule::AmPmText,
        FieldKind::DayPeriod => RenderRule::DayPeriodName(name_width(repeat)),
        FieldKind::TimeZoneOffset => match repeat {
            0..=3 => RenderRule::ZoneOffset(OffsetStyle::Basic),
            4 => RenderRule::ZoneOffset(OffsetStyle::Gmt),
            _ => RenderRule::ZoneOffset(OffsetStyle::Extended),
        },
        FieldKind::TimeZoneName => RenderRule::ZoneName,
    }
}

/// A parsed number, tagged with the representation the caller asked for.
/// Values are never silently widened or narrowed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericValue {
    Int(i64),
    UInt(u64),
    Float(f64),
}

/// Digit-group sizes for separator insertion: `primary` is the group nearest
/// the decimal point, `secondary` every group above it (3/3 Western,
/// 3/2 lakh/crore).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupingRule {
    pub primary: u8,
    pub secondary: u8,
}

impl Default for GroupingRule {
    fn default() -> Self {
        GroupingRule {
            primary: 3,
            secondary: 3,
        }
    }
}

/// Group-separator handling during number parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeparatorPolicy {
    /// Strip separators wherever they sit between digits (default).
    #[default]
    Accept,
    /// Separators allowed only between fully-sized digit groups.
    Validate,
    /// Any separator fails the parse.
    Reject,
}

/// Literal/field matching discipline for the datetime parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    #[default]
    Strict,
    Lenient,
}

/// The pivot year used to widen a parsed two-digit year.
///
/// A two-digit value below the pivot's own two-digit remainder lands in the
/// century after the pivot; anything else lands in the pivot's century.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortYearWindow(pub i32);

impl ShortYearWindow {
    pub fn resolve(&self, two_digit: i32) -> i32 {
        let century = self.0 - self.0.rem_euclid(100);
        if two_digit < self.0.rem_euclid(100) {
            century + 100 + two_digit
        } else {
            century + two_digit
        }
    }
}

impl Default for ShortYearWindow {
    fn default() -> Self {
        ShortYearWindow(1900)
    }
}

/// Predefined pattern styles resolved through the locale data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardStyle {
    Short,
    Medium,
    Long,
    Full,
}

/// Which standard pattern a style applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternDomain {
    Date,
    Time,
    DateTime,
}

/// Floating-point rendering forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatStyle {
    /// Fixed notation.
    Decimal,
    /// `d.dddE±dd`.
    Exponent,
    /// General form: fixed or exponential, whichever suits the magnitude,
    /// trailing zeros chopped.
    SignificantDigits,
}

/// Options for integer rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerOptions {
    /// Zero-pad to at least this many digits.
    pub min_digits: u8,
    /// Emit the locale plus sign on non-negative values.
    pub always_sign: bool,
    /// Emit a space where the sign would sit on non-negative values.
    pub blank_positive: bool,
    /// Insert group separators per the context's grouping rule.
    pub group: bool,
}

/// Options for floating-point rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatOptions {
    /// Emit the locale plus sign on non-negative values.
    pub always_sign: bool,
    /// Insert group separators in the integer part (fixed notation only).
    pub group: bool,
}

/// Locale symbols addressed through `LocaleDataSource::symbol`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    ZeroDigit,
    GroupSeparator,
    DecimalPoint,
    PlusSign,
    MinusSign,
    ExponentMarker,
    Am,
    Pm,
}

use crate::locale::LocaleKey;

/// Immutable bundle of everything number rendering needs for one locale:
/// numbering system, separators, signs, grouping, and policy flags.
/// Constructed once per locale + options combination and freely shared.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatContext {
    pub locale: LocaleKey,
    /// Code point representing zero in the locale's numbering system;
    /// digits 1-9 follow contiguously.
    pub zero_digit: char,
    pub group_separator: char,
    pub decimal_point: char,
    pub plus_sign: char,
    pub minus_sign: char,
    pub exponent_marker: char,
    pub grouping: GroupingRule,
    /// Never insert group separators when formatting.
    pub omit_group_separator: bool,
    /// Treat any group separator in parsed text as an error.
    pub reject_group_separator: bool,
    /// Uppercase the exponent marker when formatting.
    pub capital_exponent: bool,
    /// Accept U+00A0 and U+202F as interchangeable with an ordinary space
    /// when trimming and when matching the group separator.
    pub space_equivalents: bool,
}

impl FormatContext {
    /// The value of `c` as a digit, accepting both the locale's numbering
    /// system and ASCII digits.
    pub(crate) fn digit_value(&self, c: char) -> Option<u32> {
        let zero = self.zero_digit as u32;
        let v = (c as u32).wrapping_sub(zero);
        if v < 10 {
            return Some(v);
        }
        c.to_digit(10)
    }

    /// The locale glyph for decimal digit `d` (0-9).
    pub(crate) fn digit_glyph(&self, d: u32) -> char {
        debug_assert!(d < 10);
        char::from_u32(self.zero_digit as u32 + d).unwrap_or(self.zero_digit)
    }

    /// Whitespace test honoring the locale's space-equivalence policy.
    pub(crate) fn is_space(&self, c: char) -> bool {
        if self.space_equivalents && (c == '\u{a0}' || c == '\u{202f}') {
            return true;
        }
        c.is_whitespace()
    }

    /// Whether `c` matches the group separator, allowing space-class glyphs
    /// to stand in for a space-class separator.
    pub(crate) fn matches_group_separator(&self, c: char) -> bool {
        if c == self.group_separator {
            return true;
        }
        let sep_is_space = matches!(self.group_separator, ' ' | '\u{a0}' | '\u{202f}');
        self.space_equivalents && sep_is_space && matches!(c, ' ' | '\u{a0}' | '\u{202f}')
    }
}
