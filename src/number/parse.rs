//! Number parsing: locale text to C-locale transliteration, separator
//! policy enforcement, then exact-width conversion.
//!
//! Overflow is a hard boundary: text whose magnitude exceeds the requested
//! width fails with `OutOfRange`, it is never clamped. The narrower-width
//! accessors range-check the 64-bit result instead of truncating.

use std::num::IntErrorKind;

use super::NumberCodec;
use crate::error::{FormatError, Result};
use crate::types::{NumericValue, SeparatorPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberMode {
    Integer,
    Double,
}

/// Character class of the previously consumed char, for adjacency rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Last {
    Start,
    Sign,
    Digit,
    Group,
    Decimal,
    FracDigit,
    Exponent,
    ExpSign,
    ExpDigit,
}

impl NumberCodec {
    pub fn parse_i64(&self, text: &str) -> Result<i64> {
        let ascii = self.to_c_locale(text, NumberMode::Integer)?;
        ascii.parse::<i64>().map_err(|e| int_error(&ascii, e))
    }

    pub fn parse_u64(&self, text: &str) -> Result<u64> {
        let ascii = self.to_c_locale(text, NumberMode::Integer)?;
        if ascii.starts_with('-') {
            return Err(FormatError::malformed(0, "minus sign on unsigned value"));
        }
        ascii.parse::<u64>().map_err(|e| int_error(&ascii, e))
    }

    pub fn parse_f64(&self, text: &str) -> Result<f64> {
        if let Some(special) = parse_special(text.trim_matches(|c| self.context.is_space(c))) {
            return Ok(special);
        }
        let ascii = self.to_c_locale(text, NumberMode::Double)?;
        ascii
            .parse::<f64>()
            .map_err(|_| FormatError::malformed(0, "not a number"))
    }

    /// General parse: the narrowest representation that holds the text —
    /// signed integer, then unsigned, then double.
    pub fn parse_numeric(&self, text: &str) -> Result<NumericValue> {
        if let Ok(v) = self.parse_i64(text) {
            return Ok(NumericValue::Int(v));
        }
        if let Ok(v) = self.parse_u64(text) {
            return Ok(NumericValue::UInt(v));
        }
        self.parse_f64(text).map(NumericValue::Float)
    }

    pub fn parse_i32(&self, text: &str) -> Result<i32> {
        narrow(self.parse_i64(text)?, "i32")
    }

    pub fn parse_i16(&self, text: &str) -> Result<i16> {
        narrow(self.parse_i64(text)?, "i16")
    }

    pub fn parse_u32(&self, text: &str) -> Result<u32> {
        narrow_unsigned(self.parse_u64(text)?, "u32")
    }

    pub fn parse_u16(&self, text: &str) -> Result<u16> {
        narrow_unsigned(self.parse_u64(text)?, "u16")
    }

    /// Transliterate locale text into a C-locale number string, enforcing
    /// character validity and the group-separator policy. Digits are accepted
    /// from the locale's numbering system and from ASCII.
    fn to_c_locale(&self, text: &str, mode: NumberMode) -> Result<String> {
        let ctx = &self.context;
        let policy = self.separator_policy();

        let trimmed = text.trim_matches(|c| ctx.is_space(c));
        if trimmed.is_empty() {
            return Err(FormatError::malformed(0, "empty input"));
        }
        let base = text.len() - text.trim_start_matches(|c| ctx.is_space(c)).len();

        let mut ascii = String::with_capacity(trimmed.len());
        let mut last = Last::Start;
        // Digit-run lengths between separators in the integer part, for the
        // Validate policy.
        let mut groups: Vec<u32> = Vec::new();
        let mut run: u32 = 0;
        let mut saw_separator = false;

        for (i, c) in trimmed.char_indices() {
            let offset = base + i;
            if let Some(d) = ctx.digit_value(c) {
                last = match last {
                    Last::Decimal | Last::FracDigit => Last::FracDigit,
                    Last::Exponent | Last::ExpSign | Last::ExpDigit => Last::ExpDigit,
                    _ => {
                        run += 1;
                        Last::Digit
                    }
                };
                ascii.push(char::from(b'0' + d as u8));
                continue;
            }
            if c == ctx.plus_sign || c == ctx.minus_sign || c == '+' || c == '-' {
                let negative = c == ctx.minus_sign || c == '-';
                match last {
                    Last::Start => last = Last::Sign,
                    Last::Exponent => last = Last::ExpSign,
                    _ => return Err(FormatError::malformed(offset, "misplaced sign")),
                }
                ascii.push(if negative { '-' } else { '+' });
                continue;
            }
            if c == ctx.decimal_point {
                if mode == NumberMode::Integer {
                    return Err(FormatError::malformed(offset, "fraction in integer"));
                }
                if !matches!(last, Last::Start | Last::Sign | Last::Digit) {
                    return Err(FormatError::malformed(offset, "misplaced decimal point"));
                }
                groups.push(run);
                run = 0;
                last = Last::Decimal;
                ascii.push('.');
                continue;
            }
            if mode == NumberMode::Double
                && (c.eq_ignore_ascii_case(&ctx.exponent_marker)
                    || c == 'e'
                    || c == 'E')
            {
                if !matches!(last, Last::Digit | Last::FracDigit) {
                    return Err(FormatError::malformed(offset, "misplaced exponent"));
                }
                if last == Last::Digit {
                    groups.push(run);
                    run = 0;
                }
                last = Last::Exponent;
                ascii.push('e');
                continue;
            }
            if ctx.matches_group_separator(c) {
                if policy == SeparatorPolicy::Reject {
                    return Err(FormatError::malformed(offset, "group separator rejected"));
                }
                if last != Last::Digit {
                    return Err(FormatError::malformed(offset, "misplaced group separator"));
                }
                groups.push(run);
                run = 0;
                saw_separator = true;
                last = Last::Group;
                continue;
            }
            return Err(FormatError::malformed(
                offset,
                format!("unexpected character {c:?}"),
            ));
        }

        match last {
            Last::Group | Last::Exponent | Last::ExpSign | Last::Sign | Last::Start => {
                return Err(FormatError::malformed(base + trimmed.len(), "truncated number"));
            }
            Last::Digit => {
                groups.push(run);
            }
            _ => {}
        }

        if saw_separator && policy == SeparatorPolicy::Validate {
            self.validate_groups(&groups)?;
        }

        Ok(ascii)
    }

    /// Group-size validation: the run nearest the decimal point must be
    /// exactly `primary`, intermediate runs exactly `secondary`, and the
    /// leading run between 1 and `secondary` digits.
    fn validate_groups(&self, groups: &[u32]) -> Result<()> {
        let rule = self.context.grouping;
        let bad = || FormatError::malformed(0, "group sizes do not match locale");
        let (&first, rest) = groups.split_first().ok_or_else(bad)?;
        let (&nearest, middle) = rest.split_last().unwrap_or((&first, &[]));
        if rest.is_empty() {
            return Ok(());
        }
        if nearest != rule.primary as u32 {
            return Err(bad());
        }
        if first == 0 || first > rule.secondary.max(rule.primary) as u32 {
            return Err(bad());
        }
        if middle.iter().any(|&g| g != rule.secondary as u32) {
            return Err(bad());
        }
        Ok(())
    }
}

fn int_error(ascii: &str, e: std::num::ParseIntError) -> FormatError {
    match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            FormatError::OutOfRange(format!("{ascii} does not fit the requested width"))
        }
        _ => FormatError::malformed(0, "not an integer"),
    }
}

fn narrow<T: TryFrom<i64>>(value: i64, width: &str) -> Result<T> {
    T::try_from(value).map_err(|_| FormatError::OutOfRange(format!("{value} does not fit {width}")))
}

fn narrow_unsigned<T: TryFrom<u64>>(value: u64, width: &str) -> Result<T> {
    T::try_from(value).map_err(|_| FormatError::OutOfRange(format!("{value} does not fit {width}")))
}

/// `inf`, `infinity` and `nan` with an optional ASCII sign, matched
/// case-insensitively.
fn parse_special(trimmed: &str) -> Option<f64> {
    let (negative, rest) = match trimmed.strip_prefix(['-', '+']) {
        Some(rest) => (trimmed.starts_with('-'), rest),
        None => (false, trimmed),
    };
    let magnitude = if rest.eq_ignore_ascii_case("inf") || rest.eq_ignore_ascii_case("infinity") {
        f64::INFINITY
    } else if rest.eq_ignore_ascii_case("nan") {
        f64::NAN
    } else {
        return None;
    };
    Some(if negative { -magnitude } else { magnitude })
}
