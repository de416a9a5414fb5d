//! Number rendering: integers with grouping and padding, doubles in fixed,
//! exponential and significant-digit forms.

use super::NumberCodec;
use crate::types::{FloatOptions, FloatStyle, IntegerOptions};

impl NumberCodec {
    /// Render a signed integer.
    pub fn format_i64(&self, value: i64, options: IntegerOptions) -> String {
        let mut out = String::new();
        if value < 0 {
            out.push(self.context.minus_sign);
        } else if options.always_sign {
            out.push(self.context.plus_sign);
        } else if options.blank_positive {
            out.push(' ');
        }
        let digits = padded_digits(value.unsigned_abs(), options.min_digits);
        self.emit_grouped(&digits, options.group, &mut out);
        out
    }

    /// Render an unsigned integer.
    pub fn format_u64(&self, value: u64, options: IntegerOptions) -> String {
        let mut out = String::new();
        if options.always_sign {
            out.push(self.context.plus_sign);
        } else if options.blank_positive {
            out.push(' ');
        }
        let digits = padded_digits(value, options.min_digits);
        self.emit_grouped(&digits, options.group, &mut out);
        out
    }

    /// Render a double.
    ///
    /// `precision` is the fraction-digit count in `Decimal` and `Exponent`
    /// styles and the significant-digit count in `SignificantDigits` style.
    /// A negative zero renders as plain `0`: the sign only survives when the
    /// value itself is nonzero.
    pub fn format_f64(
        &self,
        value: f64,
        style: FloatStyle,
        precision: usize,
        options: FloatOptions,
    ) -> String {
        if value.is_nan() {
            return "nan".to_string();
        }

        let negative = value.is_sign_negative() && value != 0.0;
        let mut out = String::new();
        if negative {
            out.push(self.context.minus_sign);
        } else if options.always_sign {
            out.push(self.context.plus_sign);
        }

        if value.is_infinite() {
            out.push_str("inf");
            return out;
        }

        let magnitude = value.abs();
        match style {
            FloatStyle::Decimal => {
                let ascii = format!("{magnitude:.precision$}");
                self.localize(&ascii, options.group, &mut out);
            }
            FloatStyle::Exponent => {
                let ascii = format!("{magnitude:.precision$e}");
                self.localize(&ascii, false, &mut out);
            }
            FloatStyle::SignificantDigits => {
                // Precision 0 asks for the shortest round-trippable form.
                let significant = if precision == 0 { None } else { Some(precision) };
                let ascii = self.general_form(magnitude, significant);
                self.localize(&ascii, options.group, &mut out);
            }
        }
        out
    }

    /// The g-style choice: fixed notation while the decimal point stays
    /// within the significant digits, exponential otherwise, trailing zeros
    /// chopped either way.
    fn general_form(&self, magnitude: f64, significant: Option<usize>) -> String {
        if magnitude == 0.0 {
            return "0".to_string();
        }
        // One exponential rendering fixes both the rounded digits and the
        // decimal-point position. Without a requested precision the shortest
        // round-trippable mantissa is used as-is.
        let probe = match significant {
            Some(s) => format!("{:.*e}", s.max(1) - 1, magnitude),
            None => format!("{magnitude:e}"),
        };
        let (mantissa, exp) = match probe.split_once('e') {
            Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
            None => (probe.as_str(), 0),
        };
        let significant =
            significant.unwrap_or_else(|| mantissa.chars().filter(|c| c.is_ascii_digit()).count());
        let decpt = exp + 1;

        if decpt <= -4 || decpt > significant as i32 {
            let chopped = chop_fraction(mantissa);
            return format!("{chopped}e{exp}");
        }

        let digits: String = mantissa.chars().filter(|c| c.is_ascii_digit()).collect();
        let mut fixed = String::new();
        if decpt <= 0 {
            fixed.push_str("0.");
            for _ in 0..-decpt {
                fixed.push('0');
            }
            fixed.push_str(&digits);
        } else if (decpt as usize) >= digits.len() {
            fixed.push_str(&digits);
            for _ in 0..(decpt as usize - digits.len()) {
                fixed.push('0');
            }
        } else {
            fixed.push_str(&digits[..decpt as usize]);
            fixed.push('.');
            fixed.push_str(&digits[decpt as usize..]);
        }
        chop_fraction(&fixed)
    }

    /// Transliterate a C-locale rendering (`digits[.digits][e[-]digits]`)
    /// into locale glyphs, grouping the integer part on request.
    fn localize(&self, ascii: &str, group: bool, out: &mut String) {
        let (mantissa, exponent) = match ascii.split_once('e') {
            Some((m, e)) => (m, Some(e)),
            None => (ascii, None),
        };
        let (int_part, frac_part) = match mantissa.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (mantissa, None),
        };

        self.emit_grouped(int_part, group, out);
        if let Some(frac) = frac_part {
            out.push(self.context.decimal_point);
            for c in frac.chars() {
                out.push(self.context.digit_glyph(c.to_digit(10).unwrap_or(0)));
            }
        }
        if let Some(exp) = exponent {
            out.push(if self.context.capital_exponent {
                self.context
                    .exponent_marker
                    .to_uppercase()
                    .next()
                    .unwrap_or(self.context.exponent_marker)
            } else {
                self.context.exponent_marker
            });
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(rest) => (self.context.minus_sign, rest),
                None => (self.context.plus_sign, exp),
            };
            out.push(sign);
            // At least two exponent digits.
            for _ in digits.len()..2 {
                out.push(self.context.digit_glyph(0));
            }
            for c in digits.chars() {
                out.push(self.context.digit_glyph(c.to_digit(10).unwrap_or(0)));
            }
        }
    }

    /// Emit an ASCII digit string in locale glyphs, inserting group
    /// separators from the right per the primary/secondary rule.
    pub(crate) fn emit_grouped(&self, digits: &str, group: bool, out: &mut String) {
        let rule = self.context.grouping;
        let grouping_on = group && !self.context.omit_group_separator && rule.primary > 0;
        let n = digits.len();
        for (i, c) in digits.chars().enumerate() {
            if grouping_on && i > 0 {
                let remaining = (n - i) as u32;
                let primary = rule.primary as u32;
                let secondary = rule.secondary.max(1) as u32;
                let boundary = remaining == primary
                    || (remaining > primary && (remaining - primary) % secondary == 0);
                if boundary {
                    out.push(self.context.group_separator);
                }
            }
            out.push(self.context.digit_glyph(c.to_digit(10).unwrap_or(0)));
        }
    }
}

fn padded_digits(value: u64, min_digits: u8) -> String {
    let digits = value.to_string();
    if digits.len() >= min_digits as usize {
        digits
    } else {
        let mut padded = "0".repeat(min_digits as usize - digits.len());
        padded.push_str(&digits);
        padded
    }
}

fn chop_fraction(text: &str) -> String {
    if !text.contains('.') {
        return text.to_string();
    }
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
