use locale_format::locale::embedded_data;
use locale_format::{
    FloatOptions, FloatStyle, FormatContext, FormatError, IntegerOptions, LocaleKey, NumberCodec,
    NumericValue, SeparatorPolicy,
};

fn codec(tag: &str) -> NumberCodec {
    let data = embedded_data();
    let locale = LocaleKey::parse(tag, data);
    NumberCodec::new(FormatContext::for_locale(data, &locale))
}

fn grouped() -> IntegerOptions {
    IntegerOptions {
        group: true,
        ..IntegerOptions::default()
    }
}

#[test]
fn western_grouping() {
    assert_eq!(codec("en_US").format_i64(1_234_567, grouped()), "1,234,567");
    assert_eq!(codec("en_US").format_i64(-1_234_567, grouped()), "-1,234,567");
    assert_eq!(codec("en_US").format_i64(123, grouped()), "123");
    assert_eq!(codec("en_US").format_i64(1234, grouped()), "1,234");
}

#[test]
fn lakh_crore_grouping() {
    assert_eq!(codec("hi_IN").format_i64(1_234_567, grouped()), "12,34,567");
    assert_eq!(
        codec("hi_IN").format_u64(123_456_789, grouped()),
        "12,34,56,789"
    );
}

#[test]
fn german_symbols() {
    assert_eq!(codec("de_DE").format_i64(1_234_567, grouped()), "1.234.567");
    assert_eq!(
        codec("de_DE").format_f64(
            1_234_567.8,
            FloatStyle::Decimal,
            1,
            FloatOptions {
                group: true,
                ..FloatOptions::default()
            }
        ),
        "1.234.567,8"
    );
}

#[test]
fn grouping_off_by_default() {
    assert_eq!(
        codec("en_US").format_i64(1_234_567, IntegerOptions::default()),
        "1234567"
    );
}

#[test]
fn min_digits_and_signs() {
    let options = IntegerOptions {
        min_digits: 4,
        always_sign: true,
        ..IntegerOptions::default()
    };
    assert_eq!(codec("en_US").format_i64(7, options), "+0007");
    assert_eq!(codec("en_US").format_i64(-7, options), "-0007");

    let ledger = IntegerOptions {
        blank_positive: true,
        ..IntegerOptions::default()
    };
    assert_eq!(codec("en_US").format_i64(7, ledger), " 7");
    assert_eq!(codec("en_US").format_i64(-7, ledger), "-7");
}

#[test]
fn arabic_indic_digits_round_trip() {
    let codec = codec("ar_EG");
    let text = codec.format_i64(123, IntegerOptions::default());
    assert_eq!(text, "\u{661}\u{662}\u{663}");
    assert_eq!(codec.parse_i64(&text).unwrap(), 123);
}

#[test]
fn negative_zero_renders_as_zero() {
    for style in [
        FloatStyle::Decimal,
        FloatStyle::SignificantDigits,
    ] {
        let text = codec("en_US").format_f64(-0.0, style, 0, FloatOptions::default());
        assert_eq!(text, "0", "style {style:?}");
    }
}

#[test]
fn negative_sign_survives_rounding_to_zero() {
    let text = codec("en_US").format_f64(-0.0001, FloatStyle::Decimal, 2, FloatOptions::default());
    assert_eq!(text, "-0.00");
}

#[test]
fn exponent_form() {
    let text = codec("en_US").format_f64(1234.5678, FloatStyle::Exponent, 3, FloatOptions::default());
    assert_eq!(text, "1.235e+03");
    let small = codec("en_US").format_f64(0.0005, FloatStyle::Exponent, 1, FloatOptions::default());
    assert_eq!(small, "5.0e-04");
}

#[test]
fn significant_digits_choose_fixed_or_exponential() {
    let codec = codec("en_US");
    let options = FloatOptions::default();
    assert_eq!(
        codec.format_f64(1234.5678, FloatStyle::SignificantDigits, 6, options),
        "1234.57"
    );
    assert_eq!(
        codec.format_f64(0.0000123, FloatStyle::SignificantDigits, 3, options),
        "1.23e-05"
    );
    assert_eq!(
        codec.format_f64(1_234_567.0, FloatStyle::SignificantDigits, 3, options),
        "1.23e+06"
    );
    assert_eq!(
        codec.format_f64(100.0, FloatStyle::SignificantDigits, 5, options),
        "100"
    );
}

#[test]
fn accept_policy_strips_separators() {
    assert_eq!(codec("en_US").parse_i64("1,234").unwrap(), 1234);
    assert_eq!(codec("en_US").parse_i64("1,234,567").unwrap(), 1_234_567);
}

#[test]
fn reject_policy_fails_on_any_separator() {
    let strict = codec("en_US").with_separator_policy(SeparatorPolicy::Reject);
    assert!(matches!(
        strict.parse_i64("1,234"),
        Err(FormatError::MalformedInput { .. })
    ));
    assert_eq!(strict.parse_i64("1234").unwrap(), 1234);
}

#[test]
fn validate_policy_checks_group_sizes() {
    let validating = codec("en_US").with_separator_policy(SeparatorPolicy::Validate);
    assert_eq!(validating.parse_i64("1,234,567").unwrap(), 1_234_567);
    assert!(validating.parse_i64("12,34").is_err());
    assert!(validating.parse_i64("1,2345").is_err());

    let lakh = codec("hi_IN").with_separator_policy(SeparatorPolicy::Validate);
    assert_eq!(lakh.parse_i64("12,34,567").unwrap(), 1_234_567);
    assert!(lakh.parse_i64("1,234,567").is_err());
}

#[test]
fn separator_placement_is_checked_even_when_accepting() {
    let codec = codec("en_US");
    assert!(codec.parse_i64(",123").is_err());
    assert!(codec.parse_i64("1,,234").is_err());
    assert!(codec.parse_i64("-,123").is_err());
    assert!(codec.parse_i64("123,").is_err());
}

#[test]
fn signed_overflow_boundary_is_strict() {
    let codec = codec("en_US");
    assert!(matches!(
        codec.parse_i64("9223372036854775808"),
        Err(FormatError::OutOfRange(_))
    ));
    assert_eq!(
        codec.parse_u64("9223372036854775808").unwrap(),
        9_223_372_036_854_775_808
    );
    assert_eq!(codec.parse_i64("-9223372036854775808").unwrap(), i64::MIN);
    assert!(codec.parse_u64("18446744073709551616").is_err());
}

#[test]
fn narrower_accessors_range_check() {
    let codec = codec("en_US");
    assert_eq!(codec.parse_i16("32767").unwrap(), i16::MAX);
    assert!(matches!(
        codec.parse_i16("32768"),
        Err(FormatError::OutOfRange(_))
    ));
    assert!(codec.parse_u16("-1").is_err());
    assert_eq!(codec.parse_u32("4294967295").unwrap(), u32::MAX);
    assert!(codec.parse_u32("4294967296").is_err());
}

#[test]
fn double_parsing() {
    let de = codec("de_DE");
    assert_eq!(de.parse_f64("1.234.567,8").unwrap(), 1_234_567.8);
    assert_eq!(de.parse_f64("-0,5").unwrap(), -0.5);
    let en = codec("en_US");
    assert_eq!(en.parse_f64("1.5e3").unwrap(), 1500.0);
    assert_eq!(en.parse_f64("  42  ").unwrap(), 42.0);
    assert!(en.parse_f64("-inf").unwrap().is_infinite());
    assert!(en.parse_f64("NaN").unwrap().is_nan());
}

#[test]
fn malformed_numbers_fail_explicitly() {
    let codec = codec("en_US");
    assert!(codec.parse_f64("").is_err());
    assert!(codec.parse_f64("-").is_err());
    assert!(codec.parse_f64(".").is_err());
    assert!(codec.parse_f64("1.2.3").is_err());
    assert!(codec.parse_f64("1e").is_err());
    assert!(codec.parse_i64("12x").is_err());
}

#[test]
fn narrow_no_break_space_separator() {
    let codec = codec("fr_FR");
    let text = codec.format_i64(1_234_567, grouped());
    assert_eq!(text, "1\u{202f}234\u{202f}567");
    assert_eq!(codec.parse_i64(&text).unwrap(), 1_234_567);
    // An ordinary space stands in for the narrow no-break glyph.
    assert_eq!(codec.parse_i64("1 234 567").unwrap(), 1_234_567);
}

#[test]
fn general_parse_picks_narrowest_representation() {
    let codec = codec("en_US");
    assert_eq!(codec.parse_numeric("42").unwrap(), NumericValue::Int(42));
    assert_eq!(
        codec.parse_numeric("9223372036854775808").unwrap(),
        NumericValue::UInt(9_223_372_036_854_775_808)
    );
    assert_eq!(
        codec.parse_numeric("1.5").unwrap(),
        NumericValue::Float(1.5)
    );
}
