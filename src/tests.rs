use crate::locale::{LocaleKey, embedded_data};
use crate::parser::compile_pattern;
use crate::types::*;

fn field(kind: FieldKind, letter: char, repeat: usize) -> PatternToken {
    PatternToken::Field {
        kind,
        letter,
        repeat,
    }
}

fn literal(text: &str) -> PatternToken {
    PatternToken::Literal(text.to_string())
}

#[test]
fn compiles_basic_date_pattern() {
    let pattern = compile_pattern("yyyy-MM-dd").unwrap();
    assert_eq!(
        pattern.tokens(),
        &[
            field(FieldKind::Year, 'y', 4),
            literal("-"),
            field(FieldKind::Month, 'M', 2),
            literal("-"),
            field(FieldKind::Day, 'd', 2),
        ]
    );
}

#[test]
fn unknown_letters_pass_through_as_literals() {
    let pattern = compile_pattern("yyyy-MM-ddTHH:mm").unwrap();
    assert!(pattern.tokens().contains(&literal("T")));
}

#[test]
fn doubled_quote_is_one_literal_quote() {
    let pattern = compile_pattern("''").unwrap();
    assert_eq!(pattern.tokens(), &[literal("'")]);
    assert_eq!(pattern.to_pattern_string(), "''");
}

#[test]
fn quoted_section_shields_field_letters() {
    let pattern = compile_pattern("'yyyy'").unwrap();
    assert_eq!(pattern.tokens(), &[literal("yyyy")]);
    assert_eq!(pattern.to_pattern_string(), "'yyyy'");
}

#[test]
fn embedded_doubled_quote_inside_section() {
    let pattern = compile_pattern("h 'o''clock' a").unwrap();
    assert_eq!(
        pattern.tokens(),
        &[
            field(FieldKind::Hour12, 'h', 1),
            literal(" o'clock "),
            field(FieldKind::AmPm, 'a', 1),
        ]
    );
}

#[test]
fn lone_trailing_quote_is_one_literal_quote() {
    let pattern = compile_pattern("mm'").unwrap();
    assert_eq!(
        pattern.tokens(),
        &[field(FieldKind::Minute, 'm', 2), literal("'")]
    );
}

#[test]
fn unterminated_section_runs_to_end() {
    let pattern = compile_pattern("'end of year: yyyy").unwrap();
    assert_eq!(pattern.tokens(), &[literal("end of year: yyyy")]);
}

#[test]
fn reemission_is_stable_under_recompilation() {
    for text in ["yyyy-MM-dd", "''", "'yyyy'", "h 'o''clock' a", "mm'"] {
        let once = compile_pattern(text).unwrap();
        let again = compile_pattern(&once.to_pattern_string()).unwrap();
        assert_eq!(once.tokens(), again.tokens(), "pattern {text:?}");
    }
}

#[test]
fn render_rules_follow_repeat_count() {
    assert_eq!(
        render_rule(FieldKind::Month, 1),
        RenderRule::Numeric { min_digits: 1 }
    );
    assert_eq!(
        render_rule(FieldKind::Month, 2),
        RenderRule::Numeric { min_digits: 2 }
    );
    assert_eq!(
        render_rule(FieldKind::Month, 3),
        RenderRule::MonthName(NameWidth::Short)
    );
    assert_eq!(
        render_rule(FieldKind::Month, 4),
        RenderRule::MonthName(NameWidth::Long)
    );
    assert_eq!(render_rule(FieldKind::Year, 2), RenderRule::TwoDigitYear);
    assert_eq!(
        render_rule(FieldKind::TimeZoneOffset, 4),
        RenderRule::ZoneOffset(OffsetStyle::Gmt)
    );
}

#[test]
fn excess_repeat_degrades_to_maximum_width() {
    assert_eq!(
        render_rule(FieldKind::Month, 7),
        RenderRule::MonthName(NameWidth::Narrow)
    );
    assert_eq!(
        render_rule(FieldKind::FractionalSecond, 30),
        RenderRule::FractionalSecond { digits: 9 }
    );
}

#[test]
fn locale_tag_resolution() {
    let data = embedded_data();
    let key = LocaleKey::parse("de_DE.UTF-8", data);
    assert_eq!((key.language(), key.country()), ("de", "DE"));

    let defaulted = LocaleKey::parse("fr", data);
    assert_eq!(defaulted.country(), "FR");

    let scripted = LocaleKey::parse("zh-Hans-CN", data);
    assert_eq!(scripted.script(), "Hans");
    assert_eq!(scripted.country(), "CN");
}

#[test]
fn differently_spelled_tags_resolve_equal() {
    let data = embedded_data();
    assert_eq!(
        LocaleKey::parse("de-DE", data),
        LocaleKey::parse("de_DE.UTF-8", data)
    );
}

#[test]
fn unknown_language_degrades_to_root() {
    let data = embedded_data();
    let key = LocaleKey::parse("xx_YY", data);
    assert!(key.is_root());
    assert_eq!(key.name(), "C");
}

#[test]
fn variant_survives_parsing() {
    let data = embedded_data();
    let key = LocaleKey::parse("en_US@euro", data);
    assert_eq!(key.variant(), Some("euro"));
    assert_eq!(key.country(), "US");
}

#[test]
fn short_year_window_pivot() {
    let window = ShortYearWindow(1930);
    assert_eq!(window.resolve(29), 2029);
    assert_eq!(window.resolve(30), 1930);
    let default = ShortYearWindow::default();
    assert_eq!(default.resolve(0), 1900);
    assert_eq!(default.resolve(99), 1999);
}

#[test]
fn format_vs_standalone_month_tables() {
    let data = embedded_data();
    use crate::locale::LocaleDataSource;
    let fr = LocaleKey::parse("fr_FR", data);
    let format = data
        .field_name(&fr, FieldKind::Month, 1, NameWidth::Long, NameContext::Format)
        .unwrap();
    let standalone = data
        .field_name(
            &fr,
            FieldKind::Month,
            1,
            NameWidth::Long,
            NameContext::Standalone,
        )
        .unwrap();
    assert_eq!(format, "janvier");
    assert_eq!(standalone, "Janvier");
}

#[test]
fn locale_symbols_come_from_the_resolved_row() {
    let data = embedded_data();
    use crate::locale::LocaleDataSource;
    let de = LocaleKey::parse("de_DE", data);
    assert_eq!(data.symbol(&de, SymbolKind::DecimalPoint), ",");
    assert_eq!(data.symbol(&de, SymbolKind::GroupSeparator), ".");
    let hi = LocaleKey::parse("hi_IN", data);
    assert_eq!(
        data.grouping_rule(&hi),
        GroupingRule {
            primary: 3,
            secondary: 2
        }
    );
}
