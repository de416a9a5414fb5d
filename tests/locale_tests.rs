use locale_format::locale::{LocaleDataSource, embedded_data};
use locale_format::{LocaleKey, PatternDomain, StandardStyle};

#[test]
fn separators_and_at_suffix() {
    let data = embedded_data();
    for tag in ["de_DE", "de-DE", "de_DE.UTF-8", "de_DE@euro", "de"] {
        let key = LocaleKey::parse(tag, data);
        assert_eq!(key.language(), "de", "tag {tag:?}");
        assert_eq!(key.country(), "DE", "tag {tag:?}");
    }
}

#[test]
fn three_digit_country_code() {
    let data = embedded_data();
    let key = LocaleKey::parse("es-419", data);
    assert_eq!(key.country(), "419");
}

#[test]
fn malformed_components_are_discarded() {
    let data = embedded_data();
    // Overlong subtag ends the scan; the language still resolves.
    let key = LocaleKey::parse("fr_toolongtag", data);
    assert_eq!(key.language(), "fr");
    assert_eq!(key.country(), "FR");

    // A non-alphanumeric component ends the scan too.
    let odd = LocaleKey::parse("en_U$", data);
    assert_eq!(odd.language(), "en");
    assert_eq!(odd.country(), "US");
}

#[test]
fn empty_and_garbage_tags_resolve_to_root() {
    let data = embedded_data();
    assert!(LocaleKey::parse("", data).is_root());
    assert!(LocaleKey::parse("123", data).is_root());
    assert!(LocaleKey::parse("_DE", data).is_root());
}

#[test]
fn unknown_region_falls_back_to_language_row() {
    let data = embedded_data();
    // No de_AT row is shipped; lookups resolve through the `de` row.
    let at = LocaleKey::parse("de_AT", data);
    assert_eq!(data.symbol(&at, locale_format::types::SymbolKind::DecimalPoint), ",");
}

#[test]
fn root_locale_uses_neutral_conventions() {
    let data = embedded_data();
    let root = LocaleKey::root();
    assert_eq!(
        data.standard_pattern(&root, PatternDomain::Date, StandardStyle::Short),
        "yyyy-MM-dd"
    );
    assert_eq!(
        data.symbol(&root, locale_format::types::SymbolKind::DecimalPoint),
        "."
    );
}

#[test]
fn standard_patterns_differ_per_locale() {
    let data = embedded_data();
    let us = LocaleKey::parse("en_US", data);
    let gb = LocaleKey::parse("en_GB", data);
    assert_eq!(
        data.standard_pattern(&us, PatternDomain::Date, StandardStyle::Short),
        "M/d/yy"
    );
    assert_eq!(
        data.standard_pattern(&gb, PatternDomain::Date, StandardStyle::Short),
        "dd/MM/yyyy"
    );
}

#[test]
fn datetime_pattern_composes_date_and_time() {
    let data = embedded_data();
    let us = LocaleKey::parse("en_US", data);
    assert_eq!(
        data.standard_pattern(&us, PatternDomain::DateTime, StandardStyle::Short),
        "M/d/yy h:mm a"
    );
}

#[test]
fn space_equivalence_is_per_locale() {
    let data = embedded_data();
    assert!(data.space_equivalents(&LocaleKey::parse("fr_FR", data)));
    assert!(!data.space_equivalents(&LocaleKey::parse("en_US", data)));
}
