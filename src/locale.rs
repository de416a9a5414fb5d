//! Locale identification and locale data access
//!
//! `LocaleKey` resolves BCP-47-like tags to a canonical
//! (language, script, country) triple; `LocaleDataSource` is the read-only
//! lookup service the formatting core consults for names, symbols, standard
//! patterns and grouping rules. The built-in backend loads embedded TOML
//! tables once behind a `OnceLock`.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::types::{
    FieldKind, FormatContext, GroupingRule, NameContext, NameWidth, PatternDomain, StandardStyle,
    SymbolKind,
};

const TAG_SEPARATORS: [char; 3] = ['_', '-', '.'];

/// Canonical locale identity: (language, script, country) plus an optional
/// variant. Two differently-spelled tags that resolve to the same triple
/// compare equal. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleKey {
    language: String,
    script: String,
    country: String,
    variant: Option<String>,
}

impl LocaleKey {
    /// The `C`/root locale: the culturally-neutral fallback.
    pub fn root() -> Self {
        LocaleKey {
            language: "C".to_string(),
            script: String::new(),
            country: String::new(),
            variant: None,
        }
    }

    pub fn new(language: &str, script: &str, country: &str) -> Self {
        LocaleKey {
            language: language.to_string(),
            script: script.to_string(),
            country: country.to_string(),
            variant: None,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.language == "C"
    }

    /// `language_COUNTRY` form, or `C` for the root locale.
    pub fn name(&self) -> String {
        if self.is_root() {
            return "C".to_string();
        }
        if self.country.is_empty() {
            self.language.clone()
        } else {
            format!("{}_{}", self.language, self.country)
        }
    }

    /// Parse and canonicalize a locale tag such as `de_DE`, `sr-Latn-RS` or
    /// `fr_FR.UTF-8@euro`.
    ///
    /// Splits on `_ - . @`; recognizes a 2-3 letter language, an optional
    /// 4-letter script, and a 2-letter or 3-digit country. Malformed or
    /// unrecognized components are discarded rather than failing: an unknown
    /// language yields the root locale, and a missing country is filled from
    /// the data source's per-language default table.
    pub fn parse(tag: &str, data: &dyn LocaleDataSource) -> Self {
        let (main, variant) = match tag.split_once('@') {
            Some((m, v)) if !v.is_empty() => (m, Some(v.to_string())),
            Some((m, _)) => (m, None),
            None => (tag, None),
        };

        let mut language = String::new();
        let mut script = String::new();
        let mut country = String::new();

        for (index, tag) in main.split(TAG_SEPARATORS).enumerate() {
            // BCP47 subtags are at most 8 Latin alphanumerics; anything else
            // ends the scan.
            if tag.len() > 8 || !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
                break;
            }
            match index {
                0 => {
                    if matches!(tag.len(), 2 | 3) && tag.chars().all(|c| c.is_ascii_alphabetic()) {
                        language = tag.to_ascii_lowercase();
                    }
                }
                1 => {
                    if tag.len() == 4 && tag.chars().all(|c| c.is_ascii_alphabetic()) {
                        script = titlecase(tag);
                    } else if let Some(c) = country_code(tag) {
                        country = c;
                        break;
                    }
                }
                _ => {
                    if let Some(c) = country_code(tag) {
                        country = c;
                    }
                    break;
                }
            }
        }

        if language.is_empty() || !data.known_language(&language) {
            return LocaleKey::root();
        }
        if country.is_empty() {
            country = data.default_country(&language).unwrap_or_default();
        }

        LocaleKey {
            language,
            script,
            country,
            variant,
        }
    }
}

fn titlecase(tag: &str) -> String {
    let mut out = String::with_capacity(tag.len());
    for (i, c) in tag.chars().enumerate() {
        if i == 0 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c.to_ascii_lowercase());
        }
    }
    out
}

/// A valid country component: two letters (uppercased) or three digits.
fn country_code(tag: &str) -> Option<String> {
    if tag.len() == 2 && tag.chars().all(|c| c.is_ascii_alphabetic()) {
        return Some(tag.to_ascii_uppercase());
    }
    if tag.len() == 3 && tag.chars().all(|c| c.is_ascii_digit()) {
        return Some(tag.to_string());
    }
    None
}

/// Read-only locale data lookup consumed by the formatting core.
///
/// Implementations must resolve any key deterministically: lookups for an
/// unknown locale fall back to the root tables rather than failing.
pub trait LocaleDataSource: Send + Sync {
    /// A localized field name: month/day/era/quarter/day-period text.
    /// Month and quarter indices are 1-based; day-of-week index 1 is Monday;
    /// era index 0 is the before-epoch era and 1 the current era; AM/PM and
    /// day periods use 0 = AM half, 1 = PM half.
    fn field_name(
        &self,
        locale: &LocaleKey,
        field: FieldKind,
        index: usize,
        width: NameWidth,
        context: NameContext,
    ) -> Option<String>;

    /// A numeric symbol (separators, signs, digits, AM/PM text).
    fn symbol(&self, locale: &LocaleKey, kind: SymbolKind) -> String;

    /// The skeleton pattern for a standard style in the given domain.
    fn standard_pattern(
        &self,
        locale: &LocaleKey,
        domain: PatternDomain,
        style: StandardStyle,
    ) -> String;

    fn grouping_rule(&self, locale: &LocaleKey) -> GroupingRule;

    /// Default pivot for widening two-digit years.
    fn short_year_pivot(&self, locale: &LocaleKey) -> i32;

    /// Whether narrow/no-break spaces are interchangeable with ordinary
    /// spaces for this locale.
    fn space_equivalents(&self, locale: &LocaleKey) -> bool;

    fn known_language(&self, language: &str) -> bool;

    fn default_country(&self, language: &str) -> Option<String>;
}

impl FormatContext {
    /// Build the immutable context for a locale from its data-source row.
    pub fn for_locale(data: &dyn LocaleDataSource, locale: &LocaleKey) -> Self {
        let first = |kind: SymbolKind, fallback: char| {
            data.symbol(locale, kind).chars().next().unwrap_or(fallback)
        };
        FormatContext {
            locale: locale.clone(),
            zero_digit: first(SymbolKind::ZeroDigit, '0'),
            group_separator: first(SymbolKind::GroupSeparator, ','),
            decimal_point: first(SymbolKind::DecimalPoint, '.'),
            plus_sign: first(SymbolKind::PlusSign, '+'),
            minus_sign: first(SymbolKind::MinusSign, '-'),
            exponent_marker: first(SymbolKind::ExponentMarker, 'e'),
            grouping: data.grouping_rule(locale),
            omit_group_separator: false,
            reject_group_separator: false,
            capital_exponent: false,
            space_equivalents: data.space_equivalents(locale),
        }
    }
}

/// One locale's worth of data after overlaying the base row.
#[derive(Debug, Clone)]
struct LocaleRow {
    decimal: char,
    group: char,
    zero: char,
    plus: char,
    minus: char,
    exponent: char,
    grouping: GroupingRule,
    short_year_pivot: i32,
    am: String,
    pm: String,
    months_long: Vec<String>,
    months_short: Vec<String>,
    months_narrow: Vec<String>,
    months_long_standalone: Option<Vec<String>>,
    months_short_standalone: Option<Vec<String>>,
    days_long: Vec<String>,
    days_short: Vec<String>,
    days_narrow: Vec<String>,
    eras_long: Vec<String>,
    eras_short: Vec<String>,
    eras_narrow: Vec<String>,
    quarters_long: Vec<String>,
    quarters_short: Vec<String>,
    day_periods_long: Vec<String>,
    day_periods_short: Vec<String>,
    date_patterns: [String; 4],
    time_patterns: [String; 4],
}

impl Default for LocaleRow {
    fn default() -> Self {
        LocaleRow {
            decimal: '.',
            group: ',',
            zero: '0',
            plus: '+',
            minus: '-',
            exponent: 'e',
            grouping: GroupingRule::default(),
            short_year_pivot: 1900,
            am: "AM".to_string(),
            pm: "PM".to_string(),
            months_long: Vec::new(),
            months_short: Vec::new(),
            months_narrow: Vec::new(),
            months_long_standalone: None,
            months_short_standalone: None,
            days_long: Vec::new(),
            days_short: Vec::new(),
            days_narrow: Vec::new(),
            eras_long: Vec::new(),
            eras_short: Vec::new(),
            eras_narrow: Vec::new(),
            quarters_long: Vec::new(),
            quarters_short: Vec::new(),
            day_periods_long: Vec::new(),
            day_periods_short: Vec::new(),
            date_patterns: Default::default(),
            time_patterns: Default::default(),
        }
    }
}

/// The built-in data backend: embedded TOML tables keyed by locale name.
pub struct EmbeddedLocaleData {
    rows: HashMap<String, LocaleRow>,
    default_countries: HashMap<String, String>,
}

static EMBEDDED_DATA: OnceLock<EmbeddedLocaleData> = OnceLock::new();

/// The process-wide embedded data source.
pub fn embedded_data() -> &'static EmbeddedLocaleData {
    EMBEDDED_DATA.get_or_init(EmbeddedLocaleData::load)
}

impl EmbeddedLocaleData {
    fn load() -> Self {
        let mut data = EmbeddedLocaleData {
            rows: HashMap::new(),
            default_countries: HashMap::new(),
        };
        if let Err(e) = data.parse_embedded(include_str!("locale/locale_data.toml")) {
            // Continue with empty tables; every lookup then hits the
            // built-in root defaults.
            eprintln!("locale-format: failed to load embedded locale data: {e}");
        }
        data
    }

    fn parse_embedded(&mut self, toml_str: &str) -> Result<(), String> {
        let parsed: toml::Value = toml::from_str(toml_str).map_err(|e| e.to_string())?;
        let table = parsed.as_table().ok_or("root is not a table")?;

        if let Some(defaults) = table.get("default_countries").and_then(|v| v.as_table()) {
            for (lang, country) in defaults {
                if let Some(c) = country.as_str() {
                    self.default_countries.insert(lang.clone(), c.to_string());
                }
            }
        }

        let base = match table.get("base") {
            Some(v) => Self::row_from_toml(v, &LocaleRow::default())?,
            None => LocaleRow::default(),
        };

        for (id, value) in table {
            if id == "default_countries" {
                continue;
            }
            let parent = if id == "base" { LocaleRow::default() } else { base.clone() };
            let row = Self::row_from_toml(value, &parent)?;
            let key = if id == "base" { "C".to_string() } else { id.clone() };
            self.rows.insert(key, row);
        }
        Ok(())
    }

    fn row_from_toml(value: &toml::Value, parent: &LocaleRow) -> Result<LocaleRow, String> {
        let table = value.as_table().ok_or("locale entry is not a table")?;
        let mut row = parent.clone();

        let first_char = |key: &str, current: char| {
            table
                .get(key)
                .and_then(|v| v.as_str())
                .and_then(|s| s.chars().next())
                .unwrap_or(current)
        };
        row.decimal = first_char("decimal", row.decimal);
        row.group = first_char("group", row.group);
        row.zero = first_char("zero", row.zero);
        row.plus = first_char("plus", row.plus);
        row.minus = first_char("minus", row.minus);
        row.exponent = first_char("exponent", row.exponent);

        if let Some(sizes) = table.get("grouping").and_then(|v| v.as_array()) {
            if sizes.len() == 2 {
                let primary = sizes[0].as_integer().unwrap_or(3) as u8;
                let secondary = sizes[1].as_integer().unwrap_or(3) as u8;
                row.grouping = GroupingRule { primary, secondary };
            }
        }
        if let Some(pivot) = table.get("short_year_pivot").and_then(|v| v.as_integer()) {
            row.short_year_pivot = pivot as i32;
        }
        if let Some(am) = table.get("am").and_then(|v| v.as_str()) {
            row.am = am.to_string();
        }
        if let Some(pm) = table.get("pm").and_then(|v| v.as_str()) {
            row.pm = pm.to_string();
        }

        let string_list = |key: &str| -> Option<Vec<String>> {
            table.get(key).and_then(|v| v.as_array()).map(|items| {
                items
                    .iter()
                    .map(|s| s.as_str().unwrap_or_default().to_string())
                    .collect()
            })
        };
        for (key, slot) in [
            ("month_names", &mut row.months_long),
            ("month_abbreviations", &mut row.months_short),
            ("month_narrow", &mut row.months_narrow),
            ("day_names", &mut row.days_long),
            ("day_abbreviations", &mut row.days_short),
            ("day_narrow", &mut row.days_narrow),
            ("era_names", &mut row.eras_long),
            ("era_abbreviations", &mut row.eras_short),
            ("era_narrow", &mut row.eras_narrow),
            ("quarter_names", &mut row.quarters_long),
            ("quarter_abbreviations", &mut row.quarters_short),
            ("day_periods", &mut row.day_periods_long),
            ("day_period_abbreviations", &mut row.day_periods_short),
        ] {
            if let Some(list) = string_list(key) {
                *slot = list;
            }
        }
        if let Some(list) = string_list("month_names_standalone") {
            row.months_long_standalone = Some(list);
        }
        if let Some(list) = string_list("month_abbreviations_standalone") {
            row.months_short_standalone = Some(list);
        }

        let pattern = |key: &str, current: &str| {
            table
                .get(key)
                .and_then(|v| v.as_str())
                .unwrap_or(current)
                .to_string()
        };
        for (i, style) in ["short", "medium", "long", "full"].iter().enumerate() {
            row.date_patterns[i] =
                pattern(&format!("date_{style}"), &parent.date_patterns[i]);
            row.time_patterns[i] =
                pattern(&format!("time_{style}"), &parent.time_patterns[i]);
        }

        Ok(row)
    }

    /// Resolve a key to its closest data row: exact `lang_COUNTRY`, then
    /// `lang`, then the root row.
    fn row(&self, locale: &LocaleKey) -> &LocaleRow {
        static ROOT_FALLBACK: OnceLock<LocaleRow> = OnceLock::new();
        if !locale.is_root() {
            if let Some(row) = self.rows.get(&locale.name()) {
                return row;
            }
            if let Some(row) = self.rows.get(locale.language()) {
                return row;
            }
        }
        self.rows
            .get("C")
            .unwrap_or_else(|| ROOT_FALLBACK.get_or_init(LocaleRow::default))
    }

    pub fn available_locales(&self) -> Vec<String> {
        let mut names: Vec<String> = self.rows.keys().cloned().collect();
        names.sort();
        names
    }
}

fn style_index(style: StandardStyle) -> usize {
    match style {
        StandardStyle::Short => 0,
        StandardStyle::Medium => 1,
        StandardStyle::Long => 2,
        StandardStyle::Full => 3,
    }
}

impl LocaleDataSource for EmbeddedLocaleData {
    fn field_name(
        &self,
        locale: &LocaleKey,
        field: FieldKind,
        index: usize,
        width: NameWidth,
        context: NameContext,
    ) -> Option<String> {
        let row = self.row(locale);
        let pick = |list: &[String], index: usize| list.get(index).cloned();
        match field {
            FieldKind::Month => {
                if index == 0 || index > 12 {
                    return None;
                }
                let table: &[String] = match (width, context) {
                    (NameWidth::Long, NameContext::Standalone) => row
                        .months_long_standalone
                        .as_deref()
                        .unwrap_or(&row.months_long),
                    (NameWidth::Short, NameContext::Standalone) => row
                        .months_short_standalone
                        .as_deref()
                        .unwrap_or(&row.months_short),
                    (NameWidth::Long, _) => &row.months_long,
                    (NameWidth::Short, _) => &row.months_short,
                    (NameWidth::Narrow, _) => {
                        if row.months_narrow.is_empty() {
                            &row.months_short
                        } else {
                            &row.months_narrow
                        }
                    }
                };
                pick(table, index - 1)
            }
            FieldKind::DayOfWeekName => {
                if index == 0 || index > 7 {
                    return None;
                }
                let table: &[String] = match width {
                    NameWidth::Long => &row.days_long,
                    NameWidth::Short => &row.days_short,
                    NameWidth::Narrow => {
                        if row.days_narrow.is_empty() {
                            &row.days_short
                        } else {
                            &row.days_narrow
                        }
                    }
                };
                pick(table, index - 1)
            }
            FieldKind::Quarter => {
                if index == 0 || index > 4 {
                    return None;
                }
                let table: &[String] = match width {
                    NameWidth::Long => &row.quarters_long,
                    _ => &row.quarters_short,
                };
                pick(table, index - 1)
            }
            FieldKind::Era => {
                let table: &[String] = match width {
                    NameWidth::Long => &row.eras_long,
                    NameWidth::Short => &row.eras_short,
                    NameWidth::Narrow => {
                        if row.eras_narrow.is_empty() {
                            &row.eras_short
                        } else {
                            &row.eras_narrow
                        }
                    }
                };
                pick(table, index)
            }
            FieldKind::DayPeriod => {
                let table: &[String] = match width {
                    NameWidth::Long => &row.day_periods_long,
                    _ => &row.day_periods_short,
                };
                // Day periods fall back to AM/PM text when the locale
                // defines none.
                pick(table, index).or_else(|| match index {
                    0 => Some(row.am.clone()),
                    1 => Some(row.pm.clone()),
                    _ => None,
                })
            }
            FieldKind::AmPm => match index {
                0 => Some(row.am.clone()),
                1 => Some(row.pm.clone()),
                _ => None,
            },
            _ => None,
        }
    }

    fn symbol(&self, locale: &LocaleKey, kind: SymbolKind) -> String {
        let row = self.row(locale);
        match kind {
            SymbolKind::ZeroDigit => row.zero.to_string(),
            SymbolKind::GroupSeparator => row.group.to_string(),
            SymbolKind::DecimalPoint => row.decimal.to_string(),
            SymbolKind::PlusSign => row.plus.to_string(),
            SymbolKind::MinusSign => row.minus.to_string(),
            SymbolKind::ExponentMarker => row.exponent.to_string(),
            SymbolKind::Am => row.am.clone(),
            SymbolKind::Pm => row.pm.clone(),
        }
    }

    fn standard_pattern(
        &self,
        locale: &LocaleKey,
        domain: PatternDomain,
        style: StandardStyle,
    ) -> String {
        let row = self.row(locale);
        let i = style_index(style);
        match domain {
            PatternDomain::Date => row.date_patterns[i].clone(),
            PatternDomain::Time => row.time_patterns[i].clone(),
            PatternDomain::DateTime => {
                format!("{} {}", row.date_patterns[i], row.time_patterns[i])
            }
        }
    }

    fn grouping_rule(&self, locale: &LocaleKey) -> GroupingRule {
        self.row(locale).grouping
    }

    fn short_year_pivot(&self, locale: &LocaleKey) -> i32 {
        self.row(locale).short_year_pivot
    }

    fn space_equivalents(&self, locale: &LocaleKey) -> bool {
        matches!(self.row(locale).group, ' ' | '\u{a0}' | '\u{202f}')
    }

    fn known_language(&self, language: &str) -> bool {
        self.default_countries.contains_key(language) || self.rows.contains_key(language)
    }

    fn default_country(&self, language: &str) -> Option<String> {
        self.default_countries.get(language).cloned()
    }
}
