//! Field interpolation with deterministic fallbacks.
//!
//! Every value a section generator places in a document goes through this
//! module. A field that is absent, `null`, or blank never fails a render: it
//! resolves to a fallback instead, either bracketed placeholder text such as
//! `[Client Name]` that tells the author what is missing, or a computed
//! default (the render date, a generated document number).
//!
//! # Example
//!
//! ```
//! use docsmith::interpolate::resolve;
//! use serde_json::json;
//!
//! let data = json!({ "companyInfo": { "name": "Acme" }, "phases": [{ "name": "Discovery" }] });
//! assert_eq!(resolve(&data, "companyInfo.name", "[Company]"), "Acme");
//! assert_eq!(resolve(&data, "phases[0].name", "[Phase]"), "Discovery");
//! assert_eq!(resolve(&data, "companyInfo.address", "[Address]"), "[Address]");
//! ```

use crate::render::ComposeOptions;
use chrono::{DateTime, Datelike, NaiveDate};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;
use std::str::FromStr;

/// Resolve a field path to text, or return the fallback.
///
/// A path that lands on an object has no text of its own and resolves to
/// the fallback.
pub fn resolve(data: &Value, path: &str, fallback: &str) -> String {
    match lookup_text(data, path) {
        Some(value) => value_to_text(value),
        None => fallback.to_string(),
    }
}

/// Look up a present (non-null, non-blank) value by path.
///
/// Paths are dot-separated keys; array elements are addressed either as a
/// numeric segment (`phases.0.name`) or with brackets (`phases[0].name`).
pub fn lookup<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = data;
    for segment in segments(path)? {
        current = match (segment, current) {
            (Segment::Key(key), Value::Object(map)) => map.get(key)?,
            (Segment::Key(key), Value::Array(items)) => items.get(key.parse::<usize>().ok()?)?,
            (Segment::Index(i), Value::Array(items)) => items.get(i)?,
            _ => return None,
        };
    }
    is_present(current).then_some(current)
}

/// Look up a present value that can be rendered as text.
pub fn lookup_text<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    lookup(data, path).filter(|v| !v.is_object())
}

/// Whether a value counts as supplied data.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Segment<'p> {
    Key(&'p str),
    Index(usize),
}

fn segments(path: &str) -> Option<Vec<Segment<'_>>> {
    let mut out = Vec::new();
    for part in path.split('.') {
        let (key, mut rest) = match part.find('[') {
            Some(i) => (&part[..i], &part[i..]),
            None => (part, ""),
        };
        if !key.is_empty() {
            out.push(Segment::Key(key));
        }
        while !rest.is_empty() {
            let close = rest.find(']')?;
            let index = rest.get(1..close)?.trim().parse::<usize>().ok()?;
            out.push(Segment::Index(index));
            rest = &rest[close + 1..];
            if !rest.is_empty() && !rest.starts_with('[') {
                return None;
            }
        }
    }
    Some(out)
}

/// Render a JSON value as display text.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                let f = n.as_f64().unwrap_or_default();
                if f.fract() == 0.0 && f.abs() < 1e15 {
                    format!("{:.0}", f)
                } else {
                    f.to_string()
                }
            }
        }
        Value::Array(items) => items
            .iter()
            .map(value_to_text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => String::new(),
    }
}

/// Read a value as a decimal amount.
///
/// Accepts JSON numbers and numeric strings. A string may carry one
/// currency symbol, surrounding whitespace and `,` thousands separators in
/// grouping positions; anything else makes it unreadable.
pub fn value_to_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Decimal::from(i))
            } else {
                n.as_f64().and_then(Decimal::from_f64)
            }
        }
        Value::String(s) => parse_amount(s),
        _ => None,
    }
}

const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥', '₹', '₩', '₽', '₺', '₪', '₫', '₱', '฿', '¢'];

/// Parse an amount string such as `"$1,200.50"`, `"-€40"` or `"1e3"`.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let s = s.trim();
    let (negative, s) = match s.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, s),
    };
    let s = s.strip_prefix(CURRENCY_SYMBOLS).unwrap_or(s).trim_start();
    let (negative, s) = match s.strip_prefix('-') {
        Some(rest) if !negative => (true, rest),
        _ => (negative, s),
    };

    let number = ungroup(s)?;
    if !number.starts_with(|c: char| c.is_ascii_digit() || c == '.')
        || !number
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return None;
    }

    let amount = if number.contains(|c| c == 'e' || c == 'E') {
        Decimal::from_scientific(&number).ok()?
    } else {
        Decimal::from_str(&number).ok()?
    };
    Some(if negative { -amount } else { amount })
}

/// Remove `,` thousands separators, rejecting commas outside grouping
/// positions (`1,5` or `12,34,567`).
fn ungroup(s: &str) -> Option<String> {
    if !s.contains(',') {
        return Some(s.to_string());
    }
    let (whole, fraction) = match s.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (s, None),
    };
    let mut groups = whole.split(',');
    let head = groups.next()?;
    if head.is_empty() || head.len() > 3 || !head.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let mut out = head.to_string();
    for group in groups {
        if group.len() != 3 || !group.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        out.push_str(group);
    }
    if let Some(fraction) = fraction {
        if fraction.contains(',') {
            return None;
        }
        out.push('.');
        out.push_str(fraction);
    }
    Some(out)
}

/// Format an amount with a currency symbol, thousands separators and two
/// decimals, rounding half away from zero.
pub fn format_currency(amount: Decimal, symbol: &str) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().to_string();
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!(
        "{}{}{}.{}",
        if negative { "-" } else { "" },
        symbol,
        grouped,
        fraction
    )
}

/// Parse an ISO date (`2026-10-19`) or an RFC 3339 timestamp.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// Generate a document number of the shape `PREFIX-YYYY-NNNN`.
///
/// The sequence is derived from the data object, so the same data always
/// yields the same number.
pub fn generated_id(prefix: &str, year: i32, data: &Value) -> String {
    let sequence = fnv1a(data.to_string().as_bytes()) % 10_000;
    format!("{}-{}-{:04}", prefix, year, sequence)
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

/// How a resolved value is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Text as supplied
    #[default]
    Plain,
    /// Currency amount (`$30,550.00`)
    Currency,
    /// Calendar date in the configured style
    Date,
    /// Percentage (`7.5%`)
    Percent,
}

/// What to produce when a field is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback<'f> {
    /// Literal placeholder text
    Text(&'f str),
    /// The render date
    Today,
    /// A generated document number
    GeneratedId,
}

/// Field access bound to one data object and one set of options.
///
/// Section generators use this instead of reading the JSON directly.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    root: &'a Value,
    data: &'a Value,
    options: &'a ComposeOptions,
    id_prefix: &'a str,
}

impl<'a> Fields<'a> {
    /// Bind a data object and options.
    pub fn new(data: &'a Value, options: &'a ComposeOptions) -> Self {
        Self {
            root: data,
            data,
            options,
            id_prefix: "DOC",
        }
    }

    /// Set the prefix used for generated document numbers.
    pub fn with_id_prefix(mut self, prefix: &'a str) -> Self {
        self.id_prefix = prefix;
        self
    }

    /// Fields scoped to a nested value (e.g. one element of `phases`).
    ///
    /// Generated ids still hash the whole data object.
    pub fn scoped(&self, value: &'a Value) -> Fields<'a> {
        Fields {
            data: value,
            ..*self
        }
    }

    /// The options these fields format with.
    pub fn options(&self) -> &'a ComposeOptions {
        self.options
    }

    /// Look up a present value.
    pub fn get(&self, path: &str) -> Option<&'a Value> {
        lookup(self.data, path)
    }

    /// Check if a field is present.
    pub fn has(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Look up a present value that can be rendered as text.
    pub fn get_text(&self, path: &str) -> Option<&'a Value> {
        lookup_text(self.data, path)
    }

    /// Resolve a field with a format and a fallback.
    pub fn resolve(&self, path: &str, format: Format, fallback: Fallback<'_>) -> String {
        match self.get_text(path) {
            Some(value) => self.format_value(value, format),
            None => self.fallback(fallback),
        }
    }

    /// Plain text or placeholder.
    pub fn text(&self, path: &str, placeholder: &str) -> String {
        self.resolve(path, Format::Plain, Fallback::Text(placeholder))
    }

    /// First present field among `paths`, or the placeholder.
    pub fn first_of(&self, paths: &[&str], placeholder: &str) -> String {
        paths
            .iter()
            .find_map(|p| self.get_text(p))
            .map(value_to_text)
            .unwrap_or_else(|| placeholder.to_string())
    }

    /// Currency amount or placeholder.
    pub fn currency(&self, path: &str, placeholder: &str) -> String {
        self.resolve(path, Format::Currency, Fallback::Text(placeholder))
    }

    /// Date, defaulting to the render date.
    pub fn date(&self, path: &str) -> String {
        self.resolve(path, Format::Date, Fallback::Today)
    }

    /// Date or placeholder.
    pub fn date_or(&self, path: &str, placeholder: &str) -> String {
        self.resolve(path, Format::Date, Fallback::Text(placeholder))
    }

    /// Document number, generated when absent.
    pub fn document_number(&self, path: &str) -> String {
        self.resolve(path, Format::Plain, Fallback::GeneratedId)
    }

    /// Array elements, or an empty slice when missing or not an array.
    pub fn array(&self, path: &str) -> &'a [Value] {
        match self.get(path) {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        }
    }

    /// String elements of an array, skipping blanks.
    pub fn strings(&self, path: &str) -> Vec<String> {
        self.array(path)
            .iter()
            .filter(|v| is_present(v))
            .map(value_to_text)
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Numeric value of a field.
    pub fn decimal(&self, path: &str) -> Option<Decimal> {
        self.get(path).and_then(value_to_decimal)
    }

    /// Boolean value of a field, accepting `"true"`/`"yes"` strings.
    pub fn flag(&self, path: &str) -> bool {
        match self.get(path) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1"),
            Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
            _ => false,
        }
    }

    /// Format an amount with the configured currency symbol.
    pub fn money(&self, amount: Decimal) -> String {
        format_currency(amount, &self.options.currency_symbol)
    }

    /// The render date in the configured style.
    pub fn today(&self) -> String {
        self.options.date_style.format(self.options.today)
    }

    fn format_value(&self, value: &Value, format: Format) -> String {
        match format {
            Format::Plain => value_to_text(value),
            Format::Currency => match value_to_decimal(value) {
                Some(amount) => self.money(amount),
                None => value_to_text(value),
            },
            Format::Date => {
                let text = value_to_text(value);
                match parse_date(&text) {
                    Some(date) => self.options.date_style.format(date),
                    None => text,
                }
            }
            Format::Percent => match value_to_decimal(value) {
                Some(amount) => format!("{}%", amount.normalize()),
                None => value_to_text(value),
            },
        }
    }

    fn fallback(&self, fallback: Fallback<'_>) -> String {
        match fallback {
            Fallback::Text(text) => text.to_string(),
            Fallback::Today => self.today(),
            Fallback::GeneratedId => {
                generated_id(self.id_prefix, self.options.today.year(), self.root)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options() -> ComposeOptions {
        ComposeOptions::new().with_today(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
    }

    #[test]
    fn test_lookup_nested_paths() {
        let data = json!({
            "companyInfo": { "name": "Acme", "address": { "city": "Oslo" } },
            "phases": [{ "name": "Discovery" }, { "name": "Build" }]
        });
        assert_eq!(resolve(&data, "companyInfo.address.city", "-"), "Oslo");
        assert_eq!(resolve(&data, "phases.1.name", "-"), "Build");
        assert_eq!(resolve(&data, "phases[1].name", "-"), "Build");
        assert_eq!(resolve(&data, "phases[5].name", "-"), "-");
        assert_eq!(resolve(&data, "phases[x].name", "-"), "-");
        assert_eq!(resolve(&data, "companyInfo.name.first", "-"), "-");
    }

    #[test]
    fn test_blank_values_fall_back() {
        let data = json!({ "a": "   ", "b": null, "c": [], "d": {}, "e": 0, "f": false });
        assert_eq!(resolve(&data, "a", "[A]"), "[A]");
        assert_eq!(resolve(&data, "b", "[B]"), "[B]");
        assert_eq!(resolve(&data, "c", "[C]"), "[C]");
        assert_eq!(resolve(&data, "d", "[D]"), "[D]");
        assert_eq!(resolve(&data, "e", "[E]"), "0");
        assert_eq!(resolve(&data, "f", "[F]"), "No");
    }

    #[test]
    fn test_value_to_text_numbers() {
        assert_eq!(value_to_text(&json!(30550)), "30550");
        assert_eq!(value_to_text(&json!(12.5)), "12.5");
        assert_eq!(value_to_text(&json!(3.0)), "3");
        assert_eq!(value_to_text(&json!(["React", "", "Rust"])), "React, Rust");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(Decimal::from(30550), "$"), "$30,550.00");
        assert_eq!(format_currency(Decimal::from(999), "$"), "$999.00");
        assert_eq!(format_currency(Decimal::from(1_234_567), "€"), "€1,234,567.00");
        assert_eq!(format_currency(Decimal::new(1005, 3), "$"), "$1.01");
        assert_eq!(format_currency(Decimal::new(-25050, 2), "$"), "-$250.50");
        assert_eq!(format_currency(Decimal::ZERO, "$"), "$0.00");
    }

    #[test]
    fn test_value_to_decimal() {
        assert_eq!(value_to_decimal(&json!(650)), Some(Decimal::from(650)));
        assert_eq!(value_to_decimal(&json!("$1,200")), Some(Decimal::from(1200)));
        assert_eq!(value_to_decimal(&json!("n/a")), None);
        assert_eq!(value_to_decimal(&json!(true)), None);
    }

    #[test]
    fn test_parse_amount_strict() {
        assert_eq!(parse_amount("1e3"), Some(Decimal::from(1000)));
        assert_eq!(parse_amount(" € 1,234.50 "), Some(Decimal::new(123450, 2)));
        assert_eq!(parse_amount("-$40"), Some(Decimal::from(-40)));
        assert_eq!(parse_amount("$-40"), Some(Decimal::from(-40)));
        assert_eq!(parse_amount("1,000,000"), Some(Decimal::from(1_000_000)));
        assert_eq!(parse_amount("1,5"), None);
        assert_eq!(parse_amount("12,34,567"), None);
        assert_eq!(parse_amount("1.5,0"), None);
        assert_eq!(parse_amount("10 hours"), None);
        assert_eq!(parse_amount("1-2"), None);
        assert_eq!(parse_amount("$"), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn test_object_resolves_to_fallback() {
        let data = json!({ "author": { "bio": "Writes things", "twitter": null }, "tags": [{ "x": 1 }, "rust"] });
        assert_eq!(resolve(&data, "author", "[Author]"), "[Author]");
        assert_eq!(value_to_text(&data["author"]), "");

        let opts = options();
        let fields = Fields::new(&data, &opts);
        assert_eq!(fields.first_of(&["author.name", "author"], "[Author]"), "[Author]");
        assert_eq!(fields.text("author.bio", "[Bio]"), "Writes things");
        assert_eq!(fields.strings("tags"), vec!["rust".to_string()]);
        assert!(fields.has("author"));
    }

    #[test]
    fn test_fields_formats() {
        let data = json!({ "budget": "25000", "start": "2026-01-05", "tax": 7.5, "when": "soon" });
        let opts = options();
        let fields = Fields::new(&data, &opts);

        assert_eq!(fields.currency("budget", "[Budget]"), "$25,000.00");
        assert_eq!(fields.currency("missing", "[Budget]"), "[Budget]");
        assert_eq!(fields.date("start"), "January 5, 2026");
        assert_eq!(fields.date("missing"), "October 19, 2026");
        assert_eq!(fields.date("when"), "soon");
        assert_eq!(fields.resolve("tax", Format::Percent, Fallback::Text("0%")), "7.5%");
    }

    #[test]
    fn test_generated_id_is_deterministic() {
        let data = json!({ "clientName": "Acme" });
        let opts = options();
        let fields = Fields::new(&data, &opts).with_id_prefix("INV");

        let first = fields.document_number("invoiceNumber");
        let second = fields.document_number("invoiceNumber");
        assert_eq!(first, second);
        assert!(first.starts_with("INV-2026-"));
        assert_eq!(first.len(), "INV-2026-0000".len());

        let explicit = json!({ "invoiceNumber": "INV-7" });
        let fields = Fields::new(&explicit, &opts);
        assert_eq!(fields.document_number("invoiceNumber"), "INV-7");
    }

    #[test]
    fn test_scoped_fields_and_arrays() {
        let data = json!({ "phases": [{ "name": "Discovery", "duration": "2 weeks" }], "tags": ["a", " ", "b"] });
        let opts = options();
        let fields = Fields::new(&data, &opts);

        let phases = fields.array("phases");
        assert_eq!(phases.len(), 1);
        let phase = fields.scoped(&phases[0]);
        assert_eq!(phase.text("duration", "[Duration]"), "2 weeks");
        assert_eq!(phase.text("startDate", "[Start]"), "[Start]");

        assert!(fields.array("missing").is_empty());
        assert_eq!(fields.strings("tags"), vec!["a", "b"]);
    }

    #[test]
    fn test_flag_parsing() {
        let data = json!({ "a": true, "b": "yes", "c": 0, "d": "nope" });
        let opts = options();
        let fields = Fields::new(&data, &opts);
        assert!(fields.flag("a"));
        assert!(fields.flag("b"));
        assert!(!fields.flag("c"));
        assert!(!fields.flag("d"));
        assert!(!fields.flag("missing"));
    }
}
