//! The address block: selected address properties in one paragraph.

use regex::Regex;
use std::sync::OnceLock;

use crate::labels::PhraseBook;
use crate::record::{Record, Value};
use crate::template::escape_html;

const LINE_BREAK: &str = "<br/>";

/// Coordinate pairs, either of which counts as a location.
const COORDINATE_PAIRS: &[(&str, &str)] = &[("lat", "lng"), ("manLat", "manLng")];

fn separator_regex() -> &'static Regex {
    static SEPARATOR_REGEX: OnceLock<Regex> = OnceLock::new();
    SEPARATOR_REGEX.get_or_init(|| Regex::new(r"\s*[,\n;]+\s*").unwrap())
}

pub struct AddressComposer<'a> {
    fields: &'a [String],
    labels: &'a PhraseBook,
}

impl<'a> AddressComposer<'a> {
    pub fn new(fields: &'a [String], labels: &'a PhraseBook) -> Self {
        AddressComposer { fields, labels }
    }

    /// Address lines of `record`, with the no-location marker appended when
    /// the record has no usable coordinates. Empty when there is nothing to show.
    pub fn compose(&self, record: &Record) -> String {
        let mut lines: Vec<String> = self
            .fields
            .iter()
            .filter_map(|field| field_text(record, field))
            .map(|text| normalize_field(&text))
            .filter(|line| !line.is_empty())
            .collect();

        if !has_location(record) {
            lines.push(format!("<i>{}</i>", escape_html(&self.labels.no_location)));
        }

        if lines.is_empty() {
            return String::new();
        }
        format!(
            r#"<p class="sea-initiative-address">{}</p>"#,
            lines.join(LINE_BREAK)
        )
    }
}

/// Split a field on commas, semicolons and newlines into separate lines and
/// collapse whitespace. Splitting happens before escaping so the `;` of an
/// entity is never mistaken for a separator.
pub fn normalize_field(value: &str) -> String {
    separator_regex()
        .split(value.trim())
        .map(|part| part.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|part| !part.is_empty())
        .map(|part| escape_html(&part))
        .collect::<Vec<_>>()
        .join(LINE_BREAK)
}

/// Text of an address field. Numeric values (a postcode such as `10115`
/// loaded from YAML) are printed as written.
fn field_text(record: &Record, name: &str) -> Option<String> {
    match record.get(name)? {
        Value::Text(s) => Some(s.clone()),
        Value::Number(n) if n.is_finite() => Some(n.to_string()),
        _ => None,
    }
}

fn coordinate_present(record: &Record, name: &str) -> bool {
    match record.get(name) {
        Some(Value::Number(n)) => n.is_finite(),
        Some(Value::Text(s)) => !s.trim().is_empty(),
        _ => false,
    }
}

/// True if either coordinate pair is fully present.
pub fn has_location(record: &Record) -> bool {
    COORDINATE_PAIRS
        .iter()
        .any(|(lat, lng)| coordinate_present(record, lat) && coordinate_present(record, lng))
}
