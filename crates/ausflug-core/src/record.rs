//! Attraction records with heterogeneous, discovered attribute sets.
//!
//! Records are duck-typed: different records may carry different keys,
//! and the schema is discovered from the data rather than declared.
//! Key insertion order is preserved (serde_json `preserve_order`) so
//! column discovery can report attributes in first-seen order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::geo::Coordinates;

/// Attribute holding the attraction's display name.
pub const NAME_ATTR: &str = "Einrichtung";
/// Attribute holding the postal code; part of the record identity.
pub const POSTAL_CODE_ATTR: &str = "PLZ";
/// Attribute holding the entry-fee category code.
pub const CATEGORY_ATTR: &str = "Eintritt";
/// Latitude in decimal degrees; hidden by default in table views.
pub const LATITUDE_ATTR: &str = "Latitude";
/// Longitude in decimal degrees; hidden by default in table views.
pub const LONGITUDE_ATTR: &str = "Longitude";
/// Attribute holding one or more homepage URLs.
pub const HOMEPAGE_ATTR: &str = "Homepage";

/// Typed view of a single attribute value.
///
/// The engine only ever needs the scalar cases; arrays and objects
/// classify as `Null` and degrade like any other malformed data.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue<'a> {
    Text(&'a str),
    Number(f64),
    Bool(bool),
    Null,
}

impl<'a> AttributeValue<'a> {
    fn classify(value: &'a Value) -> Self {
        match value {
            Value::String(s) => AttributeValue::Text(s),
            Value::Number(n) => match n.as_f64() {
                Some(f) => AttributeValue::Number(f),
                None => AttributeValue::Null,
            },
            Value::Bool(b) => AttributeValue::Bool(*b),
            _ => AttributeValue::Null,
        }
    }

    /// String coercion used by filtering, sorting, and projection.
    /// Nullish values coerce to the empty string.
    pub fn coerce_text(&self) -> String {
        match self {
            AttributeValue::Text(s) => (*s).to_string(),
            AttributeValue::Number(n) => n.to_string(),
            AttributeValue::Bool(b) => b.to_string(),
            AttributeValue::Null => String::new(),
        }
    }
}

/// One catalog entry: a mapping from attribute name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a parsed JSON object.
    pub fn from_map(map: Map<String, Value>) -> Self {
        Record(map)
    }

    /// Wrap a JSON value; `None` unless the value is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Record(map)),
            _ => None,
        }
    }

    /// Attribute names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Typed view of an attribute; absent attributes are `Null`.
    pub fn attribute(&self, name: &str) -> AttributeValue<'_> {
        match self.0.get(name) {
            Some(value) => AttributeValue::classify(value),
            None => AttributeValue::Null,
        }
    }

    /// The attribute as a string, if it is one.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.attribute(name) {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The attribute as a number, if it is one. String-encoded numbers
    /// do not count: a record with `"Latitude": "48.7"` has no numeric
    /// latitude.
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.attribute(name) {
            AttributeValue::Number(n) => Some(n),
            _ => None,
        }
    }

    /// String-coerced attribute, nullish values as the empty string.
    pub fn coerced_text(&self, name: &str) -> String {
        self.attribute(name).coerce_text()
    }

    /// Geographic position, if both coordinate attributes are numeric.
    pub fn coords(&self) -> Option<Coordinates> {
        let lat = self.number(LATITUDE_ATTR)?;
        let lon = self.number(LONGITUDE_ATTR)?;
        Some(Coordinates::new(lat, lon))
    }

    /// Set an attribute value.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.0.insert(name.into(), value);
    }
}

/// Static label for an entry-fee category code. Unknown codes render
/// as themselves.
pub fn category_label(code: &str) -> &str {
    match code {
        "K" => "kostenlos",
        "E" => "ermäßigt",
        "G" => "Gutschein",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        Record::from_value(value).unwrap()
    }

    #[test]
    fn keys_preserve_insertion_order() {
        let r = record(json!({"PLZ": "70000", "Einrichtung": "Zoo", "Eintritt": "K"}));
        let keys: Vec<&str> = r.keys().collect();
        assert_eq!(keys, vec!["PLZ", "Einrichtung", "Eintritt"]);
    }

    #[test]
    fn attribute_classifies_scalars() {
        let r = record(json!({"a": "x", "b": 1.5, "c": true, "d": null, "e": [1]}));
        assert_eq!(r.attribute("a"), AttributeValue::Text("x"));
        assert_eq!(r.attribute("b"), AttributeValue::Number(1.5));
        assert_eq!(r.attribute("c"), AttributeValue::Bool(true));
        assert_eq!(r.attribute("d"), AttributeValue::Null);
        assert_eq!(r.attribute("e"), AttributeValue::Null);
        assert_eq!(r.attribute("missing"), AttributeValue::Null);
    }

    #[test]
    fn coerced_text_maps_nullish_to_empty() {
        let r = record(json!({"a": null, "b": 3.0, "c": false}));
        assert_eq!(r.coerced_text("a"), "");
        assert_eq!(r.coerced_text("missing"), "");
        assert_eq!(r.coerced_text("b"), "3");
        assert_eq!(r.coerced_text("c"), "false");
    }

    #[test]
    fn coords_require_both_numeric_attributes() {
        let both = record(json!({"Latitude": 48.7, "Longitude": 9.0}));
        assert_eq!(both.coords(), Some(Coordinates::new(48.7, 9.0)));

        let stringly = record(json!({"Latitude": "48.7", "Longitude": 9.0}));
        assert_eq!(stringly.coords(), None);

        let partial = record(json!({"Latitude": 48.7}));
        assert_eq!(partial.coords(), None);
    }

    #[test]
    fn from_value_rejects_non_objects() {
        assert!(Record::from_value(json!([1, 2])).is_none());
        assert!(Record::from_value(json!("x")).is_none());
    }

    #[test]
    fn category_labels() {
        assert_eq!(category_label("K"), "kostenlos");
        assert_eq!(category_label("E"), "ermäßigt");
        assert_eq!(category_label("X9"), "X9");
    }
}
