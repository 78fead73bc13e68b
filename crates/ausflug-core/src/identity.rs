//! Stable content-derived record identifiers.
//!
//! The identifier is the favorite-set key and must survive process
//! restarts, so it is a deterministic concatenation of two record
//! attributes rather than anything randomized or order-dependent.
//! Two records sharing both attributes collide; that is an accepted
//! trade-off, not a bug.

use crate::record::{AttributeValue, Record, NAME_ATTR, POSTAL_CODE_ATTR};

/// Separator between the postal code and the name. Neither field
/// contains "::" in legitimate data.
const SEPARATOR: &str = "::";

/// Stand-in for an absent identity attribute. Matches the key format
/// already present in persisted favorite sets.
const MISSING: &str = "undefined";

/// Derive the identifier for a record. Total: never fails, whatever
/// the record looks like.
pub fn record_key(record: &Record) -> String {
    format!(
        "{}{}{}",
        identity_part(record, POSTAL_CODE_ATTR),
        SEPARATOR,
        identity_part(record, NAME_ATTR)
    )
}

fn identity_part(record: &Record, attr: &str) -> String {
    match record.attribute(attr) {
        AttributeValue::Text(s) => s.to_string(),
        AttributeValue::Number(n) => n.to_string(),
        AttributeValue::Bool(b) => b.to_string(),
        AttributeValue::Null => MISSING.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        Record::from_value(value).unwrap()
    }

    #[test]
    fn key_joins_postal_code_and_name() {
        let r = record(json!({"PLZ": "70000", "Einrichtung": "Zoo"}));
        assert_eq!(record_key(&r), "70000::Zoo");
    }

    #[test]
    fn key_is_deterministic() {
        let r = record(json!({"PLZ": "70000", "Einrichtung": "Zoo", "Eintritt": "K"}));
        assert_eq!(record_key(&r), record_key(&r.clone()));
    }

    #[test]
    fn key_ignores_other_attributes() {
        let a = record(json!({"PLZ": "70000", "Einrichtung": "Zoo", "Eintritt": "K"}));
        let mut b = a.clone();
        b.set("Eintritt", json!("E"));
        b.set("Hinweis", json!("geändert"));
        assert_eq!(record_key(&a), record_key(&b));
    }

    #[test]
    fn records_sharing_both_fields_collide() {
        let a = record(json!({"PLZ": "70000", "Einrichtung": "Zoo", "Strasse": "A"}));
        let b = record(json!({"PLZ": "70000", "Einrichtung": "Zoo", "Strasse": "B"}));
        assert_eq!(record_key(&a), record_key(&b));
    }

    #[test]
    fn absent_fields_coerce_to_undefined() {
        let r = record(json!({"Eintritt": "K"}));
        assert_eq!(record_key(&r), "undefined::undefined");
    }

    #[test]
    fn numeric_postal_code_coerces() {
        let r = record(json!({"PLZ": 70000, "Einrichtung": "Zoo"}));
        assert_eq!(record_key(&r), "70000::Zoo");
    }
}
