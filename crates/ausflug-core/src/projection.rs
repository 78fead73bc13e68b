//! Renderable projection of query results.
//!
//! Turns the engine's ordered record sequence into rows restricted to
//! the visible columns, in discovered column order. Renderers (table,
//! map popups) consume this output and nothing else.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::favorites::FavoriteSet;
use crate::geo::{self, Coordinates};
use crate::identity;
use crate::record::{AttributeValue, Record, HOMEPAGE_ATTR};
use crate::schema::ColumnVisibility;

/// One rendered link. `href` gains an `http://` prefix when the raw
/// value carries no scheme; `label` always keeps the raw value. The
/// underlying record is never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

/// One table cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Links(Vec<Link>),
}

/// One projected row. `key` and `favorite` feed the renderer's star
/// column; `distance_km` is present when the query has a center and
/// the record has coordinates.
#[derive(Debug, Clone, Serialize)]
pub struct Row {
    pub key: String,
    pub favorite: bool,
    pub distance_km: Option<f64>,
    pub cells: Vec<Cell>,
}

/// The renderable table: visible columns in discovered order plus one
/// row per record.
#[derive(Debug, Clone, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

/// Project records onto the visible columns.
pub fn project(
    records: &[&Record],
    columns: &[String],
    visibility: &ColumnVisibility,
    center: Option<Coordinates>,
    favorites: &FavoriteSet,
) -> Table {
    let visible: Vec<String> = columns
        .iter()
        .filter(|c| visibility.is_visible(c))
        .cloned()
        .collect();

    let rows = records
        .iter()
        .map(|record| {
            let key = identity::record_key(record);
            Row {
                favorite: favorites.contains(&key),
                key,
                distance_km: center
                    .and_then(|c| record.coords().map(|rc| geo::haversine_km(c, rc))),
                cells: visible.iter().map(|col| cell_for(record, col)).collect(),
            }
        })
        .collect();

    Table {
        columns: visible,
        rows,
    }
}

fn cell_for(record: &Record, column: &str) -> Cell {
    if column == HOMEPAGE_ATTR {
        if let AttributeValue::Text(raw) = record.attribute(column) {
            let links = split_links(raw);
            if !links.is_empty() {
                return Cell::Links(links);
            }
        }
    }
    Cell::Text(record.coerced_text(column))
}

/// Split a multi-value link field on `;`, `,`, or newlines into
/// trimmed, non-empty links.
pub fn split_links(raw: &str) -> Vec<Link> {
    let Some(re) = link_separator() else {
        // Regex failed to compile: degrade to one unsplit link.
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }
        return vec![make_link(trimmed)];
    };
    re.split(raw)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(make_link)
        .collect()
}

fn make_link(raw: &str) -> Link {
    Link {
        label: raw.to_string(),
        href: normalize_href(raw),
    }
}

/// Scheme-less links get an `http://` prefix for rendering only.
fn normalize_href(raw: &str) -> String {
    if raw.starts_with("http") {
        raw.to_string()
    } else {
        format!("http://{raw}")
    }
}

fn link_separator() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| match Regex::new(r"[;,\n]+") {
        Ok(re) => Some(re),
        Err(err) => {
            tracing::warn!(error = %err, "failed to compile link separator regex");
            None
        }
    })
    .as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        Record::from_value(value).unwrap()
    }

    fn seeded_visibility(records: &[Record]) -> (Vec<String>, ColumnVisibility) {
        let columns = schema::discover_columns(records);
        let mut visibility = ColumnVisibility::new();
        visibility.seed(&columns);
        (columns, visibility)
    }

    #[test]
    fn projects_visible_columns_in_discovered_order() {
        let records = vec![record(json!({
            "PLZ": "70000", "Einrichtung": "Zoo",
            "Latitude": 48.7, "Longitude": 9.0, "Eintritt": "K"
        }))];
        let (columns, visibility) = seeded_visibility(&records);
        let refs: Vec<&Record> = records.iter().collect();

        let table = project(&refs, &columns, &visibility, None, &FavoriteSet::new());
        // Coordinate columns are hidden by default.
        assert_eq!(table.columns, vec!["PLZ", "Einrichtung", "Eintritt"]);
        assert_eq!(
            table.rows[0].cells,
            vec![
                Cell::Text("70000".to_string()),
                Cell::Text("Zoo".to_string()),
                Cell::Text("K".to_string()),
            ]
        );
    }

    #[test]
    fn rows_carry_identity_and_favorite_state() {
        let records = vec![record(json!({"PLZ": "70000", "Einrichtung": "Zoo"}))];
        let (columns, visibility) = seeded_visibility(&records);
        let refs: Vec<&Record> = records.iter().collect();
        let favorites = FavoriteSet::new().toggle("70000::Zoo");

        let table = project(&refs, &columns, &visibility, None, &favorites);
        assert_eq!(table.rows[0].key, "70000::Zoo");
        assert!(table.rows[0].favorite);
    }

    #[test]
    fn distance_is_present_only_with_center_and_coords() {
        let records = vec![
            record(json!({"Einrichtung": "Mit", "Latitude": 48.7, "Longitude": 9.0})),
            record(json!({"Einrichtung": "Ohne"})),
        ];
        let (columns, visibility) = seeded_visibility(&records);
        let refs: Vec<&Record> = records.iter().collect();

        let center = Some(Coordinates::new(48.7, 9.0));
        let table = project(&refs, &columns, &visibility, center, &FavoriteSet::new());
        assert_eq!(table.rows[0].distance_km, Some(0.0));
        assert_eq!(table.rows[1].distance_km, None);

        let table = project(&refs, &columns, &visibility, None, &FavoriteSet::new());
        assert!(table.rows.iter().all(|r| r.distance_km.is_none()));
    }

    #[test]
    fn homepage_splits_into_links() {
        let records = vec![record(json!({
            "Einrichtung": "Zoo",
            "Homepage": "https://zoo.example; www.zoo.example,\ninfo.example "
        }))];
        let (columns, visibility) = seeded_visibility(&records);
        let refs: Vec<&Record> = records.iter().collect();

        let table = project(&refs, &columns, &visibility, None, &FavoriteSet::new());
        let Cell::Links(links) = &table.rows[0].cells[1] else {
            panic!("expected links cell");
        };
        assert_eq!(links.len(), 3);
        assert_eq!(links[0].label, "https://zoo.example");
        assert_eq!(links[0].href, "https://zoo.example");
        assert_eq!(links[1].label, "www.zoo.example");
        assert_eq!(links[1].href, "http://www.zoo.example");
        assert_eq!(links[2].label, "info.example");
        assert_eq!(links[2].href, "http://info.example");
    }

    #[test]
    fn empty_homepage_stays_a_text_cell() {
        let records = vec![record(json!({"Einrichtung": "Zoo", "Homepage": ""}))];
        let (columns, visibility) = seeded_visibility(&records);
        let refs: Vec<&Record> = records.iter().collect();

        let table = project(&refs, &columns, &visibility, None, &FavoriteSet::new());
        assert_eq!(table.rows[0].cells[1], Cell::Text(String::new()));
    }

    #[test]
    fn split_links_drops_empty_parts() {
        assert!(split_links("").is_empty());
        assert!(split_links(" ; , \n ").is_empty());
        let links = split_links("a.example;;b.example");
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn column_first_seen_after_seeding_is_hidden() {
        let initial = vec![record(json!({"Einrichtung": "Zoo"}))];
        let (_, visibility) = seeded_visibility(&initial);

        let reloaded = vec![record(json!({"Einrichtung": "Zoo", "Telefon": "0711"}))];
        let columns = schema::discover_columns(&reloaded);
        let refs: Vec<&Record> = reloaded.iter().collect();

        let table = project(&refs, &columns, &visibility, None, &FavoriteSet::new());
        // "Telefon" arrived after the one-shot seeding: never rendered.
        assert_eq!(table.columns, vec!["Einrichtung"]);
    }
}
