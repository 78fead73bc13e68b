//! `ausflug list` command - the table view
//!
//! Applies the full QuerySpec (search, categories, favorites-only,
//! radius, sort) and renders the projection: an aligned text table for
//! humans, or a JSON array of row objects.

use ausflug_core::error::Result;
use ausflug_core::geo::Coordinates;
use ausflug_core::projection::{self, Cell, Table};
use ausflug_core::query::{QuerySpec, SortDirection, SortKey};
use ausflug_core::record::{LATITUDE_ATTR, LONGITUDE_ATTR};
use ausflug_core::schema::{self, ColumnVisibility};

use crate::cli::{Cli, ListArgs, OutputFormat};

use super::helpers;

/// Execute the list command
pub fn execute(cli: &Cli, args: &ListArgs) -> Result<()> {
    let records = helpers::load_records(cli)?;
    let store = helpers::open_favorites()?;
    let favorites = store.set();

    let center = resolve_center(cli, args)?;

    let spec = QuerySpec::new()
        .with_search(args.search.clone().unwrap_or_default())
        .with_categories(args.category.iter().cloned())
        .with_favorites_only(args.favorites_only)
        .with_center(center)
        .with_radius_km(args.radius_km)
        .with_sort(args.sort.as_deref().map(SortKey::parse))
        .with_direction(if args.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        });

    let matched = spec.apply(&records, favorites);

    let columns = schema::discover_columns(&records);
    let mut visibility = ColumnVisibility::new();
    visibility.seed(&columns);
    if args.show_hidden {
        visibility.set(LATITUDE_ATTR, true);
        visibility.set(LONGITUDE_ATTR, true);
    }
    for column in &args.hide_column {
        visibility.set(column, false);
    }

    let table = projection::project(&matched, &columns, &visibility, center, favorites);

    match cli.format {
        OutputFormat::Json => print_json(&table),
        OutputFormat::Human => print_human(cli, &table, center.is_some()),
    }

    Ok(())
}

/// Explicit `--center` wins; `--near` geocodes. A failed geocode
/// leaves the center unset and the radius filter inactive, it is not
/// an error.
fn resolve_center(cli: &Cli, args: &ListArgs) -> Result<Option<Coordinates>> {
    if let Some(raw) = &args.center {
        return Ok(Some(helpers::parse_center(raw)?));
    }
    if let Some(place) = &args.near {
        let geocoder = helpers::geocoder()?;
        match geocoder.lookup(place) {
            Some(coords) => return Ok(Some(coords)),
            None => {
                if !cli.quiet {
                    eprintln!("could not locate place: {}", place);
                }
                return Ok(None);
            }
        }
    }
    Ok(None)
}

fn print_json(table: &Table) {
    let rows: Vec<serde_json::Value> = table
        .rows
        .iter()
        .map(|row| {
            let mut obj = serde_json::json!({
                "key": row.key,
                "favorite": row.favorite,
            });
            if let Some(d) = row.distance_km {
                obj["distance_km"] = serde_json::json!(d);
            }
            for (column, cell) in table.columns.iter().zip(&row.cells) {
                obj[column] = serde_json::to_value(cell).unwrap_or(serde_json::Value::Null);
            }
            obj
        })
        .collect();
    println!("{}", serde_json::Value::Array(rows));
}

fn print_human(cli: &Cli, table: &Table, with_distance: bool) {
    if table.rows.is_empty() {
        if !cli.quiet {
            println!("no results found");
        }
        return;
    }

    let mut header: Vec<String> = vec!["★".to_string()];
    if with_distance {
        header.push("Entfernung (km)".to_string());
    }
    header.extend(table.columns.iter().cloned());

    let mut lines: Vec<Vec<String>> = vec![header];
    for row in &table.rows {
        let mut line = vec![if row.favorite { "★" } else { "☆" }.to_string()];
        if with_distance {
            line.push(
                row.distance_km
                    .map(|d| format!("{:.1}", d))
                    .unwrap_or_default(),
            );
        }
        line.extend(row.cells.iter().map(cell_text));
        lines.push(line);
    }

    let widths = column_widths(&lines);
    for line in &lines {
        let rendered: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{:<width$}", cell))
            .collect();
        println!("{}", rendered.join("  ").trim_end());
    }
}

fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Text(text) => text.clone(),
        Cell::Links(links) => links
            .iter()
            .map(|l| l.label.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn column_widths(lines: &[Vec<String>]) -> Vec<usize> {
    let Some(first) = lines.first() else {
        return Vec::new();
    };
    let mut widths = vec![0usize; first.len()];
    for line in lines {
        for (i, cell) in line.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }
    widths
}
