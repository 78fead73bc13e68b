//! `ausflug columns` command - discovered schema

use ausflug_core::error::Result;
use ausflug_core::schema::{self, ColumnVisibility};

use crate::cli::{Cli, OutputFormat};

use super::helpers;

/// Execute the columns command
pub fn execute(cli: &Cli) -> Result<()> {
    let records = helpers::load_records(cli)?;
    let columns = schema::discover_columns(&records);
    let mut visibility = ColumnVisibility::new();
    visibility.seed(&columns);

    match cli.format {
        OutputFormat::Json => {
            let output: Vec<_> = columns
                .iter()
                .map(|column| {
                    serde_json::json!({
                        "name": column,
                        "visible": visibility.is_visible(column),
                    })
                })
                .collect();
            println!("{}", serde_json::Value::Array(output));
        }
        OutputFormat::Human => {
            for column in &columns {
                let marker = if visibility.is_visible(column) {
                    "shown"
                } else {
                    "hidden"
                };
                println!("{}  ({})", column, marker);
            }
        }
    }

    Ok(())
}
