//! `ausflug categories` command - entry-fee category values

use ausflug_core::error::Result;
use ausflug_core::record::{category_label, CATEGORY_ATTR};
use ausflug_core::schema;

use crate::cli::{Cli, OutputFormat};

use super::helpers;

/// Execute the categories command
pub fn execute(cli: &Cli) -> Result<()> {
    let records = helpers::load_records(cli)?;
    let values = schema::categorical_values(&records, CATEGORY_ATTR);

    match cli.format {
        OutputFormat::Json => {
            let output: Vec<_> = values
                .iter()
                .map(|value| {
                    serde_json::json!({
                        "code": value,
                        "label": category_label(value),
                    })
                })
                .collect();
            println!("{}", serde_json::Value::Array(output));
        }
        OutputFormat::Human => {
            for value in &values {
                let label = category_label(value);
                if label == value {
                    println!("{}", value);
                } else {
                    println!("{}  ({})", value, label);
                }
            }
        }
    }

    Ok(())
}
