//! `ausflug locate` command - one geocode lookup
//!
//! A no-match is a user-visible state, not an error: exit code 0
//! either way.

use ausflug_core::error::Result;

use crate::cli::{Cli, OutputFormat};

use super::helpers;

/// Execute the locate command
pub fn execute(cli: &Cli, place: &str) -> Result<()> {
    let geocoder = helpers::geocoder()?;
    let result = geocoder.lookup(place);

    match cli.format {
        OutputFormat::Json => match result {
            Some(coords) => println!(
                "{}",
                serde_json::json!({ "lat": coords.lat, "lon": coords.lon })
            ),
            None => println!("{}", serde_json::json!({ "match": null })),
        },
        OutputFormat::Human => match result {
            Some(coords) => println!("{:.4}, {:.4}", coords.lat, coords.lon),
            None => {
                if !cli.quiet {
                    println!("could not locate place");
                }
            }
        },
    }

    Ok(())
}
