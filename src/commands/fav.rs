//! `ausflug fav` commands - favorite management
//!
//! `toggle` resolves its term through the engine's search stage, so a
//! term matches the same records a `list --search` would.

use ausflug_core::error::{AusflugError, Result};
use ausflug_core::favorites::FavoriteSet;
use ausflug_core::identity;
use ausflug_core::query::QuerySpec;
use ausflug_core::record::{Record, NAME_ATTR};

use crate::cli::{Cli, FavCommands, OutputFormat};

use super::helpers;

/// Execute a fav subcommand
pub fn execute(cli: &Cli, command: &FavCommands) -> Result<()> {
    match command {
        FavCommands::Toggle { term } => toggle(cli, term),
        FavCommands::List => list(cli),
        FavCommands::Clear => clear(cli),
    }
}

fn toggle(cli: &Cli, term: &str) -> Result<()> {
    let records = helpers::load_records(cli)?;

    let spec = QuerySpec::new().with_search(term);
    let matched = spec.apply(&records, &FavoriteSet::new());

    let record = match matched.as_slice() {
        [record] => *record,
        [] => {
            return Err(AusflugError::NoMatch {
                term: term.to_string(),
            })
        }
        many => {
            let candidates: Vec<String> =
                many.iter().map(|r| r.coerced_text(NAME_ATTR)).collect();
            return Err(AusflugError::AmbiguousMatch {
                term: term.to_string(),
                count: many.len(),
                candidates: candidates.join(", "),
            });
        }
    };

    let id = identity::record_key(record);
    let mut store = helpers::open_favorites()?;
    let now_favorite = store.toggle(&id);

    match cli.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "key": id,
                    "name": record.coerced_text(NAME_ATTR),
                    "favorite": now_favorite,
                })
            );
        }
        OutputFormat::Human => {
            let marker = if now_favorite { "★" } else { "☆" };
            if !cli.quiet {
                println!("{} {}", marker, record.coerced_text(NAME_ATTR));
            }
        }
    }

    Ok(())
}

fn list(cli: &Cli) -> Result<()> {
    let store = helpers::open_favorites()?;
    // The dataset is only needed to resolve names; favorites for
    // records no longer in the dataset still list by key.
    let records = helpers::load_records(cli)?;

    let entries: Vec<(String, Option<String>)> = store
        .set()
        .ids()
        .map(|id| (id.to_string(), find_name(&records, id)))
        .collect();

    match cli.format {
        OutputFormat::Json => {
            let output: Vec<_> = entries
                .iter()
                .map(|(key, name)| {
                    serde_json::json!({
                        "key": key,
                        "name": name,
                    })
                })
                .collect();
            println!("{}", serde_json::Value::Array(output));
        }
        OutputFormat::Human => {
            if entries.is_empty() {
                if !cli.quiet {
                    println!("no favorites");
                }
                return Ok(());
            }
            for (key, name) in &entries {
                match name {
                    Some(name) => println!("★ {}  ({})", name, key),
                    None => println!("★ {}", key),
                }
            }
        }
    }

    Ok(())
}

fn clear(cli: &Cli) -> Result<()> {
    let mut store = helpers::open_favorites()?;
    let count = store.set().len();
    store.clear();

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "cleared": count }));
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!("cleared {} favorite(s)", count);
            }
        }
    }

    Ok(())
}

fn find_name(records: &[Record], id: &str) -> Option<String> {
    records
        .iter()
        .find(|r| identity::record_key(r) == id)
        .map(|r| r.coerced_text(NAME_ATTR))
}
