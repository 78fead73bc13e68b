//! Shared helpers for command implementations

use std::path::PathBuf;

use ausflug_core::config::GlobalConfig;
use ausflug_core::dataset;
use ausflug_core::error::{AusflugError, Result};
use ausflug_core::favorites::{self, FavoriteStore, FileBackend};
use ausflug_core::geo::Coordinates;
use ausflug_core::geocode::{self, Geocoder, GeocoderConfig};
use ausflug_core::record::Record;

use crate::cli::Cli;

/// Dataset path resolution: `--data` flag (or `AUSFLUG_DATA` env via
/// clap), then the global config, then an error.
pub fn resolve_dataset_path(cli: &Cli) -> Result<PathBuf> {
    if let Some(path) = &cli.data {
        return Ok(path.clone());
    }
    if let Some(path) = GlobalConfig::load()?.dataset {
        return Ok(path);
    }
    Err(AusflugError::NoDataset)
}

/// Load the dataset, reporting degradation as a warning rather than a
/// failure: the engine operates on an empty collection.
pub fn load_records(cli: &Cli) -> Result<Vec<Record>> {
    let path = resolve_dataset_path(cli)?;
    let load = dataset::load(&path);
    if let Some(reason) = load.degraded {
        if !cli.quiet {
            eprintln!("warning: dataset {}: {}", path.display(), reason);
        }
    }
    Ok(load.records)
}

/// Open the favorite store at its configured location.
pub fn open_favorites() -> Result<FavoriteStore> {
    let path = match GlobalConfig::load()?.favorites {
        Some(path) => Some(path),
        None => favorites::default_favorites_path(),
    };
    let path = path
        .ok_or_else(|| AusflugError::Other("unable to determine data directory".to_string()))?;
    Ok(FavoriteStore::open(Box::new(FileBackend::new(path))))
}

/// Build the geocoding client. Environment overrides win; a config
/// file endpoint fills in when the environment left the default.
pub fn geocoder() -> Result<Geocoder> {
    let mut config = GeocoderConfig::from_env();
    if config.url == geocode::DEFAULT_ENDPOINT_URL {
        if let Some(url) = GlobalConfig::load()?.geocoder_url {
            config.url = url;
        }
    }
    Ok(Geocoder::new(config))
}

/// Parse an explicit "lat,lon" center argument.
pub fn parse_center(raw: &str) -> Result<Coordinates> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    let [lat, lon] = parts.as_slice() else {
        return Err(AusflugError::invalid_value("center", raw));
    };
    let lat: f64 = lat
        .parse()
        .map_err(|_| AusflugError::invalid_value("center latitude", raw))?;
    let lon: f64 = lon
        .parse()
        .map_err(|_| AusflugError::invalid_value("center longitude", raw))?;
    Ok(Coordinates::new(lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_center_accepts_lat_lon() {
        let c = parse_center("48.7, 9.0").unwrap();
        assert_eq!(c, Coordinates::new(48.7, 9.0));
    }

    #[test]
    fn parse_center_rejects_garbage() {
        assert!(parse_center("48.7").is_err());
        assert!(parse_center("a,b").is_err());
        assert!(parse_center("1,2,3").is_err());
    }
}
