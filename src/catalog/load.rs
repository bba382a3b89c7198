use std::fs;
use std::path::Path;

use thiserror::Error;

use super::model::Show;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Load the show catalog from a JSON file.
pub fn load_shows(path: &Path) -> Result<Vec<Show>, CatalogError> {
    let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let shows: Vec<Show> = serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    log::info!("loaded {} shows from {}", shows.len(), path.display());
    Ok(shows)
}

/// Distinct genre ids present in the loaded shows, ascending.
pub fn genres_in(shows: &[Show]) -> Vec<u64> {
    let mut ids: Vec<u64> = shows.iter().flat_map(|s| s.genres.iter().copied()).collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}
