use std::env;
use std::path::PathBuf;

use crate::catalog::{self, Show};
use crate::config;
use crate::favourites::{self, Favourites};

/// Resolve the catalog path and load the shows.
///
/// Precedence: first CLI argument, then `catalog.path` from the config, then
/// the default data directory.
pub fn load_catalog(settings: &config::Settings) -> Result<Vec<Show>, Box<dyn std::error::Error>> {
    let path: PathBuf = match env::args_os().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => match &settings.catalog.path {
            Some(p) => p.clone(),
            None => config::default_catalog_path()
                .ok_or("hark: cannot resolve a catalog path; pass one as the first argument")?,
        },
    };

    let shows = catalog::load_shows(&path)?;
    Ok(shows)
}

/// Load the favourites store, falling back to an in-memory list when no data
/// directory can be resolved.
pub fn load_favourites() -> Favourites {
    match favourites::default_store_path() {
        Some(path) => Favourites::load(path),
        None => {
            log::warn!("no data directory found; favourites will not be saved");
            Favourites::in_memory()
        }
    }
}
