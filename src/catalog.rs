//! The show catalog: loading, filtering, sorting and paging.
//!
//! The catalog is a JSON file of shows, each carrying seasons and episodes.
//! Filtering works over indices into the loaded list so the UI never clones
//! show data per keystroke.

mod filter;
mod load;
mod model;

pub use filter::{page_bounds, page_count, visible_shows, SortKey};
pub use load::{genres_in, load_shows, CatalogError};
pub use model::{genre_title, Episode, Season, Show};
