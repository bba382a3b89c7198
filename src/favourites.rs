//! Persistent favourites: episodes the user starred, saved as JSON on disk.

mod store;

pub use store::{
    default_store_path, FavouriteEpisode, FavouriteSort, Favourites, StoreError,
};
