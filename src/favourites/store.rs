use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::Track;

/// One starred episode, with enough metadata to replay it without the
/// catalog loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavouriteEpisode {
    pub show_id: u64,
    pub season_index: usize,
    pub episode_id: u64,
    pub title: String,
    pub show_name: String,
    pub source_url: String,
    /// RFC 3339 timestamp of when the episode was starred.
    pub added_at: String,
}

impl FavouriteEpisode {
    fn from_track(track: &Track, added_at: String) -> Self {
        Self {
            show_id: track.show_id,
            season_index: track.season_index,
            episode_id: track.episode_id,
            title: track.title.clone(),
            show_name: track.show_name.clone(),
            source_url: track.source_url.clone(),
            added_at,
        }
    }

    pub fn to_track(&self) -> Track {
        Track {
            source_url: self.source_url.clone(),
            title: self.title.clone(),
            show_name: self.show_name.clone(),
            episode_title: self.title.clone(),
            show_id: self.show_id,
            season_index: self.season_index,
            episode_id: self.episode_id,
        }
    }
}

/// Sort order for the favourites view. `added_at` is RFC 3339, so date
/// ordering is string ordering.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FavouriteSort {
    NewestFirst,
    OldestFirst,
    TitleAsc,
    TitleDesc,
}

impl FavouriteSort {
    pub fn label(self) -> &'static str {
        match self {
            FavouriteSort::NewestFirst => "Newest",
            FavouriteSort::OldestFirst => "Oldest",
            FavouriteSort::TitleAsc => "Title A-Z",
            FavouriteSort::TitleDesc => "Title Z-A",
        }
    }

    pub fn next(self) -> FavouriteSort {
        match self {
            FavouriteSort::NewestFirst => FavouriteSort::OldestFirst,
            FavouriteSort::OldestFirst => FavouriteSort::TitleAsc,
            FavouriteSort::TitleAsc => FavouriteSort::TitleDesc,
            FavouriteSort::TitleDesc => FavouriteSort::NewestFirst,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write favourites to {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode favourites: {0}")]
    Encode(#[from] serde_json::Error),
}

/// The favourites list plus the path it persists to.
pub struct Favourites {
    entries: Vec<FavouriteEpisode>,
    path: Option<PathBuf>,
}

impl Favourites {
    /// Load favourites from `path`. A missing or corrupt file yields an
    /// empty list; corruption is logged, not fatal.
    pub fn load(path: PathBuf) -> Self {
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    log::warn!(
                        "ignoring corrupt favourites file {}: {e}",
                        path.display()
                    );
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        Self {
            entries,
            path: Some(path),
        }
    }

    /// A favourites list that never touches disk. For tests and for runs
    /// where no data directory could be resolved.
    pub fn in_memory() -> Self {
        Self {
            entries: Vec::new(),
            path: None,
        }
    }

    pub fn entries(&self) -> &[FavouriteEpisode] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, show_id: u64, episode_id: u64) -> bool {
        self.entries
            .iter()
            .any(|f| f.show_id == show_id && f.episode_id == episode_id)
    }

    /// Star or unstar the episode behind `track`. Returns true when the
    /// episode is a favourite afterwards.
    pub fn toggle(&mut self, track: &Track) -> bool {
        if self.contains(track.show_id, track.episode_id) {
            self.entries
                .retain(|f| !(f.show_id == track.show_id && f.episode_id == track.episode_id));
            false
        } else {
            let added_at = chrono::Utc::now().to_rfc3339();
            self.entries
                .push(FavouriteEpisode::from_track(track, added_at));
            true
        }
    }

    pub fn sort(&mut self, key: FavouriteSort) {
        match key {
            FavouriteSort::NewestFirst => {
                self.entries.sort_by(|a, b| b.added_at.cmp(&a.added_at));
            }
            FavouriteSort::OldestFirst => {
                self.entries.sort_by(|a, b| a.added_at.cmp(&b.added_at));
            }
            FavouriteSort::TitleAsc => {
                self.entries
                    .sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
            }
            FavouriteSort::TitleDesc => {
                self.entries
                    .sort_by(|a, b| b.title.to_lowercase().cmp(&a.title.to_lowercase()));
            }
        }
    }

    /// Write the list to its backing file, creating parent directories as
    /// needed. No-op for in-memory lists.
    pub fn persist(&self) -> Result<(), StoreError> {
        match &self.path {
            Some(path) => self.save_to(path),
            None => Ok(()),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }
        let raw = serde_json::to_string_pretty(&self.entries)?;
        fs::write(path, raw).map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Default location of the favourites file:
/// `$XDG_DATA_HOME/hark/favourites.json`, falling back to
/// `~/.local/share/hark/favourites.json`.
pub fn default_store_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_DATA_HOME")
        .map(PathBuf::from)
        .filter(|p| !p.as_os_str().is_empty())
        .or_else(|| {
            std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(".local").join("share"))
        })?;
    Some(base.join("hark").join("favourites.json"))
}
