use serde::{Deserialize, Serialize};

use crate::session::Track;

/// A podcast show as stored in the catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Show {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub genres: Vec<u64>,
    /// RFC 3339 timestamp of the last episode update.
    #[serde(default)]
    pub updated: String,
    #[serde(default)]
    pub seasons: Vec<Season>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Season {
    pub season: u64,
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    pub episode: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Audio source URL or file path.
    #[serde(default)]
    pub file: String,
}

impl Show {
    pub fn episode_count(&self) -> usize {
        self.seasons.iter().map(|s| s.episodes.len()).sum()
    }

    /// Build the playable track for an episode of this show.
    pub fn track_for(&self, season_index: usize, episode: &Episode) -> Track {
        let season_title = self
            .seasons
            .get(season_index)
            .map(|s| s.title.as_str())
            .unwrap_or("");
        let title = if season_title.is_empty() {
            format!("{} - {}", self.title, episode.title)
        } else {
            format!("{} - {} - {}", self.title, season_title, episode.title)
        };
        Track {
            source_url: episode.file.clone(),
            title,
            show_name: self.title.clone(),
            episode_title: episode.title.clone(),
            show_id: self.id,
            season_index,
            episode_id: episode.episode,
        }
    }
}

/// Human-readable name for a catalog genre id.
pub fn genre_title(id: u64) -> &'static str {
    match id {
        1 => "Personal Growth",
        2 => "Investigative Journalism",
        3 => "History",
        4 => "Comedy",
        5 => "Entertainment",
        6 => "Business",
        7 => "Fiction",
        8 => "News",
        9 => "Kids and Family",
        _ => "Unknown",
    }
}
