//! Application model types: `App`, `View` and `Theme`.
//!
//! The `App` struct holds the loaded catalog, the active filters, the
//! navigation cursors for each view and the shared playback snapshot handle.

use crate::catalog::{self, Show, SortKey};
use crate::config::ThemeSetting;
use crate::favourites::{FavouriteSort, Favourites};
use crate::session::{SessionHandle, Track};

/// Which screen the main panel shows.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum View {
    Shows,
    Episodes,
    Favourites,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl From<ThemeSetting> for Theme {
    fn from(t: ThemeSetting) -> Self {
        match t {
            ThemeSetting::Dark => Theme::Dark,
            ThemeSetting::Light => Theme::Light,
        }
    }
}

/// The main application model.
pub struct App {
    pub shows: Vec<Show>,
    /// Distinct genre ids present in the catalog, ascending.
    pub genres: Vec<u64>,

    pub view: View,
    /// Zero-based page of the shows view.
    pub page: usize,
    pub page_size: usize,
    /// Cursor within the current page of the shows view.
    pub selected: usize,

    pub search_mode: bool,
    pub search_query: String,
    pub genre_filter: Option<u64>,
    pub sort: SortKey,

    /// Index into `shows` of the show open in the episodes view.
    pub open_show: Option<usize>,
    /// Cursor into the flattened episode list of the open show.
    pub episode_selected: usize,

    pub favourites: Favourites,
    /// Cursor within the favourites view.
    pub favourite_selected: usize,
    pub favourite_sort: FavouriteSort,

    pub theme: Theme,
    /// Whether the quit confirmation overlay is up.
    pub confirm_quit: bool,

    pub session_state: Option<SessionHandle>,
}

impl App {
    /// Create a new `App` over the loaded catalog.
    pub fn new(shows: Vec<Show>, favourites: Favourites, page_size: usize) -> Self {
        let genres = catalog::genres_in(&shows);
        Self {
            shows,
            genres,
            view: View::Shows,
            page: 0,
            page_size: page_size.max(1),
            selected: 0,
            search_mode: false,
            search_query: String::new(),
            genre_filter: None,
            sort: SortKey::default(),
            open_show: None,
            episode_selected: 0,
            favourites,
            favourite_selected: 0,
            favourite_sort: FavouriteSort::NewestFirst,
            theme: Theme::Dark,
            confirm_quit: false,
            session_state: None,
        }
    }

    /// Attach the shared playback snapshot handle.
    pub fn set_session_handle(&mut self, h: SessionHandle) {
        self.session_state = Some(h);
    }

    /// Indices into `shows` that survive the active search, genre filter and
    /// sort, in display order.
    pub fn visible_show_indices(&self) -> Vec<usize> {
        catalog::visible_shows(&self.shows, &self.search_query, self.genre_filter, self.sort)
    }

    /// Indices into `shows` on the current page, in display order.
    pub fn page_show_indices(&self) -> Vec<usize> {
        let visible = self.visible_show_indices();
        let (start, end) = catalog::page_bounds(visible.len(), self.page_size, self.page);
        visible[start..end].to_vec()
    }

    pub fn page_count(&self) -> usize {
        catalog::page_count(self.visible_show_indices().len(), self.page_size)
    }

    /// Clamp `page` and `selected` back into range after a filter change.
    fn clamp_cursor(&mut self) {
        self.page = self.page.min(self.page_count() - 1);
        let len = self.page_show_indices().len();
        self.selected = if len == 0 { 0 } else { self.selected.min(len - 1) };
    }

    /// Flattened `(season_index, episode_index)` pairs of the open show.
    pub fn episode_entries(&self) -> Vec<(usize, usize)> {
        let Some(show) = self.open_show.and_then(|i| self.shows.get(i)) else {
            return Vec::new();
        };
        show.seasons
            .iter()
            .enumerate()
            .flat_map(|(si, season)| (0..season.episodes.len()).map(move |ei| (si, ei)))
            .collect()
    }

    /// Move the cursor down within the current view.
    pub fn next(&mut self) {
        let len = self.current_list_len();
        if len == 0 {
            return;
        }
        let cursor = self.current_cursor_mut();
        *cursor = (*cursor + 1) % len;
    }

    /// Move the cursor up within the current view.
    pub fn prev(&mut self) {
        let len = self.current_list_len();
        if len == 0 {
            return;
        }
        let cursor = self.current_cursor_mut();
        *cursor = if *cursor == 0 { len - 1 } else { *cursor - 1 };
    }

    fn current_list_len(&self) -> usize {
        match self.view {
            View::Shows => self.page_show_indices().len(),
            View::Episodes => self.episode_entries().len(),
            View::Favourites => self.favourites.len(),
        }
    }

    fn current_cursor_mut(&mut self) -> &mut usize {
        match self.view {
            View::Shows => &mut self.selected,
            View::Episodes => &mut self.episode_selected,
            View::Favourites => &mut self.favourite_selected,
        }
    }

    pub fn next_page(&mut self) {
        if self.view != View::Shows {
            return;
        }
        if self.page + 1 < self.page_count() {
            self.page += 1;
            self.clamp_cursor();
        }
    }

    pub fn prev_page(&mut self) {
        if self.view != View::Shows {
            return;
        }
        if self.page > 0 {
            self.page -= 1;
            self.clamp_cursor();
        }
    }

    /// Open the show under the cursor in the episodes view.
    pub fn open_selected_show(&mut self) {
        if self.view != View::Shows {
            return;
        }
        if let Some(&idx) = self.page_show_indices().get(self.selected) {
            self.open_show = Some(idx);
            self.episode_selected = 0;
            self.view = View::Episodes;
        }
    }

    /// Leave the episodes or favourites view for the shows view.
    pub fn back_to_shows(&mut self) {
        self.view = View::Shows;
        self.open_show = None;
    }

    pub fn show_favourites(&mut self) {
        self.view = View::Favourites;
        self.favourite_selected = 0;
    }

    /// The playable track under the cursor, if the current view has one.
    pub fn selected_track(&self) -> Option<Track> {
        match self.view {
            View::Shows => None,
            View::Episodes => {
                let show = self.open_show.and_then(|i| self.shows.get(i))?;
                let (si, ei) = *self.episode_entries().get(self.episode_selected)?;
                let episode = show.seasons.get(si)?.episodes.get(ei)?;
                Some(show.track_for(si, episode))
            }
            View::Favourites => self
                .favourites
                .entries()
                .get(self.favourite_selected)
                .map(|f| f.to_track()),
        }
    }

    /// Star or unstar the episode under the cursor. Returns false when the
    /// cursor is not on a playable episode.
    pub fn toggle_favourite_selected(&mut self) -> bool {
        let Some(track) = self.selected_track() else {
            return false;
        };
        self.favourites.toggle(&track);
        if self.view == View::Favourites {
            self.favourite_selected = self
                .favourite_selected
                .min(self.favourites.len().saturating_sub(1));
        }
        true
    }

    /// Enter search mode; typed characters go into the query.
    pub fn enter_search(&mut self) {
        self.search_mode = true;
    }

    /// Leave search mode but keep the query applied.
    pub fn exit_search(&mut self) {
        self.search_mode = false;
    }

    /// Drop the query and leave search mode.
    pub fn clear_search(&mut self) {
        self.search_query.clear();
        self.search_mode = false;
        self.page = 0;
        self.clamp_cursor();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_query.push(c);
        self.page = 0;
        self.clamp_cursor();
    }

    pub fn pop_search_char(&mut self) {
        self.search_query.pop();
        self.page = 0;
        self.clamp_cursor();
    }

    /// Cycle the genre filter: all genres in catalog order, then off.
    pub fn cycle_genre(&mut self) {
        self.genre_filter = match self.genre_filter {
            None => self.genres.first().copied(),
            Some(current) => self
                .genres
                .iter()
                .position(|&g| g == current)
                .and_then(|p| self.genres.get(p + 1))
                .copied(),
        };
        self.page = 0;
        self.clamp_cursor();
    }

    /// Advance to the next sort order.
    pub fn cycle_sort(&mut self) {
        self.sort = self.sort.next();
        self.page = 0;
        self.clamp_cursor();
    }

    /// Advance the favourites view to its next sort order and reorder the
    /// stored list.
    pub fn cycle_favourite_sort(&mut self) {
        self.favourite_sort = self.favourite_sort.next();
        self.favourites.sort(self.favourite_sort);
        self.favourite_selected = 0;
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
    }
}
