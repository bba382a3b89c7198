use serde::{Deserialize, Serialize};

use super::model::Show;

/// Catalog sort order. The `updated` field is RFC 3339, so date ordering is
/// plain string ordering.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[serde(alias = "date-desc")]
    Newest,
    #[serde(alias = "date-asc")]
    Oldest,
    TitleAsc,
    TitleDesc,
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::Newest
    }
}

impl SortKey {
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Newest => "Newest",
            SortKey::Oldest => "Oldest",
            SortKey::TitleAsc => "Title A-Z",
            SortKey::TitleDesc => "Title Z-A",
        }
    }

    pub fn next(self) -> SortKey {
        match self {
            SortKey::Newest => SortKey::Oldest,
            SortKey::Oldest => SortKey::TitleAsc,
            SortKey::TitleAsc => SortKey::TitleDesc,
            SortKey::TitleDesc => SortKey::Newest,
        }
    }
}

/// Indices of the shows that survive the search and genre filters, in the
/// requested sort order.
pub fn visible_shows(
    shows: &[Show],
    query: &str,
    genre: Option<u64>,
    sort: SortKey,
) -> Vec<usize> {
    let q = query.trim().to_lowercase();
    let mut idx: Vec<usize> = shows
        .iter()
        .enumerate()
        .filter(|(_, s)| q.is_empty() || s.title.to_lowercase().contains(&q))
        .filter(|(_, s)| genre.map(|g| s.genres.contains(&g)).unwrap_or(true))
        .map(|(i, _)| i)
        .collect();

    match sort {
        SortKey::Newest => idx.sort_by(|a, b| shows[*b].updated.cmp(&shows[*a].updated)),
        SortKey::Oldest => idx.sort_by(|a, b| shows[*a].updated.cmp(&shows[*b].updated)),
        SortKey::TitleAsc => {
            idx.sort_by(|a, b| {
                shows[*a]
                    .title
                    .to_lowercase()
                    .cmp(&shows[*b].title.to_lowercase())
            });
        }
        SortKey::TitleDesc => {
            idx.sort_by(|a, b| {
                shows[*b]
                    .title
                    .to_lowercase()
                    .cmp(&shows[*a].title.to_lowercase())
            });
        }
    }
    idx
}

/// Number of pages needed for `len` items, at least 1.
pub fn page_count(len: usize, page_size: usize) -> usize {
    let size = page_size.max(1);
    len.div_ceil(size).max(1)
}

/// Half-open index range of the given zero-based page.
pub fn page_bounds(len: usize, page_size: usize, page: usize) -> (usize, usize) {
    let size = page_size.max(1);
    let page = page.min(page_count(len, size) - 1);
    let start = page * size;
    (start, (start + size).min(len))
}
