//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::app::{App, Theme, View};
use crate::catalog::genre_title;
use crate::config::{ControlsSettings, UiSettings};
use crate::session::SessionState;

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(view: View, scrub_seconds: u64) -> String {
    let mut parts: Vec<String> = vec!["[j/k] up/down".to_string()];
    match view {
        View::Shows => {
            parts.push("[n/p] page".to_string());
            parts.push("[enter] open show".to_string());
            parts.push("[/] search".to_string());
            parts.push("[g] genre".to_string());
            parts.push("[o] sort".to_string());
        }
        View::Episodes => {
            parts.push("[enter] play".to_string());
            parts.push("[f] favourite".to_string());
            parts.push("[esc] back".to_string());
        }
        View::Favourites => {
            parts.push("[enter] play".to_string());
            parts.push("[f] unfavourite".to_string());
            parts.push("[o] sort".to_string());
            parts.push("[esc] back".to_string());
        }
    }
    parts.push("[space] play/pause".to_string());
    parts.push(format!("[H/L] scrub -/+{}s", scrub_seconds));
    parts.push("[F] favourites".to_string());
    parts.push("[t] theme".to_string());
    parts.push("[q] quit".to_string());
    parts.join(" | ")
}

/// Format a position in seconds as `MM:SS`. Unknown (non-finite) positions
/// render as `--:--`.
fn format_secs(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "--:--".to_string();
    }
    let secs = seconds as u64;
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn base_style(theme: Theme) -> Style {
    match theme {
        Theme::Dark => Style::default().fg(Color::White).bg(Color::Black),
        Theme::Light => Style::default().fg(Color::Black).bg(Color::White),
    }
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    // Keep the popup smaller and avoid covering the entire UI.
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// The "now playing" line under the main panel.
fn now_playing_text(session: &SessionState) -> String {
    match &session.current_track {
        Some(track) => {
            let state = if session.playing { "Playing" } else { "Paused" };
            format!(
                "{} [{} / {}] {}",
                track.title,
                format_secs(session.progress),
                format_secs(session.duration),
                state
            )
        }
        None => "Nothing playing".to_string(),
    }
}

fn status_text(app: &App) -> String {
    let mut parts: Vec<String> = Vec::new();

    let q = app.search_query.trim();
    if app.search_mode || !q.is_empty() {
        let mut search_part = String::from("SEARCH:");
        if !q.is_empty() {
            search_part.push(' ');
            search_part.push_str(q);
        }
        parts.push(search_part);
    }

    match app.genre_filter {
        Some(g) => parts.push(format!("GENRE: {}", genre_title(g))),
        None => parts.push("GENRE: All".to_string()),
    }
    if app.view == View::Favourites {
        parts.push(format!("SORT: {}", app.favourite_sort.label()));
    } else {
        parts.push(format!("SORT: {}", app.sort.label()));
    }

    if app.view == View::Shows {
        parts.push(format!("PAGE: {}/{}", app.page + 1, app.page_count()));
    }

    parts.join(" • ")
}

fn show_line(app: &App, idx: usize) -> String {
    let show = &app.shows[idx];
    let starred = show.seasons.iter().any(|s| {
        s.episodes
            .iter()
            .any(|e| app.favourites.contains(show.id, e.episode))
    });
    let star = if starred { "* " } else { "  " };
    format!(
        "{}{} ({} seasons, {} episodes)",
        star,
        show.title,
        show.seasons.len(),
        show.episode_count()
    )
}

fn list_items(app: &App, session: &SessionState) -> (Vec<ListItem<'static>>, usize, String) {
    match app.view {
        View::Shows => {
            let items = app
                .page_show_indices()
                .iter()
                .map(|&i| ListItem::new(show_line(app, i)))
                .collect();
            (items, app.selected, " shows ".to_string())
        }
        View::Episodes => {
            let title = app
                .open_show
                .and_then(|i| app.shows.get(i))
                .map(|s| format!(" {} ", s.title))
                .unwrap_or_else(|| " episodes ".to_string());
            let items = match app.open_show.and_then(|i| app.shows.get(i)) {
                Some(show) => app
                    .episode_entries()
                    .iter()
                    .filter_map(|&(si, ei)| {
                        let season = show.seasons.get(si)?;
                        let episode = season.episodes.get(ei)?;
                        let star = if app.favourites.contains(show.id, episode.episode) {
                            "* "
                        } else {
                            "  "
                        };
                        let playing = session
                            .current_track
                            .as_ref()
                            .map(|t| {
                                t.show_id == show.id && t.episode_id == episode.episode
                            })
                            .unwrap_or(false);
                        let marker = if playing { " ♪" } else { "" };
                        Some(ListItem::new(format!(
                            "{}S{:02}E{:02} {}{}",
                            star, season.season, episode.episode, episode.title, marker
                        )))
                    })
                    .collect(),
                None => Vec::new(),
            };
            (items, app.episode_selected, title)
        }
        View::Favourites => {
            let items = app
                .favourites
                .entries()
                .iter()
                .map(|f| {
                    ListItem::new(format!(
                        "* {} (added {})",
                        f.title,
                        f.added_at.get(..10).unwrap_or(&f.added_at)
                    ))
                })
                .collect();
            (items, app.favourite_selected, " favourites ".to_string())
        }
    }
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    session: &SessionState,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let style = base_style(app.theme);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .style(style)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" hark ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status_par = Paragraph::new(status_text(app))
        .style(style)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Main list
    let (items, selected, title) = list_items(app, session);
    let has_items = !items.is_empty();
    let list = List::new(items)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ratatui::widgets::ListState::default();
    if has_items {
        state.select(Some(selected));
    }
    frame.render_stateful_widget(list, chunks[2], &mut state);

    // Now playing bar
    let now_playing = Paragraph::new(now_playing_text(session))
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" now playing ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        );
    frame.render_widget(now_playing, chunks[3]);

    // Footer
    let footer = Paragraph::new(controls_text(app.view, controls_settings.scrub_seconds))
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);

    // Quit confirmation overlay (keeps the list visible under it)
    if app.confirm_quit {
        let popup_area = centered_rect_sized(52, 5, chunks[2]);
        frame.render_widget(Clear, popup_area);
        let msg = "Audio is playing.\nQuit anyway? [y/n]";
        let confirm = Paragraph::new(msg)
            .style(style)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" confirm quit "),
            );
        frame.render_widget(confirm, popup_area);
    }
}
