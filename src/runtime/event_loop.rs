use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, View};
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::session::{QuitGuard, Session, SessionState};
use crate::ui;

/// Main terminal event loop: handles input, UI drawing and sync with the
/// session thread and MPRIS. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    session: &Session,
    guard: &QuitGuard,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<ControlCmd>,
) -> Result<(), Box<dyn std::error::Error>> {
    // Last playback snapshot emitted to MPRIS, used to avoid resending an
    // unchanged one every frame.
    let mut last_mpris: Option<(bool, u64, bool)> = None;

    loop {
        let snapshot: SessionState = session
            .state_handle()
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default();

        let mpris_key = (
            snapshot.playing,
            snapshot.generation,
            snapshot.current_track.is_some(),
        );
        if last_mpris != Some(mpris_key) {
            mpris.sync(&snapshot);
            last_mpris = Some(mpris_key);
        }

        terminal.draw(|f| ui::draw(f, app, &snapshot, &settings.ui, &settings.controls))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, settings, app, session, guard, &snapshot) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, session, guard, &snapshot) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Toggle between playing and paused. Resuming replays the current track
/// from the start; the session has no separate resume operation.
fn play_pause(app: &App, session: &Session, snapshot: &SessionState) {
    if snapshot.playing {
        session.pause();
    } else if let Some(track) = snapshot.current_track.clone() {
        session.play(track);
    } else if let Some(track) = app.selected_track() {
        session.play(track);
    }
}

/// Quit, or raise the confirmation overlay when audio is still playing.
/// Returns true when the loop should end now.
fn request_quit(app: &mut App, guard: &QuitGuard) -> bool {
    if guard.should_confirm() {
        app.confirm_quit = true;
        false
    } else {
        true
    }
}

fn handle_control_cmd(
    cmd: ControlCmd,
    settings: &config::Settings,
    app: &mut App,
    session: &Session,
    guard: &QuitGuard,
    snapshot: &SessionState,
) -> bool {
    match cmd {
        ControlCmd::Quit => {
            if request_quit(app, guard) {
                return true;
            }
        }
        ControlCmd::Play => {
            if !snapshot.playing {
                if let Some(track) = snapshot.current_track.clone() {
                    session.play(track);
                }
            }
        }
        ControlCmd::Pause => session.pause(),
        ControlCmd::PlayPause => play_pause(app, session, snapshot),
        ControlCmd::SeekForward => {
            session.seek_by(settings.controls.scrub_seconds as f64);
        }
        ControlCmd::SeekBack => {
            session.seek_by(-(settings.controls.scrub_seconds as f64));
        }
        ControlCmd::SeekBy(delta) => session.seek_by(delta),
        ControlCmd::SeekTo(position) => session.seek(position),
    }
    false
}

fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    session: &Session,
    guard: &QuitGuard,
    snapshot: &SessionState,
) -> bool {
    // The confirmation overlay swallows all input until answered.
    if app.confirm_quit {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => return true,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.confirm_quit = false;
            }
            _ => {}
        }
        return false;
    }

    if app.search_mode {
        match key.code {
            KeyCode::Esc => app.clear_search(),
            KeyCode::Enter => app.exit_search(),
            KeyCode::Backspace => app.pop_search_char(),
            KeyCode::Char(c) if !c.is_control() => app.push_search_char(c),
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return request_quit(app, guard),
        KeyCode::Char('/') if app.view == View::Shows => app.enter_search(),
        KeyCode::Char('g') if app.view == View::Shows => app.cycle_genre(),
        KeyCode::Char('o') if app.view == View::Shows => app.cycle_sort(),
        KeyCode::Char('o') if app.view == View::Favourites => app.cycle_favourite_sort(),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('f') => {
            if app.toggle_favourite_selected() {
                if let Err(e) = app.favourites.persist() {
                    log::warn!("failed to persist favourites: {e}");
                }
            }
        }
        KeyCode::Char('F') => app.show_favourites(),
        KeyCode::Esc => app.back_to_shows(),
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Char('n') => app.next_page(),
        KeyCode::Char('p') => app.prev_page(),
        KeyCode::Enter => match app.view {
            View::Shows => app.open_selected_show(),
            View::Episodes | View::Favourites => {
                if let Some(track) = app.selected_track() {
                    session.play(track);
                }
            }
        },
        KeyCode::Char(' ') => play_pause(app, session, snapshot),
        KeyCode::Char('L') => session.seek_by(settings.controls.scrub_seconds as f64),
        KeyCode::Char('H') => session.seek_by(-(settings.controls.scrub_seconds as f64)),
        _ => {}
    }

    false
}
