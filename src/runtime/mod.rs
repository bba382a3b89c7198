use std::sync::mpsc;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::mpris::ControlCmd;
use crate::session::{QuitGuard, Session};

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    let shows = startup::load_catalog(&settings)?;
    let favourites = startup::load_favourites();

    let session = Session::spawn(Duration::from_millis(settings.playback.switch_delay_ms));
    let guard = QuitGuard::new(session.state_handle());

    let mut app = App::new(shows, favourites, settings.ui.page_size);
    app.sort = settings.ui.sort;
    app.theme = settings.ui.theme.into();
    app.set_session_handle(session.state_handle());

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx.clone());

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut app,
        &session,
        &guard,
        &mpris,
        &control_rx,
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    session.shutdown();

    if let Err(e) = app.favourites.persist() {
        log::warn!("failed to persist favourites: {e}");
    }

    run_result
}
