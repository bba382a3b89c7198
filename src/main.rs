mod app;
mod catalog;
mod config;
mod favourites;
mod media;
mod mpris;
mod runtime;
mod session;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Off by default; RUST_LOG=hark=debug turns it on. Output goes to stderr
    // so it does not fight the TUI for stdout.
    env_logger::init();

    runtime::run()
}
