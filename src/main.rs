//! Binary entry point that glues the SQLite-backed domain model to the TUI:
//! bring up the database, start on the login screen, and drive the Ratatui
//! event loop until the user exits.
use library_lending_manager::{ensure_schema, run_app, App};

/// Initialize persistence and launch the Ratatui event loop.
///
/// Returning a `Result` bubbles up fatal initialization problems (for example
/// an unwritable home directory) to the terminal instead of crashing silently.
fn main() -> anyhow::Result<()> {
    let conn = ensure_schema()?;

    let mut app = App::new(conn);
    run_app(&mut app)
}
