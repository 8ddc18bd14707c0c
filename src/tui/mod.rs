//! Terminal viewer: one tab per round plus the Overall standings.

mod app;
mod input;
mod ui;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use fairway_core::{PageId, PageSource};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::sync::Arc;

/// Run the viewer until the user quits, restoring the terminal either way.
pub fn run(source: Arc<dyn PageSource>, max_round: u8, start: PageId) -> io::Result<()> {
    let mut app = app::App::new(source, max_round, start);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = input::run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
