use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use std::io;
use std::time::Duration;

use super::app::App;
use super::ui;
use fairway_core::PageId;

/// How long to wait for input before checking on the background load.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Lines moved by PageUp/PageDown.
const PAGE_SCROLL: i32 = 10;

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    app.reload();
    loop {
        app.poll_load();
        terminal.draw(|f| ui::draw(f, app))?;
        if app.should_quit {
            return Ok(());
        }

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            // Only process key press events (Windows reports Press + Release)
            if key.kind != KeyEventKind::Press {
                continue;
            }
            handle_key(app, key);
        }
    }
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => app.next_page(),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => app.prev_page(),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_by(1),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_by(-1),
        KeyCode::PageDown => app.scroll_by(PAGE_SCROLL),
        KeyCode::PageUp => app.scroll_by(-PAGE_SCROLL),
        KeyCode::Home | KeyCode::Char('g') => app.scroll = 0,
        KeyCode::Char('r') => app.reload(),
        KeyCode::Char('o') => app.goto(PageId::Overall),
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(round) = c.to_digit(10) {
                app.goto(PageId::Round(round as u8));
            }
        }
        _ => {}
    }
}
