//! Terminal front-end
//!
//! Handles terminal setup/teardown and the main event loop. The UI is drawn
//! on stderr so stdout stays free for the final selection.

mod render;

pub use render::{list_offset, render};

use std::io::{self, Stderr};
use std::time::Duration;

use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::app::App;
use crate::keymap::keystroke_from_crossterm;

/// How long to wait for input before checking for finished previews
const POLL_INTERVAL: Duration = Duration::from_millis(50);

type TuiTerminal = Terminal<CrosstermBackend<Stderr>>;

/// Entry point: set up the terminal and run the event loop until exit
pub fn run(app: &mut App) -> io::Result<()> {
    let mut stderr = io::stderr();
    enable_raw_mode()?;
    stderr.execute(EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend)?;

    app.set_interactive(true);
    let result = run_loop(&mut terminal, app);
    app.set_interactive(false);

    restore_terminal(&mut terminal)?;
    result
}

fn restore_terminal(terminal: &mut TuiTerminal) -> io::Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// Main event loop: draw, wait for a key, apply finished previews
fn run_loop(terminal: &mut TuiTerminal, app: &mut App) -> io::Result<()> {
    terminal.clear()?;
    let mut dirty = true;

    while !app.exit_requested() {
        // A silent command left the alternate screen; ratatui's buffer is stale
        if app.take_full_redraw() {
            terminal.clear()?;
            dirty = true;
        }
        if dirty {
            terminal.draw(|frame| render(app, frame))?;
            dirty = false;
        }

        if event::poll(POLL_INTERVAL)? {
            dirty |= handle_event(app, event::read()?);
            // Drain any pending events before redraw
            while !app.exit_requested() && event::poll(Duration::ZERO)? {
                dirty |= handle_event(app, event::read()?);
            }
        }

        if app.poll_preview() {
            dirty = true;
        }
    }
    Ok(())
}

fn handle_event(app: &mut App, event: Event) -> bool {
    match event {
        Event::Key(key) => match keystroke_from_crossterm(&key) {
            Some(keystroke) => {
                tracing::trace!(%keystroke, "Key");
                app.handle_key(keystroke);
                true
            }
            None => false,
        },
        Event::Resize(cols, rows) => {
            tracing::debug!(cols, rows, "Resize");
            true
        }
        _ => false,
    }
}
