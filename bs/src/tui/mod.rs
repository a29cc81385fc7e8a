//! Full-screen markdown pager
//!
//! Shows the generated post rendered as markdown in the alternate screen.
//! Navigation is vim-style: j/k, PgUp/PgDn, g/G; q or Esc closes it.

mod events;
mod pager;

pub use events::{Event, EventSource};
pub use pager::PagerState;

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use eyre::Result;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::debug;

/// Terminal type alias
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
pub fn restore() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Show `markdown` in the pager until the user closes it
///
/// Blocking; call it from `spawn_blocking` inside async code.
pub fn view_markdown(title: &str, markdown: &str) -> Result<()> {
    debug!(%title, len = markdown.len(), "view_markdown: called");
    // Restore the terminal even on early return/error
    struct TerminalGuard;
    impl Drop for TerminalGuard {
        fn drop(&mut self) {
            let _ = restore();
        }
    }
    let _guard = TerminalGuard;
    let mut terminal = init()?;

    let mut state = PagerState::new(title, markdown);
    let events = EventSource::new(Duration::from_millis(250));

    while !state.should_quit {
        terminal.draw(|frame| pager::render(&mut state, frame))?;
        match events.next()? {
            Event::Key(key) => state.handle_key(key),
            Event::Resize(_, _) | Event::Tick => {}
        }
    }
    Ok(())
}
