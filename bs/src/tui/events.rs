//! TUI event polling

use std::time::Duration;

use crossterm::event::{self, KeyEvent, KeyEventKind};
use eyre::Result;

/// Terminal events
#[derive(Debug)]
pub enum Event {
    /// Key press
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Nothing happened within the tick rate
    Tick,
}

/// Polls crossterm on the calling thread
///
/// The pager is modal, so there is no background reader: once it closes,
/// keystrokes go back to the line editor untouched.
pub struct EventSource {
    tick_rate: Duration,
}

impl EventSource {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Wait up to one tick for the next event
    pub fn next(&self) -> Result<Event> {
        if !event::poll(self.tick_rate)? {
            return Ok(Event::Tick);
        }
        Ok(match event::read()? {
            // Windows reports releases too
            event::Event::Key(key) if key.kind == KeyEventKind::Press => Event::Key(key),
            event::Event::Resize(w, h) => Event::Resize(w, h),
            _ => Event::Tick,
        })
    }
}
