//! Pager state, key handling and rendering

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tracing::trace;

/// Lines moved by PgUp/PgDn
const PAGE: usize = 20;

/// What the pager is showing and where
#[derive(Debug, Clone)]
pub struct PagerState {
    pub title: String,
    pub markdown: String,
    pub scroll: usize,
    /// Updated on every render from the wrapped content height
    pub max_scroll: usize,
    pub should_quit: bool,
}

impl PagerState {
    pub fn new(title: &str, markdown: &str) -> Self {
        Self {
            title: title.to_string(),
            markdown: markdown.to_string(),
            scroll: 0,
            max_scroll: usize::MAX,
            should_quit: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        trace!(?key, "PagerState::handle_key: called");
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.scroll_by(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_back(1),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_by(PAGE),
            KeyCode::PageUp => self.scroll_back(PAGE),
            KeyCode::Char('g') | KeyCode::Home => self.scroll = 0,
            KeyCode::Char('G') | KeyCode::End => self.scroll = self.max_scroll,
            _ => {}
        }
    }

    fn scroll_by(&mut self, n: usize) {
        self.scroll = self.scroll.saturating_add(n).min(self.max_scroll);
    }

    fn scroll_back(&mut self, n: usize) {
        self.scroll = self.scroll.saturating_sub(n);
    }
}

/// Draw the post and a key hint footer
pub fn render(state: &mut PagerState, frame: &mut Frame) {
    let [body, footer] = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(frame.area());
    render_body(state, frame, body);

    let hint = Line::from(vec![
        Span::styled("j/k", Style::default().fg(Color::Yellow)),
        Span::raw(" scroll  "),
        Span::styled("PgUp/PgDn", Style::default().fg(Color::Yellow)),
        Span::raw(" page  "),
        Span::styled("g/G", Style::default().fg(Color::Yellow)),
        Span::raw(" top/bottom  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" close"),
    ]);
    frame.render_widget(Paragraph::new(hint), footer);
}

fn render_body(state: &mut PagerState, frame: &mut Frame, area: Rect) {
    let lines: Vec<Line> = tui_markdown::from_str(&state.markdown).lines;

    let viewport_height = area.height.saturating_sub(2) as usize; // -2 for borders
    let viewport_width = area.width.saturating_sub(2) as usize;

    // Content height accounting for line wrapping
    let content_height: usize = lines
        .iter()
        .map(|line| {
            let line_width = line.width();
            if viewport_width == 0 || line_width == 0 {
                1
            } else {
                line_width.div_ceil(viewport_width)
            }
        })
        .sum();

    state.max_scroll = content_height.saturating_sub(viewport_height);
    state.scroll = state.scroll.min(state.max_scroll);

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", state.title))
                .title_style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .wrap(Wrap { trim: false })
        .scroll((state.scroll.min(u16::MAX as usize) as u16, 0));

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn long_post() -> String {
        let mut post = String::from("# Title\n\n");
        for i in 0..100 {
            post.push_str(&format!("Paragraph number {}\n\n", i));
        }
        post
    }

    #[test]
    fn test_quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let mut state = PagerState::new("t", "body");
            state.handle_key(key(code));
            assert!(state.should_quit);
        }
        let mut state = PagerState::new("t", "body");
        state.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(state.should_quit);
    }

    #[test]
    fn test_scroll_is_clamped_after_render() {
        let mut state = PagerState::new("Long", &long_post());
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|f| render(&mut state, f)).unwrap();
        assert!(state.max_scroll > 0);

        state.handle_key(key(KeyCode::Char('G')));
        assert_eq!(state.scroll, state.max_scroll);

        state.handle_key(key(KeyCode::Char('j')));
        assert_eq!(state.scroll, state.max_scroll);

        state.handle_key(key(KeyCode::Char('k')));
        assert_eq!(state.scroll, state.max_scroll - 1);

        state.handle_key(key(KeyCode::Char('g')));
        assert_eq!(state.scroll, 0);

        state.handle_key(key(KeyCode::Up));
        assert_eq!(state.scroll, 0);
    }

    #[test]
    fn test_short_post_does_not_scroll() {
        let mut state = PagerState::new("Short", "# Hi\n\nJust one line.");
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|f| render(&mut state, f)).unwrap();
        assert_eq!(state.max_scroll, 0);

        state.handle_key(key(KeyCode::PageDown));
        assert_eq!(state.scroll, 0);
    }

    #[test]
    fn test_render_shows_title_and_text() {
        let mut state = PagerState::new("My Post", "Hello pager");
        let mut terminal = Terminal::new(TestBackend::new(40, 8)).unwrap();
        terminal.draw(|f| render(&mut state, f)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("My Post"));
        assert!(text.contains("Hello pager"));
    }
}
