//! # PromptLine Component
//!
//! The row above the command bar. Shows the inline status message, and
//! while typing a query, the `Go to: ` prompt with the cursor after the
//! typed text.
//!
//! ```text
//!   Article not found.  Go to: alan tu█
//! ```

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use crate::tui::component::Component;

pub const PROMPT: &str = "Go to: ";

pub struct PromptLine<'a> {
    /// Whether the prompt and cursor are shown.
    pub active: bool,
    pub query: &'a str,
    pub status: Option<&'a str>,
}

impl Component for PromptLine<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::raw("  ")];
        if let Some(status) = self.status {
            spans.push(Span::styled(
                status.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw("  "));
        }
        if self.active {
            spans.push(Span::raw(PROMPT));
            spans.push(Span::raw(self.query.to_string()));
        }

        let line = Line::from(spans);
        let cursor_x = area.x.saturating_add(line.width() as u16);
        frame.render_widget(Paragraph::new(line), area);

        if self.active && area.height > 0 {
            let x = cursor_x.min(area.right().saturating_sub(1));
            frame.set_cursor_position(Position::new(x, area.y));
        }
    }
}
