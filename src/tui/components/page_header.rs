//! # PageHeader Component
//!
//! The title row: `  GO (GAME)  [2/14]`, title in bold. Sits on the second
//! row of its area with a blank row above and below.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::state::Position;
use crate::tui::component::Component;

pub struct PageHeader<'a> {
    pub position: &'a Position,
}

impl<'a> PageHeader<'a> {
    pub fn new(position: &'a Position) -> Self {
        Self { position }
    }
}

impl Component for PageHeader<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let pages = self.position.page_count();
        if pages == 0 {
            return;
        }
        let title = Line::from(vec![
            Span::raw("  "),
            Span::styled(
                self.position.document.title.to_uppercase(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  [{}/{}]", self.position.page + 1, pages)),
        ]);
        frame.render_widget(Paragraph::new(vec![Line::default(), title]), area);
    }
}
