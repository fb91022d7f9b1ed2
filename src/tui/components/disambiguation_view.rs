//! # DisambiguationView Component
//!
//! One page of a disambiguation list: a heading and up to ten numbered
//! entries, each cut to the column budget. When the area is too short for
//! every entry, the list ends early with a `...` line.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::core::document::Link;
use crate::tui::component::Component;
use crate::tui::components::article_view::option_list;
use crate::tui::layout::TRUNCATION_MARKER;

pub struct DisambiguationView<'a> {
    pub title: &'a str,
    pub entries: &'a [Link],
}

impl<'a> DisambiguationView<'a> {
    pub fn new(title: &'a str, entries: &'a [Link]) -> Self {
        Self { title, entries }
    }
}

impl Component for DisambiguationView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let columns = frame.area().width;
        let mut lines = vec![
            Line::from(format!(
                "  Articles associated with the title '{}':",
                self.title
            )),
            Line::default(),
        ];
        let room = (area.height as usize).saturating_sub(lines.len());
        if self.entries.len() <= room {
            lines.extend(option_list(self.entries, self.entries.len(), columns));
        } else if room > 0 {
            lines.extend(option_list(self.entries, room - 1, columns));
            lines.push(Line::from(format!("  {TRUNCATION_MARKER}")));
        }
        frame.render_widget(Paragraph::new(lines), area);
    }
}
