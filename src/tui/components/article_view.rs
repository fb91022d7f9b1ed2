//! # ArticleView Component
//!
//! One paragraph of prose plus its numbered options, as decided by the
//! layout engine. Link text inside the paragraph is highlighted.
//!
//! ```text
//!   Go is an abstract strategy board game for two
//!   players in which the aim is to fence off more
//!   territory than the opponent.
//!
//!   (1) Other uses of Go (disambiguation)
//!   (2) abstract strategy
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::document::Link;
use crate::tui::component::Component;
use crate::tui::layout::{self, TRUNCATION_MARKER, TextLine};

pub fn link_style() -> Style {
    Style::default()
        .fg(Color::Blue)
        .add_modifier(Modifier::UNDERLINED)
}

pub struct ArticleView<'a> {
    pub text: &'a str,
    pub options: &'a [Link],
}

impl<'a> ArticleView<'a> {
    pub fn new(text: &'a str, options: &'a [Link]) -> Self {
        Self { text, options }
    }
}

fn styled_line(line: &TextLine) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    let mut at = 0;
    for range in &line.highlights {
        if range.start > at {
            spans.push(Span::raw(line.text[at..range.start].to_string()));
        }
        spans.push(Span::styled(
            line.text[range.clone()].to_string(),
            link_style(),
        ));
        at = range.end;
    }
    if at < line.text.len() {
        spans.push(Span::raw(line.text[at..].to_string()));
    }
    Line::from(spans)
}

/// `  (n) text` lines for the first `count` options.
pub fn option_list(options: &[Link], count: usize, columns: u16) -> Vec<Line<'static>> {
    layout::option_lines(options, count, columns)
        .into_iter()
        .map(|(label, text)| Line::from(format!("  {label} {text}")))
        .collect()
}

impl Component for ArticleView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let viewport = frame.area().as_size();
        let laid_out = layout::layout_paragraph(self.text, self.options, viewport);

        let mut lines: Vec<Line> = laid_out.lines.iter().map(styled_line).collect();
        if laid_out.truncated {
            lines.push(Line::from(format!("  {TRUNCATION_MARKER}")));
        }
        if laid_out.visible_options > 0 {
            lines.push(Line::default());
            lines.extend(option_list(
                self.options,
                laid_out.visible_options,
                viewport.width,
            ));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_rows;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::{Constraint, Layout};

    /// Renders below a 3-row header, leaving the bottom 4 rows free, the
    /// way the full screen does.
    fn render(width: u16, height: u16, text: &str, options: &[Link]) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| {
                let [_, body, _] = Layout::vertical([
                    Constraint::Length(3),
                    Constraint::Min(0),
                    Constraint::Length(4),
                ])
                .areas(f.area());
                ArticleView::new(text, options).render(f, body);
            })
            .unwrap();
        buffer_rows(terminal.backend().buffer())
    }

    fn links(n: usize) -> Vec<Link> {
        (0..n)
            .map(|i| Link::new(format!("/wiki/L{i}"), format!("link{i}")))
            .collect()
    }

    #[test]
    fn test_text_then_numbered_options() {
        let options = links(2);
        let rows = render(40, 20, "See link0 and link1.", &options);
        assert_eq!(rows[3], "  See link0 and link1.");
        assert_eq!(rows[4], "");
        assert_eq!(rows[5], "  (1) link0");
        assert_eq!(rows[6], "  (2) link1");
    }

    #[test]
    fn test_tenth_option_is_numbered_zero() {
        let options = links(10);
        let rows = render(60, 30, "Short.", &options);
        assert_eq!(rows[5], "  (1) link0");
        assert_eq!(rows[14], "  (0) link9");
    }

    #[test]
    fn test_links_are_highlighted() {
        let options = vec![Link::new("/wiki/Board_game", "board game")];
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal
            .draw(|f| ArticleView::new("A board game.", &options).render(f, f.area()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(2, 0)].fg, Color::Reset);
        assert_eq!(buffer[(4, 0)].symbol(), "b");
        assert_eq!(buffer[(4, 0)].fg, Color::Blue);
        assert_eq!(buffer[(13, 0)].fg, Color::Blue);
        assert_eq!(buffer[(14, 0)].fg, Color::Reset);
    }

    #[test]
    fn test_overflowing_text_is_cut_without_options() {
        let text = "word ".repeat(200);
        let rows = render(20, 12, &text, &links(3));
        // 12 rows leave 4 for text: 3 lines and the marker.
        assert_eq!(rows[3], "  word word word");
        assert_eq!(rows[6], "  ...");
        assert!(rows.iter().all(|r| !r.contains("(1)")));
    }
}
