//! # CommandBar Component
//!
//! The two bottom rows listing every single-key command:
//!
//! ```text
//!   N Next Page        P Previous Page    B Back             G Go To
//!   O Open in Browser  U Copy URL         T Copy Text        Q Quit
//! ```
//!
//! Each cell is a quarter of `columns - 4` wide. A label that doesn't fit
//! is cut and ends in `...`; the key letter always survives. Cells are
//! padded to full width except the last one in a row.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::tui::component::Component;
use crate::tui::layout::{MARGIN, TRUNCATION_MARKER};

const ROWS: [[(char, &str); 4]; 2] = [
    [
        ('N', "Next Page"),
        ('P', "Previous Page"),
        ('B', "Back"),
        ('G', "Go To"),
    ],
    [
        ('O', "Open in Browser"),
        ('U', "Copy URL"),
        ('T', "Copy Text"),
        ('Q', "Quit"),
    ],
];

pub struct CommandBar;

/// Width of one command cell for a viewport `columns` wide.
pub fn cell_width(columns: u16) -> usize {
    (columns as usize).saturating_sub(4) / 4
}

/// The text after the key letter, fitted to a cell of `width` columns.
///
/// Returns `" Next Page"` or `" Next..."`, padded when `pad` is set; empty
/// when only the key letter fits.
pub fn fit_label(label: &str, width: usize, pad: bool) -> String {
    let room = width.saturating_sub(1);
    let mut text = format!(" {label}");
    if text.width() > room {
        let keep = room.saturating_sub(TRUNCATION_MARKER.len());
        let cut: String = text.chars().take(keep).collect();
        let cut = cut.trim_end();
        if cut.is_empty() {
            return String::new();
        }
        text = format!("{cut}{TRUNCATION_MARKER}");
    }
    if pad {
        format!("{text:<room$}")
    } else {
        text
    }
}

impl Component for CommandBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = cell_width(area.width);
        let key_style = Style::default().fg(Color::Black).bg(Color::White);
        let margin = " ".repeat(MARGIN as usize);

        let lines: Vec<Line> = ROWS
            .iter()
            .map(|row| {
                let mut spans = vec![Span::raw(margin.clone())];
                for (i, (key, label)) in row.iter().enumerate() {
                    let last = i == row.len() - 1;
                    spans.push(Span::styled(key.to_string(), key_style));
                    spans.push(Span::raw(fit_label(label, width, !last)));
                }
                Line::from(spans)
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), area);
    }
}
