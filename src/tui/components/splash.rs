//! # Splash Component
//!
//! The banner shown while no document is open, centred in its area.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub const BANNER: &[&str] = &[
    "           _ _    _ _                      ",
    " __      _(_) | _(_) |_ ___ _ __ _ __ ___  ",
    " \\ \\ /\\ / / | |/ / | __/ _ \\ '__| '_ ` _ \\ ",
    "  \\ V  V /| |   <| | ||  __/ |  | | | | | |",
    "   \\_/\\_/ |_|_|\\_\\_|\\__\\___|_|  |_| |_| |_|",
];

pub struct Splash;

impl Component for Splash {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [_, banner_area, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(BANNER.len() as u16),
            Constraint::Fill(1),
        ])
        .areas(area);

        let lines: Vec<Line> = BANNER.iter().map(|l| Line::from(*l)).collect();
        let banner = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::BOLD));
        frame.render_widget(banner, banner_area);
    }
}
