//! Whole-screen composition. Reads `App`, never changes it.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::state::{App, Mode, Position};
use crate::tui::component::Component;
use crate::tui::components::{
    ArticleView, CommandBar, DisambiguationView, PageHeader, PromptLine, Splash,
};
use crate::tui::layout::{COMMAND_BAR_ROWS, HEADER_ROWS};

pub fn draw_ui(frame: &mut Frame, app: &App) {
    use Constraint::{Length, Min};
    let [header_area, body_area, _gap, prompt_area, command_area] = Layout::vertical([
        Length(HEADER_ROWS as u16),
        Min(0),
        Length(1),
        Length(1),
        Length(COMMAND_BAR_ROWS as u16),
    ])
    .areas(frame.area());

    match &app.current {
        Some(position) => {
            PageHeader::new(position).render(frame, header_area);
            draw_page(frame, body_area, position);
        }
        None => {
            let splash_area = Rect::new(
                header_area.x,
                header_area.y,
                header_area.width,
                header_area.height + body_area.height,
            );
            Splash.render(frame, splash_area);
        }
    }

    let prompting = app.mode == Mode::QueryInput;
    if prompting || app.status.is_some() {
        let query = app.query.text();
        PromptLine {
            active: prompting,
            query: &query,
            status: app.status.as_deref(),
        }
        .render(frame, prompt_area);
    }

    CommandBar.render(frame, command_area);
}

fn draw_page(frame: &mut Frame, area: Rect, position: &Position) {
    let options = position.options();
    if position.is_disambiguation() {
        DisambiguationView::new(&position.document.title, &options).render(frame, area);
    } else {
        let text = position.paragraph().map_or("", |p| p.text.as_str());
        ArticleView::new(text, &options).render(frame, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::{article, article_with_links, buffer_rows, disambiguation};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App, width: u16, height: u16) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw_ui(f, app)).unwrap();
        terminal
    }

    fn viewing(document: std::sync::Arc<crate::core::document::Document>) -> App {
        let mut app = App::new();
        app.current = Some(Position::start_of(document));
        app.mode = Mode::Viewing;
        app
    }

    #[test]
    fn test_startup_shows_splash_and_prompt() {
        let app = App::new();
        let terminal = draw(&app, 80, 24);
        let rows = buffer_rows(terminal.backend().buffer());
        assert!(rows.iter().any(|r| r.contains("__      _(_)")));
        assert_eq!(rows[21], "  Go to:");
        assert!(rows[22].starts_with("  N Next Page"));
        assert!(rows[23].starts_with("  O Open in Browser"));
    }

    #[test]
    fn test_article_page() {
        let app = viewing(article_with_links("Go", 2));
        let terminal = draw(&app, 60, 20);
        let rows = buffer_rows(terminal.backend().buffer());
        assert_eq!(rows[1], "  GO  [1/1]");
        assert_eq!(rows[3], "  See Link 0. See Link 1.");
        assert_eq!(rows[5], "  (1) Link 0");
        assert_eq!(rows[6], "  (2) Link 1");
        // no status, not prompting
        assert_eq!(rows[17], "");
    }

    #[test]
    fn test_disambiguation_page() {
        let app = viewing(disambiguation("Mercury", 3));
        let terminal = draw(&app, 60, 20);
        let rows = buffer_rows(terminal.backend().buffer());
        assert_eq!(rows[1], "  MERCURY  [1/1]");
        assert_eq!(rows[3], "  Articles associated with the title 'Mercury':");
        assert_eq!(rows[5], "  (1) Entry 0");
        assert_eq!(rows[7], "  (3) Entry 2");
    }

    #[test]
    fn test_status_shown_while_viewing() {
        let mut app = viewing(article("Go", 2));
        app.status = Some("Article not found.".to_string());
        let terminal = draw(&app, 60, 20);
        let rows = buffer_rows(terminal.backend().buffer());
        assert_eq!(rows[17], "  Article not found.");
    }

    #[test]
    fn test_prompt_over_article_keeps_page() {
        let mut app = viewing(article("Go", 2));
        update(&mut app, Action::Key(b'g'));
        for b in b"chess" {
            update(&mut app, Action::Key(*b));
        }
        let mut terminal = draw(&app, 60, 20);
        let rows = buffer_rows(terminal.backend().buffer());
        assert_eq!(rows[3], "  Go paragraph 1.");
        assert_eq!(rows[17], "  Go to: chess");
        let cursor = terminal.get_cursor_position().unwrap();
        assert_eq!((cursor.x, cursor.y), (14, 17));
    }
}
