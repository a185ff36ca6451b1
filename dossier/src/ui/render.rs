//! Render orchestration for the dossier TUI

use ratatui::{layout::Rect, Frame};

use crate::app::{App, View};
use crate::details::RecordDetails;
use crate::ui::layout::{centered_rect, centered_rect_fixed, AppLayout};
use crate::ui::widgets::{
    screen_name, EventsWidget, HotkeyBarWidget, InputWidget, MenuBarWidget, MenuWidget,
    MessageWidget, RecordWidget, RelatedWidget, ResultsWidget, StatusBarWidget,
};

/// Main render function
pub fn render(frame: &mut Frame, app: &App<'_>) {
    let area = frame.area();
    let layout = AppLayout::calculate(area);

    frame.render_widget(MenuBarWidget::new(&app.theme), layout.menu_bar);

    render_content(frame, app, layout.content_area);

    let status = StatusBarWidget::new(screen_name(app.view()), &app.theme)
        .message(app.status_message());
    frame.render_widget(status, layout.status_bar);

    frame.render_widget(HotkeyBarWidget::new(app.view(), &app.theme), layout.hotkey_bar);

    // Message box goes on top of everything
    if let Some(message) = app.message() {
        let popup_area = centered_rect(60, 40, area);
        frame.render_widget(MessageWidget::new(message, &app.theme), popup_area);
    }
}

/// Render the screen on top of the view stack
fn render_content(frame: &mut Frame, app: &App<'_>, area: Rect) {
    match app.view() {
        View::Menu { selected } => {
            frame.render_widget(MenuWidget::new(&app.theme).selected(*selected), area);
        }
        View::Search => {
            let input_area = centered_rect_fixed(60, 3, area);
            let input = InputWidget::new(app.input_buffer(), &app.theme)
                .cursor_position(app.cursor_position())
                .active(!app.has_message());
            frame.render_widget(input, input_area);
        }
        View::Results {
            selector,
            results,
            selected,
        } => {
            let widget = ResultsWidget::new(results, &app.theme)
                .selector(selector)
                .selected(*selected);
            frame.render_widget(widget, area);
        }
        View::Record { record, scroll } => {
            let details = RecordDetails::new(record, app.session.legacy_cutoff.as_deref());
            let widget = RecordWidget::new(&details, &app.theme)
                .title(&record.id)
                .scroll(*scroll);
            frame.render_widget(widget, area);
        }
        View::Related { record, selected } => {
            let widget = RelatedWidget::new(record, app.engine(), &app.theme).selected(*selected);
            frame.render_widget(widget, area);
        }
        View::Events { record, selected } => {
            frame.render_widget(
                EventsWidget::new(record, &app.theme).selected(*selected),
                area,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::SessionInfo;
    use dossier_core::testing::person;
    use dossier_core::{SearchConfig, SearchEngine};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn buffer_text(buffer: &Buffer) -> String {
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    fn terminal(app: &App<'_>) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
        terminal.draw(|f| render(f, app)).expect("draw");
        terminal
    }

    fn draw(app: &App<'_>) -> String {
        buffer_text(terminal(app).backend().buffer())
    }

    #[test]
    fn test_top_bar_hides_stage_notes() {
        let engine = SearchEngine::new(vec![], SearchConfig::default());
        let session = SessionInfo {
            stage: 3,
            stage_caption: Some("Smith is the killer".to_string()),
            legacy_cutoff: None,
        };
        let app = App::new(&engine, session);

        let terminal = terminal(&app);
        let buffer = terminal.backend().buffer();
        let top: String = (0..buffer.area.width)
            .map(|x| buffer[(x, 0)].symbol())
            .collect();
        assert!(top.contains("LOGGED IN <3204-412-41-C>"));
        assert!(top.contains("Print Screen"));

        let screen = buffer_text(buffer);
        assert!(!screen.contains("Smith is the killer"));
        assert!(!screen.contains("Stage 3"));
    }

    #[test]
    fn test_render_menu() {
        let engine = SearchEngine::new(vec![], SearchConfig::default());
        let app = App::new(&engine, SessionInfo::default());
        let screen = draw(&app);
        assert!(screen.contains("Search Records"));
        assert!(screen.contains("LOG OUT"));
        assert!(screen.contains("FEDERAL LAW ENFORCEMENT"));
    }

    #[test]
    fn test_render_results_and_record() {
        let engine = SearchEngine::new(
            vec![person("Smith", "John").with_address("12 Elm Street")],
            SearchConfig::default(),
        );
        let mut app = App::new(&engine, SessionInfo::default());
        app.select();
        app.set_input("smith");
        app.submit_search();

        let screen = draw(&app);
        assert!(screen.contains("SMITH"));
        assert!(screen.contains("12 Elm Street"));

        app.select();
        let screen = draw(&app);
        assert!(screen.contains("Nationality"));
        assert!(screen.contains("USA"));
    }

    #[test]
    fn test_render_message_box() {
        let engine = SearchEngine::new(vec![], SearchConfig::default());
        let mut app = App::new(&engine, SessionInfo::default());
        app.move_selection(1);
        app.select();
        let screen = draw(&app);
        assert!(screen.contains("ACCESS DENIED"));
    }
}
