//! Event log table widget

use dossier_core::Record;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Block, Borders, Cell, Row, StatefulWidget, Table, TableState, Widget},
};

use crate::ui::theme::DossierTheme;

pub struct EventsWidget<'a> {
    record: &'a Record,
    selected: usize,
    theme: &'a DossierTheme,
}

impl<'a> EventsWidget<'a> {
    pub fn new(record: &'a Record, theme: &'a DossierTheme) -> Self {
        Self {
            record,
            selected: 0,
            theme,
        }
    }

    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }
}

impl Widget for EventsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let header = Row::new(["ID", "User", "Event"].map(Cell::from))
            .style(self.theme.label_style())
            .bottom_margin(1);

        let rows = self.record.events.iter().map(|entry| {
            Row::new(vec![
                Cell::from(entry.id.as_str()),
                Cell::from(entry.user.as_str()),
                Cell::from(entry.event.as_str()),
            ])
        });

        let widths = [
            Constraint::Length(10),
            Constraint::Length(16),
            Constraint::Fill(1),
        ];

        let title = format!(" Event log: {} ", self.record.id);
        let block = Block::default()
            .title(Span::styled(title, self.theme.title_style(true)))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(true));

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .style(self.theme.text_style())
            .row_highlight_style(self.theme.highlight_style());

        let mut state = TableState::default().with_selected(Some(self.selected));
        StatefulWidget::render(table, area, buf, &mut state);
    }
}
