//! Search results table widget

use dossier_core::Record;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Block, Borders, Cell, Row, StatefulWidget, Table, TableState, Widget},
};

use crate::ui::theme::DossierTheme;

const HEADERS: [&str; 6] = ["Surname", "Forename", "Date", "Status", "Classifier", "Address"];

/// Table of records matched by a selector
pub struct ResultsWidget<'a> {
    results: &'a [&'a Record],
    selector: &'a str,
    selected: usize,
    theme: &'a DossierTheme,
}

impl<'a> ResultsWidget<'a> {
    pub fn new(results: &'a [&'a Record], theme: &'a DossierTheme) -> Self {
        Self {
            results,
            selector: "",
            selected: 0,
            theme,
        }
    }

    pub fn selector(mut self, selector: &'a str) -> Self {
        self.selector = selector;
        self
    }

    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }
}

fn cell(value: Option<&str>) -> Cell<'_> {
    Cell::from(value.unwrap_or(""))
}

impl Widget for ResultsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let header = Row::new(HEADERS.iter().map(|h| Cell::from(*h)))
            .style(self.theme.label_style())
            .bottom_margin(1);

        let rows = self.results.iter().map(|record| {
            Row::new(vec![
                Cell::from(record.surname.to_uppercase()),
                Cell::from(record.forename.to_uppercase()),
                cell(record.date_of_birth.as_deref()),
                cell(record.status.as_deref()),
                cell(record.classifier.as_deref()),
                cell(record.last_known_address.as_deref()),
            ])
        });

        let widths = [
            Constraint::Percentage(16),
            Constraint::Percentage(16),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Percentage(16),
            Constraint::Fill(1),
        ];

        let title = format!(" {} result(s) for \"{}\" ", self.results.len(), self.selector);
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
