//! Related records list widget

use dossier_core::{Record, SearchEngine};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, StatefulWidget, Widget},
};

use crate::ui::theme::DossierTheme;

/// Relations of one record, marked by whether the target is visible
pub struct RelatedWidget<'a> {
    record: &'a Record,
    engine: &'a SearchEngine,
    selected: usize,
    theme: &'a DossierTheme,
}

impl<'a> RelatedWidget<'a> {
    pub fn new(record: &'a Record, engine: &'a SearchEngine, theme: &'a DossierTheme) -> Self {
        Self {
            record,
            engine,
            selected: 0,
            theme,
        }
    }

    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }
}

impl Widget for RelatedWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = self
            .record
            .related
            .iter()
            .map(|relation| {
                let available = self.engine.follow(relation).is_ok();
                let marker = if available { "● " } else { "○ " };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, self.theme.availability_style(available)),
                    Span::raw(relation.caption().to_string()),
                ]))
            })
            .collect();

        let title = format!(" Related to {} ", self.record.id);
        let block = Block::default()
            .title(Span::styled(title, self.theme.title_style(true)))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(true));

        let list = List::new(items)
            .block(block)
            .style(self.theme.text_style())
            .highlight_style(self.theme.highlight_style());

        let mut state = ListState::default().with_selected(Some(self.selected));
        StatefulWidget::render(list, area, buf, &mut state);
    }
}
