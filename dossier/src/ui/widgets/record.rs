//! Record detail widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::details::RecordDetails;
use crate::ui::theme::DossierTheme;

/// Full view of one record, scrollable
pub struct RecordWidget<'a> {
    details: &'a RecordDetails<'a>,
    title: &'a str,
    scroll: u16,
    theme: &'a DossierTheme,
}

impl<'a> RecordWidget<'a> {
    pub fn new(details: &'a RecordDetails<'a>, theme: &'a DossierTheme) -> Self {
        Self {
            details,
            title: "",
            scroll: 0,
            theme,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn scroll(mut self, scroll: u16) -> Self {
        self.scroll = scroll;
        self
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let mut lines = Vec::new();

        if let Some(warning) = self.details.warning {
            lines.push(Line::from(Span::styled(
                format!(" NOTE {warning} "),
                self.theme.warning_style(),
            )));
            lines.push(Line::from(""));
        }

        if self.details.legacy {
            lines.push(Line::from(Span::styled(
                "Legacy Record  Consult physical original",
                self.theme.legacy_style(),
            )));
            lines.push(Line::from(""));
        }

        for (label, value) in &self.details.fields {
            lines.push(Line::from(vec![
                Span::styled(format!("{label:<20}"), self.theme.label_style()),
                Span::styled(value.clone(), self.theme.text_style()),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Notes", self.theme.label_style())));
        for note in self.details.notes.lines() {
            lines.push(Line::from(note));
        }
        lines
    }
}

impl Widget for RecordWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(format!(" {} ", self.title), self.theme.title_style(true)))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(true));

        let inner_height = block.inner(area).height;
        let lines = self.lines();

        // Don't scroll past the last screenful
        let max_scroll = (lines.len() as u16).saturating_sub(inner_height);
        let scroll = self.scroll.min(max_scroll);

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .render(area, buf);
    }
}
