//! Main menu widget

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget, Wrap},
};

use crate::app::MENU_ITEMS;
use crate::ui::layout::menu_layout;
use crate::ui::theme::DossierTheme;

/// Warning shown above the menu
pub const BANNER: &str = "THIS IS A FEDERAL LAW ENFORCEMENT SYSTEM. \
Unauthorized access, use, or modification of this system or of data contained \
herein, or in transit to or from this system, is prohibited. \
All activity is logged and may be monitored.";

/// Banner and menu items
pub struct MenuWidget<'a> {
    selected: usize,
    theme: &'a DossierTheme,
}

impl<'a> MenuWidget<'a> {
    pub fn new(theme: &'a DossierTheme) -> Self {
        Self { selected: 0, theme }
    }

    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }
}

impl Widget for MenuWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (banner_area, list_area) = menu_layout(area);

        let banner = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(BANNER, self.theme.warning_style())),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        banner.render(banner_area, buf);

        let items: Vec<ListItem> = MENU_ITEMS
            .iter()
            .map(|item| ListItem::new(Line::from(format!("  {item}"))))
            .collect();

        let block = Block::default()
            .title(Span::styled(" Main Menu ", self.theme.title_style(true)))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(true));

        let list = List::new(items)
            .block(block)
            .style(self.theme.text_style())
            .highlight_style(self.theme.highlight_style());

        let mut state = ListState::default().with_selected(Some(self.selected));
        StatefulWidget::render(list, list_area, buf, &mut state);
    }
}
