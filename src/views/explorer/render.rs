use super::{PromptKind, TreeView};
use crate::app::theme::UiTheme;
use crate::models::{RecordId, TreeRow};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

impl TreeView {
    pub fn contains(&self, x: u16, y: u16) -> bool {
        self.area
            .map(|a| x >= a.x && x < a.x + a.width && y >= a.y && y < a.y + a.height)
            .unwrap_or(false)
    }

    /// Maps a terminal cell to a row index of [`TreeView::rows`].
    pub fn hit_test_row(&self, x: u16, y: u16) -> Option<usize> {
        if !self.contains(x, y) {
            return None;
        }
        let area = self.area?;
        let row = (y - area.y) as usize + self.scroll_offset;
        (row < self.rows.len()).then_some(row)
    }

    fn render_row(
        &self,
        row: &TreeRow,
        is_cursor: bool,
        is_selected: bool,
        theme: &UiTheme,
    ) -> Line<'static> {
        let indent = "  ".repeat(row.depth as usize);
        let icon = if row.is_folder {
            if row.is_expanded {
                "▼ "
            } else {
                "▶ "
            }
        } else {
            "  "
        };
        let text = format!("{}{}{}", indent, icon, row.name);

        let mut style = if is_cursor {
            Style::default().bg(theme.selected_bg).fg(theme.selected_fg)
        } else if row.is_folder {
            Style::default().fg(theme.accent_fg)
        } else {
            Style::default().fg(theme.fg)
        };
        if is_selected {
            style = style.add_modifier(Modifier::BOLD);
        }

        Line::from(Span::styled(text, style))
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        selected: Option<&RecordId>,
        focused: bool,
        theme: &UiTheme,
    ) {
        let border = if focused {
            theme.focus_border
        } else {
            theme.inactive_border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Span::styled("Project", Style::default().fg(theme.header_fg)));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let prompt_height = u16::from(self.prompt.is_some());
        let list_area = Rect {
            height: inner.height.saturating_sub(prompt_height),
            ..inner
        };
        self.area = Some(list_area);
        self.set_view_height(list_area.height as usize);

        let visible_end = (self.scroll_offset + list_area.height as usize).min(self.rows.len());
        let start = self.scroll_offset.min(visible_end);
        let lines: Vec<Line> = self.rows[start..visible_end]
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let is_cursor = focused && start + i == self.cursor;
                let is_selected = selected == Some(&row.record_id);
                self.render_row(row, is_cursor, is_selected, theme)
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), list_area);

        if let Some(prompt) = &self.prompt {
            let label = match prompt.kind {
                PromptKind::NewFile => "new file: ",
                PromptKind::NewFolder => "new folder: ",
                PromptKind::Rename => "rename: ",
            };
            let prompt_area = Rect {
                y: list_area.y + list_area.height,
                height: 1,
                ..inner
            };
            let line = Line::from(vec![
                Span::styled(label, Style::default().fg(theme.muted_fg)),
                Span::styled(prompt.input.clone(), Style::default().fg(theme.fg)),
            ]);
            frame.render_widget(Paragraph::new(line), prompt_area);
            let input_width = UnicodeWidthStr::width(prompt.input.as_str());
            let cursor_x = (prompt_area.x as usize + label.len() + input_width)
                .min(prompt_area.right().saturating_sub(1) as usize) as u16;
            frame.set_cursor_position((cursor_x, prompt_area.y));
        }
    }
}
