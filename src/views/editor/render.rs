use super::{line_len_chars, EditorView};
use crate::app::theme::UiTheme;
use crate::kernel::FilesState;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthChar;

const TAB_ROW_HEIGHT: u16 = 1;

impl EditorView {
    pub fn contains(&self, x: u16, y: u16) -> bool {
        self.area
            .map(|a| x >= a.x && x < a.x + a.width && y >= a.y && y < a.y + a.height)
            .unwrap_or(false)
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        files: &FilesState,
        focused: bool,
        theme: &UiTheme,
    ) {
        let border = if focused {
            theme.focus_border
        } else {
            theme.inactive_border
        };
        let title = match self.viewing.as_ref().and_then(|id| files.record(id)) {
            Some(record) if self.is_dirty() => format!("{} ●", record.name),
            Some(record) => record.name.clone(),
            None => "Editor".to_string(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Span::styled(title, Style::default().fg(theme.header_fg)));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.area = Some(inner);

        let tab_area = Rect {
            height: TAB_ROW_HEIGHT.min(inner.height),
            ..inner
        };
        frame.render_widget(Paragraph::new(self.tab_line(files, theme)), tab_area);

        let text_area = Rect {
            y: inner.y + tab_area.height,
            height: inner.height.saturating_sub(tab_area.height),
            ..inner
        };
        if text_area.height == 0 {
            return;
        }

        if self.viewing.is_none() || !self.editable {
            let message = match files.selected_record() {
                Some(record) if record.is_folder() => format!("{} is a folder", record.name),
                _ => "No file selected".to_string(),
            };
            frame.render_widget(
                Paragraph::new(Span::styled(message, Style::default().fg(theme.muted_fg))),
                text_area,
            );
            return;
        }

        self.scroll_to_cursor(text_area.height as usize);
        let gutter = if self.show_line_numbers {
            self.line_count().to_string().len() + 1
        } else {
            0
        };

        let end = (self.scroll_row + text_area.height as usize).min(self.line_count());
        let lines: Vec<Line> = (self.scroll_row..end)
            .map(|row| {
                let slice = self.rope.line(row);
                let len = line_len_chars(slice);
                let text = expand_tabs(slice.chars().take(len), self.tab_size);
                let mut spans = Vec::with_capacity(2);
                if self.show_line_numbers {
                    spans.push(Span::styled(
                        format!("{:>width$} ", row + 1, width = gutter - 1),
                        Style::default().fg(theme.line_number_fg),
                    ));
                }
                spans.push(Span::styled(text, Style::default().fg(theme.fg)));
                Line::from(spans)
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), text_area);

        if focused {
            let (row, col) = self.cursor;
            let prefix = self.rope.line(row).chars().take(col);
            let x = text_area.x as usize + gutter + display_width(prefix, self.tab_size);
            let y = text_area.y as usize + row.saturating_sub(self.scroll_row);
            let x = x.min(text_area.right().saturating_sub(1) as usize) as u16;
            frame.set_cursor_position((x, y as u16));
        }
    }

    fn tab_line(&self, files: &FilesState, theme: &UiTheme) -> Line<'static> {
        let mut spans = Vec::new();
        for id in &files.open_tabs {
            let Some(record) = files.record(id) else {
                continue;
            };
            let style = if files.selected_file_id.as_ref() == Some(id) {
                Style::default()
                    .fg(theme.selected_fg)
                    .bg(theme.selected_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.muted_fg)
            };
            spans.push(Span::styled(format!(" {} ", record.name), style));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }
}

fn expand_tabs(chars: impl Iterator<Item = char>, tab_size: u8) -> String {
    let mut out = String::new();
    for ch in chars {
        if ch == '\t' {
            out.extend(std::iter::repeat(' ').take(tab_size as usize));
        } else {
            out.push(ch);
        }
    }
    out
}

fn display_width(chars: impl Iterator<Item = char>, tab_size: u8) -> usize {
    chars
        .map(|ch| {
            if ch == '\t' {
                tab_size as usize
            } else {
                ch.width().unwrap_or(0)
            }
        })
        .sum()
}
