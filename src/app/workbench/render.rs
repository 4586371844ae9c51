use super::Workbench;
use crate::kernel::{FocusTarget, NotificationLevel};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

const HEADER_HEIGHT: u16 = 1;
const STATUS_HEIGHT: u16 = 1;
const MIN_SIDEBAR_WIDTH: u16 = 20;

const KEY_HINTS: &str = concat!(
    "Enter open · n new file · N new folder · r rename · ",
    "Ctrl+S save · Ctrl+R reload · Ctrl+Q quit"
);

fn sidebar_width(total: u16) -> u16 {
    (total / 4).max(MIN_SIDEBAR_WIDTH).min(total / 2)
}

impl Workbench {
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(STATUS_HEIGHT),
            ])
            .split(area);

        self.render_header(frame, chunks[0]);
        self.render_body(frame, chunks[1]);
        self.render_status(frame, chunks[2]);
    }

    fn render_body(&mut self, frame: &mut Frame, area: Rect) {
        let focus = self.store.state().ui.focus;
        let files = &self.store.state().files;

        let editor_area = if self.show_sidebar && area.width > 0 {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(sidebar_width(area.width)), Constraint::Min(0)])
                .split(area);
            self.tree.render(
                frame,
                columns[0],
                files.selected_file_id.as_ref(),
                focus == FocusTarget::Explorer,
                &self.theme,
            );
            columns[1]
        } else {
            area
        };

        self.editor.render(
            frame,
            editor_area,
            files,
            focus == FocusTarget::Editor,
            &self.theme,
        );
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(
                " codeshell ",
                Style::default()
                    .fg(self.theme.header_fg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {}", self.remote_label),
                Style::default().fg(self.theme.muted_fg),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let state = self.store.state();
        let focus = match state.ui.focus {
            FocusTarget::Explorer => "Explorer",
            FocusTarget::Editor => "Editor",
        };

        let mut spans = vec![Span::styled(
            format!(" {} ", focus),
            Style::default()
                .fg(self.theme.selected_fg)
                .bg(self.theme.selected_bg),
        )];
        if state.files.loading {
            spans.push(Span::styled(
                " loading…",
                Style::default().fg(self.theme.muted_fg),
            ));
        }
        if self.editor.is_editable() {
            let (row, col) = self.editor.cursor();
            spans.push(Span::styled(
                format!(" Ln {}, Col {}", row + 1, col + 1),
                Style::default().fg(self.theme.muted_fg),
            ));
        }
        spans.push(Span::raw(" | "));

        // Oldest first; Esc in the tree dismisses it.
        match state.files.notifications.front() {
            Some(notification) => {
                let color = match notification.level {
                    NotificationLevel::Info => self.theme.info_fg,
                    NotificationLevel::Warn => self.theme.warning_fg,
                    NotificationLevel::Error => self.theme.error_fg,
                };
                spans.push(Span::styled(
                    notification.message.clone(),
                    Style::default().fg(color),
                ));
                let more = state.files.notifications.len() - 1;
                if more > 0 {
                    spans.push(Span::styled(
                        format!(" (+{})", more),
                        Style::default().fg(self.theme.muted_fg),
                    ));
                }
            }
            None => spans.push(Span::styled(
                KEY_HINTS,
                Style::default().fg(self.theme.muted_fg),
            )),
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
