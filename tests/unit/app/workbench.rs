use super::*;
use crate::kernel::services::adapters::MemoryFileService;
use crate::kernel::FocusTarget;
use crate::models::{FileRecord, RecordId};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::time::Duration;

fn seeded(id: &str, name: &str, content: &str) -> FileRecord {
    let mut record = FileRecord::new_file(name);
    record.id = RecordId::new(id);
    record.set_content(content.to_string());
    record
}

fn settings() -> Settings {
    let mut settings = Settings::default();
    settings.editor.content_debounce_ms = 0;
    settings
}

fn workbench(remote: Arc<MemoryFileService>) -> Workbench {
    let mut wb = Workbench::new(remote, &settings()).unwrap();
    wait_until(&mut wb, |wb| !wb.store().state().files.loading);
    wb
}

fn wait_until(wb: &mut Workbench, cond: impl Fn(&Workbench) -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !cond(wb) {
        assert!(Instant::now() < deadline, "condition not reached in time");
        wb.tick(Instant::now());
        std::thread::sleep(Duration::from_millis(5));
    }
}

fn press(wb: &mut Workbench, code: KeyCode) -> EventResult {
    wb.handle_key(KeyEvent::new(code, KeyModifiers::NONE), Instant::now())
}

fn ctrl(wb: &mut Workbench, ch: char) -> EventResult {
    wb.handle_key(
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL),
        Instant::now(),
    )
}

fn type_text(wb: &mut Workbench, text: &str) {
    for ch in text.chars() {
        press(wb, KeyCode::Char(ch));
    }
}

#[test]
fn startup_fetches_remote_records() {
    let remote = Arc::new(MemoryFileService::with_records(vec![
        seeded("a", "a.txt", "x"),
        seeded("b", "b.txt", "y"),
    ]));
    let wb = workbench(remote);

    assert_eq!(wb.store().state().files.file_items.len(), 2);
    assert_eq!(wb.tree_view().rows().len(), 2);
}

#[test]
fn startup_fetch_failure_becomes_notification() {
    let remote = Arc::new(MemoryFileService::new());
    remote.set_fail_reads(true);
    let wb = workbench(remote);

    let files = &wb.store().state().files;
    assert!(files.file_items.is_empty());
    assert_eq!(files.notifications.len(), 1);
}

#[test]
fn enter_opens_file_in_editor() {
    let remote = Arc::new(MemoryFileService::with_records(vec![seeded("a", "a.txt", "hello")]));
    let mut wb = workbench(remote);

    assert_eq!(press(&mut wb, KeyCode::Enter), EventResult::Consumed);

    let state = wb.store().state();
    assert_eq!(state.files.selected_file_id, Some(RecordId::new("a")));
    assert_eq!(state.files.open_tabs, vec![RecordId::new("a")]);
    assert_eq!(state.ui.focus, FocusTarget::Editor);
    assert_eq!(wb.editor_view().text(), "hello");
}

#[test]
fn new_file_prompt_creates_through_remote() {
    let remote = Arc::new(MemoryFileService::new());
    let mut wb = workbench(remote.clone());

    press(&mut wb, KeyCode::Char('n'));
    type_text(&mut wb, "notes.md");
    press(&mut wb, KeyCode::Enter);
    assert!(wb.tree_view().prompt().is_none());

    wait_until(&mut wb, |wb| !wb.store().state().files.file_items.is_empty());
    assert_eq!(wb.store().state().files.file_items[0].name, "notes.md");
    assert_eq!(remote.snapshot().len(), 1);
    assert_eq!(wb.tree_view().rows()[0].name, "notes.md");
}

#[test]
fn typing_flushes_into_store_and_ctrl_s_saves() {
    let remote = Arc::new(MemoryFileService::with_records(vec![seeded("a", "a.txt", "")]));
    let mut wb = workbench(remote.clone());
    press(&mut wb, KeyCode::Enter);

    type_text(&mut wb, "hi");
    wb.tick(Instant::now() + Duration::from_millis(1));
    let content = |wb: &Workbench| {
        wb.store()
            .state()
            .files
            .record(&RecordId::new("a"))
            .and_then(|r| r.content().map(str::to_string))
    };
    assert_eq!(content(&wb).as_deref(), Some("hi"));
    assert_eq!(remote.snapshot()[0].content(), Some(""));

    assert_eq!(ctrl(&mut wb, 's'), EventResult::Consumed);
    wait_until(&mut wb, |_| remote.snapshot()[0].content() == Some("hi"));
}

#[test]
fn rename_prompt_renames_remote_record() {
    let remote = Arc::new(MemoryFileService::with_records(vec![seeded("a", "a.txt", "")]));
    let mut wb = workbench(remote.clone());

    press(&mut wb, KeyCode::Char('r'));
    for _ in 0.."txt".len() {
        press(&mut wb, KeyCode::Backspace);
    }
    type_text(&mut wb, "md");
    press(&mut wb, KeyCode::Enter);

    assert_eq!(wb.store().state().files.file_items[0].name, "a.md");
    wait_until(&mut wb, |wb| wb.store().state().files.pending_renames.is_empty());
    assert_eq!(remote.snapshot()[0].name, "a.md");
}

#[test]
fn rejected_rename_is_rolled_back() {
    let remote = Arc::new(MemoryFileService::with_records(vec![seeded("a", "a.txt", "")]));
    let mut wb = workbench(remote.clone());
    remote.set_fail_writes(true);

    press(&mut wb, KeyCode::F(2));
    type_text(&mut wb, "x");
    press(&mut wb, KeyCode::Enter);

    wait_until(&mut wb, |wb| !wb.store().state().files.notifications.is_empty());
    assert_eq!(wb.store().state().files.file_items[0].name, "a.txt");
    assert_eq!(wb.tree_view().rows()[0].name, "a.txt");
}

#[test]
fn ctrl_w_closes_tab_and_esc_returns_focus() {
    let remote = Arc::new(MemoryFileService::with_records(vec![seeded("a", "a.txt", "")]));
    let mut wb = workbench(remote);
    press(&mut wb, KeyCode::Enter);

    ctrl(&mut wb, 'w');
    assert!(wb.store().state().files.open_tabs.is_empty());

    press(&mut wb, KeyCode::Esc);
    assert_eq!(wb.focus(), FocusTarget::Explorer);
}

#[test]
fn ctrl_q_quits() {
    let mut wb = workbench(Arc::new(MemoryFileService::new()));
    assert_eq!(ctrl(&mut wb, 'q'), EventResult::Quit);
}

#[test]
fn render_draws_tree_and_editor() {
    let remote = Arc::new(MemoryFileService::with_records(vec![seeded("a", "a.txt", "hello")]));
    let mut wb = workbench(remote);
    press(&mut wb, KeyCode::Enter);

    let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            wb.render(frame, area);
        })
        .unwrap();

    let screen: String = terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|cell| cell.symbol())
        .collect();
    assert!(screen.contains("Project"));
    assert!(screen.contains("a.txt"));
    assert!(screen.contains("hello"));
}

#[test]
fn tab_cycle_after_closing_selected_tab_starts_at_first() {
    let remote = Arc::new(MemoryFileService::with_records(vec![
        seeded("a", "a.txt", ""),
        seeded("b", "b.txt", ""),
        seeded("c", "c.txt", ""),
    ]));
    let mut wb = workbench(remote);
    for id in ["a", "b", "c"] {
        wb.dispatch(Action::Select(RecordId::new(id)));
    }
    ctrl(&mut wb, 'w');
    assert_eq!(
        wb.store().state().files.open_tabs,
        vec![RecordId::new("a"), RecordId::new("b")]
    );

    wb.handle_key(
        KeyEvent::new(KeyCode::PageDown, KeyModifiers::CONTROL),
        Instant::now(),
    );
    assert_eq!(
        wb.store().state().files.selected_file_id,
        Some(RecordId::new("a"))
    );
}

#[test]
fn tab_cycle_backwards_from_closed_selection_picks_last() {
    let remote = Arc::new(MemoryFileService::with_records(vec![
        seeded("a", "a.txt", ""),
        seeded("b", "b.txt", ""),
        seeded("c", "c.txt", ""),
    ]));
    let mut wb = workbench(remote);
    for id in ["a", "b", "c"] {
        wb.dispatch(Action::Select(RecordId::new(id)));
    }
    ctrl(&mut wb, 'w');

    wb.handle_key(
        KeyEvent::new(KeyCode::PageUp, KeyModifiers::CONTROL),
        Instant::now(),
    );
    assert_eq!(
        wb.store().state().files.selected_file_id,
        Some(RecordId::new("b"))
    );
}
