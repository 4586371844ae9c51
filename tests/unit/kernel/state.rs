use super::*;

fn folder(id: &str) -> FileRecord {
    let mut record = FileRecord::new_folder(id);
    record.id = RecordId::new(id);
    record
}

fn file(id: &str, content: &str) -> FileRecord {
    let mut record = FileRecord::new_file(id);
    record.id = RecordId::new(id);
    record.set_content(content.to_string());
    record
}

#[test]
fn selected_content_falls_back_to_empty() {
    let mut files = FilesState::with_records(vec![file("a", "hello"), folder("d")]);
    assert_eq!(files.selected_content(), "");

    files.selected_file_id = Some(RecordId::new("a"));
    assert_eq!(files.selected_content(), "hello");

    files.selected_file_id = Some(RecordId::new("d"));
    assert_eq!(files.selected_content(), "");

    files.selected_file_id = Some(RecordId::new("gone"));
    assert_eq!(files.selected_content(), "");
    assert!(files.selected_record().is_none());
}

#[test]
fn record_mut_reports_missing_ids() {
    let mut files = FilesState::default();
    let err = files.record_mut(&RecordId::new("x")).unwrap_err();
    assert_eq!(err, StoreError::NotFoundLocal(RecordId::new("x")));
}

#[test]
fn insert_record_links_into_parent_folder() {
    let mut files = FilesState::with_records(vec![folder("src")]);
    let child = file("main", "").with_parent(Some(RecordId::new("src")));

    assert!(files.insert_record(child));
    assert_eq!(files.file_items.len(), 2);
    assert_eq!(
        files.record(&RecordId::new("src")).unwrap().children(),
        &[RecordId::new("main")]
    );
    assert_eq!(files.version, 1);
}

#[test]
fn insert_record_skips_duplicate_ids() {
    let mut files = FilesState::with_records(vec![file("a", "one")]);

    assert!(!files.insert_record(file("a", "two")));
    assert_eq!(files.file_items.len(), 1);
    assert_eq!(files.record(&RecordId::new("a")).unwrap().content(), Some("one"));
    assert_eq!(files.version, 0);
}

#[test]
fn insert_record_with_missing_parent_still_inserts() {
    let mut files = FilesState::default();
    let orphan = file("a", "").with_parent(Some(RecordId::new("nowhere")));

    assert!(files.insert_record(orphan));
    assert_eq!(files.file_items.len(), 1);
}

#[test]
fn notifications_are_bounded() {
    let mut files = FilesState::default();
    for i in 0..(MAX_NOTIFICATIONS + 5) {
        files.notify(NotificationLevel::Info, format!("n{i}"));
    }

    assert_eq!(files.notifications.len(), MAX_NOTIFICATIONS);
    assert_eq!(files.notifications.front().unwrap().message, "n5");
    assert_eq!(
        files.notifications.back().unwrap().message,
        format!("n{}", MAX_NOTIFICATIONS + 4)
    );
}

#[test]
fn app_state_starts_with_explorer_focus() {
    let state = AppState::new(FilesState::default());
    assert_eq!(state.ui.focus, FocusTarget::Explorer);
    assert!(!state.files.loading);
    assert!(state.files.open_tabs.is_empty());
}
