use super::*;
use crate::models::{FileRecord, RecordKind};

fn file(id: &str) -> FileRecord {
    FileRecord {
        id: RecordId::new(id),
        name: id.to_string(),
        kind: RecordKind::File {
            content: String::new(),
        },
        parent_id: None,
    }
}

fn folder(id: &str, children: &[&str]) -> FileRecord {
    FileRecord {
        id: RecordId::new(id),
        name: id.to_string(),
        kind: RecordKind::Folder {
            children: children.iter().map(|c| RecordId::new(*c)).collect(),
        },
        parent_id: None,
    }
}

fn synced(records: Vec<FileRecord>) -> (TreeView, FilesState) {
    let files = FilesState::with_records(records);
    let mut view = TreeView::new();
    assert!(view.sync(&files));
    (view, files)
}

fn row_names(view: &TreeView) -> Vec<&str> {
    view.rows().iter().map(|r| r.name.as_str()).collect()
}

fn cursor_id(view: &TreeView) -> RecordId {
    view.cursor_row().unwrap().record_id.clone()
}

#[test]
fn sync_only_rebuilds_on_version_change() {
    let (mut view, mut files) = synced(vec![file("a")]);
    assert!(!view.sync(&files));

    files.file_items.push(file("b"));
    files.version += 1;
    assert!(view.sync(&files));
    assert_eq!(row_names(&view), vec!["a", "b"]);
}

#[test]
fn cursor_follows_its_record_across_rebuilds() {
    let (mut view, mut files) = synced(vec![file("b"), file("c")]);
    view.move_cursor(1);
    assert_eq!(cursor_id(&view), RecordId::new("c"));

    files.file_items.push(file("a"));
    files.version += 1;
    view.sync(&files);

    assert_eq!(row_names(&view), vec!["a", "b", "c"]);
    assert_eq!(cursor_id(&view), RecordId::new("c"));
}

#[test]
fn move_cursor_clamps_at_edges() {
    let (mut view, _files) = synced(vec![file("a"), file("b")]);

    assert!(!view.move_cursor(-1));
    assert!(view.move_cursor(5));
    assert_eq!(view.cursor(), 1);
    assert!(!view.move_cursor(1));
}

#[test]
fn activate_file_selects_it() {
    let (mut view, _files) = synced(vec![file("a")]);
    assert_eq!(view.activate(), Some(Action::Select(RecordId::new("a"))));
}

#[test]
fn activate_folder_toggles_and_selects() {
    let (mut view, _files) = synced(vec![folder("d", &["x"]), file("x")]);
    assert_eq!(row_names(&view), vec!["d"]);

    assert_eq!(view.activate(), Some(Action::Select(RecordId::new("d"))));
    assert_eq!(row_names(&view), vec!["d", "x"]);

    view.activate();
    assert_eq!(row_names(&view), vec!["d"]);
}

#[test]
fn activate_on_empty_tree_does_nothing() {
    let (mut view, _files) = synced(Vec::new());
    assert_eq!(view.activate(), None);
}

#[test]
fn collapse_on_child_moves_to_parent() {
    let (mut view, _files) = synced(vec![folder("d", &["x"]), file("x")]);
    assert!(view.expand_selected());
    view.move_cursor(1);
    assert_eq!(cursor_id(&view), RecordId::new("x"));

    assert!(view.collapse_selected());
    assert_eq!(cursor_id(&view), RecordId::new("d"));
    assert!(view.collapse_selected());
    assert_eq!(row_names(&view), vec!["d"]);
    assert!(!view.collapse_selected());
}

#[test]
fn move_cursor_to_reveals_nested_record() {
    let (mut view, _files) = synced(vec![folder("d", &["e"]), folder("e", &["x"]), file("x")]);

    assert!(view.move_cursor_to(&RecordId::new("x")));
    assert_eq!(row_names(&view), vec!["d", "e", "x"]);
    assert_eq!(view.cursor(), 2);
}

#[test]
fn new_file_prompt_targets_folder_under_cursor() {
    let (mut view, _files) = synced(vec![folder("d", &[]), file("a")]);

    assert!(view.begin_new_file());
    for ch in "notes.md".chars() {
        view.prompt_insert(ch);
    }
    assert_eq!(view.prompt().unwrap().kind, PromptKind::NewFile);

    let action = view.commit_prompt();
    assert_eq!(
        action,
        Some(Action::CreateFile {
            name: "notes.md".to_string(),
            parent: Some(RecordId::new("d")),
        })
    );
    assert!(view.prompt().is_none());
    assert!(view.tree().is_expanded(&RecordId::new("d")));
}

#[test]
fn new_folder_on_top_level_file_has_no_parent() {
    let (mut view, _files) = synced(vec![file("a")]);

    view.begin_new_folder();
    view.prompt_insert('x');
    assert_eq!(
        view.commit_prompt(),
        Some(Action::CreateFolder {
            name: "x".to_string(),
            parent: None,
        })
    );
}

#[test]
fn new_file_inside_nested_file_uses_its_parent() {
    let (mut view, _files) = synced(vec![folder("d", &["x"]), file("x")]);
    view.expand_selected();
    view.move_cursor(1);

    assert_eq!(view.creation_parent(), Some(RecordId::new("d")));
}

#[test]
fn blank_prompt_commits_nothing() {
    let (mut view, _files) = synced(vec![file("a")]);
    view.begin_new_file();
    view.prompt_insert(' ');

    assert_eq!(view.commit_prompt(), None);
    assert!(view.prompt().is_none());
}

#[test]
fn rename_prompt_is_prefilled() {
    let (mut view, _files) = synced(vec![file("old.txt")]);
    assert!(view.begin_rename());
    assert_eq!(view.prompt().unwrap().input, "old.txt");

    for _ in 0..3 {
        view.prompt_backspace();
    }
    for ch in "md".chars() {
        view.prompt_insert(ch);
    }
    assert_eq!(
        view.commit_prompt(),
        Some(Action::Rename {
            id: RecordId::new("old.txt"),
            name: "old.md".to_string(),
        })
    );
}

#[test]
fn prompt_rejects_control_chars_and_cancels() {
    let (mut view, _files) = synced(vec![file("a")]);
    assert!(!view.prompt_insert('x'));

    view.begin_new_file();
    assert!(!view.prompt_insert('\n'));
    assert!(view.prompt_insert('x'));
    assert!(view.cancel_prompt());
    assert!(!view.cancel_prompt());
}

#[test]
fn scroll_keeps_cursor_visible() {
    let records: Vec<FileRecord> = (0..10).map(|i| file(&format!("f{i}"))).collect();
    let (mut view, _files) = synced(records);
    view.set_view_height(3);

    view.move_cursor(5);
    assert_eq!(view.scroll_offset(), 3);
    view.move_cursor(-5);
    assert_eq!(view.scroll_offset(), 0);
    assert!(view.select_row(9));
    assert_eq!(view.scroll_offset(), 7);
}
