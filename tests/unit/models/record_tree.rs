use super::*;

fn file(id: &str, name: &str) -> FileRecord {
    FileRecord {
        id: RecordId::new(id),
        name: name.to_string(),
        kind: crate::models::RecordKind::File {
            content: String::new(),
        },
        parent_id: None,
    }
}

fn folder(id: &str, name: &str, children: &[&str]) -> FileRecord {
    FileRecord {
        id: RecordId::new(id),
        name: name.to_string(),
        kind: crate::models::RecordKind::Folder {
            children: children.iter().map(|c| RecordId::new(*c)).collect(),
        },
        parent_id: None,
    }
}

fn under(mut record: FileRecord, parent: &str) -> FileRecord {
    record.parent_id = Some(RecordId::new(parent));
    record
}

fn names(rows: &[TreeRow]) -> Vec<(&str, u16)> {
    rows.iter().map(|r| (r.name.as_str(), r.depth)).collect()
}

fn id(s: &str) -> RecordId {
    RecordId::new(s)
}

#[test]
fn flat_records_are_all_top_level() {
    let tree = RecordTree::from_records(&[file("a", "a.txt"), file("b", "b.txt")]);

    assert_eq!(tree.len(), 2);
    assert_eq!(tree.top_level(), vec![&id("a"), &id("b")]);
    assert!(tree.issues().is_empty());
}

#[test]
fn folders_sort_before_files_then_by_name() {
    let tree = RecordTree::from_records(&[
        file("z", "zeta.txt"),
        folder("d2", "beta", &[]),
        file("a", "alpha.txt"),
        folder("d1", "alpha", &[]),
    ]);

    let rows = tree.flatten_for_view();
    assert_eq!(
        names(&rows),
        vec![("alpha", 0), ("beta", 0), ("alpha.txt", 0), ("zeta.txt", 0)]
    );
}

#[test]
fn children_list_nests_records() {
    let mut tree = RecordTree::from_records(&[
        folder("src", "src", &["main"]),
        file("main", "main.rs"),
    ]);

    assert_eq!(tree.parent(&id("main")), Some(&id("src")));
    assert_eq!(tree.children(&id("src")), vec![&id("main")]);

    assert_eq!(names(&tree.flatten_for_view()), vec![("src", 0)]);
    assert!(tree.expand(&id("src")));
    assert_eq!(
        names(&tree.flatten_for_view()),
        vec![("src", 0), ("main.rs", 1)]
    );
}

#[test]
fn parent_id_wins_over_children_list() {
    let tree = RecordTree::from_records(&[
        folder("a", "a", &["x"]),
        folder("b", "b", &[]),
        under(file("x", "x.txt"), "b"),
    ]);

    assert_eq!(tree.parent(&id("x")), Some(&id("b")));
    assert!(tree.children(&id("a")).is_empty());
}

#[test]
fn parent_id_pointing_at_file_or_unknown_is_top_level() {
    let tree = RecordTree::from_records(&[
        file("f", "f.txt"),
        under(file("x", "x.txt"), "f"),
        under(file("y", "y.txt"), "missing"),
    ]);

    assert_eq!(tree.parent(&id("x")), None);
    assert_eq!(tree.parent(&id("y")), None);
    assert_eq!(tree.top_level().len(), 3);
}

#[test]
fn dangling_child_is_reported_and_skipped() {
    let tree = RecordTree::from_records(&[folder("src", "src", &["ghost"])]);

    assert_eq!(
        tree.issues(),
        &[TreeIssue::DanglingChild {
            parent: id("src"),
            child: id("ghost"),
        }]
    );
    assert!(tree.children(&id("src")).is_empty());
}

#[test]
fn record_listed_by_two_folders_is_attached_once() {
    let tree = RecordTree::from_records(&[
        folder("a", "a", &["x"]),
        folder("b", "b", &["x"]),
        file("x", "x.txt"),
    ]);

    assert_eq!(tree.parent(&id("x")), Some(&id("a")));
    assert!(tree.children(&id("b")).is_empty());
    assert!(tree.issues().contains(&TreeIssue::DuplicateReference {
        child: id("x"),
        parent: id("b"),
    }));
}

#[test]
fn duplicate_ids_keep_the_first_record() {
    let tree = RecordTree::from_records(&[file("a", "first"), file("a", "second")]);

    assert_eq!(tree.len(), 1);
    assert_eq!(tree.flatten_for_view()[0].name, "first");
    assert_eq!(tree.issues(), &[TreeIssue::DuplicateId(id("a"))]);
}

#[test]
fn mutual_parents_do_not_loop() {
    let mut tree = RecordTree::from_records(&[
        under(folder("a", "a", &[]), "b"),
        under(folder("b", "b", &[]), "a"),
    ]);

    assert!(tree.issues().contains(&TreeIssue::Cycle(id("b"))));
    assert_eq!(tree.parent(&id("a")), Some(&id("b")));
    assert_eq!(tree.parent(&id("b")), None);

    tree.expand(&id("a"));
    tree.expand(&id("b"));
    assert_eq!(names(&tree.flatten_for_view()), vec![("b", 0), ("a", 1)]);
}

#[test]
fn folder_listing_itself_is_a_cycle() {
    let tree = RecordTree::from_records(&[folder("a", "a", &["a"])]);

    assert_eq!(tree.issues(), &[TreeIssue::Cycle(id("a"))]);
    assert_eq!(tree.top_level(), vec![&id("a")]);
}

#[test]
fn expand_ignores_files_and_unknown_ids() {
    let mut tree = RecordTree::from_records(&[file("a", "a.txt")]);

    assert!(!tree.expand(&id("a")));
    assert!(!tree.expand(&id("nope")));
    assert!(!tree.is_expanded(&id("a")));
}

#[test]
fn toggle_expand_flips_state() {
    let mut tree = RecordTree::from_records(&[folder("d", "d", &[])]);

    assert!(tree.toggle_expand(&id("d")));
    assert!(tree.is_expanded(&id("d")));
    assert!(tree.toggle_expand(&id("d")));
    assert!(!tree.is_expanded(&id("d")));
}

#[test]
fn rebuild_keeps_expansion_of_surviving_folders() {
    let mut tree = RecordTree::from_records(&[
        folder("a", "a", &["x"]),
        folder("b", "b", &[]),
        file("x", "x.txt"),
    ]);
    tree.expand(&id("a"));
    tree.expand(&id("b"));

    tree.rebuild(&[folder("a", "a", &["x"]), file("x", "x.txt")]);

    assert!(tree.is_expanded(&id("a")));
    assert!(!tree.is_expanded(&id("b")));
    assert_eq!(
        names(&tree.flatten_for_view()),
        vec![("a", 0), ("x.txt", 1)]
    );
}

#[test]
fn reveal_expands_all_ancestors() {
    let mut tree = RecordTree::from_records(&[
        folder("a", "a", &["b"]),
        folder("b", "b", &["c"]),
        file("c", "c.txt"),
    ]);

    assert!(tree.reveal(&id("c")));
    assert!(tree.is_expanded(&id("a")));
    assert!(tree.is_expanded(&id("b")));
    assert!(!tree.reveal(&id("c")));

    let rows = tree.flatten_for_view();
    assert_eq!(names(&rows), vec![("a", 0), ("b", 1), ("c.txt", 2)]);
}

#[test]
fn rows_map_back_to_nodes() {
    let tree = RecordTree::from_records(&[file("a", "a.txt")]);
    let row = &tree.flatten_for_view()[0];

    assert_eq!(tree.node(&id("a")), Some(row.id));
    assert_eq!(tree.record_id(row.id), Some(&id("a")));
    assert_eq!(tree.record_id(tree.root()), None);
}

#[test]
fn empty_tree_has_no_rows() {
    let tree = RecordTree::new();
    assert!(tree.is_empty());
    assert!(tree.flatten_for_view().is_empty());
}
