use notezone_core::{DeleteTarget, DocumentStore, NodeKind, StoreError};
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, DocumentStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = DocumentStore::new(dir.path().join("Notes"));
    (dir, store)
}

fn read_json(store: &DocumentStore, relative: &str) -> serde_json::Value {
    let raw = fs::read_to_string(store.root().join(relative)).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[tokio::test]
async fn ensure_root_is_idempotent() {
    let (_dir, store) = setup();
    assert!(!store.root().exists());

    assert!(store.list_tree().await.is_empty());
    assert!(store.root().is_dir());

    store.ensure_root().await.unwrap();
    assert!(store.try_list_tree().await.unwrap().is_empty());
}

#[tokio::test]
async fn write_then_read_round_trips_any_content() {
    let (_dir, store) = setup();
    let note = store.create_note("", "Scratch").await.unwrap();

    for content in [
        "",
        "<p>buy milk</p>",
        r#"He said "hi" \ and left"#,
        "line1\nline2\t\u{1F600}",
    ] {
        store.write_note_content(&note.path, content).await.unwrap();
        assert_eq!(
            store.read_note_content(&note.path).await.as_deref(),
            Some(content)
        );
    }
}

#[tokio::test]
async fn write_preserves_identity_and_unknown_fields() {
    let (_dir, store) = setup();
    let note = store.create_note("", "Keep").await.unwrap();

    let mut value = read_json(&store, &note.path);
    value["pinned"] = serde_json::Value::Bool(true);
    fs::write(store.root().join(&note.path), value.to_string()).unwrap();

    store.write_note_content(&note.path, "body").await.unwrap();

    let value = read_json(&store, &note.path);
    assert_eq!(value["id"], note.id.as_str());
    assert_eq!(value["title"], "Keep");
    assert_eq!(value["content"], "body");
    assert_eq!(value["createdAt"], note.created_at.clone().unwrap().as_str());
    assert_eq!(value["pinned"], true);
}

#[tokio::test]
async fn read_failures_are_recovered_as_none() {
    let (_dir, store) = setup();
    assert_eq!(store.read_note_content("missing.json").await, None);
    assert!(matches!(
        store.try_read_note_content("missing.json").await,
        Err(StoreError::NotFound(_))
    ));

    store.ensure_root().await.unwrap();
    fs::write(store.root().join("broken.json"), "{oops").unwrap();
    assert_eq!(store.read_note_content("broken.json").await, None);
    assert!(matches!(
        store.try_read_note_content("broken.json").await,
        Err(StoreError::CorruptDocument { .. })
    ));
}

#[tokio::test]
async fn write_to_deleted_note_reports_not_found() {
    let (_dir, store) = setup();
    let note = store.create_note("", "Gone").await.unwrap();
    store.delete_item(&note.path, NodeKind::Note).await.unwrap();

    let err = store
        .write_note_content(&note.path, "late")
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(path) if path == note.path));
    assert!(!store.root().join(&note.path).exists());
}

#[tokio::test]
async fn create_note_builds_full_node_and_file() {
    let (_dir, store) = setup();
    let node = store.create_note("Work/Ideas", "Plan: v2?").await.unwrap();

    assert_eq!(node.kind, NodeKind::Note);
    assert_eq!(node.title, "Plan v2");
    assert_eq!(node.path, format!("Work/Ideas/{}.json", node.id));
    assert!(node.children.is_none());
    assert!(node.created_at.is_some());
    assert!(store.root().join("Work/Ideas").is_dir());

    let value = read_json(&store, &node.path);
    assert_eq!(value["id"], node.id.as_str());
    assert_eq!(value["content"], "");
}

#[tokio::test]
async fn create_note_uses_fallback_title() {
    let (_dir, store) = setup();
    let node = store.create_note(".", "  ***  ").await.unwrap();
    assert_eq!(node.title, "New Note");
    assert_eq!(node.path, format!("{}.json", node.id));
}

#[tokio::test]
async fn create_note_ids_are_unique() {
    let (_dir, store) = setup();
    let first = store.create_note("", "Same").await.unwrap();
    let second = store.create_note("", "Same").await.unwrap();
    assert_ne!(first.id, second.id);
    assert_eq!(store.list_tree().await.len(), 2);
}

#[tokio::test]
async fn traversal_paths_are_rejected() {
    let (dir, store) = setup();
    let err = store.create_note("../outside", "x").await.unwrap_err();
    assert!(matches!(err, StoreError::PathOutsideRoot(_)));
    assert!(!dir.path().join("outside").exists());

    let err = store.delete_item("..", NodeKind::Folder).await.unwrap_err();
    assert!(matches!(err, StoreError::PathOutsideRoot(_)));
    assert!(dir.path().exists());
}

#[tokio::test]
async fn create_folder_invalid_name_touches_nothing() {
    let (_dir, store) = setup();
    let err = store.create_folder("", "///").await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidName));
    assert!(!store.root().exists());
}

#[tokio::test]
async fn create_folder_reports_collisions() {
    let (_dir, store) = setup();
    assert_eq!(store.create_folder("", "Work").await.unwrap(), "Work");
    assert_eq!(
        store.create_folder("Work", "Ideas").await.unwrap(),
        "Work/Ideas"
    );

    let err = store.create_folder("", " Work ").await.unwrap_err();
    assert!(matches!(err, StoreError::AlreadyExists(path) if path == "Work"));
}

#[tokio::test]
async fn create_folder_creates_missing_parents() {
    let (_dir, store) = setup();
    let path = store.create_folder("A/B", "C").await.unwrap();
    assert_eq!(path, "A/B/C");
    assert!(store.root().join("A/B/C").is_dir());
}

#[tokio::test]
async fn rename_note_rewrites_title_only() {
    let (_dir, store) = setup();
    let note = store.create_note("", "Draft").await.unwrap();
    store.write_note_content(&note.path, "body").await.unwrap();

    let path = store
        .rename_item(&note.path, "Final <v1>", NodeKind::Note)
        .await
        .unwrap();
    assert_eq!(path, note.path);

    let value = read_json(&store, &note.path);
    assert_eq!(value["id"], note.id.as_str());
    assert_eq!(value["title"], "Final v1");
    assert_eq!(value["content"], "body");

    store.rename_item(&note.path, "   ", NodeKind::Note).await.unwrap();
    assert_eq!(read_json(&store, &note.path)["title"], "Untitled");
}

#[tokio::test]
async fn rename_folder_moves_directory() {
    let (_dir, store) = setup();
    store.create_folder("", "Work").await.unwrap();
    store.create_note("Work", "Todo").await.unwrap();

    let new_path = store
        .rename_item("Work", "Jobs", NodeKind::Folder)
        .await
        .unwrap();
    assert_eq!(new_path, "Jobs");
    assert!(!store.root().join("Work").exists());
    assert_eq!(fs::read_dir(store.root().join("Jobs")).unwrap().count(), 1);

    let unchanged = store
        .rename_item("Jobs", "Jobs", NodeKind::Folder)
        .await
        .unwrap();
    assert_eq!(unchanged, "Jobs");
}

#[tokio::test]
async fn rename_folder_refuses_existing_destination() {
    let (_dir, store) = setup();
    store.create_folder("", "Work").await.unwrap();
    store.create_folder("", "Home").await.unwrap();

    let err = store
        .rename_item("Work", "Home", NodeKind::Folder)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::AlreadyExists(path) if path == "Home"));
    assert!(store.root().join("Work").is_dir());
    assert!(store.root().join("Home").is_dir());

    let missing = store
        .rename_item("Nope", "Other", NodeKind::Folder)
        .await
        .unwrap_err();
    assert!(matches!(missing, StoreError::NotFound(_)));
}

#[tokio::test]
async fn delete_folder_is_recursive_and_best_effort() {
    let (_dir, store) = setup();
    store.create_folder("Work", "Deep").await.unwrap();
    store.create_note("Work/Deep", "Note").await.unwrap();

    store.delete_item("Work", NodeKind::Folder).await.unwrap();
    assert!(!store.root().join("Work").exists());

    store.delete_item("Work", NodeKind::Folder).await.unwrap();
}

#[tokio::test]
async fn delete_missing_note_reports_not_found() {
    let (_dir, store) = setup();
    let err = store
        .delete_item("nope.json", NodeKind::Note)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[tokio::test]
async fn delete_items_waits_for_every_target() {
    let (_dir, store) = setup();
    let a = store.create_note("", "A").await.unwrap();
    let b = store.create_note("Sub", "B").await.unwrap();

    let outcomes = store
        .delete_items(vec![
            DeleteTarget::from(&a),
            DeleteTarget {
                path: "Sub".to_string(),
                kind: NodeKind::Folder,
            },
            DeleteTarget {
                path: "ghost.json".to_string(),
                kind: NodeKind::Note,
            },
        ])
        .await;

    let paths: Vec<_> = outcomes.iter().map(|outcome| outcome.path.as_str()).collect();
    assert_eq!(paths, vec![a.path.as_str(), "Sub", "ghost.json"]);
    assert!(outcomes[0].result.is_ok());
    assert!(outcomes[1].result.is_ok());
    assert!(matches!(outcomes[2].result, Err(StoreError::NotFound(_))));

    assert!(!store.root().join(&b.path).exists());
    assert!(store.list_tree().await.is_empty());
}

#[tokio::test]
async fn rename_folder_never_replaces_a_case_variant_sibling() {
    let (_dir, store) = setup();
    store.create_folder("", "work").await.unwrap();
    store.create_note("work", "Inside").await.unwrap();

    match store.create_folder("", "Work").await {
        Ok(_) => {
            // Case-sensitive volume: `work` and `Work` are distinct folders.
            let err = store
                .rename_item("work", "Work", NodeKind::Folder)
                .await
                .unwrap_err();
            assert!(matches!(err, StoreError::AlreadyExists(path) if path == "Work"));
            assert!(store.root().join("work").is_dir());
            assert!(store.root().join("Work").is_dir());
            assert_eq!(store.list_tree().await.len(), 2);

            store.create_note("Work", "Other").await.unwrap();
            let err = store
                .rename_item("work", "Work", NodeKind::Folder)
                .await
                .unwrap_err();
            assert!(matches!(err, StoreError::AlreadyExists(_)));
        }
        Err(StoreError::AlreadyExists(_)) => {
            // Case-insensitive volume: the rename only changes the case.
            let path = store
                .rename_item("work", "Work", NodeKind::Folder)
                .await
                .unwrap();
            assert_eq!(path, "Work");
            let tree = store.list_tree().await;
            assert_eq!(tree.len(), 1);
            assert_eq!(tree[0].title, "Work");
            assert_eq!(tree[0].children().len(), 1);
        }
        Err(other) => panic!("unexpected create_folder error: {other}"),
    }
}

#[tokio::test]
async fn folder_rename_of_note_path_is_refused() {
    let (_dir, store) = setup();
    let note = store.create_note("", "Keep").await.unwrap();

    let err = store
        .rename_item(&note.path, "Renamed", NodeKind::Folder)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(path) if path == note.path));
    assert!(!store.root().join("Renamed").exists());

    let tree = store.list_tree().await;
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].id, note.id);
}
