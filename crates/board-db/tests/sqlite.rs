use board_db::{CommentStore, SqliteStore, StoreError, StoreKind, open_store};

#[test]
fn create_list_delete_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::open(&dir.path().join("board.db")).unwrap();

    let first = store.create_comment("Alice", "Hello").unwrap();
    let second = store.create_comment("Bob", "<b>hi</b>").unwrap();
    assert!(second.id > first.id);

    let listed = store.list_comments().unwrap();
    assert_eq!(listed, vec![second.clone(), first.clone()]);

    store.delete_comment(first.id).unwrap();
    let listed = store.list_comments().unwrap();
    assert_eq!(listed, vec![second]);

    assert!(matches!(
        store.delete_comment(first.id),
        Err(StoreError::NotFound(id)) if id == first.id
    ));
}

#[test]
fn comments_survive_reopen_and_users_are_seeded_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.db");

    let created = {
        let store = SqliteStore::open(&path).unwrap();
        store.create_comment("Alice", "persisted").unwrap()
    };

    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.list_comments().unwrap(), vec![created]);

    let users = store.list_users().unwrap();
    assert_eq!(users.len(), 3);
    assert_eq!(users[1].username, "user1");
    assert_eq!(users[1].password, "password123");
}

#[test]
fn stored_text_is_kept_verbatim() {
    let store = SqliteStore::open_in_memory().unwrap();
    let body = "<script>alert(1)</script>";
    store.create_comment("<img src=x onerror=alert(1)>", body).unwrap();

    let listed = store.list_comments().unwrap();
    assert_eq!(listed[0].body, body);
    assert_eq!(listed[0].author, "<img src=x onerror=alert(1)>");
}

#[test]
fn open_store_uses_sqlite_when_reachable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.db");
    let store = open_store(path.to_str().unwrap());
    assert_eq!(store.kind(), StoreKind::Sqlite);

    let created = store.create_comment("Alice", "Hello").unwrap();
    assert_eq!(store.list_comments().unwrap()[0].id, created.id);
}

#[test]
fn equal_timestamps_list_highest_id_first() {
    let store = SqliteStore::open_in_memory().unwrap();
    store
        .with_conn(|conn| {
            for author in ["first", "second", "third"] {
                conn.execute(
                    "INSERT INTO comments (author, body, created_at) VALUES (?1, 'same', ?2)",
                    (author, "2024-05-01T10:00:00.000000Z"),
                )?;
            }
            Ok(())
        })
        .unwrap();

    let authors: Vec<String> = store
        .list_comments()
        .unwrap()
        .into_iter()
        .map(|c| c.author)
        .collect();
    assert_eq!(authors, ["third", "second", "first"]);
}
