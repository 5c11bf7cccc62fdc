use board_types::models::{Comment, User};
use chrono::{SecondsFormat, SubsecRound, Utc};
use rusqlite::Connection;
use tracing::debug;

use crate::models::{CommentRow, UserRow};
use crate::{CommentStore, SqliteStore, StoreError, StoreKind};

impl CommentStore for SqliteStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Sqlite
    }

    // -- Comments --

    fn list_comments(&self) -> Result<Vec<Comment>, StoreError> {
        let rows = self.with_conn(query_comments)?;
        Ok(rows.into_iter().map(Comment::from).collect())
    }

    fn create_comment(&self, author: &str, body: &str) -> Result<Comment, StoreError> {
        // Microsecond precision round-trips exactly through the TEXT column.
        let created_at = Utc::now().trunc_subsecs(6);
        let stamp = created_at.to_rfc3339_opts(SecondsFormat::Micros, true);

        let id = self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO comments (author, body, created_at) VALUES (?1, ?2, ?3)",
                (author, body, &stamp),
            )?;
            Ok(conn.last_insert_rowid())
        })?;

        debug!("Inserted comment {}", id);
        Ok(Comment {
            id,
            author: author.to_string(),
            body: body.to_string(),
            created_at,
        })
    }

    fn delete_comment(&self, id: i64) -> Result<(), StoreError> {
        let affected =
            self.with_conn(|conn| conn.execute("DELETE FROM comments WHERE id = ?1", [id]))?;

        if affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    // -- Users --

    fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let rows = self.with_conn(query_users)?;
        Ok(rows.into_iter().map(User::from).collect())
    }
}

fn query_comments(conn: &Connection) -> rusqlite::Result<Vec<CommentRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, author, body, created_at
         FROM comments
         ORDER BY created_at DESC, id DESC",
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok(CommentRow {
                id: row.get(0)?,
                author: row.get(1)?,
                body: row.get(2)?,
                created_at: row.get(3)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn query_users(conn: &Connection) -> rusqlite::Result<Vec<UserRow>> {
    let mut stmt =
        conn.prepare("SELECT id, username, password, email, created_at FROM users ORDER BY id")?;

    let rows = stmt
        .query_map([], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                username: row.get(1)?,
                password: row.get(2)?,
                email: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
