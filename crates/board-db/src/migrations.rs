use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

use crate::models::SEED_USERS;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |r| r.get(0),
    )?;

    if version < 1 {
        info!("Running migration v1 (users, comments)");
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS users (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                username    TEXT NOT NULL,
                password    TEXT NOT NULL,
                email       TEXT NOT NULL,
                created_at  TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE IF NOT EXISTS comments (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                author      TEXT NOT NULL,
                body        TEXT NOT NULL,
                created_at  TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE INDEX IF NOT EXISTS idx_comments_created
                ON comments(created_at);

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    if version < 2 {
        info!("Running migration v2 (comments listing index)");
        conn.execute_batch(
            "
            DROP INDEX IF EXISTS idx_comments_created;

            CREATE INDEX IF NOT EXISTS idx_comments_created_id
                ON comments(created_at, id);

            INSERT INTO schema_version (version) VALUES (2);
            ",
        )?;
    }

    seed_users(conn)?;

    info!("Database migrations complete");
    Ok(())
}

fn seed_users(conn: &Connection) -> Result<()> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))?;
    if count > 0 {
        return Ok(());
    }

    for (username, password, email) in SEED_USERS {
        conn.execute(
            "INSERT INTO users (username, password, email) VALUES (?1, ?2, ?3)",
            (username, password, email),
        )?;
    }
    info!("Sample users added");
    Ok(())
}
