//! Database row types. These map directly to SQLite rows and keep their
//! timestamps as the raw TEXT column.

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::warn;

use board_types::models::{Comment, User};

/// Users present in every fresh store: (username, password, email).
pub const SEED_USERS: &[(&str, &str, &str)] = &[
    ("admin", "admin123", "admin@example.com"),
    ("user1", "password123", "user1@example.com"),
    ("user2", "secret456", "user2@example.com"),
];

pub struct CommentRow {
    pub id: i64,
    pub author: String,
    pub body: String,
    pub created_at: String,
}

pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub email: String,
    pub created_at: String,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            created_at: parse_timestamp(&row.created_at, row.id),
            id: row.id,
            author: row.author,
            body: row.body,
        }
    }
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            created_at: parse_timestamp(&row.created_at, row.id),
            id: row.id,
            username: row.username,
            password: row.password,
            email: row.email,
        }
    }
}

/// Rows written by the board carry RFC 3339; SQLite's `datetime('now')`
/// default is "YYYY-MM-DD HH:MM:SS" with no zone, read as UTC.
pub fn parse_timestamp(raw: &str, id: i64) -> DateTime<Utc> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc()))
        .unwrap_or_else(|e| {
            warn!("Corrupt created_at '{}' on row {}: {}", raw, id, e);
            DateTime::default()
        })
}
