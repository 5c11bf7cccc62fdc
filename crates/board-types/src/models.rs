use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment posted to the board. Immutable once created; the only
/// mutation is deletion by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// A row of the user table.
///
/// The password travels in clear text. The board exists to demonstrate
/// this kind of leak, so the field is never redacted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
