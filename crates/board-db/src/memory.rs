//! In-memory store with the same shape as the SQLite tables.
//!
//! Used when the database cannot be opened at startup, and as the target
//! of [`crate::FallbackStore`] when a query fails at call time.

use std::sync::{Mutex, MutexGuard, PoisonError};

use board_types::models::{Comment, User};
use chrono::{SubsecRound, Utc};

use crate::models::SEED_USERS;
use crate::{CommentStore, StoreError, StoreKind};

pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

struct MemoryState {
    /// Newest first.
    comments: Vec<Comment>,
    users: Vec<User>,
    next_comment_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        let now = Utc::now().trunc_subsecs(6);
        let users = SEED_USERS
            .iter()
            .zip(1..)
            .map(|((username, password, email), id)| User {
                id,
                username: username.to_string(),
                password: password.to_string(),
                email: email.to_string(),
                created_at: now,
            })
            .collect();

        Self {
            state: Mutex::new(MemoryState {
                comments: Vec::new(),
                users,
                next_comment_id: 1,
            }),
        }
    }

    // Every mutation completes before the guard drops, so a poisoned lock
    // still holds consistent data.
    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CommentStore for MemoryStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Memory
    }

    fn list_comments(&self) -> Result<Vec<Comment>, StoreError> {
        Ok(self.state().comments.clone())
    }

    fn create_comment(&self, author: &str, body: &str) -> Result<Comment, StoreError> {
        let mut state = self.state();
        let comment = Comment {
            id: state.next_comment_id,
            author: author.to_string(),
            body: body.to_string(),
            created_at: Utc::now().trunc_subsecs(6),
        };
        state.next_comment_id += 1;
        state.comments.insert(0, comment.clone());
        Ok(comment)
    }

    fn delete_comment(&self, id: i64) -> Result<(), StoreError> {
        let mut state = self.state();
        let before = state.comments.len();
        state.comments.retain(|c| c.id != id);
        if state.comments.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.state().users.clone())
    }
}
