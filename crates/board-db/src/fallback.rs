use board_types::models::{Comment, User};
use tracing::warn;

use crate::memory::MemoryStore;
use crate::{CommentStore, StoreError, StoreKind};

/// Serves from `primary`, dropping to an in-memory store for any call that
/// fails with [`StoreError::Unavailable`].
///
/// The two stores are never reconciled: a comment written to memory while
/// the database was failing stays there, and the database never sees it.
pub struct FallbackStore<P> {
    primary: P,
    fallback: MemoryStore,
}

impl<P: CommentStore> FallbackStore<P> {
    pub fn new(primary: P) -> Self {
        Self {
            primary,
            fallback: MemoryStore::new(),
        }
    }

    fn degrade<T>(
        &self,
        op: &str,
        result: Result<T, StoreError>,
        fallback: impl FnOnce(&MemoryStore) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        match result {
            Err(StoreError::Unavailable(reason)) => {
                warn!("{} failed on {} store: {}", op, self.primary.kind().as_str(), reason);
                warn!("Falling back to in-memory store for {}", op);
                fallback(&self.fallback)
            }
            other => other,
        }
    }
}

impl<P: CommentStore> CommentStore for FallbackStore<P> {
    fn kind(&self) -> StoreKind {
        self.primary.kind()
    }

    fn list_comments(&self) -> Result<Vec<Comment>, StoreError> {
        self.degrade("list_comments", self.primary.list_comments(), |m| m.list_comments())
    }

    fn create_comment(&self, author: &str, body: &str) -> Result<Comment, StoreError> {
        self.degrade(
            "create_comment",
            self.primary.create_comment(author, body),
            |m| m.create_comment(author, body),
        )
    }

    fn delete_comment(&self, id: i64) -> Result<(), StoreError> {
        self.degrade("delete_comment", self.primary.delete_comment(id), |m| {
            m.delete_comment(id)
        })
    }

    fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.degrade("list_users", self.primary.list_users(), |m| m.list_users())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A primary whose every query fails, as if the server went away.
    struct Unreachable;

    impl CommentStore for Unreachable {
        fn kind(&self) -> StoreKind {
            StoreKind::Sqlite
        }

        fn list_comments(&self) -> Result<Vec<Comment>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }

        fn create_comment(&self, _: &str, _: &str) -> Result<Comment, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }

        fn delete_comment(&self, _: i64) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }

        fn list_users(&self) -> Result<Vec<User>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
    }

    #[test]
    fn failing_primary_serves_from_memory() {
        let store = FallbackStore::new(Unreachable);

        let created = store.create_comment("Alice", "Hello").unwrap();
        assert_eq!(created.id, 1);

        let listed = store.list_comments().unwrap();
        assert_eq!(listed, vec![created.clone()]);

        store.delete_comment(created.id).unwrap();
        assert!(store.list_comments().unwrap().is_empty());
        assert!(matches!(store.delete_comment(created.id), Err(StoreError::NotFound(1))));
    }

    #[test]
    fn failing_primary_still_lists_users() {
        let store = FallbackStore::new(Unreachable);
        assert_eq!(store.list_users().unwrap().len(), 3);
    }

    #[test]
    fn not_found_from_primary_is_not_masked() {
        let store = FallbackStore::new(MemoryStore::new());
        assert!(matches!(store.delete_comment(9), Err(StoreError::NotFound(9))));
    }

    #[test]
    fn reports_primary_kind() {
        assert_eq!(FallbackStore::new(Unreachable).kind(), StoreKind::Sqlite);
    }
}
