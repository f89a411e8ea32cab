use std::sync::Arc;

use posts_shared::Comment;
use tokio::sync::watch;

use super::StateCell;
use crate::{error::ApiError, services::CommentApi};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentsState {
    pub loading: bool,
    pub posting: bool,
    /// Comment whose delete request is in flight. Only one is tracked.
    pub deleting_id: Option<u64>,
    pub error: Option<String>,
    pub items: Vec<Comment>,
    pub slug: Option<String>,
}

/// Comment thread of a single article.
///
/// Results that come back after the active slug changed are dropped, so a
/// thread never shows another article's comments.
pub struct CommentsStore {
    state: StateCell<CommentsState>,
    api: Arc<dyn CommentApi>,
}

impl CommentsStore {
    pub fn new(api: Arc<dyn CommentApi>) -> Self {
        Self {
            state: StateCell::new(CommentsState::default()),
            api,
        }
    }

    pub fn snapshot(&self) -> CommentsState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<CommentsState> {
        self.state.subscribe()
    }

    pub fn items(&self) -> Vec<Comment> {
        self.state.read(|s| s.items.clone())
    }

    pub fn slug(&self) -> Option<String> {
        self.state.read(|s| s.slug.clone())
    }

    pub fn loading(&self) -> bool {
        self.state.read(|s| s.loading)
    }

    pub fn posting(&self) -> bool {
        self.state.read(|s| s.posting)
    }

    pub fn deleting_id(&self) -> Option<u64> {
        self.state.read(|s| s.deleting_id)
    }

    pub fn error(&self) -> Option<String> {
        self.state.read(|s| s.error.clone())
    }

    /// Make `slug` the active thread and fetch its comments. Switching to a
    /// different slug clears the previous thread first.
    pub async fn load(&self, slug: &str) -> Result<(), ApiError> {
        self.state.patch(|s| {
            if s.slug.as_deref() != Some(slug) {
                s.items.clear();
                s.posting = false;
                s.deleting_id = None;
            }
            s.slug = Some(slug.to_string());
            s.loading = true;
            s.error = None;
        });

        let result = self.api.list(slug).await;
        if !self.is_active(slug) {
            tracing::debug!(slug, "dropping comments for inactive thread");
            return result.map(|_| ());
        }

        match result {
            Ok(items) => {
                self.state.patch(|s| {
                    s.items = items;
                    s.loading = false;
                });
                Ok(())
            },
            Err(err) => {
                tracing::warn!(slug, "failed to load comments: {err}");
                self.state.patch(|s| {
                    s.loading = false;
                    s.error = Some(err.message());
                });
                Err(err)
            },
        }
    }

    /// Post a comment to the active thread and put it at the top. Returns
    /// `Ok(None)` when no thread is active.
    pub async fn add(&self, body: &str) -> Result<Option<Comment>, ApiError> {
        let Some(slug) = self.slug() else {
            return Ok(None);
        };
        self.state.patch(|s| {
            s.posting = true;
            s.error = None;
        });

        let result = self.api.add(&slug, body).await;
        if !self.is_active(&slug) {
            return result.map(Some);
        }

        match result {
            Ok(comment) => {
                tracing::info!(slug = %slug, id = comment.id, "comment posted");
                self.state.patch(|s| {
                    s.items.insert(0, comment.clone());
                    s.posting = false;
                });
                Ok(Some(comment))
            },
            Err(err) => {
                tracing::warn!(slug = %slug, "failed to post comment: {err}");
                self.state.patch(|s| {
                    s.posting = false;
                    s.error = Some(err.message());
                });
                Err(err)
            },
        }
    }

    /// Delete comment `id` from the active thread. Returns `Ok(false)` when
    /// no thread is active.
    pub async fn remove(&self, id: u64) -> Result<bool, ApiError> {
        let Some(slug) = self.slug() else {
            return Ok(false);
        };
        self.state.patch(|s| {
            s.deleting_id = Some(id);
            s.error = None;
        });

        let result = self.api.remove(&slug, id).await;
        if !self.is_active(&slug) {
            return result.map(|()| true);
        }

        match result {
            Ok(()) => {
                tracing::info!(slug = %slug, id, "comment deleted");
                self.state.patch(|s| {
                    s.items.retain(|comment| comment.id != id);
                    s.deleting_id = None;
                });
                Ok(true)
            },
            Err(err) => {
                tracing::warn!(slug = %slug, id, "failed to delete comment: {err}");
                self.state.patch(|s| {
                    s.deleting_id = None;
                    s.error = Some(err.message());
                });
                Err(err)
            },
        }
    }

    fn is_active(&self, slug: &str) -> bool {
        self.state.read(|s| s.slug.as_deref() == Some(slug))
    }
}

impl std::fmt::Debug for CommentsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommentsStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
