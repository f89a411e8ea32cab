//! Resource services: thin mappings from gateway calls to domain values.
//!
//! Stores only see the [`ArticleApi`] and [`CommentApi`] traits so tests can
//! swap in stubs.

mod article;
mod comment;

use async_trait::async_trait;
use posts_shared::{Article, ArticlePayload, ArticlesResponse, Comment};

pub use self::{article::ArticleService, comment::CommentService};
use crate::error::ApiError;

#[async_trait]
pub trait ArticleApi: Send + Sync {
    async fn list(&self, page: u32, page_size: u32) -> Result<ArticlesResponse, ApiError>;

    async fn get(&self, slug: &str) -> Result<Article, ApiError>;

    async fn create(&self, payload: &ArticlePayload) -> Result<Article, ApiError>;

    async fn update(&self, slug: &str, payload: &ArticlePayload) -> Result<Article, ApiError>;

    async fn delete(&self, slug: &str) -> Result<(), ApiError>;

    /// Returns the server's view of the article after favoriting.
    async fn favorite(&self, slug: &str) -> Result<Article, ApiError>;

    async fn unfavorite(&self, slug: &str) -> Result<Article, ApiError>;
}

#[async_trait]
pub trait CommentApi: Send + Sync {
    async fn list(&self, slug: &str) -> Result<Vec<Comment>, ApiError>;

    async fn add(&self, slug: &str, body: &str) -> Result<Comment, ApiError>;

    async fn remove(&self, slug: &str, id: u64) -> Result<(), ApiError>;
}

pub(crate) fn article_path(slug: &str) -> String {
    format!("/articles/{}", urlencoding::encode(slug))
}
