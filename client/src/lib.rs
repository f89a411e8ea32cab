//! Client for the posts REST backend: an HTTP gateway, per-resource services
//! and the observable stores a UI drives.

pub mod auth;
pub mod config;
pub mod error;
pub mod gateway;
pub mod pagination;
pub mod services;
pub mod store;

use std::sync::Arc;

pub use config::ClientConfig;
pub use error::ApiError;
pub use gateway::HttpGateway;
pub use posts_shared as models;
pub use services::{ArticleApi, ArticleService, CommentApi, CommentService};
pub use store::{CommentsStore, MutationHooks, PostsStore};

use crate::auth::{FileToken, TokenSource};

/// Wire the gateway, services and both stores from one configuration.
pub fn build_stores(config: &ClientConfig) -> Result<(PostsStore, CommentsStore), ApiError> {
    let mut gateway = HttpGateway::new(config)?;
    if let Some(path) = &config.token_file {
        let token: Arc<dyn TokenSource> = Arc::new(FileToken::new(path));
        gateway = gateway.with_token_source(token);
    }

    let articles = Arc::new(ArticleService::new(gateway.clone()));
    let comments = Arc::new(CommentService::new(gateway));
    Ok((PostsStore::new(articles, config), CommentsStore::new(comments)))
}
