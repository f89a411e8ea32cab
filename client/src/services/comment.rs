use async_trait::async_trait;
use posts_shared::{Comment, CommentEnvelope, CommentsResponse, NewComment};
use serde::de::IgnoredAny;

use super::{article_path, CommentApi};
use crate::{error::ApiError, gateway::HttpGateway};

#[derive(Debug, Clone)]
pub struct CommentService {
    gateway: HttpGateway,
}

impl CommentService {
    pub fn new(gateway: HttpGateway) -> Self {
        Self {
            gateway,
        }
    }
}

fn comments_path(slug: &str) -> String {
    format!("{}/comments", article_path(slug))
}

#[async_trait]
impl CommentApi for CommentService {
    async fn list(&self, slug: &str) -> Result<Vec<Comment>, ApiError> {
        let response: CommentsResponse = self.gateway.get(&comments_path(slug), &[]).await?;
        Ok(response.comments)
    }

    async fn add(&self, slug: &str, body: &str) -> Result<Comment, ApiError> {
        let request = CommentEnvelope {
            comment: NewComment {
                body: body.to_string(),
            },
        };
        let envelope: CommentEnvelope<Comment> =
            self.gateway.post(&comments_path(slug), &request, &[]).await?;
        Ok(envelope.comment)
    }

    async fn remove(&self, slug: &str, id: u64) -> Result<(), ApiError> {
        let path = format!("{}/{id}", comments_path(slug));
        self.gateway.delete::<IgnoredAny>(&path, &[]).await?;
        Ok(())
    }
}
