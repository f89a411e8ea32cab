use async_trait::async_trait;
use posts_shared::{Article, ArticleEnvelope, ArticlePayload, ArticlesResponse};
use serde::de::IgnoredAny;

use super::{article_path, ArticleApi};
use crate::{
    error::ApiError,
    gateway::{HttpGateway, ParamValue},
    pagination::offset_for,
};

#[derive(Debug, Clone)]
pub struct ArticleService {
    gateway: HttpGateway,
}

impl ArticleService {
    pub fn new(gateway: HttpGateway) -> Self {
        Self {
            gateway,
        }
    }
}

#[async_trait]
impl ArticleApi for ArticleService {
    async fn list(&self, page: u32, page_size: u32) -> Result<ArticlesResponse, ApiError> {
        let params = [
            ("limit", ParamValue::from(page_size)),
            ("offset", ParamValue::from(offset_for(page, page_size))),
        ];
        self.gateway.get("/articles", &params).await
    }

    async fn get(&self, slug: &str) -> Result<Article, ApiError> {
        let envelope: ArticleEnvelope<Article> = self.gateway.get(&article_path(slug), &[]).await?;
        Ok(envelope.article)
    }

    async fn create(&self, payload: &ArticlePayload) -> Result<Article, ApiError> {
        let envelope: ArticleEnvelope<Article> = self
            .gateway
            .post("/articles", &ArticleEnvelope {
                article: payload,
            }, &[])
            .await?;
        Ok(envelope.article)
    }

    async fn update(&self, slug: &str, payload: &ArticlePayload) -> Result<Article, ApiError> {
        let envelope: ArticleEnvelope<Article> = self
            .gateway
            .put(&article_path(slug), &ArticleEnvelope {
                article: payload,
            }, &[])
            .await?;
        Ok(envelope.article)
    }

    async fn delete(&self, slug: &str) -> Result<(), ApiError> {
        self.gateway
            .delete::<IgnoredAny>(&article_path(slug), &[])
            .await?;
        Ok(())
    }

    async fn favorite(&self, slug: &str) -> Result<Article, ApiError> {
        let path = format!("{}/favorite", article_path(slug));
        let envelope: ArticleEnvelope<Article> = self.gateway.post(&path, &(), &[]).await?;
        Ok(envelope.article)
    }

    async fn unfavorite(&self, slug: &str) -> Result<Article, ApiError> {
        let path = format!("{}/favorite", article_path(slug));
        let envelope: ArticleEnvelope<Article> = self.gateway.delete(&path, &[]).await?;
        Ok(envelope.article)
    }
}
