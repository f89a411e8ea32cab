//! Domain model shared by the posts client and its command line.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod server_errors;

pub use server_errors::ServerErrors;

// 作者信息（文章与评论共用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub following: bool,
}

/// A published article. `slug` is the stable natural key assigned by the
/// server at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String, // Markdown 文本
    #[serde(default)]
    pub tag_list: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub favorited: bool,
    #[serde(default)]
    pub favorites_count: u32,
    pub author: Author,
}

impl Article {
    /// Flip `favorited` and move `favorites_count` by one in the same
    /// direction. The count never drops below zero.
    pub fn toggled_favorite(&self) -> (bool, u32) {
        let favorited = !self.favorited;
        let count = if favorited {
            self.favorites_count.saturating_add(1)
        } else {
            self.favorites_count.saturating_sub(1)
        };
        (favorited, count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author: Author,
}

/// One page of articles as returned by `GET /articles`. `articles_count` is
/// the total across all pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlesResponse {
    pub articles: Vec<Article>,
    pub articles_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleEnvelope<T> {
    pub article: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentEnvelope<T> {
    pub comment: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentsResponse {
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    pub body: String,
}

/// Partial article used for create and update calls. Absent fields are left
/// out of the request body entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_list: Option<Vec<String>>,
}

impl ArticlePayload {
    pub fn new(title: impl Into<String>, description: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            body: Some(body.into()),
            tag_list: None,
        }
    }

    /// Replace the tag list. Tags go through the same normalization as
    /// [`ArticlePayload::add_tag`].
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tag_list = Some(Vec::new());
        for tag in tags {
            self.add_tag(tag.as_ref());
        }
        self
    }

    /// Append a tag unless it is blank or already present. Returns whether
    /// the tag list changed.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() {
            return false;
        }
        let tags = self.tag_list.get_or_insert_with(Vec::new);
        if tags.iter().any(|existing| existing == tag) {
            return false;
        }
        tags.push(tag.to_string());
        true
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let Some(tags) = self.tag_list.as_mut() else {
            return false;
        };
        let before = tags.len();
        tags.retain(|existing| existing != tag.trim());
        tags.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.body.is_none()
            && self.tag_list.is_none()
    }
}
