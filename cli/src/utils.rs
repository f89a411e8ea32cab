use std::{fs, path::Path};

use anyhow::{Context, Result};
use posts_client::{
    models::{Article, ArticlePayload},
    store::PostsState,
    ApiError,
};
use serde::Serialize;

/// What `list` prints: the paging cursor plus the page itself.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView<'a> {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub max_page: u32,
    pub articles: &'a [Article],
}

impl<'a> PageView<'a> {
    pub fn of(state: &'a PostsState) -> Self {
        Self {
            page: state.page,
            page_size: state.page_size,
            total: state.total,
            max_page: state.max_page(),
            articles: &state.articles,
        }
    }
}

pub fn parse_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .map(|tag| tag.to_string())
        .collect()
}

pub fn read_body(body: Option<String>, body_file: Option<&Path>) -> Result<Option<String>> {
    match body_file {
        Some(path) => fs::read_to_string(path)
            .map(Some)
            .with_context(|| format!("failed to read body from {}", path.display())),
        None => Ok(body),
    }
}

/// Build an update payload; only the flags that were given end up in it.
pub fn patch_from_args(
    title: Option<String>,
    description: Option<String>,
    body: Option<String>,
    tags: Option<&str>,
) -> ArticlePayload {
    let payload = ArticlePayload {
        title,
        description,
        body,
        tag_list: None,
    };
    match tags {
        Some(tags) => payload.with_tags(parse_tags(tags)),
        None => payload,
    }
}

/// Lines to show for a failed call: field errors when the server sent
/// them, the plain message otherwise.
pub fn error_lines(err: &ApiError) -> Vec<String> {
    let lines = err.server_errors().messages();
    if lines.is_empty() {
        vec![err.message()]
    } else {
        lines
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
