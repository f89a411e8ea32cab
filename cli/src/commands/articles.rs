use anyhow::{bail, Result};
use posts_client::{models::ArticlePayload, MutationHooks, PostsStore};

use super::report;
use crate::utils::{self, PageView};

pub async fn list(posts: &PostsStore, page: Option<u32>, page_size: Option<u32>) -> Result<()> {
    posts.load_page(page, page_size).await.map_err(report)?;
    let state = posts.snapshot();
    utils::print_json(&PageView::of(&state))
}

pub async fn show(posts: &PostsStore, slug: &str) -> Result<()> {
    let article = posts.load_one(slug).await.map_err(report)?;
    utils::print_json(&article)
}

pub async fn create(
    posts: &PostsStore,
    title: String,
    description: String,
    body: String,
    tags: Option<&str>,
) -> Result<()> {
    let mut payload = ArticlePayload::new(title, description, body);
    if let Some(tags) = tags {
        payload = payload.with_tags(utils::parse_tags(tags));
    }

    let hooks = MutationHooks::new().on_done(|slug| tracing::info!("created article {slug}"));
    let article = posts.create_one(&payload, hooks).await.map_err(report)?;
    utils::print_json(&article)
}

pub async fn update(posts: &PostsStore, slug: &str, patch: ArticlePayload) -> Result<()> {
    if patch.is_empty() {
        bail!("nothing to update: pass at least one of --title, --description, --body, --tags");
    }
    let article = posts
        .update_one(slug, &patch, MutationHooks::new())
        .await
        .map_err(report)?;
    utils::print_json(&article)
}

pub async fn delete(posts: &PostsStore, slug: &str, refresh: bool) -> Result<()> {
    posts.delete_one(slug, refresh).await.map_err(report)?;
    if refresh {
        let state = posts.snapshot();
        utils::print_json(&PageView::of(&state))
    } else {
        tracing::info!("deleted article {slug}");
        Ok(())
    }
}

/// The store only toggles articles it already holds, so load it first.
pub async fn favorite(posts: &PostsStore, slug: &str) -> Result<()> {
    posts.load_one(slug).await.map_err(report)?;
    match posts.toggle_favorite(slug).await.map_err(report)? {
        Some(article) => utils::print_json(&article),
        None => bail!("article {slug} is not loaded"),
    }
}
