use anyhow::{bail, Result};
use posts_client::CommentsStore;

use super::report;
use crate::{cli::CommentCommands, utils};

pub async fn run(comments: &CommentsStore, command: CommentCommands) -> Result<()> {
    match command {
        CommentCommands::List {
            slug,
        } => {
            comments.load(&slug).await.map_err(report)?;
            utils::print_json(&comments.items())
        },
        CommentCommands::Add {
            slug,
            body,
        } => {
            if body.trim().is_empty() {
                bail!("comment body must not be empty");
            }
            comments.load(&slug).await.map_err(report)?;
            match comments.add(&body).await.map_err(report)? {
                Some(comment) => utils::print_json(&comment),
                None => bail!("no active thread"),
            }
        },
        CommentCommands::Remove {
            slug,
            id,
        } => {
            comments.load(&slug).await.map_err(report)?;
            comments.remove(id).await.map_err(report)?;
            utils::print_json(&comments.items())
        },
    }
}
