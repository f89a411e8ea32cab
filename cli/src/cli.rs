use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "posts-cli", version, about = "Browse and edit posts on a RealWorld-style backend")]
pub struct Cli {
    /// API base URL (overrides POSTS_API_BASE).
    #[arg(long, global = true)]
    pub api_base: Option<String>,
    /// File holding the bearer token (overrides POSTS_TOKEN_FILE).
    #[arg(long, global = true)]
    pub token_file: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List one page of articles.
    List {
        /// 1-based page number (defaults to 1).
        #[arg(long)]
        page: Option<u32>,
        /// Articles per page; must be one of the allowed sizes.
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Show a single article.
    Show {
        slug: String,
    },
    /// Create an article.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Markdown body.
        #[arg(long, conflicts_with = "body_file")]
        body: Option<String>,
        /// Read the markdown body from a file.
        #[arg(long)]
        body_file: Option<PathBuf>,
        /// Comma-separated tags list.
        #[arg(long)]
        tags: Option<String>,
    },
    /// Update fields of an existing article.
    Update {
        slug: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, conflicts_with = "body_file")]
        body: Option<String>,
        #[arg(long)]
        body_file: Option<PathBuf>,
        /// Comma-separated tags list; replaces the existing tags.
        #[arg(long)]
        tags: Option<String>,
    },
    /// Delete an article.
    Delete {
        slug: String,
        /// Skip reloading the current page afterwards.
        #[arg(long)]
        no_refresh: bool,
    },
    /// Toggle the favorite flag of an article.
    Favorite {
        slug: String,
    },
    /// Work with the comments of an article.
    Comments {
        #[command(subcommand)]
        command: CommentCommands,
    },
    /// Persist a token to the token file.
    Login {
        token: String,
    },
    /// Remove the persisted token.
    Logout,
}

#[derive(Subcommand)]
pub enum CommentCommands {
    /// List comments of an article.
    List {
        slug: String,
    },
    /// Post a comment.
    Add {
        slug: String,
        body: String,
    },
    /// Delete a comment by id.
    Remove {
        slug: String,
        id: u64,
    },
}
