pub mod articles;
pub mod comments;
pub mod session;

use anyhow::{Context, Result};
use posts_client::{build_stores, ApiError, ClientConfig};

use crate::{
    cli::{Cli, Commands},
    utils,
};

pub async fn run(cli: Cli) -> Result<()> {
    let mut config = ClientConfig::from_env().context("invalid client configuration")?;
    if let Some(base) = cli.api_base {
        config = config.with_api_base(base);
    }
    if let Some(path) = cli.token_file {
        config.token_file = Some(path);
    }

    match &cli.command {
        Commands::Login {
            token,
        } => return session::login(&config, token),
        Commands::Logout => return session::logout(&config),
        _ => {},
    }

    let (posts, comments) = build_stores(&config)?;
    match cli.command {
        Commands::List {
            page,
            page_size,
        } => articles::list(&posts, page, page_size).await,
        Commands::Show {
            slug,
        } => articles::show(&posts, &slug).await,
        Commands::Create {
            title,
            description,
            body,
            body_file,
            tags,
        } => {
            let body = utils::read_body(body, body_file.as_deref())?.unwrap_or_default();
            articles::create(&posts, title, description, body, tags.as_deref()).await
        },
        Commands::Update {
            slug,
            title,
            description,
            body,
            body_file,
            tags,
        } => {
            let body = utils::read_body(body, body_file.as_deref())?;
            let patch = utils::patch_from_args(title, description, body, tags.as_deref());
            articles::update(&posts, &slug, patch).await
        },
        Commands::Delete {
            slug,
            no_refresh,
        } => articles::delete(&posts, &slug, !no_refresh).await,
        Commands::Favorite {
            slug,
        } => articles::favorite(&posts, &slug).await,
        Commands::Comments {
            command,
        } => comments::run(&comments, command).await,
        Commands::Login {
            ..
        }
        | Commands::Logout => Ok(()),
    }
}

/// Print server messages for a failed call and turn it into an error exit.
pub(crate) fn report(err: ApiError) -> anyhow::Error {
    for line in utils::error_lines(&err) {
        eprintln!("error: {line}");
    }
    anyhow::Error::new(err)
}
