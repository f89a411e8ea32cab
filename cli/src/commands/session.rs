use anyhow::{Context, Result};
use posts_client::{auth::FileToken, ClientConfig};

fn token_file(config: &ClientConfig) -> Result<FileToken> {
    let path = config
        .token_file
        .as_ref()
        .context("no token file configured; pass --token-file or set POSTS_TOKEN_FILE")?;
    Ok(FileToken::new(path))
}

pub fn login(config: &ClientConfig, token: &str) -> Result<()> {
    let file = token_file(config)?;
    file.store(token).context("failed to write token file")?;
    tracing::info!("token saved");
    Ok(())
}

pub fn logout(config: &ClientConfig) -> Result<()> {
    let file = token_file(config)?;
    file.clear().context("failed to remove token file")?;
    tracing::info!("token removed");
    Ok(())
}
