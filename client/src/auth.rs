//! Bearer token lookup for outgoing requests.
//!
//! This is a stub: a token is attached as `Authorization: Token <value>`
//! when one is available. Nothing refreshes it and a 401 is returned to the
//! caller like any other failure.

use std::{fmt, path::PathBuf};

pub trait TokenSource: Send + Sync + fmt::Debug {
    fn token(&self) -> Option<String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoToken;

impl TokenSource for NoToken {
    fn token(&self) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

impl TokenSource for StaticToken {
    fn token(&self) -> Option<String> {
        normalize(&self.0)
    }
}

/// Token persisted in a local file. Read on every request so a login done
/// elsewhere is picked up without restarting.
#[derive(Debug, Clone)]
pub struct FileToken {
    path: PathBuf,
}

impl FileToken {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
        }
    }

    pub fn store(&self, token: &str) -> std::io::Result<()> {
        std::fs::write(&self.path, token.trim())
    }

    pub fn clear(&self) -> std::io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

impl TokenSource for FileToken {
    fn token(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => normalize(&raw),
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("token file {} unreadable: {err}", self.path.display());
                }
                None
            },
        }
    }
}

pub(crate) fn authorization_header(source: &dyn TokenSource) -> Option<String> {
    source.token().map(|token| format!("Token {token}"))
}

fn normalize(raw: &str) -> Option<String> {
    let token = raw.trim();
    (!token.is_empty()).then(|| token.to_string())
}
