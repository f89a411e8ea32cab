//! Client configuration.

use std::path::PathBuf;

use crate::error::ApiError;

// API base URL - 编译时从环境变量读取，默认公共 RealWorld 后端
pub const API_BASE: &str = match option_env!("POSTS_API_BASE") {
    Some(url) => url,
    None => "https://api.realworld.show/api",
};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

pub const ALLOWED_PAGE_SIZES: &[u32] = &[5, 10, 20, 50];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base origin every request path is appended to, e.g.
    /// `https://example.com/api`.
    pub api_base: String,
    pub page_size: u32,
    pub allowed_page_sizes: Vec<u32>,
    /// Where a bearer token is persisted between runs, if anywhere.
    pub token_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: API_BASE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            allowed_page_sizes: ALLOWED_PAGE_SIZES.to_vec(),
            token_file: None,
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `POSTS_API_BASE`, `POSTS_PAGE_SIZE` and
    /// `POSTS_TOKEN_FILE` when they are set.
    pub fn from_env() -> Result<Self, ApiError> {
        let mut config = Self::default();

        if let Ok(base) = std::env::var("POSTS_API_BASE") {
            config = config.with_api_base(base);
        }
        if let Ok(raw) = std::env::var("POSTS_PAGE_SIZE") {
            let page_size = raw
                .trim()
                .parse::<u32>()
                .map_err(|err| ApiError::Config(format!("invalid POSTS_PAGE_SIZE `{raw}`: {err}")))?;
            config.page_size = config.validate_page_size(page_size)?;
        }
        if let Ok(path) = std::env::var("POSTS_TOKEN_FILE") {
            if !path.trim().is_empty() {
                config.token_file = Some(PathBuf::from(path));
            }
        }

        Ok(config)
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn validate_page_size(&self, page_size: u32) -> Result<u32, ApiError> {
        if self.allowed_page_sizes.contains(&page_size) {
            Ok(page_size)
        } else {
            Err(ApiError::Config(format!(
                "page size {page_size} is not one of {:?}",
                self.allowed_page_sizes
            )))
        }
    }
}
