//! HTTP gateway in front of the REST backend.
//!
//! Every call resolves exactly once: either a decoded payload or an
//! [`ApiError`]. Nothing is retried here.

use std::{collections::BTreeMap, sync::Arc};

use reqwest::{header, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{
    auth::{authorization_header, NoToken, TokenSource},
    config::ClientConfig,
    error::ApiError,
};

/// One query parameter value before serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// Never provided; dropped.
    Absent,
    /// Explicit null; dropped as well.
    Null,
    Scalar(String),
    /// Joined with commas.
    List(Vec<String>),
}

macro_rules! scalar_param {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    ParamValue::Scalar(value.to_string())
                }
            }
        )*
    };
}

scalar_param!(u8, u16, u32, u64, usize, i32, i64, bool, &str, String);

impl<T: ToString> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        ParamValue::List(values.iter().map(ToString::to_string).collect())
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(ParamValue::Absent)
    }
}

/// Serialize query parameters: absent and null entries disappear, lists are
/// comma joined, everything else is kept as its string form.
pub fn to_params<'a, K, I>(params: I) -> BTreeMap<String, String>
where
    K: AsRef<str> + 'a,
    I: IntoIterator<Item = &'a (K, ParamValue)>,
{
    params
        .into_iter()
        .filter_map(|(key, value)| {
            let value = match value {
                ParamValue::Absent | ParamValue::Null => return None,
                ParamValue::Scalar(text) => text.clone(),
                ParamValue::List(items) => items.join(","),
            };
            Some((key.as_ref().to_string(), value))
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base: String,
    token: Arc<dyn TokenSource>,
}

impl HttpGateway {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("posts-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| ApiError::Config(format!("failed to build http client: {err}")))?;
        Ok(Self {
            client,
            base: config.api_base.trim_end_matches('/').to_string(),
            token: Arc::new(NoToken),
        })
    }

    pub fn with_token_source(mut self, token: Arc<dyn TokenSource>) -> Self {
        self.token = token;
        self
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, ParamValue)],
    ) -> Result<T, ApiError> {
        self.send(self.request(Method::GET, path, params)).await
    }

    pub async fn post<B, T>(
        &self,
        path: &str,
        body: &B,
        params: &[(&str, ParamValue)],
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, path, params).json(body))
            .await
    }

    pub async fn put<B, T>(
        &self,
        path: &str,
        body: &B,
        params: &[(&str, ParamValue)],
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::PUT, path, params).json(body))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, ParamValue)],
    ) -> Result<T, ApiError> {
        self.send(self.request(Method::DELETE, path, params)).await
    }

    fn request(&self, method: Method, path: &str, params: &[(&str, ParamValue)]) -> RequestBuilder {
        let url = self.url(path);
        tracing::debug!(%method, %url, "api request");

        let mut builder = self.client.request(method, url);
        let query = to_params(params);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(value) = authorization_header(self.token.as_ref()) {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let body = serde_json::from_slice::<Value>(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
            tracing::debug!(status = status.as_u16(), "api request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        // 204 / empty bodies decode as JSON null so unit-like targets work.
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_value(Value::Null)?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}
