//! Remote menu source

use async_trait::async_trait;
use shared::error::{AppError, ErrorCode};
use shared::models::Menu;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    Status(u16),

    #[error("Invalid menu document: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        let app = AppError::with_message(ErrorCode::NetworkError, err.to_string());
        match err {
            FetchError::Status(status) => app.with_detail("status", status),
            FetchError::Http(_) | FetchError::Decode(_) => app,
        }
    }
}

/// Something that can produce a menu over the network
#[async_trait]
pub trait MenuFetcher: Send + Sync {
    async fn fetch(&self) -> Result<Menu, FetchError>;
}

/// GET a menu JSON document, bypassing intermediate caches
pub struct HttpMenuFetcher {
    url: String,
    client: reqwest::Client,
}

impl HttpMenuFetcher {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }

    /// `<url>?v=<millis>`, or `&v=` when the url already has a query
    pub fn cache_busted_url(&self, millis: i64) -> String {
        let sep = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{}v={}", self.url, sep, millis)
    }
}

#[async_trait]
impl MenuFetcher for HttpMenuFetcher {
    async fn fetch(&self) -> Result<Menu, FetchError> {
        let url = self.cache_busted_url(shared::util::now_millis());
        tracing::debug!(url = %url, "Fetching remote menu");

        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(FetchError::Status(resp.status().as_u16()));
        }
        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_into_app_error() {
        let err: AppError = FetchError::Status(503).into();
        assert_eq!(err.code, ErrorCode::NetworkError);
        assert_eq!(err.message, "Unexpected status: 503");
        let details = err.details.unwrap();
        assert_eq!(details.get("status"), Some(&serde_json::Value::from(503)));

        let decode = serde_json::from_str::<Menu>("{}").unwrap_err();
        let err: AppError = FetchError::from(decode).into();
        assert_eq!(err.code, ErrorCode::NetworkError);
        assert!(err.details.is_none());
    }

    #[test]
    fn test_cache_busted_url() {
        let fetcher = HttpMenuFetcher::new("http://menu.local/menu.json", Duration::from_secs(1))
            .unwrap();
        assert_eq!(
            fetcher.cache_busted_url(42),
            "http://menu.local/menu.json?v=42"
        );

        let fetcher =
            HttpMenuFetcher::new("http://menu.local/menu?branch=2", Duration::from_secs(1))
                .unwrap();
        assert_eq!(
            fetcher.cache_busted_url(42),
            "http://menu.local/menu?branch=2&v=42"
        );
    }
}
