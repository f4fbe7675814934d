use async_trait::async_trait;
use log::debug;
use postfeed_core::posts::{FetchError, RawPost};

use crate::error::Error;

/// Anything that can produce the raw post list
///
/// Each call makes a single attempt and resolves exactly once.
#[async_trait]
pub trait PostSource: Send + Sync {
    async fn fetch_raw_posts(&self) -> Result<Vec<RawPost>, FetchError>;
}

/// Fetches `GET <base_url>/posts` over HTTP
#[derive(Debug, Clone)]
pub struct HttpPostSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPostSource {
    pub fn new(base_url: &str) -> Result<Self, Error> {
        reqwest::Url::parse(base_url)
            .map_err(|e| Error::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        Ok(Self::with_client(reqwest::Client::new(), base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn posts_url(&self) -> String {
        format!("{}/posts", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl PostSource for HttpPostSource {
    async fn fetch_raw_posts(&self) -> Result<Vec<RawPost>, FetchError> {
        let url = self.posts_url();
        debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            debug!("GET {url} returned {status}");
            return Err(FetchError::Http(status.to_string()));
        }

        // A body that does not decode counts as no usable response.
        let posts: Vec<RawPost> = response
            .json()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        debug!("GET {url} returned {} posts", posts.len());
        Ok(posts)
    }
}
