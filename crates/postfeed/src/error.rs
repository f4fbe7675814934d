use postfeed_core::posts::FetchError;

#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    #[error("Invalid base URL {0}")]
    InvalidBaseUrl(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}
