use thiserror::Error;

#[derive(Debug, Error)]
pub enum PointerError {
    #[error("pointer request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("pointer returned {status} for {endpoint}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },
}
