use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("TLE fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("invalid TLE record: {0}")]
    InvalidFormat(String),
    #[error("invalid TLE: {0}")]
    Tle(#[from] sgp4::TleError),
    #[error("elements error: {0}")]
    Elements(#[from] sgp4::ElementsError),
    #[error("propagation error: {0}")]
    Propagation(String),
}
