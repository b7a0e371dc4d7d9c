use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid response body: {0}")]
    Json(#[from] serde_json::Error),
    #[error("endpoint reported '{0}'")]
    Unsuccessful(String),
    #[error("invalid {axis} coordinate: {value:?}")]
    Coordinate { axis: &'static str, value: String },
}
